//! French national holiday calendar and working-day predicate.
//!
//! Eleven holidays per year: eight fixed dates plus three Easter-relative
//! ones (Easter Monday, Ascension, Whit Monday). Years present in the static
//! table are looked up directly; any other year is computed on the fly from
//! the date of Easter Sunday (anonymous Gregorian algorithm).

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;

/// Label returned when a date is a holiday by table lookup but no named
/// entry matches it.
const GENERIC_HOLIDAY_LABEL: &str = "Jour férié";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid static holiday date")
}

/// Holiday dates for explicitly enumerated years, as maintained by the
/// planning team. Dates only; names are resolved through the computed path.
static HOLIDAY_TABLE: Lazy<HashMap<i32, BTreeSet<NaiveDate>>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        2024,
        BTreeSet::from([
            date(2024, 1, 1),
            date(2024, 4, 1),
            date(2024, 5, 1),
            date(2024, 5, 8),
            date(2024, 5, 9),
            date(2024, 5, 20),
            date(2024, 7, 14),
            date(2024, 8, 15),
            date(2024, 11, 1),
            date(2024, 11, 11),
            date(2024, 12, 25),
        ]),
    );
    table.insert(
        2025,
        BTreeSet::from([
            date(2025, 1, 1),
            date(2025, 4, 21),
            date(2025, 5, 1),
            date(2025, 5, 8),
            date(2025, 5, 29),
            date(2025, 6, 9),
            date(2025, 7, 14),
            date(2025, 8, 15),
            date(2025, 11, 1),
            date(2025, 11, 11),
            date(2025, 12, 25),
        ]),
    );
    table.insert(
        2026,
        BTreeSet::from([
            date(2026, 1, 1),
            date(2026, 4, 6),
            date(2026, 5, 1),
            date(2026, 5, 8),
            date(2026, 5, 14),
            date(2026, 5, 25),
            date(2026, 7, 14),
            date(2026, 8, 15),
            date(2026, 11, 1),
            date(2026, 11, 11),
            date(2026, 12, 25),
        ]),
    );
    table
});

/// Date of Easter Sunday for a Gregorian year (anonymous Gregorian
/// algorithm, integer arithmetic only).
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).expect("Easter computation yields a valid date")
}

/// The eleven French national holidays of a year, with names.
pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let easter = easter_sunday(year);
    vec![
        (date(year, 1, 1), "Jour de l'an"),
        (easter + chrono::Duration::days(1), "Lundi de Pâques"),
        (date(year, 5, 1), "Fête du Travail"),
        (date(year, 5, 8), "Victoire 1945"),
        (easter + chrono::Duration::days(39), "Ascension"),
        (easter + chrono::Duration::days(50), "Lundi de Pentecôte"),
        (date(year, 7, 14), "Fête nationale"),
        (date(year, 8, 15), "Assomption"),
        (date(year, 11, 1), "Toussaint"),
        (date(year, 11, 11), "Armistice 1918"),
        (date(year, 12, 25), "Noël"),
    ]
}

/// Whether the date falls on a national holiday. Time-of-day is ignored.
pub fn is_holiday(day: NaiveDate) -> bool {
    match HOLIDAY_TABLE.get(&day.year()) {
        Some(dates) => dates.contains(&day),
        None => holidays_for_year(day.year()).iter().any(|(d, _)| *d == day),
    }
}

/// Name of the holiday falling on the date, if any.
pub fn holiday_name(day: NaiveDate) -> Option<String> {
    if let Some((_, name)) = holidays_for_year(day.year()).into_iter().find(|(d, _)| *d == day) {
        return Some(name.to_string());
    }
    // A table year may carry a date the computed set does not name.
    if is_holiday(day) {
        return Some(GENERIC_HOLIDAY_LABEL.to_string());
    }
    None
}

/// Working day: a weekday that is not a national holiday. Weekends and
/// holidays are never considered as scheduling anchors.
pub fn is_working_day(day: NaiveDate) -> bool {
    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) && !is_holiday(day)
}
