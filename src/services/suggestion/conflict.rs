//! Direct line conflicts and sector-week contention.
//!
//! A direct conflict is a half-open interval overlap with an event on the
//! same line; it eliminates the candidate. Sector contention is softer: any
//! event sharing the sector and starting inside the same Monday-to-Sunday
//! week only penalizes the score.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::types::ProductionEvent;

/// Half-open interval overlap test.
pub(crate) fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Whether [start, end) overlaps any of the given events.
pub(crate) fn overlaps_any(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    events: &[&ProductionEvent],
) -> bool {
    events
        .iter()
        .any(|e| overlaps(start, end, e.start_time, e.end_time))
}

/// Monday of the calendar week containing the date.
pub(crate) fn week_monday(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

/// Start times of sector events falling in the same Monday-to-Sunday week
/// as `day`. Computed once per day and shared by scoring and reason text.
pub(crate) fn sector_week_conflicts(
    events: &[ProductionEvent],
    sector_id: i32,
    day: NaiveDate,
) -> Vec<DateTime<Utc>> {
    let monday = week_monday(day);
    let next_monday = monday + Duration::days(7);
    events
        .iter()
        .filter(|e| e.sector_id == Some(sector_id))
        .filter(|e| {
            let d = e.start_time.date_naive();
            d >= monday && d < next_monday
        })
        .map(|e| e.start_time)
        .collect()
}

/// Sector contention over a multi-day span: every week touched by
/// [start_day, end_day] is checked, and a conflict in any of them marks the
/// whole candidate. Returns the Monday of the first conflicted week.
pub(crate) fn sector_conflict_over_span(
    events: &[ProductionEvent],
    sector_id: i32,
    start_day: NaiveDate,
    end_day: NaiveDate,
) -> Option<NaiveDate> {
    let mut monday = week_monday(start_day);
    let last_monday = week_monday(end_day);
    while monday <= last_monday {
        if !sector_week_conflicts(events, sector_id, monday).is_empty() {
            return Some(monday);
        }
        monday += Duration::days(7);
    }
    None
}
