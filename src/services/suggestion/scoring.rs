//! Candidate scoring.
//!
//! One scorer, two weight sets. `ScoringMode::Sectored` carries the full
//! tables (base 100 single-day, base 150 multi-day); `ScoringMode::Basic`
//! runs when line/sector metadata is unavailable (base 80, simplified
//! bonuses). All arithmetic is integer and the result is floored at 0.

use chrono::{Datelike, Timelike, Weekday};

use super::generator::Candidate;
use super::{DayContext, ScoringMode};

fn equipment_matches(equipment: Option<&str>, tag: &str) -> bool {
    equipment
        .map(|e| e.to_lowercase().contains(tag))
        .unwrap_or(false)
}

pub(crate) fn score_single_day(
    mode: ScoringMode,
    candidate: &Candidate,
    duration_hours: i64,
    equipment: Option<&str>,
    ctx: &DayContext,
) -> i32 {
    match mode {
        ScoringMode::Sectored => sectored_single_day(candidate, duration_hours, equipment, ctx),
        ScoringMode::Basic => basic(candidate, equipment, ctx),
    }
}

pub(crate) fn score_multi_day(
    mode: ScoringMode,
    candidate: &Candidate,
    duration_hours: i64,
    equipment: Option<&str>,
    ctx: &DayContext,
    period_event_count: usize,
    span_conflicted: bool,
) -> i32 {
    match mode {
        ScoringMode::Sectored => {
            sectored_multi_day(candidate, duration_hours, ctx, period_event_count, span_conflicted)
        }
        ScoringMode::Basic => basic(candidate, equipment, ctx),
    }
}

fn sectored_single_day(
    candidate: &Candidate,
    duration_hours: i64,
    equipment: Option<&str>,
    ctx: &DayContext,
) -> i32 {
    let hour = candidate.start.hour();
    let mut score = 100 + candidate.variant_bonus;

    if ctx.sector_conflicted() {
        score -= 70;
    }

    score += match hour {
        7..=8 => 35,
        9..=10 => 25,
        11..=12 => 15,
        _ if hour >= 13 => -25,
        _ => 0,
    };

    if equipment_matches(equipment, "cms") && (7..9).contains(&hour) {
        score += 30;
    }
    if equipment_matches(equipment, "finition") && (11..13).contains(&hour) {
        score += 25;
    }

    score += match ctx.same_line_count {
        0 => 40,
        1..=2 => 25,
        n if n >= 5 => -20,
        _ => 0,
    };

    match ctx.weekday {
        Weekday::Mon | Weekday::Tue | Weekday::Wed => {
            score += 25;
            if ctx.prev_day_holiday.is_some() {
                score += 10;
            }
        }
        Weekday::Thu => {
            score += 10;
            if ctx.next_day_holiday.is_some() {
                score -= 10;
            }
        }
        Weekday::Fri => {
            score += 5;
            // "Bridge" Friday before a Monday holiday.
            if ctx.bridge_monday_holiday {
                score -= 15;
            }
        }
        _ => {}
    }

    if ctx.sector_known && !ctx.sector_conflicted() {
        score += 45;
    }
    if ctx.same_line_count == 0 {
        score += 30;
    }
    if duration_hours == 1 && (7..9).contains(&hour) {
        score += 15;
    }
    if duration_hours == 8 && hour == 7 {
        score += 20;
    }

    score.max(0)
}

fn sectored_multi_day(
    candidate: &Candidate,
    duration_hours: i64,
    ctx: &DayContext,
    period_event_count: usize,
    span_conflicted: bool,
) -> i32 {
    let mut score = 150;

    if span_conflicted {
        score -= 80;
    }

    match ctx.weekday {
        Weekday::Mon => {
            score += 35;
            if ctx.prev_day_holiday.is_some() {
                score += 10;
            }
        }
        Weekday::Tue => score += 30,
        Weekday::Wed => score += 25,
        Weekday::Thu => score += 5,
        Weekday::Fri => score -= 10,
        _ => {}
    }

    if ctx.sector_known && !span_conflicted {
        score += 50;
    }

    score += match duration_hours {
        16 => 20,
        24 => 15,
        40 => 25,
        _ => 0,
    };

    if period_event_count <= 3 {
        score += 30;
    } else if period_event_count >= 10 {
        score -= 25;
    }

    if candidate.end.weekday() == Weekday::Fri && candidate.end.hour() > 13 {
        score -= 15;
    }

    score.max(0)
}

fn basic(candidate: &Candidate, equipment: Option<&str>, ctx: &DayContext) -> i32 {
    let hour = candidate.start.hour();
    let mut score = 80 + candidate.variant_bonus;

    // 09:00-13:00 local, i.e. internal hours 7-11.
    if (7..11).contains(&hour) {
        score += 30;
    }
    if equipment_matches(equipment, "cms") && (7..9).contains(&hour) {
        score += 25;
    }
    if equipment_matches(equipment, "finition") && (11..13).contains(&hour) {
        score += 20;
    }

    // +10 per free same-day slot, up to three.
    score += 10 * (3 - ctx.same_line_count.min(3)) as i32;

    score += match ctx.weekday {
        Weekday::Mon | Weekday::Tue | Weekday::Wed => 25,
        Weekday::Thu => 10,
        Weekday::Fri => 5,
        _ => 0,
    };

    if ctx.prev_day_holiday.is_some() {
        score += 25;
    }
    if ctx.next_day_holiday.is_some() {
        score -= 15;
    }

    score.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, d, h, 0, 0).unwrap()
    }

    fn candidate(d: u32, start_h: u32, end_h: u32, bonus: i32, multi: bool) -> Candidate {
        Candidate {
            start: at(d, start_h),
            end: at(d, end_h),
            variant_bonus: bonus,
            multi_day: multi,
        }
    }

    fn ctx(d: u32, count: usize, conflicts: Vec<DateTime<Utc>>) -> DayContext {
        let date = NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
        DayContext {
            weekday: date.weekday(),
            same_line_count: count,
            sector_conflicts: conflicts,
            sector_known: true,
            prev_day_holiday: None,
            next_day_holiday: None,
            bridge_monday_holiday: false,
        }
    }

    #[test]
    fn quiet_monday_morning_single_hour() {
        // 2025-09-01 is a Monday. 100 +35(early) +40+30(free line) +25(Mon)
        // +45(no sector conflict) +15(1h early) = 290.
        let score = score_single_day(
            ScoringMode::Sectored,
            &candidate(1, 7, 8, 0, false),
            1,
            None,
            &ctx(1, 0, vec![]),
        );
        assert_eq!(score, 290);
    }

    #[test]
    fn sector_conflict_costs_both_penalty_and_bonus() {
        let free = score_single_day(
            ScoringMode::Sectored,
            &candidate(1, 7, 8, 0, false),
            1,
            None,
            &ctx(1, 0, vec![]),
        );
        let contended = score_single_day(
            ScoringMode::Sectored,
            &candidate(1, 7, 8, 0, false),
            1,
            None,
            &ctx(1, 0, vec![at(3, 8)]),
        );
        // -70 penalty plus the lost +45 free-sector bonus.
        assert_eq!(free - contended, 115);
    }

    #[test]
    fn equipment_affinity_is_substring_matched() {
        let plain = score_single_day(
            ScoringMode::Sectored,
            &candidate(1, 7, 8, 0, false),
            1,
            None,
            &ctx(1, 0, vec![]),
        );
        let with_cms = score_single_day(
            ScoringMode::Sectored,
            &candidate(1, 7, 8, 0, false),
            1,
            Some("Ligne CMS 2"),
            &ctx(1, 0, vec![]),
        );
        assert_eq!(with_cms - plain, 30);
        // Finition only pays off near midday.
        let finition_morning = score_single_day(
            ScoringMode::Sectored,
            &candidate(1, 7, 8, 0, false),
            1,
            Some("Finition"),
            &ctx(1, 0, vec![]),
        );
        assert_eq!(finition_morning, plain);
    }

    #[test]
    fn score_never_goes_negative() {
        // Thursday 2025-09-04, late start, crowded line, contended sector:
        // 100 -70 -25 -20 +10 = -5 before the floor.
        let score = score_single_day(
            ScoringMode::Sectored,
            &candidate(4, 13, 14, 0, false),
            1,
            None,
            &ctx(4, 6, vec![at(2, 8)]),
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn full_week_multi_day_score() {
        // Monday anchor, 40h, empty calendar, ends Friday 15:00:
        // 150 +35(Mon) +50(sector free) +25(40h) +30(quiet period) -15(Friday
        // late finish) = 275.
        let c = Candidate {
            start: at(1, 7),
            end: at(5, 15),
            variant_bonus: 0,
            multi_day: true,
        };
        let score = score_multi_day(ScoringMode::Sectored, &c, 40, None, &ctx(1, 0, vec![]), 0, false);
        assert_eq!(score, 275);
    }

    #[test]
    fn busy_period_penalizes_multi_day() {
        let c = Candidate {
            start: at(2, 7),
            end: at(3, 15),
            variant_bonus: 0,
            multi_day: true,
        };
        let quiet = score_multi_day(ScoringMode::Sectored, &c, 16, None, &ctx(2, 0, vec![]), 0, false);
        let busy = score_multi_day(ScoringMode::Sectored, &c, 16, None, &ctx(2, 0, vec![]), 10, false);
        // +30 quiet bonus swings to -25 crowd penalty.
        assert_eq!(quiet - busy, 55);
    }

    #[test]
    fn basic_mode_monday_morning() {
        // 80 +30(morning band) +30(three free slots) +25(Mon) = 165.
        let score = score_single_day(
            ScoringMode::Basic,
            &candidate(1, 7, 8, 0, false),
            1,
            None,
            &ctx(1, 0, vec![]),
        );
        assert_eq!(score, 165);
    }

    #[test]
    fn basic_mode_day_after_holiday_bonus() {
        let mut context = ctx(1, 0, vec![]);
        context.prev_day_holiday = Some("Assomption".to_string());
        let score = score_single_day(
            ScoringMode::Basic,
            &candidate(1, 7, 8, 0, false),
            1,
            None,
            &context,
        );
        assert_eq!(score, 190);
    }
}
