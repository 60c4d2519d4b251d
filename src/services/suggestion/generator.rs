//! Candidate slot enumeration within business hours.
//!
//! Single-day requests (<= 8h) produce either three named variants per day
//! (full morning, shifted morning, full afternoon) or a 1-hour sliding
//! window for short durations. Longer requests walk forward from an anchor
//! day, consuming 8 working hours per working day; any non-working day or
//! same-line event start inside the span disqualifies the anchor.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::defaults::{HOURS_PER_WORKDAY, WORKDAY_END_HOUR, WORKDAY_START_HOUR};
use crate::services::calendar;
use crate::types::ProductionEvent;

use super::conflict;

/// An ephemeral candidate window, not yet scored.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Named-variant bonus granted at generation time (+25/+15/+10)
    pub variant_bonus: i32,
    pub multi_day: bool,
}

pub(crate) fn workday_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(WORKDAY_START_HOUR, 0, 0)
        .expect("valid workday start hour")
        .and_utc()
}

pub(crate) fn workday_end(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(WORKDAY_END_HOUR, 0, 0)
        .expect("valid workday end hour")
        .and_utc()
}

/// Enumerate same-day candidates for a working day, excluding any window
/// that directly overlaps an existing event on the line.
pub(crate) fn single_day_candidates(
    day: NaiveDate,
    duration_hours: i64,
    line_events: &[&ProductionEvent],
) -> Vec<Candidate> {
    let day_start = workday_start(day);
    let day_end = workday_end(day);
    let duration = Duration::hours(duration_hours);
    let mut candidates: Vec<Candidate> = Vec::new();

    if duration_hours >= 4 {
        // Full morning, shifted morning, full afternoon.
        let variants = [
            (day_start, 25),
            (day_start + Duration::hours(1), 15),
            (day_end - duration, 10),
        ];
        for (start, bonus) in variants {
            let end = start + duration;
            // An 8-hour request makes morning and afternoon coincide; the
            // first (highest-bonus) variant wins.
            if candidates.iter().any(|c| c.start == start) {
                continue;
            }
            if end <= day_end && !conflict::overlaps_any(start, end, line_events) {
                candidates.push(Candidate {
                    start,
                    end,
                    variant_bonus: bonus,
                    multi_day: false,
                });
            }
        }
    } else {
        let mut start = day_start;
        while start + duration <= day_end {
            let end = start + duration;
            if !conflict::overlaps_any(start, end, line_events) {
                candidates.push(Candidate {
                    start,
                    end,
                    variant_bonus: 0,
                    multi_day: false,
                });
            }
            start += Duration::hours(1);
        }
    }

    candidates
}

/// Build the single multi-day candidate anchored on `anchor`, or None when
/// the span hits a non-working day, an occupied day, or the window end.
pub(crate) fn multi_day_candidate(
    anchor: NaiveDate,
    duration_hours: i64,
    window_end: DateTime<Utc>,
    line_events: &[&ProductionEvent],
) -> Option<Candidate> {
    let start = workday_start(anchor);
    let mut remaining = duration_hours;
    let mut day = anchor;

    // Every day touched by the span must be a working day.
    let end = loop {
        if !calendar::is_working_day(day) {
            return None;
        }
        let consumed = remaining.min(HOURS_PER_WORKDAY);
        remaining -= consumed;
        if remaining == 0 {
            // A partial final day ends after the remaining hours, a full
            // one at the close of business.
            break if consumed == HOURS_PER_WORKDAY {
                workday_end(day)
            } else {
                workday_start(day) + Duration::hours(consumed)
            };
        }
        day = day.succ_opt()?;
    };

    if end > window_end {
        return None;
    }

    // Reject when any day of the span already has a same-line event
    // starting on it.
    let mut current = anchor;
    loop {
        if line_events
            .iter()
            .any(|e| e.start_time.date_naive() == current)
        {
            return None;
        }
        if current == day {
            break;
        }
        current = current.succ_opt()?;
    }

    Some(Candidate {
        start,
        end,
        variant_bonus: 0,
        multi_day: true,
    })
}
