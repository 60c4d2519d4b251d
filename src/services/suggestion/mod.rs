//! Slot suggestion engine.
//!
//! Pure, synchronous computation over a snapshot of existing events: for
//! every working day of the analysis window, enumerate candidate windows,
//! score them against the line, sector and calendar context, attach a
//! justification, then rank and truncate. Deterministic for a fixed
//! snapshot and window; enumeration runs day by day, slot by slot, because
//! tie-breaking relies on stable order.

mod conflict;
mod generator;
mod reason;
mod scoring;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use thiserror::Error;

use crate::defaults::{HOURS_PER_WORKDAY, MAX_SUGGESTIONS, MAX_SUGGESTIONS_BASIC, MIN_SCORE};
use crate::services::calendar;
use crate::types::{LineSectorInfo, ProductionEvent, SuggestSlotsRequest, SuggestedSlot};

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("durationHours must be at least 1 (got {0})")]
    InvalidDuration(i64),
}

/// Weight set selector. Basic runs when line/sector metadata could not be
/// resolved and keeps its own base score, bonuses and top-3 selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    Sectored,
    Basic,
}

/// Calendar and load context for one working day, computed once per day
/// and shared by every candidate of that day.
pub(crate) struct DayContext {
    pub weekday: Weekday,
    /// Same-line events starting on this day
    pub same_line_count: usize,
    /// Start times of sector events in this Monday-to-Sunday week
    pub sector_conflicts: Vec<DateTime<Utc>>,
    pub sector_known: bool,
    pub prev_day_holiday: Option<String>,
    pub next_day_holiday: Option<String>,
    /// Friday whose following Monday is a holiday
    pub bridge_monday_holiday: bool,
}

impl DayContext {
    pub(crate) fn sector_conflicted(&self) -> bool {
        !self.sector_conflicts.is_empty()
    }
}

/// One engine instance per request, over an immutable snapshot.
pub struct SlotSuggestionEngine {
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    events: Vec<ProductionEvent>,
    sector: Option<LineSectorInfo>,
}

impl SlotSuggestionEngine {
    pub fn new(
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        events: Vec<ProductionEvent>,
        sector: Option<LineSectorInfo>,
    ) -> Self {
        Self {
            window_start,
            window_end,
            events,
            sector,
        }
    }

    pub fn mode(&self) -> ScoringMode {
        if self.sector.is_some() {
            ScoringMode::Sectored
        } else {
            ScoringMode::Basic
        }
    }

    /// Ranked suggestions for the request: at most 5 (3 in basic mode),
    /// all scoring strictly above the cutoff.
    pub fn suggest(
        &self,
        request: &SuggestSlotsRequest,
    ) -> Result<Vec<SuggestedSlot>, SuggestError> {
        if request.duration_hours < 1 {
            return Err(SuggestError::InvalidDuration(request.duration_hours));
        }

        let mode = self.mode();
        let equipment = request.equipment.as_deref();
        let sector_id = self.sector.as_ref().and_then(|s| s.sector_id);
        let line_events: Vec<&ProductionEvent> = self
            .events
            .iter()
            .filter(|e| e.line_id == request.line_id)
            .collect();

        let mut scored: Vec<SuggestedSlot> = Vec::new();
        let mut day = self.window_start.date_naive();
        let last_day = self.window_end.date_naive();

        while day <= last_day {
            if calendar::is_working_day(day) {
                let ctx = self.day_context(day, &line_events);

                if request.duration_hours <= HOURS_PER_WORKDAY {
                    for candidate in
                        generator::single_day_candidates(day, request.duration_hours, &line_events)
                    {
                        // The event snapshot stops at window_end; anything
                        // reaching past it cannot be conflict-checked.
                        if candidate.end > self.window_end {
                            continue;
                        }
                        let score = scoring::score_single_day(
                            mode,
                            &candidate,
                            request.duration_hours,
                            equipment,
                            &ctx,
                        );
                        let reason = reason::single_day(mode, &candidate, equipment, &ctx);
                        scored.push(SuggestedSlot {
                            start_time: candidate.start,
                            end_time: candidate.end,
                            score,
                            reason,
                        });
                    }
                } else if let Some(candidate) = generator::multi_day_candidate(
                    day,
                    request.duration_hours,
                    self.window_end,
                    &line_events,
                ) {
                    let span_end = candidate.end.date_naive();
                    let span_conflict_week = sector_id.and_then(|sid| {
                        conflict::sector_conflict_over_span(&self.events, sid, day, span_end)
                    });
                    let period_event_count = self
                        .events
                        .iter()
                        .filter(|e| {
                            let d = e.start_time.date_naive();
                            d >= day && d <= span_end
                        })
                        .count();
                    let score = scoring::score_multi_day(
                        mode,
                        &candidate,
                        request.duration_hours,
                        equipment,
                        &ctx,
                        period_event_count,
                        span_conflict_week.is_some(),
                    );
                    let reason = reason::multi_day(mode, &candidate, &ctx, span_conflict_week);
                    scored.push(SuggestedSlot {
                        start_time: candidate.start,
                        end_time: candidate.end,
                        score,
                        reason,
                    });
                }
            }

            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        Ok(rank(mode, scored))
    }

    fn day_context(&self, date: NaiveDate, line_events: &[&ProductionEvent]) -> DayContext {
        let sector_id = self.sector.as_ref().and_then(|s| s.sector_id);
        let sector_conflicts = match sector_id {
            Some(sid) => conflict::sector_week_conflicts(&self.events, sid, date),
            None => Vec::new(),
        };
        DayContext {
            weekday: date.weekday(),
            same_line_count: line_events
                .iter()
                .filter(|e| e.start_time.date_naive() == date)
                .count(),
            sector_conflicts,
            sector_known: sector_id.is_some(),
            prev_day_holiday: date.pred_opt().and_then(calendar::holiday_name),
            next_day_holiday: date.succ_opt().and_then(calendar::holiday_name),
            bridge_monday_holiday: date.weekday() == Weekday::Fri
                && date
                    .checked_add_days(Days::new(3))
                    .map(calendar::is_holiday)
                    .unwrap_or(false),
        }
    }
}

/// Cutoff, sort and truncation. Primary mode breaks score ties on the
/// earlier start; basic mode sorts on score alone (stable, so enumeration
/// order decides ties).
fn rank(mode: ScoringMode, mut slots: Vec<SuggestedSlot>) -> Vec<SuggestedSlot> {
    slots.retain(|s| s.score > MIN_SCORE);
    match mode {
        ScoringMode::Sectored => {
            slots.sort_by(|a, b| b.score.cmp(&a.score).then(a.start_time.cmp(&b.start_time)));
            slots.truncate(MAX_SUGGESTIONS);
        }
        ScoringMode::Basic => {
            slots.sort_by(|a, b| b.score.cmp(&a.score));
            slots.truncate(MAX_SUGGESTIONS_BASIC);
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn at(m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, m, d, h, 0, 0).unwrap()
    }

    fn sector_info() -> LineSectorInfo {
        LineSectorInfo {
            line_id: 1,
            line_name: "Ligne 1".to_string(),
            sector_id: Some(7),
            sector_name: Some("Secteur A".to_string()),
        }
    }

    fn event(
        id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        line_id: i32,
        sector_id: Option<i32>,
    ) -> ProductionEvent {
        ProductionEvent {
            id,
            start_time: start,
            end_time: end,
            line_id,
            sector_id,
        }
    }

    /// Four-week window opening Monday 2025-09-01, no holidays inside.
    fn engine(events: Vec<ProductionEvent>, sector: Option<LineSectorInfo>) -> SlotSuggestionEngine {
        SlotSuggestionEngine::new(at(9, 1, 0), at(9, 29, 0), events, sector)
    }

    fn request(duration_hours: i64) -> SuggestSlotsRequest {
        SuggestSlotsRequest {
            line_id: 1,
            equipment: None,
            duration_hours,
        }
    }

    #[test]
    fn rejects_non_positive_duration() {
        let engine = engine(vec![], Some(sector_info()));
        assert!(matches!(
            engine.suggest(&request(0)),
            Err(SuggestError::InvalidDuration(0))
        ));
        assert!(matches!(
            engine.suggest(&request(-3)),
            Err(SuggestError::InvalidDuration(-3))
        ));
    }

    #[test]
    fn one_hour_request_tops_out_at_opening_of_first_working_day() {
        let engine = engine(vec![], Some(sector_info()));
        let slots = engine.suggest(&request(1)).unwrap();
        assert_eq!(slots.len(), 5);
        // Early Monday morning wins; hour-7 and hour-8 starts tie on score,
        // so the earlier start comes first.
        assert_eq!(slots[0].start_time, at(9, 1, 7));
        assert_eq!(slots[0].end_time, at(9, 1, 8));
    }

    #[test]
    fn forty_hours_yields_monday_anchored_full_weeks() {
        let engine = engine(vec![], Some(sector_info()));
        let slots = engine.suggest(&request(40)).unwrap();
        // Any non-Monday anchor runs into a weekend, so only Mondays
        // survive; four of them fit the window.
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].start_time, at(9, 1, 7));
        assert_eq!(slots[0].end_time, at(9, 5, 15));
        for slot in &slots {
            assert_eq!(slot.start_time.weekday(), Weekday::Mon);
            assert_eq!(slot.end_time.weekday(), Weekday::Fri);
        }
    }

    #[test]
    fn suggestions_are_sorted_score_desc_then_start_asc() {
        let engine = engine(vec![], Some(sector_info()));
        let slots = engine.suggest(&request(2)).unwrap();
        for pair in slots.windows(2) {
            assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score
                        && pair[0].start_time <= pair[1].start_time)
            );
        }
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let events = vec![
            event(1, at(9, 2, 8), at(9, 2, 12), 1, Some(7)),
            event(2, at(9, 10, 7), at(9, 10, 15), 2, Some(7)),
        ];
        let a = engine(events.clone(), Some(sector_info()))
            .suggest(&request(3))
            .unwrap();
        let b = engine(events, Some(sector_info()))
            .suggest(&request(3))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn emitted_slots_never_conflict_with_same_line_events() {
        let events = vec![
            event(1, at(9, 1, 7), at(9, 1, 11), 1, Some(7)),
            event(2, at(9, 3, 9), at(9, 3, 13), 1, Some(7)),
            event(3, at(9, 8, 7), at(9, 8, 15), 1, Some(7)),
        ];
        let engine = engine(events.clone(), Some(sector_info()));
        let slots = engine.suggest(&request(2)).unwrap();
        assert!(!slots.is_empty());
        for slot in &slots {
            for e in events.iter().filter(|e| e.line_id == 1) {
                assert!(
                    !(slot.start_time < e.end_time && slot.end_time > e.start_time),
                    "slot {} overlaps event {}",
                    slot.start_time,
                    e.id
                );
            }
        }
    }

    #[test]
    fn full_day_requests_end_exactly_at_close_of_business() {
        let engine = engine(vec![], Some(sector_info()));
        let slots = engine.suggest(&request(8)).unwrap();
        assert!(!slots.is_empty());
        for slot in &slots {
            assert_eq!(slot.end_time.hour(), 15);
        }
    }

    #[test]
    fn suggestions_never_reach_past_the_window_close() {
        // Window closes at midnight before Monday the 29th; Friday the 26th
        // is the last working day whose slots still fit inside it.
        let engine =
            SlotSuggestionEngine::new(at(9, 26, 0), at(9, 29, 0), vec![], Some(sector_info()));
        let slots = engine.suggest(&request(1)).unwrap();
        assert!(!slots.is_empty());
        for slot in &slots {
            assert!(slot.start_time < at(9, 29, 0));
            assert!(slot.end_time <= at(9, 29, 0));
            assert_eq!(slot.start_time.day(), 26);
        }
    }

    #[test]
    fn basic_mode_returns_at_most_three() {
        let engine = engine(vec![], None);
        assert_eq!(engine.mode(), ScoringMode::Basic);
        let slots = engine.suggest(&request(1)).unwrap();
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn rank_drops_scores_at_or_below_cutoff() {
        let slot = |score: i32, hour: u32| SuggestedSlot {
            start_time: at(9, 1, hour),
            end_time: at(9, 1, hour + 1),
            score,
            reason: String::new(),
        };
        let ranked = rank(
            ScoringMode::Sectored,
            vec![slot(50, 9), slot(20, 7), slot(21, 8), slot(0, 10)],
        );
        let scores: Vec<i32> = ranked.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![50, 21]);
    }

    #[test]
    fn rank_breaks_ties_on_earlier_start() {
        let slot = |score: i32, hour: u32| SuggestedSlot {
            start_time: at(9, 1, hour),
            end_time: at(9, 1, hour + 1),
            score,
            reason: String::new(),
        };
        let ranked = rank(
            ScoringMode::Sectored,
            vec![slot(80, 10), slot(80, 7), slot(90, 12)],
        );
        assert_eq!(ranked[0].start_time, at(9, 1, 12));
        assert_eq!(ranked[1].start_time, at(9, 1, 7));
        assert_eq!(ranked[2].start_time, at(9, 1, 10));
    }

    #[test]
    fn sector_contention_downranks_the_whole_week() {
        // A sector neighbour runs Wednesday of the first week.
        let events = vec![event(1, at(9, 3, 8), at(9, 3, 12), 2, Some(7))];
        let engine = engine(events, Some(sector_info()));
        let slots = engine.suggest(&request(1)).unwrap();
        // The top suggestion moves to the second week's Monday.
        assert_eq!(slots[0].start_time, at(9, 8, 7));
        assert!(slots[0].reason.contains("Secteur libre"));
    }
}
