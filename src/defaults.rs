//! Business-rule constants for slot suggestion.

/// Business day in internal UTC hours. 07:00-15:00 UTC is the 09:00-17:00
/// local (UTC+2) contract documented in response metadata.
pub const WORKDAY_START_HOUR: u32 = 7;
pub const WORKDAY_END_HOUR: u32 = 15;

/// Working hours consumed per day when a request spans several days.
pub const HOURS_PER_WORKDAY: i64 = 8;

pub const DEFAULT_DURATION_HOURS: i64 = 1;
pub const DEFAULT_ANALYSIS_WINDOW_WEEKS: i64 = 4;

/// Candidates scoring at or below this never reach the response.
pub const MIN_SCORE: i32 = 20;

pub const MAX_SUGGESTIONS: usize = 5;
pub const MAX_SUGGESTIONS_BASIC: usize = 3;
