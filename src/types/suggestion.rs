//! Wire types for slot suggestion requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults::DEFAULT_DURATION_HOURS;

/// Request to suggest scheduling slots for a PRS on a production line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestSlotsRequest {
    /// Target production line
    pub line_id: i32,
    /// Optional equipment label ("CMS", "Finition", ...), matched by substring
    #[serde(default)]
    pub equipment: Option<String>,
    /// Requested duration in hours; values above 8 switch to multi-day mode
    #[serde(default = "default_duration_hours")]
    pub duration_hours: i64,
}

fn default_duration_hours() -> i64 {
    DEFAULT_DURATION_HOURS
}

/// A suggested time slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Heuristic desirability score, never negative
    pub score: i32,
    /// Reason/explanation for the score
    pub reason: String,
}

/// Descriptive constants accompanying every response. Presentation only;
/// no caller decision depends on these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionMetadata {
    pub analysis_window_start: DateTime<Utc>,
    pub analysis_window_end: DateTime<Utc>,
    pub business_hours: String,
    pub holiday_policy: String,
    pub day_weights: String,
    /// True when line/sector metadata was unavailable and basic scoring ran
    pub degraded_mode: bool,
}

/// Response with ranked suggestions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestSlotsResponse {
    pub suggestions: Vec<SuggestedSlot>,
    pub metadata: SuggestionMetadata,
}
