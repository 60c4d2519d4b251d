//! Production event (PRS) projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only snapshot row of a scheduled production/maintenance event.
///
/// Fetched once per suggestion request for the whole analysis window and
/// never mutated by the worker.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEvent {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub line_id: i32,
    pub sector_id: Option<i32>,
}
