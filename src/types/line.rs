//! Production line and sector metadata.

use serde::{Deserialize, Serialize};

/// Line metadata with its enclosing sector, resolved once per request.
/// Lines without a sector degrade the engine to basic scoring.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LineSectorInfo {
    pub line_id: i32,
    pub line_name: String,
    pub sector_id: Option<i32>,
    pub sector_name: Option<String>,
}
