//! Data access seam for the suggestion handlers.
//!
//! Handlers depend on this trait rather than on the pool directly, so
//! tests can feed the engine canned data without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;

use crate::db::queries;
use crate::types::{LineSectorInfo, ProductionEvent};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read-only view of the scheduling data the engine consumes.
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    /// Events overlapping the analysis window, all lines.
    async fn fetch_events(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<ProductionEvent>, StoreError>;

    /// Line metadata with its sector, or None for an unknown line.
    async fn resolve_line_sector(
        &self,
        line_id: i32,
    ) -> Result<Option<LineSectorInfo>, StoreError>;
}

/// Postgres-backed store used in production.
pub struct PgSchedulingStore {
    pool: PgPool,
}

impl PgSchedulingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchedulingStore for PgSchedulingStore {
    async fn fetch_events(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<ProductionEvent>, StoreError> {
        Ok(queries::event::list_events_in_window(&self.pool, window_start, window_end).await?)
    }

    async fn resolve_line_sector(
        &self,
        line_id: i32,
    ) -> Result<Option<LineSectorInfo>, StoreError> {
        Ok(queries::line::get_line_sector(&self.pool, line_id).await?)
    }
}
