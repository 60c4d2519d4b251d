//! Production event queries

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::types::ProductionEvent;

/// All events overlapping [window_start, window_end), across every line,
/// each joined with its line's sector. The engine needs the full picture
/// to weigh sector contention, not just the requested line.
pub async fn list_events_in_window(
    pool: &PgPool,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<Vec<ProductionEvent>, sqlx::Error> {
    sqlx::query_as::<_, ProductionEvent>(
        r#"
        SELECT p.id, p.start_time, p.end_time, p.line_id, l.sector_id
        FROM prs_events p
        LEFT JOIN production_lines l ON l.id = p.line_id
        WHERE p.start_time < $2 AND p.end_time > $1
        ORDER BY p.start_time
        "#,
    )
    .bind(window_start)
    .bind(window_end)
    .fetch_all(pool)
    .await
}
