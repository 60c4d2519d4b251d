//! Production line queries

use sqlx::PgPool;

use crate::types::LineSectorInfo;

/// Line with its sector, if the line exists. The sector side of the join
/// is optional; a line without a sector still resolves.
pub async fn get_line_sector(
    pool: &PgPool,
    line_id: i32,
) -> Result<Option<LineSectorInfo>, sqlx::Error> {
    sqlx::query_as::<_, LineSectorInfo>(
        r#"
        SELECT l.id AS line_id, l.name AS line_name, l.sector_id, s.name AS sector_name
        FROM production_lines l
        LEFT JOIN sectors s ON s.id = l.sector_id
        WHERE l.id = $1
        "#,
    )
    .bind(line_id)
    .fetch_optional(pool)
    .await
}
