use serde::Serialize;
use sqlx::{PgPool, Row};

/// Aggregate counts for the dashboard endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub item_count: i64,
    pub seated_item_count: i64,
    pub ticketed_item_count: i64,
    pub booking_count: i64,
    pub total_capacity: i64,
    pub total_remaining: i64,
    pub total_booked: i64,
}

pub async fn dashboard_summary(pool: &PgPool) -> Result<DashboardSummary, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM items) AS item_count,
            (SELECT COUNT(*) FROM items WHERE kind = 'seated') AS seated_item_count,
            (SELECT COUNT(*) FROM items WHERE kind = 'ticketed') AS ticketed_item_count,
            (SELECT COUNT(*) FROM bookings) AS booking_count,
            (SELECT COALESCE(SUM(total_capacity), 0) FROM items) AS total_capacity,
            (SELECT COALESCE(SUM(remaining), 0) FROM items) AS total_remaining,
            (SELECT COALESCE(SUM(quantity), 0) FROM bookings) AS total_booked
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(DashboardSummary {
        item_count: row.get("item_count"),
        seated_item_count: row.get("seated_item_count"),
        ticketed_item_count: row.get("ticketed_item_count"),
        booking_count: row.get("booking_count"),
        total_capacity: row.get("total_capacity"),
        total_remaining: row.get("total_remaining"),
        total_booked: row.get("total_booked"),
    })
}
