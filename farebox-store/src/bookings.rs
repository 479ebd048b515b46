use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use farebox_core::Booking;

#[derive(sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub quantity: i32,
    pub seat_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            item_id: row.item_id,
            item_name: row.item_name,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            quantity: row.quantity,
            seat_number: row.seat_number,
            created_at: row.created_at,
        }
    }
}

const BOOKING_COLUMNS: &str =
    "id, item_id, item_name, first_name, last_name, email, quantity, seat_number, created_at";

pub async fn list_for_item(pool: &PgPool, item_id: Uuid) -> Result<Vec<Booking>, sqlx::Error> {
    let rows = sqlx::query_as::<_, BookingRow>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE item_id = $1 ORDER BY created_at DESC"
    ))
    .bind(item_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Booking::from).collect())
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
    let rows = sqlx::query_as::<_, BookingRow>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Booking::from).collect())
}
