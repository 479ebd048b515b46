use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use farebox_core::{CreateItemRequest, InventoryItem, ItemKind, SeatStatus, SeatUnit};

#[derive(sqlx::FromRow)]
pub(crate) struct ItemRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub kind: String,
    pub total_capacity: i32,
    pub remaining: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for InventoryItem {
    type Error = sqlx::Error;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let kind: ItemKind = row
            .kind
            .parse()
            .map_err(|e: farebox_core::inventory::ParseItemKindError| {
                sqlx::Error::Decode(Box::new(e))
            })?;
        Ok(InventoryItem {
            id: row.id,
            name: row.name,
            description: row.description,
            location: row.location,
            starts_at: row.starts_at,
            kind,
            total_capacity: row.total_capacity,
            remaining: row.remaining,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct SeatRow {
    pub id: Uuid,
    pub item_id: Uuid,
    pub seat_number: i32,
    pub status: String,
    pub booking_id: Option<Uuid>,
}

impl TryFrom<SeatRow> for SeatUnit {
    type Error = sqlx::Error;

    fn try_from(row: SeatRow) -> Result<Self, Self::Error> {
        let status: SeatStatus = row
            .status
            .parse()
            .map_err(|e: farebox_core::inventory::ParseSeatStatusError| {
                sqlx::Error::Decode(Box::new(e))
            })?;
        Ok(SeatUnit {
            id: row.id,
            item_id: row.item_id,
            seat_number: row.seat_number,
            status,
            booking_id: row.booking_id,
        })
    }
}

const ITEM_COLUMNS: &str =
    "id, name, description, location, starts_at, kind, total_capacity, remaining, created_at";

pub async fn list_items(pool: &PgPool) -> Result<Vec<InventoryItem>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ItemRow>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items ORDER BY created_at"
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(InventoryItem::try_from).collect()
}

pub async fn get_item(pool: &PgPool, id: Uuid) -> Result<Option<InventoryItem>, sqlx::Error> {
    let row = sqlx::query_as::<_, ItemRow>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(InventoryItem::try_from).transpose()
}

/// Inserts the item and, for seated inventory, its seat units 1..=capacity,
/// in one transaction. Remaining capacity starts equal to total capacity.
pub async fn create_item(
    pool: &PgPool,
    request: &CreateItemRequest,
) -> Result<InventoryItem, sqlx::Error> {
    let item = InventoryItem {
        id: Uuid::new_v4(),
        name: request.name.clone(),
        description: request.description.clone(),
        location: request.location.clone(),
        starts_at: request.starts_at,
        kind: request.kind,
        total_capacity: request.capacity,
        remaining: request.capacity,
        created_at: Utc::now(),
    };

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO items (id, name, description, location, starts_at, kind, total_capacity, remaining, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(item.id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(&item.location)
    .bind(item.starts_at)
    .bind(item.kind.as_str())
    .bind(item.total_capacity)
    .bind(item.remaining)
    .bind(item.created_at)
    .execute(&mut *tx)
    .await?;

    if item.kind == ItemKind::Seated {
        for seat_number in 1..=item.total_capacity {
            sqlx::query(
                r#"
                INSERT INTO seat_units (id, item_id, seat_number, status)
                VALUES ($1, $2, $3, 'available')
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(item.id)
            .bind(seat_number)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    Ok(item)
}

pub async fn list_seats(pool: &PgPool, item_id: Uuid) -> Result<Vec<SeatUnit>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SeatRow>(
        r#"
        SELECT id, item_id, seat_number, status, booking_id
        FROM seat_units
        WHERE item_id = $1
        ORDER BY seat_number
        "#,
    )
    .bind(item_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(SeatUnit::try_from).collect()
}

pub async fn list_available_seats(
    pool: &PgPool,
    item_id: Uuid,
) -> Result<Vec<SeatUnit>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SeatRow>(
        r#"
        SELECT id, item_id, seat_number, status, booking_id
        FROM seat_units
        WHERE item_id = $1 AND status = 'available'
        ORDER BY seat_number
        "#,
    )
    .bind(item_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(SeatUnit::try_from).collect()
}
