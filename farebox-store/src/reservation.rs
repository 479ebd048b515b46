use chrono::Utc;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::info;
use uuid::Uuid;

use farebox_core::{BookingMode, BookingRequest, ItemKind};

/// Rejections and failures of the reservation transaction. Everything here
/// leaves the ledger untouched: early returns drop the transaction, which
/// rolls it back.
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("item not found")]
    ItemNotFound,
    #[error("seat {0} not found")]
    SeatNotFound(i32),
    #[error("seat {seat} already booked")]
    SeatAlreadyBooked { seat: i32, remaining: i32 },
    #[error("not enough capacity left: requested {requested}, remaining {remaining}")]
    InsufficientCapacity { requested: i32, remaining: i32 },
    #[error("this item is booked by seat selection")]
    SeatSelectionRequired,
    #[error("this item is booked by ticket quantity")]
    QuantityRequired,
    #[error("failed to commit booking transaction")]
    CommitFailed(#[source] sqlx::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result of a committed reservation. `remaining` is the authoritative
/// figure for the response: remaining before the decrement minus the
/// claimed quantity, computed rather than re-queried.
#[derive(Debug)]
pub struct ReservationOutcome {
    pub booking_ids: Vec<Uuid>,
    pub seat_numbers: Vec<i32>,
    pub quantity: i32,
    pub remaining: i32,
    pub item_name: String,
}

struct LockedItem {
    id: Uuid,
    name: String,
    kind: ItemKind,
    remaining: i32,
}

/// The all-or-nothing booking sequence: lock the item row, re-check
/// capacity under the lock, claim seats (seat mode), insert booking rows,
/// decrement remaining, commit. Concurrent reservations against the same
/// item serialize on the `FOR UPDATE` read; two requests can never both
/// pass the capacity check when only one should.
pub async fn reserve(
    pool: &PgPool,
    item_id: Uuid,
    request: &BookingRequest,
    mode: &BookingMode,
) -> Result<ReservationOutcome, ReservationError> {
    let mut tx = pool.begin().await?;

    // 1. Resolve and lock the item row
    let item = lock_item(&mut tx, item_id)
        .await?
        .ok_or(ReservationError::ItemNotFound)?;

    match (item.kind, mode) {
        (ItemKind::Seated, BookingMode::Tickets(_)) => {
            return Err(ReservationError::SeatSelectionRequired);
        }
        (ItemKind::Ticketed, BookingMode::Seats(_)) => {
            return Err(ReservationError::QuantityRequired);
        }
        _ => {}
    }

    // 2. Re-check capacity under the lock
    let quantity = mode.quantity();
    if quantity > item.remaining {
        return Err(ReservationError::InsufficientCapacity {
            requested: quantity,
            remaining: item.remaining,
        });
    }

    // 3. Claim inventory units and persist booking rows
    let mut booking_ids = Vec::new();
    let mut seat_numbers = Vec::new();
    match mode {
        BookingMode::Seats(seats) => {
            for &seat_number in seats {
                let booking_id =
                    insert_booking(&mut tx, &item, request, 1, Some(seat_number)).await?;
                claim_seat(&mut tx, &item, seat_number, booking_id).await?;
                booking_ids.push(booking_id);
                seat_numbers.push(seat_number);
            }
        }
        BookingMode::Tickets(quantity) => {
            let booking_id = insert_booking(&mut tx, &item, request, *quantity, None).await?;
            booking_ids.push(booking_id);
        }
    }

    // 4. Decrement the ledger by the total claimed quantity
    sqlx::query("UPDATE items SET remaining = remaining - $1 WHERE id = $2")
        .bind(quantity)
        .bind(item.id)
        .execute(&mut *tx)
        .await?;

    // 5. Commit; the engine guarantees no partial rows on failure
    tx.commit().await.map_err(ReservationError::CommitFailed)?;

    info!(
        item = %item.name,
        quantity,
        email = %request.email,
        "booking committed"
    );

    Ok(ReservationOutcome {
        booking_ids,
        seat_numbers,
        quantity,
        remaining: item.remaining - quantity,
        item_name: item.name,
    })
}

async fn lock_item(
    tx: &mut Transaction<'_, Postgres>,
    item_id: Uuid,
) -> Result<Option<LockedItem>, ReservationError> {
    let row = sqlx::query(
        "SELECT id, name, kind, remaining FROM items WHERE id = $1 FOR UPDATE",
    )
    .bind(item_id)
    .fetch_optional(&mut **tx)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let kind: String = row.get("kind");
    let kind: ItemKind = kind
        .parse()
        .map_err(|e: farebox_core::inventory::ParseItemKindError| {
            ReservationError::Database(sqlx::Error::Decode(Box::new(e)))
        })?;

    Ok(Some(LockedItem {
        id: row.get("id"),
        name: row.get("name"),
        kind,
        remaining: row.get("remaining"),
    }))
}

/// Locks one seat row and transitions it to booked. Any failure aborts the
/// whole reservation: a multi-seat request claims all seats or none.
async fn claim_seat(
    tx: &mut Transaction<'_, Postgres>,
    item: &LockedItem,
    seat_number: i32,
    booking_id: Uuid,
) -> Result<(), ReservationError> {
    let row = sqlx::query(
        r#"
        SELECT id, status FROM seat_units
        WHERE item_id = $1 AND seat_number = $2
        FOR UPDATE
        "#,
    )
    .bind(item.id)
    .bind(seat_number)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(ReservationError::SeatNotFound(seat_number))?;

    let status: String = row.get("status");
    if status != "available" {
        return Err(ReservationError::SeatAlreadyBooked {
            seat: seat_number,
            remaining: item.remaining,
        });
    }

    let seat_id: Uuid = row.get("id");
    sqlx::query("UPDATE seat_units SET status = 'booked', booking_id = $1 WHERE id = $2")
        .bind(booking_id)
        .bind(seat_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

async fn insert_booking(
    tx: &mut Transaction<'_, Postgres>,
    item: &LockedItem,
    request: &BookingRequest,
    quantity: i32,
    seat_number: Option<i32>,
) -> Result<Uuid, ReservationError> {
    let booking_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO bookings (id, item_id, item_name, first_name, last_name, email, quantity, seat_number, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(booking_id)
    .bind(item.id)
    .bind(&item.name)
    .bind(&request.first_name)
    .bind(&request.last_name)
    .bind(&request.email)
    .bind(quantity)
    .bind(seat_number)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(booking_id)
}
