use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use farebox_core::{Booking, BookingRequest};
use farebox_store::{bookings, items, reservation};

use crate::error::AppError;
use crate::notifier::TicketNotification;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub message: String,
    pub remaining: i32,
    pub booking_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub seat_numbers: Vec<i32>,
}

/// POST /api/items/{id}/book
pub async fn book_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookResponse>, AppError> {
    // 1. Validate request shape before touching the ledger
    let mode = request.validate()?;

    // 2. Run the reservation transaction
    let outcome = reservation::reserve(&state.db.pool, id, &request, &mode).await?;

    // 3. Fire-and-forget the ticket send; the response does not wait on it
    state.notifier.dispatch(TicketNotification {
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        email: request.email.clone(),
        item_name: outcome.item_name.clone(),
        quantity: outcome.quantity,
        seat_numbers: outcome.seat_numbers.clone(),
    });

    Ok(Json(BookResponse {
        message: "Booking successful!".to_string(),
        remaining: outcome.remaining,
        booking_ids: outcome.booking_ids,
        seat_numbers: outcome.seat_numbers,
    }))
}

/// GET /api/items/{id}/bookings
pub async fn list_item_bookings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingsResponse>, AppError> {
    items::get_item(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("item not found".to_string()))?;
    let bookings = bookings::list_for_item(&state.db.pool, id).await?;
    Ok(Json(BookingsResponse { bookings }))
}

/// GET /api/bookings
pub async fn list_all_bookings(
    State(state): State<AppState>,
) -> Result<Json<BookingsResponse>, AppError> {
    let bookings = bookings::list_all(&state.db.pool).await?;
    Ok(Json(BookingsResponse { bookings }))
}
