use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use farebox_core::{CreateItemRequest, InventoryItem, SeatUnit};
use farebox_store::items;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: InventoryItem,
}

#[derive(Debug, Serialize)]
pub struct SeatsResponse {
    pub item: InventoryItem,
    pub seats: Vec<SeatUnit>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSeatsResponse {
    pub available_seats: Vec<SeatUnit>,
}

/// GET /api/items
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<ItemsResponse>, AppError> {
    let items = items::list_items(&state.db.pool).await?;
    Ok(Json(ItemsResponse { items }))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    request.validate()?;
    let item = items::create_item(&state.db.pool, &request).await?;
    Ok(Json(ItemResponse { item }))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = items::get_item(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("item not found".to_string()))?;
    Ok(Json(ItemResponse { item }))
}

/// GET /api/items/{id}/seats
pub async fn list_seats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SeatsResponse>, AppError> {
    let item = items::get_item(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("item not found".to_string()))?;
    let seats = items::list_seats(&state.db.pool, id).await?;
    Ok(Json(SeatsResponse { item, seats }))
}

/// GET /api/items/{id}/seats/available
pub async fn list_available_seats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AvailableSeatsResponse>, AppError> {
    items::get_item(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("item not found".to_string()))?;
    let available_seats = items::list_available_seats(&state.db.pool, id).await?;
    Ok(Json(AvailableSeatsResponse { available_seats }))
}
