//! Item CRUD handlers.
//!
//! Each handler performs at most one repository call. The repository opens
//! and releases the storage session for that call.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{json, Value};

use shelf_core::item::{Item, ItemInput};

use crate::{handlers::AppError, state::AppState};

/// List all items (GET /items/).
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, AppError> {
    tracing::info!("Reading all items");

    let items = state
        .item_repo
        .list_items()
        .await
        .map_err(AppError::during("reading items"))?;

    Ok(Json(items))
}

/// Create a new item (POST /items/).
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let Json(input) = payload?;

    tracing::info!("Creating a new item");

    let item = state
        .item_repo
        .create_item(&input)
        .await
        .map_err(AppError::during("creating item"))?;

    tracing::debug!(item_id = item.id, "Created item");

    Ok(Json(item))
}

/// Get a single item by ID (GET /items/{item_id}).
pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>, AppError> {
    let Path(id) = path?;

    tracing::info!(item_id = id, "Reading item");

    state
        .item_repo
        .get_item(id)
        .await
        .map_err(AppError::during("reading item"))?
        .map(Json)
        .ok_or_else(|| AppError::item_not_found("reading item", id))
}

/// Replace an item's name and description (PUT /items/{item_id}).
pub async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let Path(id) = path?;
    let Json(input) = payload?;

    tracing::info!(item_id = id, "Updating item");

    let item = state
        .item_repo
        .update_item(id, &input)
        .await
        .map_err(AppError::during("updating item"))?;

    Ok(Json(item))
}

/// Delete an item by ID (DELETE /items/{item_id}).
pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let Path(id) = path?;

    tracing::info!(item_id = id, "Deleting item");

    state
        .item_repo
        .delete_item(id)
        .await
        .map_err(AppError::during("deleting item"))?;

    Ok(Json(json!({ "detail": "Item deleted" })))
}
