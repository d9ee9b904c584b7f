// src/handlers/inventory.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::inventory::{InventoryItem, NewInventoryItem},
};

#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    responses(
        (status = 200, description = "All inventory items, by id", body = Vec<InventoryItem>)
    )
)]
pub async fn get_all_items(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.get_all_items(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(items)))
}

#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = i32, Path, description = "Inventory item id")),
    responses(
        (status = 200, description = "The inventory item", body = InventoryItem),
        (status = 404, description = "No such item")
    )
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.inventory_service.get_item(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(item)))
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = NewInventoryItem,
    responses(
        (status = 201, description = "Inventory item created", body = InventoryItem),
        (status = 400, description = "Invalid fields")
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    Json(payload): Json<NewInventoryItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .inventory_service
        .create_item(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = i32, Path, description = "Inventory item id")),
    request_body = NewInventoryItem,
    responses(
        (status = 200, description = "Inventory item updated", body = InventoryItem),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "No such item")
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<NewInventoryItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .inventory_service
        .update_item(&app_state.db_pool, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(item)))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = i32, Path, description = "Inventory item id")),
    responses(
        (status = 204, description = "Inventory item deleted"),
        (status = 404, description = "No such item"),
        (status = 409, description = "A recipe still uses this item")
    )
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_item(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
