// src/handlers/menu.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::AppError,
    config::AppState,
    models::menu::{MenuItem, NewMenuItem},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Unidades do item desejadas
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub menu_item_id: i32,
    pub quantity: i32,
    pub available: bool,
}

#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "Menu",
    responses(
        (status = 200, description = "All menu items with their recipes", body = Vec<MenuItem>)
    )
)]
pub async fn get_all_menu_items(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.menu_service.get_all(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(items)))
}

#[utoipa::path(
    get,
    path = "/api/menu/{id}",
    tag = "Menu",
    params(("id" = i32, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "The menu item with its recipe", body = MenuItem),
        (status = 404, description = "No such menu item")
    )
)]
pub async fn get_menu_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.menu_service.get_by_id(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(item)))
}

#[utoipa::path(
    post,
    path = "/api/menu",
    tag = "Menu",
    request_body = NewMenuItem,
    responses(
        (status = 201, description = "Menu item created", body = MenuItem),
        (status = 400, description = "Invalid fields or recipe"),
        (status = 404, description = "A recipe ingredient is not in the inventory")
    )
)]
pub async fn create_menu_item(
    State(app_state): State<AppState>,
    Json(payload): Json<NewMenuItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.menu_service.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/menu/{id}",
    tag = "Menu",
    params(("id" = i32, Path, description = "Menu item id")),
    request_body = NewMenuItem,
    responses(
        (status = 200, description = "Menu item and recipe replaced", body = MenuItem),
        (status = 400, description = "Invalid fields or recipe"),
        (status = 404, description = "No such menu item or ingredient")
    )
)]
pub async fn update_menu_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<NewMenuItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.menu_service.update(&app_state.db_pool, id, &payload).await?;
    Ok((StatusCode::OK, Json(item)))
}

#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    tag = "Menu",
    params(("id" = i32, Path, description = "Menu item id")),
    responses(
        (status = 204, description = "Menu item, its recipe and its order lines deleted"),
        (status = 404, description = "No such menu item")
    )
)]
pub async fn delete_menu_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.menu_service.delete(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/menu/{id}/availability",
    tag = "Menu",
    params(
        ("id" = i32, Path, description = "Menu item id"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Whether the stock covers the quantity right now", body = Availability),
        (status = 400, description = "Quantity must be positive"),
        (status = 404, description = "No such menu item")
    )
)]
pub async fn check_availability(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let available = app_state
        .inventory_service
        .has_sufficient(&app_state.db_pool, id, query.quantity)
        .await?;
    Ok(Json(Availability { menu_item_id: id, quantity: query.quantity, available }))
}
