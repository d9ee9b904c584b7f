// src/handlers/orders.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        empty_document,
        orders::{NewOrder, NewOrderItem, Order, OrderItem, OrderItemReceipt, OrderStatusHistoryEntry},
        Document,
    },
};

// ---
// Payloads (entrada)
// ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderItemPayload {
    #[schema(example = 1)]
    pub menu_item_id: i32,
    #[schema(example = 3)]
    pub quantity: i32,
    #[schema(value_type = f64, example = 3.5)]
    pub price_at_order_time: Decimal,
    #[serde(default = "empty_document")]
    #[schema(value_type = Object)]
    pub customization: Document,
}

impl AddOrderItemPayload {
    fn into_new_item(self, order_id: i32) -> NewOrderItem {
        NewOrderItem {
            order_id,
            menu_item_id: self.menu_item_id,
            quantity: self.quantity,
            price_at_order_time: self.price_at_order_time,
            customization: self.customization,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    #[schema(example = "completed")]
    pub status: String,
}

// ---
// Pedidos
// ---

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses((status = 200, description = "All orders, newest first", body = Vec<Order>))
)]
pub async fn get_all_orders(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.get_all_orders(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(orders)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 404, description = "No such order")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.get_order(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(order)))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Order created in status 'pending'", body = Order),
        (status = 400, description = "Invalid fields")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<NewOrder>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.create_order(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated and recorded", body = Order),
        (status = 207, description = "Status updated, history entry not recorded"),
        (status = 400, description = "Empty or overlong status"),
        (status = 404, description = "No such order")
    )
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .update_order_status(&app_state.db_pool, id, &payload.status)
        .await?;
    Ok((StatusCode::OK, Json(order)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/history",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Status history, oldest first", body = Vec<OrderStatusHistoryEntry>),
        (status = 404, description = "No such order")
    )
)]
pub async fn get_order_history(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let history = app_state.order_service.history_for(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(history)))
}

// ---
// Itens do pedido
// ---

#[utoipa::path(
    get,
    path = "/api/orders/{id}/items",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Lines of the order", body = Vec<OrderItem>),
        (status = 404, description = "No such order")
    )
)]
pub async fn list_order_items(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.order_service.list_order_items(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(items)))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/items",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    request_body = AddOrderItemPayload,
    responses(
        (status = 201, description = "Line stored and ingredients deducted", body = OrderItemReceipt),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "No such order, menu item or ingredient"),
        (status = 409, description = "Not enough stock for an ingredient")
    )
)]
pub async fn add_order_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AddOrderItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = payload.into_new_item(id);
    let receipt = app_state
        .order_service
        .add_order_item(&app_state.db_pool, &item)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[utoipa::path(
    delete,
    path = "/api/order-items/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order item id")),
    responses(
        (status = 204, description = "Line deleted; stock is not restored"),
        (status = 404, description = "No such order item")
    )
)]
pub async fn delete_order_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.order_service.delete_order_item(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
