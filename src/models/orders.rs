// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{empty_document, inventory::StockLevel, validate_positive_decimal, Document};

/// Status inicial de todo pedido novo.
pub const STATUS_PENDING: &str = "pending";

/// Maior status que a coluna `orders.status` aceita.
pub const STATUS_MAX_LEN: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 42)]
    pub customer_id: i32,
    #[schema(example = "pending")]
    pub status: String,
    #[schema(value_type = Object)]
    pub special_instructions: Document,
    #[schema(value_type = f64, example = 7.0)]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[validate(range(min = 1, message = "Customer id is required."))]
    #[schema(example = 42)]
    pub customer_id: i32,

    #[serde(default = "empty_document")]
    #[schema(value_type = Object)]
    pub special_instructions: Document,

    #[validate(custom(function = "validate_positive_decimal"))]
    #[schema(value_type = f64, example = 7.0)]
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    #[schema(value_type = f64, example = 3.5)]
    pub price_at_order_time: Decimal,
    #[schema(value_type = Object)]
    pub customization: Document,
}

/// Linha de pedido validada, pronta para o motor de atendimento.
#[derive(Debug, Clone, Validate)]
pub struct NewOrderItem {
    #[validate(range(min = 1, message = "Order id must be positive."))]
    pub order_id: i32,

    #[validate(range(min = 1, message = "Menu item id must be positive."))]
    pub menu_item_id: i32,

    #[validate(range(min = 1, message = "Quantity must be greater than 0."))]
    pub quantity: i32,

    #[validate(custom(function = "validate_positive_decimal"))]
    pub price_at_order_time: Decimal,

    pub customization: Document,
}

/// Resultado de um `add_order_item` bem-sucedido: a linha gravada e o estoque consumido.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemReceipt {
    pub order_item: OrderItem,
    pub updated_stock: Vec<StockLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusHistoryEntry {
    pub id: i64,
    pub order_id: i32,
    #[schema(example = "completed")]
    pub status: String,
    pub changed_at: DateTime<Utc>,
}
