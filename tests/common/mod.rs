//! Shared fixtures for the database tests.

#![allow(dead_code)]

use cafe_backend::{
    config::{AppState, Config},
    models::{
        inventory::{InventoryItem, NewInventoryItem},
        menu::{IngredientRequirement, MenuItem, NewMenuItem, Size},
        orders::{NewOrder, NewOrderItem, Order},
    },
};
use rust_decimal_macros::dec;
use serde_json::json;
use sqlx::PgPool;

pub fn state(pool: PgPool) -> AppState {
    AppState::from_pool(pool, Config::test())
}

pub async fn stock(state: &AppState, name: &str, quantity: i32) -> InventoryItem {
    state
        .inventory_service
        .create_item(
            &state.db_pool,
            &NewInventoryItem {
                name: name.into(),
                quantity,
                unit: "unit".into(),
                price_per_unit: dec!(1.25),
            },
        )
        .await
        .unwrap()
}

/// `recipe` is a list of `(ingredient_id, quantity_required)`.
pub async fn menu_item(state: &AppState, name: &str, recipe: &[(i32, i32)]) -> MenuItem {
    state
        .menu_service
        .create(&state.db_pool, &new_menu_item(name, recipe))
        .await
        .unwrap()
}

pub fn new_menu_item(name: &str, recipe: &[(i32, i32)]) -> NewMenuItem {
    NewMenuItem {
        name: name.into(),
        description: String::new(),
        price: dec!(3.5),
        category: vec!["drinks".into()],
        allergens: vec![],
        customization_options: json!({}),
        size: Size::Medium,
        metadata: json!({}),
        ingredients: recipe
            .iter()
            .map(|&(ingredient_id, quantity_required)| IngredientRequirement {
                ingredient_id,
                quantity_required,
            })
            .collect(),
    }
}

pub async fn order(state: &AppState) -> Order {
    state
        .order_service
        .create_order(
            &state.db_pool,
            &NewOrder {
                customer_id: 42,
                special_instructions: json!({ "note": "no ice" }),
                total_amount: dec!(10.5),
            },
        )
        .await
        .unwrap()
}

pub fn line(order_id: i32, menu_item_id: i32, quantity: i32) -> NewOrderItem {
    NewOrderItem {
        order_id,
        menu_item_id,
        quantity,
        price_at_order_time: dec!(3.5),
        customization: json!({}),
    }
}

pub async fn quantity_of(pool: &PgPool, inventory_id: i32) -> i32 {
    sqlx::query_scalar("SELECT quantity FROM inventory WHERE id = $1")
        .bind(inventory_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
