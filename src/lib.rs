// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    routing::{delete, get, put},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc};

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router(app_state: AppState) -> Router {
    let inventory_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::get_all_items).post(handlers::inventory::create_item),
        )
        .route(
            "/{id}",
            get(handlers::inventory::get_item)
                .put(handlers::inventory::update_item)
                .delete(handlers::inventory::delete_item),
        );

    let menu_routes = Router::new()
        .route(
            "/",
            get(handlers::menu::get_all_menu_items).post(handlers::menu::create_menu_item),
        )
        .route(
            "/{id}",
            get(handlers::menu::get_menu_item)
                .put(handlers::menu::update_menu_item)
                .delete(handlers::menu::delete_menu_item),
        )
        .route("/{id}/availability", get(handlers::menu::check_availability));

    let order_routes = Router::new()
        .route(
            "/",
            get(handlers::orders::get_all_orders).post(handlers::orders::create_order),
        )
        .route("/{id}", get(handlers::orders::get_order))
        .route("/{id}/status", put(handlers::orders::update_order_status))
        .route("/{id}/history", get(handlers::orders::get_order_history))
        .route(
            "/{id}/items",
            get(handlers::orders::list_order_items).post(handlers::orders::add_order_item),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(openapi_json))
        .nest("/api/inventory", inventory_routes)
        .nest("/api/menu", menu_routes)
        .nest("/api/orders", order_routes)
        .route("/api/order-items/{id}", delete(handlers::orders::delete_order_item))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
