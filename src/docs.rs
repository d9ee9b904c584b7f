// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- ESTOQUE ---
        handlers::inventory::get_all_items,
        handlers::inventory::get_item,
        handlers::inventory::create_item,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,

        // --- CARDÁPIO ---
        handlers::menu::get_all_menu_items,
        handlers::menu::get_menu_item,
        handlers::menu::create_menu_item,
        handlers::menu::update_menu_item,
        handlers::menu::delete_menu_item,
        handlers::menu::check_availability,

        // --- PEDIDOS ---
        handlers::orders::get_all_orders,
        handlers::orders::get_order,
        handlers::orders::create_order,
        handlers::orders::update_order_status,
        handlers::orders::get_order_history,
        handlers::orders::list_order_items,
        handlers::orders::add_order_item,
        handlers::orders::delete_order_item,
    ),
    components(
        schemas(
            models::inventory::InventoryItem,
            models::inventory::NewInventoryItem,
            models::inventory::StockLevel,
            models::menu::Size,
            models::menu::IngredientRequirement,
            models::menu::MenuItem,
            models::menu::NewMenuItem,
            models::orders::Order,
            models::orders::NewOrder,
            models::orders::OrderItem,
            models::orders::OrderItemReceipt,
            models::orders::OrderStatusHistoryEntry,
            handlers::menu::Availability,
            handlers::orders::AddOrderItemPayload,
            handlers::orders::UpdateStatusPayload,
        )
    ),
    tags(
        (name = "Inventory", description = "Ingredient stock"),
        (name = "Menu", description = "Menu items and their recipes"),
        (name = "Orders", description = "Orders, order lines and status history"),
    )
)]
pub struct ApiDoc;
