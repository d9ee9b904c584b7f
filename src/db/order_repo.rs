// src/db/order_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::orders::{NewOrder, NewOrderItem, Order, OrderItem, STATUS_PENDING},
};

#[derive(Clone, Default)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  PEDIDOS
    // =========================================================================

    pub async fn create_order<'e, E>(&self, executor: E, order: &NewOrder) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_id, status, special_instructions, total_amount)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, status, special_instructions, total_amount, created_at
            "#,
        )
        .bind(order.customer_id)
        .bind(STATUS_PENDING)
        .bind(&order.special_instructions)
        .bind(order.total_amount)
        .fetch_one(executor)
        .await?;
        Ok(created)
    }

    pub async fn get_all_orders<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, status, special_instructions, total_amount, created_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(orders)
    }

    pub async fn get_order<'e, E>(&self, executor: E, id: i32) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, status, special_instructions, total_amount, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(order)
    }

    pub async fn order_exists<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM orders WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    /// Devolve `None` quando o pedido não existe.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: i32,
        status: &str,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $1
            WHERE id = $2
            RETURNING id, customer_id, status, special_instructions, total_amount, created_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(order)
    }

    // =========================================================================
    //  ITENS DO PEDIDO
    // =========================================================================

    pub async fn insert_order_item<'e, E>(
        &self,
        executor: E,
        item: &NewOrderItem,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, menu_item_id, quantity, price_at_order_time, customization)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, order_id, menu_item_id, quantity, price_at_order_time, customization
            "#,
        )
        .bind(item.order_id)
        .bind(item.menu_item_id)
        .bind(item.quantity)
        .bind(item.price_at_order_time)
        .bind(&item.customization)
        .fetch_one(executor)
        .await?;
        Ok(created)
    }

    pub async fn list_order_items<'e, E>(
        &self,
        executor: E,
        order_id: i32,
    ) -> Result<Vec<OrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, menu_item_id, quantity, price_at_order_time, customization
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn delete_order_item<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Remove todas as linhas de pedido que apontam para um item do cardápio.
    pub async fn delete_items_for_menu_item<'e, E>(
        &self,
        executor: E,
        menu_item_id: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM order_items WHERE menu_item_id = $1")
            .bind(menu_item_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
