// src/db/status_history_repo.rs

use sqlx::{Executor, Postgres};

use crate::{common::error::AppError, models::orders::OrderStatusHistoryEntry};

/// Log só de acréscimo das transições de status: insert e leitura, nada mais.
#[derive(Clone, Default)]
pub struct StatusHistoryRepository;

impl StatusHistoryRepository {
    pub fn new() -> Self {
        Self
    }

    /// Insere uma entrada com o relógio do banco no momento da chamada.
    pub async fn append<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        status: &str,
    ) -> Result<OrderStatusHistoryEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, OrderStatusHistoryEntry>(
            r#"
            INSERT INTO order_status_history (order_id, status)
            VALUES ($1, $2)
            RETURNING id, order_id, status, changed_at
            "#,
        )
        .bind(order_id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(entry)
    }

    /// Mais antigas primeiro; o id desempata entradas com o mesmo horário.
    pub async fn history_for<'e, E>(
        &self,
        executor: E,
        order_id: i32,
    ) -> Result<Vec<OrderStatusHistoryEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, OrderStatusHistoryEntry>(
            r#"
            SELECT id, order_id, status, changed_at
            FROM order_status_history
            WHERE order_id = $1
            ORDER BY changed_at ASC, id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;
        Ok(entries)
    }
}
