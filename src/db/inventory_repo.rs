// src/db/inventory_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::inventory::{InventoryItem, NewInventoryItem, StockLevel},
};

#[derive(Clone, Default)]
pub struct InventoryRepository;

impl InventoryRepository {
    pub fn new() -> Self {
        Self
    }

    // ---
    // Leituras
    // ---

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT id, name, quantity, unit, price_per_unit, last_updated FROM inventory ORDER BY id ASC"
        )
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn get_by_id<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(
            "SELECT id, name, quantity, unit, price_per_unit, last_updated FROM inventory WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    /// Lê as linhas pedidas sem bloquear.
    pub async fn get_many<'e, E>(
        &self,
        executor: E,
        ids: &[i32],
    ) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT id, name, quantity, unit, price_per_unit, last_updated FROM inventory WHERE id = ANY($1) ORDER BY id ASC"
        )
        .bind(ids)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    /// Lê e bloqueia as linhas pedidas até o fim da transação.
    /// O bloqueio segue a ordem do id, então chamadas concorrentes não entram em deadlock.
    pub async fn lock_many<'e, E>(
        &self,
        executor: E,
        ids: &[i32],
    ) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT id, name, quantity, unit, price_per_unit, last_updated FROM inventory WHERE id = ANY($1) ORDER BY id ASC FOR UPDATE"
        )
        .bind(ids)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    /// Ids de `ids` que não têm linha no estoque.
    pub async fn missing_ids<'e, E>(&self, executor: E, ids: &[i32]) -> Result<Vec<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let missing = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT wanted.id
            FROM UNNEST($1::int4[]) WITH ORDINALITY AS wanted(id, ord)
            LEFT JOIN inventory ON inventory.id = wanted.id
            WHERE inventory.id IS NULL
            ORDER BY wanted.ord
            "#,
        )
        .bind(ids)
        .fetch_all(executor)
        .await?;
        Ok(missing)
    }

    // ---
    // Escritas
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        item: &NewInventoryItem,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory (name, quantity, unit, price_per_unit)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, quantity, unit, price_per_unit, last_updated
            "#
        )
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.price_per_unit)
        .fetch_one(executor)
        .await?;
        Ok(created)
    }

    /// Devolve `None` quando nenhuma linha tem o id.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        item: &NewInventoryItem,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory
            SET name = $1, quantity = $2, unit = $3, price_per_unit = $4, last_updated = NOW()
            WHERE id = $5
            RETURNING id, name, quantity, unit, price_per_unit, last_updated
            "#
        )
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.price_per_unit)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(updated)
    }

    /// Devolve o número de linhas removidas.
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::InUse { entity: "Inventory item", id: id.into() };
                    }
                }
                e.into()
            })?;
        Ok(result.rows_affected())
    }

    /// Subtrai `amount` de uma linha sem nunca passar de zero.
    /// Devolve `None` se a linha não existe ou tem menos que `amount`.
    pub async fn decrement<'e, E>(
        &self,
        executor: E,
        id: i32,
        amount: i64,
    ) -> Result<Option<StockLevel>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let level = sqlx::query_as::<_, StockLevel>(
            r#"
            UPDATE inventory
            SET quantity = quantity - $2, last_updated = NOW()
            WHERE id = $1 AND quantity >= $2
            RETURNING id, name, quantity, unit
            "#,
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(executor)
        .await?;
        Ok(level)
    }
}
