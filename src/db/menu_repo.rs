// src/db/menu_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::menu::{MenuItem, NewMenuItem},
};

#[derive(Clone, Default)]
pub struct MenuRepository;

impl MenuRepository {
    pub fn new() -> Self {
        Self
    }

    // As linhas voltam sem receita; o serviço preenche `ingredients`.

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<MenuItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, description, price, category, allergens,
                   customization_options, size, metadata
            FROM menu_items
            ORDER BY id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn get_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<MenuItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, description, price, category, allergens,
                   customization_options, size, metadata
            FROM menu_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM menu_items WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Confirma que o item existe e segura um `FOR SHARE` na linha até o fim da transação:
    /// updates e deletes concorrentes do item (e da receita) esperam o commit.
    pub async fn lock_for_share<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let locked = sqlx::query_scalar::<_, i32>("SELECT id FROM menu_items WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(locked.is_some())
    }

    pub async fn create<'e, E>(&self, executor: E, item: &NewMenuItem) -> Result<MenuItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, MenuItem>(
            r#"
            INSERT INTO menu_items (
                name, description, price, category, allergens,
                customization_options, size, metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, description, price, category, allergens,
                      customization_options, size, metadata
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.category)
        .bind(&item.allergens)
        .bind(&item.customization_options)
        .bind(item.size)
        .bind(&item.metadata)
        .fetch_one(executor)
        .await?;
        Ok(created)
    }

    /// Devolve `None` quando nenhuma linha tem o id.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        item: &NewMenuItem,
    ) -> Result<Option<MenuItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, MenuItem>(
            r#"
            UPDATE menu_items
            SET name = $1, description = $2, price = $3, category = $4, allergens = $5,
                customization_options = $6, size = $7, metadata = $8
            WHERE id = $9
            RETURNING id, name, description, price, category, allergens,
                      customization_options, size, metadata
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.category)
        .bind(&item.allergens)
        .bind(&item.customization_options)
        .bind(item.size)
        .bind(&item.metadata)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
