// src/db/recipe_repo.rs

use sqlx::{Executor, FromRow, PgConnection, Postgres};

use crate::{common::error::AppError, models::menu::IngredientRequirement};

/// Uma linha de receita marcada com o item do cardápio a que pertence.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeLine {
    pub menu_item_id: i32,
    pub ingredient_id: i32,
    pub quantity_required: i32,
}

#[derive(Clone, Default)]
pub struct RecipeRepository;

impl RecipeRepository {
    pub fn new() -> Self {
        Self
    }

    /// Ingredientes de um item, na ordem em que foram declarados.
    pub async fn requirements_for<'e, E>(
        &self,
        executor: E,
        menu_item_id: i32,
    ) -> Result<Vec<IngredientRequirement>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let requirements = sqlx::query_as::<_, IngredientRequirement>(
            r#"
            SELECT ingredient_id, quantity_required
            FROM menu_item_ingredients
            WHERE menu_item_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(menu_item_id)
        .fetch_all(executor)
        .await?;
        Ok(requirements)
    }

    /// Ingredientes de vários itens numa ida só ao banco.
    pub async fn requirements_for_many<'e, E>(
        &self,
        executor: E,
        menu_item_ids: &[i32],
    ) -> Result<Vec<RecipeLine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lines = sqlx::query_as::<_, RecipeLine>(
            r#"
            SELECT menu_item_id, ingredient_id, quantity_required
            FROM menu_item_ingredients
            WHERE menu_item_id = ANY($1)
            ORDER BY menu_item_id ASC, position ASC
            "#,
        )
        .bind(menu_item_ids)
        .fetch_all(executor)
        .await?;
        Ok(lines)
    }

    pub async fn clear<'e, E>(&self, executor: E, menu_item_id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM menu_item_ingredients WHERE menu_item_id = $1")
            .bind(menu_item_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Troca completa: todas as linhas antigas saem antes de o novo conjunto entrar.
    /// Rode dentro de uma transação para ninguém ver uma receita pela metade.
    pub async fn replace(
        &self,
        conn: &mut PgConnection,
        menu_item_id: i32,
        requirements: &[IngredientRequirement],
    ) -> Result<(), AppError> {
        self.clear(&mut *conn, menu_item_id).await?;

        for (position, requirement) in requirements.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO menu_item_ingredients (menu_item_id, ingredient_id, quantity_required, position)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(menu_item_id)
            .bind(requirement.ingredient_id)
            .bind(requirement.quantity_required)
            .bind(position as i32)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
