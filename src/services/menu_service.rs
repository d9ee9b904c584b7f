// src/services/menu_service.rs

use std::collections::HashMap;

use sqlx::{Acquire, Executor, PgConnection, Postgres};

use crate::{
    common::error::AppError,
    db::{recipe_repo::RecipeLine, InventoryRepository, MenuRepository, OrderRepository, RecipeRepository},
    models::menu::{IngredientRequirement, MenuItem, NewMenuItem},
};

/// Agrupa as linhas de receita em lote por item do cardápio, mantendo a ordem da receita.
fn attach_recipes(items: &mut [MenuItem], lines: Vec<RecipeLine>) {
    let mut by_item: HashMap<i32, Vec<IngredientRequirement>> = HashMap::new();
    for line in lines {
        by_item.entry(line.menu_item_id).or_default().push(IngredientRequirement {
            ingredient_id: line.ingredient_id,
            quantity_required: line.quantity_required,
        });
    }
    for item in items.iter_mut() {
        item.ingredients = by_item.remove(&item.id).unwrap_or_default();
    }
}

#[derive(Clone)]
pub struct MenuService {
    menu_repo: MenuRepository,
    recipe_repo: RecipeRepository,
    inventory_repo: InventoryRepository,
    order_repo: OrderRepository,
}

impl MenuService {
    pub fn new(
        menu_repo: MenuRepository,
        recipe_repo: RecipeRepository,
        inventory_repo: InventoryRepository,
        order_repo: OrderRepository,
    ) -> Self {
        Self { menu_repo, recipe_repo, inventory_repo, order_repo }
    }

    // --- RECEITAS ---

    pub async fn requirements_for<'e, E>(
        &self,
        executor: E,
        menu_item_id: i32,
    ) -> Result<Vec<IngredientRequirement>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;
        if !self.menu_repo.exists(&mut *conn, menu_item_id).await? {
            return Err(AppError::not_found("Menu item", menu_item_id));
        }
        self.recipe_repo.requirements_for(&mut *conn, menu_item_id).await
    }

    // Todo ingrediente da receita já precisa existir no estoque.
    async fn ensure_ingredients_exist(
        &self,
        conn: &mut PgConnection,
        item: &NewMenuItem,
    ) -> Result<(), AppError> {
        if item.ingredients.is_empty() {
            return Ok(());
        }
        let missing = self.inventory_repo.missing_ids(conn, &item.ingredient_ids()).await?;
        match missing.first() {
            Some(&id) => Err(AppError::not_found("Inventory item", id)),
            None => Ok(()),
        }
    }

    // --- LEITURAS ---

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<MenuItem>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let mut items = self.menu_repo.get_all(&mut *conn).await?;
        let ids: Vec<i32> = items.iter().map(|item| item.id).collect();
        let lines = self.recipe_repo.requirements_for_many(&mut *conn, &ids).await?;

        attach_recipes(&mut items, lines);
        Ok(items)
    }

    pub async fn get_by_id<'e, E>(&self, executor: E, id: i32) -> Result<MenuItem, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let mut item = self
            .menu_repo
            .get_by_id(&mut *conn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Menu item", id))?;
        item.ingredients = self.recipe_repo.requirements_for(&mut *conn, id).await?;
        Ok(item)
    }

    // --- ESCRITAS ---

    pub async fn create<'e, E>(&self, executor: E, item: &NewMenuItem) -> Result<MenuItem, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // 1. Regras de campo e de receita antes de tocar no banco
        item.check()?;

        let mut tx = executor.begin().await?;

        // 2. Ingredientes referenciados
        self.ensure_ingredients_exist(&mut *tx, item).await?;

        // 3. Linha do cardápio, depois a receita
        let mut created = self.menu_repo.create(&mut *tx, item).await?;
        self.recipe_repo.replace(&mut *tx, created.id, &item.ingredients).await?;

        tx.commit().await?;

        created.ingredients = item.ingredients.clone();
        tracing::info!(
            "✅ Item do cardápio {} '{}' criado com {} ingrediente(s)",
            created.id, created.name, created.ingredients.len()
        );
        Ok(created)
    }

    /// Substitui a linha do cardápio e a receita inteira.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        item: &NewMenuItem,
    ) -> Result<MenuItem, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        item.check()?;

        let mut tx = executor.begin().await?;

        let mut updated = self
            .menu_repo
            .update(&mut *tx, id, item)
            .await?
            .ok_or_else(|| AppError::not_found("Menu item", id))?;

        self.ensure_ingredients_exist(&mut *tx, item).await?;
        self.recipe_repo.replace(&mut *tx, id, &item.ingredients).await?;

        tx.commit().await?;

        updated.ingredients = item.ingredients.clone();
        tracing::info!("Item do cardápio {} atualizado, receita substituída", id);
        Ok(updated)
    }

    /// Remove o item do cardápio junto com a receita e todas as linhas de pedido que apontam para ele.
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let removed_lines = self.order_repo.delete_items_for_menu_item(&mut *tx, id).await?;
        if removed_lines > 0 {
            tracing::warn!(
                "Remover o item do cardápio {} apaga {} linha(s) de pedido que o referenciam",
                id, removed_lines
            );
        }

        self.recipe_repo.clear(&mut *tx, id).await?;

        // Nenhuma linha removida: descartar `tx` desfaz as remoções acima.
        if self.menu_repo.delete(&mut *tx, id).await? == 0 {
            return Err(AppError::not_found("Menu item", id));
        }

        tx.commit().await?;

        tracing::info!("Item do cardápio {} removido", id);
        Ok(())
    }
}
