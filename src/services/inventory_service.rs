// src/services/inventory_service.rs

use std::collections::HashMap;

use sqlx::{Acquire, Executor, PgConnection, Postgres};
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, MenuRepository, RecipeRepository},
    models::{
        inventory::{InventoryItem, NewInventoryItem, StockLevel},
        menu::IngredientRequirement,
    },
};

/// Quanto tirar de uma linha do estoque para uma linha de pedido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deduction {
    pub inventory_id: i32,
    pub amount: i64,
}

/// Regra de suficiência: cada ingrediente precisa cobrir `quantity_required * order_quantity`.
/// Percorre a receita na ordem e para no primeiro ingrediente em falta.
pub fn plan_deductions(
    requirements: &[IngredientRequirement],
    stock: &[InventoryItem],
    order_quantity: i32,
) -> Result<Vec<Deduction>, AppError> {
    let by_id: HashMap<i32, &InventoryItem> = stock.iter().map(|item| (item.id, item)).collect();

    requirements
        .iter()
        .map(|requirement| {
            let item = by_id
                .get(&requirement.ingredient_id)
                .ok_or_else(|| AppError::not_found("Inventory item", requirement.ingredient_id))?;

            // i64: o produto de dois i32 nunca estoura.
            let required = i64::from(requirement.quantity_required) * i64::from(order_quantity);
            if i64::from(item.quantity) < required {
                return Err(AppError::InsufficientStock {
                    ingredient_id: item.id,
                    name: item.name.clone(),
                    required,
                    available: item.quantity,
                });
            }

            Ok(Deduction { inventory_id: item.id, amount: required })
        })
        .collect()
}

fn validate_order_quantity(order_quantity: i32) -> Result<(), AppError> {
    if order_quantity <= 0 {
        return Err(AppError::invalid_field(
            "quantity",
            "range",
            "Quantity must be greater than 0.",
        ));
    }
    Ok(())
}

/// Livro de estoque: único dono das quantidades do inventário.
#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    recipe_repo: RecipeRepository,
    menu_repo: MenuRepository,
}

impl InventoryService {
    pub fn new(
        inventory_repo: InventoryRepository,
        recipe_repo: RecipeRepository,
        menu_repo: MenuRepository,
    ) -> Self {
        Self { inventory_repo, recipe_repo, menu_repo }
    }

    // --- LEITURAS ---

    pub async fn get_all_items<'e, E>(&self, executor: E) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.inventory_repo.get_all(executor).await
    }

    pub async fn get_item<'e, E>(&self, executor: E, id: i32) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.inventory_repo
            .get_by_id(executor, id)
            .await?
            .ok_or_else(|| AppError::not_found("Inventory item", id))
    }

    // --- ESCRITAS ---

    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        item: &NewInventoryItem,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        item.validate()?;

        let created = self.inventory_repo.create(executor, item).await?;
        tracing::info!(
            "✅ Item de estoque {} criado: {} {} de {}",
            created.id, created.quantity, created.unit, created.name
        );
        Ok(created)
    }

    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        id: i32,
        item: &NewInventoryItem,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        item.validate()?;

        let updated = self
            .inventory_repo
            .update(executor, id, item)
            .await?
            .ok_or_else(|| AppError::not_found("Inventory item", id))?;
        tracing::info!("Item de estoque {} atualizado, quantidade agora {}", updated.id, updated.quantity);
        Ok(updated)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if self.inventory_repo.delete(executor, id).await? == 0 {
            return Err(AppError::not_found("Inventory item", id));
        }
        tracing::info!("Item de estoque {} removido", id);
        Ok(())
    }

    // --- SUFICIÊNCIA E DÉBITO ---

    /// Consulta só de leitura: dá para fazer `order_quantity` unidades do item agora?
    /// Não bloqueia nada, então a resposta pode mudar antes de a linha do pedido entrar.
    pub async fn has_sufficient<'e, E>(
        &self,
        executor: E,
        menu_item_id: i32,
        order_quantity: i32,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        validate_order_quantity(order_quantity)?;

        let mut conn = executor.acquire().await?;
        if !self.menu_repo.exists(&mut *conn, menu_item_id).await? {
            return Err(AppError::not_found("Menu item", menu_item_id));
        }

        match self.evaluate(&mut *conn, menu_item_id, order_quantity, false).await {
            Ok(_) => Ok(true),
            Err(AppError::InsufficientStock { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Verificação sobre um snapshot bloqueado. `conn` precisa estar dentro de uma transação:
    /// as linhas de ingredientes ficam bloqueadas até o commit ou rollback, e o plano
    /// devolvido é exatamente o que `deduct` deve aplicar.
    pub async fn check_sufficiency(
        &self,
        conn: &mut PgConnection,
        menu_item_id: i32,
        order_quantity: i32,
    ) -> Result<Vec<Deduction>, AppError> {
        validate_order_quantity(order_quantity)?;
        self.evaluate(conn, menu_item_id, order_quantity, true).await
    }

    async fn evaluate(
        &self,
        conn: &mut PgConnection,
        menu_item_id: i32,
        order_quantity: i32,
        lock_rows: bool,
    ) -> Result<Vec<Deduction>, AppError> {
        let requirements = self.recipe_repo.requirements_for(&mut *conn, menu_item_id).await?;
        if requirements.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = requirements.iter().map(|r| r.ingredient_id).collect();
        let stock = if lock_rows {
            self.inventory_repo.lock_many(&mut *conn, &ids).await?
        } else {
            self.inventory_repo.get_many(&mut *conn, &ids).await?
        };

        plan_deductions(&requirements, &stock, order_quantity)
    }

    /// Aplica o plano devolvido por `check_sufficiency` na mesma transação.
    /// A receita não é relida: só as linhas verificadas e bloqueadas são debitadas,
    /// e cada débito continua protegido para nunca deixar o estoque negativo.
    pub async fn deduct(
        &self,
        conn: &mut PgConnection,
        plan: &[Deduction],
    ) -> Result<Vec<StockLevel>, AppError> {
        let mut levels = Vec::with_capacity(plan.len());

        for deduction in plan {
            match self
                .inventory_repo
                .decrement(&mut *conn, deduction.inventory_id, deduction.amount)
                .await?
            {
                Some(level) => levels.push(level),
                None => {
                    let item = self
                        .inventory_repo
                        .get_by_id(&mut *conn, deduction.inventory_id)
                        .await?
                        .ok_or_else(|| AppError::not_found("Inventory item", deduction.inventory_id))?;
                    return Err(AppError::InsufficientStock {
                        ingredient_id: item.id,
                        name: item.name,
                        required: deduction.amount,
                        available: item.quantity,
                    });
                }
            }
        }

        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn stock(id: i32, name: &str, quantity: i32) -> InventoryItem {
        InventoryItem {
            id,
            name: name.into(),
            quantity,
            unit: "unit".into(),
            price_per_unit: dec!(1),
            last_updated: Utc::now(),
        }
    }

    fn needs(ingredient_id: i32, quantity_required: i32) -> IngredientRequirement {
        IngredientRequirement { ingredient_id, quantity_required }
    }

    #[test]
    fn milk_scenario_first_order_fits_second_does_not() {
        let recipe = [needs(1, 2)];

        let plan = plan_deductions(&recipe, &[stock(1, "Milk", 10)], 3).unwrap();
        assert_eq!(plan, vec![Deduction { inventory_id: 1, amount: 6 }]);

        // 10 - 6 = 4 restantes, o mesmo pedido agora precisa de 6.
        match plan_deductions(&recipe, &[stock(1, "Milk", 4)], 3) {
            Err(AppError::InsufficientStock { ingredient_id, name, required, available }) => {
                assert_eq!(ingredient_id, 1);
                assert_eq!(name, "Milk");
                assert_eq!(required, 6);
                assert_eq!(available, 4);
            }
            other => panic!("expected insufficient stock, got {other:?}"),
        }
    }

    #[test]
    fn exact_stock_is_sufficient() {
        let plan = plan_deductions(&[needs(1, 2)], &[stock(1, "Milk", 6)], 3).unwrap();
        assert_eq!(plan[0].amount, 6);
    }

    #[test]
    fn reports_the_first_short_ingredient_in_recipe_order() {
        let recipe = [needs(3, 1), needs(1, 5), needs(2, 5)];
        let available = [stock(1, "Milk", 1), stock(2, "Sugar", 1), stock(3, "Coffee", 100)];

        match plan_deductions(&recipe, &available, 1) {
            Err(AppError::InsufficientStock { ingredient_id, .. }) => assert_eq!(ingredient_id, 1),
            other => panic!("expected insufficient stock, got {other:?}"),
        }
    }

    #[test]
    fn plans_one_deduction_per_ingredient() {
        let recipe = [needs(1, 2), needs(2, 3)];
        let available = [stock(2, "Sugar", 50), stock(1, "Milk", 50)];

        let plan = plan_deductions(&recipe, &available, 4).unwrap();
        assert_eq!(
            plan,
            vec![
                Deduction { inventory_id: 1, amount: 8 },
                Deduction { inventory_id: 2, amount: 12 },
            ]
        );
    }

    #[test]
    fn an_empty_recipe_needs_nothing() {
        assert!(plan_deductions(&[], &[], 10).unwrap().is_empty());
    }

    #[test]
    fn missing_inventory_row_is_not_found() {
        match plan_deductions(&[needs(9, 1)], &[], 1) {
            Err(AppError::NotFound { entity, id }) => {
                assert_eq!(entity, "Inventory item");
                assert_eq!(id, 9);
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn huge_demands_do_not_overflow() {
        match plan_deductions(&[needs(1, i32::MAX)], &[stock(1, "Milk", i32::MAX)], i32::MAX) {
            Err(AppError::InsufficientStock { required, .. }) => {
                assert_eq!(required, i64::from(i32::MAX) * i64::from(i32::MAX));
            }
            other => panic!("expected insufficient stock, got {other:?}"),
        }
    }

    #[test]
    fn order_quantity_must_be_positive() {
        assert!(matches!(validate_order_quantity(0), Err(AppError::ValidationError(_))));
        assert!(validate_order_quantity(1).is_ok());
    }
}
