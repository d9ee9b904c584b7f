// src/models/menu.rs

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{empty_document, validate_positive_decimal, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "menu_item_size", rename_all = "lowercase")] // Database
#[serde(rename_all = "lowercase")] // JSON
pub enum Size {
    Small,
    Medium,
    Large,
}

// --- Linha de receita: quanto de um ingrediente uma unidade do item consome ---
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequirement {
    #[validate(range(min = 1, message = "Ingredient id must be positive."))]
    #[schema(example = 1)]
    pub ingredient_id: i32,

    #[validate(range(min = 1, message = "Required quantity must be greater than 0."))]
    #[schema(example = 2)]
    pub quantity_required: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Latte")]
    pub name: String,
    pub description: String,
    #[schema(value_type = f64, example = 3.5)]
    pub price: Decimal,
    pub category: Vec<String>,
    pub allergens: Vec<String>,
    #[schema(value_type = Object)]
    pub customization_options: Document,
    pub size: Size,
    #[schema(value_type = Object)]
    pub metadata: Document,

    // Vem de menu_item_ingredients, não é coluna de menu_items.
    #[sqlx(skip)]
    pub ingredients: Vec<IngredientRequirement>,
}

// --- Payload de criação / atualização (a atualização troca a receita inteira) ---
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    #[validate(length(min = 1, message = "Name is required."))]
    #[schema(example = "Latte")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "validate_positive_decimal"))]
    #[schema(value_type = f64, example = 3.5)]
    pub price: Decimal,

    #[serde(default)]
    pub category: Vec<String>,

    #[serde(default)]
    pub allergens: Vec<String>,

    #[serde(default = "empty_document")]
    #[schema(value_type = Object)]
    pub customization_options: Document,

    pub size: Size,

    #[serde(default = "empty_document")]
    #[schema(value_type = Object)]
    pub metadata: Document,

    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<IngredientRequirement>,
}

impl NewMenuItem {
    // Cada ingrediente aparece uma vez na receita; o par (item, ingrediente) é a chave.
    fn validate_recipe(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for requirement in &self.ingredients {
            if !seen.insert(requirement.ingredient_id) {
                let mut err = ValidationError::new("duplicate");
                err.add_param("ingredientId".into(), &requirement.ingredient_id);
                err.message = Some("Each ingredient may appear only once.".into());
                return Err(err);
            }
        }
        Ok(())
    }

    /// Regras de campo mais a regra de consistência da receita.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        self.validate_recipe().map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("ingredients", e);
            errors
        })
    }

    pub fn ingredient_ids(&self) -> Vec<i32> {
        self.ingredients.iter().map(|r| r.ingredient_id).collect()
    }
}
