// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::validate_positive_decimal;

// --- Item de estoque (um ingrediente) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Milk")]
    pub name: String,
    #[schema(example = 10)]
    pub quantity: i32,
    #[schema(example = "L")]
    pub unit: String,
    #[schema(value_type = f64, example = 2.5)]
    pub price_per_unit: Decimal,
    pub last_updated: DateTime<Utc>,
}

// --- Payload de criação / atualização ---
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    #[validate(length(min = 1, message = "Name is required."))]
    #[schema(example = "Milk")]
    pub name: String,

    #[validate(range(min = 1, message = "Quantity must be greater than 0."))]
    #[schema(example = 10)]
    pub quantity: i32,

    #[validate(length(min = 1, message = "Unit is required."))]
    #[schema(example = "L")]
    pub unit: String,

    #[validate(custom(function = "validate_positive_decimal"))]
    #[schema(value_type = f64, example = 2.5)]
    pub price_per_unit: Decimal,
}

// --- Nível de estoque após um débito ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn milk() -> NewInventoryItem {
        NewInventoryItem {
            name: "Milk".into(),
            quantity: 10,
            unit: "L".into(),
            price_per_unit: dec!(2.5),
        }
    }

    #[test]
    fn accepts_a_complete_item() {
        assert!(milk().validate().is_ok());
    }

    #[test]
    fn rejects_each_broken_field() {
        let cases = [
            ("name", NewInventoryItem { name: String::new(), ..milk() }),
            ("quantity", NewInventoryItem { quantity: 0, ..milk() }),
            ("quantity", NewInventoryItem { quantity: -3, ..milk() }),
            ("unit", NewInventoryItem { unit: String::new(), ..milk() }),
            ("price_per_unit", NewInventoryItem { price_per_unit: Decimal::ZERO, ..milk() }),
            ("price_per_unit", NewInventoryItem { price_per_unit: dec!(-1), ..milk() }),
        ];

        for (field, item) in cases {
            let errors = item.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key(field),
                "expected an error on {field}, got {errors:?}"
            );
        }
    }

    #[test]
    fn decodes_camel_case_payloads() {
        let item: NewInventoryItem = serde_json::from_str(
            r#"{"name":"Sugar","quantity":5,"unit":"kg","pricePerUnit":1.25}"#,
        )
        .unwrap();
        assert_eq!(item.price_per_unit, dec!(1.25));
    }
}
