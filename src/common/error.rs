// src/common/error.rs

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(
        "Insufficient stock for ingredient {ingredient_id} ({name}): required {required}, available {available}"
    )]
    InsufficientStock {
        ingredient_id: i32,
        name: String,
        required: i64,
        available: i32,
    },

    #[error("{entity} {id} is still referenced and cannot be deleted")]
    InUse { entity: &'static str, id: i64 },

    // O efeito principal foi confirmado; só o secundário falhou.
    #[error("{committed}, but {failed}")]
    PartialCommit { committed: String, failed: String },

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        AppError::NotFound { entity, id: id.into() }
    }

    /// Monta um `ValidationError` de um campo só, para regras que o derive não expressa.
    pub fn invalid_field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        let mut errors = ValidationErrors::new();
        errors.add(field, err);
        AppError::ValidationError(errors)
    }
}

/// Achata os erros aninhados do validator em chaves `campo` / `lista[0].campo`.
fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                out.insert(path, messages);
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = BTreeMap::new();
                collect_messages("", &errors, &mut details);
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InsufficientStock { ingredient_id, ref name, required, available } => {
                let body = Json(json!({
                    "error": self.to_string(),
                    "ingredientId": ingredient_id,
                    "ingredientName": name,
                    "required": required,
                    "available": available,
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::PartialCommit { ref committed, ref failed } => {
                tracing::warn!("⚠️ Commit parcial: {}", self);
                let body = Json(json!({
                    "warning": format!("{committed}, but {failed}"),
                    "committed": committed,
                    "failed": failed,
                }));
                return (StatusCode::MULTI_STATUS, body).into_response();
            }
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InUse { .. } => (StatusCode::CONFLICT, self.to_string()),

            // Erros de banco e inesperados viram 500; os detalhes ficam só no log.
            e @ (AppError::DatabaseError(_) | AppError::InternalServerError(_)) => {
                tracing::error!("🔥 Erro interno do servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::not_found("Order", 7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn insufficient_stock_maps_to_conflict() {
        let err = AppError::InsufficientStock {
            ingredient_id: 1,
            name: "Milk".into(),
            required: 6,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for ingredient 1 (Milk): required 6, available 4"
        );
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn partial_commit_is_not_a_hard_failure() {
        let err = AppError::PartialCommit {
            committed: "status of order 3 updated to 'ready'".into(),
            failed: "the status history entry could not be recorded".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::MULTI_STATUS);
    }

    #[test]
    fn storage_failures_do_not_leak_details() {
        let response = AppError::DatabaseError(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_field_produces_validation_error() {
        match AppError::invalid_field("status", "required", "Status is required.") {
            AppError::ValidationError(errors) => {
                assert!(errors.field_errors().contains_key("status"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[derive(Validate)]
    struct Line {
        #[validate(range(min = 1, message = "must be positive"))]
        quantity_required: i32,
    }

    #[derive(Validate)]
    struct Recipe {
        #[validate(nested)]
        ingredients: Vec<Line>,
    }

    #[test]
    fn nested_messages_are_flattened() {
        let recipe = Recipe { ingredients: vec![Line { quantity_required: 0 }] };
        let errors = recipe.validate().unwrap_err();

        let mut out = BTreeMap::new();
        collect_messages("", &errors, &mut out);
        assert_eq!(
            out.get("ingredients[0].quantity_required"),
            Some(&vec!["must be positive".to_string()])
        );
    }
}
