pub mod inventory;
pub mod menu;
pub mod orders;

use rust_decimal::Decimal;
use validator::ValidationError;

/// Documento JSON livre, gravado como JSONB e repassado sem alteração.
pub type Document = serde_json::Value;

pub(crate) fn empty_document() -> Document {
    Document::Object(Default::default())
}

pub(crate) fn validate_positive_decimal(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("exclusiveMin".into(), &0.0);
        err.message = Some("The value must be greater than 0.".into());
        return Err(err);
    }
    Ok(())
}
