use thiserror::Error;

use crate::models::field::FieldKind;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Field {field} expects {expected} but got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: FieldKind,
        found: FieldKind,
    },

    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    #[error("Unknown store: {0}")]
    UnknownStore(String),

    #[error("Store already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Store {0} is registered with a different type")]
    StoreTypeConflict(String),

    #[error("Expected an assignment like field=value, got {0}")]
    InvalidAssignment(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Failed to (de)serialize store state: {0}")]
    Serialization(#[from] serde_json::Error),
}
