//! Error types for the ferrocord domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

use crate::value::ValueKind;

/// The top-level error type for all ferrocord operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Container errors ---
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    // --- Entity errors ---
    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    // --- State errors ---
    #[error("State error: {0}")]
    State(#[from] StateError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures reported by the `List`/`Map` container engine.
///
/// Every container operation leaves the container in its last well-defined
/// state when one of these is returned.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("stored kind is {actual}, requested {expected}")]
    TypeMismatch { expected: ValueKind, actual: ValueKind },

    #[error("requested capacity {requested} below minimum {minimum}")]
    SizeConstraintViolation { requested: usize, minimum: usize },

    #[error("backing storage allocation failed: {0}")]
    AllocationFailure(String),

    #[error("{0} values cannot be used as map keys")]
    InvalidKey(ValueKind),
}

impl From<std::collections::TryReserveError> for ContainerError {
    fn from(err: std::collections::TryReserveError) -> Self {
        Self::AllocationFailure(err.to_string())
    }
}

/// Failures while constructing a domain entity from a wire payload.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("failed to construct {entity}: {source}")]
    ConstructorFailure {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{entity} payload is missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("`{0}` is not a valid snowflake")]
    InvalidSnowflake(String),
}

/// Failures at the state/cache layer.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("validation failed: {0}")]
    ValidationFailure(String),

    #[error("a bot token is required")]
    MissingToken,

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Entity(#[from] EntityError),
}
