// crates/geodash-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by geodash-core.
///
/// Only loading the geography asset (and parsing user-supplied config or
/// keys) can fail. Missing metrics are never an error: lookups return
/// `None` or zero instead.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid metric key: {0:?}")]
    InvalidKey(String),

    #[error("unknown {kind}: {value:?}")]
    UnknownValue { kind: &'static str, value: String },
}

impl DashError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        DashError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
