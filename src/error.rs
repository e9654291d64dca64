//! Error types for the Aetheris core engine

use thiserror::Error;

/// Main error type for the Aetheris core engine
#[derive(Error, Debug)]
pub enum AetherisError {
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),

    #[error("Move not found: {0}")]
    MoveNotFound(String),

    #[error("Enemy not found: {0}")]
    EnemyNotFound(String),

    #[error("Dialogue node not found: {0}")]
    NodeNotFound(String),

    #[error("Choice {choice} not found on node {node}")]
    ChoiceNotFound { node: String, choice: String },

    #[error("Choice {0} is locked: {1}")]
    ChoiceLocked(String, String),

    #[error("Dialogue reroute loop starting at node {0}")]
    RerouteLoop(String),

    #[error("Battle already ended")]
    BattleOver,

    #[error("Symbol Break is not available")]
    SymbolBreakUnavailable,

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<serde_json::Error> for AetherisError {
    fn from(err: serde_json::Error) -> Self {
        AetherisError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<AetherisError> for pyo3::PyErr {
    fn from(err: AetherisError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};

        match err {
            AetherisError::MoveNotFound(_)
            | AetherisError::EnemyNotFound(_)
            | AetherisError::NodeNotFound(_)
            | AetherisError::ChoiceNotFound { .. } => PyKeyError::new_err(err.to_string()),
            AetherisError::InvalidCondition(_)
            | AetherisError::InvalidAlignment(_)
            | AetherisError::DeserializationError(_) => PyValueError::new_err(err.to_string()),
            AetherisError::ChoiceLocked(_, _)
            | AetherisError::RerouteLoop(_)
            | AetherisError::BattleOver
            | AetherisError::SymbolBreakUnavailable => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the Aetheris core engine
pub type Result<T> = std::result::Result<T, AetherisError>;
