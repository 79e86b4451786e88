//! Error types for configuration and grid construction.

use thiserror::Error;

/// Invalid or unreadable solver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for `{key}`: {value} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("inconsistent configuration: {0}")]
    Inconsistent(String),

    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while building or addressing a flood grid.
#[derive(Debug, Error)]
pub enum FloodError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("field `{field}` has {actual} values, grid has {expected} cells")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("cell ({x}, {y}) outside {nx}x{ny} grid")]
    CellOutOfRange {
        x: usize,
        y: usize,
        nx: usize,
        ny: usize,
    },

    #[error("initial condition at cell ({x}, {y}) is invalid: {reason}")]
    InvalidInitialState {
        x: usize,
        y: usize,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, FloodError>;
