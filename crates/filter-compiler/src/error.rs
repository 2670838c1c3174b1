use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Malformed filter input: {0}")]
    MalformedInput(String),

    #[error("Filter for field '{field}' must carry exactly one operator, got {count}")]
    OperatorCount { field: String, count: usize },

    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("Invalid operand for '{op}': expected {expected}, got {actual}")]
    InvalidOperand {
        op: &'static str,
        expected: &'static str,
        actual: String,
    },

    #[error("Invalid field name: {0}")]
    InvalidFieldName(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
