use thiserror::Error;
use tracing::{debug, error};

/// Failures of the numeric coercion and arithmetic layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("Arithmetic overflow: {digits} significant digits exceed precision {precision}")]
    ArithmeticOverflow { digits: u32, precision: u32 },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operand encoding: {0}")]
    InvalidOperandEncoding(String),

    #[error("Value not representable as an exact number: {0}")]
    NotRepresentable(String),

    #[error("Incompatible operands: {0}")]
    IncompatibleOperands(String),

    #[error("Decimal scale out of range")]
    ScaleOutOfRange,
}

/// Failures of the order-statistic and numeric aggregation protocol.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Corrupt partial state: {0}")]
    CorruptPartialState(String),

    #[error("Aggregator already finalized")]
    Finalized,

    #[error("Invalid offset: {0}")]
    InvalidOffset(i32),

    #[error("Aggregator mode mismatch: {0}")]
    ModeMismatch(String),

    #[error("Numeric aggregation failed: {0}")]
    Numeric(#[from] NumericError),
}

/// Failures of built-in function resolution and evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("{name} expects {expected} arguments, got {got}")]
    ArgumentCount {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("{name} argument {position} has an unsupported type: {detail}")]
    ArgumentType {
        name: String,
        position: usize,
        detail: String,
    },

    #[error("Unknown timezone or unit: {0}")]
    UnknownTimezoneOrUnit(String),

    #[error("Invalid operand encoding: {0}")]
    InvalidOperandEncoding(String),

    #[error("{0}")]
    Numeric(#[from] NumericError),

    #[error("{0}")]
    Aggregate(#[from] AggregateError),
}

/// Top-level error surfaced to the query layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Numeric error: {0}")]
    Numeric(#[from] NumericError),

    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("Function error: {0}")]
    Function(#[from] FunctionError),
}

impl EngineError {
    pub fn log_error(&self) {
        match self {
            EngineError::Numeric(e) => {
                error!("Numeric evaluation failed: {}", e);
                debug!("Numeric error details: {:?}", e);
            }
            EngineError::Aggregate(e) => {
                error!("Aggregation failed: {}", e);
                debug!("Aggregation error details: {:?}", e);
            }
            EngineError::Function(e) => {
                error!("Function evaluation failed: {}", e);
                debug!("Function error details: {:?}", e);
            }
        }
    }
}
