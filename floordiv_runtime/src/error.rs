//! Error types for floor division dispatch
//!
//! The engine itself only ever signals two conditions: a zero divisor and a
//! pair of operand types with no applicable implementation. Slots supplied by
//! foreign types may fail with their own error kinds; those are carried
//! verbatim in [`ArithmeticError::SlotFailure`].

use std::path::PathBuf;

use thiserror::Error;

/// Message used for every zero divisor, including the float path.
pub const ZERO_DIVISION_MESSAGE: &str = "integer division or modulo by zero";

/// Runtime error raised while computing `a // b`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// Divisor was exactly zero
    #[error("{}", ZERO_DIVISION_MESSAGE)]
    DivisionByZero,

    /// No slot or coercion produced a result
    #[error("unsupported operand type(s) for {op}: '{left}' and '{right}'")]
    UnsupportedOperandTypes {
        /// Operator symbol
        op: &'static str,
        /// Display name of the left operand's type
        left: String,
        /// Display name of the right operand's type
        right: String,
    },

    /// Hard failure raised by a slot, coercion or truth implementation
    #[error("{message}")]
    SlotFailure {
        /// Error kind name, e.g. `OverflowError`
        kind: String,
        /// Error message
        message: String,
    },
}

impl ArithmeticError {
    /// Create an unsupported operand types error for `//`
    pub fn unsupported<L: Into<String>, R: Into<String>>(left: L, right: R) -> Self {
        ArithmeticError::UnsupportedOperandTypes {
            op: "//",
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a failure raised by foreign slot code
    pub fn slot_failure<K: Into<String>, M: Into<String>>(kind: K, message: M) -> Self {
        ArithmeticError::SlotFailure {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an overflow error
    pub fn overflow<M: Into<String>>(message: M) -> Self {
        Self::slot_failure("OverflowError", message)
    }

    /// Name of the exception kind this error corresponds to.
    pub fn kind_name(&self) -> &str {
        match self {
            ArithmeticError::DivisionByZero => "ZeroDivisionError",
            ArithmeticError::UnsupportedOperandTypes { .. } => "TypeError",
            ArithmeticError::SlotFailure { kind, .. } => kind,
        }
    }

    /// Check if this is a zero divisor error
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, ArithmeticError::DivisionByZero)
    }

    /// Check if this is an unsupported operand types error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ArithmeticError::UnsupportedOperandTypes { .. })
    }
}

/// Result type alias for arithmetic operations
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Errors loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for the expected schema
    #[error("invalid engine config: {0}")]
    Parse(String),
}
