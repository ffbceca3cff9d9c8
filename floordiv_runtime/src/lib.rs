//! Floor division runtime for a dynamic numeric tower
//!
//! This crate implements the `//` operator over machine integers, arbitrary
//! precision integers, floats and user-defined numeric types. It includes:
//!
//! - `Value` enum for dynamically typed operands
//! - Exact-pair fast paths with floor semantics
//! - The generic slot protocol (subtype precedence, legacy coercion)
//! - `SlotRegistry` of type descriptors and their operator slots
//! - Value and truth result shapes
//! - `EngineConfig` loaded from TOML

mod builtins;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod fast_path;
pub mod kind;
pub mod operand;
pub mod projection;
pub mod registry;
pub mod types;
pub mod value;

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use floordiv_runtime::prelude::*;
///
/// let engine = FloorDivEngine::default();
/// assert_eq!(engine.floor_divide_value(&-7i64, &2i64), Ok(Value::SmallInt(-4)));
/// ```
pub mod prelude {
    pub use super::config::EngineConfig;
    pub use super::engine::FloorDivEngine;
    pub use super::error::{ArithmeticError, ArithmeticResult, ConfigError};
    pub use super::kind::{ExactKind, LanguageLevel};
    pub use super::operand::Operand;
    pub use super::projection::{ResultShape, Shaped, Truth};
    pub use super::registry::SlotRegistry;
    pub use super::types::{CoerceOutcome, SlotOutcome, TypeBuilder, TypeDescriptor, TypeRef};
    pub use super::value::{OpaqueValue, Value};
}

pub use prelude::*;
