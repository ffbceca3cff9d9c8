//! The floor division engine.
//!
//! [`FloorDivEngine`] pairs an [`EngineConfig`] with a frozen [`SlotRegistry`]
//! and exposes the entry points. The work is split across modules:
//!
//! - this module: entry point selection and statically known kind pairs
//! - `dispatch`: the generic slot protocol
//! - `projection`: value and truth result shapes

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{ArithmeticError, ArithmeticResult};
use crate::fast_path::{big_int_floor_div, float_floor_div, small_int_floor_div};
use crate::kind::ExactKind;
use crate::operand::Operand;
use crate::registry::SlotRegistry;
use crate::types::{SlotOutcome, TypeDescriptor};
use crate::value::Value;

/// Floor division dispatcher.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct FloorDivEngine {
    pub(crate) config: EngineConfig,
    pub(crate) registry: Arc<SlotRegistry>,
}

impl Default for FloorDivEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl FloorDivEngine {
    /// Engine with the built-in registry for the configured language level
    pub fn new(config: EngineConfig) -> Self {
        let registry = Arc::new(SlotRegistry::builtin(config.language_level));
        FloorDivEngine { config, registry }
    }

    /// Engine over a pre-built registry
    pub fn with_registry(config: EngineConfig, registry: Arc<SlotRegistry>) -> Self {
        if registry.level() != config.language_level {
            tracing::debug!(
                registry = ?registry.level(),
                config = ?config.language_level,
                "registry language level differs from config; type names follow the registry"
            );
        }
        FloorDivEngine { config, registry }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The registry used for slot lookup
    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    /// Display name of a value's type
    pub fn type_name<'a>(&'a self, value: &'a Value) -> &'a str {
        self.registry.type_of(value).name()
    }

    /// Compute `a // b`.
    ///
    /// When both operand kinds are known statically this compiles down to the
    /// exact-pair fast path. When one is known and the other turns out to be
    /// the same kind at runtime, the fast path is used as well. Everything
    /// else goes through the generic slot protocol.
    pub fn floor_divide_value<L, R>(&self, a: &L, b: &R) -> ArithmeticResult<Value>
    where
        L: Operand + ?Sized,
        R: Operand + ?Sized,
    {
        let a = a.as_value();
        let b = b.as_value();
        match (L::KIND, R::KIND) {
            (Some(_), Some(_)) => self.floor_divide_exact(&a, &b),
            (Some(known), None) if b.exact_kind() == Some(known) => {
                self.floor_divide_exact(&a, &b)
            }
            (None, Some(known)) if a.exact_kind() == Some(known) => {
                self.floor_divide_exact(&a, &b)
            }
            _ => self.floor_divide_generic(&a, &b),
        }
    }

    /// `a // b` for two values whose tags name their exact kinds.
    ///
    /// Opaque operands are routed to the generic protocol.
    pub(crate) fn floor_divide_exact(&self, a: &Value, b: &Value) -> ArithmeticResult<Value> {
        match (a, b) {
            (Value::SmallInt(x), Value::SmallInt(y)) => small_int_floor_div(*x, *y),
            (Value::BigInt(x), Value::BigInt(y)) => big_int_floor_div(x, y),
            (Value::Float(x), Value::Float(y)) => float_floor_div(*x, *y).map(Value::Float),
            _ => match (a.exact_kind(), b.exact_kind()) {
                (Some(k1), Some(k2)) => self.floor_divide_mixed_exact(k1, k2, a, b),
                _ => self.floor_divide_generic(a, b),
            },
        }
    }

    /// Two different built-in kinds.
    ///
    /// Neither kind derives from the other and both take part in the modern
    /// protocol, so there is no subtype ordering and no coercion to try.
    fn floor_divide_mixed_exact(
        &self,
        k1: ExactKind,
        k2: ExactKind,
        a: &Value,
        b: &Value,
    ) -> ArithmeticResult<Value> {
        let type1 = self.registry.descriptor(k1);
        let type2 = self.registry.descriptor(k2);

        if !self.config.implicit_promotion {
            return Err(self.unsupported(type1, type2));
        }

        for slot in [type1.floor_divide(), type2.floor_divide()].into_iter().flatten() {
            if let SlotOutcome::Produced(v) = slot.call(a, b)? {
                return Ok(v);
            }
        }

        Err(self.unsupported(type1, type2))
    }

    pub(crate) fn unsupported(
        &self,
        type1: &TypeDescriptor,
        type2: &TypeDescriptor,
    ) -> ArithmeticError {
        tracing::debug!(
            left = type1.name(),
            right = type2.name(),
            "no floor division implementation for operand types"
        );
        ArithmeticError::unsupported(type1.name(), type2.name())
    }
}
