//! Slot registry
//!
//! Read-only lookup from values to their type descriptors and floor-division
//! slots. The registry owns the descriptors of the three built-in kinds for
//! one language level. Opaque values carry their own descriptors. Once built
//! the registry is never mutated, so one registry can serve any number of
//! concurrent dispatches.

use crate::builtins::builtin_descriptor;
use crate::kind::{ExactKind, LanguageLevel};
use crate::types::{FloorDivSlot, TypeRef};
use crate::value::Value;

/// Frozen table of type descriptors.
#[derive(Debug)]
pub struct SlotRegistry {
    level: LanguageLevel,
    small_int: TypeRef,
    big_int: TypeRef,
    float: TypeRef,
}

impl SlotRegistry {
    /// Registry of the built-in kinds, named for `level`
    pub fn builtin(level: LanguageLevel) -> Self {
        SlotRegistry {
            small_int: builtin_descriptor(ExactKind::SmallInt, level),
            big_int: builtin_descriptor(ExactKind::BigInt, level),
            float: builtin_descriptor(ExactKind::Float, level),
            level,
        }
    }

    /// Language level the built-in names were chosen for
    pub fn level(&self) -> LanguageLevel {
        self.level
    }

    /// Descriptor of a built-in kind
    pub fn descriptor(&self, kind: ExactKind) -> &TypeRef {
        match kind {
            ExactKind::SmallInt => &self.small_int,
            ExactKind::BigInt => &self.big_int,
            ExactKind::Float => &self.float,
        }
    }

    /// Descriptor of a value's type
    pub fn type_of<'a>(&'a self, value: &'a Value) -> &'a TypeRef {
        match value {
            Value::SmallInt(_) => &self.small_int,
            Value::BigInt(_) => &self.big_int,
            Value::Float(_) => &self.float,
            Value::Opaque(o) => o.ty(),
        }
    }

    /// Floor-division slot the modern protocol may call for `ty`.
    ///
    /// Types outside the modern protocol expose no slot here; they are only
    /// reachable through legacy coercion.
    pub fn protocol_slot<'a>(&self, ty: &'a TypeRef) -> Option<&'a FloorDivSlot> {
        if ty.is_new_style() {
            ty.floor_divide()
        } else {
            None
        }
    }
}
