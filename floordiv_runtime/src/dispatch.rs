//! Generic floor division dispatch
//!
//! Resolves `a // b` for operands whose kinds were not known ahead of time:
//!
//! 1. Look up the floor-division slot of each operand's type. Types outside
//!    the modern protocol contribute no slot, and the right slot is dropped
//!    when both types are the same or share the implementation.
//! 2. If the right type is a proper subtype of the left one, its slot runs
//!    first.
//! 3. Left slot, then right slot. The first produced value wins; a failing
//!    slot ends the search.
//! 4. When enabled and one of the types is a legacy type, try each type's
//!    coercion primitive and the slot of the coerced pair.
//! 5. Otherwise the operand types are unsupported.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::sync::Arc;

use crate::engine::FloorDivEngine;
use crate::error::ArithmeticResult;
use crate::fast_path::small_int_floor_div;
use crate::types::{CoerceOutcome, SlotOutcome, TypeRef};
use crate::value::Value;

/// Which side of the expression a coercion attempt starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoerceSide {
    Left,
    Right,
}

impl FloorDivEngine {
    /// Run the full slot protocol for `a // b`.
    pub fn floor_divide_generic(&self, a: &Value, b: &Value) -> ArithmeticResult<Value> {
        // Exact machine integers need no lookup
        if let (Value::SmallInt(x), Value::SmallInt(y)) = (a, b) {
            return small_int_floor_div(*x, *y);
        }

        let type1 = self.registry.type_of(a);
        let type2 = self.registry.type_of(b);

        let slot1 = self.registry.protocol_slot(type1);
        let mut slot2 = if Arc::ptr_eq(type1, type2) {
            None
        } else {
            self.registry.protocol_slot(type2)
        };

        if let (Some(s1), Some(s2)) = (slot1, slot2) {
            if s1.same_impl(s2) {
                slot2 = None;
            }
        }

        if let Some(s1) = slot1 {
            if let Some(s2) = slot2 {
                if type2.is_proper_subtype_of(type1) {
                    tracing::trace!(
                        left = type1.name(),
                        right = type2.name(),
                        "right operand type is a subtype, trying its slot first"
                    );
                    if let SlotOutcome::Produced(v) = s2.call(a, b)? {
                        return Ok(v);
                    }
                    slot2 = None;
                }
            }

            tracing::trace!(ty = type1.name(), "trying left slot");
            if let SlotOutcome::Produced(v) = s1.call(a, b)? {
                return Ok(v);
            }
        }

        if let Some(s2) = slot2 {
            tracing::trace!(ty = type2.name(), "trying right slot");
            if let SlotOutcome::Produced(v) = s2.call(a, b)? {
                return Ok(v);
            }
        }

        if self.config.coercion_enabled() && (!type1.is_new_style() || !type2.is_new_style()) {
            if let Some(v) = self.coerce_and_divide(type1, CoerceSide::Left, a, b)? {
                return Ok(v);
            }
            if let Some(v) = self.coerce_and_divide(type2, CoerceSide::Right, a, b)? {
                return Ok(v);
            }
        }

        Err(self.unsupported(type1, type2))
    }

    /// Coerce through `ty`'s primitive and divide with the coerced pair.
    ///
    /// The coercion receives `ty`'s own operand first; the result is put back
    /// into expression order before the common type's slot runs.
    fn coerce_and_divide(
        &self,
        ty: &TypeRef,
        side: CoerceSide,
        a: &Value,
        b: &Value,
    ) -> ArithmeticResult<Option<Value>> {
        let Some(coerce) = ty.coerce() else {
            return Ok(None);
        };

        let outcome = match side {
            CoerceSide::Left => coerce.call(a, b)?,
            CoerceSide::Right => coerce.call(b, a)?,
        };
        let CoerceOutcome::Coerced(own, other) = outcome else {
            return Ok(None);
        };
        let (x, y) = match side {
            CoerceSide::Left => (own, other),
            CoerceSide::Right => (other, own),
        };

        let common = self.registry.type_of(&x);
        let Some(slot) = common.floor_divide() else {
            return Ok(None);
        };

        tracing::trace!(
            via = ty.name(),
            common = common.name(),
            "operands coerced to a common type"
        );
        match slot.call(&x, &y)? {
            SlotOutcome::Produced(v) => Ok(Some(v)),
            SlotOutcome::NotApplicable => Ok(None),
        }
    }
}
