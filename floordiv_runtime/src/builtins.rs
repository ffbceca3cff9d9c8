//! Slots of the built-in numeric kinds
//!
//! Each built-in descriptor gets:
//!
//! - a floor-division slot that accepts the operand kinds it can promote
//!   (`int` only itself, `long` both integer kinds, `float` all three)
//! - a legacy coercion slot with the same acceptance rules
//! - a truth slot, used by opaque subtypes carrying a native payload
//!
//! Operands are read through `Value::as_*`, so subtypes of the built-in kinds
//! are accepted as well.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::error::{ArithmeticError, ArithmeticResult};
use crate::fast_path::{big_floor_div, float_floor_div, small_int_floor_div};
use crate::kind::{ExactKind, LanguageLevel};
use crate::types::{CoerceOutcome, SlotOutcome, TypeDescriptor, TypeRef};
use crate::value::Value;

const LONG_TO_FLOAT_OVERFLOW: &str = "long int too large to convert to float";

/// Build the descriptor for a built-in kind.
pub(crate) fn builtin_descriptor(kind: ExactKind, level: LanguageLevel) -> TypeRef {
    let builder = TypeDescriptor::builder(kind.display_name(level)).exact_kind(kind);
    let builder = match kind {
        ExactKind::SmallInt => builder
            .floor_divide_fn(int_floor_divide)
            .coerce_fn(int_coerce)
            .truth_fn(|v| Ok(v.as_small_int().map_or(true, |i| i != 0))),
        ExactKind::BigInt => builder
            .floor_divide_fn(long_floor_divide)
            .coerce_fn(long_coerce)
            .truth_fn(|v| Ok(v.as_big_int().map_or(true, |i| !i.is_zero()))),
        ExactKind::Float => builder
            .floor_divide_fn(float_floor_divide)
            .coerce_fn(float_coerce)
            .truth_fn(|v| Ok(v.as_float().map_or(true, |f| f != 0.0))),
    };
    builder.build()
}

// ========== Floor division slots ==========

fn int_floor_divide(a: &Value, b: &Value) -> ArithmeticResult<SlotOutcome> {
    match (a.as_small_int(), b.as_small_int()) {
        (Some(x), Some(y)) => small_int_floor_div(x, y).map(SlotOutcome::Produced),
        _ => Ok(SlotOutcome::NotApplicable),
    }
}

fn long_floor_divide(a: &Value, b: &Value) -> ArithmeticResult<SlotOutcome> {
    match (a.as_big_int(), b.as_big_int()) {
        (Some(x), Some(y)) => {
            big_floor_div(&x, &y).map(|q| SlotOutcome::Produced(Value::BigInt(q)))
        }
        _ => Ok(SlotOutcome::NotApplicable),
    }
}

fn float_floor_divide(a: &Value, b: &Value) -> ArithmeticResult<SlotOutcome> {
    let (Some(x), Some(y)) = (promote_to_float(a)?, promote_to_float(b)?) else {
        return Ok(SlotOutcome::NotApplicable);
    };
    float_floor_div(x, y).map(|q| SlotOutcome::Produced(Value::Float(q)))
}

// ========== Coercion slots ==========

fn int_coerce(own: &Value, other: &Value) -> ArithmeticResult<CoerceOutcome> {
    match (own.as_small_int(), other.as_small_int()) {
        (Some(x), Some(y)) => Ok(CoerceOutcome::Coerced(Value::SmallInt(x), Value::SmallInt(y))),
        _ => Ok(CoerceOutcome::NotApplicable),
    }
}

fn long_coerce(own: &Value, other: &Value) -> ArithmeticResult<CoerceOutcome> {
    match (own.as_big_int(), other.as_big_int()) {
        (Some(x), Some(y)) => Ok(CoerceOutcome::Coerced(
            Value::BigInt(x.into_owned()),
            Value::BigInt(y.into_owned()),
        )),
        _ => Ok(CoerceOutcome::NotApplicable),
    }
}

fn float_coerce(own: &Value, other: &Value) -> ArithmeticResult<CoerceOutcome> {
    match (promote_to_float(own)?, promote_to_float(other)?) {
        (Some(x), Some(y)) => Ok(CoerceOutcome::Coerced(Value::Float(x), Value::Float(y))),
        _ => Ok(CoerceOutcome::NotApplicable),
    }
}

// ========== Conversion ==========

/// Read any built-in numeric value as a float.
///
/// Returns `Ok(None)` for non-numeric values and an overflow error for big
/// integers beyond the float range.
pub(crate) fn promote_to_float(value: &Value) -> ArithmeticResult<Option<f64>> {
    if let Some(f) = value.as_float() {
        return Ok(Some(f));
    }
    if let Some(i) = value.as_small_int() {
        return Ok(Some(i as f64));
    }
    match value.as_big_int() {
        Some(big) => big_to_f64(&big).map(Some),
        None => Ok(None),
    }
}

fn big_to_f64(value: &BigInt) -> ArithmeticResult<f64> {
    match value.to_f64() {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(ArithmeticError::overflow(LONG_TO_FLOAT_OVERFLOW)),
    }
}
