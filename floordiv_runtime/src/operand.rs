//! Statically typed operands
//!
//! Entry points on [`FloorDivEngine`](crate::engine::FloorDivEngine) are generic
//! over [`Operand`]. Rust types whose numeric kind is known at compile time
//! (`i64`, `BigInt`, `f64`) carry it in [`Operand::KIND`], so each call site
//! monomorphizes to the matching fast path. [`Value`] has no static kind and
//! always takes the generic protocol.

use std::borrow::Cow;

use num_bigint::BigInt;

use crate::kind::ExactKind;
use crate::value::Value;

/// An operand of `//`.
pub trait Operand {
    /// Kind known before the call, if any
    const KIND: Option<ExactKind>;

    /// View the operand as a dynamic value
    fn as_value(&self) -> Cow<'_, Value>;
}

impl Operand for i64 {
    const KIND: Option<ExactKind> = Some(ExactKind::SmallInt);

    fn as_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::SmallInt(*self))
    }
}

impl Operand for BigInt {
    const KIND: Option<ExactKind> = Some(ExactKind::BigInt);

    fn as_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::BigInt(self.clone()))
    }
}

impl Operand for f64 {
    const KIND: Option<ExactKind> = Some(ExactKind::Float);

    fn as_value(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::Float(*self))
    }
}

impl Operand for Value {
    const KIND: Option<ExactKind> = None;

    fn as_value(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }
}
