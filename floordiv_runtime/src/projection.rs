//! Result shapes
//!
//! Every entry point comes in a value shape, which returns the numeric result,
//! and a truth shape, which reduces the result to its truthiness. Both run
//! the same arithmetic and error path.

use std::fmt;

use crate::engine::FloorDivEngine;
use crate::error::{ArithmeticError, ArithmeticResult};
use crate::operand::Operand;
use crate::value::Value;

/// Shape of result a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultShape {
    /// The numeric result
    Value,
    /// The truthiness of the numeric result
    Truth,
}

/// Three-valued truth outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Truth {
    /// Result was nonzero
    True,
    /// Result was zero
    False,
    /// Computing the result, or its truthiness, failed
    Exception(ArithmeticError),
}

impl Truth {
    /// Reduce a value result to its truthiness. The value is dropped.
    pub fn from_result(result: ArithmeticResult<Value>) -> Self {
        match result.and_then(|v| v.is_truthy()) {
            Ok(true) => Truth::True,
            Ok(false) => Truth::False,
            Err(e) => Truth::Exception(e),
        }
    }

    /// Check if this is `Truth::True`
    pub fn is_true(&self) -> bool {
        matches!(self, Truth::True)
    }

    /// Check if this is `Truth::False`
    pub fn is_false(&self) -> bool {
        matches!(self, Truth::False)
    }

    /// Check if this is `Truth::Exception`
    pub fn is_exception(&self) -> bool {
        matches!(self, Truth::Exception(_))
    }

    /// Convert to a `Result`
    pub fn into_result(self) -> ArithmeticResult<bool> {
        match self {
            Truth::True => Ok(true),
            Truth::False => Ok(false),
            Truth::Exception(e) => Err(e),
        }
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truth::True => write!(f, "True"),
            Truth::False => write!(f, "False"),
            Truth::Exception(e) => write!(f, "{}: {}", e.kind_name(), e),
        }
    }
}

/// A result in the shape that was asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Shaped {
    /// Value shape result
    Value(ArithmeticResult<Value>),
    /// Truth shape result
    Truth(Truth),
}

impl FloorDivEngine {
    /// Compute the truthiness of `a // b`.
    pub fn floor_divide_truth<L, R>(&self, a: &L, b: &R) -> Truth
    where
        L: Operand + ?Sized,
        R: Operand + ?Sized,
    {
        Truth::from_result(self.floor_divide_value(a, b))
    }

    /// Compute `a // b` in the requested shape.
    pub fn floor_divide_shaped<L, R>(&self, shape: ResultShape, a: &L, b: &R) -> Shaped
    where
        L: Operand + ?Sized,
        R: Operand + ?Sized,
    {
        match shape {
            ResultShape::Value => Shaped::Value(self.floor_divide_value(a, b)),
            ResultShape::Truth => Shaped::Truth(self.floor_divide_truth(a, b)),
        }
    }
}
