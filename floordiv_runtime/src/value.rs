//! Dynamic Value type
//!
//! This module provides the `Value` enum the dispatcher operates on. The three
//! concrete numeric kinds are stored inline; every other value is an
//! [`OpaqueValue`] that carries its own [`TypeDescriptor`](crate::types::TypeDescriptor).

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::error::ArithmeticResult;
use crate::kind::ExactKind;
use crate::types::TypeRef;

/// Dynamic value
///
/// The tag is authoritative for the fast paths: a `SmallInt` is always an
/// exact machine integer. Values of user types, including subtypes of the
/// built-in kinds, are `Opaque`.
#[derive(Debug, Clone)]
pub enum Value {
    /// Machine-sized integer
    SmallInt(i64),
    /// Arbitrary-precision integer
    BigInt(BigInt),
    /// 64-bit floating point
    Float(f64),
    /// Any other value, described by its type descriptor
    Opaque(OpaqueValue),
}

/// A value of a type the engine only knows through its descriptor.
#[derive(Clone)]
pub struct OpaqueValue {
    ty: TypeRef,
    payload: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    /// Descriptor of this value's type
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Borrow the payload as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Check if both handles point at the same payload
    pub fn same_payload(&self, other: &OpaqueValue) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueValue")
            .field("ty", &self.ty.name())
            .field("payload", &Arc::as_ptr(&self.payload))
            .finish()
    }
}

impl Value {
    /// Create an opaque value of type `ty`
    pub fn opaque<T: Any + Send + Sync>(ty: &TypeRef, payload: T) -> Self {
        Value::Opaque(OpaqueValue {
            ty: Arc::clone(ty),
            payload: Arc::new(payload),
        })
    }

    /// Create an integer value, narrowing to `SmallInt` when it fits
    pub fn from_big_int(v: BigInt) -> Self {
        match v.to_i64() {
            Some(small) => Value::SmallInt(small),
            None => Value::BigInt(v),
        }
    }

    /// The exact kind named by the tag; `None` for opaque values
    pub fn exact_kind(&self) -> Option<ExactKind> {
        match self {
            Value::SmallInt(_) => Some(ExactKind::SmallInt),
            Value::BigInt(_) => Some(ExactKind::BigInt),
            Value::Float(_) => Some(ExactKind::Float),
            Value::Opaque(_) => None,
        }
    }

    /// The built-in kind this value behaves as, including opaque subtypes
    pub fn numeric_kind(&self) -> Option<ExactKind> {
        match self {
            Value::Opaque(o) => o.ty.numeric_kind(),
            _ => self.exact_kind(),
        }
    }

    /// Try to read as a machine integer
    ///
    /// Accepts `SmallInt` and opaque values whose type derives from the
    /// machine integer kind and carry an `i64` payload.
    pub fn as_small_int(&self) -> Option<i64> {
        match self {
            Value::SmallInt(v) => Some(*v),
            Value::Opaque(o) if o.ty.numeric_kind() == Some(ExactKind::SmallInt) => {
                o.downcast_ref::<i64>().copied()
            }
            _ => None,
        }
    }

    /// Try to read as an arbitrary-precision integer
    ///
    /// Machine integers are widened; floats are not.
    pub fn as_big_int(&self) -> Option<Cow<'_, BigInt>> {
        match self {
            Value::BigInt(v) => Some(Cow::Borrowed(v)),
            Value::Opaque(o) if o.ty.numeric_kind() == Some(ExactKind::BigInt) => {
                o.downcast_ref::<BigInt>().map(Cow::Borrowed)
            }
            _ => self.as_small_int().map(|v| Cow::Owned(BigInt::from(v))),
        }
    }

    /// Try to read as a float without converting integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Opaque(o) if o.ty.numeric_kind() == Some(ExactKind::Float) => {
                o.downcast_ref::<f64>().copied()
            }
            _ => None,
        }
    }

    /// Truthiness: nonzero numbers are true
    ///
    /// Opaque values consult their type's truth slot and are true without one.
    pub fn is_truthy(&self) -> ArithmeticResult<bool> {
        match self {
            Value::SmallInt(v) => Ok(*v != 0),
            Value::BigInt(v) => Ok(!v.is_zero()),
            Value::Float(v) => Ok(*v != 0.0),
            Value::Opaque(o) => match o.ty.truth() {
                Some(slot) => slot.call(self),
                None => Ok(true),
            },
        }
    }

    /// Check if this is a numeric zero of a concrete kind
    pub fn is_zero(&self) -> bool {
        match self {
            Value::SmallInt(v) => *v == 0,
            Value::BigInt(v) => v.is_zero(),
            Value::Float(v) => *v == 0.0,
            Value::Opaque(_) => false,
        }
    }
}

// ========== From implementations ==========

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::SmallInt(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::SmallInt(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInt(v)
    }
}

// ========== Display implementation ==========

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::SmallInt(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}L", v),
            Value::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
                    write!(f, "{:.1}", v)
                } else {
                    write!(f, "{}", v)
                }
            }
            Value::Opaque(o) => write!(f, "<{} object>", o.ty.name()),
        }
    }
}

// ========== PartialEq implementation ==========

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::SmallInt(a), Value::SmallInt(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // Opaque values compare by identity
            (Value::Opaque(a), Value::Opaque(b)) => {
                Arc::ptr_eq(&a.ty, &b.ty) && a.same_payload(b)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeDescriptor;

    #[test]
    fn test_value_from_primitives() {
        assert!(matches!(Value::from(42i64), Value::SmallInt(42)));
        assert!(matches!(Value::from(7i32), Value::SmallInt(7)));
        assert!(matches!(Value::from(3.125f64), Value::Float(_)));
        assert!(matches!(Value::from(BigInt::from(1)), Value::BigInt(_)));
    }

    #[test]
    fn test_from_big_int_narrows() {
        assert_eq!(Value::from_big_int(BigInt::from(-5)), Value::SmallInt(-5));
        let wide: BigInt = BigInt::from(i64::MAX) + 1;
        assert_eq!(Value::from_big_int(wide.clone()), Value::BigInt(wide));
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::SmallInt(0).is_truthy().unwrap());
        assert!(Value::SmallInt(-3).is_truthy().unwrap());
        assert!(!Value::BigInt(BigInt::zero()).is_truthy().unwrap());
        assert!(!Value::Float(-0.0).is_truthy().unwrap());
        assert!(Value::Float(f64::NAN).is_truthy().unwrap());

        let plain = TypeDescriptor::builder("Plain").build();
        assert!(Value::opaque(&plain, ()).is_truthy().unwrap());

        let falsy = TypeDescriptor::builder("Falsy").truth_fn(|_| Ok(false)).build();
        assert!(!Value::opaque(&falsy, ()).is_truthy().unwrap());
    }

    #[test]
    fn test_opaque_numeric_access() {
        let int = TypeDescriptor::builder("int")
            .exact_kind(ExactKind::SmallInt)
            .build();
        let my_int = TypeDescriptor::builder("MyInt").base(&int).build();
        let v = Value::opaque(&my_int, 9i64);
        assert_eq!(v.numeric_kind(), Some(ExactKind::SmallInt));
        assert_eq!(v.exact_kind(), None);
        assert_eq!(v.as_small_int(), Some(9));
        assert_eq!(v.as_big_int().map(Cow::into_owned), Some(BigInt::from(9)));
        assert_eq!(v.as_float(), None);
    }

    #[test]
    fn test_opaque_identity_equality() {
        let t = TypeDescriptor::builder("Thing").build();
        let a = Value::opaque(&t, 1u8);
        let b = Value::opaque(&t, 1u8);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::SmallInt(42).to_string(), "42");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(-0.0).to_string(), "-0.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::BigInt(BigInt::from(7)).to_string(), "7L");
        let t = TypeDescriptor::builder("Thing").build();
        assert_eq!(Value::opaque(&t, ()).to_string(), "<Thing object>");
    }
}
