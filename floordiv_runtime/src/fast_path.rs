//! Exact-pair floor division
//!
//! Direct algorithms for operand pairs whose kinds are both known: machine
//! integers, arbitrary-precision integers and floats. These never consult a
//! type descriptor.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

use crate::error::{ArithmeticError, ArithmeticResult};
use crate::value::Value;

/// `a // b` for machine integers.
///
/// The quotient is rounded toward negative infinity. `i64::MIN // -1` does
/// not fit a machine integer and is computed on big integers, producing a
/// `BigInt` value.
#[inline]
pub fn small_int_floor_div(a: i64, b: i64) -> ArithmeticResult<Value> {
    if b == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }

    if b == -1 && a.checked_neg().is_none() {
        let q = big_floor_div(&BigInt::from(a), &BigInt::from(b))?;
        return Ok(Value::from_big_int(q));
    }

    let mut a_div_b = a / b;
    let a_mod_b = a - a_div_b * b;

    // Truncation rounded toward zero; step down when the remainder and the
    // divisor disagree in sign.
    if a_mod_b != 0 && (b ^ a_mod_b) < 0 {
        a_div_b -= 1;
    }

    Ok(Value::SmallInt(a_div_b))
}

/// `a // b` for arbitrary-precision integers. The result stays a `BigInt`.
#[inline]
pub fn big_int_floor_div(a: &BigInt, b: &BigInt) -> ArithmeticResult<Value> {
    big_floor_div(a, b).map(Value::BigInt)
}

/// Big-integer floor division primitive.
pub(crate) fn big_floor_div(a: &BigInt, b: &BigInt) -> ArithmeticResult<BigInt> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a.div_floor(b))
}

/// `a // b` for floats.
///
/// A zero divisor reports the integer division message as well. The
/// quotient is derived from `fmod` and then snapped to the nearest integer
/// when `(a - mod) / b` lands just below it. A zero quotient takes the sign
/// of `a / b`.
#[inline]
pub fn float_floor_div(a: f64, b: f64) -> ArithmeticResult<f64> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }

    // Rust's `%` on f64 is C fmod: the remainder has the sign of `a`.
    let m = a % b;
    let mut div = (a - m) / b;

    if m != 0.0 && ((b < 0.0) != (m < 0.0)) {
        div -= 1.0;
    }

    let floordiv = if div != 0.0 {
        let mut floordiv = div.floor();
        if div - floordiv > 0.5 {
            floordiv += 1.0;
        }
        floordiv
    } else {
        0.0f64.copysign(a / b)
    };

    Ok(floordiv)
}
