//! Overflow-aware primitive operations on raw integers.
//!
//! Each operation returns its wrapped result together with a flag that is set
//! when the mathematical result did not fit. Shifts are total: shifting by the
//! type width or more never panics.

use super::RawInt;

/// `a + b + carry_in`, with the overflow flag of the whole sum.
///
/// For unsigned types the flag is the carry out of the top bit; for signed
/// types it is two's complement overflow.
#[inline]
pub fn add<T: RawInt>(a: T, b: T, carry_in: bool) -> (T, bool) {
    let (sum, first) = a.overflowing_add(b);
    if !carry_in {
        return (sum, first);
    }
    let (sum, second) = sum.overflowing_add(T::ONE);
    // Two signed overflows in opposite directions cancel out.
    (sum, first ^ second)
}

/// `a - b - borrow_in`, with the overflow (borrow) flag.
#[inline]
pub fn sub<T: RawInt>(a: T, b: T, borrow_in: bool) -> (T, bool) {
    let (difference, first) = a.overflowing_sub(b);
    if !borrow_in {
        return (difference, first);
    }
    let (difference, second) = difference.overflowing_sub(T::ONE);
    (difference, first ^ second)
}

/// Shifts `a` left by `n` bits, reporting whether significant bits were lost.
///
/// A negative `n` shifts right instead, which never overflows.
#[inline]
pub fn shift_left<T: RawInt>(a: T, n: i32) -> (T, bool) {
    if n < 0 {
        return (shift_right(a, n.unsigned_abs()), false);
    }
    let n = n as u32;
    if n >= T::BITS {
        return (T::ZERO, a != T::ZERO);
    }
    let shifted = a.wrapping_shl(n);
    (shifted, shifted.wrapping_shr(n) != a)
}

/// Shifts `a` right by `n` bits, rounding toward negative infinity.
///
/// Shifting by the width or more yields `0`, or `-1` for negative signed
/// values.
#[inline]
pub fn shift_right<T: RawInt>(a: T, n: u32) -> T {
    if n >= T::BITS {
        return if a.is_negative() { !T::ZERO } else { T::ZERO };
    }
    a.wrapping_shr(n)
}
