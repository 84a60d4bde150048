//! Restoring binary long division with a free-standing exponent.
//!
//! [`divide`] produces the quotient of two raw integers as
//! `±quotient × 2^exponent`, truncated toward zero, plus a sticky flag for
//! the discarded remainder. The caller chooses how many fractional quotient
//! bits it needs; that number is unrelated to the storage width, so a tiny
//! dividend over a huge divisor still yields a full word of significant bits.

use super::{DoubleWord, RawInt};
use crate::errors::ErrorKind;

/// Quotient of [`divide`]: `±quotient × 2^exponent`, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisionOutcome<R: RawInt> {
    /// Magnitude of the truncated quotient.
    pub quotient: R::Unsigned,
    /// Sign of the exact quotient.
    pub negative: bool,
    /// Weight of the least significant quotient bit.
    pub exponent: i32,
    /// Set when bits below `2^exponent` were discarded.
    pub has_remainder: bool,
}

impl<R: RawInt> DivisionOutcome<R> {
    /// The signed quotient as a double word.
    pub fn signed_quotient(&self) -> DoubleWord<R> {
        DoubleWord::from_magnitude(self.quotient, self.negative)
    }
}

/// Divides `dividend` by `divisor`, producing quotient bits down to a weight
/// of `2^-fractional_bits`.
///
/// Generation stops early when the remainder reaches zero or when the quotient
/// fills its word; in the latter case `exponent` stays above
/// `-fractional_bits` and the quotient cannot be represented in any format of
/// this storage width at that resolution.
///
/// A `fractional_bits` of `i32::MIN` is treated as `-i32::MAX`.
///
/// Division by zero fails with [`ErrorKind::NotANumber`] for `0 / 0`,
/// [`ErrorKind::Underflow`] for a negative dividend and
/// [`ErrorKind::Overflow`] otherwise.
pub fn divide<R: RawInt>(
    dividend: R,
    divisor: R,
    fractional_bits: i32,
) -> Result<DivisionOutcome<R>, ErrorKind> {
    let zero = <R::Unsigned as RawInt>::ZERO;
    let one = <R::Unsigned as RawInt>::ONE;

    let target = fractional_bits.saturating_neg();
    if divisor == R::ZERO {
        return Err(if dividend == R::ZERO {
            ErrorKind::NotANumber
        } else if dividend.is_negative() {
            ErrorKind::Underflow
        } else {
            ErrorKind::Overflow
        });
    }
    if dividend == R::ZERO {
        return Ok(DivisionOutcome {
            quotient: zero,
            negative: false,
            exponent: target,
            has_remainder: false,
        });
    }

    let negative = dividend.is_negative() != divisor.is_negative();
    let numerator = dividend.unsigned_abs();
    let denominator = divisor.unsigned_abs();

    // Normalize so both leading bits are set; the ratio is then in (1/2, 2).
    let numerator_shift = numerator.leading_zeros();
    let denominator_shift = denominator.leading_zeros();
    let mut remainder = numerator.wrapping_shl(numerator_shift);
    let denominator = denominator.wrapping_shl(denominator_shift);
    let mut weight = denominator_shift as i32 - numerator_shift as i32;

    if weight < target {
        // Even the leading quotient bit is below the requested resolution.
        return Ok(DivisionOutcome {
            quotient: zero,
            negative,
            exponent: target,
            has_remainder: true,
        });
    }

    let top_bit = one.wrapping_shl(<R::Unsigned as RawInt>::BITS - 1);
    let mut quotient = zero;
    let mut carry = false;
    loop {
        // `carry` is the bit shifted out of the remainder on the last doubling.
        if carry || remainder >= denominator {
            remainder = remainder.overflowing_sub(denominator).0;
            quotient = quotient | one;
        }
        if weight == target || remainder == zero {
            break;
        }
        if quotient & top_bit != zero {
            break;
        }
        carry = remainder & top_bit != zero;
        remainder = remainder.wrapping_shl(1);
        quotient = quotient.wrapping_shl(1);
        weight -= 1;
    }

    Ok(DivisionOutcome {
        quotient,
        negative,
        exponent: weight,
        has_remainder: remainder != zero,
    })
}
