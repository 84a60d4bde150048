//! Directed rounding on top of the integer primitives.
//!
//! Every operation that drops low-order bits (multiply, divide, narrowing
//! casts) funnels through [`shift_round`]. The routine floors the value and
//! then adds the carry that a rounding bias of `2^s - 1` would have pushed
//! into the kept bits, so the biased sum itself is never formed and cannot
//! overflow the carrier.

use crate::errors::{ErrorKind, Fault};
use crate::int::{DoubleWord, RawInt, divide, wide_multiply};

/// Rounding direction for fixed-point results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Truncate toward zero.
    #[default]
    TowardZero,
    /// Round toward positive infinity.
    Up,
    /// Round toward negative infinity.
    Down,
}

/// Result of a rounding step; a fault carries the wrapped double word.
pub type Rounded<R> = Result<DoubleWord<R>, Fault<DoubleWord<R>>>;

/// Drops the `discard` least significant bits of `value` with the requested
/// rounding. A negative `discard` shifts left instead.
///
/// `sticky` marks a nonzero remainder below `value` that was already
/// truncated toward zero (the division case), and `negative` is the sign of
/// the exact result, which a zero `value` cannot carry by itself.
pub fn shift_round<R: RawInt>(
    value: DoubleWord<R>,
    discard: i32,
    sticky: bool,
    negative: bool,
    rounding: Rounding,
) -> Rounded<R> {
    if discard < 0 {
        let (shifted, overflow) = value.shl(discard.unsigned_abs());
        if overflow {
            return Err(Fault::new(ErrorKind::out_of_range(negative), Some(shifted)));
        }
        return Ok(shifted);
    }

    let discard = discard as u32;
    let floor = value.shr(discard);
    let dropped = value.low_bits_nonzero(discard);

    let correction = match (rounding, negative) {
        (Rounding::TowardZero, true) | (Rounding::Up, true) => i8::from(dropped),
        (Rounding::Up, false) => i8::from(dropped || sticky),
        (Rounding::Down, true) => -i8::from(!dropped && sticky),
        (Rounding::TowardZero, false) | (Rounding::Down, false) => 0,
    };

    Ok(match correction {
        1 => floor.wrapping_add(DoubleWord::ONE),
        -1 => floor.wrapping_add(DoubleWord::ONE.wrapping_neg()),
        _ => floor,
    })
}

/// Product of two raw values with `fractional_bits` each, rounded back to
/// `fractional_bits`.
pub fn mul_round<R: RawInt>(
    a: R,
    b: R,
    fractional_bits: i32,
    rounding: Rounding,
) -> Rounded<R> {
    let product = wide_multiply(a, b);
    shift_round(product, fractional_bits, false, product.is_negative(), rounding)
}

/// Quotient of two raw values with `fractional_bits` each, rounded to
/// `fractional_bits`. Division by zero yields a fault without a wrapped value.
pub fn div_round<R: RawInt>(
    a: R,
    b: R,
    fractional_bits: i32,
    rounding: Rounding,
) -> Rounded<R> {
    let outcome = divide(a, b, fractional_bits).map_err(|kind| Fault::new(kind, None))?;
    // The quotient never has more fractional bits than requested, so this
    // only ever aligns it upward.
    let discard = -outcome.exponent - fractional_bits;
    shift_round(
        outcome.signed_quotient(),
        discard,
        outcome.has_remainder,
        outcome.negative,
        rounding,
    )
}
