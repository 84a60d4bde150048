//! Conversions between formats, native integers and floats.
//!
//! Every conversion is expressed on the 256-bit [`Wide`] carrier: the source
//! raw value is widened, shifted to the target resolution with rounding, and
//! only then checked against the target format's bounds. A fault always
//! carries the value the target storage would hold after wraparound, except
//! for float sources where it carries what Rust's `as` conversion would
//! produce (saturation, `NaN` to zero).

use crate::errors::{ErrorKind, Fault};
use crate::format::FixedFormat;
use crate::int::Wide;
use crate::rounding::{Rounding, shift_round};

/// Rounding applied when a float does not land on the target grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FloatRounding {
    /// Round to nearest, ties to even (the IEEE 754 default).
    #[default]
    NearestEven,
    TowardZero,
    Up,
    Down,
}

impl From<Rounding> for FloatRounding {
    fn from(rounding: Rounding) -> Self {
        match rounding {
            Rounding::TowardZero => Self::TowardZero,
            Rounding::Up => Self::Up,
            Rounding::Down => Self::Down,
        }
    }
}

/// Moves `value` from `from_fractional_bits` to the resolution of `to` and
/// checks the result against its bounds.
///
/// A negative value headed for an unsigned format fails with
/// [`ErrorKind::Underflow`] no matter how it would round.
pub fn rescale(
    value: Wide,
    from_fractional_bits: i32,
    to: &FixedFormat,
    rounding: Rounding,
) -> Result<Wide, Fault<Wide>> {
    let negative = value.is_negative();
    let discard = from_fractional_bits - to.fractional_bits();
    let shifted = shift_round(value, discard, false, negative, rounding)
        .map_err(|fault| fault.map(|wrapped| to.wrap(wrapped)))?;
    if negative && !to.is_signed() {
        return Err(Fault::new(ErrorKind::Underflow, Some(to.wrap(shifted))));
    }
    to.classify(shifted)
}

const F64_MANTISSA_BITS: u32 = 52;
const F64_EXPONENT_BIAS: i32 = 1075;

/// Splits a finite `f64` into `(negative, mantissa, exponent)` with
/// `|x| = mantissa × 2^exponent` exactly.
fn decompose(x: f64) -> (bool, u64, i32) {
    let bits = x.to_bits();
    let negative = bits >> 63 != 0;
    let biased = ((bits >> F64_MANTISSA_BITS) & 0x7FF) as i32;
    let fraction = bits & ((1 << F64_MANTISSA_BITS) - 1);
    if biased == 0 {
        (negative, fraction, 1 - F64_EXPONENT_BIAS)
    } else {
        (negative, fraction | 1 << F64_MANTISSA_BITS, biased - F64_EXPONENT_BIAS)
    }
}

/// Converts `x` into a raw value of `to`, i.e. `x × 2^F` rounded to an
/// integer.
pub fn float_to_raw(
    x: f64,
    to: &FixedFormat,
    rounding: FloatRounding,
) -> Result<Wide, Fault<Wide>> {
    if x.is_nan() {
        return Err(Fault::new(ErrorKind::NotANumber, Some(Wide::ZERO)));
    }
    if x.is_infinite() {
        let negative = x < 0.0;
        return Err(out_of_range(to, negative));
    }

    let (negative, mantissa, exponent) = decompose(x);
    let shift = exponent + to.fractional_bits();
    let magnitude = Wide::new(u128::from(mantissa), 0);

    let magnitude = if shift >= 0 {
        let (shifted, overflow) = magnitude.shl(shift as u32);
        if overflow {
            return Err(out_of_range(to, negative));
        }
        shifted
    } else {
        round_magnitude(mantissa, shift.unsigned_abs(), negative, rounding)
    };

    let value = if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    };
    if negative && !magnitude.is_zero() && !to.is_signed() {
        return Err(Fault::new(ErrorKind::Underflow, Some(to.raw_min())));
    }
    to.classify(value)
        .map_err(|fault| Fault::new(fault.kind, Some(to.saturate(value))))
}

fn out_of_range(to: &FixedFormat, negative: bool) -> Fault<Wide> {
    let saturated = if negative { to.raw_min() } else { to.raw_max() };
    Fault::new(ErrorKind::out_of_range(negative), Some(saturated))
}

/// Rounds `mantissa × 2^-discard` to an integer magnitude.
fn round_magnitude(mantissa: u64, discard: u32, negative: bool, rounding: FloatRounding) -> Wide {
    let mantissa = u128::from(mantissa);
    let (floor, remainder, half) = if discard >= 128 {
        (0, mantissa, None)
    } else {
        let half = 1u128 << (discard - 1);
        let remainder = mantissa & ((half << 1).wrapping_sub(1));
        (mantissa >> discard, remainder, Some(half))
    };
    let inexact = remainder != 0;
    let round_away = match rounding {
        FloatRounding::TowardZero => false,
        FloatRounding::Up => inexact && !negative,
        FloatRounding::Down => inexact && negative,
        // A mantissa below 2^64 never reaches half of 2^128.
        FloatRounding::NearestEven => half.is_some_and(|half| {
            remainder > half || (remainder == half && floor & 1 == 1)
        }),
    };
    Wide::new(floor + u128::from(round_away), 0)
}

/// `x × 2^n`, exact unless the result leaves the normal range.
pub fn scale_by_pow2(mut x: f64, mut n: i32) -> f64 {
    const STEP: i32 = 1000;
    while n > STEP {
        x *= pow2(STEP);
        n -= STEP;
    }
    while n < -STEP {
        x *= pow2(-STEP);
        n += STEP;
    }
    x * pow2(n)
}

/// `2^n` for `n` in the normal exponent range.
fn pow2(n: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&n));
    f64::from_bits(((n + 1023) as u64) << F64_MANTISSA_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::int::RawInt;

    const Q16_16: FixedFormat = FixedFormat::of(16, 16, 32, true);
    const UQ8_8: FixedFormat = FixedFormat::of(8, 8, 16, false);

    fn raw(x: f64, format: &FixedFormat, rounding: FloatRounding) -> i128 {
        i128::narrow(float_to_raw(x, format, rounding).unwrap()).unwrap()
    }

    #[test]
    fn rescale_widens_and_narrows() {
        let value = Wide::from_narrow(3);
        let up = rescale(value, 0, &Q16_16, Rounding::TowardZero).unwrap();
        assert_eq!(up, Wide::from_narrow(3 << 16));

        let int = FixedFormat::of(32, 0, 32, true);
        let back = rescale(Wide::from_narrow(-0x18000), 16, &int, Rounding::TowardZero);
        assert_eq!(back, Ok(Wide::from_narrow(-1)));
        let back = rescale(Wide::from_narrow(-0x18000), 16, &int, Rounding::Down);
        assert_eq!(back, Ok(Wide::from_narrow(-2)));
    }

    #[test]
    fn rescale_rejects_negative_into_unsigned() {
        let fault = rescale(Wide::from_narrow(-1), 30, &UQ8_8, Rounding::TowardZero).unwrap_err();
        assert_eq!(fault.kind, ErrorKind::Underflow);
    }

    #[test]
    fn rescale_overflow_wraps_to_target() {
        let fault = rescale(Wide::from_narrow(0x1_0080), 8, &UQ8_8, Rounding::TowardZero)
            .unwrap_err();
        assert_eq!(fault.kind, ErrorKind::Overflow);
        assert_eq!(fault.wrapped, Some(Wide::from_narrow(0x0080)));

        let fault = rescale(Wide::from_narrow(1), -300, &UQ8_8, Rounding::TowardZero)
            .unwrap_err();
        assert_eq!(fault.kind, ErrorKind::Overflow);
    }

    #[test]
    fn float_rounding_modes() {
        // 2.5 ulp and -2.5 ulp in Q16.16
        let x = 2.5 / 65536.0;
        assert_eq!(raw(x, &Q16_16, FloatRounding::NearestEven), 2);
        assert_eq!(raw(x, &Q16_16, FloatRounding::TowardZero), 2);
        assert_eq!(raw(x, &Q16_16, FloatRounding::Up), 3);
        assert_eq!(raw(x, &Q16_16, FloatRounding::Down), 2);
        assert_eq!(raw(-x, &Q16_16, FloatRounding::NearestEven), -2);
        assert_eq!(raw(-x, &Q16_16, FloatRounding::Up), -2);
        assert_eq!(raw(-x, &Q16_16, FloatRounding::Down), -3);
        assert_eq!(raw(3.5 / 65536.0, &Q16_16, FloatRounding::NearestEven), 4);
        assert_eq!(raw(3.25 / 65536.0, &Q16_16, FloatRounding::NearestEven), 3);
    }

    #[test]
    fn float_exact_values() {
        assert_eq!(raw(1.5, &Q16_16, FloatRounding::NearestEven), 0x18000);
        assert_eq!(raw(-32768.0, &Q16_16, FloatRounding::NearestEven), i32::MIN as i128);
        assert_eq!(raw(0.0, &Q16_16, FloatRounding::Up), 0);
        assert_eq!(raw(-0.0, &UQ8_8, FloatRounding::NearestEven), 0);
        assert_eq!(raw(f64::MIN_POSITIVE, &Q16_16, FloatRounding::Up), 1);
        assert_eq!(raw(5e-324, &Q16_16, FloatRounding::Down), 0);
        assert_eq!(raw(-5e-324, &Q16_16, FloatRounding::Down), -1);
    }

    #[test]
    fn float_special_values() {
        let fault = float_to_raw(f64::NAN, &Q16_16, FloatRounding::NearestEven).unwrap_err();
        assert_eq!(fault, Fault::new(ErrorKind::NotANumber, Some(Wide::ZERO)));

        let fault = float_to_raw(f64::INFINITY, &Q16_16, FloatRounding::NearestEven).unwrap_err();
        assert_eq!(fault.kind, ErrorKind::Overflow);
        assert_eq!(fault.wrapped, Some(Wide::from_narrow(i32::MAX as i128)));

        let fault = float_to_raw(f64::NEG_INFINITY, &UQ8_8, FloatRounding::NearestEven).unwrap_err();
        assert_eq!(fault.kind, ErrorKind::Underflow);
        assert_eq!(fault.wrapped, Some(Wide::ZERO));
    }

    #[test]
    fn float_out_of_range() {
        let fault = float_to_raw(32768.0, &Q16_16, FloatRounding::NearestEven).unwrap_err();
        assert_eq!(fault.kind, ErrorKind::Overflow);
        let fault = float_to_raw(-0.5, &UQ8_8, FloatRounding::TowardZero).unwrap_err();
        assert_eq!(fault.kind, ErrorKind::Underflow);
        let fault = float_to_raw(f64::MAX, &UQ8_8, FloatRounding::NearestEven).unwrap_err();
        assert_eq!(fault.kind, ErrorKind::Overflow);
        assert_eq!(fault.wrapped, Some(Wide::from_narrow(0xFFFF)));
    }

    #[test]
    fn scale_by_pow2_is_exact_over_wide_ranges() {
        assert_eq!(scale_by_pow2(3.0, -1), 1.5);
        assert_eq!(scale_by_pow2(1.0, 1023), f64::MAX / (2.0 - f64::EPSILON));
        assert_eq!(scale_by_pow2(scale_by_pow2(1.0, 2000), -2000), f64::INFINITY);
        assert_eq!(scale_by_pow2(scale_by_pow2(1.5, 1010), -1010), 1.5);
        assert_eq!(scale_by_pow2(1.0, -1500), 0.0);
        assert_eq!(scale_by_pow2(1.0, -1074), 5e-324);
    }
}
