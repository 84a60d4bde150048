//! Mathematical constants.
//!
//! Each constant is stored once at 124 fractional bits, truncated, and
//! rounded into the requested format through the cast layer.

use crate::errors::FixedResult;
use crate::fixed::Fixed;
use crate::int::RawInt;
use crate::policy::OverflowPolicy;
use crate::rounding::Rounding;

/// Carrier format for the stored constants: four integer bits, unsigned.
pub type Precise = Fixed<u128, 4, 124>;

pub const PI: Precise = Fixed::from_raw_unchecked(0x3243_F6A8_885A_308D_3131_98A2_E037_0734);
pub const E: Precise = Fixed::from_raw_unchecked(0x2B7E_1516_28AE_D2A6_ABF7_1588_09CF_4F3C);
pub const LN_2: Precise = Fixed::from_raw_unchecked(0x0B17_217F_7D1C_F79A_BC9E_3B39_803F_2F6A);
pub const SQRT_2: Precise = Fixed::from_raw_unchecked(0x16A0_9E66_7F3B_CC90_8B2F_B136_6EA9_57D3);

impl<R: RawInt, const I: i32, const F: i32> Fixed<R, I, F> {
    /// `constant` in this format with the given rounding.
    pub fn constant_with<P: OverflowPolicy>(constant: Precise, rounding: Rounding) -> P::Output<Self> {
        constant.cast_rounded_with::<P, R, I, F>(rounding)
    }

    pub fn pi() -> FixedResult<Self> {
        PI.cast()
    }

    pub fn e() -> FixedResult<Self> {
        E.cast()
    }

    pub fn ln_2() -> FixedResult<Self> {
        LN_2.cast()
    }

    pub fn sqrt_2() -> FixedResult<Self> {
        SQRT_2.cast()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::policy::{Checked, Saturating};
    use approx::assert_relative_eq;

    type Q16_16 = Fixed<i32, 16, 16>;
    type Q2_30 = Fixed<i32, 2, 30>;
    type Q64_64 = Fixed<i128, 64, 64>;

    #[test]
    fn stored_constants_match_f64() {
        assert_relative_eq!(PI.to_f64(), std::f64::consts::PI);
        assert_relative_eq!(E.to_f64(), std::f64::consts::E);
        assert_relative_eq!(LN_2.to_f64(), std::f64::consts::LN_2);
        assert_relative_eq!(SQRT_2.to_f64(), std::f64::consts::SQRT_2);
    }

    #[test]
    fn rounded_into_q16_16() {
        assert_eq!(Q16_16::pi().map(Fixed::raw), Ok(0x3_243F));
        assert_eq!(Q16_16::e().map(Fixed::raw), Ok(0x2_B7E1));
        let up = Q16_16::constant_with::<Checked>(PI, Rounding::Up);
        assert_eq!(up.map(Fixed::raw), Ok(0x3_2440));
    }

    #[test]
    fn constants_beyond_the_format_range() {
        assert_eq!(Q2_30::pi().unwrap_err().kind(), Some(ErrorKind::Overflow));
        assert_eq!(Q2_30::constant_with::<Saturating>(PI, Rounding::TowardZero), Q2_30::highest());
        assert_relative_eq!(Q2_30::sqrt_2().unwrap().to_f64(), std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn wide_formats_keep_precision() {
        let ln_2 = Q64_64::ln_2().unwrap();
        assert_eq!(ln_2.raw(), 0xB172_17F7_D1CF_79AB);
    }
}
