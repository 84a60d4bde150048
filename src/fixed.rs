//! The fixed-point value type.
//!
//! `Fixed<R, I, F>` stores a raw integer of type `R` and denotes
//! `raw × 2^-F`. Only the low `I + F` bits of `R` are significant; for a
//! signed `R` the sign bit is one of the `I` integer bits. The format is
//! checked when the type is first used, so `Fixed<i16, 12, 8>` fails to
//! compile as soon as any of its operations is instantiated.
//!
//! Fallible operations come in a `*_with::<P>` form parameterised by an
//! [`OverflowPolicy`], plus `checked_*`, `saturating_*` and `wrapping_*`
//! shorthands. The `std::ops` operators panic on overflow.

mod arith;
mod compare;
mod display;

use crate::convert::{FloatRounding, float_to_raw, rescale, scale_by_pow2};
use crate::errors::{ErrorKind, Fault, FixedResult};
use crate::format::FixedFormat;
use crate::int::{RawInt, Wide};
use crate::policy::{Checked, OverflowPolicy, Representable};
use crate::rounding::{Rounded, Rounding, div_round};

#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct Fixed<R: RawInt, const I: i32, const F: i32> {
    raw: R,
}

/// Outcome of a computation before an error policy is applied.
type Outcome<T> = Result<T, Fault<T>>;

impl<R: RawInt, const I: i32, const F: i32> Fixed<R, I, F> {
    pub const FORMAT: FixedFormat = FixedFormat::of(I, F, R::BITS, R::SIGNED);
    pub const INTEGER_BITS: i32 = I;
    pub const FRACTIONAL_BITS: i32 = F;

    pub const ZERO: Self = Self::from_raw_unchecked(R::ZERO);

    /// Unused high bits of the storage integer.
    const SPARE_BITS: u32 = R::BITS - Self::FORMAT.digits();

    /// Wraps a raw integer that the caller knows to be in range.
    ///
    /// An out-of-range `raw` is not detected and leaves later arithmetic
    /// results unspecified.
    pub const fn from_raw_unchecked(raw: R) -> Self {
        let _ = Self::SPARE_BITS;
        Self { raw }
    }

    /// The raw integer.
    #[inline]
    pub const fn raw(self) -> R {
        self.raw
    }

    /// Reinterprets the low `I + F` bits of `raw`, discarding the rest.
    pub fn from_bits(raw: R) -> Self {
        let spare = Self::SPARE_BITS;
        if spare == 0 {
            return Self { raw };
        }
        Self {
            raw: raw.wrapping_shl(spare).wrapping_shr(spare),
        }
    }

    pub fn lowest() -> Self {
        Self {
            raw: R::MIN.wrapping_shr(Self::SPARE_BITS),
        }
    }

    pub fn highest() -> Self {
        Self {
            raw: R::MAX.wrapping_shr(Self::SPARE_BITS),
        }
    }

    /// The smallest positive value, one unit in the last place.
    ///
    /// A signed format with a single digit holds only `-1` and `0` units and
    /// has no positive value.
    pub fn epsilon() -> Option<Self> {
        let unit = Self::from_bits(R::ONE);
        (!unit.is_negative()).then_some(unit)
    }

    pub fn is_zero(self) -> bool {
        self.raw == R::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.raw.is_negative()
    }

    fn contains(raw: R) -> bool {
        raw >= Self::lowest().raw && raw <= Self::highest().raw
    }

    /// Accepts `raw` if it is in range, otherwise reports `kind` with the
    /// wrapped value.
    fn fit(raw: R, kind: ErrorKind) -> Outcome<Self> {
        if Self::contains(raw) {
            Ok(Self { raw })
        } else {
            Err(Fault::new(kind, Some(Self::from_bits(raw))))
        }
    }

    /// Narrows a rounded double-word result into this format.
    fn settle(outcome: Rounded<R>) -> Outcome<Self> {
        let value = match outcome {
            Ok(value) => value,
            Err(fault) => return Err(fault.map(|wrapped| Self::from_bits(wrapped.truncate()))),
        };
        match value.narrow() {
            Some(raw) if Self::contains(raw) => Ok(Self { raw }),
            _ => Err(Fault::new(
                ErrorKind::out_of_range(value.is_negative()),
                Some(Self::from_bits(value.truncate())),
            )),
        }
    }

    /// Adopts a value already checked against [`Self::FORMAT`].
    fn settle_wide(outcome: Outcome<Wide>) -> Outcome<Self> {
        outcome
            .map(|raw| Self { raw: R::truncate(raw) })
            .map_err(|fault| fault.map(|wrapped| Self::from_bits(R::truncate(wrapped))))
    }

    /// Interprets a native integer as a raw value of this format.
    pub fn from_raw<T: RawInt>(raw: T) -> FixedResult<Self> {
        Self::from_raw_with::<Checked, T>(raw)
    }

    pub fn from_raw_with<P: OverflowPolicy, T: RawInt>(raw: T) -> P::Output<Self> {
        P::resolve(Self::settle_wide(rescale(
            raw.widen(),
            F,
            &Self::FORMAT,
            Rounding::TowardZero,
        )))
    }

    /// The integer `value`, exactly.
    pub fn from_int<T: RawInt>(value: T) -> FixedResult<Self> {
        Self::from_int_with::<Checked, T>(value)
    }

    pub fn from_int_with<P: OverflowPolicy, T: RawInt>(value: T) -> P::Output<Self> {
        P::resolve(Self::settle_wide(rescale(
            value.widen(),
            0,
            &Self::FORMAT,
            Rounding::TowardZero,
        )))
    }

    /// `numerator / denominator` rounded into this format.
    pub fn from_ratio(numerator: R, denominator: R, rounding: Rounding) -> FixedResult<Self> {
        Self::from_ratio_with::<Checked>(numerator, denominator, rounding)
    }

    pub fn from_ratio_with<P: OverflowPolicy>(
        numerator: R,
        denominator: R,
        rounding: Rounding,
    ) -> P::Output<Self> {
        // Integers share a scale, so their raw quotient is the value.
        P::resolve(Self::settle(div_round(numerator, denominator, F, rounding)))
    }

    /// The nearest value to `x`, ties to even.
    pub fn from_f64(x: f64) -> FixedResult<Self> {
        Self::from_f64_with::<Checked>(x)
    }

    pub fn from_f64_with<P: OverflowPolicy>(x: f64) -> P::Output<Self> {
        Self::from_f64_rounded::<P>(x, FloatRounding::default())
    }

    pub fn from_f64_rounded<P: OverflowPolicy>(x: f64, rounding: FloatRounding) -> P::Output<Self> {
        P::resolve(Self::settle_wide(float_to_raw(x, &Self::FORMAT, rounding)))
    }

    pub fn from_f32(x: f32) -> FixedResult<Self> {
        Self::from_f32_with::<Checked>(x)
    }

    pub fn from_f32_with<P: OverflowPolicy>(x: f32) -> P::Output<Self> {
        Self::from_f64_rounded::<P>(f64::from(x), FloatRounding::default())
    }

    /// The integer part, truncated toward zero.
    pub fn to_int<T: RawInt + Representable>(self) -> FixedResult<T> {
        self.to_int_with::<Checked, T>(Rounding::TowardZero)
    }

    pub fn to_int_with<P: OverflowPolicy, T: RawInt + Representable>(
        self,
        rounding: Rounding,
    ) -> P::Output<T> {
        let outcome = rescale(self.raw.widen(), F, &T::format(), rounding);
        P::resolve(
            outcome
                .map(T::truncate)
                .map_err(|fault| fault.map(T::truncate)),
        )
    }

    /// Nearest `f64`, ties to even.
    pub fn to_f64(self) -> f64 {
        scale_by_pow2(self.raw.to_f64(), -F)
    }

    /// Nearest `f32`, ties to even.
    pub fn to_f32(self) -> f32 {
        scale_by_pow2(f64::from(self.raw.to_f32()), -F) as f32
    }

    /// Converts to another format, truncating toward zero.
    pub fn cast<R2: RawInt, const I2: i32, const F2: i32>(self) -> FixedResult<Fixed<R2, I2, F2>> {
        self.cast_with::<Checked, R2, I2, F2>()
    }

    pub fn cast_with<P: OverflowPolicy, R2: RawInt, const I2: i32, const F2: i32>(
        self,
    ) -> P::Output<Fixed<R2, I2, F2>> {
        self.cast_rounded_with::<P, R2, I2, F2>(Rounding::TowardZero)
    }

    pub fn cast_rounded_with<P: OverflowPolicy, R2: RawInt, const I2: i32, const F2: i32>(
        self,
        rounding: Rounding,
    ) -> P::Output<Fixed<R2, I2, F2>> {
        let target = Fixed::<R2, I2, F2>::FORMAT;
        P::resolve(Fixed::<R2, I2, F2>::settle_wide(rescale(
            self.raw.widen(),
            F,
            &target,
            rounding,
        )))
    }
}

impl<R: RawInt, const I: i32, const F: i32> Representable for Fixed<R, I, F> {
    fn format() -> FixedFormat {
        Self::FORMAT
    }

    fn lowest() -> Self {
        Fixed::lowest()
    }

    fn highest() -> Self {
        Fixed::highest()
    }
}
