//! Double-width integers and exact multiplication.
//!
//! A [`DoubleWord<R>`] holds a `2 * R::BITS` two's complement integer as a
//! `(low, high)` pair of native words. It is the exact result type of
//! [`wide_multiply`] and the carrier every rounding shift operates on.
//! [`Wide`] (`DoubleWord<i128>`) is wide enough to hold any native integer,
//! which makes it the common ground for casts between storage types.

use super::RawInt;
use super::primitives::{add, shift_right};
use std::cmp::Ordering;

/// 256-bit signed carrier; every native integer widens into it losslessly.
pub type Wide = DoubleWord<i128>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoubleWord<R: RawInt> {
    pub low: R::Unsigned,
    pub high: R,
}

impl<R: RawInt> DoubleWord<R> {
    pub const BITS: u32 = 2 * R::BITS;
    pub const ZERO: Self = Self::new(<R::Unsigned as RawInt>::ZERO, R::ZERO);
    pub const ONE: Self = Self::new(<R::Unsigned as RawInt>::ONE, R::ZERO);

    pub const fn new(low: R::Unsigned, high: R) -> Self {
        Self { low, high }
    }

    /// Sign- or zero-extends a single word.
    pub fn from_narrow(value: R) -> Self {
        Self::new(value.to_unsigned(), sign_fill(value.is_negative()))
    }

    /// `magnitude` with the given sign.
    pub fn from_magnitude(magnitude: R::Unsigned, negative: bool) -> Self {
        let value = Self::new(magnitude, R::ZERO);
        if negative { value.wrapping_neg() } else { value }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.high.is_negative()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// The value as a single word, if it fits.
    pub fn narrow(self) -> Option<R> {
        let value = self.truncate();
        (Self::from_narrow(value) == self).then_some(value)
    }

    /// The low word reinterpreted as `R`, discarding the high word.
    #[inline]
    pub fn truncate(self) -> R {
        R::from_unsigned(self.low)
    }

    pub fn wrapping_add(self, rhs: Self) -> Self {
        let (low, carry) = add(self.low, rhs.low, false);
        let (high, _) = add(self.high, rhs.high, carry);
        Self::new(low, high)
    }

    pub fn wrapping_neg(self) -> Self {
        Self::new(!self.low, !self.high).wrapping_add(Self::ONE)
    }

    /// Right shift rounding toward negative infinity; total for any `n`.
    pub fn shr(self, n: u32) -> Self {
        let width = R::BITS;
        if n == 0 {
            return self;
        }
        if n >= Self::BITS {
            let fill = sign_fill::<R>(self.is_negative());
            return Self::new(fill.to_unsigned(), fill);
        }
        if n >= width {
            let low = shift_right(self.high, n - width).to_unsigned();
            return Self::new(low, sign_fill(self.is_negative()));
        }
        let low =
            self.low.wrapping_shr(n) | self.high.to_unsigned().wrapping_shl(width - n);
        Self::new(low, self.high.wrapping_shr(n))
    }

    /// Left shift, flagging whether shifting back fails to restore `self`.
    pub fn shl(self, n: u32) -> (Self, bool) {
        let width = R::BITS;
        if n == 0 {
            return (self, false);
        }
        if n >= Self::BITS {
            return (Self::ZERO, !self.is_zero());
        }
        let shifted = if n >= width {
            Self::new(
                <R::Unsigned as RawInt>::ZERO,
                R::from_unsigned(self.low.wrapping_shl(n - width)),
            )
        } else {
            let carried = self.low.wrapping_shr(width - n);
            Self::new(
                self.low.wrapping_shl(n),
                R::from_unsigned(self.high.to_unsigned().wrapping_shl(n) | carried),
            )
        };
        (shifted, shifted.shr(n) != self)
    }

    /// Whether any of the `n` least significant bits is set.
    pub fn low_bits_nonzero(&self, n: u32) -> bool {
        let width = R::BITS;
        if n == 0 {
            return false;
        }
        if n >= Self::BITS {
            return !self.is_zero();
        }
        let zero = <R::Unsigned as RawInt>::ZERO;
        if n <= width {
            return self.low & low_mask::<R::Unsigned>(n) != zero;
        }
        self.low != zero || self.high.to_unsigned() & low_mask(n - width) != zero
    }
}

impl<R: RawInt> PartialOrd for DoubleWord<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: RawInt> Ord for DoubleWord<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.high.cmp(&other.high).then(self.low.cmp(&other.low))
    }
}

impl<R: RawInt> Default for DoubleWord<R> {
    fn default() -> Self {
        Self::ZERO
    }
}

#[inline]
fn sign_fill<R: RawInt>(negative: bool) -> R {
    if negative { !R::ZERO } else { R::ZERO }
}

/// Mask of the `bits` lowest bits, `1 <= bits <= U::BITS`.
#[inline]
fn low_mask<U: RawInt>(bits: u32) -> U {
    U::MAX.wrapping_shr(U::BITS - bits)
}

/// Exact double-width product of two native words.
#[inline]
pub fn wide_multiply<R: RawInt>(a: R, b: R) -> DoubleWord<R> {
    let (low, high) = a.wide_mul(b);
    DoubleWord::new(low, high)
}

const HALF: u32 = 64;
const HALF_MASK: u128 = u64::MAX as u128;

/// Full 256-bit product of two `u128` values, as `(low, high)`.
///
/// Splits both operands into 64-bit halves and combines the four partial
/// products, propagating the carries out of the middle column by hand.
pub fn split_multiply(a: u128, b: u128) -> (u128, u128) {
    let (a_lo, a_hi) = (a & HALF_MASK, a >> HALF);
    let (b_lo, b_hi) = (b & HALF_MASK, b >> HALF);

    let lo_lo = a_lo * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_lo = a_hi * b_lo;
    let hi_hi = a_hi * b_hi;

    // At most 3 * (2^64 - 1), no overflow.
    let middle = (lo_lo >> HALF) + (lo_hi & HALF_MASK) + (hi_lo & HALF_MASK);

    let low = (lo_lo & HALF_MASK) | (middle << HALF);
    let high = hi_hi + (lo_hi >> HALF) + (hi_lo >> HALF) + (middle >> HALF);
    (low, high)
}

/// Full 256-bit two's complement product of two `i128` values.
///
/// Uses the unsigned product and subtracts the other operand from the high
/// word once per negative input.
pub fn split_multiply_signed(a: i128, b: i128) -> (u128, i128) {
    let (low, mut high) = split_multiply(a as u128, b as u128);
    if a < 0 {
        high = high.wrapping_sub(b as u128);
    }
    if b < 0 {
        high = high.wrapping_sub(a as u128);
    }
    (low, high as i128)
}
