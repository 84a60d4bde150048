//! Native integer storage for fixed-point raw values.
//!
//! Every fixed-point value stores its raw integer in one of the ten native
//! integer types. [`RawInt`] exposes the handful of overflow-aware
//! operations the arithmetic core needs, so the algorithms in this crate are
//! written once and monomorphized for each storage width.

pub mod division;
pub mod primitives;
pub mod wide;

pub use division::{DivisionOutcome, divide};
pub use primitives::{add, shift_left, shift_right, sub};
pub use wide::{
    DoubleWord, Wide, split_multiply, split_multiply_signed, wide_multiply,
};

use rand::distr::uniform::SampleUniform;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, Not};

/// A native integer usable as fixed-point storage.
pub trait RawInt:
    Copy
    + Debug
    + Display
    + Default
    + Eq
    + Ord
    + Hash
    + Send
    + Sync
    + 'static
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + SampleUniform
{
    /// The unsigned integer of the same width.
    type Unsigned: RawInt<Unsigned = Self::Unsigned>;

    const BITS: u32;
    const SIGNED: bool;
    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;

    fn overflowing_add(self, rhs: Self) -> (Self, bool);
    fn overflowing_sub(self, rhs: Self) -> (Self, bool);
    fn overflowing_neg(self) -> (Self, bool);

    /// Left shift; `n` must be below `BITS`.
    fn wrapping_shl(self, n: u32) -> Self;

    /// Right shift (arithmetic for signed types); `n` must be below `BITS`.
    fn wrapping_shr(self, n: u32) -> Self;

    fn leading_zeros(self) -> u32;
    fn unsigned_abs(self) -> Self::Unsigned;

    /// Reinterprets the bits as the unsigned type of the same width.
    fn to_unsigned(self) -> Self::Unsigned;

    /// Reinterprets unsigned bits as `Self`.
    fn from_unsigned(bits: Self::Unsigned) -> Self;

    /// Exact double-width product as `(low, high)`.
    fn wide_mul(self, rhs: Self) -> (Self::Unsigned, Self);

    /// Sign- or zero-extends into the 256-bit carrier.
    fn widen(self) -> Wide;

    /// Returns the value of `wide` if it fits in `Self`.
    fn narrow(wide: Wide) -> Option<Self>;

    /// The low `BITS` bits of `wide`.
    fn truncate(wide: Wide) -> Self;

    /// Nearest `f64` (ties to even).
    fn to_f64(self) -> f64;

    /// Nearest `f32` (ties to even).
    fn to_f32(self) -> f32;

    #[inline]
    fn is_negative(self) -> bool {
        Self::SIGNED && self < Self::ZERO
    }
}

macro_rules! raw_int_sign {
    (signed, abs, $t:ty, $v:expr) => {
        <$t>::unsigned_abs($v)
    };
    (unsigned, abs, $t:ty, $v:expr) => {
        $v
    };
    (signed, widen, $t:ty, $v:expr) => {{
        let value = $v as i128;
        Wide::new(value as u128, value >> 127)
    }};
    (unsigned, widen, $t:ty, $v:expr) => {
        Wide::new($v as u128, 0)
    };
    (signed, narrow, $t:ty, $w:expr) => {{
        let wide = $w;
        let value = wide.low as i128;
        let fits = wide.high == value >> 127
            && value >= <$t>::MIN as i128
            && value <= <$t>::MAX as i128;
        fits.then_some(value as $t)
    }};
    (unsigned, narrow, $t:ty, $w:expr) => {{
        let wide = $w;
        let fits = wide.high == 0 && wide.low <= <$t>::MAX as u128;
        fits.then_some(wide.low as $t)
    }};
}

macro_rules! raw_int_mul {
    (signed, native, $t:ty, $u:ty, $a:expr, $b:expr) => {{
        let product = ($a as i128) * ($b as i128);
        (product as $u, (product >> <$t>::BITS) as $t)
    }};
    (unsigned, native, $t:ty, $u:ty, $a:expr, $b:expr) => {{
        let product = ($a as u128) * ($b as u128);
        (product as $u, (product >> <$t>::BITS) as $t)
    }};
    (signed, split, $t:ty, $u:ty, $a:expr, $b:expr) => {
        split_multiply_signed($a, $b)
    };
    (unsigned, split, $t:ty, $u:ty, $a:expr, $b:expr) => {
        split_multiply($a, $b)
    };
}

macro_rules! impl_raw_int {
    ($($t:ty => $u:ty, $sign:ident, $mul:ident;)*) => {$(
        impl RawInt for $t {
            type Unsigned = $u;

            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = <$t>::MIN != 0;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                <$t>::overflowing_add(self, rhs)
            }

            #[inline]
            fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
                <$t>::overflowing_sub(self, rhs)
            }

            #[inline]
            fn overflowing_neg(self) -> (Self, bool) {
                <$t>::overflowing_neg(self)
            }

            #[inline]
            fn wrapping_shl(self, n: u32) -> Self {
                debug_assert!(n < <$t>::BITS);
                self << n
            }

            #[inline]
            fn wrapping_shr(self, n: u32) -> Self {
                debug_assert!(n < <$t>::BITS);
                self >> n
            }

            #[inline]
            fn leading_zeros(self) -> u32 {
                <$t>::leading_zeros(self)
            }

            #[inline]
            fn unsigned_abs(self) -> $u {
                raw_int_sign!($sign, abs, $t, self)
            }

            #[inline]
            fn to_unsigned(self) -> $u {
                self as $u
            }

            #[inline]
            fn from_unsigned(bits: $u) -> Self {
                bits as $t
            }

            #[inline]
            fn wide_mul(self, rhs: Self) -> ($u, Self) {
                raw_int_mul!($sign, $mul, $t, $u, self, rhs)
            }

            #[inline]
            fn widen(self) -> Wide {
                raw_int_sign!($sign, widen, $t, self)
            }

            #[inline]
            fn narrow(wide: Wide) -> Option<Self> {
                raw_int_sign!($sign, narrow, $t, wide)
            }

            #[inline]
            fn truncate(wide: Wide) -> Self {
                wide.low as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn to_f32(self) -> f32 {
                self as f32
            }
        }
    )*};
}

impl_raw_int! {
    i8 => u8, signed, native;
    i16 => u16, signed, native;
    i32 => u32, signed, native;
    i64 => u64, signed, native;
    i128 => u128, signed, split;
    u8 => u8, unsigned, native;
    u16 => u16, unsigned, native;
    u32 => u32, unsigned, native;
    u64 => u64, unsigned, native;
    u128 => u128, unsigned, split;
}
