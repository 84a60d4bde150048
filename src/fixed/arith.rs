use super::{Fixed, Outcome};
use crate::errors::{ErrorKind, Fault, FixedResult};
use crate::int::{RawInt, Wide};
use crate::policy::{Checked, OverflowPolicy, Panicking, Saturating, Wrapping};
use crate::rounding::{Rounding, div_round, mul_round};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

impl<R: RawInt, const I: i32, const F: i32> Fixed<R, I, F> {
    fn add_exact(self, rhs: Self) -> Outcome<Self> {
        let (sum, overflow) = self.raw.overflowing_add(rhs.raw);
        let kind = ErrorKind::out_of_range(rhs.raw.is_negative());
        if overflow {
            return Err(Fault::new(kind, Some(Self::from_bits(sum))));
        }
        Self::fit(sum, kind)
    }

    fn sub_exact(self, rhs: Self) -> Outcome<Self> {
        let (difference, overflow) = self.raw.overflowing_sub(rhs.raw);
        let kind = ErrorKind::out_of_range(!rhs.raw.is_negative());
        if overflow {
            return Err(Fault::new(kind, Some(Self::from_bits(difference))));
        }
        Self::fit(difference, kind)
    }

    fn neg_exact(self) -> Outcome<Self> {
        // Only the lowest signed value or a nonzero unsigned value fails.
        let (negated, overflow) = self.raw.overflowing_neg();
        let kind = ErrorKind::out_of_range(!R::SIGNED);
        if overflow {
            return Err(Fault::new(kind, Some(Self::from_bits(negated))));
        }
        Self::fit(negated, kind)
    }

    fn abs_exact(self) -> Outcome<Self> {
        if self.is_negative() {
            self.neg_exact()
        } else {
            Ok(self)
        }
    }

    pub fn add_with<P: OverflowPolicy>(self, rhs: Self) -> P::Output<Self> {
        P::resolve(self.add_exact(rhs))
    }

    pub fn sub_with<P: OverflowPolicy>(self, rhs: Self) -> P::Output<Self> {
        P::resolve(self.sub_exact(rhs))
    }

    pub fn neg_with<P: OverflowPolicy>(self) -> P::Output<Self> {
        P::resolve(self.neg_exact())
    }

    pub fn abs_with<P: OverflowPolicy>(self) -> P::Output<Self> {
        P::resolve(self.abs_exact())
    }

    /// Adds one unit in the last place.
    pub fn increment_with<P: OverflowPolicy>(self) -> P::Output<Self> {
        P::resolve(self.step(Wide::ONE))
    }

    /// Subtracts one unit in the last place.
    pub fn decrement_with<P: OverflowPolicy>(self) -> P::Output<Self> {
        P::resolve(self.step(Wide::ONE.wrapping_neg()))
    }

    // A one-digit signed format cannot hold `+1` itself.
    fn step(self, delta: Wide) -> Outcome<Self> {
        let raw = self.raw.widen().wrapping_add(delta);
        Self::settle_wide(Self::FORMAT.classify(raw))
    }

    pub fn mul_with<P: OverflowPolicy>(self, rhs: Self, rounding: Rounding) -> P::Output<Self> {
        P::resolve(Self::settle(mul_round(self.raw, rhs.raw, F, rounding)))
    }

    /// Division; a zero divisor fails with `NotANumber` for `0 / 0` and by the
    /// dividend's sign otherwise.
    pub fn div_with<P: OverflowPolicy>(self, rhs: Self, rounding: Rounding) -> P::Output<Self> {
        P::resolve(Self::settle(div_round(self.raw, rhs.raw, F, rounding)))
    }

    pub fn mul_zero(self, rhs: Self) -> FixedResult<Self> {
        self.mul_with::<Checked>(rhs, Rounding::TowardZero)
    }

    pub fn mul_up(self, rhs: Self) -> FixedResult<Self> {
        self.mul_with::<Checked>(rhs, Rounding::Up)
    }

    pub fn mul_down(self, rhs: Self) -> FixedResult<Self> {
        self.mul_with::<Checked>(rhs, Rounding::Down)
    }

    pub fn div_zero(self, rhs: Self) -> FixedResult<Self> {
        self.div_with::<Checked>(rhs, Rounding::TowardZero)
    }

    pub fn div_up(self, rhs: Self) -> FixedResult<Self> {
        self.div_with::<Checked>(rhs, Rounding::Up)
    }

    pub fn div_down(self, rhs: Self) -> FixedResult<Self> {
        self.div_with::<Checked>(rhs, Rounding::Down)
    }
}

/// `checked_*`, `saturating_*` and `wrapping_*` shorthands. Multiplication
/// and division truncate toward zero.
macro_rules! policy_shorthands {
    ($(($checked:ident, $saturating:ident, $wrapping:ident) => |$($arg:ident),*| $with:ident $(, $rounding:expr)?;)*) => {
        impl<R: RawInt, const I: i32, const F: i32> Fixed<R, I, F> {$(
            pub fn $checked(self $(, $arg: Self)*) -> FixedResult<Self> {
                self.$with::<Checked>($($arg,)* $($rounding)?)
            }

            pub fn $saturating(self $(, $arg: Self)*) -> Self {
                self.$with::<Saturating>($($arg,)* $($rounding)?)
            }

            pub fn $wrapping(self $(, $arg: Self)*) -> Self {
                self.$with::<Wrapping>($($arg,)* $($rounding)?)
            }
        )*}
    };
}

policy_shorthands! {
    (checked_add, saturating_add, wrapping_add) => |rhs| add_with;
    (checked_sub, saturating_sub, wrapping_sub) => |rhs| sub_with;
    (checked_mul, saturating_mul, wrapping_mul) => |rhs| mul_with, Rounding::TowardZero;
    (checked_div, saturating_div, wrapping_div) => |rhs| div_with, Rounding::TowardZero;
    (checked_neg, saturating_neg, wrapping_neg) => | | neg_with;
    (checked_abs, saturating_abs, wrapping_abs) => | | abs_with;
    (checked_increment, saturating_increment, wrapping_increment) => | | increment_with;
    (checked_decrement, saturating_decrement, wrapping_decrement) => | | decrement_with;
}

macro_rules! impl_binary_op {
    ($($op:ident, $method:ident, $assign:ident, $assign_method:ident => $with:ident $(, $rounding:expr)?;)*) => {$(
        impl<R: RawInt, const I: i32, const F: i32> $op for Fixed<R, I, F> {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                self.$with::<Panicking>(rhs $(, $rounding)?)
            }
        }

        impl<R: RawInt, const I: i32, const F: i32> $assign for Fixed<R, I, F> {
            fn $assign_method(&mut self, rhs: Self) {
                *self = self.$with::<Panicking>(rhs $(, $rounding)?);
            }
        }
    )*};
}

impl_binary_op! {
    Add, add, AddAssign, add_assign => add_with;
    Sub, sub, SubAssign, sub_assign => sub_with;
    Mul, mul, MulAssign, mul_assign => mul_with, Rounding::TowardZero;
    Div, div, DivAssign, div_assign => div_with, Rounding::TowardZero;
}

impl<R: RawInt, const I: i32, const F: i32> Neg for Fixed<R, I, F> {
    type Output = Self;

    fn neg(self) -> Self {
        self.neg_with::<Panicking>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FixedError;

    type Q16_16 = Fixed<i32, 16, 16>;
    type Q2_2 = Fixed<i8, 2, 2>;
    type UQ4_4 = Fixed<u8, 4, 4>;

    fn q(x: f64) -> Q16_16 {
        Q16_16::from_f64(x).unwrap()
    }

    #[test]
    fn operators() {
        assert_eq!(q(1.0) + q(2.0), q(3.0));
        assert_eq!(q(1.0) - q(2.5), q(-1.5));
        assert_eq!(q(1.5) * q(-2.0), q(-3.0));
        assert_eq!(q(3.0) / q(-4.0), q(-0.75));
        assert_eq!(-q(0.25), q(-0.25));

        let mut value = q(1.0);
        value += q(0.5);
        value *= q(4.0);
        value -= q(1.0);
        value /= q(2.0);
        assert_eq!(value, q(2.5));
    }

    #[test]
    #[should_panic(expected = "Overflow")]
    fn operator_overflow_panics() {
        let _ = Q16_16::highest() + Q16_16::epsilon().unwrap();
    }

    #[test]
    #[should_panic(expected = "Not a number")]
    fn operator_zero_by_zero_panics() {
        let _ = Q16_16::ZERO / Q16_16::ZERO;
    }

    #[test]
    fn narrow_format_add_overflow() {
        // 1.75 + 0.25 = 2.0 is just past the top of Q2.2.
        let a = Q2_2::from_raw(7i8).unwrap();
        let b = Q2_2::from_raw(1i8).unwrap();
        assert_eq!(
            a.checked_add(b),
            Err(FixedError::Overflow { format: Q2_2::FORMAT })
        );
        assert_eq!(a.wrapping_add(b).raw(), -8);
        assert_eq!(a.saturating_add(b), Q2_2::highest());

        let low = Q2_2::lowest();
        assert_eq!(low.checked_sub(b).unwrap_err().kind(), Some(ErrorKind::Underflow));
        assert_eq!(low.wrapping_sub(b).raw(), 7);
        assert_eq!(low.checked_add(Q2_2::from_bits(-1)).unwrap_err().kind(), Some(ErrorKind::Underflow));
        assert_eq!(low.checked_sub(Q2_2::from_bits(-1)).map(Fixed::raw), Ok(-7));
    }

    #[test]
    fn native_add_overflow() {
        let max = Q16_16::highest();
        let eps = Q16_16::epsilon().unwrap();
        assert_eq!(max.checked_add(eps).unwrap_err().kind(), Some(ErrorKind::Overflow));
        assert_eq!(max.wrapping_add(eps), Q16_16::lowest());
        assert_eq!(Q16_16::lowest().saturating_sub(q(1.0)), Q16_16::lowest());
    }

    #[test]
    fn unsigned_subtraction_underflows() {
        let one = UQ4_4::from_int(1u8).unwrap();
        let two = UQ4_4::from_int(2u8).unwrap();
        assert_eq!(one.checked_sub(two).unwrap_err().kind(), Some(ErrorKind::Underflow));
        assert_eq!(one.saturating_sub(two), UQ4_4::ZERO);
        assert_eq!(one.wrapping_sub(two).raw(), 0xF0);
    }

    #[test]
    fn negation_and_abs() {
        assert_eq!(Q2_2::lowest().checked_neg().unwrap_err().kind(), Some(ErrorKind::Overflow));
        assert_eq!(Q2_2::lowest().saturating_abs(), Q2_2::highest());
        assert_eq!(Q2_2::lowest().wrapping_neg(), Q2_2::lowest());
        assert_eq!(q(-2.0).checked_abs(), Ok(q(2.0)));
        assert_eq!(q(2.0).checked_abs(), Ok(q(2.0)));

        let one = UQ4_4::from_int(1u8).unwrap();
        assert_eq!(one.checked_neg().unwrap_err().kind(), Some(ErrorKind::Underflow));
        assert_eq!(UQ4_4::ZERO.checked_neg(), Ok(UQ4_4::ZERO));
        assert_eq!(one.wrapping_neg().raw(), 0xF0);
    }

    #[test]
    fn increment_and_decrement() {
        assert_eq!(q(1.0).checked_increment().map(Fixed::raw), Ok(0x1_0001));
        assert_eq!(q(1.0).checked_decrement().map(Fixed::raw), Ok(0xFFFF));
        assert_eq!(Q2_2::highest().saturating_increment(), Q2_2::highest());
        assert_eq!(Q2_2::lowest().wrapping_decrement(), Q2_2::highest());
        assert_eq!(
            UQ4_4::ZERO.checked_decrement().unwrap_err().kind(),
            Some(ErrorKind::Underflow)
        );
    }

    #[test]
    fn single_digit_signed_steps() {
        // Only the sign bit: raws -1 and 0.
        type Sign = Fixed<i8, 1, 0>;
        assert_eq!(Sign::ZERO.checked_increment().unwrap_err().kind(), Some(ErrorKind::Overflow));
        assert_eq!(Sign::ZERO.checked_decrement().map(Fixed::raw), Ok(-1));
        assert_eq!(Sign::lowest().checked_increment(), Ok(Sign::ZERO));
        assert_eq!(Sign::lowest().checked_decrement().unwrap_err().kind(), Some(ErrorKind::Underflow));
        assert_eq!(Sign::ZERO.wrapping_increment().raw(), -1);
        assert_eq!(Sign::ZERO.saturating_increment(), Sign::ZERO);

        type Half = Fixed<i16, -5, 6>;
        assert_eq!(Half::ZERO.checked_increment().unwrap_err().kind(), Some(ErrorKind::Overflow));
        assert_eq!(Half::ZERO.checked_decrement().map(Fixed::raw), Ok(-1));
    }

    #[test]
    fn multiplication_rounding() {
        let tiny = Q16_16::from_raw(1i32).unwrap();
        let half = q(0.5);
        assert_eq!(tiny.mul_zero(half).map(Fixed::raw), Ok(0));
        assert_eq!(tiny.mul_up(half).map(Fixed::raw), Ok(1));
        assert_eq!(tiny.mul_down(half).map(Fixed::raw), Ok(0));
        assert_eq!((-tiny).mul_down(half).map(Fixed::raw), Ok(-1));
        assert_eq!((-tiny).mul_zero(half).map(Fixed::raw), Ok(0));
        assert_eq!((-tiny).mul_up(half).map(Fixed::raw), Ok(0));
    }

    #[test]
    fn multiplication_overflow() {
        let big = q(300.0);
        assert_eq!(big.checked_mul(big).unwrap_err().kind(), Some(ErrorKind::Overflow));
        assert_eq!(big.checked_mul(-big).unwrap_err().kind(), Some(ErrorKind::Underflow));
        assert_eq!(big.saturating_mul(-big), Q16_16::lowest());
        // 90000 * 2^16 wraps modulo 2^32.
        let wrapped = big.wrapping_mul(big).raw();
        assert_eq!(wrapped, (90_000i64 << 16) as i32);
    }

    #[test]
    fn division_rounding() {
        let one = q(1.0);
        let three = q(3.0);
        assert_eq!(one.div_zero(three).map(Fixed::raw), Ok(0x5555));
        assert_eq!(one.div_up(three).map(Fixed::raw), Ok(0x5556));
        assert_eq!(one.div_down(three).map(Fixed::raw), Ok(0x5555));
        assert_eq!((-one).div_down(three).map(Fixed::raw), Ok(-0x5556));
        assert_eq!((-one).div_up(three).map(Fixed::raw), Ok(-0x5555));
    }

    #[test]
    fn division_by_zero() {
        let zero = Q16_16::ZERO;
        assert!(matches!(zero.checked_div(zero), Err(FixedError::NotANumber { .. })));
        assert!(matches!(q(1.0).checked_div(zero), Err(FixedError::Overflow { .. })));
        assert!(matches!(q(-1.0).checked_div(zero), Err(FixedError::Underflow { .. })));
        assert_eq!(q(1.0).saturating_div(zero), Q16_16::highest());
        assert_eq!(q(-1.0).saturating_div(zero), Q16_16::lowest());
    }

    #[test]
    #[should_panic(expected = "Not a number")]
    fn saturating_zero_by_zero_panics() {
        Q16_16::ZERO.saturating_div(Q16_16::ZERO);
    }

    #[test]
    fn division_overflow() {
        let big = q(30000.0);
        let small = q(0.01);
        assert_eq!(big.checked_div(small).unwrap_err().kind(), Some(ErrorKind::Overflow));
        assert_eq!(big.checked_div(-small).unwrap_err().kind(), Some(ErrorKind::Underflow));
        assert_eq!(Q16_16::lowest().checked_div(q(-1.0)).unwrap_err().kind(), Some(ErrorKind::Overflow));
    }

    #[test]
    fn narrow_storage_multiplication() {
        // Q2.2: 1.5 * 1.25 = 1.875 rounds to 1.75 toward zero and 2.0 up.
        let a = Q2_2::from_f64(1.5).unwrap();
        let b = Q2_2::from_f64(1.25).unwrap();
        assert_eq!(a.mul_zero(b).map(Fixed::raw), Ok(7));
        assert_eq!(a.mul_up(b).unwrap_err().kind(), Some(ErrorKind::Overflow));
        assert_eq!(a.mul_with::<Wrapping>(b, Rounding::Up).raw(), -8);
    }
}
