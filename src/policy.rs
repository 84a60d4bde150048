//! Error policies.
//!
//! Every operation computes one `Result<T, Fault<T>>`; a policy decides what
//! the caller receives when it is a fault. The same computation therefore
//! backs the wrapping, saturating, checked and panicking flavours of each
//! operation.

use crate::errors::{ErrorKind, Fault, FixedResult};
use crate::format::FixedFormat;

/// A value type with a known format and bounds.
pub trait Representable: Copy {
    fn format() -> FixedFormat;
    fn lowest() -> Self;
    fn highest() -> Self;
}

macro_rules! impl_representable {
    ($($t:ty),* $(,)?) => {$(
        impl Representable for $t {
            fn format() -> FixedFormat {
                FixedFormat::of(<$t>::BITS as i32, 0, <$t>::BITS, <$t>::MIN != 0)
            }

            #[inline]
            fn lowest() -> Self {
                <$t>::MIN
            }

            #[inline]
            fn highest() -> Self {
                <$t>::MAX
            }
        }
    )*};
}

impl_representable!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

/// How a fault is turned into the value handed back to the caller.
pub trait OverflowPolicy {
    type Output<T>;

    fn resolve<T: Representable>(outcome: Result<T, Fault<T>>) -> Self::Output<T>;
}

/// Two's complement wraparound within the format's bits.
///
/// Division by zero has no wrapped value and panics, as native integer
/// division does.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wrapping;

/// Clamps to the nearest bound. `0 / 0` panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Saturating;

/// Returns a [`FixedResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Checked;

/// Panics with the error message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panicking;

impl OverflowPolicy for Wrapping {
    type Output<T> = T;

    fn resolve<T: Representable>(outcome: Result<T, Fault<T>>) -> T {
        match outcome {
            Ok(value) => value,
            Err(Fault {
                kind,
                wrapped: Some(value),
            }) => {
                log::trace!("{} in {}, wrapping", kind, T::format());
                value
            }
            Err(fault) => panic!("{}", fault.into_error(T::format())),
        }
    }
}

impl OverflowPolicy for Saturating {
    type Output<T> = T;

    fn resolve<T: Representable>(outcome: Result<T, Fault<T>>) -> T {
        let fault = match outcome {
            Ok(value) => return value,
            Err(fault) => fault,
        };
        log::trace!("{} in {}, saturating", fault.kind, T::format());
        match fault.kind {
            ErrorKind::Underflow => T::lowest(),
            ErrorKind::Overflow => T::highest(),
            ErrorKind::NotANumber => panic!("{}", fault.into_error(T::format())),
        }
    }
}

impl OverflowPolicy for Checked {
    type Output<T> = FixedResult<T>;

    fn resolve<T: Representable>(outcome: Result<T, Fault<T>>) -> FixedResult<T> {
        outcome.map_err(|fault| {
            let error = fault.into_error(T::format());
            log::debug!("{}", error);
            error
        })
    }
}

impl OverflowPolicy for Panicking {
    type Output<T> = T;

    fn resolve<T: Representable>(outcome: Result<T, Fault<T>>) -> T {
        match outcome {
            Ok(value) => value,
            Err(fault) => panic!("{}", fault.into_error(T::format())),
        }
    }
}
