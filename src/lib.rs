pub mod consts;
pub mod convert;
pub mod errors;
pub mod fixed;
pub mod format;
pub mod int;
pub mod policy;
pub mod random;
pub mod rounding;

pub use convert::FloatRounding;
pub use errors::{ErrorKind, FixedError, FixedResult};
pub use fixed::Fixed;
pub use format::{FixedFormat, StorageKind};
pub use int::RawInt;
pub use policy::{Checked, OverflowPolicy, Panicking, Representable, Saturating, Wrapping};
pub use rounding::Rounding;

// Helper macro to create format aliases from storage and bit counts
macro_rules! fixed_alias {
    ($name:ident, $storage:ty, $integer:expr, $fractional:expr) => {
        #[doc = concat!(
            "`", stringify!($integer), ".", stringify!($fractional),
            "` fixed-point in `", stringify!($storage), "`."
        )]
        pub type $name = Fixed<$storage, $integer, $fractional>;
    };
}

fixed_alias!(Q16_16, i32, 16, 16);
fixed_alias!(Q8_24, i32, 8, 24);
fixed_alias!(Q24_8, i32, 24, 8);
fixed_alias!(Q1_15, i16, 1, 15);
fixed_alias!(Q1_31, i32, 1, 31);
fixed_alias!(Q32_32, i64, 32, 32);
fixed_alias!(Q64_64, i128, 64, 64);
fixed_alias!(UQ16_16, u32, 16, 16);
fixed_alias!(UQ0_32, u32, 0, 32);
