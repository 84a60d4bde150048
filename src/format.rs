//! Fixed-point format descriptors.
//!
//! A [`FixedFormat`] says how a storage integer encodes a real number: the
//! value is `raw × 2^-fractional_bits`, and `raw` is confined to
//! `integer_bits + fractional_bits` bits of a native integer. For signed
//! formats the sign bit is one of the integer bits, so a signed 16.16 format
//! fills an `i32`.
//!
//! Either bit count may be negative. Negative fractional bits make the unit
//! of `raw` a power of two above one; negative integer bits keep every value
//! strictly inside `(-1, 1)`.

use crate::errors::{ErrorKind, Fault, FixedError, FixedResult};
use crate::int::Wide;
use std::fmt;

/// Largest magnitude accepted for either bit count.
pub const MAX_BIT_COUNT: i32 = 1 << 14;

/// Native integer kinds usable as storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
}

impl StorageKind {
    /// The narrowest native integer holding `bits` significant bits.
    pub const fn narrowest(bits: u32, signed: bool) -> Option<Self> {
        let kind = match (bits, signed) {
            (1..=8, true) => Self::I8,
            (9..=16, true) => Self::I16,
            (17..=32, true) => Self::I32,
            (33..=64, true) => Self::I64,
            (65..=128, true) => Self::I128,
            (1..=8, false) => Self::U8,
            (9..=16, false) => Self::U16,
            (17..=32, false) => Self::U32,
            (33..=64, false) => Self::U64,
            (65..=128, false) => Self::U128,
            _ => return None,
        };
        Some(kind)
    }

    pub const fn bits(self) -> u32 {
        match self {
            Self::I8 | Self::U8 => 8,
            Self::I16 | Self::U16 => 16,
            Self::I32 | Self::U32 => 32,
            Self::I64 | Self::U64 => 64,
            Self::I128 | Self::U128 => 128,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128
        )
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_signed() { 'i' } else { 'u' };
        write!(f, "{}{}", sign, self.bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedFormat {
    integer_bits: i32,
    fractional_bits: i32,
    storage: StorageKind,
}

impl FixedFormat {
    /// Builds a format, panicking (at compile time in const contexts) when
    /// the combination is invalid.
    pub const fn of(
        integer_bits: i32,
        fractional_bits: i32,
        storage_width: u32,
        signed: bool,
    ) -> Self {
        match Self::validate(integer_bits, fractional_bits, storage_width, signed) {
            Ok(format) => format,
            Err(reason) => panic!("{}", reason),
        }
    }

    /// Runtime counterpart of [`FixedFormat::of`].
    pub fn try_new(
        integer_bits: i32,
        fractional_bits: i32,
        storage_width: u32,
        signed: bool,
    ) -> FixedResult<Self> {
        Self::validate(integer_bits, fractional_bits, storage_width, signed).map_err(
            |reason| {
                log::debug!(
                    "rejected format {integer_bits}.{fractional_bits} in \
                     {storage_width} bits: {reason}"
                );
                FixedError::InvalidFormat {
                    message: reason.to_string(),
                }
            },
        )
    }

    /// A format stored in the narrowest native integer that fits it.
    pub fn for_bits(
        integer_bits: i32,
        fractional_bits: i32,
        signed: bool,
    ) -> FixedResult<Self> {
        let digits = integer_bits.saturating_add(fractional_bits);
        let storage = u32::try_from(digits)
            .ok()
            .and_then(|bits| StorageKind::narrowest(bits, signed))
            .ok_or_else(|| FixedError::InvalidFormat {
                message: format!("no native storage for {digits} bits"),
            })?;
        Self::try_new(integer_bits, fractional_bits, storage.bits(), signed)
    }

    const fn validate(
        integer_bits: i32,
        fractional_bits: i32,
        storage_width: u32,
        signed: bool,
    ) -> Result<Self, &'static str> {
        if integer_bits.unsigned_abs() > MAX_BIT_COUNT as u32
            || fractional_bits.unsigned_abs() > MAX_BIT_COUNT as u32
        {
            return Err("bit counts must lie within [-16384, 16384]");
        }
        let digits = integer_bits + fractional_bits;
        if digits <= 0 {
            return Err("integer_bits + fractional_bits must be positive");
        }
        let storage = match StorageKind::narrowest(storage_width, signed) {
            Some(kind) if kind.bits() == storage_width => kind,
            _ => return Err("storage width must be 8, 16, 32, 64 or 128"),
        };
        if digits as u32 > storage_width {
            return Err("integer_bits + fractional_bits exceeds the storage width");
        }
        Ok(Self {
            integer_bits,
            fractional_bits,
            storage,
        })
    }

    pub const fn integer_bits(&self) -> i32 {
        self.integer_bits
    }

    pub const fn fractional_bits(&self) -> i32 {
        self.fractional_bits
    }

    pub const fn storage(&self) -> StorageKind {
        self.storage
    }

    pub const fn storage_width(&self) -> u32 {
        self.storage.bits()
    }

    pub const fn is_signed(&self) -> bool {
        self.storage.is_signed()
    }

    /// Number of significant raw bits, sign included.
    pub const fn digits(&self) -> u32 {
        (self.integer_bits + self.fractional_bits) as u32
    }

    /// Smallest representable raw value.
    pub fn raw_min(&self) -> Wide {
        if self.is_signed() {
            Wide::ONE.shl(self.digits() - 1).0.wrapping_neg()
        } else {
            Wide::ZERO
        }
    }

    /// Largest representable raw value.
    pub fn raw_max(&self) -> Wide {
        let bits = if self.is_signed() {
            self.digits() - 1
        } else {
            self.digits()
        };
        Wide::ONE.shl(bits).0.wrapping_add(Wide::from_narrow(-1))
    }

    pub fn contains(&self, raw: Wide) -> bool {
        raw >= self.raw_min() && raw <= self.raw_max()
    }

    /// Keeps the low `digits` bits of `raw`, sign-extending signed formats.
    pub fn wrap(&self, raw: Wide) -> Wide {
        let spare = 128 - self.digits();
        if self.is_signed() {
            Wide::from_narrow(((raw.low << spare) as i128) >> spare)
        } else {
            Wide::new(raw.low & (u128::MAX >> spare), 0)
        }
    }

    /// Clamps `raw` into range.
    pub fn saturate(&self, raw: Wide) -> Wide {
        raw.clamp(self.raw_min(), self.raw_max())
    }

    /// Accepts `raw` if representable, otherwise classifies it by sign and
    /// records its wrapped value.
    pub fn classify(&self, raw: Wide) -> Result<Wide, Fault<Wide>> {
        if self.contains(raw) {
            Ok(raw)
        } else {
            Err(Fault::new(
                ErrorKind::out_of_range(raw.is_negative()),
                Some(self.wrap(raw)),
            ))
        }
    }
}

impl fmt::Display for FixedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.is_signed() { "Q" } else { "UQ" };
        write!(
            f,
            "{}{}.{} in {}",
            prefix, self.integer_bits, self.fractional_bits, self.storage
        )
    }
}
