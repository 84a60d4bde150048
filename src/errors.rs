use crate::format::FixedFormat;
use std::fmt;
use thiserror::Error;

/// The three ways an operation can fail to produce a representable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The exact result is below the format's minimum.
    Underflow,
    /// The exact result is above the format's maximum.
    Overflow,
    /// `0 / 0`.
    NotANumber,
}

impl ErrorKind {
    /// The out-of-range kind for an exact result with the given sign.
    #[inline]
    pub fn out_of_range(negative: bool) -> Self {
        if negative { Self::Underflow } else { Self::Overflow }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underflow => write!(f, "underflow"),
            Self::Overflow => write!(f, "overflow"),
            Self::NotANumber => write!(f, "not a number"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixedError {
    #[error("Underflow: result is below the minimum of {format}")]
    Underflow { format: FixedFormat },

    #[error("Overflow: result is above the maximum of {format}")]
    Overflow { format: FixedFormat },

    #[error("Not a number: 0 / 0 has no value in {format}")]
    NotANumber { format: FixedFormat },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },
}

impl FixedError {
    pub fn new(kind: ErrorKind, format: FixedFormat) -> Self {
        match kind {
            ErrorKind::Underflow => Self::Underflow { format },
            ErrorKind::Overflow => Self::Overflow { format },
            ErrorKind::NotANumber => Self::NotANumber { format },
        }
    }

    /// The arithmetic kind, or `None` for format validation errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Underflow { .. } => Some(ErrorKind::Underflow),
            Self::Overflow { .. } => Some(ErrorKind::Overflow),
            Self::NotANumber { .. } => Some(ErrorKind::NotANumber),
            Self::InvalidFormat { .. } => None,
        }
    }
}

pub type FixedResult<T> = Result<T, FixedError>;

/// A failed computation as seen by the error policies.
///
/// `wrapped` is what the storage integer would hold after native
/// wraparound; it is `None` when no such value exists (division by zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault<T> {
    pub kind: ErrorKind,
    pub wrapped: Option<T>,
}

impl<T> Fault<T> {
    pub fn new(kind: ErrorKind, wrapped: Option<T>) -> Self {
        Self { kind, wrapped }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fault<U> {
        Fault {
            kind: self.kind,
            wrapped: self.wrapped.map(f),
        }
    }

    pub fn into_error(self, format: FixedFormat) -> FixedError {
        FixedError::new(self.kind, format)
    }
}
