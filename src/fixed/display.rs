use super::Fixed;
use crate::int::RawInt;
use std::fmt;

impl<R: RawInt, const I: i32, const F: i32> fmt::Display for Fixed<R, I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Width, precision and sign flags apply to the decimal rendering.
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl<R: RawInt, const I: i32, const F: i32> fmt::Debug for Fixed<R, I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed<{}>({}, raw = {})", Self::FORMAT, self.to_f64(), self.raw)
    }
}
