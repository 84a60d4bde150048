use super::Fixed;
use crate::int::{RawInt, Wide};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Compares `a × 2^-a_fractional` with `b × 2^-b_fractional` exactly.
fn compare_scaled(a: Wide, a_fractional: i32, b: Wide, b_fractional: i32) -> Ordering {
    if a_fractional > b_fractional {
        return compare_scaled(b, b_fractional, a, a_fractional).reverse();
    }
    // Bring `a` to the finer resolution of `b`. A shift that leaves the
    // 256-bit carrier puts `a` beyond any 128-bit `b`.
    match a.shl((b_fractional - a_fractional) as u32) {
        (_, true) if a.is_negative() => Ordering::Less,
        (_, true) => Ordering::Greater,
        (scaled, false) => scaled.cmp(&b),
    }
}

impl<R: RawInt, const I: i32, const F: i32> Fixed<R, I, F> {
    /// Exact ordering against a value of any format.
    pub fn exact_cmp<R2: RawInt, const I2: i32, const F2: i32>(
        &self,
        other: &Fixed<R2, I2, F2>,
    ) -> Ordering {
        compare_scaled(self.raw.widen(), F, other.raw.widen(), F2)
    }
}

impl<R, R2, const I: i32, const F: i32, const I2: i32, const F2: i32>
    PartialEq<Fixed<R2, I2, F2>> for Fixed<R, I, F>
where
    R: RawInt,
    R2: RawInt,
{
    fn eq(&self, other: &Fixed<R2, I2, F2>) -> bool {
        self.exact_cmp(other) == Ordering::Equal
    }
}

impl<R: RawInt, const I: i32, const F: i32> Eq for Fixed<R, I, F> {}

impl<R, R2, const I: i32, const F: i32, const I2: i32, const F2: i32>
    PartialOrd<Fixed<R2, I2, F2>> for Fixed<R, I, F>
where
    R: RawInt,
    R2: RawInt,
{
    fn partial_cmp(&self, other: &Fixed<R2, I2, F2>) -> Option<Ordering> {
        Some(self.exact_cmp(other))
    }
}

impl<R: RawInt, const I: i32, const F: i32> Ord for Fixed<R, I, F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<R: RawInt, const I: i32, const F: i32> Hash for Fixed<R, I, F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}
