//! Uniform random values.
//!
//! Sampling draws the raw integer, so every representable value of a format
//! is equally likely.

use crate::fixed::Fixed;
use crate::int::RawInt;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};

impl<R: RawInt, const I: i32, const F: i32> Distribution<Fixed<R, I, F>> for StandardUniform {
    fn sample<G: Rng + ?Sized>(&self, rng: &mut G) -> Fixed<R, I, F> {
        let low = Fixed::<R, I, F>::lowest().raw();
        let high = Fixed::<R, I, F>::highest().raw();
        Fixed::from_raw_unchecked(rng.random_range(low..=high))
    }
}

impl<R: RawInt, const I: i32, const F: i32> Fixed<R, I, F> {
    /// Samples a value uniformly from `[low, high]`.
    ///
    /// # Panics
    ///
    /// Panics if `low > high`.
    pub fn random_range<G: Rng + ?Sized>(rng: &mut G, low: Self, high: Self) -> Self {
        assert!(
            low <= high,
            "random_range: empty range [{low}, {high}]"
        );
        Self::from_raw_unchecked(rng.random_range(low.raw()..=high.raw()))
    }
}
