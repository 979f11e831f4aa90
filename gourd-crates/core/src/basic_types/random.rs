use std::fmt::Debug;
use std::ops::Range;
use std::ops::RangeInclusive;

use rand::Rng;
use rand::SeedableRng;

#[cfg(doc)]
use crate::branching::value_selection::InDomainRandom;
use crate::gourd_assert_moderate;

/// The source of randomness for the search, e.g. for [`InDomainRandom`] to pick a value of a
/// domain or for random variable selection.
///
/// Every generator which implements [`SeedableRng`] and [`Rng`] is a [`Random`]. For tests there
/// is a scripted implementation which hands out predetermined values in order, so that a test
/// can exercise a random policy deterministically.
pub trait Random: Debug {
    /// Generates a bool which is true with probability `probability`; panics if the probability
    /// does not lie in `[0, 1]`.
    ///
    /// ```rust
    /// # use rand::rngs::SmallRng;
    /// # use rand::SeedableRng;
    /// # use gourd_core::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// assert!(rng.generate_bool(1.0));
    /// assert!(!rng.generate_bool(0.0));
    /// ```
    fn generate_bool(&mut self, probability: f64) -> bool;

    /// Samples a usize uniformly from `[range.start, range.end)`.
    ///
    /// ```rust
    /// # use rand::rngs::SmallRng;
    /// # use rand::SeedableRng;
    /// # use gourd_core::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// let elements = vec!["a", "b", "c"];
    /// let selected_index = rng.generate_usize_in_range(0..elements.len());
    /// assert!(selected_index < elements.len());
    /// ```
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;

    /// Samples an i32 uniformly from `[start, end]`.
    fn generate_i32_in_range(&mut self, range: RangeInclusive<i32>) -> i32;
}

impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        gourd_assert_moderate!(
            (0.0..=1.0).contains(&probability),
            "It should hold that 0.0 <= {probability} <= 1.0"
        );
        self.gen_bool(probability)
    }

    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }

    fn generate_i32_in_range(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.gen_range(range)
    }
}
