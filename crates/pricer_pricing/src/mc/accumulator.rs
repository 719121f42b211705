//! Running payoff statistics.
//!
//! [`PayoffAccumulator`] keeps count, mean and the sum of squared deviations
//! (Welford). Two accumulators combine with the pairwise formula of
//! Chan, Golub and LeVeque, so partitions simulated independently merge into
//! the same statistics a single pass would produce, up to rounding.

/// Streaming mean/variance of undiscounted payoffs.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PayoffAccumulator;
///
/// let mut left = PayoffAccumulator::new();
/// left.push(1.0);
/// left.push(2.0);
///
/// let mut right = PayoffAccumulator::new();
/// right.push(3.0);
///
/// left.merge(&right);
/// assert_eq!(left.count(), 3);
/// assert!((left.mean() - 2.0).abs() < 1e-15);
/// assert!((left.variance() - 1.0).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PayoffAccumulator {
    count: usize,
    mean: f64,
    m2: f64,
}

impl PayoffAccumulator {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one payoff sample.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let total = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / total;
        self.m2 += other.m2 + delta * delta * n_a * n_b / total;
        self.count += other.count;
    }

    /// Number of samples seen.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean (0 when empty).
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance (0 with fewer than two samples).
    #[inline]
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Standard error of the mean (0 when empty).
    #[inline]
    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.variance() / self.count as f64).sqrt()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty() {
        let acc = PayoffAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.mean(), 0.0);
        assert_eq!(acc.variance(), 0.0);
        assert_eq!(acc.std_error(), 0.0);
    }

    #[test]
    fn test_single_sample_has_zero_error() {
        let mut acc = PayoffAccumulator::new();
        acc.push(12.5);
        assert_eq!(acc.mean(), 12.5);
        assert_eq!(acc.std_error(), 0.0);
    }

    #[test]
    fn test_against_two_pass() {
        let data = [0.0, 3.5, 0.0, 12.25, 7.0, 0.0, 1.5, 20.0];
        let mut acc = PayoffAccumulator::new();
        data.iter().for_each(|&x| acc.push(x));

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

        assert_relative_eq!(acc.mean(), mean, epsilon = 1e-12);
        assert_relative_eq!(acc.variance(), var, epsilon = 1e-12);
        assert_relative_eq!(acc.std_error(), (var / n).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_merge_with_empty() {
        let mut acc = PayoffAccumulator::new();
        acc.push(4.0);
        acc.push(6.0);
        let snapshot = acc;

        acc.merge(&PayoffAccumulator::new());
        assert_eq!(acc, snapshot);

        let mut empty = PayoffAccumulator::new();
        empty.merge(&snapshot);
        assert_eq!(empty, snapshot);
    }

    proptest! {
        #[test]
        fn merge_matches_sequential(
            data in prop::collection::vec(0.0..100.0_f64, 2..200),
            split in 0usize..200,
        ) {
            let split = split % data.len();
            let (left, right) = data.split_at(split);

            let mut sequential = PayoffAccumulator::new();
            data.iter().for_each(|&x| sequential.push(x));

            let mut merged = PayoffAccumulator::new();
            left.iter().for_each(|&x| merged.push(x));
            let mut tail = PayoffAccumulator::new();
            right.iter().for_each(|&x| tail.push(x));
            merged.merge(&tail);

            prop_assert_eq!(merged.count(), sequential.count());
            prop_assert!((merged.mean() - sequential.mean()).abs() < 1e-9);
            prop_assert!((merged.variance() - sequential.variance()).abs() < 1e-7);
        }
    }
}
