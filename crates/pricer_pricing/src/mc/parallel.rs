//! Partitioned Monte Carlo evaluation on the rayon pool.
//!
//! The trial count is cut into fixed-size partitions. Partition `i` draws
//! from `PricerRng::stream(seed, i)`, runs on any worker, and returns its own
//! [`PayoffAccumulator`]. Partials are collected in partition order and merged
//! sequentially, so the result is independent of thread count and scheduling.

use pricer_core::types::OptionContract;
use rayon::prelude::*;
use tracing::{debug, trace};

use super::accumulator::PayoffAccumulator;
use super::pricer::simulate;
use crate::rng::PricerRng;

/// One slice of a partitioned run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    /// Position in the run; also selects the random stream.
    pub index: usize,
    /// Trials simulated by this partition.
    pub n_trials: usize,
}

/// Splits `n_trials` into partitions of `chunk_size` (the last may be shorter).
///
/// A `chunk_size` of zero is treated as one.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::partition;
///
/// let parts = partition(10, 4);
/// let sizes: Vec<usize> = parts.iter().map(|p| p.n_trials).collect();
/// assert_eq!(sizes, vec![4, 4, 2]);
/// ```
pub fn partition(n_trials: usize, chunk_size: usize) -> Vec<Partition> {
    let chunk_size = chunk_size.max(1);
    (0..n_trials.div_ceil(chunk_size))
        .map(|index| Partition {
            index,
            n_trials: chunk_size.min(n_trials - index * chunk_size),
        })
        .collect()
}

/// Simulates every partition in parallel and merges the partial statistics.
pub(crate) fn simulate_partitioned(
    contract: &OptionContract<f64>,
    n_trials: usize,
    seed: u64,
    chunk_size: usize,
) -> PayoffAccumulator {
    let partitions = partition(n_trials, chunk_size);

    debug!(
        n_trials,
        seed,
        chunk_size,
        n_partitions = partitions.len(),
        "partitioned Monte Carlo run"
    );

    let partials: Vec<PayoffAccumulator> = partitions
        .par_iter()
        .map(|part| {
            let mut rng = PricerRng::stream(seed, part.index as u64);
            trace!(index = part.index, n_trials = part.n_trials, "partition start");
            simulate(contract, part.n_trials, &mut rng)
        })
        .collect();

    partials
        .iter()
        .fold(PayoffAccumulator::new(), |mut acc, partial| {
            acc.merge(partial);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_call() -> OptionContract<f64> {
        OptionContract::call(100.0, 105.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_partition_exact_multiple() {
        let parts = partition(12, 4);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.n_trials == 4));
        assert_eq!(parts.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_partition_covers_all_trials() {
        for (n, chunk) in [(1, 1), (1, 100), (99, 10), (65_537, 65_536), (1_000_000, 4_096)] {
            let parts = partition(n, chunk);
            assert_eq!(parts.iter().map(|p| p.n_trials).sum::<usize>(), n);
            assert!(parts.iter().all(|p| p.n_trials > 0 && p.n_trials <= chunk));
        }
    }

    #[test]
    fn test_partition_zero_chunk_size() {
        let parts = partition(3, 0);
        assert_eq!(parts.len(), 3);
    }

    #[test]
    fn test_partition_zero_trials() {
        assert!(partition(0, 10).is_empty());
    }

    #[test]
    fn test_partitioned_counts() {
        let acc = simulate_partitioned(&reference_call(), 25_001, 42, 5_000);
        assert_eq!(acc.count(), 25_001);
    }

    #[test]
    fn test_independent_of_thread_count() {
        let run = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| simulate_partitioned(&reference_call(), 40_000, 9, 3_000))
        };

        let single = run(1);
        let many = run(4);
        assert_eq!(single, many);
    }

    #[test]
    fn test_partitions_use_distinct_streams() {
        // Deep in the money: every path pays, so distinct draws give distinct payoffs
        let contract = OptionContract::call(100.0, 1.0, 1.0, 0.05, 0.2).unwrap();

        let first = simulate(&contract, 1, &mut PricerRng::stream(42, 0));
        let second = simulate(&contract, 1, &mut PricerRng::stream(42, 1));
        assert_ne!(first.mean(), second.mean());

        let acc = simulate_partitioned(&contract, 2, 42, 1);
        assert!(acc.variance() > 0.0);
    }
}
