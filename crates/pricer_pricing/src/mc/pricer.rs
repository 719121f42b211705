//! Monte Carlo pricer orchestration.

use pricer_core::types::{OptionContract, PricingError};
use tracing::debug;

use super::accumulator::PayoffAccumulator;
use super::config::{validate_trials, MonteCarloConfig, BATCH_SIZE};
use super::error::ConfigError;
use super::parallel::simulate_partitioned;
use crate::rng::{NormalSource, PricerRng};

/// Monte Carlo estimate of an option value.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult {
///     price: 10.5,
///     std_error: 0.05,
///     n_trials: 100_000,
/// };
///
/// println!("Price: {} +/- {}", result.price, result.confidence_95());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Discounted standard error of the mean.
    pub std_error: f64,
    /// Number of simulated terminal prices.
    pub n_trials: usize,
}

impl PricingResult {
    /// Discounts an accumulator's statistics into a result.
    pub fn from_accumulator(acc: &PayoffAccumulator, discount_factor: f64) -> Self {
        Self {
            price: acc.mean() * discount_factor,
            std_error: acc.std_error() * discount_factor,
            n_trials: acc.count(),
        }
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Prices a European option by simulating `n_trials` terminal prices.
///
/// Randomness comes only from `source`, so the estimate is reproducible for a
/// seeded source.
///
/// # Errors
///
/// `PricingError::InvalidInput` if the contract is invalid, `n_trials` is
/// outside [1, `MAX_TRIALS`], or the estimate overflows to a non-finite value.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionContract;
/// use pricer_pricing::mc::price_monte_carlo;
/// use pricer_pricing::rng::PricerRng;
///
/// let contract = OptionContract::call(100.0_f64, 105.0, 1.0, 0.05, 0.2).unwrap();
///
/// assert!(price_monte_carlo(&contract, 0, &mut PricerRng::from_seed(1)).is_err());
///
/// let result = price_monte_carlo(&contract, 10_000, &mut PricerRng::from_seed(1)).unwrap();
/// assert_eq!(result.n_trials, 10_000);
/// assert!(result.std_error > 0.0);
/// ```
pub fn price_monte_carlo<S: NormalSource>(
    contract: &OptionContract<f64>,
    n_trials: usize,
    source: &mut S,
) -> Result<PricingResult, PricingError> {
    contract.validate()?;
    validate_trials(n_trials)?;

    let acc = simulate(contract, n_trials, source);
    finite_result(&acc, contract.discount_factor())
}

/// Discounts the statistics, rejecting overflowed estimates.
fn finite_result(
    acc: &PayoffAccumulator,
    discount_factor: f64,
) -> Result<PricingResult, PricingError> {
    let result = PricingResult::from_accumulator(acc, discount_factor);
    if !(result.price.is_finite() && result.std_error.is_finite()) {
        return Err(PricingError::invalid_input(format!(
            "Monte Carlo estimate is not finite: price = {}, std_error = {}",
            result.price, result.std_error
        )));
    }
    Ok(result)
}

/// Simulates terminal prices and accumulates undiscounted payoffs.
///
/// Callers validate the contract and trial count.
pub(crate) fn simulate<S: NormalSource>(
    contract: &OptionContract<f64>,
    n_trials: usize,
    source: &mut S,
) -> PayoffAccumulator {
    let sigma = contract.volatility();
    let maturity = contract.maturity();
    let spot = contract.spot();

    // log S_T = log S_0 + drift + diffusion·z
    let drift = (contract.rate() - 0.5 * sigma * sigma) * maturity;
    let diffusion = sigma * maturity.sqrt();

    let mut acc = PayoffAccumulator::new();
    let mut buffer = vec![0.0; BATCH_SIZE.min(n_trials)];
    let mut remaining = n_trials;

    while remaining > 0 {
        let batch = &mut buffer[..remaining.min(BATCH_SIZE)];
        source.fill_normal(batch);

        for &z in batch.iter() {
            let terminal = spot * (drift + diffusion * z).exp();
            acc.push(contract.payoff(terminal));
        }

        remaining -= batch.len();
    }

    acc
}

/// Monte Carlo pricing engine.
///
/// Every call to [`MonteCarloPricer::price`] starts from the configured
/// seed, so the pricer holds no mutable state and can be shared freely.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionContract;
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(20_000)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let pricer = MonteCarloPricer::new(config).unwrap();
/// let contract = OptionContract::call(100.0_f64, 100.0, 1.0, 0.05, 0.2).unwrap();
///
/// let result = pricer.price(&contract).unwrap();
/// println!("Price: {} +/- {}", result.price, result.std_error);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
}

impl MonteCarloPricer {
    /// Creates a new pricer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Prices the contract on the path selected by the configuration.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidInput` if the contract is invalid.
    pub fn price(&self, contract: &OptionContract<f64>) -> Result<PricingResult, PricingError> {
        if self.config.parallel() {
            self.price_parallel(contract)
        } else {
            self.price_sequential(contract)
        }
    }

    /// Prices the contract on the calling thread from a single seeded stream.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidInput` if the contract is invalid.
    pub fn price_sequential(
        &self,
        contract: &OptionContract<f64>,
    ) -> Result<PricingResult, PricingError> {
        let mut rng = PricerRng::from_seed(self.config.seed());

        debug!(
            n_trials = self.config.n_trials(),
            seed = self.config.seed(),
            option_type = %contract.option_type(),
            "sequential Monte Carlo run"
        );

        price_monte_carlo(contract, self.config.n_trials(), &mut rng)
    }

    /// Prices the contract over independently seeded partitions on the rayon
    /// pool.
    ///
    /// The result depends on the seed and chunk size only, never on the
    /// number of worker threads.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidInput` if the contract is invalid.
    pub fn price_parallel(
        &self,
        contract: &OptionContract<f64>,
    ) -> Result<PricingResult, PricingError> {
        contract.validate()?;

        let acc = simulate_partitioned(
            contract,
            self.config.n_trials(),
            self.config.seed(),
            self.config.chunk_size(),
        );

        finite_result(&acc, contract.discount_factor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionType;

    /// Replays a fixed sequence of variates, cycling when exhausted.
    struct ScriptedSource {
        values: Vec<f64>,
        position: usize,
    }

    impl ScriptedSource {
        fn new(values: Vec<f64>) -> Self {
            Self {
                values,
                position: 0,
            }
        }
    }

    impl NormalSource for ScriptedSource {
        fn next_normal(&mut self) -> f64 {
            let value = self.values[self.position % self.values.len()];
            self.position += 1;
            value
        }
    }

    fn reference_call() -> OptionContract<f64> {
        OptionContract::call(100.0, 105.0, 1.0, 0.05, 0.2).unwrap()
    }

    fn create_test_pricer(n_trials: usize, seed: u64) -> MonteCarloPricer {
        let config = MonteCarloConfig::builder()
            .n_trials(n_trials)
            .seed(seed)
            .build()
            .unwrap();
        MonteCarloPricer::new(config).unwrap()
    }

    #[test]
    fn test_zero_shock_gives_forward_payoff() {
        // z = 0 on every path: S_T = S_0·exp((r - σ²/2)T)
        let contract = OptionContract::call(100.0, 95.0, 1.0, 0.05, 0.2).unwrap();
        let mut source = ScriptedSource::new(vec![0.0]);

        let result = price_monte_carlo(&contract, 1_000, &mut source).unwrap();

        let terminal = 100.0 * (0.05 - 0.02_f64).exp();
        let expected = (terminal - 95.0) * (-0.05_f64).exp();
        assert_relative_eq!(result.price, expected, epsilon = 1e-10);
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn test_scripted_put_payoffs() {
        let contract = OptionContract::put(100.0, 100.0, 1.0, 0.0, 0.2).unwrap();
        // drift = -0.02, diffusion = 0.2
        let shocks = vec![-1.0, 1.0];
        let mut source = ScriptedSource::new(shocks);

        let result = price_monte_carlo(&contract, 2, &mut source).unwrap();

        let low = 100.0 * (-0.02 - 0.2_f64).exp();
        let expected = (100.0 - low) / 2.0;
        assert_relative_eq!(result.price, expected, epsilon = 1e-10);
        assert!(result.std_error > 0.0);
    }

    #[test]
    fn test_consumes_exactly_n_variates() {
        let contract = reference_call();
        let mut source = ScriptedSource::new(vec![0.1, -0.3, 0.7]);

        price_monte_carlo(&contract, BATCH_SIZE + 17, &mut source).unwrap();
        assert_eq!(source.position, BATCH_SIZE + 17);
    }

    #[test]
    fn test_zero_trials_is_invalid_input() {
        let mut rng = PricerRng::from_seed(1);
        let err = price_monte_carlo(&reference_call(), 0, &mut rng).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(msg) if msg.contains("trial")));
    }

    #[test]
    fn test_single_trial_has_zero_std_error() {
        let mut rng = PricerRng::from_seed(1);
        let result = price_monte_carlo(&reference_call(), 1, &mut rng).unwrap();
        assert_eq!(result.n_trials, 1);
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn test_pricer_reproducibility() {
        let pricer = create_test_pricer(10_000, 42);
        let first = pricer.price(&reference_call()).unwrap();
        let second = pricer.price(&reference_call()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = create_test_pricer(10_000, 1).price(&reference_call()).unwrap();
        let b = create_test_pricer(10_000, 2).price(&reference_call()).unwrap();
        assert_ne!(a.price, b.price);
    }

    #[test]
    fn test_pricer_matches_free_function() {
        let pricer = create_test_pricer(5_000, 7);
        let via_pricer = pricer.price(&reference_call()).unwrap();
        let via_fn =
            price_monte_carlo(&reference_call(), 5_000, &mut PricerRng::from_seed(7)).unwrap();
        assert_eq!(via_pricer, via_fn);
    }

    #[test]
    fn test_call_put_parity_same_draws() {
        // Same variates for both sides: C - P = e^(-rT)·(mean(S_T) - K) exactly
        let pricer = create_test_pricer(200_000, 42);
        let call = reference_call();
        let put = call.with_option_type(OptionType::Put);

        let c = pricer.price(&call).unwrap();
        let p = pricer.price(&put).unwrap();
        let forward_leg = call.spot() - call.strike() * call.discount_factor();

        let tolerance = 4.0 * (c.std_error + p.std_error);
        assert!(
            (c.price - p.price - forward_leg).abs() < tolerance,
            "C - P = {}, expected {}",
            c.price - p.price,
            forward_leg
        );
    }

    #[test]
    fn test_std_error_shrinks_with_trials() {
        let small = create_test_pricer(10_000, 3).price(&reference_call()).unwrap();
        let large = create_test_pricer(160_000, 3).price(&reference_call()).unwrap();

        // 16x the trials, roughly a quarter of the error
        let ratio = large.std_error / small.std_error;
        assert!(ratio > 0.2 && ratio < 0.3, "ratio = {}", ratio);
    }

    #[test]
    fn test_pricing_result_confidence() {
        let result = PricingResult {
            price: 10.0,
            std_error: 0.1,
            n_trials: 1_000,
        };
        assert_relative_eq!(result.confidence_95(), 0.196, epsilon = 1e-12);
        assert_relative_eq!(result.confidence_99(), 0.2576, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_flag_routes_to_partitioned_path() {
        let config = MonteCarloConfig::builder()
            .n_trials(50_000)
            .seed(42)
            .chunk_size(10_000)
            .parallel(true)
            .build()
            .unwrap();
        let pricer = MonteCarloPricer::new(config).unwrap();

        let routed = pricer.price(&reference_call()).unwrap();
        let direct = pricer.price_parallel(&reference_call()).unwrap();
        assert_eq!(routed, direct);
        assert_eq!(routed.n_trials, 50_000);
    }

    #[test]
    fn test_overflowing_estimate_rejected() {
        let huge = OptionContract::call(1.5e308, 1.5e308, 1.0, 0.05, 0.5).unwrap();
        let err = price_monte_carlo(&huge, 10_000, &mut PricerRng::from_seed(42)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));

        // Finite mean, but the squared deviations overflow
        let large = OptionContract::call(1e307, 1e307, 1.0, 0.05, 0.5).unwrap();
        assert!(price_monte_carlo(&large, 10_000, &mut PricerRng::from_seed(42)).is_err());

        let config = MonteCarloConfig::builder()
            .n_trials(10_000)
            .chunk_size(BATCH_SIZE)
            .parallel(true)
            .build()
            .unwrap();
        let pricer = MonteCarloPricer::new(config).unwrap();
        assert!(matches!(pricer.price(&huge), Err(PricingError::InvalidInput(_))));
    }
}
