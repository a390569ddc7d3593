//! GA configuration.
//!
//! [`GaConfig`] holds every parameter fixed at optimizer construction:
//! search bounds, loop length, population size, mutation rate and the
//! chromosome length.

use crate::error::{GaError, Result};

/// Decimal places at which a bound forces a longer chromosome.
const PRECISION_THRESHOLD: usize = 10;

/// Configuration for the binary Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_bitga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.code_length, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_bounds(-1.0, 2.0)
///     .with_population_size(40)
///     .with_mutation_rate(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Lower bound of the search interval.
    pub min_value: f64,

    /// Upper bound of the search interval.
    pub max_value: f64,

    /// Number of generations to evolve. There is no early termination.
    pub generations: usize,

    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Probability (0.0–1.0) that a child receives exactly one bit flip.
    pub mutation_rate: f64,

    /// Requested chromosome length in bits.
    ///
    /// May be widened by [`resolved_code_length`](Self::resolved_code_length)
    /// when a bound carries more decimal places than this length resolves.
    pub code_length: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 1.0,
            generations: 100,
            population_size: 50,
            mutation_rate: 0.05,
            code_length: 10,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Creates a configuration with the five mandatory parameters.
    ///
    /// `code_length` keeps its default of 10 bits.
    pub fn new(
        max_value: f64,
        min_value: f64,
        generations: usize,
        population_size: usize,
        mutation_rate: f64,
    ) -> Self {
        Self {
            min_value,
            max_value,
            generations,
            population_size,
            mutation_rate,
            ..Self::default()
        }
    }

    /// Sets the search interval `[min, max]`.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the requested chromosome length in bits.
    pub fn with_code_length(mut self, bits: usize) -> Self {
        self.code_length = bits;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Chromosome length actually used by the optimizer.
    ///
    /// If either bound has ten or more decimal places, the length grows to
    /// the larger place count so the decoded grid is at least as fine as
    /// the bounds themselves. Otherwise `code_length` is used as given.
    pub fn resolved_code_length(&self) -> usize {
        let places = decimal_places(self.max_value).max(decimal_places(self.min_value));
        if places >= PRECISION_THRESHOLD {
            self.code_length.max(places)
        } else {
            self.code_length
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.min_value.is_finite() || !self.max_value.is_finite() {
            return Err(GaError::InvalidConfig("bounds must be finite".into()));
        }
        if self.min_value >= self.max_value {
            return Err(GaError::InvalidConfig(format!(
                "min_value ({}) must be less than max_value ({})",
                self.min_value, self.max_value
            )));
        }
        if !(self.max_value - self.min_value).is_finite() {
            return Err(GaError::InvalidConfig(format!(
                "interval width max_value - min_value overflows ({} - {})",
                self.max_value, self.min_value
            )));
        }
        if self.generations == 0 {
            return Err(GaError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        if self.population_size == 0 {
            return Err(GaError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidConfig(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.code_length == 0 {
            return Err(GaError::InvalidConfig(
                "code_length must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Number of digits after the decimal point in the shortest decimal
/// rendering of `value` that round-trips.
fn decimal_places(value: f64) -> usize {
    let rendered = value.to_string();
    match rendered.split_once('.') {
        Some((_, fraction)) => fraction.len(),
        None => 0,
    }
}
