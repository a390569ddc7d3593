//! Roulette-wheel (fitness-proportionate) selection.
//!
//! Each individual is drawn with probability `w_i / Σw`, where the weight
//! `w_i` is its fitness. Negative fitness values get zero weight, so they
//! can never be picked while any positive value remains.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use crate::error::{GaError, Result};

/// A prepared roulette wheel over one generation's fitness values.
///
/// Build once per generation with [`RouletteWheel::new`], then call
/// [`spin`](RouletteWheel::spin) for every parent. Draws are independent
/// and with replacement.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

impl RouletteWheel {
    /// Builds the wheel from raw fitness values.
    ///
    /// # Errors
    /// - [`GaError::InvalidArgument`] if `fitness_values` is empty.
    /// - [`GaError::DegenerateFitness`] if no value is positive, or the
    ///   weight total is not finite (`NaN` or infinite fitness).
    pub fn new(fitness_values: &[f64]) -> Result<Self> {
        if fitness_values.is_empty() {
            return Err(GaError::InvalidArgument(
                "cannot select from empty population".into(),
            ));
        }

        let mut total = 0.0;
        let mut cumulative = Vec::with_capacity(fitness_values.len());
        for &fitness in fitness_values {
            // NaN propagates into the total and is rejected below
            let weight = if fitness < 0.0 { 0.0 } else { fitness };
            total += weight;
            cumulative.push(total);
        }

        if !total.is_finite() || total <= 0.0 {
            return Err(GaError::DegenerateFitness { total });
        }

        Ok(Self { cumulative })
    }

    /// Draws one index with probability proportional to its weight.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        let total = self.cumulative[self.cumulative.len() - 1];
        let threshold = rng.random_range(0.0..total);
        // First slot whose cumulative weight exceeds the threshold; zero-weight
        // slots share their predecessor's value and are never chosen.
        let idx = self.cumulative.partition_point(|&c| c <= threshold);
        idx.min(self.cumulative.len() - 1)
    }
}

/// Selects one individual by roulette wheel.
///
/// Convenience wrapper that builds a [`RouletteWheel`] for a single draw;
/// the evolution loop reuses one wheel per generation instead.
pub fn roulette_wheel_selection<'a, T, R: Rng>(
    population: &'a [T],
    fitness_values: &[f64],
    rng: &mut R,
) -> Result<&'a T> {
    if population.len() != fitness_values.len() {
        return Err(GaError::InvalidArgument(format!(
            "population has {} individuals but {} fitness values were given",
            population.len(),
            fitness_values.len()
        )));
    }
    let wheel = RouletteWheel::new(fitness_values)?;
    Ok(&population[wheel.spin(rng)])
}
