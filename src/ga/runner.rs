//! GA evolutionary loop execution.
//!
//! [`Optimizer`] owns the configuration, the objective and the random
//! source, and drives the generational loop:
//! initialization → evaluation → selection → crossover → mutation → replace.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::instrument;

use super::config::GaConfig;
use super::encoding::{generate_random_binary, Chromosome, Encoder};
use super::objective::Objective;
use super::operators::{bit_flip_mutation, single_point_crossover};
use super::selection::RouletteWheel;
use crate::error::{GaError, Result};

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,

    /// Number of individuals evaluated.
    pub population: usize,

    /// Highest fitness in the population.
    pub best_fitness: f64,

    /// Mean fitness of the population.
    pub mean_fitness: f64,
}

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Fittest chromosome of the final population.
    pub best: Chromosome,

    /// Decoded value of `best`.
    pub best_value: f64,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Statistics for the initial population and after each generation.
    pub history: Vec<GenerationStats>,
}

/// Binary GA optimizer.
///
/// # Usage
///
/// ```
/// use u_bitga::ga::{GaConfig, Optimizer};
///
/// let config = GaConfig::default()
///     .with_bounds(-1.0, 2.0)
///     .with_generations(30)
///     .with_seed(42);
/// let mut optimizer = Optimizer::new(config, |x: f64| 3.0 - (x - 1.0).powi(2)).unwrap();
/// let result = optimizer.run().unwrap();
/// assert!((result.best_value - 1.0).abs() < 0.5);
/// ```
pub struct Optimizer<O: Objective> {
    config: GaConfig,
    encoder: Encoder,
    objective: O,
    rng: StdRng,
}

impl<O: Objective> Optimizer<O> {
    /// Creates an optimizer, seeding its random source from `config.seed`.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: GaConfig, objective: O) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, objective, rng)
    }

    /// Creates an optimizer that draws from the given random source.
    pub fn with_rng(config: GaConfig, objective: O, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let code_length = config.resolved_code_length();
        if code_length != config.code_length {
            tracing::warn!(
                requested = config.code_length,
                code_length,
                "bounds need more precision, widening chromosomes"
            );
        }
        let encoder = Encoder::new(config.min_value, config.max_value, code_length);

        Ok(Self {
            config,
            encoder,
            objective,
            rng,
        })
    }

    /// The configuration this optimizer was built with.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The encoder mapping chromosomes onto the search interval.
    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Chromosome length in bits, after precision widening.
    pub fn code_length(&self) -> usize {
        self.encoder.code_length()
    }

    /// Decodes a chromosome to its real value.
    pub fn decode(&self, individual: &Chromosome) -> f64 {
        self.encoder.decode(individual)
    }

    /// Objective value of a chromosome's decoded point.
    pub fn fitness(&self, individual: &Chromosome) -> f64 {
        self.objective.value(self.decode(individual))
    }

    /// Fitness of every individual, in population order.
    pub fn evaluate_population(&self, population: &[Chromosome]) -> Vec<f64> {
        population.iter().map(|ind| self.fitness(ind)).collect()
    }

    /// Draws a random chromosome of `length` bits.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidArgument`] when `length` is zero.
    pub fn generate_random_binary(&mut self, length: usize) -> Result<Chromosome> {
        generate_random_binary(length, &mut self.rng)
    }

    /// Creates `population_size` independent random chromosomes.
    ///
    /// Duplicates are allowed.
    pub fn initialize_population(&mut self) -> Result<Vec<Chromosome>> {
        let length = self.code_length();
        (0..self.config.population_size)
            .map(|_| generate_random_binary(length, &mut self.rng))
            .collect()
    }

    /// Picks one parent by roulette wheel.
    pub fn select<'a>(
        &mut self,
        population: &'a [Chromosome],
        fitness_values: &[f64],
    ) -> Result<&'a Chromosome> {
        super::selection::roulette_wheel_selection(population, fitness_values, &mut self.rng)
    }

    /// Single-point crossover of two parents.
    pub fn crossover(
        &mut self,
        parent1: &Chromosome,
        parent2: &Chromosome,
    ) -> Result<(Chromosome, Chromosome)> {
        single_point_crossover(parent1, parent2, &mut self.rng)
    }

    /// Applies bit-flip mutation at the configured rate.
    pub fn mutate(&mut self, individual: &Chromosome) -> Chromosome {
        bit_flip_mutation(
            individual,
            self.config.mutation_rate,
            &self.encoder,
            &mut self.rng,
        )
    }

    /// Breeds the replacement for `population` from a prepared wheel.
    ///
    /// Children are appended pair by pair until `population_size` is
    /// reached; a surplus second child is discarded unmutated.
    pub(crate) fn next_generation(
        &mut self,
        population: &[Chromosome],
        wheel: &RouletteWheel,
    ) -> Result<Vec<Chromosome>> {
        let size = self.config.population_size;
        let mut next_gen = Vec::with_capacity(size);
        while next_gen.len() < size {
            let parent1 = &population[wheel.spin(&mut self.rng)];
            let parent2 = &population[wheel.spin(&mut self.rng)];
            let (child1, child2) = single_point_crossover(parent1, parent2, &mut self.rng)?;

            for child in [child1, child2] {
                if next_gen.len() >= size {
                    break;
                }
                next_gen.push(self.mutate(&child));
            }
        }
        Ok(next_gen)
    }

    /// Runs the GA for the configured number of generations.
    ///
    /// Each generation evaluates the population, then builds a full
    /// replacement from roulette-selected, crossed and mutated pairs. With
    /// an odd population size the last pair's second child is dropped, so
    /// the population size never changes. The result is the fittest
    /// individual of the final population.
    ///
    /// # Errors
    /// Returns [`GaError::DegenerateFitness`] if a generation has no positive
    /// fitness value to weight the roulette wheel with.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            generations = self.config.generations,
            population_size = self.config.population_size,
            code_length = self.encoder.code_length(),
        )
    )]
    pub fn run(&mut self) -> Result<GaResult> {
        let generations = self.config.generations;

        let mut population = self.initialize_population()?;
        let mut history = Vec::with_capacity(generations + 1);

        for generation in 0..generations {
            let fitness_values = self.evaluate_population(&population);
            let current = stats(generation, &fitness_values);
            tracing::debug!(
                generation,
                best_fitness = current.best_fitness,
                mean_fitness = current.mean_fitness,
                "generation evaluated"
            );
            history.push(current);

            let wheel = RouletteWheel::new(&fitness_values).inspect_err(|err| {
                tracing::error!(generation, %err, "roulette selection failed");
            })?;

            population = self.next_generation(&population, &wheel)?;
        }

        let fitness_values = self.evaluate_population(&population);
        history.push(stats(generations, &fitness_values));

        let best_idx = index_of_max(&fitness_values).ok_or_else(|| {
            GaError::InvalidArgument("population must not be empty".into())
        })?;
        let best = population.swap_remove(best_idx);
        let best_value = self.decode(&best);
        let best_fitness = fitness_values[best_idx];

        tracing::info!(best_value, best_fitness, generations, "optimization finished");

        Ok(GaResult {
            best,
            best_value,
            best_fitness,
            generations,
            history,
        })
    }
}

/// Size, best and mean fitness of one generation.
fn stats(generation: usize, fitness_values: &[f64]) -> GenerationStats {
    let best_fitness = fitness_values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let mean_fitness = fitness_values.iter().sum::<f64>() / fitness_values.len().max(1) as f64;
    GenerationStats {
        generation,
        population: fitness_values.len(),
        best_fitness,
        mean_fitness,
    }
}

/// Index of the highest value; the first one wins ties. `NaN` never wins
/// over a number.
fn index_of_max(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v.is_nan() || v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::objective::{OscillatingSine, Sine};
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn sine_config() -> GaConfig {
        GaConfig::new(TAU, 0.0, 50, 20, 0.05)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = sine_config().with_population_size(0);
        assert!(matches!(
            Optimizer::new(config, Sine),
            Err(GaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_code_length_widened_for_tau() {
        // TAU renders with 15 decimal places
        let optimizer = Optimizer::new(sine_config().with_seed(1), Sine).unwrap();
        assert_eq!(optimizer.code_length(), 15);

        let config = GaConfig::new(4.0, 0.0, 10, 10, 0.1).with_seed(1);
        let optimizer = Optimizer::new(config, Sine).unwrap();
        assert_eq!(optimizer.code_length(), 10);
    }

    #[test]
    fn test_initialize_population() {
        let config = GaConfig::new(4.0, 0.0, 10, 17, 0.1).with_seed(3);
        let mut optimizer = Optimizer::new(config, Sine).unwrap();
        let population = optimizer.initialize_population().unwrap();
        assert_eq!(population.len(), 17);
        assert!(population.iter().all(|c| c.len() == 10));
    }

    #[test]
    fn test_generate_random_binary_zero_length() {
        let mut optimizer = Optimizer::new(sine_config().with_seed(3), Sine).unwrap();
        assert!(matches!(
            optimizer.generate_random_binary(0),
            Err(GaError::InvalidArgument(_))
        ));
        assert_eq!(optimizer.generate_random_binary(4).unwrap().len(), 4);
    }

    #[test]
    fn test_fitness_composes_decode_and_objective() {
        let config = GaConfig::new(4.0, 0.0, 10, 10, 0.1).with_seed(3);
        let optimizer = Optimizer::new(config, |x: f64| 2.0 * x).unwrap();
        assert_eq!(optimizer.fitness(&Chromosome::ones(10)), 8.0);
        assert_eq!(optimizer.fitness(&Chromosome::zeros(10)), 0.0);
        assert_eq!(
            optimizer.evaluate_population(&[Chromosome::zeros(10), Chromosome::ones(10)]),
            vec![0.0, 8.0]
        );
    }

    #[test]
    fn test_operator_methods() {
        let config = GaConfig::new(4.0, 0.0, 10, 4, 1.0).with_seed(5);
        let mut optimizer = Optimizer::new(config, |x: f64| x + 1.0).unwrap();
        let population = vec![Chromosome::zeros(10), Chromosome::ones(10)];
        let fitness = optimizer.evaluate_population(&population);

        let parent = optimizer.select(&population, &fitness).unwrap();
        assert_eq!(parent.len(), 10);

        let (c1, c2) = optimizer.crossover(&population[0], &population[1]).unwrap();
        assert_eq!(c1.hamming_distance(&c2), 10);

        let mutated = optimizer.mutate(&population[0]);
        assert_eq!(mutated.hamming_distance(&population[0]), 1);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = Optimizer::new(sine_config().with_seed(42), Sine)
            .unwrap()
            .run()
            .unwrap();
        let b = Optimizer::new(sine_config().with_seed(42), Sine)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sine_finds_positive_hump() {
        let result = Optimizer::new(sine_config().with_seed(42), Sine)
            .unwrap()
            .run()
            .unwrap();
        assert!(
            (result.best_value - FRAC_PI_2).abs() < 1.0,
            "expected x near π/2, got {}",
            result.best_value
        );
        assert!(result.best_fitness > 0.5, "got {}", result.best_fitness);
        assert_eq!(result.generations, 50);
    }

    #[test]
    fn test_result_is_consistent() {
        let config = GaConfig::new(2.0, -1.0, 40, 30, 0.1).with_seed(11);
        let mut optimizer = Optimizer::new(config, OscillatingSine).unwrap();
        let result = optimizer.run().unwrap();
        assert_eq!(result.best_value, optimizer.decode(&result.best));
        assert_eq!(result.best_fitness, optimizer.fitness(&result.best));
        assert!((-1.0..=2.0).contains(&result.best_value));
        assert_eq!(
            result.history.last().map(|s| s.best_fitness),
            Some(result.best_fitness)
        );
    }

    #[test]
    fn test_history_length() {
        let config = GaConfig::new(3.0, 0.001, 25, 10, 0.1).with_seed(2);
        let result = Optimizer::new(config, Sine).unwrap().run().unwrap();
        assert_eq!(result.history.len(), 26);
        for (i, s) in result.history.iter().enumerate() {
            assert_eq!(s.generation, i);
            assert!(s.mean_fitness <= s.best_fitness + 1e-12);
        }
    }

    #[test]
    fn test_odd_population_keeps_size() {
        for size in [1usize, 3, 7, 21] {
            let config = GaConfig::new(3.0, 0.001, 5, size, 0.2).with_seed(size as u64);
            let mut optimizer = Optimizer::new(config, Sine).unwrap();
            let result = optimizer.run().unwrap();
            assert_eq!(result.history.len(), 6, "size {size}");
            assert!(result
                .history
                .iter()
                .all(|s| s.population == size));
            assert!(result.best_fitness >= 0.0);
        }
    }

    #[test]
    fn test_next_generation_fills_population() {
        for size in [1usize, 2, 5, 6, 19, 20] {
            let config = GaConfig::new(3.0, 0.001, 1, size, 0.5).with_seed(size as u64);
            let mut optimizer = Optimizer::new(config, Sine).unwrap();
            let mut population = optimizer.initialize_population().unwrap();
            for _ in 0..10 {
                let fitness = optimizer.evaluate_population(&population);
                let wheel = RouletteWheel::new(&fitness).unwrap();
                population = optimizer.next_generation(&population, &wheel).unwrap();
                assert_eq!(population.len(), size);
                assert!(population.iter().all(|c| c.len() == 10));
            }
        }
    }

    #[test]
    fn test_next_generation_accepts_smaller_parent_pool() {
        // Parents come from the wheel's slots, the output size from the config.
        let config = GaConfig::new(3.0, 0.001, 1, 7, 0.0).with_seed(9);
        let mut optimizer = Optimizer::new(config, Sine).unwrap();
        let parents = vec![Chromosome::ones(10), Chromosome::from_u64(5, 10).unwrap()];
        let wheel = RouletteWheel::new(&optimizer.evaluate_population(&parents)).unwrap();
        let children = optimizer.next_generation(&parents, &wheel).unwrap();
        assert_eq!(children.len(), 7);
    }

    #[test]
    fn test_constant_objective_runs() {
        let config = GaConfig::new(1.0, 0.0, 10, 8, 0.5).with_seed(4);
        let result = Optimizer::new(config, |_x: f64| 1.0).unwrap().run().unwrap();
        assert_eq!(result.best_fitness, 1.0);
    }

    #[test]
    fn test_zero_objective_is_degenerate() {
        let config = GaConfig::new(1.0, 0.0, 10, 8, 0.5).with_seed(4);
        let err = Optimizer::new(config, |_x: f64| 0.0).unwrap().run();
        assert!(matches!(err, Err(GaError::DegenerateFitness { .. })));
    }

    #[test]
    fn test_negative_objective_is_degenerate() {
        let config = GaConfig::new(1.0, 0.0, 10, 8, 0.5).with_seed(4);
        let err = Optimizer::new(config, |x: f64| -1.0 - x).unwrap().run();
        assert!(matches!(err, Err(GaError::DegenerateFitness { .. })));
    }

    #[test]
    fn test_no_mutation_preserves_bit_columns() {
        // Crossover only recombines loci, so with mutation off a locus that
        // is 0 across the whole population stays 0.
        let config = GaConfig::new(1.0, 0.0, 1, 6, 0.0).with_seed(8);
        let mut optimizer = Optimizer::new(config, |x: f64| x + 0.1).unwrap();
        let population = vec![
            "0110000000".parse().unwrap(),
            "1010000000".parse().unwrap(),
            "0100000000".parse().unwrap(),
            "1110000000".parse().unwrap(),
        ];
        let fitness = optimizer.evaluate_population(&population);
        for _ in 0..200 {
            let p1 = optimizer.select(&population, &fitness).unwrap().clone();
            let p2 = optimizer.select(&population, &fitness).unwrap().clone();
            let (c1, c2) = optimizer.crossover(&p1, &p2).unwrap();
            for child in [optimizer.mutate(&c1), optimizer.mutate(&c2)] {
                assert!(child.bits()[3..].iter().all(|&b| !b));
            }
        }
    }

    #[test]
    fn test_index_of_max() {
        assert_eq!(index_of_max(&[]), None);
        assert_eq!(index_of_max(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(index_of_max(&[f64::NAN, 1.0]), Some(1));
        assert_eq!(index_of_max(&[-1.0, f64::NAN, -2.0]), Some(0));
    }
}
