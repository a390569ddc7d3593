//! Binary Genetic Algorithm.
//!
//! Maximizes a one-dimensional [`Objective`] over `[min_value, max_value]`
//! by evolving fixed-length bit strings.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Bounds, population size, generations, mutation rate
//! - [`Optimizer`]: Owns the random source and runs the evolutionary loop
//! - [`GaResult`]: Best individual, its decoded value and fitness
//! - [`Chromosome`] / [`Encoder`]: Bit strings and their real-value mapping
//!
//! # Strategies
//!
//! Selection is always roulette-wheel ([`RouletteWheel`]), crossover is
//! always single-point, and mutation always flips at most one bit per
//! child. See [`operators`] for the free-function forms.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod encoding;
mod objective;
pub mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use encoding::{generate_random_binary, Chromosome, Encoder};
pub use objective::{DampedSine, Objective, OscillatingSine, Sine};
pub use runner::{GaResult, GenerationStats, Optimizer};
pub use selection::{roulette_wheel_selection, RouletteWheel};
