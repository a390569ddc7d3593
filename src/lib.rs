//! Binary-encoded genetic algorithm for one-dimensional maximization.
//!
//! Finds the maximum of a scalar objective `f(x)` on a bounded interval
//! `[min_value, max_value]`. Candidates are fixed-length bit strings that
//! decode linearly onto the interval; the engine evolves them with:
//!
//! - **Roulette-wheel selection**: fitness-proportionate parent choice.
//! - **Single-point crossover**: splices two parents at one random locus.
//! - **Bit-flip mutation**: flips at most one bit per child, then clamps
//!   the result into the encodable range.
//!
//! # Example
//!
//! ```
//! use u_bitga::ga::{GaConfig, Optimizer, Sine};
//!
//! let config = GaConfig::default()
//!     .with_bounds(0.0, std::f64::consts::TAU)
//!     .with_generations(50)
//!     .with_population_size(20)
//!     .with_mutation_rate(0.05)
//!     .with_seed(7);
//!
//! let mut optimizer = Optimizer::new(config, Sine).unwrap();
//! let result = optimizer.run().unwrap();
//! assert!(result.best_value >= 0.0 && result.best_value <= std::f64::consts::TAU);
//! ```
//!
//! # Architecture
//!
//! The crate follows the layout of the U-Engine algorithm crates: a
//! configuration type, free-function operators, and a runner that owns the
//! evolutionary loop. The one trait is [`Objective`](ga::Objective), the
//! function being maximized; selection, crossover and mutation are fixed.

pub mod error;
pub mod ga;

pub use error::{GaError, Result};
