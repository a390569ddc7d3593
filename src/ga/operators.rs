//! Binary genetic operators.
//!
//! # Crossover
//!
//! - [`single_point_crossover`]: splice two parents at one random locus
//!
//! # Mutation
//!
//! - [`bit_flip_mutation`]: flip one random bit with a given probability,
//!   then clamp the result into the encodable range
//!
//! Both operators return fresh chromosomes and leave their inputs intact.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 3

use rand::Rng;

use super::encoding::{Chromosome, Encoder};
use crate::error::{GaError, Result};

// ============================================================================
// Crossover
// ============================================================================

/// Single-point crossover.
///
/// Draws a point `p` uniformly from `[0, L - 1]` and returns
/// `(parent1[..p] + parent2[p..], parent2[..p] + parent1[p..])`.
/// A point of 0 swaps the parents whole.
///
/// # Errors
/// Returns [`GaError::InvalidArgument`] if the parents differ in length or
/// are empty.
pub fn single_point_crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> Result<(Chromosome, Chromosome)> {
    if parent1.is_empty() {
        return Err(GaError::InvalidArgument(
            "parents must not be empty".into(),
        ));
    }
    let point = rng.random_range(0..parent1.len());
    crossover_at(parent1, parent2, point)
}

/// Single-point crossover at a fixed `point`.
///
/// `point` may be anything in `0..=L`; the randomized operator draws from
/// `0..L`.
pub fn crossover_at(
    parent1: &Chromosome,
    parent2: &Chromosome,
    point: usize,
) -> Result<(Chromosome, Chromosome)> {
    let n = parent1.len();
    if n != parent2.len() {
        return Err(GaError::InvalidArgument(format!(
            "parents must have equal length ({n} vs {})",
            parent2.len()
        )));
    }
    if point > n {
        return Err(GaError::InvalidArgument(format!(
            "crossover point {point} exceeds length {n}"
        )));
    }

    let (a, b) = (parent1.bits(), parent2.bits());
    let child1 = a[..point].iter().chain(&b[point..]).copied().collect();
    let child2 = b[..point].iter().chain(&a[point..]).copied().collect();
    Ok((Chromosome::new(child1), Chromosome::new(child2)))
}

// ============================================================================
// Mutation
// ============================================================================

/// Bit-flip mutation with clamping.
///
/// With probability `rate`, flips exactly one uniformly chosen bit and
/// passes the result through [`Encoder::clamp`]; otherwise returns an
/// unchanged copy. `rate` outside `[0, 1]` behaves like the nearest bound.
pub fn bit_flip_mutation<R: Rng>(
    individual: &Chromosome,
    rate: f64,
    encoder: &Encoder,
    rng: &mut R,
) -> Chromosome {
    if individual.is_empty() || rng.random_range(0.0..1.0) >= rate {
        return individual.clone();
    }
    let locus = rng.random_range(0..individual.len());
    encoder.clamp(individual.flipped(locus))
}
