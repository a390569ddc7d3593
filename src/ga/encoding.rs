//! Binary chromosome representation and the real-value encoder.
//!
//! A [`Chromosome`] is a fixed-length bit sequence read least-significant
//! bit first: bit `i` contributes `2^i` to the unsigned integer it encodes.
//! The [`Encoder`] maps that integer range `[0, 2^L - 1]` linearly onto the
//! search interval `[min, max]`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{GaError, Result};

/// A candidate solution: a fixed-length bit sequence.
///
/// Operators never modify a chromosome they receive; they return new ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    /// Creates a chromosome from bits in position order (index 0 = `2^0`).
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// All-zero chromosome of the given length. Decodes to the lower bound.
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// All-one chromosome of the given length. Decodes to the upper bound.
    pub fn ones(length: usize) -> Self {
        Self {
            bits: vec![true; length],
        }
    }

    /// Builds a chromosome holding the low `length` bits of `value`.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidArgument`] if `length > 64`.
    pub fn from_u64(value: u64, length: usize) -> Result<Self> {
        if length > 64 {
            return Err(GaError::InvalidArgument(format!(
                "length {length} exceeds the 64 bits of a u64"
            )));
        }
        let bits = (0..length).map(|i| (value >> i) & 1 == 1).collect();
        Ok(Self { bits })
    }

    /// The encoded unsigned integer, if it fits in a `u64`.
    pub fn to_u64(&self) -> Option<u64> {
        if self.bits.len() > 64 {
            return None;
        }
        Some(
            self.bits
                .iter()
                .enumerate()
                .fold(0u64, |acc, (i, &bit)| if bit { acc | (1 << i) } else { acc }),
        )
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the chromosome has no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits in position order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Bit at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Returns a copy with the bit at `index` inverted.
    ///
    /// Out-of-range indices return an unchanged copy.
    pub fn flipped(&self, index: usize) -> Self {
        let mut bits = self.bits.clone();
        if let Some(bit) = bits.get_mut(index) {
            *bit = !*bit;
        }
        Self { bits }
    }

    /// Number of positions at which two chromosomes differ.
    pub fn hamming_distance(&self, other: &Self) -> usize {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Fraction `value / (2^L - 1)` of the encoded integer, in `[0, 1]`.
    ///
    /// Evaluated as `(value * 2^-L) / (1 - 2^-L)` so lengths beyond 64 bits
    /// still decode; for `L <= 53` the result is correctly rounded.
    fn unit_fraction(&self) -> f64 {
        let length = self.bits.len();
        if length == 0 {
            return 0.0;
        }
        let scaled = self
            .bits
            .iter()
            .fold(0.0_f64, |acc, &bit| (acc + if bit { 1.0 } else { 0.0 }) * 0.5);
        let denominator = 1.0 - 0.5_f64.powi(length.min(i32::MAX as usize) as i32);
        (scaled / denominator).min(1.0)
    }
}

impl fmt::Display for Chromosome {
    /// Renders bits as `'0'`/`'1'` characters in position order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Chromosome {
    type Err = GaError;

    /// Parses a `'0'`/`'1'` string in position order.
    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(GaError::InvalidArgument(format!(
                    "unexpected character {other:?} in bit string"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }
}

/// Maps chromosomes onto the real interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoder {
    min: f64,
    max: f64,
    code_length: usize,
}

impl Encoder {
    /// Creates an encoder for `[min, max]` with `code_length`-bit chromosomes.
    pub fn new(min: f64, max: f64, code_length: usize) -> Self {
        Self {
            min,
            max,
            code_length,
        }
    }

    /// Lower bound of the interval.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the interval.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Chromosome length in bits.
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Decodes a chromosome to its real value.
    ///
    /// `decoded = min + (max - min) / (2^L - 1) * value`, where `L` is the
    /// chromosome's own length. The all-zero string decodes to exactly `min`
    /// and the all-one string to exactly `max`; the mapping is monotonic.
    ///
    /// When `max - min` overflows `f64`, the point is interpolated as
    /// `min·(1 - f) + max·f` instead and kept within `[min, max]`.
    pub fn decode(&self, chromosome: &Chromosome) -> f64 {
        let fraction = chromosome.unit_fraction();
        if fraction >= 1.0 {
            return self.max;
        }
        if fraction <= 0.0 {
            return self.min;
        }
        let span = self.max - self.min;
        if span.is_finite() {
            (self.min + span * fraction).min(self.max)
        } else {
            (self.min * (1.0 - fraction) + self.max * fraction).clamp(self.min, self.max)
        }
    }

    /// Draws a uniformly random chromosome of this encoder's length.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Chromosome {
        random_bits(self.code_length, rng)
    }

    /// Clamps a chromosome into the encodable range by decoded value.
    ///
    /// Picks the greater (by decoded value) of the all-zero string and the
    /// lesser of `candidate` and the all-one string. Ties keep the bound
    /// string on the low side and the candidate on the high side.
    pub fn clamp(&self, candidate: Chromosome) -> Chromosome {
        let length = candidate.len();
        let upper = Chromosome::ones(length);
        let capped = if self.decode(&candidate) <= self.decode(&upper) {
            candidate
        } else {
            upper
        };
        let lower = Chromosome::zeros(length);
        if self.decode(&lower) >= self.decode(&capped) {
            lower
        } else {
            capped
        }
    }
}

/// Draws a uniformly random chromosome of `length` bits.
///
/// Equivalent to sampling an integer uniformly from `[0, 2^length - 1]` and
/// writing it zero-padded to exactly `length` bits.
///
/// # Errors
/// Returns [`GaError::InvalidArgument`] when `length` is zero.
pub fn generate_random_binary<R: Rng>(length: usize, rng: &mut R) -> Result<Chromosome> {
    if length == 0 {
        return Err(GaError::InvalidArgument(
            "length must be a positive integer".into(),
        ));
    }
    Ok(random_bits(length, rng))
}

fn random_bits<R: Rng>(length: usize, rng: &mut R) -> Chromosome {
    let mut bits = Vec::with_capacity(length);
    while bits.len() < length {
        let word: u64 = rng.random();
        let take = (length - bits.len()).min(64);
        bits.extend((0..take).map(|i| (word >> i) & 1 == 1));
    }
    Chromosome { bits }
}
