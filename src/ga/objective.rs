//! Objective functions.
//!
//! The optimizer maximizes an [`Objective`]: a pure function of the decoded
//! real value. Any `Fn(f64) -> f64` closure is an objective, so swapping
//! the function never touches the rest of the engine.

use std::f64::consts::PI;

/// A scalar function to maximize.
///
/// Implementations must be total over the search interval and free of
/// side effects; the value depends only on `x`, never on population state.
///
/// # Implementing
///
/// ```
/// use u_bitga::ga::Objective;
///
/// struct NegatedParabola;
///
/// impl Objective for NegatedParabola {
///     fn value(&self, x: f64) -> f64 {
///         -(x - 1.0) * (x - 1.0)
///     }
/// }
///
/// assert_eq!(NegatedParabola.value(1.0), 0.0);
/// ```
pub trait Objective {
    /// Returns the objective value at `x`. Higher is better.
    fn value(&self, x: f64) -> f64;
}

impl<F> Objective for F
where
    F: Fn(f64) -> f64,
{
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}

/// `f(x) = sin(x)`, the reference objective. Peaks at `π/2 + 2kπ`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sine;

impl Objective for Sine {
    fn value(&self, x: f64) -> f64 {
        x.sin()
    }
}

/// `f(x) = x · sin(10πx) + 1`.
///
/// A classic multimodal test function; on `[-1, 2]` the global maximum is
/// about `2.85` near `x ≈ 1.85`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OscillatingSine;

impl Objective for OscillatingSine {
    fn value(&self, x: f64) -> f64 {
        x * (10.0 * PI * x).sin() + 1.0
    }
}

/// `f(x) = exp(-(x - 0.1)²) · sin⁶(5π · x^(3/4))`.
///
/// Deb's damped multimodal function on `[0, 1]`; the global maximum of
/// about `1.0` sits near `x ≈ 0.08`. Negative `x` yields `NaN`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DampedSine;

impl Objective for DampedSine {
    fn value(&self, x: f64) -> f64 {
        (-(x - 0.1).powi(2)).exp() * (5.0 * PI * x.powf(0.75)).sin().powi(6)
    }
}
