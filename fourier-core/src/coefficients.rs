//! # Fourier Coefficient Module
//!
//! Estimates Fourier coefficients of arbitrary user functions by a fixed
//! resolution Riemann sum over one period `T = period·π`:
//!
//! `an ≈ (2/T) · Σ f(x)·cos(2πnx/T) · dx`,
//! `bn ≈ (2/T) · Σ f(x)·sin(2πnx/T) · dx`
//!
//! There is no adaptive refinement and no error bound. Accuracy drops for
//! rapidly varying functions and high harmonic counts.

use std::f64::consts::PI;

use crate::custom::UserFunction;
use crate::error::FormulaError;
use crate::grid::{self, SAMPLE_COUNT};

/// The quadrature grid over one period, `[0, period·π]` inclusive.
pub fn period_grid(period: f64) -> Vec<f64> {
    grid::linspace(0.0, period * PI, SAMPLE_COUNT)
}

/// Estimates `(an, bn)` for harmonic `n` of `func` with the given period
/// (in units of π).
pub fn compute_fourier_coefficients(
    func: &UserFunction,
    n: u32,
    period: f64,
) -> Result<(f64, f64), FormulaError> {
    Ok(CoefficientEstimator::new(func, period)?.coefficients(n))
}

/// Samples a function once over one period and answers coefficient queries
/// for any number of harmonics from those samples.
#[derive(Debug, Clone)]
pub struct CoefficientEstimator {
    xs: Vec<f64>,
    samples: Vec<f64>,
    /// Full period length `T`.
    period_length: f64,
    dx: f64,
}

impl CoefficientEstimator {
    pub fn new(func: &UserFunction, period: f64) -> Result<Self, FormulaError> {
        let xs = period_grid(period);
        let samples = func.evaluate(&xs)?;
        Ok(Self::from_samples(xs, samples, period * PI))
    }

    fn from_samples(xs: Vec<f64>, samples: Vec<f64>, period_length: f64) -> Self {
        let dx = if xs.len() > 1 { xs[1] - xs[0] } else { 0.0 };
        Self {
            xs,
            samples,
            period_length,
            dx,
        }
    }

    /// Cosine and sine coefficients `(an, bn)` of harmonic `n`.
    pub fn coefficients(&self, n: u32) -> (f64, f64) {
        let omega = 2.0 * PI * n as f64 / self.period_length;
        let (cos_sum, sin_sum) = self
            .xs
            .iter()
            .zip(&self.samples)
            .fold((0.0, 0.0), |(c, s), (&x, &f)| {
                let (sin, cos) = (omega * x).sin_cos();
                (c + f * cos, s + f * sin)
            });
        let scale = 2.0 / self.period_length * self.dx;
        (scale * cos_sum, scale * sin_sum)
    }

    /// The constant term: the mean of the samples over one period.
    pub fn dc_offset(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Angular frequency of harmonic `n` on this period, `2πn/T`.
    pub fn angular_frequency(&self, n: u32) -> f64 {
        2.0 * PI * n as f64 / self.period_length
    }
}
