//! # Series Assembly Module
//!
//! Sums closed-form or numerically estimated harmonics into a truncated
//! Fourier approximation sampled on the display grid, alongside the exact
//! waveform for overlay.

use crate::SeriesResult;
use crate::coefficients::CoefficientEstimator;
use crate::custom::{Piece, UserFunction};
use crate::equation::generate_equation;
use crate::error::{InputError, SimulatorError};
use crate::waves::{self, WaveKind};

/// A waveform family together with the parameters only it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Waveform {
    Square,
    Sawtooth,
    Triangle,
    /// A single formula, periodic with `period` (in units of π).
    Custom { formula: String, period: f64 },
    /// Ordered pieces, the last one being the default.
    Piecewise { pieces: Vec<Piece>, period: f64 },
}

impl Waveform {
    pub fn kind(&self) -> WaveKind {
        match self {
            Waveform::Square => WaveKind::Square,
            Waveform::Sawtooth => WaveKind::Sawtooth,
            Waveform::Triangle => WaveKind::Triangle,
            Waveform::Custom { .. } => WaveKind::Custom,
            Waveform::Piecewise { .. } => WaveKind::Piecewise,
        }
    }
}

/// Everything needed to compute one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub waveform: Waveform,
    pub terms: u32,
    pub amplitude: f64,
}

fn accumulate(total: &mut [f64], term: &[f64]) {
    for (y, t) in total.iter_mut().zip(term) {
        *y += t;
    }
}

/// Computes the truncated series and the exact waveform over `x`.
///
/// # Returns
/// * `Ok((approximation, original))` - both the same length as `x`
/// * `Err(SimulatorError::Formula)` - a custom formula failed
/// * `Err(SimulatorError::Input)` - the period is not a positive number
pub fn generate_fourier_series(
    request: &SeriesRequest,
    x: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), SimulatorError> {
    let SeriesRequest {
        waveform,
        terms,
        amplitude,
    } = request;

    match waveform {
        Waveform::Custom { formula, period } => {
            let func = UserFunction::custom(formula)?;
            user_function_series(&func, *period, *terms, *amplitude, x)
        }
        Waveform::Piecewise { pieces, period } => {
            let func = UserFunction::piecewise(pieces)?;
            user_function_series(&func, *period, *terms, *amplitude, x)
        }
        closed => {
            let kind = closed.kind();
            let mut y = vec![0.0; x.len()];
            for n in (1..=*terms).filter(|&n| kind.includes_harmonic(n)) {
                if let Some(term) = waves::harmonic_term(kind, x, n, *amplitude) {
                    accumulate(&mut y, &term);
                }
            }
            let original = waves::original_wave(kind, x, *amplitude)
                .unwrap_or_else(|| vec![0.0; x.len()]);
            Ok((y, original))
        }
    }
}

fn user_function_series(
    func: &UserFunction,
    period: f64,
    terms: u32,
    amplitude: f64,
    x: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), SimulatorError> {
    if !(period.is_finite() && period > 0.0) {
        return Err(InputError::Period(period.to_string()).into());
    }

    let estimator = CoefficientEstimator::new(func, period)?;
    let original = func.evaluate(x)?;

    let mut y = vec![estimator.dc_offset(); x.len()];
    for n in 1..=terms {
        let (an, bn) = estimator.coefficients(n);
        let omega = estimator.angular_frequency(n);
        for (yi, &xi) in y.iter_mut().zip(x) {
            let (sin, cos) = (omega * xi).sin_cos();
            *yi += amplitude * (an * cos + bn * sin);
        }
    }

    Ok((y, original))
}

/// Computes a complete frame, never failing.
///
/// On error the approximation and original are zero-filled to the grid
/// length and the error is attached, so plotting always gets valid data.
pub fn update(request: &SeriesRequest, x: &[f64]) -> SeriesResult {
    let kind = request.waveform.kind();
    let equation = generate_equation(request);

    match generate_fourier_series(request, x) {
        Ok((approximation, original)) => {
            log::debug!(
                "[SERIES] {} wave: {} terms, amplitude {}, {} samples",
                kind,
                request.terms,
                request.amplitude,
                x.len()
            );
            SeriesResult {
                kind,
                approximation,
                original,
                equation,
                error: None,
            }
        }
        Err(e) => {
            log::warn!("[SERIES] {} wave failed: {}", kind, e);
            SeriesResult {
                kind,
                approximation: vec![0.0; x.len()],
                original: vec![0.0; x.len()],
                equation,
                error: Some(e),
            }
        }
    }
}
