// fourier-core/src/lib.rs

//! The core logic for the Fourier series simulator.
//! This crate is responsible for waveform generation, formula parsing,
//! coefficient estimation and series assembly. It is completely headless
//! and contains no GUI code.

pub mod coefficients;
pub mod custom;
pub mod equation;
pub mod error;
pub mod expr;
pub mod grid;
pub mod input;
pub mod series;
pub mod settings;
pub mod waves;

pub use error::{FormulaError, InputError, SimulatorError};
pub use series::{SeriesRequest, Waveform};
pub use waves::WaveKind;

/// Represents the result of a single update: everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct SeriesResult {
    /// The waveform family this frame shows.
    pub kind: WaveKind,
    /// Truncated Fourier approximation, one value per grid point.
    pub approximation: Vec<f64>,
    /// Exact waveform for overlay, one value per grid point.
    pub original: Vec<f64>,
    /// Text rendering of the series.
    pub equation: String,
    /// Set when the frame could not be computed; the sequences are then zero.
    pub error: Option<SimulatorError>,
}
