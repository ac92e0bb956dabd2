//! # Waveform Module
//!
//! Closed-form Fourier terms for the canned waveform families and their
//! exact ("original") counterparts used for overlay comparison.
//!
//! ## Families
//! - Square: odd harmonics, `4A/(nπ) · sin(nx)`
//! - Sawtooth: every harmonic, `2A/(nπ) · sin(nx)`
//! - Triangle: odd harmonics, `8A/(π²n²) · sin(nx)`

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Selects one of the five waveform families offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveKind {
    Square,
    Sawtooth,
    Triangle,
    Custom,
    Piecewise,
}

impl WaveKind {
    pub const ALL: [WaveKind; 5] = [
        WaveKind::Square,
        WaveKind::Sawtooth,
        WaveKind::Triangle,
        WaveKind::Custom,
        WaveKind::Piecewise,
    ];

    /// Lowercase tag as typed in settings files and shown in the picker.
    pub fn as_str(self) -> &'static str {
        match self {
            WaveKind::Square => "square",
            WaveKind::Sawtooth => "sawtooth",
            WaveKind::Triangle => "triangle",
            WaveKind::Custom => "custom",
            WaveKind::Piecewise => "piecewise",
        }
    }

    /// Capitalized name for plot titles.
    pub fn title(self) -> &'static str {
        match self {
            WaveKind::Square => "Square",
            WaveKind::Sawtooth => "Sawtooth",
            WaveKind::Triangle => "Triangle",
            WaveKind::Custom => "Custom",
            WaveKind::Piecewise => "Piecewise",
        }
    }

    /// True for the families whose terms have a known closed form.
    pub fn is_closed_form(self) -> bool {
        matches!(self, WaveKind::Square | WaveKind::Sawtooth | WaveKind::Triangle)
    }

    /// Whether harmonic `n` takes part in this family's series.
    ///
    /// Square and triangle waves only contain odd harmonics. Even terms are
    /// skipped outright rather than summed as zero, so the equation text and
    /// the computed series list exactly the same harmonics.
    pub fn includes_harmonic(self, n: u32) -> bool {
        match self {
            WaveKind::Square | WaveKind::Triangle => n % 2 != 0,
            _ => true,
        }
    }
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown wave function '{}'", s))
    }
}

/// Square wave term: `(4A / (nπ)) · sin(nx)`.
pub fn square_wave(x: &[f64], n: u32, amplitude: f64) -> Vec<f64> {
    let n = n as f64;
    let scale = 4.0 * amplitude / (n * PI);
    x.iter().map(|&xi| scale * (n * xi).sin()).collect()
}

/// Sawtooth wave term: `(2A / (nπ)) · sin(nx)`.
pub fn sawtooth_wave(x: &[f64], n: u32, amplitude: f64) -> Vec<f64> {
    let n = n as f64;
    let scale = 2.0 * amplitude / (n * PI);
    x.iter().map(|&xi| scale * (n * xi).sin()).collect()
}

/// Triangle wave term: `(8A / (π²n²)) · sin(nx)`.
pub fn triangle_wave(x: &[f64], n: u32, amplitude: f64) -> Vec<f64> {
    let n = n as f64;
    let scale = 8.0 * amplitude / (PI * PI * n * n);
    x.iter().map(|&xi| scale * (n * xi).sin()).collect()
}

/// Exact square wave, `A · sign(sin x)` with `sign(0) = +1`.
pub fn square_wave_original(x: &[f64], amplitude: f64) -> Vec<f64> {
    x.iter()
        .map(|&xi| if xi.sin() >= 0.0 { amplitude } else { -amplitude })
        .collect()
}

/// Exact sawtooth wave, `A · ((x mod 2π)/π − 1)`.
pub fn sawtooth_wave_original(x: &[f64], amplitude: f64) -> Vec<f64> {
    x.iter()
        .map(|&xi| amplitude * (xi.rem_euclid(2.0 * PI) / PI - 1.0))
        .collect()
}

/// Triangle overlay, `A · (2·|2·((x mod 2π) − π)/(2π) − 1| − 1)`.
///
/// Over one window this is a linear ramp from `3A` down to `-A`, not a
/// symmetric triangle. The overlay keeps this exact formula.
pub fn triangle_wave_original(x: &[f64], amplitude: f64) -> Vec<f64> {
    x.iter()
        .map(|&xi| {
            let wrapped = xi.rem_euclid(2.0 * PI);
            amplitude * (2.0 * (2.0 * (wrapped - PI) / (2.0 * PI) - 1.0).abs() - 1.0)
        })
        .collect()
}

/// The n-th harmonic term of a closed-form family, `None` for custom kinds.
pub fn harmonic_term(kind: WaveKind, x: &[f64], n: u32, amplitude: f64) -> Option<Vec<f64>> {
    match kind {
        WaveKind::Square => Some(square_wave(x, n, amplitude)),
        WaveKind::Sawtooth => Some(sawtooth_wave(x, n, amplitude)),
        WaveKind::Triangle => Some(triangle_wave(x, n, amplitude)),
        WaveKind::Custom | WaveKind::Piecewise => None,
    }
}

/// The exact waveform of a closed-form family, `None` for custom kinds.
pub fn original_wave(kind: WaveKind, x: &[f64], amplitude: f64) -> Option<Vec<f64>> {
    match kind {
        WaveKind::Square => Some(square_wave_original(x, amplitude)),
        WaveKind::Sawtooth => Some(sawtooth_wave_original(x, amplitude)),
        WaveKind::Triangle => Some(triangle_wave_original(x, amplitude)),
        WaveKind::Custom | WaveKind::Piecewise => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_POINTS: [f64; 6] = [0.3, 1.0, 2.0, 2.9, 4.0, 5.5];

    #[test]
    fn kind_round_trips_through_its_tag() {
        for kind in WaveKind::ALL {
            assert_eq!(kind.as_str().parse::<WaveKind>(), Ok(kind));
        }
        assert_eq!(" Square ".parse::<WaveKind>(), Ok(WaveKind::Square));
        assert!("sine".parse::<WaveKind>().is_err());
    }

    #[test]
    fn odd_only_families_skip_even_harmonics() {
        assert!(WaveKind::Square.includes_harmonic(3));
        assert!(!WaveKind::Square.includes_harmonic(4));
        assert!(!WaveKind::Triangle.includes_harmonic(2));
        assert!(WaveKind::Sawtooth.includes_harmonic(2));
    }

    #[test]
    fn square_term_matches_closed_form() {
        let x = [PI / 2.0];
        let term = square_wave(&x, 1, 2.0);
        assert!((term[0] - 8.0 / PI).abs() < 1e-12);
    }

    #[test]
    fn triangle_term_falls_off_quadratically() {
        let x = [PI / 2.0];
        let first = triangle_wave(&x, 1, 1.0)[0];
        let third = triangle_wave(&x, 3, 1.0)[0];
        assert!((first - 8.0 / (PI * PI)).abs() < 1e-12);
        assert!((third + first / 9.0).abs() < 1e-12);
    }

    #[test]
    fn square_original_treats_zero_as_positive() {
        let y = square_wave_original(&[0.0, 1.0, 4.0], 1.5);
        assert_eq!(y, vec![1.5, 1.5, -1.5]);
    }

    #[test]
    fn sawtooth_original_ramps_from_minus_amplitude() {
        let y = sawtooth_wave_original(&[0.0, PI], 2.0);
        assert!((y[0] + 2.0).abs() < 1e-12);
        assert!(y[1].abs() < 1e-12);
    }

    #[test]
    fn triangle_original_follows_overlay_formula() {
        // The overlay formula descends linearly from 3A to -A across a window.
        let y = triangle_wave_original(&[0.0, PI, 1.5 * PI], 1.0);
        assert!((y[0] - 3.0).abs() < 1e-12);
        assert!((y[1] - 1.0).abs() < 1e-12);
        assert!(y[2].abs() < 1e-12);
    }

    #[test]
    fn originals_repeat_every_two_pi() {
        let shifted: Vec<f64> = SAMPLE_POINTS.iter().map(|x| x + 2.0 * PI).collect();
        for kind in [WaveKind::Square, WaveKind::Sawtooth, WaveKind::Triangle] {
            let a = original_wave(kind, &SAMPLE_POINTS, 1.0).unwrap();
            let b = original_wave(kind, &shifted, 1.0).unwrap();
            for (ya, yb) in a.iter().zip(&b) {
                assert!((ya - yb).abs() < 1e-9, "{kind} not periodic: {ya} vs {yb}");
            }
        }
    }

    #[test]
    fn custom_kinds_have_no_closed_form() {
        assert!(harmonic_term(WaveKind::Custom, &[0.0], 1, 1.0).is_none());
        assert!(original_wave(WaveKind::Piecewise, &[0.0], 1.0).is_none());
    }
}
