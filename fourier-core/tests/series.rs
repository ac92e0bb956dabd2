use std::f64::consts::PI;

use fourier_core::custom::Piece;
use fourier_core::grid::{display_grid, SAMPLE_COUNT};
use fourier_core::input::{parse_amplitude, parse_terms};
use fourier_core::series::{generate_fourier_series, update};
use fourier_core::waves::{self, WaveKind};
use fourier_core::{FormulaError, SeriesRequest, SimulatorError, Waveform};

fn request(waveform: Waveform, terms: u32, amplitude: f64) -> SeriesRequest {
    SeriesRequest {
        waveform,
        terms,
        amplitude,
    }
}

#[test]
fn square_five_terms_end_to_end() {
    let x = display_grid(SAMPLE_COUNT);
    let result = update(&request(Waveform::Square, 5, 1.0), &x);

    assert!(result.error.is_none());
    assert_eq!(result.kind, WaveKind::Square);
    assert_eq!(result.approximation.len(), SAMPLE_COUNT);
    assert_eq!(result.original.len(), SAMPLE_COUNT);

    for (i, &xi) in x.iter().enumerate() {
        let expected: f64 = [1.0, 3.0, 5.0]
            .iter()
            .map(|&n| 4.0 / (n * PI) * (n * xi).sin())
            .sum();
        assert!((result.approximation[i] - expected).abs() < 1e-12);
    }

    let body = result
        .equation
        .strip_prefix("f(x) = 1.0 × (")
        .and_then(|s| s.strip_suffix(')'))
        .expect("closed-form equation layout");
    let terms: Vec<&str> = body.split(" + ").collect();
    assert_eq!(
        terms,
        vec![
            "4/((1π)) × sin(1x)",
            "4/((3π)) × sin(3x)",
            "4/((5π)) × sin(5x)"
        ]
    );
}

#[test]
fn odd_only_families_match_odd_restricted_sums_exactly() {
    let x = display_grid(SAMPLE_COUNT);
    for (waveform, term) in [
        (Waveform::Square, waves::square_wave as fn(&[f64], u32, f64) -> Vec<f64>),
        (Waveform::Triangle, waves::triangle_wave),
    ] {
        let (y, _) = generate_fourier_series(&request(waveform, 8, 1.3), &x).unwrap();
        let mut expected = vec![0.0; x.len()];
        for n in [1, 3, 5, 7] {
            for (e, t) in expected.iter_mut().zip(term(&x, n, 1.3)) {
                *e += t;
            }
        }
        assert_eq!(y, expected);
    }
}

#[test]
fn closed_forms_with_zero_terms_are_all_zero() {
    let x = display_grid(SAMPLE_COUNT);
    for waveform in [Waveform::Square, Waveform::Sawtooth, Waveform::Triangle] {
        let result = update(&request(waveform, 0, 2.5), &x);
        assert_eq!(result.approximation, vec![0.0; SAMPLE_COUNT]);
    }
}

#[test]
fn piecewise_overlay_follows_the_pieces() {
    let x = display_grid(SAMPLE_COUNT);
    let waveform = Waveform::Piecewise {
        pieces: vec![Piece::new("x", "x < np.pi"), Piece::new("2*x", "x >= np.pi")],
        period: 2.0,
    };
    let result = update(&request(waveform, 10, 1.0), &x);
    assert!(result.error.is_none());
    for (&xi, &yi) in x.iter().zip(&result.original) {
        let expected = if xi < PI { xi } else { 2.0 * xi };
        assert_eq!(yi, expected);
    }
}

#[test]
fn piecewise_series_tracks_a_smooth_function() {
    // |x - π| is continuous across the period boundary, so the series converges quickly.
    let x = display_grid(SAMPLE_COUNT);
    let waveform = Waveform::Piecewise {
        pieces: vec![Piece::new("np.pi - x", "x < np.pi"), Piece::new("x - np.pi", "")],
        period: 2.0,
    };
    let result = update(&request(waveform, 15, 1.0), &x);
    let worst = result
        .approximation
        .iter()
        .zip(&result.original)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    assert!(worst < 0.1, "max deviation {worst}");
}

#[test]
fn amplitude_scales_custom_harmonics_but_not_the_mean() {
    let x = display_grid(SAMPLE_COUNT);
    let custom = || Waveform::Custom {
        formula: "2 + sin(2*x)".into(),
        period: 1.0,
    };

    let result = update(&request(custom(), 3, 3.0), &x);
    assert!(result.error.is_none());
    for (i, &xi) in x.iter().enumerate() {
        let expected = 2.0 + 3.0 * (2.0 * xi).sin();
        assert!(
            (result.approximation[i] - expected).abs() < 5e-2,
            "x = {xi}: {} vs {expected}",
            result.approximation[i]
        );
        assert!((result.original[i] - (2.0 + (2.0 * xi).sin())).abs() < 1e-12);
    }

    let (flat, _) = generate_fourier_series(&request(custom(), 3, 0.0), &x).unwrap();
    assert!(flat.iter().all(|&v| (v - 2.0).abs() < 1e-9));
}

#[test]
fn malformed_formula_reports_and_zero_fills() {
    let x = display_grid(SAMPLE_COUNT);
    let waveform = Waveform::Custom {
        formula: "np.sin(2*x) + undefined".into(),
        period: 2.0,
    };
    let result = update(&request(waveform, 5, 1.0), &x);
    assert_eq!(
        result.error,
        Some(SimulatorError::Formula(FormulaError::UnknownName(
            "undefined".into()
        )))
    );
    assert_eq!(result.approximation.len(), SAMPLE_COUNT);
    assert!(result.approximation.iter().all(|&v| v == 0.0));
}

#[test]
fn form_text_flows_into_a_request() {
    let terms = parse_terms("7").unwrap();
    let amplitude = parse_amplitude("0.5").unwrap();
    let x = display_grid(SAMPLE_COUNT);
    let result = update(&request(Waveform::Sawtooth, terms, amplitude), &x);
    assert!(result.equation.starts_with("f(x) = 0.5 × (2/((1π)) × sin(1x)"));
    assert_eq!(result.equation.matches(" + ").count(), 6);
}
