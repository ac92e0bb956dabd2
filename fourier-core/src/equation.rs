//! # Equation Text Module
//!
//! Human-readable rendering of the series that [`crate::series`] computes.
//! Closed-form families list every included harmonic; custom families get a
//! label naming the formula and term count.

use crate::series::{SeriesRequest, Waveform};
use crate::waves::WaveKind;

fn closed_form_term(kind: WaveKind, n: u32) -> Option<String> {
    match kind {
        WaveKind::Square => Some(format!("4/(({}π)) × sin({}x)", n, n)),
        WaveKind::Sawtooth => Some(format!("2/(({}π)) × sin({}x)", n, n)),
        WaveKind::Triangle => Some(format!("8/({}²π²) × sin({}x)", n, n)),
        WaveKind::Custom | WaveKind::Piecewise => None,
    }
}

fn describe_pieces(pieces: &[crate::custom::Piece]) -> String {
    match pieces.split_last() {
        None => String::new(),
        Some((default, conditional)) => conditional
            .iter()
            .map(|p| format!("{} for {}", p.formula, p.condition))
            .chain(std::iter::once(format!("{} otherwise", default.formula)))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// Builds the equation label for a request.
///
/// Pure string assembly; never fails. Only harmonics the series actually
/// includes are listed, so square and triangle waves show odd terms only.
pub fn generate_equation(request: &SeriesRequest) -> String {
    let footer = format!("Fourier approximation with {} terms", request.terms);

    match &request.waveform {
        Waveform::Custom { formula, .. } => format!("f(x) = {} (Original)\n{}", formula, footer),
        Waveform::Piecewise { pieces, .. } => {
            format!("f(x) = {} (Original)\n{}", describe_pieces(pieces), footer)
        }
        waveform => {
            let kind = waveform.kind();
            let body = (1..=request.terms)
                .filter(|&n| kind.includes_harmonic(n))
                .filter_map(|n| closed_form_term(kind, n))
                .collect::<Vec<_>>()
                .join(" + ");
            format!("f(x) = {:?} × ({})", request.amplitude, body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::Piece;

    fn request(waveform: Waveform, terms: u32, amplitude: f64) -> SeriesRequest {
        SeriesRequest {
            waveform,
            terms,
            amplitude,
        }
    }

    #[test]
    fn square_lists_odd_harmonics() {
        assert_eq!(
            generate_equation(&request(Waveform::Square, 5, 1.0)),
            "f(x) = 1.0 × (4/((1π)) × sin(1x) + 4/((3π)) × sin(3x) + 4/((5π)) × sin(5x))"
        );
    }

    #[test]
    fn sawtooth_lists_every_harmonic() {
        assert_eq!(
            generate_equation(&request(Waveform::Sawtooth, 2, 0.5)),
            "f(x) = 0.5 × (2/((1π)) × sin(1x) + 2/((2π)) × sin(2x))"
        );
    }

    #[test]
    fn triangle_uses_squared_denominators() {
        assert_eq!(
            generate_equation(&request(Waveform::Triangle, 4, 2.0)),
            "f(x) = 2.0 × (8/(1²π²) × sin(1x) + 8/(3²π²) × sin(3x))"
        );
    }

    #[test]
    fn zero_terms_leave_an_empty_sum() {
        assert_eq!(generate_equation(&request(Waveform::Square, 0, 1.0)), "f(x) = 1.0 × ()");
    }

    #[test]
    fn custom_names_the_formula() {
        let waveform = Waveform::Custom {
            formula: "np.sin(2*x)".into(),
            period: 2.0,
        };
        assert_eq!(
            generate_equation(&request(waveform, 5, 1.0)),
            "f(x) = np.sin(2*x) (Original)\nFourier approximation with 5 terms"
        );
    }

    #[test]
    fn piecewise_lists_pieces_with_default_last() {
        let waveform = Waveform::Piecewise {
            pieces: vec![Piece::new("x", "x < pi"), Piece::new("2*x", "x >= pi")],
            period: 2.0,
        };
        assert_eq!(
            generate_equation(&request(waveform, 3, 1.0)),
            "f(x) = x for x < pi; 2*x otherwise (Original)\nFourier approximation with 3 terms"
        );
    }
}
