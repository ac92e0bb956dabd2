//! # Form State Module
//!
//! Raw text of every input field, kept exactly as typed until the user
//! presses Update. Also owns the piecewise entry list and its rule that at
//! least one entry always remains.

use fourier_core::custom::Piece;
use fourier_core::input::{parse_amplitude, parse_period, parse_terms};
use fourier_core::settings::{default_piece, SimulatorSettings};
use fourier_core::{InputError, SeriesRequest, WaveKind, Waveform};

/// Which parameter panel is shown below the controls row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    ClosedForm,
    Custom,
    Piecewise,
}

impl From<WaveKind> for DisplayMode {
    fn from(kind: WaveKind) -> Self {
        match kind {
            WaveKind::Custom => DisplayMode::Custom,
            WaveKind::Piecewise => DisplayMode::Piecewise,
            _ => DisplayMode::ClosedForm,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub wave: WaveKind,
    pub terms: String,
    pub amplitude: String,
    pub custom_formula: String,
    pub custom_period: String,
    pub piecewise_period: String,
    pub pieces: Vec<Piece>,
}

impl From<&SimulatorSettings> for FormState {
    fn from(settings: &SimulatorSettings) -> Self {
        let mut pieces = settings.pieces.clone();
        if pieces.is_empty() {
            pieces.push(default_piece(1));
        }
        Self {
            wave: settings.wave,
            terms: settings.terms.to_string(),
            amplitude: format!("{:?}", settings.amplitude),
            custom_formula: settings.custom_formula.clone(),
            custom_period: settings.custom_period.to_string(),
            piecewise_period: settings.piecewise_period.to_string(),
            pieces,
        }
    }
}

impl FormState {
    pub fn display_mode(&self) -> DisplayMode {
        self.wave.into()
    }

    /// Appends a piece with the default formula and condition for its position.
    pub fn add_piece(&mut self) {
        self.pieces.push(default_piece(self.pieces.len() + 1));
    }

    /// Removes the piece at `index` unless it is the last one left.
    ///
    /// # Returns
    /// * `true` if a piece was removed
    pub fn remove_piece(&mut self, index: usize) -> bool {
        if self.pieces.len() > 1 && index < self.pieces.len() {
            self.pieces.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_piece_formula(&mut self, index: usize, formula: String) {
        if let Some(piece) = self.pieces.get_mut(index) {
            piece.formula = formula;
        }
    }

    pub fn set_piece_condition(&mut self, index: usize, condition: String) {
        if let Some(piece) = self.pieces.get_mut(index) {
            piece.condition = condition;
        }
    }

    /// Parses the numeric fields and assembles a request for the current wave.
    ///
    /// Formulas are not checked here; they are reported by the series
    /// computation itself.
    pub fn build_request(&self) -> Result<SeriesRequest, InputError> {
        let terms = parse_terms(&self.terms)?;
        let amplitude = parse_amplitude(&self.amplitude)?;

        let waveform = match self.wave {
            WaveKind::Square => Waveform::Square,
            WaveKind::Sawtooth => Waveform::Sawtooth,
            WaveKind::Triangle => Waveform::Triangle,
            WaveKind::Custom => Waveform::Custom {
                formula: self.custom_formula.clone(),
                period: parse_period(&self.custom_period)?,
            },
            WaveKind::Piecewise => Waveform::Piecewise {
                pieces: self.pieces.clone(),
                period: parse_period(&self.piecewise_period)?,
            },
        };

        Ok(SeriesRequest {
            waveform,
            terms,
            amplitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::from(&SimulatorSettings::default())
    }

    #[test]
    fn defaults_show_as_typed_text() {
        let form = form();
        assert_eq!(form.terms, "5");
        assert_eq!(form.amplitude, "1.0");
        assert_eq!(form.custom_period, "2");
        assert_eq!(form.display_mode(), DisplayMode::ClosedForm);
    }

    #[test]
    fn display_mode_follows_wave() {
        let mut form = form();
        form.wave = WaveKind::Custom;
        assert_eq!(form.display_mode(), DisplayMode::Custom);
        form.wave = WaveKind::Piecewise;
        assert_eq!(form.display_mode(), DisplayMode::Piecewise);
        form.wave = WaveKind::Triangle;
        assert_eq!(form.display_mode(), DisplayMode::ClosedForm);
    }

    #[test]
    fn new_pieces_get_positional_conditions() {
        let mut form = form();
        form.add_piece();
        form.add_piece();
        let conditions: Vec<&str> = form.pieces.iter().map(|p| p.condition.as_str()).collect();
        assert_eq!(conditions, vec!["x < 1*np.pi", "x < 2*np.pi", "x < 3*np.pi"]);
    }

    #[test]
    fn last_piece_cannot_be_removed() {
        let mut form = form();
        assert!(!form.remove_piece(0));
        assert_eq!(form.pieces.len(), 1);

        form.add_piece();
        assert!(!form.remove_piece(5));
        assert!(form.remove_piece(0));
        assert_eq!(form.pieces, vec![default_piece(2)]);
    }

    #[test]
    fn piece_edits_target_one_entry() {
        let mut form = form();
        form.add_piece();
        form.set_piece_formula(1, "2*x".into());
        form.set_piece_condition(0, "x < np.pi".into());
        form.set_piece_formula(9, "ignored".into());
        assert_eq!(form.pieces[0], Piece::new("x", "x < np.pi"));
        assert_eq!(form.pieces[1], Piece::new("2*x", "x < 2*np.pi"));
    }

    #[test]
    fn request_for_closed_form_wave() {
        let request = form().build_request().unwrap();
        assert_eq!(request.waveform, Waveform::Square);
        assert_eq!(request.terms, 5);
        assert_eq!(request.amplitude, 1.0);
    }

    #[test]
    fn request_for_custom_wave_carries_period() {
        let mut form = form();
        form.wave = WaveKind::Custom;
        form.custom_period = "1.5".into();
        let request = form.build_request().unwrap();
        assert_eq!(
            request.waveform,
            Waveform::Custom {
                formula: "np.sin(2*x)".into(),
                period: 1.5
            }
        );
    }

    #[test]
    fn invalid_numbers_are_input_errors() {
        let mut form = form();
        form.terms = "abc".into();
        assert_eq!(form.build_request(), Err(InputError::Terms("abc".into())));

        let mut form = self::form();
        form.amplitude = "".into();
        assert_eq!(form.build_request(), Err(InputError::Amplitude("".into())));

        let mut form = self::form();
        form.wave = WaveKind::Piecewise;
        form.piecewise_period = "-2".into();
        assert_eq!(form.build_request(), Err(InputError::Period("-2".into())));
    }

    #[test]
    fn closed_form_waves_ignore_bad_period_fields() {
        let mut form = form();
        form.custom_period = "nonsense".into();
        assert!(form.build_request().is_ok());
    }
}
