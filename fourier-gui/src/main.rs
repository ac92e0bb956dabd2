//! # Fourier Series Simulator - GUI
//!
//! Interactive front end for the simulator. The user picks a waveform,
//! the number of harmonics and an amplitude (plus a formula or a list of
//! pieces for the user-defined kinds) and presses Update to redraw the
//! truncated series over the exact waveform.
//!
//! ## Architecture
//! - **Form**: raw text of every field, parsed only on Update
//! - **Core**: `fourier_core::series::update` computes one frame synchronously
//! - **View**: controls, parameter panel, canvas plot, equation and status

mod form;
mod ui;

use iced::{Element, Theme};

use fourier_core::grid::display_grid;
use fourier_core::settings::SimulatorSettings;
use fourier_core::{series, InputError, SeriesResult, WaveKind};
use form::{DisplayMode, FormState};
use ui::main_display::create_main_view;

/// Status text shown when terms or amplitude cannot be parsed.
const INPUT_ERROR_MESSAGE: &str = "Error: Please enter valid numbers for terms and amplitude";

/// Status line for a rejected form field.
fn input_error_message(error: &InputError) -> String {
    match error {
        InputError::Terms(_) | InputError::Amplitude(_) => INPUT_ERROR_MESSAGE.to_string(),
        InputError::Period(_) => format!("Error: {}", error),
    }
}

/// Main entry point for the simulator.
///
/// Installs the logger (`RUST_LOG` overrides the default `info` level) and
/// runs the Iced application with the dark theme.
pub fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("[GUI] Starting Fourier series simulator...");
    let result = iced::application(
        "Fourier Series Simulator",
        SimulatorApp::update,
        SimulatorApp::view,
    )
    .theme(SimulatorApp::theme)
    .window_size((1100.0, 900.0))
    .run();
    log::info!("[GUI] Application finished with result: {:?}", result);
    result
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    // Controls row
    WaveSelected(WaveKind),
    TermsChanged(String),
    AmplitudeChanged(String),
    Update,

    // Custom panel
    CustomFormulaChanged(String),
    CustomPeriodChanged(String),
    ToggleHelp,

    // Piecewise panel
    PiecewisePeriodChanged(String),
    AddPiece,
    RemovePiece(usize),
    PieceFormulaChanged(usize, String),
    PieceConditionChanged(usize, String),
}

/// Sampled curves of the last successful update.
#[derive(Debug, Clone)]
pub struct PlotFrame {
    pub kind: WaveKind,
    pub x: Vec<f64>,
    pub approximation: Vec<f64>,
    pub original: Vec<f64>,
}

/// UI-specific data needed for rendering the interface.
///
/// This struct contains only the data that the UI components need
#[derive(Debug, Clone)]
pub struct AppDisplayData {
    pub help_visible: bool,
    pub plot: Option<PlotFrame>,
    /// Full label text, `Equation: ...`.
    pub equation: String,
    /// Error shown under the equation, cleared by the next good update.
    pub status: Option<String>,
}

#[derive(Debug)]
struct SimulatorApp {
    form: FormState,
    /// Display grid shared by every update of the session.
    grid: Vec<f64>,
    display_data: AppDisplayData,
}

impl Default for SimulatorApp {
    /// Builds the form from the settings file (or defaults) and draws the
    /// initial series.
    fn default() -> Self {
        let settings = SimulatorSettings::load_or_default(&SimulatorSettings::default_path());

        let mut app = Self {
            form: FormState::from(&settings),
            grid: display_grid(settings.sample_count),
            display_data: AppDisplayData {
                help_visible: false,
                plot: None,
                equation: String::new(),
                status: None,
            },
        };
        app.recompute();
        log::info!("[GUI] Simulator ready with {} samples", app.grid.len());
        app
    }
}

impl SimulatorApp {
    fn update(&mut self, message: Message) {
        log::trace!("[GUI] Received message: {:?}", message);

        match message {
            Message::WaveSelected(kind) => {
                self.form.wave = kind;
                if self.form.display_mode() == DisplayMode::ClosedForm {
                    self.display_data.help_visible = false;
                }
            }
            Message::TermsChanged(value) => self.form.terms = value,
            Message::AmplitudeChanged(value) => self.form.amplitude = value,
            Message::Update => self.recompute(),

            Message::CustomFormulaChanged(value) => self.form.custom_formula = value,
            Message::CustomPeriodChanged(value) => self.form.custom_period = value,
            Message::ToggleHelp => {
                self.display_data.help_visible = !self.display_data.help_visible
            }

            Message::PiecewisePeriodChanged(value) => self.form.piecewise_period = value,
            Message::AddPiece => {
                self.form.add_piece();
                log::debug!("[GUI] Added piece {}", self.form.pieces.len());
            }
            Message::RemovePiece(index) => {
                if !self.form.remove_piece(index) {
                    log::debug!(
                        "[GUI] Kept piece {}: at least one piece is required",
                        index + 1
                    );
                }
            }
            Message::PieceFormulaChanged(index, value) => {
                self.form.set_piece_formula(index, value)
            }
            Message::PieceConditionChanged(index, value) => {
                self.form.set_piece_condition(index, value)
            }
        }
    }

    /// Parses the form and redraws the series.
    ///
    /// Invalid numbers leave the previous plot in place and name the field
    /// at fault in the status line. A formula error still produces a frame
    /// (zero-filled), with the error in the status line.
    fn recompute(&mut self) {
        let request = match self.form.build_request() {
            Ok(request) => request,
            Err(e) => {
                log::warn!("[GUI] Rejected input: {}", e);
                self.display_data.status = Some(input_error_message(&e));
                return;
            }
        };

        let SeriesResult {
            kind,
            approximation,
            original,
            equation,
            error,
        } = series::update(&request, &self.grid);

        self.display_data.equation = format!("Equation: {}", equation);
        self.display_data.status = error.map(|e| e.to_string());
        self.display_data.plot = Some(PlotFrame {
            kind,
            x: self.grid.clone(),
            approximation,
            original,
        });
    }

    fn view(&self) -> Element<'_, Message> {
        create_main_view(&self.form, &self.display_data)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}
