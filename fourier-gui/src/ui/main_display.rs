//! # Main Display Module
//!
//! Layout of the simulator window: the controls row, the parameter panel for
//! the selected wave, the plot, the equation label and the status line.

use iced::widget::{
    button, column, container, pick_list, row, text, text_input, Column, Space,
};
use iced::{Alignment, Color, Element, Length};

use fourier_core::WaveKind;

use super::series_plot::SeriesPlot;
use crate::form::{DisplayMode, FormState};
use crate::{AppDisplayData, Message};

const HELP_TEXT: &str = "\
Formulas use the variable x and may call:
  sin cos tan arcsin arccos arctan sinh cosh tanh
  exp log log10 log2 sqrt abs sign floor ceil
  arctan2(y, x)  power(a, b)  mod(a, b)  minimum(a, b)  maximum(a, b)
  where(condition, a, b)
Constants: pi, e. The prefixes np. and math. are accepted (np.sin, np.pi).
Operators: + - * / % ** (or ^), comparisons < <= > >= == !=,
  and combine conditions with & (and), | (or), ! (not).

Examples:
  Custom:    np.sin(x) + 0.5*np.sin(3*x)
  Custom:    where(x < pi, 1, -1)
  Piecewise: x for x < np.pi, then 2*np.pi - x for the rest

Pieces are tried from the top. The first piece whose condition holds
supplies the value; the last piece is used everywhere else and its
condition is ignored.
The period is given in multiples of π (2 means one period is 2π).";

const ERROR_COLOR: Color = Color {
    r: 0.95,
    g: 0.35,
    b: 0.35,
    a: 1.0,
};

/// Creates the complete main application view
pub fn create_main_view<'a>(
    form: &'a FormState,
    data: &'a AppDisplayData,
) -> Element<'a, Message> {
    let title = text("Fourier Series Simulator").size(28);

    let parameters = match form.display_mode() {
        DisplayMode::ClosedForm => None,
        DisplayMode::Custom => Some(create_custom_panel(form)),
        DisplayMode::Piecewise => Some(create_piecewise_panel(form)),
    };
    let help = (form.display_mode() != DisplayMode::ClosedForm && data.help_visible)
        .then(create_help_panel);

    let status = data
        .status
        .as_deref()
        .map(|message| text(message).size(14).color(ERROR_COLOR));

    let main_content = Column::new()
        .push(title)
        .push(Space::with_height(10))
        .push(create_controls(form))
        .push_maybe(parameters)
        .push_maybe(help)
        .push(create_plot_panel(data))
        .push(text(data.equation.as_str()).size(14))
        .push_maybe(status)
        .spacing(10)
        .padding(20)
        .width(Length::Fill);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Wave picker, harmonic count, amplitude and the Update button.
fn create_controls(form: &FormState) -> Element<'_, Message> {
    row![
        text("Wave Function:").size(14),
        pick_list(WaveKind::ALL, Some(form.wave), Message::WaveSelected)
            .width(Length::Fixed(140.0)),
        Space::with_width(10),
        text("Number of Terms:").size(14),
        text_input("5", &form.terms)
            .on_input(Message::TermsChanged)
            .on_submit(Message::Update)
            .width(Length::Fixed(70.0)),
        Space::with_width(10),
        text("Amplitude:").size(14),
        text_input("1.0", &form.amplitude)
            .on_input(Message::AmplitudeChanged)
            .on_submit(Message::Update)
            .width(Length::Fixed(70.0)),
        Space::with_width(10),
        button(text("Update").size(14))
            .padding([6, 14])
            .on_press(Message::Update),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn create_custom_panel(form: &FormState) -> Element<'_, Message> {
    let content = row![
        text("f(x) =").size(14),
        text_input("np.sin(2*x)", &form.custom_formula)
            .on_input(Message::CustomFormulaChanged)
            .on_submit(Message::Update)
            .width(Length::Fill),
        text("Period (×π):").size(14),
        text_input("2", &form.custom_period)
            .on_input(Message::CustomPeriodChanged)
            .on_submit(Message::Update)
            .width(Length::Fixed(60.0)),
        button(text("Help").size(14)).on_press(Message::ToggleHelp),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    panel("Custom Function", content.into())
}

fn create_piecewise_panel(form: &FormState) -> Element<'_, Message> {
    let header = row![
        text("Period (×π):").size(14),
        text_input("2", &form.piecewise_period)
            .on_input(Message::PiecewisePeriodChanged)
            .on_submit(Message::Update)
            .width(Length::Fixed(60.0)),
        Space::with_width(10),
        button(text("Add Piece").size(14)).on_press(Message::AddPiece),
        button(text("Help").size(14)).on_press(Message::ToggleHelp),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let removable = form.pieces.len() > 1;
    let pieces = form
        .pieces
        .iter()
        .enumerate()
        .fold(column![].spacing(6), |col, (i, piece)| {
            col.push(
                row![
                    text(format!("f{}(x) =", i + 1)).size(14),
                    text_input("x", &piece.formula)
                        .on_input(move |value| Message::PieceFormulaChanged(i, value))
                        .width(Length::FillPortion(2)),
                    text("for").size(14),
                    text_input("x < np.pi", &piece.condition)
                        .on_input(move |value| Message::PieceConditionChanged(i, value))
                        .width(Length::FillPortion(3)),
                    button(text("×").size(14))
                        .on_press_maybe(removable.then_some(Message::RemovePiece(i))),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            )
        });

    let content = column![
        header,
        pieces,
        text("The last piece applies wherever no earlier condition holds.").size(12),
    ]
    .spacing(8);

    panel("Piecewise Function", content.into())
}

fn create_help_panel<'a>() -> Element<'a, Message> {
    panel("Formula Help", text(HELP_TEXT).size(13).into())
}

/// Plot of the last successful update, or a placeholder before the first one.
fn create_plot_panel(data: &AppDisplayData) -> Element<'_, Message> {
    let content: Element<'_, Message> = match &data.plot {
        Some(frame) => SeriesPlot::new(
            &frame.x,
            &frame.approximation,
            &frame.original,
            format!("Fourier Series: {} Wave", frame.kind.title()),
        )
        .view(),
        None => container(text("Press Update to draw the series").size(16))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn panel<'a>(title: &'a str, content: Element<'a, Message>) -> Element<'a, Message> {
    container(
        column![text(title).size(18), content]
            .spacing(8)
            .padding(12),
    )
    .width(Length::Fill)
    .into()
}
