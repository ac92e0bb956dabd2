//! # Series Plot Widget
//!
//! Draws the truncated Fourier approximation as a solid line over the exact
//! waveform as a dashed line, on axes labelled in multiples of π.

use iced::widget::canvas::{self, Frame, Geometry, LineDash, Path, Stroke, Text};
use iced::widget::container;
use iced::{alignment, mouse, Color, Element, Point, Rectangle, Renderer, Theme};
use std::f64::consts::PI;

const MARGIN_LEFT: f32 = 56.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 36.0;
const MARGIN_BOTTOM: f32 = 36.0;

/// Fraction of the data range added above and below the curves.
const Y_PADDING: f64 = 0.1;
const Y_GRID_LINES: usize = 5;

const X_TICKS: [(f64, &str); 5] = [
    (0.0, "0"),
    (0.5 * PI, "π/2"),
    (PI, "π"),
    (1.5 * PI, "3π/2"),
    (2.0 * PI, "2π"),
];

const APPROXIMATION_COLOR: Color = Color {
    r: 0.2,
    g: 0.6,
    b: 0.86,
    a: 1.0,
};
const ORIGINAL_COLOR: Color = Color {
    r: 0.95,
    g: 0.6,
    b: 0.2,
    a: 1.0,
};
const GRID_COLOR: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.12,
};

/// Plot of one frame, borrowing the samples of the last successful update.
#[derive(Debug, Clone)]
pub struct SeriesPlot<'a> {
    x: &'a [f64],
    approximation: &'a [f64],
    original: &'a [f64],
    title: String,
}

impl<'a> SeriesPlot<'a> {
    pub fn new(
        x: &'a [f64],
        approximation: &'a [f64],
        original: &'a [f64],
        title: String,
    ) -> Self {
        Self {
            x,
            approximation,
            original,
            title,
        }
    }

    pub fn view(self) -> Element<'a, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fill),
        )
        .into()
    }

    /// Vertical extent covering both curves, padded so lines do not touch the frame.
    fn y_range(&self) -> (f64, f64) {
        let (min, max) = self
            .approximation
            .iter()
            .chain(self.original)
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() {
            return (-1.0, 1.0);
        }
        if max - min < 1e-9 {
            return (min - 1.0, max + 1.0);
        }
        let pad = (max - min) * Y_PADDING;
        (min - pad, max + pad)
    }
}

/// Maps data coordinates onto the plot rectangle.
struct Axes {
    area: Rectangle,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Axes {
    fn point(&self, x: f64, y: f64) -> Point {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        let px = self.area.x + ((x - x0) / (x1 - x0)) as f32 * self.area.width;
        let py = self.area.y + ((y1 - y) / (y1 - y0)) as f32 * self.area.height;
        Point::new(px, py)
    }

    fn curve(&self, x: &[f64], y: &[f64]) -> Path {
        Path::new(|builder| {
            for (i, (&xi, &yi)) in x.iter().zip(y).enumerate() {
                let p = self.point(xi, yi);
                if i == 0 {
                    builder.move_to(p);
                } else {
                    builder.line_to(p);
                }
            }
        })
    }
}

fn grid_stroke() -> Stroke<'static> {
    Stroke::default().with_width(1.0).with_color(GRID_COLOR)
}

fn label(content: String, position: Point, color: Color, size: f32) -> Text {
    Text {
        content,
        position,
        color,
        size: size.into(),
        horizontal_alignment: alignment::Horizontal::Center,
        vertical_alignment: alignment::Vertical::Center,
        ..Text::default()
    }
}

impl<Message> canvas::Program<Message> for SeriesPlot<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let text_color = theme.palette().text;

        let area = Rectangle {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: bounds.width - MARGIN_LEFT - MARGIN_RIGHT,
            height: bounds.height - MARGIN_TOP - MARGIN_BOTTOM,
        };
        if !area.width.is_finite() || area.width <= 0.0 || area.height <= 0.0 {
            return vec![frame.into_geometry()];
        }

        frame.fill_text(label(
            self.title.clone(),
            Point::new(bounds.width / 2.0, MARGIN_TOP / 2.0),
            text_color,
            18.0,
        ));

        let x_range = match (self.x.first(), self.x.last()) {
            (Some(&first), Some(&last)) if last > first => (first, last),
            _ => (0.0, 2.0 * PI),
        };
        let axes = Axes {
            area,
            x_range,
            y_range: self.y_range(),
        };

        for (value, tick) in X_TICKS {
            if value < x_range.0 || value > x_range.1 {
                continue;
            }
            let top = axes.point(value, axes.y_range.1);
            let bottom = axes.point(value, axes.y_range.0);
            frame.stroke(&Path::line(top, bottom), grid_stroke());
            frame.fill_text(label(
                tick.to_string(),
                Point::new(bottom.x, bottom.y + 14.0),
                text_color,
                13.0,
            ));
        }

        let (y0, y1) = axes.y_range;
        for i in 0..Y_GRID_LINES {
            let value = y0 + (y1 - y0) * i as f64 / (Y_GRID_LINES - 1) as f64;
            let left = axes.point(x_range.0, value);
            let right = axes.point(x_range.1, value);
            frame.stroke(&Path::line(left, right), grid_stroke());
            frame.fill_text(Text {
                horizontal_alignment: alignment::Horizontal::Right,
                ..label(
                    format!("{:.2}", value),
                    Point::new(left.x - 6.0, left.y),
                    text_color,
                    12.0,
                )
            });
        }

        if y0 < 0.0 && y1 > 0.0 {
            let zero = Path::line(axes.point(x_range.0, 0.0), axes.point(x_range.1, 0.0));
            frame.stroke(
                &zero,
                Stroke::default()
                    .with_width(1.0)
                    .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.35)),
            );
        }

        frame.fill_text(label(
            "x".to_string(),
            Point::new(area.x + area.width, bounds.height - 10.0),
            text_color,
            14.0,
        ));
        frame.fill_text(label(
            "f(x)".to_string(),
            Point::new(MARGIN_LEFT / 2.0, MARGIN_TOP / 2.0),
            text_color,
            14.0,
        ));

        let dashed = Stroke {
            line_dash: LineDash {
                segments: &[8.0, 5.0],
                offset: 0,
            },
            ..Stroke::default()
                .with_width(1.5)
                .with_color(ORIGINAL_COLOR)
        };
        let solid = Stroke::default()
            .with_width(2.0)
            .with_color(APPROXIMATION_COLOR);

        if !self.original.is_empty() {
            frame.stroke(&axes.curve(self.x, self.original), dashed.clone());
        }
        if !self.approximation.is_empty() {
            frame.stroke(&axes.curve(self.x, self.approximation), solid.clone());
        }

        // Legend, top right corner of the plot area.
        let legend_x = area.x + area.width - 150.0;
        for (row, (name, stroke)) in [("Fourier Series", solid), ("Original", dashed)]
            .into_iter()
            .enumerate()
        {
            let y = area.y + 14.0 + row as f32 * 18.0;
            let sample = Path::line(Point::new(legend_x, y), Point::new(legend_x + 28.0, y));
            frame.stroke(&sample, stroke);
            frame.fill_text(Text {
                horizontal_alignment: alignment::Horizontal::Left,
                ..label(
                    name.to_string(),
                    Point::new(legend_x + 36.0, y),
                    text_color,
                    13.0,
                )
            });
        }

        vec![frame.into_geometry()]
    }
}
