use plotters::{
    chart::ChartBuilder,
    prelude::{Circle, IntoDrawingArea, SVGBackend},
    series::{AreaSeries, LineSeries},
    style::{Color, IntoFont, RGBColor, TextStyle, WHITE},
};
use soma_domain::TrendPoint;

use crate::Theme;

pub const COLOR_DEFAULT: RGBColor = RGBColor(255, 77, 28);

pub const OPACITY_LINE: f64 = 0.9;
pub const OPACITY_AREA: f64 = 0.15;

pub const WIDTH_LINE: u32 = 2;
pub const SIZE_MARKER: u32 = 4;

pub const HEIGHT: u32 = 160;
pub const WIDTH_MIN: u32 = 300;
pub const WIDTH_MAX: u32 = 960;

pub const FONT: (&str, u32) = ("DM Mono", 11);

#[derive(Clone, Copy)]
struct Bounds {
    min: f32,
    max: f32,
}

impl Bounds {
    fn of(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        values.into_iter().fold(None, |bounds, value| {
            Some(match bounds {
                None => Bounds {
                    min: value,
                    max: value,
                },
                Some(Bounds { min, max }) => Bounds {
                    min: f32::min(min, value),
                    max: f32::max(max, value),
                },
            })
        })
    }

    fn min_with_margin(self) -> f32 {
        if self.min.abs() <= f32::EPSILON {
            return self.min;
        }
        self.min - self.margin()
    }

    fn max_with_margin(self) -> f32 {
        self.max + self.margin()
    }

    fn margin(self) -> f32 {
        if (self.max - self.min).abs() > f32::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        0.1
    }
}

/// Plot the weight progression of an exercise as SVG.
///
/// The sessions are spaced evenly on the x axis. The area below the line is
/// filled and the latest session is marked. No chart is created for less than
/// two sessions.
#[allow(clippy::missing_errors_doc)]
pub fn plot_trend(
    series: &[TrendPoint],
    color: &str,
    theme: Theme,
    width: u32,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if series.len() < 2 {
        return Ok(None);
    }

    let Some(bounds) = Bounds::of(series.iter().map(|p| p.weight)) else {
        return Ok(None);
    };

    #[allow(clippy::cast_precision_loss)]
    let points = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f32, p.weight))
        .collect::<Vec<_>>();
    let line_color = parse_color(color).unwrap_or(COLOR_DEFAULT);

    let mut result = String::new();

    {
        let root = SVGBackend::with_string(
            &mut result,
            (width.clamp(WIDTH_MIN, WIDTH_MAX), HEIGHT),
        )
        .into_drawing_area();
        let (foreground, background) = colors(theme);

        root.fill(&background)?;

        #[allow(clippy::cast_precision_loss)]
        let x_max = (points.len() - 1) as f32;
        let y_min = bounds.min_with_margin();

        let mut chart = ChartBuilder::on(&root)
            .margin(10f32)
            .x_label_area_size(0f32)
            .y_label_area_size(40f32)
            .build_cartesian_2d(0f32..x_max, y_min..bounds.max_with_margin())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(foreground.mix(0.3))
            .bold_line_style(foreground.mix(0.05))
            .light_line_style(foreground.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&foreground))
            .x_labels(0)
            .y_labels(4)
            .draw()?;

        chart.draw_series(AreaSeries::new(
            points.iter().copied(),
            y_min,
            line_color.mix(OPACITY_AREA),
        ))?;
        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            line_color.mix(OPACITY_LINE).stroke_width(WIDTH_LINE),
        ))?;
        chart.draw_series(
            points
                .last()
                .map(|p| Circle::new(*p, SIZE_MARKER, line_color.filled())),
        )?;

        root.present()?;
    }

    Ok(Some(result))
}

/// Parse a color in `#RRGGBB` notation.
#[must_use]
pub fn parse_color(hex: &str) -> Option<RGBColor> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn colors(theme: Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(10, 10, 10);
    match theme {
        Theme::System | Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}
