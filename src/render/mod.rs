//! Chart rendering over already derived analysis results.
//!
//! Charts are drawn with `plotters` onto a bitmap backend and saved as PNG images. Figure sizes
//! are given in inches and font sizes in points, both scaled by the configured DPI, so the
//! default 300 DPI yields print-quality images.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::RenderError;
use crate::settings::RenderSettings;

mod comparison;
mod history;
mod scaling;
mod table;

pub use table::format_summary_table;

const FONT_FAMILY: &str = "sans-serif";
const TITLE_PT: f64 = 16.0;
const CAPTION_PT: f64 = 14.0;
const AXIS_LABEL_PT: f64 = 12.0;
const TICK_LABEL_PT: f64 = 10.0;
const DATA_LABEL_PT: f64 = 10.0;
const LEGEND_PT: f64 = 10.0;

const LEGEND_SWATCH_PT: f64 = 12.0;
const LEGEND_AREA_PT: f64 = 18.0;

const POINTS_PER_INCH: f64 = 72.0;

/// Bar colors, cycled over algorithms.
const PALETTE: [RGBColor; 3] = [
    RGBColor(0xe7, 0x4c, 0x3c), // red
    RGBColor(0x34, 0x98, 0xdb), // blue
    RGBColor(0x2e, 0xcc, 0x71), // green
];

const REFERENCE_COLOR: RGBColor = RGBColor(0x95, 0xa5, 0xa6);

/// Figure dimensions in inches.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Figure {
    width: f64,
    height: f64,
}

const COMPARISON_FIGURE: Figure = Figure { width: 14.0, height: 6.0 };
const SCALING_FIGURE: Figure = Figure { width: 10.0, height: 6.0 };
const HISTORY_FIGURE: Figure = Figure { width: 12.0, height: 6.0 };

type DrawResult<T, DB> = Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChartRenderer {
    dpi: f64,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(&RenderSettings::default())
    }
}

impl ChartRenderer {
    pub fn new(settings: &RenderSettings) -> Self {
        Self { dpi: f64::from(settings.dpi) }
    }

    fn figure_pixels(&self, figure: Figure) -> (u32, u32) {
        (
            (figure.width * self.dpi).round() as u32,
            (figure.height * self.dpi).round() as u32,
        )
    }

    /// Converts a length in points to pixels at the renderer's resolution.
    fn px(&self, points: f64) -> u32 {
        ((points * self.dpi / POINTS_PER_INCH).round() as u32).max(1)
    }

    fn font(&self, points: f64) -> FontDesc<'static> {
        (FONT_FAMILY, self.px(points)).into_font()
    }

    /// Width plotters reserves for each legend swatch; the label text starts after it.
    fn legend_area(&self) -> u32 {
        self.px(LEGEND_AREA_PT)
    }

    fn legend_line<C: Color>(&self, color: C) -> impl Fn((i32, i32)) -> PathElement<(i32, i32)> {
        let length = self.px(LEGEND_SWATCH_PT) as i32;
        let style = color.stroke_width(self.px(2.0));
        move |(x, y)| PathElement::new(vec![(x, y), (x + length, y)], style)
    }

    /// Opens a bitmap drawing area sized for `figure` at `destination`, creating missing parent
    /// directories.
    fn open<'a>(
        &self, destination: &'a Path, figure: Figure,
    ) -> Result<DrawingArea<BitMapBackend<'a>, Shift>, RenderError> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|source| RenderError::Destination { path: destination.to_path_buf(), source })?;
        }

        Ok(BitMapBackend::new(destination, self.figure_pixels(figure)).into_drawing_area())
    }
}

/// Upper bound of a value axis starting at zero, with `headroom` above the largest value.
///
/// plotters cannot lay out a range with a non-finite end, so any non-finite value is rejected.
fn value_axis_bound(
    destination: &Path, axis: &str, values: impl IntoIterator<Item = f64>, headroom: f64,
) -> Result<f64, RenderError> {
    let non_finite = || RenderError::NonFiniteAxis { path: destination.to_path_buf(), axis: axis.to_string() };

    let mut max_value = 0.0_f64;
    for value in values {
        if !value.is_finite() {
            return Err(non_finite());
        }
        max_value = max_value.max(value);
    }

    let bound = max_value * headroom;
    if !bound.is_finite() {
        return Err(non_finite());
    }

    Ok(if 0.0 < bound { bound } else { 1.0 })
}

fn drawing_error<E>(destination: &Path, error: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Drawing { path: destination.to_path_buf(), message: error.to_string() }
}
