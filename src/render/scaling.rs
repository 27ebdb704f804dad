use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{
    drawing_error, value_axis_bound, ChartRenderer, DrawResult, AXIS_LABEL_PT, CAPTION_PT, LEGEND_PT, PALETTE,
    REFERENCE_COLOR, SCALING_FIGURE, TICK_LABEL_PT,
};
use crate::analysis::ScalingCurve;
use crate::error::RenderError;

const IDEAL_LABEL: &str = "Ideal linear scaling (model)";

impl ChartRenderer {
    /// Renders measured throughput per thread count against the ideal linear-scaling model.
    #[tracing::instrument(level = "debug", skip(self, curve))]
    pub fn render_scaling(&self, curve: &ScalingCurve, destination: &Path) -> Result<(), RenderError> {
        let y_max = value_axis_bound(
            destination,
            "throughput",
            curve.points.iter().flat_map(|p| [p.measured.as_f64(), p.ideal.as_f64()]),
            1.1,
        )?;

        let root = self.open(destination, SCALING_FIGURE)?;
        self.draw_scaling(root, curve, y_max).map_err(|err| drawing_error(destination, err))?;
        tracing::info!(destination=%destination.display(), "rendered thread scaling chart.");
        Ok(())
    }

    fn draw_scaling<DB: DrawingBackend>(
        &self, root: DrawingArea<DB, Shift>, curve: &ScalingCurve, y_max: f64,
    ) -> DrawResult<(), DB> {
        root.fill(&WHITE)?;

        let measured: Vec<(i64, f64)> = curve
            .points
            .iter()
            .map(|p| (i64::from(p.threads), p.measured.as_f64()))
            .collect();
        let ideal: Vec<(i64, f64)> = curve
            .points
            .iter()
            .map(|p| (i64::from(p.threads), p.ideal.as_f64()))
            .collect();

        let axis = ThreadAxis::new(curve);
        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} Multi-Threading Scaling", curve.algorithm), self.font(CAPTION_PT))
            .margin(self.px(10.0))
            .x_label_area_size(self.px(36.0))
            .y_label_area_size(self.px(60.0))
            .build_cartesian_2d(axis.range(), 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(axis.nr_positions())
            .x_label_formatter(&|x| axis.label(*x))
            .x_desc("Thread Count")
            .y_desc("Throughput (MB/s)")
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(WHITE.mix(0.0))
            .label_style(self.font(TICK_LABEL_PT))
            .axis_desc_style(self.font(AXIS_LABEL_PT))
            .draw()?;

        let measured_color = PALETTE[2];
        let measured_label = format!("{} measured", curve.algorithm);
        chart
            .draw_series(LineSeries::new(measured.clone(), measured_color.stroke_width(self.px(3.0))))?
            .label(measured_label)
            .legend(self.legend_line(measured_color));

        chart.draw_series(PointSeries::of_element(
            measured,
            self.px(5.0),
            measured_color.filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;

        chart
            .draw_series(DashedLineSeries::new(
                ideal,
                self.px(6.0),
                self.px(4.0),
                REFERENCE_COLOR.stroke_width(self.px(2.0)),
            ))?
            .label(IDEAL_LABEL)
            .legend(self.legend_line(REFERENCE_COLOR));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .legend_area_size(self.legend_area())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(self.font(LEGEND_PT))
            .draw()?;

        root.present()
    }
}

/// Integer thread-count axis with one position per integer and a tick label only at measured
/// thread counts.
#[derive(Debug, Clone, PartialEq)]
struct ThreadAxis {
    thread_counts: Vec<i64>,
}

impl ThreadAxis {
    fn new(curve: &ScalingCurve) -> Self {
        Self { thread_counts: curve.points.iter().map(|p| i64::from(p.threads)).collect() }
    }

    /// Measured thread counts padded by one position on either side.
    fn range(&self) -> Range<i64> {
        let lo = self.thread_counts.first().copied().unwrap_or(1);
        let hi = self.thread_counts.last().copied().unwrap_or(lo);
        (lo - 1)..(hi + 1)
    }

    fn nr_positions(&self) -> usize {
        let range = self.range();
        (range.end - range.start + 1) as usize
    }

    fn label(&self, threads: i64) -> String {
        if self.thread_counts.contains(&threads) {
            threads.to_string()
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ScalingPoint;
    use crate::elements::MegabytesPerSecond;
    use claim::{assert_err, assert_matches};
    use pretty_assertions::assert_eq;

    fn curve(points: &[(u32, f64)]) -> ScalingCurve {
        let rate = points[0].1;
        ScalingCurve {
            algorithm: "BlitzHash-MT".to_string(),
            points: points
                .iter()
                .map(|(threads, measured)| ScalingPoint {
                    threads: *threads,
                    measured: MegabytesPerSecond::new(*measured),
                    ideal: MegabytesPerSecond::new(rate * f64::from(*threads)),
                })
                .collect(),
        }
    }

    #[test]
    fn test_every_measured_thread_count_is_labelled() {
        let axis = ThreadAxis::new(&curve(&[(1, 100.0), (2, 180.0), (4, 300.0)]));
        assert_eq!(axis.range(), 0..5);
        assert_eq!(axis.nr_positions(), 6);

        let labels: Vec<String> = axis.range().chain(std::iter::once(5)).map(|x| axis.label(x)).collect();
        assert_eq!(labels, vec!["", "1", "2", "", "4", ""]);
    }

    #[test]
    fn test_thread_axis_anchored_above_one() {
        let axis = ThreadAxis::new(&curve(&[(2, 150.0), (8, 480.0)]));
        assert_eq!(axis.range(), 1..9);
        assert_eq!(axis.label(2), "2");
        assert_eq!(axis.label(8), "8");
        assert_eq!(axis.label(4), "");
    }

    #[test]
    fn test_non_finite_ideal_curve_is_rejected() -> anyhow::Result<()> {
        let out = tempfile::tempdir()?;
        let destination = out.path().join("threading_plot.png");

        let overflowing = curve(&[(1, f64::MAX), (4, f64::MAX)]);
        let result = ChartRenderer::default().render_scaling(&overflowing, &destination);
        assert_matches!(assert_err!(result), RenderError::NonFiniteAxis { .. });
        assert!(!destination.exists());
        Ok(())
    }
}
