use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{
    drawing_error, value_axis_bound, ChartRenderer, DrawResult, AXIS_LABEL_PT, CAPTION_PT, COMPARISON_FIGURE,
    DATA_LABEL_PT, LEGEND_PT, PALETTE, TICK_LABEL_PT, TITLE_PT,
};
use crate::analysis::ThroughputSummary;
use crate::error::RenderError;

const BASELINE_COLOR: RGBColor = RED;
const BAR_HALF_HEIGHT: f64 = 0.4;

/// Room right of the longest bar for its value annotation.
const HEADROOM: f64 = 1.2;

/// One horizontal bar panel: a bar per algorithm, bottom to top in ranked order.
struct BarPanel<'s> {
    caption: &'static str,
    x_desc: String,
    x_max: f64,
    bars: Vec<(&'s str, f64)>,
    annotate: fn(f64) -> String,
    reference: Option<(f64, String)>,
}

impl ChartRenderer {
    /// Renders absolute throughput and speedup-vs-baseline panels side by side.
    #[tracing::instrument(level = "debug", skip(self, summary))]
    pub fn render_comparison(&self, summary: &ThroughputSummary, destination: &Path) -> Result<(), RenderError> {
        let baseline = summary.baseline().algorithm.as_str();

        let absolute: Vec<(&str, f64)> =
            summary.ranked().iter().map(|e| (e.algorithm.as_str(), e.mean.as_f64())).collect();
        let absolute = BarPanel {
            caption: "Absolute Throughput",
            x_desc: "Throughput (MB/s)".to_string(),
            x_max: value_axis_bound(destination, "throughput", absolute.iter().map(|(_, v)| *v), HEADROOM)?,
            bars: absolute,
            annotate: |value| format!("{:.1}", value),
            reference: None,
        };

        let relative: Vec<(&str, f64)> =
            summary.ranked().iter().map(|e| (e.algorithm.as_str(), e.speedup)).collect();
        let relative = BarPanel {
            caption: "Relative Performance",
            x_desc: format!("Speedup vs {}", baseline),
            x_max: value_axis_bound(
                destination,
                "speedup",
                relative.iter().map(|(_, v)| *v).chain(std::iter::once(1.0)),
                HEADROOM,
            )?,
            bars: relative,
            annotate: |value| format!("{:.2}x", value),
            reference: Some((1.0, format!("{} baseline", baseline))),
        };

        let root = self.open(destination, COMPARISON_FIGURE)?;
        self.draw_comparison(root, [absolute, relative])
            .map_err(|err| drawing_error(destination, err))?;
        tracing::info!(destination=%destination.display(), "rendered throughput comparison chart.");
        Ok(())
    }

    fn draw_comparison<DB: DrawingBackend>(
        &self, root: DrawingArea<DB, Shift>, panels: [BarPanel<'_>; 2],
    ) -> DrawResult<(), DB> {
        root.fill(&WHITE)?;
        let root = root.titled("Hashing Performance Benchmark", self.font(TITLE_PT))?;
        let areas = root.split_evenly((1, 2));

        for (area, panel) in areas.iter().zip(panels) {
            self.draw_bar_panel(area, panel)?;
        }

        root.present()
    }

    fn draw_bar_panel<DB: DrawingBackend>(
        &self, area: &DrawingArea<DB, Shift>, panel: BarPanel<'_>,
    ) -> DrawResult<(), DB> {
        let nr_bars = panel.bars.len();
        let names: Vec<&str> = panel.bars.iter().map(|(name, _)| *name).collect();

        let y_range = -0.5..(nr_bars as f64 - 0.5);

        let mut chart = ChartBuilder::on(area)
            .caption(panel.caption, self.font(CAPTION_PT))
            .margin(self.px(8.0))
            .x_label_area_size(self.px(36.0))
            .y_label_area_size(self.px(96.0))
            .build_cartesian_2d(0.0..panel.x_max, y_range.clone())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(nr_bars)
            .y_label_formatter(&|y| {
                let idx = y.round();
                if 0.0 <= idx && (y - idx).abs() < 0.3 {
                    names.get(idx as usize).map(|name| name.to_string()).unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .x_desc(panel.x_desc.as_str())
            .light_line_style(WHITE.mix(0.0))
            .bold_line_style(BLACK.mix(0.15))
            .label_style(self.font(TICK_LABEL_PT))
            .axis_desc_style(self.font(AXIS_LABEL_PT))
            .draw()?;

        for (idx, (_, value)) in panel.bars.iter().enumerate() {
            let color = PALETTE[idx % PALETTE.len()];
            let y = idx as f64;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(0.0, y - BAR_HALF_HEIGHT), (*value, y + BAR_HALF_HEIGHT)],
                color.filled(),
            )))?;

            chart.draw_series(std::iter::once(Text::new(
                format!(" {}", (panel.annotate)(*value)),
                (*value, y),
                self.font(DATA_LABEL_PT)
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Left, VPos::Center)),
            )))?;
        }

        if let Some((x, label)) = panel.reference {
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(x, y_range.start), (x, y_range.end)],
                    self.px(6.0),
                    self.px(4.0),
                    BASELINE_COLOR.mix(0.7).stroke_width(self.px(2.0)),
                ))?
                .label(label)
                .legend(self.legend_line(BASELINE_COLOR));

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .legend_area_size(self.legend_area())
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(self.font(LEGEND_PT))
                .draw()?;
        }

        Ok(())
    }
}
