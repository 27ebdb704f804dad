use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{
    drawing_error, value_axis_bound, ChartRenderer, DrawResult, AXIS_LABEL_PT, CAPTION_PT, HISTORY_FIGURE, LEGEND_PT,
    TICK_LABEL_PT,
};
use crate::analysis::History;
use crate::elements::Timestamp;
use crate::error::RenderError;

const TIME_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A time series placed on the calendar axis.
type CalendarSeries<'h> = (&'h str, Vec<(DateTime<Utc>, f64)>);

impl ChartRenderer {
    /// Renders one throughput line per algorithm over wall-clock time.
    #[tracing::instrument(level = "debug", skip(self, history))]
    pub fn render_history(&self, history: &History, destination: &Path) -> Result<(), RenderError> {
        let series = history
            .series
            .iter()
            .map(|s| {
                let points = s
                    .points
                    .iter()
                    .map(|(ts, mb_s)| Ok((to_calendar(*ts)?, mb_s.as_f64())))
                    .collect::<Result<Vec<_>, RenderError>>()?;
                Ok((s.algorithm.as_str(), points))
            })
            .collect::<Result<Vec<CalendarSeries<'_>>, RenderError>>()?;

        let (start, end) = match history.time_span() {
            Some((start, end)) => (to_calendar(start)?, to_calendar(end)?),
            None => {
                let now = Utc::now();
                (now, now)
            },
        };
        let end = if start < end { end } else { start + Duration::seconds(1) };
        let y_max = value_axis_bound(
            destination,
            "throughput",
            series.iter().flat_map(|(_, points)| points.iter().map(|(_, mb_s)| *mb_s)),
            1.1,
        )?;

        let root = self.open(destination, HISTORY_FIGURE)?;
        self.draw_history(root, &series, start..end, y_max)
            .map_err(|err| drawing_error(destination, err))?;
        tracing::info!(destination=%destination.display(), "rendered performance history chart.");
        Ok(())
    }

    fn draw_history<DB: DrawingBackend>(
        &self, root: DrawingArea<DB, Shift>, series: &[CalendarSeries<'_>], time_range: std::ops::Range<DateTime<Utc>>,
        y_max: f64,
    ) -> DrawResult<(), DB> {
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Performance History", self.font(CAPTION_PT))
            .margin(self.px(10.0))
            .x_label_area_size(self.px(40.0))
            .y_label_area_size(self.px(60.0))
            .build_cartesian_2d(time_range, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_labels(6)
            .x_label_formatter(&|dt| dt.format(TIME_LABEL_FORMAT).to_string())
            .x_desc("Benchmark Time (UTC)")
            .y_desc("Throughput (MB/s)")
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(WHITE.mix(0.0))
            .label_style(self.font(TICK_LABEL_PT))
            .axis_desc_style(self.font(AXIS_LABEL_PT))
            .draw()?;

        for (idx, (algorithm, points)) in series.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(self.px(2.0))))?
                .label(*algorithm)
                .legend(self.legend_line(color));

            chart.draw_series(PointSeries::of_element(
                points.clone(),
                self.px(4.0),
                color.filled(),
                &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
            ))?;
        }

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

fn to_calendar(ts: Timestamp) -> Result<DateTime<Utc>, RenderError> {
    ts.to_utc().ok_or(RenderError::TimestampOutOfRange(ts))
}
