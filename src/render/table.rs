use std::fmt;
use std::io::Write;

use super::ChartRenderer;
use crate::analysis::ThroughputSummary;
use crate::error::RenderError;

const TABLE_WIDTH: usize = 60;

/// Fixed-width summary of the latest run: algorithm, mean MB/s and speedup over the baseline,
/// slowest first.
pub fn format_summary_table(summary: &ThroughputSummary) -> String {
    SummaryTable(summary).to_string()
}

struct SummaryTable<'s>(&'s ThroughputSummary);

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy_rule = "=".repeat(TABLE_WIDTH);
        let light_rule = "-".repeat(TABLE_WIDTH);

        writeln!(f)?;
        writeln!(f, "{}", heavy_rule)?;
        writeln!(f, "BENCHMARK SUMMARY")?;
        writeln!(f, "{}", heavy_rule)?;
        writeln!(f, "{:<20} {:>12} {:>10}", "Algorithm", "MB/s", "Speedup")?;
        writeln!(f, "{}", light_rule)?;
        for entry in self.0.ranked() {
            writeln!(f, "{:<20} {:>12.2} {:>9.2}x", entry.algorithm, entry.mean.as_f64(), entry.speedup)?;
        }
        writeln!(f, "{}", heavy_rule)
    }
}

impl ChartRenderer {
    pub fn render_summary_table<W: Write>(
        &self, summary: &ThroughputSummary, console: &mut W,
    ) -> Result<(), RenderError> {
        write!(console, "{}", SummaryTable(summary))?;
        console.flush()?;
        Ok(())
    }
}
