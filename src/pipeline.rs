use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use strum_macros::{Display, EnumIter};

use crate::analysis::{
    Analysis, HistoryAnalyzer, ScalingAnalyzer, SkipReason, ThroughputSummarizer, ThroughputSummary,
};
use crate::elements::Dataset;
use crate::error::{BenchVizError, ErrorLabel, RecordError, RenderError};
use crate::render::ChartRenderer;
use crate::settings::Settings;
use crate::store::RecordStore;

#[derive(Debug, Display, EnumIter, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum ChartKind {
    Comparison,
    Scaling,
    History,
}

#[derive(Debug)]
pub enum ChartOutcome {
    Rendered(PathBuf),
    Skipped(SkipReason),
    Failed(BenchVizError),
}

impl ChartOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    fn from_render(result: Result<(), RenderError>, destination: &std::path::Path) -> Self {
        match result {
            Ok(()) => Self::Rendered(destination.to_path_buf()),
            Err(err) => Self::Failed(err.into()),
        }
    }
}

/// What a pipeline run produced for each chart, in the order the charts were attempted.
#[derive(Debug)]
pub struct PipelineReport {
    pub records_loaded: usize,
    pub outcomes: Vec<(ChartKind, ChartOutcome)>,
}

impl PipelineReport {
    pub fn outcome(&self, kind: ChartKind) -> Option<&ChartOutcome> {
        self.outcomes.iter().find(|(k, _)| *k == kind).map(|(_, outcome)| outcome)
    }

    pub fn nr_rendered(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_rendered()).count()
    }

    pub fn nr_skipped(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_skipped()).count()
    }

    pub fn nr_failed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failed()).count()
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nr_skipped() == 0 && self.nr_failed() == 0 {
            write!(f, "All charts generated successfully!")
        } else {
            write!(
                f,
                "Generated {} of {} charts ({} skipped, {} failed)",
                self.nr_rendered(),
                self.outcomes.len(),
                self.nr_skipped(),
                self.nr_failed()
            )
        }
    }
}

/// Loads the benchmark dataset once, then derives and renders each chart in turn.
///
/// Only failing to load the dataset stops a run. A chart that cannot be produced, whether
/// skipped for lack of data or failed while analyzing or drawing, does not prevent the
/// remaining charts from being attempted.
#[derive(Debug, Clone)]
pub struct Pipeline {
    settings: Settings,
    store: RecordStore,
    throughput: ThroughputSummarizer,
    scaling: ScalingAnalyzer,
    history: HistoryAnalyzer,
    renderer: ChartRenderer,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Self {
        Self {
            store: RecordStore,
            throughput: ThroughputSummarizer,
            scaling: ScalingAnalyzer::new(settings.parallel_algorithm.as_str()),
            history: HistoryAnalyzer,
            renderer: ChartRenderer::new(&settings.render),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the pipeline with operator notices on stdout.
    pub fn run(&self) -> Result<PipelineReport, RecordError> {
        let stdout = std::io::stdout();
        let mut console = stdout.lock();
        self.run_with_console(&mut console)
    }

    #[tracing::instrument(level = "info", skip(self, console), fields(input = %self.settings.input_path.display()))]
    pub fn run_with_console<W: Write>(&self, console: &mut W) -> Result<PipelineReport, RecordError> {
        notice(console, "\nBenchmark Visualization\n");

        let dataset = self.store.load(&self.settings.input_path)?;
        tracing::info!(%dataset, "benchmark results loaded.");
        notice(console, format!("Loaded {} benchmark results", dataset.len()));

        let mut outcomes = Vec::with_capacity(3);

        let outcome = self.comparison_chart(&dataset, console);
        announce(console, ChartKind::Comparison, &outcome);
        outcomes.push((ChartKind::Comparison, outcome));

        let outcome = self.scaling_chart(&dataset);
        announce(console, ChartKind::Scaling, &outcome);
        outcomes.push((ChartKind::Scaling, outcome));

        let outcome = self.history_chart(&dataset);
        announce(console, ChartKind::History, &outcome);
        outcomes.push((ChartKind::History, outcome));

        let report = PipelineReport { records_loaded: dataset.len(), outcomes };
        notice(console, format!("\n{}\n", report));
        Ok(report)
    }

    fn comparison_chart<W: Write>(&self, dataset: &Dataset, console: &mut W) -> ChartOutcome {
        let summary: ThroughputSummary = match self.throughput.summarize(dataset) {
            Ok(summary) => summary,
            Err(err) => return ChartOutcome::Failed(err.into()),
        };

        if let Err(err) = self.renderer.render_summary_table(&summary, console) {
            tracing::warn!(error=%err, "failed to print benchmark summary table.");
        }

        let destination = self.settings.outputs.comparison.as_path();
        ChartOutcome::from_render(self.renderer.render_comparison(&summary, destination), destination)
    }

    fn scaling_chart(&self, dataset: &Dataset) -> ChartOutcome {
        match self.scaling.analyze(dataset) {
            Analysis::Skipped(reason) => ChartOutcome::Skipped(reason),
            Analysis::Ready(curve) => {
                let destination = self.settings.outputs.scaling.as_path();
                ChartOutcome::from_render(self.renderer.render_scaling(&curve, destination), destination)
            },
        }
    }

    fn history_chart(&self, dataset: &Dataset) -> ChartOutcome {
        match self.history.analyze(dataset) {
            Analysis::Skipped(reason) => ChartOutcome::Skipped(reason),
            Analysis::Ready(history) => {
                let destination = self.settings.outputs.history.as_path();
                ChartOutcome::from_render(self.renderer.render_history(&history, destination), destination)
            },
        }
    }
}

fn announce<W: Write>(console: &mut W, kind: ChartKind, outcome: &ChartOutcome) {
    match outcome {
        ChartOutcome::Rendered(path) => {
            notice(console, format!("Saved {} chart: {}", kind, path.display()));
        },
        ChartOutcome::Skipped(reason) => {
            tracing::info!(chart=%kind, %reason, "skipped chart.");
            notice(console, format!("Skipping {} chart: {}", kind, reason));
        },
        ChartOutcome::Failed(err) => {
            tracing::error!(chart=%kind, error=%err, error_label=%err.label(), "failed to produce chart.");
            notice(console, format!("Failed to produce {} chart: {}", kind, err));
        },
    }
}

fn notice<W: Write>(console: &mut W, message: impl fmt::Display) {
    if let Err(err) = writeln!(console, "{}", message) {
        tracing::warn!(error=?err, "failed to write operator notice.");
    }
}
