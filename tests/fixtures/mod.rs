#![allow(dead_code)]

use std::path::{Path, PathBuf};

use benchviz::error::{BenchVizError, RenderError};
use benchviz::settings::{OutputPaths, RenderSettings, Settings};
use benchviz::{ChartKind, ChartOutcome};

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

/// Settings reading the named fixture and writing low resolution charts under `output_dir`.
pub fn settings_for(data_file: &str, output_dir: &Path) -> Settings {
    Settings {
        input_path: data_path(data_file),
        outputs: OutputPaths::default().rebased(output_dir),
        render: RenderSettings { dpi: 72 },
        ..Settings::default()
    }
}

/// Pixel size of each chart at the fixtures' 72 DPI: figure inches times DPI.
pub fn expected_pixels(kind: ChartKind) -> (u32, u32) {
    match kind {
        ChartKind::Comparison => (14 * 72, 6 * 72),
        ChartKind::Scaling => (10 * 72, 6 * 72),
        ChartKind::History => (12 * 72, 6 * 72),
    }
}

/// Whether drawing failed only because no system font could be loaded, as on bare headless hosts.
pub fn is_missing_font(outcome: &ChartOutcome) -> bool {
    matches!(
        outcome,
        ChartOutcome::Failed(BenchVizError::Render(RenderError::Drawing { message, .. }))
            if message.contains("Font loading error")
    )
}

/// Asserts the chart was written as a non-empty PNG of the expected size. The only tolerated
/// failure is a host without fonts.
pub fn assert_rendered(kind: ChartKind, outcome: &ChartOutcome) {
    match outcome {
        ChartOutcome::Rendered(path) => {
            let metadata = std::fs::metadata(path).unwrap_or_else(|err| panic!("{} chart missing: {}", kind, err));
            assert!(0 < metadata.len(), "{} chart is empty: {}", kind, path.display());

            let actual = image::image_dimensions(path)
                .unwrap_or_else(|err| panic!("{} chart unreadable: {}", kind, err));
            assert_eq!(actual, expected_pixels(kind), "{} chart size", kind);
        },
        failed if is_missing_font(failed) => {
            tracing::warn!(chart=%kind, ?failed, "no fonts available to draw chart on this host.");
        },
        other => panic!("{} chart not rendered: {:?}", kind, other),
    }
}
