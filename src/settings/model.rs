use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::DEFAULT_PARALLEL_ALGORITHM;
use crate::error::SettingsError;

pub const DEFAULT_INPUT_PATH: &str = "bench_results.csv";
pub const DEFAULT_COMPARISON_PATH: &str = "bench_plot.png";
pub const DEFAULT_SCALING_PATH: &str = "threading_plot.png";
pub const DEFAULT_HISTORY_PATH: &str = "history_plot.png";
pub const DEFAULT_DPI: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_path: PathBuf,
    pub outputs: OutputPaths,

    /// Algorithm label of the multi-threaded variant charted for thread scaling.
    pub parallel_algorithm: String,
    pub render: RenderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            outputs: OutputPaths::default(),
            parallel_algorithm: DEFAULT_PARALLEL_ALGORITHM.to_string(),
            render: RenderSettings::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.parallel_algorithm.trim().is_empty() {
            return Err(SettingsError::Bootstrap {
                message: "parallel algorithm label must not be empty".to_string(),
                setting: "parallel_algorithm".to_string(),
            });
        }

        if self.render.dpi == 0 {
            return Err(SettingsError::Bootstrap {
                message: "chart resolution must be positive".to_string(),
                setting: format!("render.dpi = {}", self.render.dpi),
            });
        }

        let outputs = [&self.outputs.comparison, &self.outputs.scaling, &self.outputs.history];
        for (idx, path) in outputs.iter().enumerate() {
            if outputs[..idx].contains(path) {
                return Err(SettingsError::Bootstrap {
                    message: "each chart requires its own destination".to_string(),
                    setting: format!("outputs = {}", path.display()),
                });
            }
        }

        Ok(())
    }
}

/// Destinations of the rendered chart images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    pub comparison: PathBuf,
    pub scaling: PathBuf,
    pub history: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            comparison: PathBuf::from(DEFAULT_COMPARISON_PATH),
            scaling: PathBuf::from(DEFAULT_SCALING_PATH),
            history: PathBuf::from(DEFAULT_HISTORY_PATH),
        }
    }
}

impl OutputPaths {
    /// Moves each destination's file name under `dir`.
    pub fn rebased(&self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let rebase = |path: &Path| match path.file_name() {
            Some(file_name) => dir.join(file_name),
            None => dir.join(path),
        };

        Self {
            comparison: rebase(&self.comparison),
            scaling: rebase(&self.scaling),
            history: rebase(&self.history),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Pixels per inch of the rendered images.
    pub dpi: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { dpi: DEFAULT_DPI }
    }
}
