pub use model::*;

mod model;

use std::path::PathBuf;

use clap::Parser;

use crate::error::SettingsError;

/// Environment variable prefix for settings overrides, e.g. `BENCHVIZ_RENDER__DPI=150`.
pub const ENV_PREFIX: &str = "BENCHVIZ";

/// Name of the optional configuration file looked for in the working directory.
pub const CONFIG_FILE_NAME: &str = "benchviz";

/// Layers settings from, lowest to highest precedence: built-in defaults, configuration file,
/// `BENCHVIZ_` environment variables and the command line.
#[tracing::instrument(level = "debug")]
pub fn get_settings(options: &CliOptions) -> Result<Settings, SettingsError> {
    let mut builder = config::Config::builder();

    builder = match &options.config {
        Some(config_path) => builder.add_source(config::File::from(config_path.as_path()).required(true)),
        None => builder.add_source(config::File::with_name(CONFIG_FILE_NAME).required(false)),
    };

    // Add in settings from environment variables (with a prefix of BENCHVIZ and '__' as separator)
    // E.g. `BENCHVIZ_RENDER__DPI=150` would set `Settings.render.dpi`
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    if let Some(input) = &options.input {
        builder = builder.set_override("input_path", input.display().to_string())?;
    }

    if let Some(parallel_algorithm) = &options.parallel_algorithm {
        builder = builder.set_override("parallel_algorithm", parallel_algorithm.as_str())?;
    }

    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(output_dir) = &options.output_dir {
        settings.outputs = settings.outputs.rebased(output_dir);
    }

    settings.validate()?;
    tracing::info!(?settings, "settings loaded.");
    Ok(settings)
}

/// Renders throughput comparison, thread scaling and history charts from hashing benchmark
/// results.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct CliOptions {
    /// benchmark results CSV to load [default: bench_results.csv]
    pub input: Option<PathBuf>,

    /// configuration file to load instead of an optional `benchviz.*` in the working directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// directory to write the chart images into, keeping their file names
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// algorithm label of the multi-threaded variant to chart thread scaling for
    #[arg(long)]
    pub parallel_algorithm: Option<String>,

    /// log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_cli_overrides_settings_file() -> anyhow::Result<()> {
        once_cell::sync::Lazy::force(&crate::tracing::TEST_TRACING);
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("benchviz.toml");
        let mut config_file = std::fs::File::create(&config_path)?;
        writeln!(
            config_file,
            r#"
input_path = "results/from_file.csv"
parallel_algorithm = "Turbo-MT"

[outputs]
scaling = "charts/scaling.png"

[render]
dpi = 150
"#
        )?;

        let options = CliOptions::parse_from([
            "benchviz",
            "--config",
            config_path.to_str().unwrap(),
            "results/from_cli.csv",
        ]);
        let actual = assert_ok!(get_settings(&options));

        assert_eq!(actual.input_path, PathBuf::from("results/from_cli.csv"));
        assert_eq!(actual.parallel_algorithm, "Turbo-MT");
        assert_eq!(actual.outputs.scaling, PathBuf::from("charts/scaling.png"));
        assert_eq!(actual.outputs.comparison, PathBuf::from(DEFAULT_COMPARISON_PATH));
        assert_eq!(actual.render.dpi, 150);
        Ok(())
    }

    #[test]
    fn test_cli_output_dir_and_parallel_label() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("empty.toml");
        std::fs::File::create(&config_path)?;

        let options = CliOptions::parse_from([
            "benchviz",
            "-c",
            config_path.to_str().unwrap(),
            "--output-dir",
            "out",
            "--parallel-algorithm",
            "Other-MT",
        ]);
        let actual = assert_ok!(get_settings(&options));

        assert_eq!(actual.input_path, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(actual.parallel_algorithm, "Other-MT");
        assert_eq!(actual.outputs, OutputPaths::default().rebased("out"));
        assert_eq!(options.log_level, "warn");
        Ok(())
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let options = CliOptions::parse_from(["benchviz", "--config", "does/not/exist.toml"]);
        assert_err!(get_settings(&options));
    }
}
