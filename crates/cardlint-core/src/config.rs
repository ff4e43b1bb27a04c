use std::path::Path;

use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

/// Name of the optional settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cardlint.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `warn` or `cardlint_rfc=trace`.
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub show_warnings: bool,
    pub warnings_as_errors: bool,
}

impl Settings {
    fn with_defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "warn")?
            .set_default("report.show_warnings", true)?
            .set_default("report.warnings_as_errors", false)?)
    }

    /// ## Summary
    /// Loads settings from defaults, `CARDLINT_*` environment variables and a
    /// TOML file. The file is `file` when given (and must exist), otherwise
    /// `cardlint.toml` if present.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Ok(Self::with_defaults()?
            .add_source(
                Environment::with_prefix("CARDLINT")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(file)
            .build()?
            .try_deserialize::<Self>()?)
    }

    /// ## Summary
    /// Builds settings from the defaults overlaid with a TOML document.
    ///
    /// ## Errors
    /// Returns an error if the TOML is malformed or has mistyped values.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(Self::with_defaults()?
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?)
    }
}

/// ## Summary
/// Loads `.env` into the process environment, then the settings.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(file: Option<&Path>) -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::trace!(error = %e, "No .env file loaded");
    }

    Settings::load(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.report.show_warnings);
        assert!(!settings.report.warnings_as_errors);
    }

    #[test]
    fn toml_overrides_defaults() {
        let settings = Settings::from_toml(
            "[logging]\nlevel = \"cardlint_rfc=trace\"\n\n[report]\nwarnings_as_errors = true\n",
        )
        .unwrap();
        assert_eq!(settings.logging.level, "cardlint_rfc=trace");
        assert!(settings.report.show_warnings);
        assert!(settings.report.warnings_as_errors);
    }

    #[test]
    fn mistyped_value() {
        assert!(Settings::from_toml("[report]\nshow_warnings = \"sometimes\"\n").is_err());
    }

    #[test]
    fn missing_explicit_file() {
        assert!(Settings::load(Some(Path::new("does/not/exist/cardlint.toml"))).is_err());
    }
}
