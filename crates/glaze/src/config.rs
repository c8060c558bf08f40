//! Run configuration parsed from environment variables.
//!
//! Every setting can be given through a `GLAZE_` environment variable and
//! then overridden on the command line.

use std::env;
use std::str::FromStr;

use glaze_tokens::RewriteOptions;

use crate::error::GlazeError;

/// Extensions scanned when none are given.
pub const DEFAULT_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Info` when not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes every repaired token.
    Trace,
    /// Matched recipes and rewritten segments.
    Debug,
    /// One line per updated file.
    #[default]
    Info,
    /// Files that could not be read or written.
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = GlazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(GlazeError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for one glaze run.
///
/// # Environment Variables
///
/// - `GLAZE_LOG_LEVEL`: trace, debug, info, warn, or error
/// - `GLAZE_WRITE`: persist rewrites instead of reporting them
/// - `GLAZE_INSERT_BORDER_KEYWORD`: add `border` beside a lone border colour
/// - `GLAZE_DEFAULT_BORDER_OPACITY`: give a plain `border` the default colour
///
/// Boolean variables accept `1`, `true`, `yes`, `on` and their negatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlazeConfig {
    /// Log level.
    pub log_level: LogLevel,
    /// Persist rewrites; otherwise only report them.
    pub write: bool,
    /// Emit the report as JSON.
    pub json: bool,
    /// File extensions to scan, without the leading dot.
    pub extensions: Vec<String>,
    /// Preparation rules passed to the rewrite pipeline.
    pub rewrite: RewriteOptions,
}

impl Default for GlazeConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            write: false,
            json: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect(),
            rewrite: RewriteOptions::default(),
        }
    }
}

/// Command-line values that take precedence over the environment.
///
/// Flags only ever switch a setting on; `None` and empty values leave the
/// environment's choice in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag mirrors an independent command-line switch"
)]
pub struct ConfigOverrides {
    /// `--log-level`.
    pub log_level: Option<LogLevel>,
    /// `--write`.
    pub write: bool,
    /// `--json`.
    pub json: bool,
    /// `--ext`, repeatable.
    pub extensions: Vec<String>,
    /// `--insert-border-keyword`.
    pub insert_border_keyword: bool,
    /// `--default-border-opacity`.
    pub default_border_opacity: bool,
}

impl GlazeConfig {
    /// Load configuration from environment variables.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `GlazeError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, GlazeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `GlazeError::InvalidConfig` if a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GlazeError> {
        let log_level =
            lookup("GLAZE_LOG_LEVEL").map_or_else(|| Ok(LogLevel::default()), |val| val.parse())?;
        let flag = |key: &str| lookup(key).map_or(Ok(false), |val| parse_flag(key, &val));

        Ok(Self {
            log_level,
            write: flag("GLAZE_WRITE")?,
            rewrite: RewriteOptions::default()
                .with_insert_border_keyword(flag("GLAZE_INSERT_BORDER_KEYWORD")?)
                .with_default_border_opacity(flag("GLAZE_DEFAULT_BORDER_OPACITY")?),
            ..Self::default()
        })
    }

    /// Apply command-line overrides to an existing configuration.
    ///
    /// # Errors
    ///
    /// Returns `GlazeError::InvalidConfig` if an extension is empty.
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, GlazeError> {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self.write |= overrides.write;
        self.json |= overrides.json;
        if overrides.insert_border_keyword {
            self.rewrite = self.rewrite.with_insert_border_keyword(true);
        }
        if overrides.default_border_opacity {
            self.rewrite = self.rewrite.with_default_border_opacity(true);
        }
        if !overrides.extensions.is_empty() {
            self.extensions = overrides
                .extensions
                .into_iter()
                .map(|ext| normalise_extension(&ext))
                .collect::<Result<_, _>>()?;
        }
        Ok(self)
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, GlazeError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(GlazeError::InvalidConfig(format!(
            "invalid value '{value}' for {key}, expected true or false"
        ))),
    }
}

fn normalise_extension(ext: &str) -> Result<String, GlazeError> {
    let ext = ext.trim().trim_start_matches('.');
    if ext.is_empty() {
        return Err(GlazeError::InvalidConfig(
            "file extensions must not be empty".to_owned(),
        ));
    }
    Ok(ext.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lookup(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let Err(err) = "loud".parse::<LogLevel>() else {
            panic!("expected an invalid log level");
        };
        assert!(err.to_string().contains("unknown log level"));
    }

    #[test]
    fn defaults_to_dry_run_over_script_extensions() {
        let config = GlazeConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.write);
        assert_eq!(config.extensions, vec!["tsx", "ts", "jsx", "js"]);
        assert_eq!(config.rewrite, RewriteOptions::default());
    }

    #[test]
    fn reads_every_variable() {
        let Ok(config) = GlazeConfig::from_lookup(lookup(&[
            ("GLAZE_LOG_LEVEL", "debug"),
            ("GLAZE_WRITE", "yes"),
            ("GLAZE_INSERT_BORDER_KEYWORD", "1"),
            ("GLAZE_DEFAULT_BORDER_OPACITY", "off"),
        ])) else {
            panic!("expected a valid configuration");
        };
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.write);
        assert!(config.rewrite.insert_border_keyword);
        assert!(!config.rewrite.default_border_opacity);
    }

    #[rstest]
    #[case("GLAZE_WRITE", "maybe")]
    #[case("GLAZE_LOG_LEVEL", "chatty")]
    fn rejects_invalid_variables(#[case] key: &'static str, #[case] value: &'static str) {
        let vars: &'static [(&'static str, &'static str)] = Box::leak(Box::new([(key, value)]));
        let Err(err) = GlazeConfig::from_lookup(lookup(vars)) else {
            panic!("expected {key}={value} to be rejected");
        };
        assert!(matches!(err, GlazeError::InvalidConfig(_)));
    }

    #[test]
    fn overrides_take_precedence() {
        let overrides = ConfigOverrides {
            log_level: Some(LogLevel::Error),
            write: true,
            extensions: vec![".vue".to_owned(), "tsx".to_owned()],
            default_border_opacity: true,
            ..ConfigOverrides::default()
        };
        let Ok(config) = GlazeConfig::default().apply_overrides(overrides) else {
            panic!("expected overrides to apply");
        };
        assert_eq!(config.log_level, LogLevel::Error);
        assert!(config.write);
        assert_eq!(config.extensions, vec!["vue", "tsx"]);
        assert!(config.rewrite.default_border_opacity);
        assert!(!config.rewrite.insert_border_keyword);
    }

    #[test]
    fn empty_overrides_keep_environment_values() {
        let base = GlazeConfig::default().with_log_level(LogLevel::Trace);
        let Ok(config) = base.clone().apply_overrides(ConfigOverrides::default()) else {
            panic!("expected overrides to apply");
        };
        assert_eq!(config, base);
    }

    #[test]
    fn rejects_empty_extension() {
        let overrides = ConfigOverrides {
            extensions: vec![".".to_owned()],
            ..ConfigOverrides::default()
        };
        assert!(GlazeConfig::default().apply_overrides(overrides).is_err());
    }
}
