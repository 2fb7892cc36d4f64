//! TOML configuration file loading
//!
//! The config file only supplies defaults for the global flags. Values given
//! on the command line always win.
//!
//! ```toml
//! log-level = "info"
//! log-format = "ext"
//! log-file = "/tmp/vips-version.log"
//! color = false
//! ```

use super::args::{Args, LOG_LEVELS};
use crate::core::error_handling::ContextualError;
use crate::core::logging::LOG_FORMATS;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for '{key}' in configuration file: expected {expected}")]
    InvalidValue { key: String, expected: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}

/// `<config dir>/VipsVersion/vips-version.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("VipsVersion").join("vips-version.toml"))
}

/// Load the explicit config file, or the default one if it exists.
///
/// An explicit path that does not exist is an error; a missing default file
/// just means there is no configuration.
pub fn load_config_file(config_file: Option<&Path>) -> ConfigResult<Option<toml::Table>> {
    let path = match config_file {
        Some(path) if !path.exists() => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };

    log::debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let table = toml::from_str::<toml::Table>(&contents).map_err(|e| ConfigError::Parse {
        path,
        message: e.to_string(),
    })?;
    Ok(Some(table))
}

impl Args {
    /// Fill unset global flags from a parsed config table
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> ConfigResult<()> {
        if let Some(level) = string_field(config, "log-level", &LOG_LEVELS)? {
            self.log_level.get_or_insert(level);
        }
        if let Some(format) = string_field(config, "log-format", &LOG_FORMATS)? {
            self.log_format.get_or_insert(format);
        }
        if let Some(file) = string_field(config, "log-file", &[])? {
            self.log_file.get_or_insert_with(|| PathBuf::from(file));
        }
        if let Some(value) = config.get("color") {
            let color = value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
                key: "color".to_string(),
                expected: "true or false".to_string(),
            })?;
            self.config_color = Some(color);
        }
        Ok(())
    }
}

/// String value for `key`, checked against `allowed` unless that is empty
fn string_field(
    config: &toml::Table,
    key: &str,
    allowed: &[&str],
) -> ConfigResult<Option<String>> {
    let Some(value) = config.get(key) else {
        return Ok(None);
    };

    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        expected: if allowed.is_empty() {
            "a string".to_string()
        } else {
            format!("one of {}", allowed.join(", "))
        },
    };

    let s = value.as_str().ok_or_else(invalid)?;
    if !allowed.is_empty() && !allowed.contains(&s) {
        return Err(invalid());
    }
    Ok(Some(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table(source: &str) -> toml::Table {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_config_fills_unset_values() {
        let mut args = Args::default();
        args.apply_toml_values(&table(
            r#"
            log-level = "debug"
            log-format = "json"
            log-file = "/tmp/vips.log"
            color = false
            "#,
        ))
        .unwrap();

        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.log_format.as_deref(), Some("json"));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/vips.log")));
        assert_eq!(args.config_color, Some(false));
    }

    #[test]
    fn test_command_line_takes_precedence() {
        let mut args = Args {
            log_level: Some("error".to_string()),
            ..Args::default()
        };
        args.apply_toml_values(&table(r#"log-level = "trace""#)).unwrap();
        assert_eq!(args.log_level.as_deref(), Some("error"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut args = Args::default();
        let err = args.apply_toml_values(&table(r#"log-level = "loud""#)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "log-level"));
        assert!(err.is_user_actionable());

        let err = args.apply_toml_values(&table(r#"color = "yes""#)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'color' in configuration file: expected true or false"
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut args = Args::default();
        args.apply_toml_values(&table(r#"cache-dir = "/somewhere""#)).unwrap();
        assert_eq!(args, Args::default());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log-level = \"info\"").unwrap();

        let config = load_config_file(Some(file.path())).unwrap().unwrap();
        assert_eq!(config.get("log-level").and_then(|v| v.as_str()), Some("info"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = load_config_file(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log-level = ").unwrap();
        let err = load_config_file(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
