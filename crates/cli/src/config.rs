//! Kernel configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional TOML file (`forge-kernel.toml` in the working directory unless
//! `--config` names another), then command-line flags / environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use pipeline::ForgeError;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "forge-kernel.toml";

// ---------------------------------------------------------------------------
// Config structs (matching forge-kernel.toml schema)
// ---------------------------------------------------------------------------

/// Top-level kernel config, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Path of the reference data JSON document.
    #[serde(default = "default_reference_data")]
    pub reference_data: PathBuf,

    /// `[log]` section.
    #[serde(default)]
    pub log: LogConfig,

    /// OTLP collector endpoint (e.g. `http://localhost:4317`). Span export is
    /// disabled when absent.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            reference_data: default_reference_data(),
            log: LogConfig::default(),
            otlp_endpoint: None,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".into()
}
fn default_reference_data() -> PathBuf {
    PathBuf::from(reference::DEFAULT_REFERENCE_FILE)
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Default filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".into()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

// ---------------------------------------------------------------------------
// Overrides (from CLI flags / env)
// ---------------------------------------------------------------------------

/// Values supplied on the command line; `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--bind` / `FORGE_BIND`.
    pub bind: Option<String>,
    /// `--reference-data` / `FORGE_REFERENCE_DATA`.
    pub reference_data: Option<PathBuf>,
    /// `--log-format`.
    pub log_format: Option<LogFormat>,
    /// `--log-level` / `FORGE_LOG_LEVEL`.
    pub log_level: Option<String>,
    /// `--otlp-endpoint` / `OTEL_EXPORTER_OTLP_ENDPOINT`.
    pub otlp_endpoint: Option<String>,
}

impl KernelConfig {
    /// Applies `overrides` on top of this config.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(bind) = overrides.bind {
            self.bind = bind;
        }
        if let Some(path) = overrides.reference_data {
            self.reference_data = path;
        }
        if let Some(format) = overrides.log_format {
            self.log.format = format;
        }
        if let Some(level) = overrides.log_level {
            self.log.level = level;
        }
        if overrides.otlp_endpoint.is_some() {
            self.otlp_endpoint = overrides.otlp_endpoint;
        }
        self
    }

    /// Parses [`KernelConfig::bind`].
    pub fn bind_addr(&self) -> Result<SocketAddr, ForgeError> {
        self.bind
            .parse()
            .map_err(|e| ForgeError::configuration(format!("invalid bind address '{}': {e}", self.bind)))
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Loads the config.
///
/// With `explicit` set, that file must exist. Otherwise
/// [`DEFAULT_CONFIG_FILE`] is read if present and defaults are used if not.
pub fn load_config(explicit: Option<&Path>) -> Result<KernelConfig, ForgeError> {
    match explicit {
        Some(path) => load_config_from(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_config_from(path)
            } else {
                Ok(KernelConfig::default())
            }
        }
    }
}

/// Loads the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<KernelConfig, ForgeError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ForgeError::configuration(format!("failed to read {}: {e}", path.display()))
    })?;

    toml::from_str(&content).map_err(|e| {
        ForgeError::configuration(format!("failed to parse {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: KernelConfig = toml::from_str("").unwrap();
        assert_eq!(config, KernelConfig::default());
        assert_eq!(config.bind, "127.0.0.1:8000");
        assert_eq!(config.reference_data, PathBuf::from("ipsum.json"));
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn parses_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
bind = "0.0.0.0:9000"
reference_data = "/srv/forge/ipsum.json"
otlp_endpoint = "http://collector:4317"

[log]
format = "json"
level = "debug"
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.reference_data, PathBuf::from("/srv/forge/ipsum.json"));
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ForgeError::ConfigurationError { .. }));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "bind = [").unwrap();
        assert!(load_config_from(file.path()).is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = KernelConfig::default().with_overrides(ConfigOverrides {
            bind: Some("127.0.0.1:0".into()),
            log_level: Some("trace".into()),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.bind, "127.0.0.1:0");
        assert_eq!(config.log.level, "trace");
        assert_eq!(config.reference_data, PathBuf::from("ipsum.json"));
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let config = KernelConfig {
            bind: "not-an-address".into(),
            ..KernelConfig::default()
        };
        assert!(matches!(
            config.bind_addr(),
            Err(ForgeError::ConfigurationError { .. })
        ));
        assert!(KernelConfig::default().bind_addr().is_ok());
    }
}
