//! Option resolution.
//!
//! Options are merged from, lowest precedence first:
//!
//! 1. built-in defaults,
//! 2. an optional config file (`--config`), keyed by option name,
//! 3. `CHECK_PM2_*` environment variables,
//! 4. command-line flags.
//!
//! ```toml
//! hostname = "web01.example.com"
//! graphite_host = "graphite.internal"
//! warning = "300,20"
//! ```
//!
//! Values stay strings here. Thresholds and the timeout are parsed when they
//! are first needed.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, Map};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::data::Thresholds;
use crate::CheckError;

/// Prefix for environment overrides, e.g. `CHECK_PM2_GRAPHITE_HOST`.
pub const ENV_PREFIX: &str = "CHECK_PM2";

pub const DEFAULT_HOSTNAME: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "9615";
pub const DEFAULT_GRAPHITE_HOST: &str = "";
pub const DEFAULT_GRAPHITE_PORT: &str = "80";
/// Memory (MB), restarts (per minute).
pub const DEFAULT_WARNING: &str = "200,30";
pub const DEFAULT_CRITICAL: &str = "400,60";

/// Fully resolved probe options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Options {
    pub hostname: String,
    pub port: String,
    pub graphite_host: String,
    pub graphite_port: String,
    pub warning: String,
    pub critical: String,
    #[serde(default)]
    pub timeout: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
            port: DEFAULT_PORT.to_string(),
            graphite_host: DEFAULT_GRAPHITE_HOST.to_string(),
            graphite_port: DEFAULT_GRAPHITE_PORT.to_string(),
            warning: DEFAULT_WARNING.to_string(),
            critical: DEFAULT_CRITICAL.to_string(),
            timeout: None,
        }
    }
}

/// Values supplied on the command line. `None` keeps the lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub hostname: Option<String>,
    pub port: Option<String>,
    pub graphite_host: Option<String>,
    pub graphite_port: Option<String>,
    pub warning: Option<String>,
    pub critical: Option<String>,
    pub timeout: Option<String>,
}

impl Options {
    /// Merge defaults, the optional config file, the process environment and `overrides`.
    pub fn resolve(overrides: &Overrides, config_file: Option<&Path>) -> Result<Self, CheckError> {
        Self::resolve_with(overrides, config_file, None)
    }

    /// Like [`Options::resolve`], reading `CHECK_PM2_*` variables from `env`
    /// instead of the process environment when a map is given.
    pub fn resolve_with(
        overrides: &Overrides,
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, CheckError> {
        let defaults = Options::default();

        let mut builder = Config::builder()
            .set_default("hostname", defaults.hostname)?
            .set_default("port", defaults.port)?
            .set_default("graphite_host", defaults.graphite_host)?
            .set_default("graphite_port", defaults.graphite_port)?
            .set_default("warning", defaults.warning)?
            .set_default("critical", defaults.critical)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let options: Options = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .set_override_option("hostname", overrides.hostname.clone())?
            .set_override_option("port", overrides.port.clone())?
            .set_override_option("graphite_host", overrides.graphite_host.clone())?
            .set_override_option("graphite_port", overrides.graphite_port.clone())?
            .set_override_option("warning", overrides.warning.clone())?
            .set_override_option("critical", overrides.critical.clone())?
            .set_override_option("timeout", overrides.timeout.clone())?
            .build()?
            .try_deserialize()?;

        Ok(options)
    }

    /// Parse the warning and critical pairs.
    pub fn thresholds(&self) -> Result<Thresholds, CheckError> {
        Thresholds::parse(&self.warning, &self.critical)
    }

    /// Parse the request timeout, if one was given.
    pub fn timeout(&self) -> Result<Option<Duration>, CheckError> {
        self.timeout
            .as_deref()
            .map(|t| {
                parse_duration(t).map_err(|e| CheckError::InvalidTimeout {
                    value: t.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}
