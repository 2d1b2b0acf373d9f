//! Error types for the probe.
//!
//! Every variant ends the run with an UNKNOWN status. The `Display` text is
//! the status line body printed after `UNKNOWN - `.

use thiserror::Error;

use crate::data::Severity;

/// Errors that stop a check run before any result is printed.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The pm2 endpoint could not be reached or returned an error status.
    #[error("Could not collect metrics via {address}")]
    Pm2Unreachable {
        address: String,
        #[source]
        source: reqwest::Error,
    },

    /// The pm2 endpoint answered with something that is not a process list.
    #[error("Connected to {address} but could not parse response as valid JSON.")]
    Pm2Parse {
        address: String,
        #[source]
        source: serde_json::Error,
    },

    /// The Graphite render API could not be reached or returned an error status.
    #[error("Received no response from {query}")]
    GraphiteUnreachable {
        query: String,
        #[source]
        source: reqwest::Error,
    },

    /// The Graphite render API answered with something that is not a series list.
    #[error("Unable to parse response from {query} into JSON")]
    GraphiteParse {
        query: String,
        #[source]
        source: serde_json::Error,
    },

    /// A warning or critical level is not a `<memory>,<restarts>` number pair.
    #[error("Invalid {name} threshold '{value}': expected '<memory MB>,<restarts per minute>'")]
    InvalidThreshold { name: &'static str, value: String },

    /// The request timeout is not a recognised duration.
    #[error("Invalid timeout '{value}': {reason}")]
    InvalidTimeout { value: String, reason: String },

    /// Defaults, config file and environment could not be merged.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl CheckError {
    /// Status reported for this error.
    pub fn severity(&self) -> Severity {
        Severity::Unknown
    }

    /// The full line printed to stdout, e.g. `UNKNOWN - Could not collect ...`.
    pub fn status_line(&self) -> String {
        format!("{} - {}", self.severity(), self)
    }
}
