//! pm2 metrics endpoint client.
//!
//! pm2 exposes its process list as JSON on a local HTTP port (9615 by
//! default). Only `processes[].name` and `processes[].monit.memory` are read.
//!
//! ## Example
//!
//! ```rust,no_run
//! use check_pm2::source::Pm2Client;
//!
//! # async fn run() -> Result<(), check_pm2::CheckError> {
//! let client = Pm2Client::builder()
//!     .hostname("web01.example.com")
//!     .port("9615")
//!     .build()?;
//!
//! for process in client.fetch_processes().await? {
//!     println!("{}: {:.1} MB", process.name, process.memory_mb());
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::{build_client, get_body, ProcessDescriptor, ProcessList};
use crate::CheckError;

/// Client for the pm2 process list.
#[derive(Debug, Clone)]
pub struct Pm2Client {
    client: Client,
    hostname: String,
    port: String,
}

impl Pm2Client {
    /// Create a new builder for configuring the client.
    pub fn builder() -> Pm2ClientBuilder {
        Pm2ClientBuilder::default()
    }

    /// `host:port`, as shown in status lines.
    pub fn address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.address())
    }

    /// Fetch the current process list.
    pub async fn fetch_processes(&self) -> Result<Vec<ProcessDescriptor>, CheckError> {
        let url = self.url();
        debug!(%url, "fetching pm2 process list");

        let body = get_body(&self.client, &url)
            .await
            .map_err(|source| CheckError::Pm2Unreachable {
                address: self.address(),
                source,
            })?;

        let list: ProcessList =
            serde_json::from_slice(&body).map_err(|source| CheckError::Pm2Parse {
                address: self.address(),
                source,
            })?;

        debug!(count = list.processes.len(), "received pm2 processes");
        Ok(list.processes)
    }
}

/// Builder for Pm2Client.
#[derive(Debug, Default)]
pub struct Pm2ClientBuilder {
    hostname: Option<String>,
    port: Option<String>,
    timeout: Option<Duration>,
}

impl Pm2ClientBuilder {
    /// Set the pm2 host (default: "127.0.0.1").
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set the pm2 metrics port (default: "9615").
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Set the request timeout (default: none).
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Pm2Client, CheckError> {
        Ok(Pm2Client {
            client: build_client(self.timeout)?,
            hostname: self.hostname.unwrap_or_else(|| "127.0.0.1".to_string()),
            port: self.port.unwrap_or_else(|| "9615".to_string()),
        })
    }
}
