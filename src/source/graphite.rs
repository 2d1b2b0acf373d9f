//! Graphite render API client for pm2 restart counters.
//!
//! The diamond `Pm2Collector` publishes a cumulative restart counter per
//! process under `diamond.<host>.Pm2Collector.<process>.restarts`. Wrapping
//! it in `derivative()` turns it into restarts per collection interval.
//!
//! The query looks back five minutes. A derivative has no value for its first
//! point and the newest sample may not be on disk yet, so both edges of the
//! window can be null.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::{build_client, get_body, RestartSeries};
use crate::CheckError;

/// Client for the Graphite render API.
#[derive(Debug, Clone)]
pub struct GraphiteClient {
    client: Client,
    host: String,
    port: String,
}

impl GraphiteClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> GraphiteClientBuilder {
        GraphiteClientBuilder::default()
    }

    /// Render URL for the restart derivative of every process on `short_host`.
    pub fn restarts_query(&self, short_host: &str) -> String {
        format!(
            "http://{}:{}/render?&target=derivative(diamond.{}.Pm2Collector.*.restarts)&format=json&from=-5minute",
            self.host, self.port, short_host
        )
    }

    /// Fetch the restart derivative series of every process on `short_host`.
    pub async fn fetch_restart_series(
        &self,
        short_host: &str,
    ) -> Result<Vec<RestartSeries>, CheckError> {
        let query = self.restarts_query(short_host);
        debug!(%query, "querying graphite for restarts");

        let body = match get_body(&self.client, &query).await {
            Ok(body) => body,
            Err(source) => return Err(CheckError::GraphiteUnreachable { query, source }),
        };

        match serde_json::from_slice::<Vec<RestartSeries>>(&body) {
            Ok(series) => {
                debug!(targets = series.len(), "received restart series");
                Ok(series)
            }
            Err(source) => Err(CheckError::GraphiteParse { query, source }),
        }
    }
}

/// First dot-separated label of a hostname, as used in diamond metric paths.
///
/// `"web01.example.com"` becomes `"web01"`; `"127.0.0.1"` becomes `"127"`.
pub fn short_hostname(hostname: &str) -> &str {
    hostname.split('.').next().unwrap_or(hostname)
}

/// Builder for GraphiteClient.
#[derive(Debug, Default)]
pub struct GraphiteClientBuilder {
    host: Option<String>,
    port: Option<String>,
    timeout: Option<Duration>,
}

impl GraphiteClientBuilder {
    /// Set the Graphite host (default: empty).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the Graphite port (default: "80").
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
    pub fn build(self) -> Result<GraphiteClient, CheckError> {
        Ok(GraphiteClient {
            client: build_client(self.timeout)?,
            host: self.host.unwrap_or_default(),
            port: self.port.unwrap_or_else(|| "80".to_string()),
        })
    }
}
