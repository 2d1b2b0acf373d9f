//! HTTP clients for the two upstream endpoints.
//!
//! - [`Pm2Client`] reads the process list from the pm2 metrics endpoint.
//! - [`GraphiteClient`] reads the restart-rate series from Graphite.
//!
//! Both follow the same failure shape: anything that prevents a successful
//! response body (connect, DNS, timeout, non-2xx status) is an "unreachable"
//! error, and a body that does not decode is a "parse" error.

mod graphite;
mod pm2;
mod snapshot;

pub use graphite::{short_hostname, GraphiteClient, GraphiteClientBuilder};
pub use pm2::{Pm2Client, Pm2ClientBuilder};
pub use snapshot::{Datapoint, Monit, ProcessDescriptor, ProcessList, RestartSeries};

use std::time::Duration;

use reqwest::Client;

use crate::CheckError;

/// Build a client. Without a timeout the transport defaults apply.
fn build_client(timeout: Option<Duration>) -> Result<Client, CheckError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(CheckError::Client)
}

/// GET `url` and return the body of a successful response.
async fn get_body(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    Ok(body.to_vec())
}
