//! One probe run: fetch, fetch, evaluate.

use tracing::{debug, info};

use crate::config::Options;
use crate::data::{evaluate, Report};
use crate::source::{short_hostname, GraphiteClient, Pm2Client};
use crate::CheckError;

/// Run every check for the configured host.
///
/// The first fetch or parse failure ends the run with that error and no
/// partial report. Threshold strings are only parsed once both fetches
/// have succeeded, and not at all when pm2 reports no processes.
pub async fn run(options: &Options) -> Result<Report, CheckError> {
    let timeout = options.timeout()?;

    let pm2 = Pm2Client::builder()
        .hostname(&options.hostname)
        .port(&options.port)
        .timeout(timeout)
        .build()?;
    let graphite = GraphiteClient::builder()
        .host(&options.graphite_host)
        .port(&options.graphite_port)
        .timeout(timeout)
        .build()?;

    let processes = pm2.fetch_processes().await?;
    let series = graphite
        .fetch_restart_series(short_hostname(&options.hostname))
        .await?;

    if processes.is_empty() {
        info!("no pm2 processes reported");
        return Ok(Report::new());
    }

    // Parsed once; a malformed pair stops the run before any line is emitted.
    let thresholds = options.thresholds()?;
    debug!(?thresholds, "evaluating");

    let report = evaluate(&processes, &series, &thresholds);
    info!(
        processes = processes.len(),
        checks = report.checks().len(),
        status = %report.status(),
        "check complete"
    );
    Ok(report)
}
