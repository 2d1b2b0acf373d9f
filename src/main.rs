use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use check_pm2::{probe, CheckError, Options, Overrides, Report, Severity};

/// Environment variable holding a tracing filter, e.g. `CHECK_PM2_LOG=check_pm2=debug`.
const LOG_ENV: &str = "CHECK_PM2_LOG";

#[derive(Parser, Debug)]
#[command(name = "check_pm2", version)]
#[command(about = "A Nagios plugin for checking the Node.js/pm2 process metrics of a remote host")]
struct Args {
    /// The pm2 host whose metrics to collect
    #[arg(short = 'H', long)]
    hostname: Option<String>,

    /// The port to connect to on the pm2 host
    #[arg(short, long)]
    port: Option<String>,

    /// The graphite host whose metrics to query
    #[arg(short = 'G', long)]
    graphite_host: Option<String>,

    /// The port on which the graphite host is listening
    #[arg(short = 'P', long)]
    graphite_port: Option<String>,

    /// Warning levels as "<memory MB>,<restarts per minute>"
    #[arg(short, long)]
    warning: Option<String>,

    /// Critical levels as "<memory MB>,<restarts per minute>"
    #[arg(short, long)]
    critical: Option<String>,

    /// Request timeout for each upstream (e.g., "10", "10s", "500ms")
    #[arg(short, long)]
    timeout: Option<String>,

    /// Config file with default option values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            hostname: self.hostname.clone(),
            port: self.port.clone(),
            graphite_host: self.graphite_host.clone(),
            graphite_port: self.graphite_port.clone(),
            warning: self.warning.clone(),
            critical: self.critical.clone(),
            timeout: self.timeout.clone(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let status = match run(&args) {
        Ok(report) => {
            for line in report.lines() {
                println!("{}", line);
            }
            report.status()
        }
        Err(err) => {
            debug!("{:#}", err);
            println!("{}", status_line(&err));
            Severity::Unknown
        }
    };

    ExitCode::from(status.exit_code())
}

/// Resolve options and run the probe on a single-threaded runtime.
fn run(args: &Args) -> Result<Report> {
    let options = Options::resolve(&args.overrides(), args.config.as_deref())?;
    debug!(?options, "resolved options");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let report = rt.block_on(probe::run(&options))?;
    Ok(report)
}

/// The UNKNOWN line for a failed run. Setup errors outside the probe get the
/// same `UNKNOWN - ` prefix.
fn status_line(err: &anyhow::Error) -> String {
    match err.downcast_ref::<CheckError>() {
        Some(check) => check.status_line(),
        None => format!("{} - {}", Severity::Unknown, err),
    }
}

/// Log to stderr; stdout carries only status lines.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "check_pm2=info",
            _ => "check_pm2=debug",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
