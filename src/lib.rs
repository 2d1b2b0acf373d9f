//! # check-pm2
//!
//! A Nagios plugin and library for checking Node.js processes managed by pm2.
//!
//! Each run reads the process list from pm2's metrics endpoint and the
//! restart-rate series from Graphite, then checks every process twice:
//!
//! - **Restarts**: the highest `derivative(...restarts)` value over the last
//!   five minutes against the restarts-per-minute thresholds
//! - **Memory**: resident memory in MB against the memory thresholds
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌──────────────────────────┐    ┌──────────┐    ┌────────┐
//! │  config  │───▶│         source           │───▶│   data   │───▶│ stdout │
//! │ (Options)│    │ Pm2Client  GraphiteClient│    │(evaluate)│    │ + exit │
//! └──────────┘    └──────────────────────────┘    └──────────┘    └────────┘
//!                         ▲           ▲
//!                     pm2 :9615    Graphite /render
//! ```
//!
//! - **[`config`]**: Option defaults layered with config file, environment and flags
//! - **[`source`]**: HTTP clients and payload types for pm2 and Graphite
//! - **[`data`]**: [`Severity`], [`Thresholds`] and the pure evaluator producing a [`Report`]
//! - **[`probe`]**: Runs one fetch-and-evaluate pass
//!
//! ## Usage
//!
//! ### As a plugin
//!
//! ```bash
//! check_pm2 -H web01.example.com -G graphite.internal -w 200,30 -c 400,60
//! ```
//!
//! Exit codes follow the plugin convention: 0 OK, 1 WARNING, 2 CRITICAL,
//! 3 UNKNOWN.
//!
//! ### As a library
//!
//! ```
//! use check_pm2::source::{Datapoint, ProcessDescriptor, RestartSeries};
//! use check_pm2::{evaluate, Severity, Thresholds};
//!
//! let processes = vec![ProcessDescriptor::new("api", 250_000_000.0)];
//! let series = vec![RestartSeries {
//!     target: "derivative(diamond.web01.Pm2Collector.api.restarts)".to_string(),
//!     datapoints: vec![Datapoint(None, Some(0.0)), Datapoint(Some(2.0), Some(60.0))],
//! }];
//!
//! let report = evaluate(&processes, &series, &Thresholds::default());
//! assert_eq!(report.status(), Severity::Warning);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod probe;
pub mod source;

// Re-export main types for convenience
pub use config::{Options, Overrides};
pub use data::{evaluate, Check, CheckKind, Report, Severity, ThresholdPair, Thresholds};
pub use error::CheckError;
