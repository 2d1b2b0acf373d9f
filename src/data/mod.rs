//! Health evaluation for pm2 processes.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing of timeout strings (e.g., "10s", "500ms")
//! - [`evaluate`]: Restart and memory checks producing a [`Report`]
//! - [`severity`]: The Nagios [`Severity`] scale and exit codes
//! - [`thresholds`]: Warning/critical [`Thresholds`] parsed from comma pairs
//!
//! ## Data Flow
//!
//! ```text
//! Vec<ProcessDescriptor> + Vec<RestartSeries>
//!        │
//!        ▼
//! evaluate(.., &Thresholds)
//!        │
//!        ├──▶ restart_check() ─┐
//!        ├──▶ memory_check()  ─┴──▶ Report::record() (running max severity)
//!        ▼
//!     Report
//! ```

pub mod duration;
pub mod evaluate;
pub mod severity;
pub mod thresholds;

pub use evaluate::{evaluate, Check, CheckKind, Report};
pub use severity::Severity;
pub use thresholds::{ThresholdPair, Thresholds};
