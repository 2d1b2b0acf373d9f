//! Warning and critical thresholds.
//!
//! Each level is given on the command line as a comma pair,
//! `"<memory MB>,<restarts per minute>"`, e.g. `"200,30"`.

use super::Severity;
use crate::error::CheckError;

/// One threshold level: a memory limit and a restart-rate limit.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdPair {
    /// Memory use in megabytes above which the level is breached.
    pub memory_mb: f64,
    /// The memory field exactly as configured, surrounding spaces included,
    /// used verbatim in messages.
    pub memory_text: String,
    /// Restarts per minute above which the level is breached.
    pub restarts_per_minute: f64,
}

impl ThresholdPair {
    /// Parse a `"<memory>,<restarts>"` pair. Fields beyond the second are ignored.
    pub fn parse(name: &'static str, value: &str) -> Result<Self, CheckError> {
        let invalid = || CheckError::InvalidThreshold {
            name,
            value: value.to_string(),
        };

        let mut fields = value.split(',');
        let memory_text = fields.next().ok_or_else(invalid)?;
        let restarts_text = fields.next().ok_or_else(invalid)?;

        let memory_mb: f64 = memory_text.trim().parse().map_err(|_| invalid())?;
        let restarts_per_minute: f64 = restarts_text.trim().parse().map_err(|_| invalid())?;

        Ok(Self {
            memory_mb,
            memory_text: memory_text.to_string(),
            restarts_per_minute,
        })
    }
}

/// Thresholds for both checks.
///
/// Comparisons are strict: a value equal to a limit does not breach it.
/// Critical is tested before warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub warning: ThresholdPair,
    pub critical: ThresholdPair,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: ThresholdPair {
                memory_mb: 200.0,
                memory_text: "200".to_string(),
                restarts_per_minute: 30.0,
            },
            critical: ThresholdPair {
                memory_mb: 400.0,
                memory_text: "400".to_string(),
                restarts_per_minute: 60.0,
            },
        }
    }
}

impl Thresholds {
    /// Parse the warning and critical pair strings.
    pub fn parse(warning: &str, critical: &str) -> Result<Self, CheckError> {
        Ok(Self {
            warning: ThresholdPair::parse("warning", warning)?,
            critical: ThresholdPair::parse("critical", critical)?,
        })
    }

    /// Severity of a memory reading in megabytes.
    pub fn memory_status(&self, memory_mb: f64) -> Severity {
        if memory_mb > self.critical.memory_mb {
            Severity::Critical
        } else if memory_mb > self.warning.memory_mb {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }

    /// Severity of a restarts-per-minute reading.
    pub fn restart_status(&self, restarts: f64) -> Severity {
        if restarts > self.critical.restarts_per_minute {
            Severity::Critical
        } else if restarts > self.warning.restarts_per_minute {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }
}
