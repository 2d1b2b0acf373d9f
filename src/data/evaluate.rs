//! Per-process health evaluation.
//!
//! Turns the pm2 process list and the Graphite restart series into status
//! lines. Evaluation is pure: the same inputs always yield the same
//! [`Report`], and nothing is printed here.

use tracing::debug;

use super::{Severity, Thresholds};
use crate::source::{ProcessDescriptor, RestartSeries};

/// Which signal a check looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Restarts,
    Memory,
}

/// Outcome of one check against one process.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub process: String,
    pub kind: CheckKind,
    pub severity: Severity,
    pub message: String,
}

/// Ordered check results with the worst severity seen so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    checks: Vec<Check>,
    status: Severity,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a check. The aggregate status only ever rises.
    pub fn record(&mut self, check: Check) {
        self.status = self.status.max(check.severity);
        self.checks.push(check);
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Worst severity across every recorded check, `Ok` when empty.
    pub fn status(&self) -> Severity {
        self.status
    }

    /// Status lines in evaluation order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.checks.iter().map(|c| c.message.as_str())
    }
}

/// Evaluate every process: a restart check followed by a memory check.
pub fn evaluate(
    processes: &[ProcessDescriptor],
    series: &[RestartSeries],
    thresholds: &Thresholds,
) -> Report {
    processes.iter().fold(Report::new(), |mut report, process| {
        report.record(restart_check(process, series, thresholds));
        report.record(memory_check(process, thresholds));
        report
    })
}

/// Compare the highest restart derivative in the lookback window.
///
/// The first series whose target mentions `"<name>.restarts"` is used. No such
/// series, or one with only null points, gives an UNKNOWN check.
pub fn restart_check(
    process: &ProcessDescriptor,
    series: &[RestartSeries],
    thresholds: &Thresholds,
) -> Check {
    let max_restarts = series
        .iter()
        .find(|s| s.belongs_to(&process.name))
        .and_then(RestartSeries::max_value);

    let Some(max_restarts) = max_restarts else {
        return Check {
            process: process.name.clone(),
            kind: CheckKind::Restarts,
            severity: Severity::Unknown,
            message: format!(
                "{} - No recent data on the change in restarts for process {}",
                Severity::Unknown,
                process.name
            ),
        };
    };

    let severity = thresholds.restart_status(max_restarts);
    debug!(process = %process.name, max_restarts, %severity, "restart check");

    Check {
        process: process.name.clone(),
        kind: CheckKind::Restarts,
        severity,
        message: format!(
            "{} - process '{}' has recently restarted {} times within a minute",
            severity,
            process.name,
            max_restarts.trunc() as i64
        ),
    }
}

/// Compare resident memory in megabytes.
pub fn memory_check(process: &ProcessDescriptor, thresholds: &Thresholds) -> Check {
    let memory_mb = process.memory_mb();
    let severity = thresholds.memory_status(memory_mb);
    debug!(process = %process.name, memory_mb, %severity, "memory check");

    let limit = match severity {
        Severity::Critical => Some(&thresholds.critical.memory_text),
        Severity::Warning => Some(&thresholds.warning.memory_text),
        _ => None,
    };

    let message = match limit {
        Some(limit) => format!(
            "{} - process '{}' memory use is {:.6} (> {} threshold)",
            severity, process.name, memory_mb, limit
        ),
        None => format!(
            "{} - process '{}' memory use is {:.6}",
            severity, process.name, memory_mb
        ),
    };

    Check {
        process: process.name.clone(),
        kind: CheckKind::Memory,
        severity,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Datapoint;

    fn series(name: &str, values: &[Option<f64>]) -> RestartSeries {
        RestartSeries {
            target: format!("derivative(diamond.web01.Pm2Collector.{}.restarts)", name),
            datapoints: values
                .iter()
                .enumerate()
                .map(|(i, v)| Datapoint(*v, Some(1_700_000_000.0 + 60.0 * i as f64)))
                .collect(),
        }
    }

    #[test]
    fn test_memory_critical() {
        let process = ProcessDescriptor::new("api", 450_000_000.0);
        let check = memory_check(&process, &Thresholds::default());

        assert_eq!(check.severity, Severity::Critical);
        assert_eq!(
            check.message,
            "CRITICAL - process 'api' memory use is 450.000000 (> 400 threshold)"
        );
    }

    #[test]
    fn test_memory_warning() {
        let process = ProcessDescriptor::new("api", 250_000_000.0);
        let check = memory_check(&process, &Thresholds::default());

        assert_eq!(check.severity, Severity::Warning);
        assert_eq!(
            check.message,
            "WARNING - process 'api' memory use is 250.000000 (> 200 threshold)"
        );
    }

    #[test]
    fn test_memory_message_uses_threshold_text_verbatim() {
        let process = ProcessDescriptor::new("api", 450_000_000.0);
        let thresholds = Thresholds::parse("200,30", " 400,60").unwrap();
        let check = memory_check(&process, &thresholds);

        assert_eq!(
            check.message,
            "CRITICAL - process 'api' memory use is 450.000000 (>  400 threshold)"
        );
    }

    #[test]
    fn test_memory_ok_at_threshold() {
        let process = ProcessDescriptor::new("api", 200_000_000.0);
        let check = memory_check(&process, &Thresholds::default());

        assert_eq!(check.severity, Severity::Ok);
        assert_eq!(check.message, "OK - process 'api' memory use is 200.000000");
    }

    #[test]
    fn test_restart_warning_ignores_nulls() {
        let process = ProcessDescriptor::new("api", 0.0);
        let data = vec![series("api", &[None, Some(45.0), None])];
        let check = restart_check(&process, &data, &Thresholds::default());

        assert_eq!(check.kind, CheckKind::Restarts);
        assert_eq!(check.severity, Severity::Warning);
        assert_eq!(
            check.message,
            "WARNING - process 'api' has recently restarted 45 times within a minute"
        );
    }

    #[test]
    fn test_restart_critical_truncates_count() {
        let process = ProcessDescriptor::new("api", 0.0);
        let data = vec![series("api", &[None, Some(12.0), Some(61.9)])];
        let check = restart_check(&process, &data, &Thresholds::default());

        assert_eq!(check.severity, Severity::Critical);
        assert!(check.message.contains("61 times within a minute"));
    }

    #[test]
    fn test_restart_ok_at_threshold() {
        let process = ProcessDescriptor::new("api", 0.0);
        let data = vec![series("api", &[None, Some(30.0)])];
        let check = restart_check(&process, &data, &Thresholds::default());

        assert_eq!(check.severity, Severity::Ok);
        assert_eq!(
            check.message,
            "OK - process 'api' has recently restarted 30 times within a minute"
        );
    }

    #[test]
    fn test_restart_unknown_without_series() {
        let process = ProcessDescriptor::new("worker", 0.0);
        let data = vec![series("api", &[Some(1.0)])];
        let check = restart_check(&process, &data, &Thresholds::default());

        assert_eq!(check.severity, Severity::Unknown);
        assert_eq!(
            check.message,
            "UNKNOWN - No recent data on the change in restarts for process worker"
        );
    }

    #[test]
    fn test_all_null_series_does_not_stop_evaluation() {
        let processes = vec![
            ProcessDescriptor::new("api", 100_000_000.0),
            ProcessDescriptor::new("worker", 250_000_000.0),
        ];
        let data = vec![
            series("api", &[None, None, None]),
            series("worker", &[None, Some(0.0)]),
        ];

        let report = evaluate(&processes, &data, &Thresholds::default());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(
            lines,
            vec![
                "UNKNOWN - No recent data on the change in restarts for process api",
                "OK - process 'api' memory use is 100.000000",
                "OK - process 'worker' has recently restarted 0 times within a minute",
                "WARNING - process 'worker' memory use is 250.000000 (> 200 threshold)",
            ]
        );
        assert_eq!(report.status(), Severity::Unknown);
    }

    #[test]
    fn test_first_matching_series_wins() {
        let process = ProcessDescriptor::new("api", 0.0);
        let data = vec![series("web-api", &[Some(70.0)]), series("api", &[Some(1.0)])];
        let check = restart_check(&process, &data, &Thresholds::default());

        assert_eq!(check.severity, Severity::Critical);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let mut processes = vec![
            ProcessDescriptor::new("a", 10_000_000.0),
            ProcessDescriptor::new("b", 450_000_000.0),
            ProcessDescriptor::new("c", 250_000_000.0),
        ];
        let data = vec![
            series("a", &[Some(1.0)]),
            series("b", &[Some(1.0)]),
            series("c", &[Some(1.0)]),
        ];
        let thresholds = Thresholds::default();

        let forward = evaluate(&processes, &data, &thresholds);
        processes.reverse();
        let backward = evaluate(&processes, &data, &thresholds);

        assert_eq!(forward.status(), Severity::Critical);
        assert_eq!(backward.status(), Severity::Critical);
        assert_eq!(
            forward.status(),
            forward.checks().iter().map(|c| c.severity).max().unwrap()
        );
    }

    #[test]
    fn test_report_status_never_decreases() {
        let mut report = Report::new();
        assert_eq!(report.status(), Severity::Ok);

        for severity in [Severity::Critical, Severity::Ok, Severity::Warning] {
            report.record(Check {
                process: "p".to_string(),
                kind: CheckKind::Memory,
                severity,
                message: String::new(),
            });
        }

        assert_eq!(report.status(), Severity::Critical);
        assert_eq!(report.checks().len(), 3);
    }

    #[test]
    fn test_no_processes_is_ok() {
        let report = evaluate(&[], &[], &Thresholds::default());
        assert!(report.checks().is_empty());
        assert_eq!(report.status(), Severity::Ok);
    }
}
