//! Payload types returned by pm2 and Graphite.

use serde::Deserialize;

/// Body of the pm2 metrics endpoint: `{"processes": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessList {
    pub processes: Vec<ProcessDescriptor>,
}

/// One pm2-managed process. Fields other than `name` and `monit.memory` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessDescriptor {
    pub name: String,
    pub monit: Monit,
}

impl ProcessDescriptor {
    pub fn new(name: impl Into<String>, memory_bytes: f64) -> Self {
        Self {
            name: name.into(),
            monit: Monit {
                memory: memory_bytes,
            },
        }
    }

    /// Resident memory in megabytes (decimal, 1 MB = 1,000,000 bytes).
    pub fn memory_mb(&self) -> f64 {
        self.monit.memory / 1_000_000.0
    }
}

/// Resource usage reported by pm2.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Monit {
    /// Resident memory in bytes.
    pub memory: f64,
}

/// A `[value, timestamp]` pair from the Graphite render API.
///
/// The value is `null` for the first point of a derivative and for samples
/// not yet flushed to disk. Only the value is checked; the timestamp may be an
/// integer, a float or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Datapoint(pub Option<f64>, pub Option<f64>);

impl Datapoint {
    pub fn value(&self) -> Option<f64> {
        self.0
    }

    /// Unix seconds, when Graphite sent one.
    pub fn timestamp(&self) -> Option<f64> {
        self.1
    }
}

/// One target of a Graphite render response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RestartSeries {
    pub target: String,
    pub datapoints: Vec<Datapoint>,
}

impl RestartSeries {
    /// Whether this series carries the restart counter of `process_name`.
    ///
    /// Plain substring containment on `"<name>.restarts"`, so a process whose
    /// name is a suffix of another's (`api` vs `web-api`) can match both.
    pub fn belongs_to(&self, process_name: &str) -> bool {
        self.target.contains(&format!("{}.restarts", process_name))
    }

    /// Non-null values in window order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.datapoints.iter().filter_map(Datapoint::value)
    }

    /// Largest non-null value, or `None` when every point is null.
    pub fn max_value(&self) -> Option<f64> {
        self.values().reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_list_ignores_extra_fields() {
        let json = r#"{
            "system_info": {"hostname": "web01"},
            "processes": [
                {"name": "api", "pid": 42, "monit": {"memory": 250000000, "cpu": 3}}
            ]
        }"#;

        let list: ProcessList = serde_json::from_str(json).unwrap();
        assert_eq!(list.processes, vec![ProcessDescriptor::new("api", 250_000_000.0)]);
        assert_eq!(list.processes[0].memory_mb(), 250.0);
    }

    #[test]
    fn test_process_list_requires_memory() {
        let json = r#"{"processes": [{"name": "api", "monit": {}}]}"#;
        assert!(serde_json::from_str::<ProcessList>(json).is_err());
    }

    #[test]
    fn test_series_with_null_edges() {
        let json = r#"[{
            "target": "derivative(diamond.web01.Pm2Collector.api.restarts)",
            "datapoints": [[null, 1700000000], [45.0, 1700000060], [null, 1700000120]]
        }]"#;

        let series: Vec<RestartSeries> = serde_json::from_str(json).unwrap();
        assert_eq!(series[0].datapoints[0].timestamp(), Some(1_700_000_000.0));
        assert_eq!(series[0].values().collect::<Vec<_>>(), vec![45.0]);
        assert_eq!(series[0].max_value(), Some(45.0));
    }

    #[test]
    fn test_float_and_null_timestamps_decode() {
        let json = r#"[{
            "target": "derivative(diamond.web01.Pm2Collector.api.restarts)",
            "datapoints": [[null, 1.7e9], [5, 1700000060.0], [null, null]]
        }]"#;

        let series: Vec<RestartSeries> = serde_json::from_str(json).unwrap();
        assert_eq!(series[0].datapoints.len(), 3);
        assert_eq!(series[0].datapoints[2].timestamp(), None);
        assert_eq!(series[0].max_value(), Some(5.0));
    }

    #[test]
    fn test_all_null_series_has_no_max() {
        let series = RestartSeries {
            target: "diamond.web01.Pm2Collector.api.restarts".to_string(),
            datapoints: vec![Datapoint(None, Some(1.0)), Datapoint(None, Some(2.0))],
        };
        assert_eq!(series.max_value(), None);
    }

    #[test]
    fn test_belongs_to_is_substring_match() {
        let series = RestartSeries {
            target: "derivative(diamond.web01.Pm2Collector.web-api.restarts)".to_string(),
            datapoints: vec![],
        };
        assert!(series.belongs_to("web-api"));
        assert!(series.belongs_to("api"));
        assert!(!series.belongs_to("worker"));
    }
}
