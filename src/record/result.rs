use std::fmt::{Display, Formatter, Result as FmtResult};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::summary::LatencySummary;

/// The three ways an endpoint is exercised during a run.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CallMode {
    List,
    Detail,
    Head,
}

impl CallMode {
    /// Execution order within a run.
    pub const ALL: [CallMode; 3] = [CallMode::List, CallMode::Detail, CallMode::Head];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CallMode::List => "list",
            CallMode::Detail => "detail",
            CallMode::Head => "head",
        }
    }
}

impl Display for CallMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Whether a result keeps every elapsed time or only avg/min/max.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReductionPolicy {
    Raw,
    Summary,
}

/// Timing payload of a [`CallModeResult`], serialized inline with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timings {
    Raw {
        times: Vec<f64>,
    },
    Reduced {
        avg_time: Option<f64>,
        min_time: Option<f64>,
        max_time: Option<f64>,
    },
}

impl Timings {
    #[must_use]
    pub fn from_samples(policy: ReductionPolicy, samples: Vec<f64>) -> Self {
        match policy {
            ReductionPolicy::Raw => Timings::Raw { times: samples },
            ReductionPolicy::Summary => {
                let summary = LatencySummary::from_samples(&samples);
                Timings::Reduced {
                    avg_time: summary.map(|s| s.avg),
                    min_time: summary.map(|s| s.min),
                    max_time: summary.map(|s| s.max),
                }
            }
        }
    }

    /// Timings for an endpoint whose calls never ran.
    #[must_use]
    pub fn empty(policy: ReductionPolicy) -> Self {
        Self::from_samples(policy, Vec::new())
    }

    /// avg/min/max regardless of form; `None` when nothing was sampled.
    #[must_use]
    pub fn summary(&self) -> Option<LatencySummary> {
        match self {
            Timings::Raw { times } => LatencySummary::from_samples(times),
            Timings::Reduced {
                avg_time: Some(avg),
                min_time: Some(min),
                max_time: Some(max),
            } => Some(LatencySummary {
                avg: *avg,
                min: *min,
                max: *max,
            }),
            Timings::Reduced { .. } => None,
        }
    }

    #[must_use]
    pub fn times(&self) -> Option<&[f64]> {
        match self {
            Timings::Raw { times } => Some(times.as_slice()),
            Timings::Reduced { .. } => None,
        }
    }
}

/// Outcome of testing one endpoint under one call mode.
///
/// Serializes to the flat mapping stored in the run history: `date`,
/// `source_ip`, `endpoint`, `count`, then either `times` or
/// `avg_time`/`min_time`/`max_time`, then `iterations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallModeResult {
    pub date: String,
    pub source_ip: String,
    pub endpoint: String,
    pub count: Option<u64>,
    #[serde(flatten)]
    pub timings: Timings,
    pub iterations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_path: Option<String>,
}

impl CallModeResult {
    /// Serializes the record as a plain JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if a timing value is not representable in JSON.
    pub fn to_mapping(&self) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "expected an object, got {}",
                other
            ))),
        }
    }
}

fn fmt_seconds(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |secs| format!("{:.3}s", secs))
}

impl Display for CallModeResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let summary = self.timings.summary();
        write!(
            f,
            "{} size={} avg={} min={} max={} iterations={}",
            self.endpoint,
            self.count
                .map_or_else(|| "-".to_owned(), |count| count.to_string()),
            fmt_seconds(summary.map(|s| s.avg)),
            fmt_seconds(summary.map(|s| s.min)),
            fmt_seconds(summary.map(|s| s.max)),
            self.iterations
        )?;
        if let Some(path) = self.detail_path.as_ref() {
            write!(f, " detail={}", path)?;
        }
        Ok(())
    }
}
