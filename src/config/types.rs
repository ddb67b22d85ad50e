use std::time::Duration;

use serde::Deserialize;

use crate::args::{Scheme, parse_duration};
use crate::error::{ConfigError, ValidationError};
use crate::record::ReductionPolicy;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub host: Option<String>,
    #[serde(alias = "user")]
    pub username: Option<String>,
    pub password: Option<String>,
    /// Name of an environment variable holding the password.
    pub password_env: Option<String>,
    pub scheme: Option<Scheme>,
    pub root_segment: Option<String>,
    pub endpoints: Option<Vec<String>>,
    pub iterations: Option<usize>,
    pub warmup_calls: Option<usize>,
    pub reduction: Option<ReductionPolicy>,
    #[serde(alias = "pin_version")]
    pub version: Option<String>,
    pub output: Option<String>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub insecure: Option<bool>,
    pub runs: Option<usize>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    #[serde(alias = "dir")]
    pub csv_dir: Option<String>,
    pub include_header: Option<bool>,
    pub retries: Option<u32>,
    pub retry_delay: Option<DurationValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, field: &'static str) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(0) => Err(ConfigError::InvalidDuration {
                field,
                source: ValidationError::DurationZero,
            }),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => {
                parse_duration(text).map_err(|err| ConfigError::InvalidDuration { field, source: err })
            }
        }
    }
}
