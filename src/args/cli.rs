use clap::Parser;
use std::time::Duration;

use crate::record::ReductionPolicy;

use super::defaults::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_EXPORT_RETRY_DELAY, DEFAULT_ITERATIONS,
    DEFAULT_OUTPUT_PATH, DEFAULT_REQUEST_TIMEOUT, DEFAULT_ROOT_SEGMENT,
};
use super::parsers::{
    parse_bool_env, parse_duration, parse_endpoint, parse_positive_usize, parse_root_segment,
};
use super::types::{PositiveUsize, Scheme};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "API latency profiler for storage-management appliances: times list, detail and head calls per endpoint and appends each run to a JSON history."
)]
pub struct ProfilerArgs {
    /// Appliance host name or IP address (optionally host:port)
    #[arg(long, short = 'H', env = "APIPROF_HOST")]
    pub host: Option<String>,

    /// Username for the appliance session
    #[arg(long, short = 'U', env = "APIPROF_USER")]
    pub username: Option<String>,

    /// Password for the appliance session
    #[arg(long, short = 'P', env = "APIPROF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// URL scheme used to reach the appliance
    #[arg(long, value_enum, default_value = "https", ignore_case = true)]
    pub scheme: Scheme,

    /// Path segment all resources live under; detail paths are taken from hrefs below it
    #[arg(long = "root-segment", default_value = DEFAULT_ROOT_SEGMENT, value_parser = parse_root_segment)]
    pub root_segment: String,

    /// Endpoint to profile (repeatable, order is kept); defaults to the built-in set
    #[arg(long = "endpoint", short = 'e', value_parser = parse_endpoint)]
    pub endpoints: Vec<String>,

    /// Timed calls per endpoint and call mode
    #[arg(long, short = 'n', default_value = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Untimed calls issued before the timed ones
    #[arg(long = "warmup-calls", default_value_t = 0)]
    pub warmup_calls: usize,

    /// Record raw per-call times or an avg/min/max summary
    #[arg(long, value_enum, default_value = "summary", ignore_case = true)]
    pub reduction: ReductionPolicy,

    /// Record this appliance version instead of querying it
    #[arg(long = "pin-version")]
    pub pinned_version: Option<String>,

    /// JSON file the run history is appended to
    #[arg(long, short, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// Directory receiving one CSV per call mode, one row appended per run
    #[arg(long = "export-csv")]
    pub export_csv: Option<String>,

    /// Always write the header row before the data row in CSV exports
    #[arg(long = "include-header")]
    pub include_header: bool,

    /// Retries for a failed export append before giving up
    #[arg(long = "export-retries", default_value_t = 1)]
    pub export_retries: u32,

    /// Delay between export retries (supports ms/s/m/h)
    #[arg(long = "export-retry-delay", default_value = DEFAULT_EXPORT_RETRY_DELAY, value_parser = parse_duration)]
    pub export_retry_delay: Duration,

    /// Number of full runs to perform back to back
    #[arg(long, default_value = "1", value_parser = parse_positive_usize)]
    pub runs: PositiveUsize,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = DEFAULT_REQUEST_TIMEOUT, value_parser = parse_duration)]
    pub request_timeout: Duration,

    /// Connection timeout (supports ms/s/m/h)
    #[arg(long = "connect-timeout", default_value = DEFAULT_CONNECT_TIMEOUT, value_parser = parse_duration)]
    pub connect_timeout: Duration,

    /// Accept invalid TLS certificates (self-signed appliances)
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Path to config file (TOML or JSON)
    #[arg(long, short)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
