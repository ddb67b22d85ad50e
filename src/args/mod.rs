//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::ProfilerArgs;
pub use types::{PositiveUsize, Scheme};

pub(crate) use defaults::{DEFAULT_ENDPOINTS, DEFAULT_USER_AGENT};
pub(crate) use parsers::{parse_duration, parse_endpoint, parse_root_segment};
