//! Core library for the `apiprof` CLI.
//!
//! The binary logs in to a storage-management appliance, times list, detail
//! and head calls against a set of REST endpoints, and appends every run to a
//! JSON history file. The modules here are its building blocks: CLI and
//! config handling, the transport seam, the measurement engine, result
//! records, the run history store, and tabular export.
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
mod logger;
pub mod probe;
pub mod record;
pub mod run;
pub mod sinks;
pub mod store;
pub mod transport;
