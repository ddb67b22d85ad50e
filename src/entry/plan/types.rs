use std::path::PathBuf;

use crate::run::RunSettings;
use crate::sinks::ExportSettings;
use crate::transport::ClientConfig;

/// Fully validated work for one invocation.
#[derive(Debug)]
pub(in crate::entry) struct RunPlan {
    pub(super) client: ClientConfig,
    pub(super) settings: RunSettings,
    pub(super) output: PathBuf,
    pub(super) export: Option<ExportSettings>,
    pub(super) runs: usize,
}
