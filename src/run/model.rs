use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::record::{CallMode, CallModeResult};

/// Results of one run, keyed by call mode.
///
/// The three lists share length and endpoint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeResults {
    pub list: Vec<CallModeResult>,
    pub detail: Vec<CallModeResult>,
    pub head: Vec<CallModeResult>,
}

impl ModeResults {
    #[must_use]
    pub fn get(&self, mode: CallMode) -> &[CallModeResult] {
        match mode {
            CallMode::List => &self.list,
            CallMode::Detail => &self.detail,
            CallMode::Head => &self.head,
        }
    }

    pub fn insert(&mut self, mode: CallMode, results: Vec<CallModeResult>) {
        match mode {
            CallMode::List => self.list = results,
            CallMode::Detail => self.detail = results,
            CallMode::Head => self.head = results,
        }
    }
}

/// One entry of the persisted run history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    pub time: String,
    pub version: String,
    pub ipaddress: String,
    pub iterations: usize,
    pub tests: ModeResults,
}

impl Display for TestRun {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "run at {} against {} (version {}, {} iterations, {} endpoints)",
            self.time,
            self.ipaddress,
            self.version,
            self.iterations,
            self.tests.list.len()
        )
    }
}
