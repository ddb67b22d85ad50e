//! One full profiling run: authenticate, drive every call mode, record.
mod model;
mod session;


pub use model::{ModeResults, TestRun};
pub use session::{
    AuthenticatedSession, CompletedRun, ProfileSession, RunSettings, VersionSource, execute_run,
};
