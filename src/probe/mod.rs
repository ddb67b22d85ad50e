//! Measurement engine: timed calls, repetition, detail resolution and the per-mode driver.
mod detail;
mod driver;
mod repeater;
mod timed;


pub use detail::{detail_path_from_href, first_item_href};
pub use driver::EndpointDriver;
pub use repeater::{CallRepeater, Measurement, RepeatPlan};
pub use timed::{CallKind, TimedSample, timed_call};
