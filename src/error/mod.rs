mod app;
mod config;
mod probe;
mod sink;
mod store;
mod transport;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use probe::ResolutionError;
pub use sink::SinkError;
pub use store::StoreError;
pub use transport::TransportError;
pub use validation::ValidationError;
