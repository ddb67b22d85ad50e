use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid number: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Endpoint must not be empty.")]
    EndpointEmpty,
    #[error("Endpoint '{value}' must start with '/'.")]
    EndpointMissingSlash { value: String },
    #[error("Endpoint '{value}' is listed more than once.")]
    DuplicateEndpoint { value: String },
    #[error("Missing appliance host (set --host or provide it in config).")]
    MissingHost,
    #[error("Missing username (set --username or provide it in config).")]
    MissingUsername,
    #[error("Missing password (set --password, APIPROF_PASSWORD, or password_env in config).")]
    MissingPassword,
    #[error("Root segment must be a single non-empty path segment, got '{value}'.")]
    InvalidRootSegment { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Failed to build runtime: {source}")]
    RuntimeBuildFailed {
        #[source]
        source: std::io::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
