use thiserror::Error;

/// Reasons a detail path could not be derived from a list response.
///
/// These are non-fatal: the detail result is recorded without timings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("list response of {endpoint} has no items")]
    NoItems { endpoint: String },
    #[error("first item of {endpoint} has no string 'href'")]
    MissingHref { endpoint: String },
    #[error("href '{href}' is not a valid URL: {source}")]
    InvalidHref {
        href: String,
        #[source]
        source: url::ParseError,
    },
    #[error("href '{href}' does not contain the '/{root}/' segment")]
    MissingRootSegment { href: String, root: String },
    #[error("href '{href}' names no resource below '/{root}/'")]
    EmptyDetailPath { href: String, root: String },
}
