//! Error types for the Libpostal client.
//!
//! # Design
//! Configuration problems are caught once, when the client is built, and get
//! their own type so a constructed client can never fail for that reason.
//! Call-time failures are generic over the session's error type: the
//! transport error is carried as-is instead of being flattened into a string,
//! so callers can still match on whatever their HTTP stack reports.

use thiserror::Error;

/// Errors raised while constructing a `LibpostalClient`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL could not be parsed at all.
    #[error("invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL parsed but is not `http` or `https`.
    #[error("unsupported URL scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),

    /// A parse or expand method name was empty or only slashes.
    #[error("method name must not be empty")]
    EmptyMethod,
}

/// Errors returned by `LibpostalClient::parse` and `LibpostalClient::expand`.
#[derive(Debug, Error)]
pub enum Error<E>
where
    E: std::error::Error + 'static,
{
    /// The session failed to complete the request (connection, timeout,
    /// non-success status). The value is the session's own error.
    #[error("transport error: {0}")]
    Transport(#[source] E),

    /// The session handed back a response whose status is outside 2xx.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON shape the operation expects.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service returned a label outside the `Address` schema while the
    /// client is configured with `UnknownLabels::Reject`.
    #[error("unknown address label `{0}`")]
    UnknownLabel(String),
}
