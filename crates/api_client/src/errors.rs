//! Error types for API client operations.
//!
//! These errors cover everything that can go wrong before a response status is
//! known: building the client, forming request URLs, and moving bytes over the
//! wire. Interpreting status codes and bodies is left to the caller.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while talking to a remote REST service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Error deserializing a response body.
    ///
    /// Raised when the body of a response is not valid JSON or does not match
    /// the requested type.
    #[error("Failed to deserialize response body: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A base URL or request path could not be turned into a valid URL.
    ///
    /// Parameters: (input, parse error)
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] url::ParseError),

    /// The request could not be sent or the response could not be read.
    ///
    /// Covers connection failures, DNS errors and request timeouts.
    #[error("HTTP request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
