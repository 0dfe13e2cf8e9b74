//! HTTP transport errors.

use thiserror::Error;
use transport::TransportClosedError;

/// Errors produced by the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The transport was used after it was closed.
    #[error(transparent)]
    Closed(#[from] TransportClosedError),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {source}")]
    Client {
        /// The client builder's error.
        #[source]
        source: reqwest::Error,
    },

    /// The request could not be sent or the body could not be read.
    #[error("HTTP request to {url} failed: {source}")]
    Request {
        /// The XMLSERVICE endpoint.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// XMLSERVICE answered with a non-success status.
    #[error("XMLSERVICE at {url} returned HTTP {status}")]
    Status {
        /// The XMLSERVICE endpoint.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The response body, if it could be read.
        body: String,
    },
}
