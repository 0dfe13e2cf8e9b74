//! Legacy constructor errors.

use db2::Db2Error;
use rest::HttpError;
use thiserror::Error;

/// Errors produced while constructing a legacy adapter.
///
/// Calls made through a constructed adapter return the wrapped transport's
/// own error type, not this one.
#[derive(Debug, Error)]
pub enum LegacyError {
    /// A parameter has a value the modern transport cannot accept.
    ///
    /// Raised before any connection, client or entry point is created.
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The legacy parameter name (e.g. `"iccsid"`).
        parameter: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Opening the database connection failed.
    #[error(transparent)]
    Database(#[from] Db2Error),

    /// Building the HTTP client failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl LegacyError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }
}
