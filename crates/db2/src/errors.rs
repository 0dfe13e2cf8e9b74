//! Database transport errors.

use thiserror::Error;
use transport::TransportClosedError;

use crate::DriverError;

/// Errors produced by the database transport.
#[derive(Debug, Error)]
pub enum Db2Error {
    /// The transport was used after it was closed.
    #[error(transparent)]
    Closed(#[from] TransportClosedError),

    /// Connecting with credentials failed.
    #[error("Failed to connect to database '{database}': {source}")]
    Connect {
        /// The database entry the connection was attempted against.
        database: String,
        /// The driver's error.
        #[source]
        source: DriverError,
    },

    /// The XMLSERVICE stored procedure call failed.
    #[error("XMLSERVICE procedure call failed: {source}")]
    Procedure {
        /// The driver's error.
        #[source]
        source: DriverError,
    },

    /// Closing the connection failed.
    #[error("Failed to close database connection: {source}")]
    Close {
        /// The driver's error.
        #[source]
        source: DriverError,
    },
}
