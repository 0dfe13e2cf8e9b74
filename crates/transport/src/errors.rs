//! Error types owned by the transport core.
//!
//! The core defines exactly one failure of its own: using a transport after it
//! has been closed. Everything else a call can fail with belongs to the
//! channel and is returned to the caller untouched.

use thiserror::Error;

use crate::TransportId;

/// A liveness-checked operation was attempted on a closed transport.
///
/// Produced by [`crate::XmlServiceTransport::call`] (and the other
/// liveness-checked accessors) after [`crate::XmlServiceTransport::close`] has
/// run. The transport can never be reopened; recover by constructing a new one.
///
/// Channel error types embed this error through a `From` conversion so that a
/// transport's `call` can return the channel's own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("transport {transport} is closed and can no longer be used")]
pub struct TransportClosedError {
    /// The transport that refused the operation.
    pub transport: TransportId,
}

impl TransportClosedError {
    /// Creates the error for the given transport.
    pub fn new(transport: TransportId) -> Self {
        Self { transport }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_the_transport() {
        let id = TransportId::new_random();
        let err = TransportClosedError::new(id);

        assert_eq!(
            err.to_string(),
            format!("transport {id} is closed and can no longer be used")
        );
    }
}
