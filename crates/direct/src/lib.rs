//! XMLSERVICE called directly inside the current job.
//!
//! On IBM i, XMLSERVICE can be invoked in-process without a database or HTTP
//! hop. The binding to that entry point is platform code and is supplied by the
//! caller as an [`XmlServiceEntry`]; this crate turns it into a transport.
//!
//! The entry point returns the response as a NUL-terminated UTF-8 byte buffer.
//! The terminator is stripped before decoding.

use thiserror::Error;
use tracing::debug;
use transport::{Channel, Toolkit, TransportClosedError, TransportOptions, XmlServiceTransport};

/// A transport calling XMLSERVICE in-process.
pub type DirectTransport = XmlServiceTransport<DirectChannel>;

/// Error reported by an [`XmlServiceEntry`].
pub type EntryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The in-process XMLSERVICE entry point.
pub trait XmlServiceEntry: Send {
    /// Runs XMLSERVICE on `xml` with the given control options and route key,
    /// returning the raw response buffer (NUL-terminated when non-empty).
    fn xmlservice(&mut self, xml: &str, ctl: &str, ipc: &str) -> Result<Vec<u8>, EntryError>;
}

/// Errors produced by the direct transport.
#[derive(Debug, Error)]
pub enum DirectError {
    /// The transport was used after it was closed.
    #[error(transparent)]
    Closed(#[from] TransportClosedError),

    /// The entry point reported a failure.
    #[error("XMLSERVICE entry point failed: {source}")]
    Entry {
        /// The entry point's error.
        #[source]
        source: EntryError,
    },

    /// The response was not valid UTF-8.
    #[error("XMLSERVICE response is not valid UTF-8: {source}")]
    Decode {
        /// The decoding error.
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Calls XMLSERVICE through an owned entry point.
pub struct DirectChannel {
    entry: Option<Box<dyn XmlServiceEntry>>,
}

impl DirectChannel {
    /// Creates a channel over `entry`.
    pub fn new(entry: Box<dyn XmlServiceEntry>) -> Self {
        Self { entry: Some(entry) }
    }
}

impl Channel for DirectChannel {
    type Error = DirectError;

    const KIND: &'static str = "direct";

    fn dispatch(
        &mut self,
        options: &TransportOptions,
        tool: &dyn Toolkit,
    ) -> Result<String, Self::Error> {
        // The entry is only taken by `release`, after which the transport
        // never dispatches again.
        let Some(entry) = self.entry.as_mut() else {
            return Ok(String::new());
        };

        let mut data = entry
            .xmlservice(&tool.xml_in(), &options.ctl, &options.ipc)
            .map_err(|source| DirectError::Entry { source })?;
        debug!(bytes = data.len(), "XMLSERVICE entry point returned");

        // Drop the terminating NUL.
        data.pop();
        String::from_utf8(data).map_err(|source| DirectError::Decode { source })
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.entry = None;
        Ok(())
    }
}

/// Wraps `entry` in a transport.
pub fn open_transport(
    entry: Box<dyn XmlServiceEntry>,
    options: TransportOptions,
) -> DirectTransport {
    XmlServiceTransport::new(DirectChannel::new(entry), options)
}
