//! `iLibCall`: XMLSERVICE called in-process.

use direct::{DirectError, DirectTransport, XmlServiceEntry};
use transport::{Toolkit, TransportOptions, DEFAULT_CTL, DEFAULT_IPC};

use crate::{deprecation, LegacyError};

const LEGACY: &str = "ILibCall";
const REPLACEMENT: &str = "direct::DirectTransport";

/// The only EBCDIC CCSID accepted: `0`, meaning the job CCSID.
pub const JOB_CCSID: u32 = 0;

/// The only ASCII CCSID accepted: `1208` (UTF-8).
pub const UTF8_CCSID: u32 = 1208;

/// Optional `iLibCall` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibCallOptions {
    /// `ictl`: XMLSERVICE control, default `*here *cdata`.
    pub ctl: Option<String>,
    /// `ipc`: XMLSERVICE route key, default `*na`.
    pub ipc: Option<String>,
    /// `iccsid`: EBCDIC CCSID. Must be [`JOB_CCSID`].
    pub iccsid: u32,
    /// `pccsid`: ASCII CCSID. Must be [`UTF8_CCSID`].
    pub pccsid: u32,
}

impl Default for LibCallOptions {
    fn default() -> Self {
        Self {
            ctl: None,
            ipc: None,
            iccsid: JOB_CCSID,
            pccsid: UTF8_CCSID,
        }
    }
}

/// Legacy constructor for [`direct::DirectTransport`].
#[deprecated(note = "use direct::DirectTransport instead")]
#[derive(Debug)]
pub struct ILibCall {
    transport: DirectTransport,
}

impl ILibCall {
    /// Validates `options`, then obtains the entry point from `entry` and
    /// wraps it.
    ///
    /// # Errors
    ///
    /// [`LegacyError::InvalidParameter`] if `iccsid` or `pccsid` is not the
    /// supported value. `entry` is not invoked in that case.
    pub fn new<F>(entry: F, options: LibCallOptions) -> Result<Self, LegacyError>
    where
        F: FnOnce() -> Box<dyn XmlServiceEntry>,
    {
        deprecation::constructor(LEGACY, REPLACEMENT);

        if options.iccsid != JOB_CCSID {
            return Err(LegacyError::invalid("iccsid", "iccsid must be 0 (job ccsid)"));
        }
        if options.pccsid != UTF8_CCSID {
            return Err(LegacyError::invalid("pccsid", "pccsid must be 1208 (UTF-8)"));
        }

        let transport_options = TransportOptions::new(
            options.ctl.unwrap_or_else(|| DEFAULT_CTL.to_string()),
            options.ipc.unwrap_or_else(|| DEFAULT_IPC.to_string()),
        );
        Ok(Self {
            transport: direct::open_transport(entry(), transport_options),
        })
    }

    /// Calls XMLSERVICE with the tool's accumulated actions.
    pub fn call(&mut self, tool: &dyn Toolkit) -> Result<String, DirectError> {
        self.transport.call(tool)
    }

    /// Closes the wrapped transport.
    pub fn close(&mut self) -> Result<(), DirectError> {
        self.transport.close()
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &DirectTransport {
        &self.transport
    }

    /// The wrapped transport, mutably.
    pub fn transport_mut(&mut self) -> &mut DirectTransport {
        &mut self.transport
    }

    /// Unwraps the modern transport.
    pub fn into_transport(self) -> DirectTransport {
        self.transport
    }
}
