//! The transport wrapper and the channel contract it drives.
//!
//! [`XmlServiceTransport`] owns one [`Channel`] and is the only way to reach
//! it: every call goes through the liveness check in
//! [`XmlServiceTransport::call`] before the channel sees the tool, and the
//! channel's resource is released by the first [`XmlServiceTransport::close`]
//! or, failing that, when the transport is dropped.

use std::fmt;

use tracing::{debug, info, warn};

use crate::trace::format_trace;
use crate::{Toolkit, TraceField, TransportClosedError, TransportId, TransportOptions};

/// Trace fields every transport starts with, ahead of its channel's own.
const BASE_TRACE_FIELDS: [TraceField; 2] = [TraceField::Name("ipc"), TraceField::Name("ctl")];

// ---------------------------------------------------------------------------
// Channel contract
// ---------------------------------------------------------------------------

/// The channel-specific half of a transport.
///
/// A channel performs the actual exchange with XMLSERVICE (database round
/// trip, in-process call, HTTP request) and owns whatever resource that
/// exchange needs. It is never called directly by users; it is wrapped in an
/// [`XmlServiceTransport`], which guarantees that:
///
/// - [`Channel::dispatch`] is never invoked after the transport was closed;
/// - [`Channel::release`] is invoked at most once, and always eventually.
///
/// The channel's error type must be able to carry a [`TransportClosedError`]
/// so the transport can report a closed state in the channel's own error type
/// without wrapping channel failures.
pub trait Channel {
    /// Errors produced by this channel.
    type Error: std::error::Error + From<TransportClosedError>;

    /// Short channel name used in log events (e.g. `"db2"`).
    const KIND: &'static str;

    /// Channel-specific trace fields, appended after `ipc` and `ctl`.
    const TRACE_FIELDS: &'static [TraceField] = &[];

    /// Sends the tool's accumulated actions to XMLSERVICE and returns the raw
    /// XML response text.
    ///
    /// No retry, timeout or back-off is applied around this call by the
    /// transport; a channel that needs one implements it here.
    fn dispatch(
        &mut self,
        options: &TransportOptions,
        tool: &dyn Toolkit,
    ) -> Result<String, Self::Error>;

    /// Releases the channel's resource. Called at most once per transport.
    fn release(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Returns the current value of a channel-specific trace attribute.
    fn trace_value(&self, attribute: &str) -> Option<String> {
        let _ = attribute;
        None
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// A reusable, closable channel to XMLSERVICE.
///
/// ## Lifecycle
///
/// A transport is open from construction until the first call to
/// [`close`](Self::close) (explicit, or implicit on drop). Closing is
/// terminal: the channel is released exactly once and every later
/// [`call`](Self::call) fails with [`TransportClosedError`].
///
/// ## Concurrency
///
/// `call` blocks the calling thread for the duration of the channel exchange.
/// A transport is not internally synchronised; `&mut self` receivers make
/// concurrent use impossible without external serialisation.
pub struct XmlServiceTransport<C: Channel> {
    id: TransportId,
    options: TransportOptions,
    trace_fields: Vec<TraceField>,
    open: bool,
    channel: C,
}

impl<C: Channel> XmlServiceTransport<C> {
    /// Wraps `channel` in an open transport.
    pub fn new(channel: C, options: TransportOptions) -> Self {
        let mut trace_fields = BASE_TRACE_FIELDS.to_vec();
        trace_fields.extend_from_slice(C::TRACE_FIELDS);

        let transport = Self {
            id: TransportId::new_random(),
            options,
            trace_fields,
            open: true,
            channel,
        };
        info!(
            transport_id = %transport.id,
            channel = C::KIND,
            trace = %transport.trace_data(),
            "Transport opened"
        );
        transport
    }

    /// The identifier attached to this transport's log events.
    pub fn id(&self) -> TransportId {
        self.id
    }

    /// The current `ctl` / `ipc` options.
    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    /// XMLSERVICE control directives sent with every call.
    pub fn ctl(&self) -> &str {
        &self.options.ctl
    }

    /// Replaces the control directives used by subsequent calls.
    pub fn set_ctl(&mut self, ctl: impl Into<String>) {
        self.options.ctl = ctl.into();
    }

    /// XMLSERVICE IPC route key sent with every call.
    pub fn ipc(&self) -> &str {
        &self.options.ipc
    }

    /// Replaces the IPC route key used by subsequent calls.
    pub fn set_ipc(&mut self, ipc: impl Into<String>) {
        self.options.ipc = ipc.into();
    }

    /// Returns `true` until the transport has been closed.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Fails with [`TransportClosedError`] once the transport has been closed.
    ///
    /// Any operation that touches the channel's resource must check this
    /// first; [`call`](Self::call), [`channel`](Self::channel) and
    /// [`channel_mut`](Self::channel_mut) already do.
    pub fn ensure_open(&self) -> Result<(), TransportClosedError> {
        if self.open {
            Ok(())
        } else {
            Err(TransportClosedError::new(self.id))
        }
    }

    /// Borrows the channel while the transport is open.
    pub fn channel(&self) -> Result<&C, TransportClosedError> {
        self.ensure_open()?;
        Ok(&self.channel)
    }

    /// Mutably borrows the channel while the transport is open.
    pub fn channel_mut(&mut self) -> Result<&mut C, TransportClosedError> {
        self.ensure_open()?;
        Ok(&mut self.channel)
    }

    /// The declared trace fields, in output order.
    pub fn trace_fields(&self) -> &[TraceField] {
        &self.trace_fields
    }

    /// Appends a field to the trace output.
    pub fn add_trace_field(&mut self, field: impl Into<TraceField>) {
        self.trace_fields.push(field.into());
    }

    /// Formats the current value of every trace field as
    /// `" label(value)"` segments, in declaration order.
    ///
    /// Reads configuration only, so it is valid after close.
    pub fn trace_data(&self) -> String {
        format_trace(&self.trace_fields, |attribute| match attribute {
            "ipc" => Some(self.options.ipc.clone()),
            "ctl" => Some(self.options.ctl.clone()),
            other => self.channel.trace_value(other),
        })
    }

    /// Calls XMLSERVICE with the tool's accumulated actions and returns the
    /// XML response exactly as the channel produced it.
    ///
    /// # Errors
    ///
    /// - The channel's form of [`TransportClosedError`] if the transport is
    ///   closed; the channel is not touched.
    /// - Any error the channel's dispatch produced, unchanged.
    pub fn call(&mut self, tool: &dyn Toolkit) -> Result<String, C::Error> {
        self.ensure_open()?;

        debug!(transport_id = %self.id, channel = C::KIND, "Dispatching XMLSERVICE call");
        let result = self.channel.dispatch(&self.options, tool);
        match &result {
            Ok(xml) => debug!(
                transport_id = %self.id,
                channel = C::KIND,
                response_len = xml.len(),
                "XMLSERVICE call completed"
            ),
            Err(e) => debug!(
                transport_id = %self.id,
                channel = C::KIND,
                error = %e,
                "XMLSERVICE call failed"
            ),
        }
        result
    }

    /// Closes the transport now rather than when it is dropped.
    ///
    /// The first call releases the channel's resource and returns the result
    /// of that release. The transport is closed afterwards even if the release
    /// failed. Later calls do nothing and return `Ok(())`.
    pub fn close(&mut self) -> Result<(), C::Error> {
        if !self.open {
            return Ok(());
        }

        // Cleared first so a panicking release is never retried by `Drop`.
        self.open = false;
        let result = self.channel.release();

        info!(transport_id = %self.id, channel = C::KIND, "Transport closed");
        result
    }
}

impl<C: Channel> Drop for XmlServiceTransport<C> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(
                transport_id = %self.id,
                channel = C::KIND,
                error = %e,
                "Failed to release channel while dropping transport"
            );
        }
    }
}

impl<C: Channel> fmt::Debug for XmlServiceTransport<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlServiceTransport")
            .field("id", &self.id)
            .field("channel", &C::KIND)
            .field("options", &self.options)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}
