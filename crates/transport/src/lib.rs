//! Core transport contract for calling XMLSERVICE.
//!
//! Every channel (database connection, in-process direct call, HTTP endpoint)
//! plugs into the same lifecycle: a transport starts open, dispatches calls
//! through its [`Channel`] until it is closed, releases its channel resource
//! exactly once, and refuses every further call with
//! [`TransportClosedError`].
//!
//! ## Architectural Layer
//!
//! **Contract + port definitions.** This crate has no I/O dependencies. It
//! defines *what* a channel must provide; the `db2`, `direct` and `rest`
//! crates define *how* each channel talks to XMLSERVICE.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`transport`] | [`XmlServiceTransport`] wrapper and the [`Channel`] trait |
//! | [`trace`] | [`TraceField`] and trace-string formatting |
//! | [`options`] | [`TransportOptions`] (`ctl` / `ipc`) and their defaults |
//! | [`toolkit`] | The [`Toolkit`] tool interface and [`RawXml`] |
//! | [`identifiers`] | Newtype identifiers (`TransportId`, `SchemaName`, etc.) |
//! | [`errors`] | [`TransportClosedError`] |
//!
//! ## Concurrency
//!
//! A transport performs blocking I/O on the caller's thread and adds no
//! synchronisation of its own. [`XmlServiceTransport::call`] takes `&mut self`,
//! so sharing one transport between threads requires the caller to serialise
//! access (for example behind a `Mutex`).

pub mod errors;
pub mod identifiers;
pub mod options;
pub mod toolkit;
pub mod trace;
pub mod transport;

// Re-export everything at the crate root for ergonomic usage by channel crates.
pub use errors::TransportClosedError;
pub use identifiers::{
    DatabaseName, SchemaName, TransportId, UserProfile, DEFAULT_DATABASE, DEFAULT_SCHEMA,
};
pub use options::{TransportOptions, DEFAULT_CTL, DEFAULT_IPC};
pub use toolkit::{RawXml, Toolkit};
pub use trace::TraceField;
pub use transport::{Channel, XmlServiceTransport};
