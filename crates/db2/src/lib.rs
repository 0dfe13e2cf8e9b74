//! XMLSERVICE over a Db2 for i database connection.
//!
//! Every call executes the XMLSERVICE stored procedure
//! `<schema>.iPLUGR512K(ipc, ctl, xmlin)` on a connection the transport owns,
//! concatenates the first column of the returned rows, and strips the
//! trailing NUL padding XMLSERVICE leaves behind.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** The database driver itself is a port: callers plug in
//! a [`DatabaseConnection`] (and, to connect by credentials, a
//! [`DatabaseDriver`]). This crate decides which statement to run and how to
//! assemble the response; the [`transport`] crate enforces the lifecycle.

pub mod channel;
pub mod connection;
pub mod errors;

pub use channel::{connect, open_transport, DatabaseChannel, DatabaseConfig, DatabaseTransport};
pub use connection::{DatabaseConnection, DatabaseDriver, DriverError, NativeHandle};
pub use errors::Db2Error;
