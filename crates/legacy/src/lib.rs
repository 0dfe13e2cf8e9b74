//! Deprecated XMLSERVICE transport constructors.
//!
//! [`IDb2Call`], [`ILibCall`] and [`IRestCall`] keep old call sites working.
//! Each one accepts the legacy parameter set, applies its documented
//! defaults, rejects parameters that can only take one value, logs a
//! deprecation warning and builds exactly one modern transport:
//!
//! | Legacy | Replacement |
//! |--------|-------------|
//! | [`IDb2Call`] | [`db2::DatabaseTransport`] |
//! | [`ILibCall`] | [`direct::DirectTransport`] |
//! | [`IRestCall`] | [`rest::HttpTransport`] |
//!
//! `call` on an adapter forwards to the wrapped transport without adding
//! anything.
//!
//! ## Observability
//!
//! Deprecation warnings are `tracing` events on the
//! [`DEPRECATION_TARGET`] target, carrying `legacy` and `replacement` fields.
//! They never change the outcome of a constructor.

// The adapters are deprecated for callers, not for this crate.
#![allow(deprecated)]

mod deprecation;
pub mod db2_call;
pub mod env;
pub mod errors;
pub mod lib_call;
pub mod rest_call;

pub use db2_call::{Db2CallOptions, Db2Source, IDb2Call};
pub use deprecation::DEPRECATION_TARGET;
pub use env::{Environment, ProcessEnv, PASSWORD_VAR, XMLSERVICE_VAR};
pub use errors::LegacyError;
pub use lib_call::{ILibCall, LibCallOptions, JOB_CCSID, UTF8_CCSID};
pub use rest_call::{IRestCall, RestCallOptions};
