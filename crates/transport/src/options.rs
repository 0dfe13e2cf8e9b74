//! XMLSERVICE control options shared by every channel.

use serde::{Deserialize, Serialize};

/// Default XMLSERVICE control string: run in the caller's job and wrap output
/// in CDATA sections.
pub const DEFAULT_CTL: &str = "*here *cdata";

/// Default route key: no stateful IPC route.
pub const DEFAULT_IPC: &str = "*na";

/// The `ctl` / `ipc` pair sent with every XMLSERVICE request.
///
/// - `ctl` holds XMLSERVICE control directives (for example `"*here"` or
///   `"*sbmjob"`).
/// - `ipc` is the route key for a stateful XMLSERVICE job, for example
///   `"/tmp/myunique"`, or `"*na"` when the call is stateless.
///
/// Both fields fall back to their defaults when omitted from a serialised
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportOptions {
    /// XMLSERVICE control directives.
    #[serde(default = "default_ctl")]
    pub ctl: String,

    /// XMLSERVICE IPC route key.
    #[serde(default = "default_ipc")]
    pub ipc: String,
}

impl TransportOptions {
    /// Creates options from explicit values.
    pub fn new(ctl: impl Into<String>, ipc: impl Into<String>) -> Self {
        Self {
            ctl: ctl.into(),
            ipc: ipc.into(),
        }
    }
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self::new(DEFAULT_CTL, DEFAULT_IPC)
    }
}

fn default_ctl() -> String {
    DEFAULT_CTL.to_string()
}

fn default_ipc() -> String {
    DEFAULT_IPC.to_string()
}
