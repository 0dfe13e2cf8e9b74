//! XMLSERVICE over HTTP.
//!
//! Every call is one `application/x-www-form-urlencoded` POST to the
//! XMLSERVICE CGI program (typically `/cgi-bin/xmlcgi.pgm`) carrying the
//! database entry, credentials, `ctl`, `ipc`, the XML input and the expected
//! output size. The response body is the XML output.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Uses the blocking `reqwest` client: a call blocks the
//! caller's thread, matching the synchronous transport contract. Do not call
//! it from inside an async runtime worker; use `spawn_blocking` there.

pub mod channel;
pub mod errors;

pub use channel::{open_transport, with_client, HttpChannel, HttpConfig, HttpTransport};
pub use errors::HttpError;

/// Output buffer size (bytes) requested from XMLSERVICE for every call.
pub const OUT_SIZE: u32 = 1_000_000;
