//! Newtype identifiers shared by the transports.
//!
//! Names that travel to XMLSERVICE (schema, database, user profile) are
//! wrapped so that, for example, a [`SchemaName`] cannot be passed where a
//! [`DatabaseName`] is expected even though both are strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or_else(|| {
                    format!("{} must not be empty", stringify!($name))
                })
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies one transport instance for the lifetime of the process.
///
/// Generated at construction and attached to every log event the transport
/// emits, so that calls, failures and the final close of one transport can be
/// correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransportId(Uuid);

impl TransportId {
    /// Generates a new random transport identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a [`TransportId`] from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for TransportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (IBM i object names)
// ---------------------------------------------------------------------------

/// Library XMLSERVICE is installed into unless configured otherwise.
pub const DEFAULT_SCHEMA: &str = "QXMLSERV";

/// Relational database entry for the local system.
pub const DEFAULT_DATABASE: &str = "*LOCAL";

string_id! {
    /// The library (schema) XMLSERVICE is compiled into, e.g. `"QXMLSERV"`.
    SchemaName
}

impl Default for SchemaName {
    fn default() -> Self {
        Self(DEFAULT_SCHEMA.to_string())
    }
}

string_id! {
    /// A relational database directory entry (`WRKRDBDIRE`), e.g. `"*LOCAL"`.
    DatabaseName
}

impl Default for DatabaseName {
    fn default() -> Self {
        Self(DEFAULT_DATABASE.to_string())
    }
}

string_id! {
    /// An IBM i user profile name used to authenticate a call.
    UserProfile
}
