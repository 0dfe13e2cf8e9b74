//! `iDB2Call`: XMLSERVICE over a Db2 connection.

use db2::{
    DatabaseConfig, DatabaseConnection, DatabaseDriver, DatabaseTransport, Db2Error, NativeHandle,
};
use tracing::warn;
use transport::{
    DatabaseName, SchemaName, Toolkit, TransportOptions, DEFAULT_CTL, DEFAULT_DATABASE,
    DEFAULT_IPC, DEFAULT_SCHEMA,
};

use crate::env::{Environment, ProcessEnv, PASSWORD_VAR, XMLSERVICE_VAR};
use crate::{deprecation, LegacyError};

const LEGACY: &str = "IDb2Call";
const REPLACEMENT: &str = "db2::DatabaseTransport";

/// Where an [`IDb2Call`] gets its database connection from.
pub enum Db2Source<'a> {
    /// An already-open connection, used as is.
    Connection(Box<dyn DatabaseConnection>),

    /// A native driver handle, adopted as a connection.
    Handle(Box<dyn NativeHandle>),

    /// Connect through `driver` with a user profile and password.
    ///
    /// A missing password is read from the `PASSWORD` environment variable.
    Credentials {
        /// Driver used to open the connection.
        driver: &'a dyn DatabaseDriver,
        /// User profile, or `None` for the driver's default.
        user: Option<String>,
        /// Password, or `None` (or empty) to use `PASSWORD`.
        password: Option<String>,
    },
}

impl Db2Source<'_> {
    /// Closes a connection the source already owns. Credentials own nothing.
    fn discard(self) {
        let mut connection = match self {
            Db2Source::Connection(connection) => connection,
            Db2Source::Handle(handle) => handle.into_connection(),
            Db2Source::Credentials { .. } => return,
        };
        if let Err(e) = connection.close() {
            warn!(error = %e, "Failed to close connection after rejected parameters");
        }
    }
}

/// Optional `iDB2Call` parameters. Every `None` takes the documented default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Db2CallOptions {
    /// `idb2`: relational database entry, default `*LOCAL`.
    pub database: Option<String>,
    /// `ictl`: XMLSERVICE control, default `*here *cdata`.
    pub ctl: Option<String>,
    /// `ipc`: XMLSERVICE route key, default `*na`.
    pub ipc: Option<String>,
    /// `isiz`: expected output size. Deprecated and ignored.
    pub size: Option<u32>,
    /// `ilib`: XMLSERVICE library, default `$XMLSERVICE` or `QXMLSERV`.
    pub library: Option<String>,
}

/// Legacy constructor for [`db2::DatabaseTransport`].
#[deprecated(note = "use db2::DatabaseTransport instead")]
#[derive(Debug)]
pub struct IDb2Call {
    transport: DatabaseTransport,
}

impl IDb2Call {
    /// Builds the adapter, resolving fallbacks from the process environment.
    ///
    /// # Errors
    ///
    /// - [`LegacyError::InvalidParameter`] for an empty database or library
    ///   name. Nothing is connected in that case, and a connection or handle
    ///   passed in is closed.
    /// - [`LegacyError::Database`] if connecting with credentials fails.
    pub fn new(source: Db2Source<'_>, options: Db2CallOptions) -> Result<Self, LegacyError> {
        Self::with_env(source, options, &ProcessEnv)
    }

    /// Builds the adapter, resolving fallbacks from `env`.
    pub fn with_env(
        source: Db2Source<'_>,
        options: Db2CallOptions,
        env: &dyn Environment,
    ) -> Result<Self, LegacyError> {
        deprecation::constructor(LEGACY, REPLACEMENT);

        let config = match Self::resolve(options, env) {
            Ok(config) => config,
            Err(e) => {
                source.discard();
                return Err(e);
            }
        };

        let transport = match source {
            Db2Source::Connection(connection) => db2::open_transport(connection, config),
            Db2Source::Handle(handle) => db2::open_transport(handle.into_connection(), config),
            Db2Source::Credentials {
                driver,
                user,
                password,
            } => {
                let password = password
                    .filter(|p| !p.is_empty())
                    .or_else(|| env.var(PASSWORD_VAR));
                db2::connect(driver, user.as_deref(), password.as_deref(), config)?
            }
        };

        Ok(Self { transport })
    }

    fn resolve(
        options: Db2CallOptions,
        env: &dyn Environment,
    ) -> Result<DatabaseConfig, LegacyError> {
        let database = DatabaseName::new(options.database.as_deref().unwrap_or(DEFAULT_DATABASE))
            .ok_or_else(|| LegacyError::invalid("idb2", "database name must not be empty"))?;
        let library = options
            .library
            .or_else(|| env.var(XMLSERVICE_VAR))
            .unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
        let schema = SchemaName::new(library)
            .ok_or_else(|| LegacyError::invalid("ilib", "library name must not be empty"))?;

        if options.size.is_some() {
            deprecation::parameter(LEGACY, "isiz", "isiz is deprecated and ignored");
        }

        Ok(DatabaseConfig {
            options: TransportOptions::new(
                options.ctl.unwrap_or_else(|| DEFAULT_CTL.to_string()),
                options.ipc.unwrap_or_else(|| DEFAULT_IPC.to_string()),
            ),
            schema,
            database,
        })
    }

    /// Calls XMLSERVICE with the tool's accumulated actions.
    pub fn call(&mut self, tool: &dyn Toolkit) -> Result<String, Db2Error> {
        self.transport.call(tool)
    }

    /// Closes the wrapped transport.
    pub fn close(&mut self) -> Result<(), Db2Error> {
        self.transport.close()
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &DatabaseTransport {
        &self.transport
    }

    /// The wrapped transport, mutably.
    pub fn transport_mut(&mut self) -> &mut DatabaseTransport {
        &mut self.transport
    }

    /// Unwraps the modern transport.
    pub fn into_transport(self) -> DatabaseTransport {
        self.transport
    }
}
