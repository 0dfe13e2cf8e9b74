//! `iRestCall`: XMLSERVICE over HTTP.

use rest::{HttpConfig, HttpError, HttpTransport, OUT_SIZE};
use transport::{
    DatabaseName, Toolkit, TransportOptions, UserProfile, DEFAULT_CTL, DEFAULT_DATABASE,
    DEFAULT_IPC,
};

use crate::env::{Environment, ProcessEnv, PASSWORD_VAR};
use crate::{deprecation, LegacyError};

const LEGACY: &str = "IRestCall";
const REPLACEMENT: &str = "rest::HttpTransport";

/// Optional `iRestCall` parameters.
///
/// Unlike the other adapters, an empty string (or a zero size) counts as
/// omitted and takes the default.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RestCallOptions {
    /// `ipwd`: password, default `$PASSWORD`.
    pub password: Option<String>,
    /// `idb2`: relational database entry, default `*LOCAL`.
    pub database: Option<String>,
    /// `ictl`: XMLSERVICE control, default `*here *cdata`.
    pub ctl: Option<String>,
    /// `ipc`: XMLSERVICE route key, default `*na`.
    pub ipc: Option<String>,
    /// `isiz`: expected output size. Deprecated; the transport always asks
    /// for [`OUT_SIZE`].
    pub size: Option<u32>,
}

impl std::fmt::Debug for RestCallOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestCallOptions")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("ctl", &self.ctl)
            .field("ipc", &self.ipc)
            .field("size", &self.size)
            .finish()
    }
}

/// Legacy constructor for [`rest::HttpTransport`].
#[deprecated(note = "use rest::HttpTransport instead")]
#[derive(Debug)]
pub struct IRestCall {
    transport: HttpTransport,
}

impl IRestCall {
    /// Builds the adapter, resolving the password fallback from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// - [`LegacyError::InvalidParameter`] for an empty user (`iuid`) or when
    ///   no password is given and `PASSWORD` is unset (`ipwd`). No client is
    ///   built in either case.
    /// - [`LegacyError::Http`] if the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        user: &str,
        options: RestCallOptions,
    ) -> Result<Self, LegacyError> {
        Self::with_env(url, user, options, &ProcessEnv)
    }

    /// Builds the adapter, resolving the password fallback from `env`.
    pub fn with_env(
        url: impl Into<String>,
        user: &str,
        options: RestCallOptions,
        env: &dyn Environment,
    ) -> Result<Self, LegacyError> {
        Ok(Self {
            transport: rest::open_transport(Self::resolve(url, user, options, env)?)?,
        })
    }

    /// Like [`IRestCall::with_env`], but posts through a caller-configured
    /// client.
    pub fn with_client(
        client: reqwest::blocking::Client,
        url: impl Into<String>,
        user: &str,
        options: RestCallOptions,
        env: &dyn Environment,
    ) -> Result<Self, LegacyError> {
        Ok(Self {
            transport: rest::with_client(client, Self::resolve(url, user, options, env)?),
        })
    }

    fn resolve(
        url: impl Into<String>,
        user: &str,
        options: RestCallOptions,
        env: &dyn Environment,
    ) -> Result<HttpConfig, LegacyError> {
        deprecation::constructor(LEGACY, REPLACEMENT);

        let user = UserProfile::new(user)
            .ok_or_else(|| LegacyError::invalid("iuid", "user profile must not be empty"))?;
        let password = non_empty(options.password)
            .or_else(|| env.var(PASSWORD_VAR))
            .ok_or_else(|| {
                LegacyError::invalid(
                    "ipwd",
                    format!("no password given and {PASSWORD_VAR} is not set"),
                )
            })?;
        let database = DatabaseName::new(
            non_empty(options.database).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        )
        .unwrap_or_default();

        if let Some(size) = options.size {
            if size != 0 && size != OUT_SIZE {
                deprecation::parameter(
                    LEGACY,
                    "isiz",
                    &format!("isiz is deprecated, changed to {OUT_SIZE}"),
                );
            }
        }

        Ok(HttpConfig {
            url: url.into(),
            user,
            password,
            database,
            options: TransportOptions::new(
                non_empty(options.ctl).unwrap_or_else(|| DEFAULT_CTL.to_string()),
                non_empty(options.ipc).unwrap_or_else(|| DEFAULT_IPC.to_string()),
            ),
        })
    }

    /// Calls XMLSERVICE with the tool's accumulated actions.
    pub fn call(&mut self, tool: &dyn Toolkit) -> Result<String, HttpError> {
        self.transport.call(tool)
    }

    /// Closes the wrapped transport.
    pub fn close(&mut self) -> Result<(), HttpError> {
        self.transport.close()
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// The wrapped transport, mutably.
    pub fn transport_mut(&mut self) -> &mut HttpTransport {
        &mut self.transport
    }

    /// Unwraps the modern transport.
    pub fn into_transport(self) -> HttpTransport {
        self.transport
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
