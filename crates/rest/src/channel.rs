//! The HTTP channel and its constructors.

use std::fmt;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use transport::{
    Channel, DatabaseName, Toolkit, TraceField, TransportOptions, UserProfile, XmlServiceTransport,
};

use crate::{HttpError, OUT_SIZE};

/// A transport calling XMLSERVICE over HTTP.
pub type HttpTransport = XmlServiceTransport<HttpChannel>;

/// Configuration for an [`HttpTransport`].
///
/// The password is accepted when deserialising but never serialised or
/// printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// XMLSERVICE endpoint, e.g. `https://example.com/cgi-bin/xmlcgi.pgm`.
    pub url: String,

    /// User profile the call runs under.
    pub user: UserProfile,

    /// Password for `user`.
    #[serde(default, skip_serializing)]
    pub password: String,

    /// Relational database entry, `*LOCAL` unless configured.
    #[serde(default)]
    pub database: DatabaseName,

    /// `ctl` / `ipc` options sent with every call.
    #[serde(flatten)]
    pub options: TransportOptions,
}

impl HttpConfig {
    /// Creates a configuration with default database and options.
    pub fn new(url: impl Into<String>, user: UserProfile, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user,
            password: password.into(),
            database: DatabaseName::default(),
            options: TransportOptions::default(),
        }
    }
}

impl fmt::Debug for HttpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("options", &self.options)
            .finish()
    }
}

/// Posts XMLSERVICE requests with an owned HTTP client.
pub struct HttpChannel {
    client: Option<Client>,
    url: String,
    user: UserProfile,
    password: String,
    database: DatabaseName,
}

impl HttpChannel {
    /// The XMLSERVICE endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Points subsequent calls at a different endpoint.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// The user profile calls run under.
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// The relational database entry.
    pub fn database(&self) -> &DatabaseName {
        &self.database
    }
}

impl Channel for HttpChannel {
    type Error = HttpError;

    const KIND: &'static str = "rest";
    const TRACE_FIELDS: &'static [TraceField] = &[
        TraceField::Name("url"),
        TraceField::Labeled {
            label: "db2",
            attribute: "database",
        },
        TraceField::Labeled {
            label: "uid",
            attribute: "user",
        },
    ];

    fn dispatch(
        &mut self,
        options: &TransportOptions,
        tool: &dyn Toolkit,
    ) -> Result<String, Self::Error> {
        // The client is only taken by `release`, after which the transport
        // never dispatches again.
        let Some(client) = self.client.as_ref() else {
            return Ok(String::new());
        };

        let xml = tool.xml_in();
        let out_size = OUT_SIZE.to_string();
        let form = [
            ("db2", self.database.as_str()),
            ("uid", self.user.as_str()),
            ("pwd", self.password.as_str()),
            ("ipc", options.ipc.as_str()),
            ("ctl", options.ctl.as_str()),
            ("xmlin", xml.as_str()),
            ("xmlout", out_size.as_str()),
        ];

        let request_error = |source| HttpError::Request {
            url: self.url.clone(),
            source,
        };
        let response = client
            .post(&self.url)
            .form(&form)
            .send()
            .map_err(request_error)?;

        let status = response.status();
        debug!(url = %self.url, status = status.as_u16(), "XMLSERVICE responded");
        if !status.is_success() {
            let body = match response.text() {
                Ok(body) => body,
                Err(e) => {
                    debug!(
                        url = %self.url,
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read XMLSERVICE error body"
                    );
                    String::new()
                }
            };
            return Err(HttpError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
                body,
            });
        }

        response.text().map_err(request_error)
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.client = None;
        Ok(())
    }

    fn trace_value(&self, attribute: &str) -> Option<String> {
        match attribute {
            "url" => Some(self.url.clone()),
            "database" => Some(self.database.to_string()),
            "user" => Some(self.user.to_string()),
            _ => None,
        }
    }
}

/// Builds a default blocking client and wraps it in a transport.
///
/// # Errors
///
/// [`HttpError::Client`] if the TLS backend cannot be initialised.
pub fn open_transport(config: HttpConfig) -> Result<HttpTransport, HttpError> {
    let client = Client::builder()
        .build()
        .map_err(|source| HttpError::Client { source })?;
    Ok(with_client(client, config))
}

/// Wraps a caller-configured client (timeouts, proxies, certificates) in a
/// transport.
pub fn with_client(client: Client, config: HttpConfig) -> HttpTransport {
    let channel = HttpChannel {
        client: Some(client),
        url: config.url,
        user: config.user,
        password: config.password,
        database: config.database,
    };
    XmlServiceTransport::new(channel, config.options)
}
