//! The database channel and its constructors.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use transport::{
    Channel, DatabaseName, SchemaName, Toolkit, TraceField, TransportOptions, XmlServiceTransport,
};

use crate::{DatabaseConnection, DatabaseDriver, Db2Error};

/// A transport calling XMLSERVICE through a database connection.
pub type DatabaseTransport = XmlServiceTransport<DatabaseChannel>;

/// Configuration for a [`DatabaseTransport`].
///
/// Every field is optional in serialised form and falls back to the XMLSERVICE
/// defaults (`*here *cdata`, `*na`, `QXMLSERV`, `*LOCAL`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `ctl` / `ipc` options sent with every call.
    #[serde(flatten)]
    pub options: TransportOptions,

    /// Library XMLSERVICE is installed into.
    #[serde(default)]
    pub schema: SchemaName,

    /// Relational database entry to connect to. Only used by [`connect`].
    #[serde(default)]
    pub database: DatabaseName,
}

/// Calls the XMLSERVICE stored procedure on an owned connection.
pub struct DatabaseChannel {
    connection: Box<dyn DatabaseConnection>,
    schema: SchemaName,
    statement: String,
}

impl DatabaseChannel {
    /// Creates a channel over `connection` calling XMLSERVICE in `schema`.
    pub fn new(connection: Box<dyn DatabaseConnection>, schema: SchemaName) -> Self {
        let statement = format!("CALL {schema}.iPLUGR512K(?,?,?)");
        Self {
            connection,
            schema,
            statement,
        }
    }

    /// The library XMLSERVICE is called in.
    pub fn schema(&self) -> &SchemaName {
        &self.schema
    }

    /// The SQL statement executed for every call.
    pub fn statement(&self) -> &str {
        &self.statement
    }
}

impl Channel for DatabaseChannel {
    type Error = Db2Error;

    const KIND: &'static str = "db2";
    const TRACE_FIELDS: &'static [TraceField] = &[TraceField::Name("schema")];

    fn dispatch(
        &mut self,
        options: &TransportOptions,
        tool: &dyn Toolkit,
    ) -> Result<String, Self::Error> {
        let xml = tool.xml_in();
        let rows = self
            .connection
            .call_procedure(
                &self.statement,
                &[options.ipc.as_str(), options.ctl.as_str(), xml.as_str()],
            )
            .map_err(|source| Db2Error::Procedure { source })?;

        debug!(rows = rows.len(), statement = %self.statement, "XMLSERVICE procedure returned");

        let mut output = rows.concat();
        // XMLSERVICE pads the final output row with NULs.
        output.truncate(output.trim_end_matches('\0').len());
        Ok(output)
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.connection
            .close()
            .map_err(|source| Db2Error::Close { source })
    }

    fn trace_value(&self, attribute: &str) -> Option<String> {
        match attribute {
            "schema" => Some(self.schema.to_string()),
            _ => None,
        }
    }
}

/// Wraps an already-open connection in a transport.
pub fn open_transport(
    connection: Box<dyn DatabaseConnection>,
    config: DatabaseConfig,
) -> DatabaseTransport {
    XmlServiceTransport::new(DatabaseChannel::new(connection, config.schema), config.options)
}

/// Connects to `config.database` through `driver` and wraps the connection in
/// a transport.
///
/// # Errors
///
/// [`Db2Error::Connect`] if the driver cannot open the connection.
pub fn connect(
    driver: &dyn DatabaseDriver,
    user: Option<&str>,
    password: Option<&str>,
    config: DatabaseConfig,
) -> Result<DatabaseTransport, Db2Error> {
    let connection = driver
        .connect(&config.database, user, password)
        .map_err(|source| Db2Error::Connect {
            database: config.database.to_string(),
            source,
        })?;
    info!(database = %config.database, user = user.unwrap_or("*CURRENT"), "Connected to database");
    Ok(open_transport(connection, config))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use transport::{RawXml, DEFAULT_CTL, DEFAULT_IPC};

    use super::*;
    use crate::DriverError;

    #[derive(Default)]
    struct Log {
        calls: Vec<(String, Vec<String>)>,
        closes: usize,
    }

    struct FakeConnection {
        log: Arc<Mutex<Log>>,
        rows: Vec<String>,
        fail: bool,
    }

    impl DatabaseConnection for FakeConnection {
        fn call_procedure(
            &mut self,
            sql: &str,
            params: &[&str],
        ) -> Result<Vec<String>, DriverError> {
            self.log.lock().unwrap().calls.push((
                sql.to_string(),
                params.iter().map(|p| p.to_string()).collect(),
            ));
            if self.fail {
                return Err("SQL0204 iPLUGR512K not found".into());
            }
            Ok(self.rows.clone())
        }

        fn close(&mut self) -> Result<(), DriverError> {
            self.log.lock().unwrap().closes += 1;
            Ok(())
        }
    }

    struct FakeDriver {
        log: Arc<Mutex<Log>>,
        refuse: bool,
    }

    impl DatabaseDriver for FakeDriver {
        fn connect(
            &self,
            database: &DatabaseName,
            user: Option<&str>,
            password: Option<&str>,
        ) -> Result<Box<dyn DatabaseConnection>, DriverError> {
            if self.refuse {
                return Err(format!("SQL30082 authorization failure on {database}").into());
            }
            self.log.lock().unwrap().calls.push((
                format!("connect {database}"),
                vec![
                    user.unwrap_or_default().to_string(),
                    password.unwrap_or_default().to_string(),
                ],
            ));
            Ok(Box::new(FakeConnection {
                log: Arc::clone(&self.log),
                rows: vec!["<ok/>".to_string()],
                fail: false,
            }))
        }
    }

    fn fake(rows: &[&str], log: &Arc<Mutex<Log>>) -> Box<dyn DatabaseConnection> {
        Box::new(FakeConnection {
            log: Arc::clone(log),
            rows: rows.iter().map(|r| r.to_string()).collect(),
            fail: false,
        })
    }

    #[test]
    fn test_call_runs_procedure_with_ipc_ctl_and_xml() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut transport = open_transport(fake(&["<ok/>"], &log), DatabaseConfig::default());

        transport.call(&RawXml::new("<xmlservice/>")).unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.calls[0].0, "CALL QXMLSERV.iPLUGR512K(?,?,?)");
        assert_eq!(log.calls[0].1, vec![DEFAULT_IPC, DEFAULT_CTL, "<xmlservice/>"]);
    }

    #[test]
    fn test_rows_are_concatenated_and_nul_padding_trimmed() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut transport = open_transport(
            fake(&["<myscript>", "<cmd/>", "</myscript>\0\0\0"], &log),
            DatabaseConfig::default(),
        );

        let xml = transport.call(&RawXml::new("<x/>")).unwrap();

        assert_eq!(xml, "<myscript><cmd/></myscript>");
    }

    #[test]
    fn test_no_rows_yield_empty_output() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut transport = open_transport(fake(&[], &log), DatabaseConfig::default());

        assert_eq!(transport.call(&RawXml::new("<x/>")).unwrap(), "");
    }

    #[test]
    fn test_custom_schema_changes_statement_and_trace() {
        let log = Arc::new(Mutex::new(Log::default()));
        let config = DatabaseConfig {
            schema: SchemaName::new("XMLSERVICE").unwrap(),
            ..DatabaseConfig::default()
        };
        let transport = open_transport(fake(&[], &log), config);

        assert_eq!(
            transport.channel().unwrap().statement(),
            "CALL XMLSERVICE.iPLUGR512K(?,?,?)"
        );
        assert_eq!(
            transport.trace_data(),
            " ipc(*na) ctl(*here *cdata) schema(XMLSERVICE)"
        );
    }

    #[test]
    fn test_procedure_failure_is_reported() {
        let log = Arc::new(Mutex::new(Log::default()));
        let connection = Box::new(FakeConnection {
            log: Arc::clone(&log),
            rows: vec![],
            fail: true,
        });
        let mut transport = open_transport(connection, DatabaseConfig::default());

        let err = transport.call(&RawXml::new("<x/>")).unwrap_err();

        assert!(matches!(err, Db2Error::Procedure { .. }));
        assert!(err.to_string().contains("SQL0204"));
    }

    #[test]
    fn test_close_closes_connection_once() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut transport = open_transport(fake(&[], &log), DatabaseConfig::default());

        transport.close().unwrap();
        transport.close().unwrap();
        drop(transport);

        assert_eq!(log.lock().unwrap().closes, 1);
    }

    #[test]
    fn test_call_after_close_is_closed_error() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut transport = open_transport(fake(&["<ok/>"], &log), DatabaseConfig::default());
        transport.close().unwrap();

        let err = transport.call(&RawXml::new("<x/>")).unwrap_err();

        assert!(matches!(err, Db2Error::Closed(_)));
        assert!(log.lock().unwrap().calls.is_empty());
    }

    #[test]
    fn test_connect_uses_driver_and_database() {
        let log = Arc::new(Mutex::new(Log::default()));
        let driver = FakeDriver {
            log: Arc::clone(&log),
            refuse: false,
        };

        let mut transport = connect(
            &driver,
            Some("QSECOFR"),
            Some("secret"),
            DatabaseConfig::default(),
        )
        .unwrap();
        assert_eq!(transport.call(&RawXml::new("<x/>")).unwrap(), "<ok/>");

        let log = log.lock().unwrap();
        assert_eq!(log.calls[0].0, "connect *LOCAL");
        assert_eq!(log.calls[0].1, vec!["QSECOFR", "secret"]);
    }

    #[test]
    fn test_connect_failure_names_database() {
        let log = Arc::new(Mutex::new(Log::default()));
        let driver = FakeDriver { log, refuse: true };

        let err = connect(&driver, None, None, DatabaseConfig::default()).unwrap_err();

        match err {
            Db2Error::Connect { database, .. } => assert_eq!(database, "*LOCAL"),
            other => panic!("expected connect error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_deserialises_with_defaults() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"ctl": "*sbmjob", "schema": "XMLSERVICE"}"#).unwrap();

        assert_eq!(config.options.ctl, "*sbmjob");
        assert_eq!(config.options.ipc, DEFAULT_IPC);
        assert_eq!(config.schema.as_str(), "XMLSERVICE");
        assert_eq!(config.database.as_str(), "*LOCAL");
    }
}
