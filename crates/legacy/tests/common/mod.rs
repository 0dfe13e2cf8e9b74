//! Shared fakes and log capture for the legacy adapter tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use db2::{DatabaseConnection, DatabaseDriver, DriverError, NativeHandle};
use direct::{EntryError, XmlServiceEntry};
use transport::DatabaseName;

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a WARN-level subscriber installed and returns its result
/// together with everything that was logged.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logged = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    (result, logged)
}

pub fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
    vars.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Database fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DbLog {
    pub connects: Vec<(String, Option<String>, Option<String>)>,
    pub statements: Vec<(String, Vec<String>)>,
    pub closes: usize,
}

pub type SharedDbLog = Arc<Mutex<DbLog>>;

pub struct FakeConnection {
    pub log: SharedDbLog,
    pub response: String,
}

impl DatabaseConnection for FakeConnection {
    fn call_procedure(&mut self, sql: &str, params: &[&str]) -> Result<Vec<String>, DriverError> {
        self.log.lock().unwrap().statements.push((
            sql.to_string(),
            params.iter().map(|p| p.to_string()).collect(),
        ));
        Ok(vec![self.response.clone()])
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}

pub struct FakeHandle {
    pub log: SharedDbLog,
}

impl NativeHandle for FakeHandle {
    fn into_connection(self: Box<Self>) -> Box<dyn DatabaseConnection> {
        Box::new(FakeConnection {
            log: self.log,
            response: "<adopted/>".to_string(),
        })
    }
}

pub struct FakeDriver {
    pub log: SharedDbLog,
}

impl DatabaseDriver for FakeDriver {
    fn connect(
        &self,
        database: &DatabaseName,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Box<dyn DatabaseConnection>, DriverError> {
        self.log.lock().unwrap().connects.push((
            database.to_string(),
            user.map(str::to_string),
            password.map(str::to_string),
        ));
        Ok(Box::new(FakeConnection {
            log: Arc::clone(&self.log),
            response: "<connected/>".to_string(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Direct entry fake
// ---------------------------------------------------------------------------

pub struct EchoEntry {
    pub seen: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl XmlServiceEntry for EchoEntry {
    fn xmlservice(&mut self, xml: &str, ctl: &str, ipc: &str) -> Result<Vec<u8>, EntryError> {
        self.seen
            .lock()
            .unwrap()
            .push((xml.to_string(), ctl.to_string(), ipc.to_string()));
        let mut out = format!("<echo>{xml}</echo>").into_bytes();
        out.push(0);
        Ok(out)
    }
}
