//! Port traits for the database driver.

use transport::DatabaseName;

/// Error reported by a database driver.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An open database connection able to call a stored procedure.
pub trait DatabaseConnection: Send {
    /// Executes `sql` with positional string parameters and returns the first
    /// column of every row of the result set, in order.
    fn call_procedure(&mut self, sql: &str, params: &[&str]) -> Result<Vec<String>, DriverError>;

    /// Closes the connection.
    fn close(&mut self) -> Result<(), DriverError>;
}

/// A native driver handle that has not yet been wrapped as a
/// [`DatabaseConnection`].
pub trait NativeHandle: Send {
    /// Adopts the handle as a connection. The connection takes ownership of
    /// the handle and closes it on release.
    fn into_connection(self: Box<Self>) -> Box<dyn DatabaseConnection>;
}

/// Opens connections from credentials.
pub trait DatabaseDriver {
    /// Connects to `database`. A missing user or password lets the driver
    /// fall back to its own defaults (e.g. the current job's user).
    fn connect(
        &self,
        database: &DatabaseName,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Box<dyn DatabaseConnection>, DriverError>;
}
