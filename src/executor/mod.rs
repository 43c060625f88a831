pub mod connection;
pub mod dry_run;

pub use connection::{ConnectionError, ConnectionManager, DatabaseExecutor};
pub use dry_run::DryRunExecutor;

use crate::model::ColumnDescriptor;

/// What the DDL layer needs from a database connection.
pub trait SchemaConnection {
    /// Run a single statement, discarding any result set.
    fn execute(&mut self, sql: &str) -> Result<(), ConnectionError>;

    /// Columns of `table` in ordinal order.
    fn columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>, ConnectionError>;
}
