use crate::dialects::DatabaseDialect;
use crate::executor::SchemaConnection;
use crate::model::ColumnDescriptor;
use log::{debug, error, info};
use odbc_api::{
    buffers::TextRowSet, Connection, ConnectionOptions, Cursor, Environment, Error as OdbcError,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("ODBC error: {0}")]
    Odbc(#[from] OdbcError),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),
}

pub struct ConnectionManager {
    environment: Arc<Environment>,
}

impl ConnectionManager {
    pub fn new() -> Result<Self, ConnectionError> {
        let environment = Environment::new()?;
        Ok(Self {
            environment: Arc::new(environment),
        })
    }

    pub fn connect(&self, connection_string: &str) -> Result<Connection<'_>, ConnectionError> {
        debug!(
            "Connecting to database with connection string length: {}",
            connection_string.len()
        );

        let connection = self
            .environment
            .connect_with_connection_string(connection_string, ConnectionOptions::default())
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                ConnectionError::ConnectionFailed(e.to_string())
            })?;

        info!("Successfully connected to database");
        Ok(connection)
    }
}

/// ODBC-backed statement executor. Column introspection runs the dialect's
/// columns query.
pub struct DatabaseExecutor<'a> {
    connection: Connection<'a>,
    dialect: Arc<dyn DatabaseDialect>,
}

impl<'a> DatabaseExecutor<'a> {
    pub fn new(connection: Connection<'a>, dialect: Arc<dyn DatabaseDialect>) -> Self {
        Self { connection, dialect }
    }

    /// Execute one statement as-is. Statements are never split, so function
    /// bodies containing `;` reach the driver intact.
    pub fn execute_statement(&mut self, sql: &str) -> Result<(), ConnectionError> {
        debug!("Executing SQL statement: {}", sql);

        let mut prepared = self
            .connection
            .prepare(sql)
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?;

        match prepared.execute(()) {
            Ok(Some(mut cursor)) => {
                let mut buffer = TextRowSet::for_cursor(100, &mut cursor, Some(4096))?;
                let mut row_set_cursor = cursor.bind_buffer(&mut buffer)?;
                while row_set_cursor.fetch()?.is_some() {
                    // Consume results
                }
                debug!("Statement executed successfully with results");
                Ok(())
            }
            Ok(None) => {
                debug!("Statement executed successfully (no results)");
                Ok(())
            }
            Err(e) => {
                error!("Statement execution failed: {}", e);
                Err(ConnectionError::QueryFailed(e.to_string()))
            }
        }
    }

    pub fn query_rows(&mut self, query: &str) -> Result<Vec<Vec<String>>, ConnectionError> {
        debug!("Querying multiple rows: {}", query);

        let mut prepared = self
            .connection
            .prepare(query)
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?;

        let mut cursor = prepared
            .execute(())
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?
            .ok_or_else(|| ConnectionError::QueryFailed("Query returned no cursor".to_string()))?;

        let mut buffer = TextRowSet::for_cursor(100, &mut cursor, Some(4096))?;
        let mut row_set_cursor = cursor.bind_buffer(&mut buffer)?;
        let mut results = Vec::new();

        while let Some(row_set) = row_set_cursor.fetch()? {
            for row_index in 0..row_set.num_rows() {
                let mut row = Vec::new();
                for col_index in 0..row_set.num_cols() {
                    let value = row_set
                        .at(col_index, row_index)
                        .map(|v| String::from_utf8_lossy(v).to_string())
                        .unwrap_or_else(|| "NULL".to_string());
                    row.push(value);
                }
                results.push(row);
            }
        }

        debug!("Query returned {} rows", results.len());
        Ok(results)
    }
}

impl SchemaConnection for DatabaseExecutor<'_> {
    fn execute(&mut self, sql: &str) -> Result<(), ConnectionError> {
        self.execute_statement(sql)
    }

    fn columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>, ConnectionError> {
        let query = self.dialect.columns_sql(table);
        let rows = self.query_rows(&query)?;
        Ok(rows.iter().filter_map(|row| ColumnDescriptor::from_row(row)).collect())
    }
}
