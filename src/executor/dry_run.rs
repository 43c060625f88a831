use crate::executor::{ConnectionError, SchemaConnection};
use crate::model::ColumnDescriptor;
use log::debug;
use std::collections::HashMap;

/// Records statements instead of running them.
///
/// Column introspection is answered from tables registered up front; unknown
/// tables have no columns.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    statements: Vec<String>,
    tables: HashMap<String, Vec<ColumnDescriptor>>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the columns `columns()` reports for `table`.
    pub fn with_table(mut self, table: &str, columns: Vec<ColumnDescriptor>) -> Self {
        self.tables.insert(table.to_string(), columns);
        self
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }
}

impl SchemaConnection for DryRunExecutor {
    fn execute(&mut self, sql: &str) -> Result<(), ConnectionError> {
        debug!("🔍 DRY RUN: {}", sql);
        self.statements.push(sql.to_string());
        Ok(())
    }

    fn columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>, ConnectionError> {
        let columns = self.tables.get(table).cloned().unwrap_or_default();
        debug!("Dry run reports {} columns for {}", columns.len(), table);
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_statements_in_order() {
        let mut executor = DryRunExecutor::new();
        executor.execute("DROP VIEW v").unwrap();
        executor.execute("CREATE VIEW v AS SELECT 1").unwrap();

        assert_eq!(
            executor.into_statements(),
            vec!["DROP VIEW v", "CREATE VIEW v AS SELECT 1"]
        );
    }

    #[test]
    fn test_columns_from_registered_tables() {
        let mut executor = DryRunExecutor::new()
            .with_table("users", vec![ColumnDescriptor::new("id", "INTEGER")]);

        let columns = executor.columns("users").unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "id");
        assert!(executor.columns("missing").unwrap().is_empty());
    }
}
