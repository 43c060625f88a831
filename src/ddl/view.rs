use crate::dialects::DatabaseDialect;

/// Column list and backing query of a view or materialized view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefinition {
    columns: Vec<String>,
    select_query: String,
}

impl ViewDefinition {
    pub fn new(select_query: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            select_query: select_query.into(),
        }
    }

    /// Declare the next output column. Duplicates are passed through as-is.
    pub fn column(&mut self, name: impl Into<String>) -> &mut Self {
        self.columns.push(name.into());
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn select_query(&self) -> &str {
        &self.select_query
    }

    /// `(a, b, ...)` with each column quoted, or an empty string when no
    /// columns were declared.
    pub fn to_sql(&self, dialect: &dyn DatabaseDialect) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let quoted: Vec<String> = self
            .columns
            .iter()
            .map(|c| dialect.quote_column_name(c))
            .collect();
        format!("({})", quoted.join(", "))
    }
}
