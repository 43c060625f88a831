use crate::ddl::kind::Feature;
use crate::executor::ConnectionError;

/// What a DDL operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdlOutcome {
    /// The statement was submitted and succeeded.
    Executed { sql: String },
    /// The dialect lacks the capability; nothing was submitted.
    Skipped { feature: Feature },
}

impl DdlOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, DdlOutcome::Skipped { .. })
    }

    pub fn sql(&self) -> Option<&str> {
        match self {
            DdlOutcome::Executed { sql } => Some(sql),
            DdlOutcome::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DdlError {
    #[error("Column '{column}' does not exist on table '{table}'")]
    InvalidColumn { table: String, column: String },

    #[error("Failed to read columns of '{table}': {source}")]
    Introspection {
        table: String,
        #[source]
        source: ConnectionError,
    },

    #[error("Statement execution failed: {0}")]
    Execution(#[from] ConnectionError),
}
