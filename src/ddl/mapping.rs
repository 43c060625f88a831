use crate::ddl::error::DdlError;

/// Old-name to new-name column projection for a renaming view.
///
/// Only columns that exist on the source table may be mapped, so every entry
/// in `select_columns` is a real source column and both lists stay the same
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDefinition {
    source_table: String,
    source_columns: Vec<String>,
    view_columns: Vec<String>,
    select_columns: Vec<String>,
}

impl MappingDefinition {
    pub fn new(source_table: impl Into<String>, source_columns: Vec<String>) -> Self {
        Self {
            source_table: source_table.into(),
            source_columns,
            view_columns: Vec::new(),
            select_columns: Vec::new(),
        }
    }

    /// Expose `old_column` under the name `new_column`.
    pub fn map(&mut self, old_column: &str, new_column: &str) -> Result<&mut Self, DdlError> {
        if !self.source_columns.iter().any(|c| c == old_column) {
            return Err(DdlError::InvalidColumn {
                table: self.source_table.clone(),
                column: old_column.to_string(),
            });
        }

        self.view_columns.push(new_column.to_string());
        self.select_columns.push(old_column.to_string());
        Ok(self)
    }

    pub fn source_table(&self) -> &str {
        &self.source_table
    }

    pub fn source_columns(&self) -> &[String] {
        &self.source_columns
    }

    /// New names, index-aligned with `select_columns`.
    pub fn view_columns(&self) -> &[String] {
        &self.view_columns
    }

    /// Old names, index-aligned with `view_columns`.
    pub fn select_columns(&self) -> &[String] {
        &self.select_columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> MappingDefinition {
        MappingDefinition::new(
            "legacy_users",
            vec!["USR_ID".to_string(), "USR_NM".to_string(), "USR_EMAIL".to_string()],
        )
    }

    #[test]
    fn test_map_keeps_lists_aligned() {
        let mut mapper = users();
        mapper.map("USR_NM", "name").unwrap().map("USR_ID", "id").unwrap();

        assert_eq!(mapper.view_columns(), ["name", "id"]);
        assert_eq!(mapper.select_columns(), ["USR_NM", "USR_ID"]);
    }

    #[test]
    fn test_map_rejects_unknown_column() {
        let mut mapper = users();
        let err = mapper.map("usr_id", "id").unwrap_err();

        match err {
            DdlError::InvalidColumn { table, column } => {
                assert_eq!(table, "legacy_users");
                assert_eq!(column, "usr_id");
            }
            other => panic!("Expected InvalidColumn, got {:?}", other),
        }
        assert!(mapper.view_columns().is_empty());
        assert!(mapper.select_columns().is_empty());
    }

    #[test]
    fn test_same_source_column_may_be_mapped_twice() {
        let mut mapper = users();
        mapper.map("USR_ID", "id").unwrap();
        mapper.map("USR_ID", "user_id").unwrap();

        assert_eq!(mapper.select_columns(), ["USR_ID", "USR_ID"]);
    }
}
