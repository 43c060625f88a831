/// A column as reported by schema introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
        }
    }

    /// Build from a `(name, type, nullable)` introspection row. Rows with no
    /// name are skipped.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let name = row.first()?.trim();
        if name.is_empty() {
            return None;
        }

        let data_type = row.get(1).map(|t| t.trim().to_string()).unwrap_or_default();
        let nullable = row
            .get(2)
            .map(|n| matches!(n.trim().to_uppercase().as_str(), "YES" | "Y" | "1" | "TRUE"))
            .unwrap_or(true);

        Some(Self {
            name: name.to_string(),
            data_type,
            nullable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_from_row() {
        let column = ColumnDescriptor::from_row(&row(&["id", "integer", "NO"])).unwrap();
        assert_eq!(column.name, "id");
        assert_eq!(column.data_type, "integer");
        assert!(!column.nullable);

        let column = ColumnDescriptor::from_row(&row(&["email", "text", "YES"])).unwrap();
        assert!(column.nullable);
    }

    #[test]
    fn test_from_row_without_name() {
        assert!(ColumnDescriptor::from_row(&[]).is_none());
        assert!(ColumnDescriptor::from_row(&row(&["  ", "text"])).is_none());
    }
}
