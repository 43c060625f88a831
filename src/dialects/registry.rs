use crate::dialects::base::{DatabaseDialect, DetectionResult, DialectError};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Central registry for all available database dialects
pub struct DialectRegistry {
    dialects: HashMap<String, Arc<dyn DatabaseDialect>>,
    aliases: HashMap<String, String>, // alias -> dialect_name mapping
}

impl DialectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            dialects: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a dialect in the registry
    pub fn register(&mut self, dialect: Arc<dyn DatabaseDialect>) {
        let name = dialect.name().to_string();
        debug!("Registering dialect: {}", name);

        for alias in dialect.aliases() {
            self.aliases.insert(alias.clone(), name.clone());
        }

        self.dialects.insert(name, dialect);
    }

    /// Get a dialect by name (including aliases), case-insensitively
    pub fn get(&self, name: &str) -> Option<Arc<dyn DatabaseDialect>> {
        let name = name.to_lowercase();

        if let Some(dialect) = self.dialects.get(&name) {
            return Some(dialect.clone());
        }

        self.aliases
            .get(&name)
            .and_then(|dialect_name| self.dialects.get(dialect_name).cloned())
    }

    /// Detect dialect from connection string
    pub fn detect(&self, connection_string: &str) -> Result<Arc<dyn DatabaseDialect>, DialectError> {
        let mut candidates: Vec<(Arc<dyn DatabaseDialect>, DetectionResult)> = Vec::new();

        debug!("Detecting dialect for connection string (length: {})", connection_string.len());

        for dialect in self.dialects.values() {
            if let Some(result) = dialect.detect(connection_string) {
                debug!(
                    "Dialect '{}' matched '{}' with confidence {}",
                    result.dialect_name, result.matched_pattern, result.confidence
                );
                candidates.push((dialect.clone(), result));
            }
        }

        if candidates.is_empty() {
            warn!("No dialect detected for connection string");
            return Err(DialectError::NotFound("No matching dialect found".to_string()));
        }

        // Highest confidence first
        candidates.sort_by(|a, b| {
            b.1.confidence
                .partial_cmp(&a.1.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if candidates.len() > 1 && (candidates[0].1.confidence - candidates[1].1.confidence).abs() < 0.1 {
            let mut names: Vec<String> = candidates
                .iter()
                .filter(|(_, r)| (candidates[0].1.confidence - r.confidence).abs() < 0.1)
                .map(|(d, _)| d.name().to_string())
                .collect();
            names.sort();
            return Err(DialectError::Ambiguous(names));
        }

        let selected = &candidates[0];
        debug!("Selected dialect: {} (confidence: {})", selected.0.name(), selected.1.confidence);

        Ok(selected.0.clone())
    }

    /// List all registered dialect names, sorted
    pub fn list_dialects(&self) -> Vec<String> {
        let mut names: Vec<String> = self.dialects.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all aliases for a dialect
    pub fn get_aliases(&self, dialect_name: &str) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .aliases
            .iter()
            .filter(|(_, name)| *name == dialect_name)
            .map(|(alias, _)| alias.clone())
            .collect();
        aliases.sort();
        aliases
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::{Mutex, OnceLock};

/// Global registry instance
static GLOBAL_REGISTRY: OnceLock<Mutex<DialectRegistry>> = OnceLock::new();

/// Get the global dialect registry (initialized lazily)
pub fn get_registry() -> &'static Mutex<DialectRegistry> {
    GLOBAL_REGISTRY.get_or_init(|| Mutex::new(create_default_registry()))
}

/// Create registry with all built-in dialects
pub fn create_default_registry() -> DialectRegistry {
    let mut registry = DialectRegistry::new();

    registry.register(Arc::new(crate::dialects::postgres::PostgresDialect::new()));
    registry.register(Arc::new(crate::dialects::mysql::MysqlDialect::new()));
    registry.register(Arc::new(crate::dialects::sqlite::SqliteDialect::new()));
    registry.register(Arc::new(crate::dialects::oracle::OracleDialect::new()));
    registry.register(Arc::new(crate::dialects::generic::GenericDialect::new()));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_dialects_registered() {
        let registry = create_default_registry();
        assert_eq!(
            registry.list_dialects(),
            vec!["generic", "mysql", "oracle", "postgres", "sqlite"]
        );
    }

    #[test]
    fn test_lookup_by_alias() {
        let registry = create_default_registry();
        assert_eq!(registry.get("pg").unwrap().name(), "postgres");
        assert_eq!(registry.get("MariaDB").unwrap().name(), "mysql");
        assert_eq!(registry.get_aliases("sqlite"), vec!["sqlite3"]);
        assert!(registry.get("db2").is_none());
    }

    #[test]
    fn test_detect_from_connection_string() {
        let registry = create_default_registry();

        let dialect = registry
            .detect("Driver={PostgreSQL Unicode};Server=localhost;Database=app;")
            .unwrap();
        assert_eq!(dialect.name(), "postgres");

        let dialect = registry.detect("Driver={SQLite3};Database=test.db;").unwrap();
        assert_eq!(dialect.name(), "sqlite");

        let dialect = registry.detect("Driver={Oracle in OraClient19Home1};DBQ=XE;").unwrap();
        assert_eq!(dialect.name(), "oracle");
    }

    #[test]
    fn test_detect_falls_back_to_generic() {
        let registry = create_default_registry();
        let dialect = registry.detect("DSN=warehouse").unwrap();
        assert_eq!(dialect.name(), "generic");
    }

    #[test]
    fn test_detect_on_empty_registry() {
        let registry = DialectRegistry::new();
        assert!(matches!(
            registry.detect("DSN=anything"),
            Err(DialectError::NotFound(_))
        ));
    }
}
