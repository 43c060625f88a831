//! Database dialect system
//!
//! Each dialect is described by an embedded `dialect.toml` declaring its
//! identifier quoting, the DDL capabilities it supports and how to introspect
//! table columns. Dialects are looked up through a global registry by name,
//! alias, or by sniffing an ODBC connection string.

pub mod base;
pub mod registry;

pub mod generic;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;

pub use base::{DatabaseDialect, DialectError};
pub use registry::get_registry;

use std::sync::Arc;

/// Get dialect by name
pub fn get_dialect(name: &str) -> Option<Arc<dyn DatabaseDialect>> {
    let registry = get_registry().lock().ok()?;
    registry.get(name)
}

/// Resolve a dialect.
///
/// Priority: explicit name > config dialect > detection from the connection
/// string > generic fallback. An explicit or configured name that is unknown
/// is an error rather than a silent fallback.
pub fn get_dialect_with_config(
    explicit_name: Option<&str>,
    connection_string: Option<&str>,
    config_dialect: Option<&str>,
) -> Result<Arc<dyn DatabaseDialect>, DialectError> {
    let registry = get_registry()
        .lock()
        .map_err(|e| DialectError::ConfigError(format!("Dialect registry poisoned: {}", e)))?;

    if let Some(name) = explicit_name.or(config_dialect) {
        return registry
            .get(name)
            .ok_or_else(|| DialectError::NotFound(name.to_string()));
    }

    if let Some(conn) = connection_string {
        return registry.detect(conn);
    }

    registry
        .get("generic")
        .ok_or_else(|| DialectError::NotFound("No dialect available".to_string()))
}

/// List all available dialect names
pub fn list_dialects() -> Vec<String> {
    get_registry()
        .lock()
        .map(|registry| registry.list_dialects())
        .unwrap_or_default()
}
