use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ddl::Capabilities;

/// Configuration metadata for a database dialect
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectConfig {
    pub metadata: DialectMetadata,
    pub detection: DetectionConfig,
    pub features: FeatureConfig,
    pub sql: SqlConfig,
    pub introspection: IntrospectionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectMetadata {
    pub name: String,
    pub version: String,
    pub aliases: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionConfig {
    pub connection_patterns: Vec<String>,
    pub driver_patterns: Vec<String>,
    /// Plain substrings tried when no regex matched
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureConfig {
    pub supports_views: bool,
    pub supports_materialized_views: bool,
    pub supports_functions: bool,
    pub supports_view_columns_definition: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqlConfig {
    pub quote_identifier: String,
    pub escape_identifier: String,

    #[serde(default = "default_function_return_keyword")]
    pub function_return_keyword: String,

    #[serde(default = "default_function_body_keyword")]
    pub function_body_keyword: String,

    #[serde(default = "default_inout_keyword")]
    pub inout_keyword: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntrospectionConfig {
    /// Query returning (name, type, nullable) rows; `{table}` is substituted
    pub columns_query: String,
}

fn default_function_return_keyword() -> String {
    "RETURN".to_string()
}
fn default_function_body_keyword() -> String {
    "IS".to_string()
}
fn default_inout_keyword() -> String {
    "IN OUT".to_string()
}

/// Result of dialect detection
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub dialect_name: String,
    pub confidence: f32,
    pub matched_pattern: String,
}

/// Base trait that all database dialects must implement
pub trait DatabaseDialect: Send + Sync {
    /// Get the dialect configuration
    fn config(&self) -> &DialectConfig;

    /// Get the dialect name
    fn name(&self) -> &str {
        &self.config().metadata.name
    }

    /// Get dialect aliases
    fn aliases(&self) -> &[String] {
        &self.config().metadata.aliases
    }

    /// Capabilities declared in the dialect's feature table
    fn capabilities(&self) -> Capabilities {
        Capabilities::from_features(&self.config().features)
    }

    /// Detect if this dialect matches the given connection string.
    ///
    /// Connection patterns are matched against the lowercased string, driver
    /// patterns against the original, then plain keywords as a last resort.
    fn detect(&self, connection_string: &str) -> Option<DetectionResult> {
        let detection = &self.config().detection;
        let conn_lower = connection_string.to_lowercase();

        let matched = first_match(&detection.connection_patterns, &conn_lower)
            .map(|p| (0.9f32, p))
            .or_else(|| first_match(&detection.driver_patterns, connection_string).map(|p| (0.8, p)))
            .or_else(|| {
                detection
                    .keywords
                    .iter()
                    .find(|k| conn_lower.contains(k.as_str()))
                    .map(|k| (0.7, k.clone()))
            });

        matched.map(|(confidence, matched_pattern)| DetectionResult {
            dialect_name: self.name().to_string(),
            confidence,
            matched_pattern,
        })
    }

    /// Quote an identifier according to dialect rules
    fn quote_identifier(&self, identifier: &str) -> String {
        let quote = &self.config().sql.quote_identifier;
        let escape = &self.config().sql.escape_identifier;
        let escaped = identifier.replace(quote, escape);
        format!("{}{}{}", quote, escaped, quote)
    }

    /// Quote a possibly schema-qualified table name, part by part
    fn quote_table_name(&self, name: &str) -> String {
        name.split('.')
            .map(|part| self.quote_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn quote_column_name(&self, name: &str) -> String {
        self.quote_identifier(name)
    }

    /// SQL listing the columns of `table` in ordinal order
    fn columns_sql(&self, table: &str) -> String {
        self.config()
            .introspection
            .columns_query
            .replace("{table}", &table.replace('\'', "''"))
    }

    fn function_return_keyword(&self) -> &str {
        &self.config().sql.function_return_keyword
    }

    fn function_body_keyword(&self) -> &str {
        &self.config().sql.function_body_keyword
    }

    fn inout_keyword(&self) -> &str {
        &self.config().sql.inout_keyword
    }
}

fn first_match(patterns: &[String], haystack: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| match Regex::new(pattern) {
        Ok(re) if re.is_match(haystack) => Some(pattern.clone()),
        _ => None,
    })
}

/// Parse an embedded `dialect.toml`
pub fn parse_config(name: &str, source: &str) -> Result<DialectConfig, DialectError> {
    toml::from_str(source).map_err(|e| DialectError::ConfigError(format!("{}: {}", name, e)))
}

/// Error types for dialect operations
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    #[error("Dialect not found: {0}")]
    NotFound(String),

    #[error("Multiple dialects detected: {0:?}")]
    Ambiguous(Vec<String>),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
