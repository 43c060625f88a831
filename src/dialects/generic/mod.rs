use crate::dialects::base::{DatabaseDialect, DetectionResult, DialectConfig, parse_config};
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

/// ANSI SQL fallback used when nothing else matches.
pub struct GenericDialect {
    config: &'static DialectConfig,
}

impl GenericDialect {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            parse_config("generic", include_str!("dialect.toml"))
                .expect("Failed to parse Generic dialect config")
        });

        Self { config }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for GenericDialect {
    fn config(&self) -> &DialectConfig {
        self.config
    }

    fn detect(&self, _connection_string: &str) -> Option<DetectionResult> {
        // Always matches with very low confidence as fallback
        Some(DetectionResult {
            dialect_name: self.name().to_string(),
            confidence: 0.1,
            matched_pattern: "fallback".to_string(),
        })
    }
}
