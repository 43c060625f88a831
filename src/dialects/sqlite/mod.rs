use crate::dialects::base::{DatabaseDialect, DialectConfig, parse_config};
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

pub struct SqliteDialect {
    config: &'static DialectConfig,
}

impl SqliteDialect {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            parse_config("sqlite", include_str!("dialect.toml"))
                .expect("Failed to parse SQLite dialect config")
        });

        Self { config }
    }
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for SqliteDialect {
    fn config(&self) -> &DialectConfig {
        self.config
    }
}
