use crate::dialects::base::{DatabaseDialect, DialectConfig, parse_config};
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

pub struct PostgresDialect {
    config: &'static DialectConfig,
}

impl PostgresDialect {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            parse_config("postgres", include_str!("dialect.toml"))
                .expect("Failed to parse PostgreSQL dialect config")
        });

        Self { config }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for PostgresDialect {
    fn config(&self) -> &DialectConfig {
        self.config
    }
}
