use crate::dialects::base::{DatabaseDialect, DialectConfig, parse_config};
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

pub struct MysqlDialect {
    config: &'static DialectConfig,
}

impl MysqlDialect {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            parse_config("mysql", include_str!("dialect.toml"))
                .expect("Failed to parse MySQL dialect config")
        });

        Self { config }
    }
}

impl Default for MysqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for MysqlDialect {
    fn config(&self) -> &DialectConfig {
        self.config
    }
}
