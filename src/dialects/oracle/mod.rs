use crate::dialects::base::{DatabaseDialect, DialectConfig, parse_config};
use std::sync::OnceLock;

static CONFIG: OnceLock<DialectConfig> = OnceLock::new();

pub struct OracleDialect {
    config: &'static DialectConfig,
}

impl OracleDialect {
    pub fn new() -> Self {
        let config = CONFIG.get_or_init(|| {
            parse_config("oracle", include_str!("dialect.toml"))
                .expect("Failed to parse Oracle dialect config")
        });

        Self { config }
    }
}

impl Default for OracleDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for OracleDialect {
    fn config(&self) -> &DialectConfig {
        self.config
    }
}
