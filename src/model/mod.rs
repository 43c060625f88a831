pub mod column;
pub mod config;

pub use column::ColumnDescriptor;
pub use config::{Config, ConfigError};
