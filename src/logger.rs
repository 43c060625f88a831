use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::env;
use std::io::Write;

/// Resolve the configured level name; `verbose` always means debug.
pub fn resolve_level(verbose: bool, configured: &str) -> LevelFilter {
    if verbose {
        return LevelFilter::Debug;
    }
    configured.parse().unwrap_or(LevelFilter::Info)
}

pub fn setup_logger(verbose: bool, configured_level: &str) {
    let mut builder = Builder::new();
    builder.filter(None, resolve_level(verbose, configured_level));
    builder.target(Target::Stdout);

    builder.format(|buf, record| {
        let emoji = match record.level() {
            Level::Error => "❌ ",
            Level::Warn => "⚠️  ",
            Level::Info => "",
            Level::Debug => "",
            Level::Trace => "",
        };
        writeln!(buf, "{}{}", emoji, record.args())
    });

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    }

    // A second initialisation (tests, embedding) is not an error
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level(true, "error"), LevelFilter::Debug);
        assert_eq!(resolve_level(false, "warn"), LevelFilter::Warn);
        assert_eq!(resolve_level(false, "TRACE"), LevelFilter::Trace);
        assert_eq!(resolve_level(false, "chatty"), LevelFilter::Info);
    }
}
