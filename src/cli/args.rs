use crate::ddl::ParamDirection;
use clap::{Args, Parser, Subcommand};

/// CLI entry point for viewddl
#[derive(Parser, Debug)]
#[command(
    name = "viewddl",
    version,
    about = "Capability-aware DDL for views, materialized views and functions"
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Environment (loads config/{env}.toml)
    #[arg(long, global = true)]
    pub env: Option<String>,

    /// ODBC connection string
    #[arg(long, global = true)]
    pub conn: Option<String>,

    /// Dialect name or alias (detected from --conn when omitted)
    #[arg(long, global = true)]
    pub dialect: Option<String>,

    /// Print statements instead of executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a view
    CreateView(CreateViewArgs),

    /// Create a materialized view
    CreateMaterializedView(CreateViewArgs),

    /// Drop a view
    DropView(DropViewArgs),

    /// Drop a materialized view
    DropMaterializedView(DropViewArgs),

    /// Create a view that renames the columns of an existing table
    CreateMappingView {
        /// Source table
        #[arg(long)]
        old: String,

        /// Name of the view to create
        #[arg(long)]
        new: String,

        /// Column mapping as OLD=NEW (repeatable, in output order)
        #[arg(long = "map", value_parser = parse_mapping, required = true)]
        mappings: Vec<(String, String)>,

        /// Drop an existing view first, ignoring failures
        #[arg(long)]
        force: bool,
    },

    /// Create or replace a stored function
    CreateFunction {
        #[arg(long)]
        name: String,

        /// Function body placed after IS/AS
        #[arg(long)]
        body: String,

        /// Return type
        #[arg(long)]
        returns: Option<String>,

        /// Parameter as DIR:NAME:TYPE, e.g. IN:p_id:NUMBER (repeatable)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<ParamSpec>,
    },

    /// Drop a table together with its constraints
    DropTableCascade {
        #[arg(long)]
        table: String,
    },

    /// List known dialects and their capabilities
    Dialects,

    /// Generate configuration file
    Config {
        /// Output path for config file
        #[arg(long, default_value = "config.toml")]
        output: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CreateViewArgs {
    #[arg(long)]
    pub name: String,

    /// Backing SELECT query
    #[arg(long)]
    pub select: String,

    /// Explicit output column (repeatable)
    #[arg(long = "column")]
    pub columns: Vec<String>,

    /// Drop an existing object first, ignoring failures
    #[arg(long)]
    pub force: bool,

    /// e.g. CASCADED or LOCAL
    #[arg(long)]
    pub check_option: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DropViewArgs {
    #[arg(long)]
    pub name: String,

    /// e.g. CASCADE or RESTRICT
    #[arg(long)]
    pub drop_behavior: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub direction: ParamDirection,
    pub name: String,
    pub data_type: String,
}

fn parse_mapping(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((old, new)) if !old.trim().is_empty() && !new.trim().is_empty() => {
            Ok((old.trim().to_string(), new.trim().to_string()))
        }
        _ => Err(format!("expected OLD=NEW, got '{}'", s)),
    }
}

fn parse_param(s: &str) -> Result<ParamSpec, String> {
    let mut parts = s.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(direction), Some(name), Some(data_type))
            if !name.is_empty() && !data_type.is_empty() =>
        {
            Ok(ParamSpec {
                direction: direction.parse()?,
                name: name.to_string(),
                data_type: data_type.to_string(),
            })
        }
        _ => Err(format!("expected DIR:NAME:TYPE, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_help() {
        let result = Cli::try_parse_from(["viewddl", "--help"]);
        assert!(result.is_err()); // Help exits with error
    }

    #[test]
    fn test_create_view_command() {
        let cli = Cli::try_parse_from([
            "viewddl",
            "create-view",
            "--name",
            "active_users",
            "--select",
            "SELECT id, name FROM users",
            "--column",
            "user_id",
            "--column",
            "user_name",
            "--force",
            "--check-option",
            "LOCAL",
        ])
        .unwrap();

        match cli.command {
            Commands::CreateView(args) => {
                assert_eq!(args.name, "active_users");
                assert_eq!(args.select, "SELECT id, name FROM users");
                assert_eq!(args.columns, vec!["user_id", "user_name"]);
                assert!(args.force);
                assert_eq!(args.check_option.as_deref(), Some("LOCAL"));
            }
            _ => panic!("Expected CreateView command"),
        }
    }

    #[test]
    fn test_drop_materialized_view_command() {
        let cli = Cli::try_parse_from([
            "viewddl",
            "drop-materialized-view",
            "--name",
            "sales_mv",
            "--drop-behavior",
            "CASCADE",
        ])
        .unwrap();

        match cli.command {
            Commands::DropMaterializedView(args) => {
                assert_eq!(args.name, "sales_mv");
                assert_eq!(args.drop_behavior.as_deref(), Some("CASCADE"));
            }
            _ => panic!("Expected DropMaterializedView command"),
        }
    }

    #[test]
    fn test_mapping_view_command() {
        let cli = Cli::try_parse_from([
            "viewddl",
            "create-mapping-view",
            "--old",
            "TBL_USR",
            "--new",
            "users",
            "--map",
            "USR_ID=id",
            "--map",
            "USR_NM=name",
        ])
        .unwrap();

        match cli.command {
            Commands::CreateMappingView { old, new, mappings, force } => {
                assert_eq!(old, "TBL_USR");
                assert_eq!(new, "users");
                assert_eq!(
                    mappings,
                    vec![
                        ("USR_ID".to_string(), "id".to_string()),
                        ("USR_NM".to_string(), "name".to_string())
                    ]
                );
                assert!(!force);
            }
            _ => panic!("Expected CreateMappingView command"),
        }
    }

    #[test]
    fn test_mapping_view_requires_a_mapping() {
        let result =
            Cli::try_parse_from(["viewddl", "create-mapping-view", "--old", "a", "--new", "b"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "viewddl",
            "create-mapping-view",
            "--old",
            "a",
            "--new",
            "b",
            "--map",
            "no_equals_sign",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_function_command() {
        let cli = Cli::try_parse_from([
            "viewddl",
            "create-function",
            "--name",
            "total_for",
            "--body",
            "BEGIN RETURN 1; END;",
            "--returns",
            "NUMBER",
            "--param",
            "in:p_id:NUMBER",
            "--param",
            "IN OUT:p_ts:TIMESTAMP(6)",
        ])
        .unwrap();

        match cli.command {
            Commands::CreateFunction { name, body, returns, params } => {
                assert_eq!(name, "total_for");
                assert_eq!(body, "BEGIN RETURN 1; END;");
                assert_eq!(returns.as_deref(), Some("NUMBER"));
                assert_eq!(params.len(), 2);
                assert_eq!(params[0].direction, ParamDirection::In);
                assert_eq!(params[1].direction, ParamDirection::InOut);
                assert_eq!(params[1].data_type, "TIMESTAMP(6)");
            }
            _ => panic!("Expected CreateFunction command"),
        }
    }

    #[test]
    fn test_invalid_param_direction() {
        let result = Cli::try_parse_from([
            "viewddl",
            "create-function",
            "--name",
            "f",
            "--body",
            "x",
            "--param",
            "UP:p:NUMBER",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "viewddl",
            "drop-table-cascade",
            "--table",
            "orders",
            "--dialect",
            "oracle",
            "--dry-run",
            "--env",
            "staging",
        ])
        .unwrap();

        assert_eq!(cli.dialect.as_deref(), Some("oracle"));
        assert_eq!(cli.env.as_deref(), Some("staging"));
        assert!(cli.dry_run);
        assert!(matches!(cli.command, Commands::DropTableCascade { .. }));
    }

    #[test]
    fn test_config_command_defaults() {
        let cli = Cli::try_parse_from(["viewddl", "config"]).unwrap();
        match cli.command {
            Commands::Config { output } => assert_eq!(output, "config.toml"),
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_missing_required_subcommand() {
        assert!(Cli::try_parse_from(["viewddl"]).is_err());
        assert!(Cli::try_parse_from(["viewddl", "invalid-command"]).is_err());
    }
}
