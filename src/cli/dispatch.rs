use crate::cli::args::{Cli, Commands, CreateViewArgs, DropViewArgs};
use crate::ddl::{
    Capabilities, DdlError, DdlOutcome, DdlSynthesizer, FunctionOptions, VirtualTableKind,
    VirtualTableOptions,
};
use crate::dialects::{self, DatabaseDialect, DialectError};
use crate::executor::{
    ConnectionError, ConnectionManager, DatabaseExecutor, DryRunExecutor, SchemaConnection,
};
use crate::logger;
use crate::model::{ColumnDescriptor, Config, ConfigError};
use log::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Ddl(#[from] DdlError),

    #[error("No connection string provided via --conn flag or config file")]
    MissingConnection,
}

pub fn handle(cli: Cli) {
    // Config is needed for the log level, so failures here go to stderr
    let config = match Config::load(cli.config.as_deref(), cli.env.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    logger::setup_logger(cli.verbose, config.logging.level());
    debug!("Loaded configuration: {:?}", config);

    if let Err(e) = run(cli, config) {
        error!("{}", e);
        std::process::exit(1);
    }
}

pub fn run(cli: Cli, config: Config) -> Result<(), DispatchError> {
    match &cli.command {
        Commands::Config { output } => {
            info!("Running CONFIG command");
            Config::generate_default_config(output)?;
            info!("Generated default configuration file: {}", output);
            return Ok(());
        }
        Commands::Dialects => {
            list_dialects();
            return Ok(());
        }
        _ => {}
    }

    let conn = cli.conn.or(config.database.connection_string.clone());
    let dialect = dialects::get_dialect_with_config(
        cli.dialect.as_deref(),
        conn.as_deref(),
        config.dialect.name.as_deref(),
    )?;
    let capabilities = config.dialect.apply(dialect.capabilities());
    let dry_run = cli.dry_run || config.behavior.default_dry_run();

    info!("Using database dialect: {}", dialect.name());
    debug!("Capabilities: {:?}", capabilities);
    debug!("Dry run mode: {}", dry_run);

    if dry_run {
        let mut executor = dry_run_executor(&cli.command);
        let outcome = run_command(&cli.command, dialect.as_ref(), capabilities, &mut executor)?;
        for statement in executor.statements() {
            println!("{};", statement);
        }
        report(&outcome);
        return Ok(());
    }

    let conn = conn.ok_or(DispatchError::MissingConnection)?;
    let connection_manager = ConnectionManager::new()?;
    let connection = connection_manager.connect(&conn)?;
    let mut executor = DatabaseExecutor::new(connection, dialect.clone());

    let outcome = run_command(&cli.command, dialect.as_ref(), capabilities, &mut executor)?;
    report(&outcome);
    Ok(())
}

/// Run one DDL command against any connection.
fn run_command(
    command: &Commands,
    dialect: &dyn DatabaseDialect,
    capabilities: Capabilities,
    connection: &mut dyn SchemaConnection,
) -> Result<DdlOutcome, DdlError> {
    let mut ddl = DdlSynthesizer::new(dialect, connection).with_capabilities(capabilities);

    match command {
        Commands::CreateView(args) => create_virtual(&mut ddl, VirtualTableKind::View, args),
        Commands::CreateMaterializedView(args) => {
            create_virtual(&mut ddl, VirtualTableKind::MaterializedView, args)
        }
        Commands::DropView(args) => drop_virtual(&mut ddl, VirtualTableKind::View, args),
        Commands::DropMaterializedView(args) => {
            drop_virtual(&mut ddl, VirtualTableKind::MaterializedView, args)
        }
        Commands::CreateMappingView {
            old,
            new,
            mappings,
            force,
        } => {
            let options = VirtualTableOptions {
                force: *force,
                ..VirtualTableOptions::default()
            };
            ddl.create_mapping_view(old, new, &options, |mapper| {
                for (old_column, new_column) in mappings {
                    mapper.map(old_column, new_column)?;
                }
                Ok(())
            })
        }
        Commands::CreateFunction {
            name,
            body,
            returns,
            params,
        } => {
            let options = FunctionOptions {
                return_type: returns.clone(),
            };
            ddl.create_function_with(name, body, &options, |definition| {
                for p in params {
                    definition.param(p.direction, p.name.as_str(), p.data_type.as_str());
                }
            })
        }
        Commands::DropTableCascade { table } => ddl.drop_table_cascade(table),
        Commands::Dialects | Commands::Config { .. } => {
            unreachable!("handled before a connection is opened")
        }
    }
}

fn create_virtual(
    ddl: &mut DdlSynthesizer<'_, dyn SchemaConnection + '_>,
    kind: VirtualTableKind,
    args: &CreateViewArgs,
) -> Result<DdlOutcome, DdlError> {
    let options = VirtualTableOptions {
        force: args.force,
        check_option: args.check_option.clone(),
        drop_behavior: None,
    };
    ddl.create_virtual_table(&args.name, &args.select, kind, &options, |view| {
        for column in &args.columns {
            view.column(column.as_str());
        }
    })
}

fn drop_virtual(
    ddl: &mut DdlSynthesizer<'_, dyn SchemaConnection + '_>,
    kind: VirtualTableKind,
    args: &DropViewArgs,
) -> Result<DdlOutcome, DdlError> {
    let options = VirtualTableOptions {
        drop_behavior: args.drop_behavior.clone(),
        ..VirtualTableOptions::default()
    };
    ddl.drop_virtual_table(&args.name, kind, &options)
}

/// Without a database the mapping sources cannot be introspected, so they are
/// taken on trust.
fn dry_run_executor(command: &Commands) -> DryRunExecutor {
    match command {
        Commands::CreateMappingView { old, mappings, .. } => {
            warn!("Dry run: columns of {} are not checked against the database", old);
            let columns = mappings
                .iter()
                .map(|(old_column, _)| ColumnDescriptor::new(old_column.as_str(), ""))
                .collect();
            DryRunExecutor::new().with_table(old, columns)
        }
        _ => DryRunExecutor::new(),
    }
}

fn report(outcome: &DdlOutcome) {
    match outcome {
        DdlOutcome::Executed { .. } => info!("🎉 Done"),
        DdlOutcome::Skipped { feature } => info!("Nothing to do: {} not supported", feature),
    }
}

fn list_dialects() {
    for name in dialects::list_dialects() {
        if let Some(dialect) = dialects::get_dialect(&name) {
            let caps = dialect.capabilities();
            let mut aliases = dialect.aliases().to_vec();
            aliases.sort();
            println!(
                "{:<10} views={} materialized_views={} functions={} view_columns={}  aliases: {}",
                name,
                caps.views,
                caps.materialized_views,
                caps.functions,
                caps.view_columns_definition,
                aliases.join(", ")
            );
        }
    }
}
