mod error;
mod paths;

use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};
use tabula_lib::dom::MemoryHost;
use tabula_lib::model::SortSpec;
use tabula_lib::model::TableDefinition;
use tabula_lib::persist::SqliteBackend;
use tabula_lib::{EngineConfig, Table, TableServices};

use crate::error::CliError;
use crate::paths::CliPaths;
use crate::paths::KEEP_LOGS;

/// Sort a table definition and print its markup in final order.
#[derive(Debug, Parser)]
#[command(name = "tabula", version)]
struct Args {
    /// Table definition (JSON)
    definition: PathBuf,

    /// Sort keys as signed tokens, e.g. `+name,-age`
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    sort: Vec<String>,

    /// Clear the persisted sort and restore insertion order
    #[arg(long, conflicts_with = "sort")]
    reset: bool,

    /// Sort in-process instead of on the worker thread
    #[arg(long)]
    no_worker: bool,

    /// Settings database [default: platform data directory]
    #[arg(long)]
    db: Option<PathBuf>,
}

/// Logging is best effort; the command works without it.
fn init_logging(paths: Option<&CliPaths>) {
    let Some(paths) = paths else { return };
    let path = paths.log_file();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let _ = paths.rotate_logs(KEEP_LOGS);
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
    }
}

async fn run(args: Args, paths: Option<CliPaths>) -> Result<(), CliError> {
    let source = fs::read_to_string(&args.definition).map_err(|source| CliError::Read {
        path: args.definition.clone(),
        source,
    })?;
    let definition = TableDefinition::from_json(&source)?;

    let mut services = TableServices::new(EngineConfig::default().with_worker(!args.no_worker));
    if let Some(db) = args.db.or_else(|| paths.map(|p| p.settings_db())) {
        services = services.with_settings(SqliteBackend::open(&db).await?);
    } else {
        log::warn!("No settings location, sorts will not be remembered");
    }

    let table = Table::new(definition, MemoryHost::new(), services)?;
    table.mount().await?;

    if args.reset {
        table.reset_sort().await?;
    } else if !args.sort.is_empty() {
        table.set_sort_spec(SortSpec::from_tokens(&args.sort)).await?;
    }

    if let Some(spec) = table.sort_spec()? {
        log::info!("Table {} sorted by {}", table.id(), spec);
    }
    println!("{}", table.render()?.html);
    table.unmount()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let paths = CliPaths::discover();
    init_logging(paths.as_ref());

    match run(args, paths).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
