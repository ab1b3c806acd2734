use clap::{Parser, Subcommand};
use ironlog_core::*;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(about = "Load fitness tracking sample data into a document store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Load the sample data files and insert them as documents
    #[arg(long)]
    demo: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding users.json, weighins.json and workouts.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Document store backend (mongo, jsonl)
    #[arg(long, global = true)]
    store: Option<String>,

    /// Root directory for the jsonl backend
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// MongoDB connection string
    #[arg(long, global = true)]
    uri: Option<String>,

    /// Target database name
    #[arg(long, global = true)]
    database: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one document from a collection
    Peek {
        /// Collection to read from
        #[arg(default_value = "weigh_ins")]
        collection: String,
    },
}

// Any fatal error surfaces as Err from main: diagnostic on stderr, exit 1
fn main() -> Result<()> {
    // Initialize logging
    ironlog_core::logging::init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?.with_env_overrides(),
        None => Config::load()?,
    };
    apply_overrides(&mut config, &cli)?;

    match cli.command {
        Some(Commands::Peek { collection }) => cmd_peek(&config, &collection),
        None => {
            println!("Hello, world!");
            if cli.demo {
                cmd_demo(&config)?;
            }
            Ok(())
        }
    }
}

/// Accept the single-dash `-demo` spelling as `--demo`
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-demo" {
                OsString::from("--demo")
            } else {
                arg
            }
        })
        .collect()
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(dir) = &cli.data_dir {
        config.data.data_dir = dir.clone();
    }
    if let Some(backend) = &cli.store {
        config.store.backend = backend.parse()?;
    }
    if let Some(dir) = &cli.store_dir {
        config.store.jsonl_dir = dir.clone();
    }
    if let Some(uri) = &cli.uri {
        config.store.uri = uri.clone();
    }
    if let Some(database) = &cli.database {
        config.store.database = database.clone();
    }
    Ok(())
}

fn cmd_demo(config: &Config) -> Result<()> {
    let data_dir = &config.data.data_dir;
    let database = &config.store.database;
    let mut stdout = io::stdout().lock();

    let summary = match config.store.backend {
        StoreBackend::Mongo => {
            let connector = MongoConnector::new(&config.store.uri);
            run_demo(&connector, data_dir, database, &mut stdout)?
        }
        StoreBackend::Jsonl => {
            let connector = JsonlConnector::new(&config.store.jsonl_dir);
            run_demo(&connector, data_dir, database, &mut stdout)?
        }
    };

    tracing::info!(
        "Inserted {} users, {} weigh-ins, {} workouts",
        summary.users.len(),
        summary.weigh_ins.len(),
        summary.workouts.len()
    );
    Ok(())
}

fn cmd_peek(config: &Config, collection: &str) -> Result<()> {
    let database = &config.store.database;
    let mut stdout = io::stdout().lock();

    match config.store.backend {
        StoreBackend::Mongo => {
            let connector = MongoConnector::new(&config.store.uri);
            peek(&connector, database, collection, &mut stdout)?;
        }
        StoreBackend::Jsonl => {
            let connector = JsonlConnector::new(&config.store.jsonl_dir);
            peek(&connector, database, collection, &mut stdout)?;
        }
    }

    Ok(())
}
