//! OneTable CLI
//!
//! One-shot commands against a table directory.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use onetable::log::Recovery;
use onetable::{Config, Engine, IndexKind, OneTableError, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// OneTable CLI
#[derive(Parser, Debug)]
#[command(name = "onetable-cli")]
#[command(about = "CLI for the OneTable key-value store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./onetable_data")]
    data_dir: PathBuf,

    /// Index implementation: hash or tree
    #[arg(short, long, default_value = "hash", value_parser = parse_index_kind)]
    index: IndexKind,

    /// fsync after every write
    #[arg(long)]
    sync_every_write: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Table(TableCommand),

    /// Check that the logs replay cleanly without opening for writes
    Verify,
}

/// Commands that run against an open engine
#[derive(Subcommand, Debug)]
enum TableCommand {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Insert or overwrite a key
    Insert {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Delete {
        /// The key to delete
        key: String,
    },

    /// List keys and values in an inclusive range
    Between {
        /// First key of the range
        from: String,

        /// Last key of the range
        to: String,
    },

    /// Print table statistics as JSON
    Status,
}

fn parse_index_kind(s: &str) -> Result<IndexKind, String> {
    s.parse().map_err(|e: OneTableError| e.to_string())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,onetable=debug"));

    fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> onetable::Result<()> {
    match args.command {
        // Verification must not create or touch the logs.
        Commands::Verify => verify(&args.data_dir),
        Commands::Table(command) => {
            let sync_strategy = if args.sync_every_write {
                SyncStrategy::EveryWrite
            } else {
                Config::default().sync_strategy
            };

            let config = Config::builder().data_dir(&args.data_dir).sync_strategy(sync_strategy).build();

            tracing::debug!("Opening {} with {} index", args.data_dir.display(), args.index);
            let engine = Engine::open(config, args.index.build())?;

            execute(&engine, command)?;
            engine.close()
        }
    }
}

fn execute(engine: &Engine, command: TableCommand) -> onetable::Result<()> {
    match command {
        TableCommand::Get { key } => match engine.get(&key)? {
            Some(value) => println!("{}", String::from_utf8_lossy(&value)),
            None => println!("Key '{}' not found", key),
        },
        TableCommand::Insert { key, value } => {
            engine.insert(&key, value.as_bytes())?;
            println!("Inserted {}", key);
        }
        TableCommand::Delete { key } => {
            engine.delete(&key)?;
            println!("Deleted {}", key);
        }
        TableCommand::Between { from, to } => {
            for (key, value) in engine.scan(&from, &to)? {
                println!("{}: {}", key, String::from_utf8_lossy(&value));
            }
        }
        TableCommand::Status => {
            let status = engine.status()?;
            let json = serde_json::to_string_pretty(&status)
                .map_err(|e| OneTableError::Serialization(e.to_string()))?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn verify(data_dir: &Path) -> onetable::Result<()> {
    let result = Recovery::verify(data_dir)?;
    println!(
        "ok: {} records ({} inserts, {} tombstones), {} orphaned bytes",
        result.records_replayed,
        result.inserts,
        result.tombstones,
        result.orphaned_tail()
    );
    Ok(())
}
