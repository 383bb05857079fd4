//! OneTable REPL
//!
//! Interactive console over a single table.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use onetable::{Config, Engine, IndexKind, OneTableError};
use tracing_subscriber::{fmt, EnvFilter};

/// OneTable REPL
#[derive(Parser, Debug)]
#[command(name = "onetable-repl")]
#[command(about = "Interactive console for the OneTable key-value store")]
#[command(version)]
struct Args {
    /// Path to the folder where data is/will be stored
    #[arg(short, long)]
    folder: PathBuf,

    /// Index implementation: hash or tree
    #[arg(short, long, default_value = "hash", value_parser = parse_index_kind)]
    index: IndexKind,
}

fn parse_index_kind(s: &str) -> Result<IndexKind, String> {
    s.parse().map_err(|e: OneTableError| e.to_string())
}

const HELP: &str = "Available commands:
  get <key>
  insert <key> <value>
  delete <key>
  between <from> <to>
  status
  help
  exit";

fn main() {
    // Quiet by default so log lines do not interleave with the console.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();

    let config = Config::builder().data_dir(&args.folder).build();
    let engine = match Engine::open(config, args.index.build()) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Failed to open {}: {}", args.folder.display(), e);
            process::exit(1);
        }
    };

    println!("---Starting OneTable console ({} index)---\n", args.index);
    println!("{}\n", HELP);

    if let Err(e) = run(&engine) {
        tracing::error!("Console error: {}", e);
        process::exit(1);
    }

    if let Err(e) = engine.close() {
        tracing::error!("Failed to close table: {}", e);
        process::exit(1);
    }
}

/// Read commands until EOF or `exit`
fn run(engine: &Engine) -> onetable::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [] => {}
            ["exit"] | ["quit"] => break,
            ["help"] => println!("{}", HELP),
            ["status"] => print_status(engine)?,
            ["get", key] => match engine.get(key)? {
                Some(value) => println!(">{}: {}", key, String::from_utf8_lossy(&value)),
                None => println!(">Key '{}' not found", key),
            },
            ["insert", key, value] => match engine.insert(key, value.as_bytes()) {
                Ok(()) => println!(">Inserted {}: {}", key, value),
                Err(e @ OneTableError::InvalidKey(_)) => println!("ERROR: {}", e),
                Err(e) => return Err(e),
            },
            ["insert", ..] => println!("Invalid insert instruction. Expected space separated key and value"),
            ["delete", key] => {
                engine.delete(key)?;
                println!(">Deleted key: {}", key);
            }
            ["between", from, to] => {
                for (key, value) in engine.scan(from, to)? {
                    println!(">{}: {}", key, String::from_utf8_lossy(&value));
                }
            }
            _ => println!("Invalid instruction"),
        }

        stdout.flush()?;
    }

    Ok(())
}

fn print_status(engine: &Engine) -> onetable::Result<()> {
    let status = engine.status()?;
    let json = serde_json::to_string(&status).map_err(|e| OneTableError::Serialization(e.to_string()))?;
    println!(">{}", json);
    Ok(())
}
