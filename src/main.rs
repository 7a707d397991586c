//! Binary entry point for petlog.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use petlog::{
    codec::{export::save_export, snapshot},
    config::PetlogConfig,
    persist::{RecordFilter, RecordStore, sqlite::SqliteStore},
    pipeline::{
        complete::{DeclineAll, PromptCompleter, RecordCompleter},
        ingest::ingest_file,
    },
    record::Record,
    types::{Classification, DietType},
};

/// petlog - animal record ingestion and final-state snapshots.
#[derive(Parser)]
#[command(name = "petlog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// SQLite database file.
    #[arg(long, global = true, env = "PETLOG_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load records from a properties-style source.
    Ingest {
        /// Source file.
        #[arg(short, long, env = "PETLOG_SOURCE")]
        source: Option<PathBuf>,

        /// Key prefix marking record entries.
        #[arg(long, env = "PETLOG_KEY_PREFIX")]
        key_prefix: Option<String>,

        /// Ask on the terminal for missing fields instead of dropping partial records.
        #[arg(short, long)]
        interactive: bool,
    },

    /// List stored records.
    List {
        /// Only this classification.
        #[arg(long)]
        classification: Option<String>,

        /// Only this family.
        #[arg(long)]
        family: Option<String>,

        /// Only this diet type.
        #[arg(long)]
        diet: Option<String>,
    },

    /// Show one record.
    Show {
        /// Record id.
        id: String,
    },

    /// Delete one record.
    Delete {
        /// Record id.
        id: String,
    },

    /// Write the diet-less export file.
    Export {
        /// Target file.
        #[arg(short, long, env = "PETLOG_EXPORT")]
        output: Option<PathBuf>,
    },

    /// Write the final-state snapshot file.
    Snapshot {
        /// Target file.
        #[arg(short, long, env = "PETLOG_SNAPSHOT")]
        output: Option<PathBuf>,
    },

    /// Decode and print a snapshot file.
    Inspect {
        /// Snapshot file.
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = PetlogConfig::default();
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    match cli.command {
        Commands::Ingest {
            source,
            key_prefix,
            interactive,
        } => {
            if let Some(source) = source {
                config.source_path = source;
            }
            if let Some(prefix) = key_prefix {
                config.key_prefix = prefix;
            }
            let parser = config.parser();
            let mut store = open_store(&config)?;
            let mut completer: Box<dyn RecordCompleter> = if interactive {
                Box::new(PromptCompleter::new(io::stdin().lock(), io::stdout()))
            } else {
                Box::new(DeclineAll)
            };
            let report = ingest_file(&config.source_path, &parser, &mut store, completer.as_mut())
                .with_context(|| format!("ingesting {}", config.source_path.display()))?;
            println!("{}", report.summary());
        }
        Commands::List {
            classification,
            family,
            diet,
        } => {
            let store = open_store(&config)?;
            let filter = RecordFilter {
                id: None,
                classification: classification.as_deref().map(parse_classification).transpose()?,
                family,
                diet_type: diet.as_deref().map(parse_diet).transpose()?,
            };
            let records = store.find(&filter)?;
            println!("{} records", records.len());
            records.iter().for_each(print_record);
        }
        Commands::Show { id } => match open_store(&config)?.get(&id)? {
            Some(rec) => print_record(&rec),
            None => bail!("no record with id {id}"),
        },
        Commands::Delete { id } => {
            let mut store = open_store(&config)?;
            store.delete(&id)?;
            println!("deleted {id}");
        }
        Commands::Export { output } => {
            let store = open_store(&config)?;
            let path = output.unwrap_or(config.export_path);
            let n = save_export(&path, &store)
                .with_context(|| format!("writing export {}", path.display()))?;
            println!("exported {n} records to {}", path.display());
        }
        Commands::Snapshot { output } => {
            let store = open_store(&config)?;
            let path = output.unwrap_or(config.snapshot_path);
            let n = snapshot::save_snapshot(&path, &store)
                .with_context(|| format!("writing snapshot {}", path.display()))?;
            println!("saved {n} records to {}", path.display());
        }
        Commands::Inspect { path } => {
            let path = path.unwrap_or(config.snapshot_path);
            let records = snapshot::load_snapshot(&path)
                .with_context(|| format!("reading snapshot {}", path.display()))?;
            println!("{} records", records.len());
            records.iter().for_each(print_record);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Opens the database connection and hands it to the store.
fn open_store(config: &PetlogConfig) -> Result<SqliteStore> {
    let path = &config.database_path;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let conn = rusqlite::Connection::open(path)
        .with_context(|| format!("opening database {}", path.display()))?;
    SqliteStore::new(conn).context("initializing store")
}

fn parse_classification(text: &str) -> Result<Classification> {
    Classification::from_token(text).with_context(|| format!("unknown classification {text}"))
}

fn parse_diet(text: &str) -> Result<DietType> {
    DietType::from_token(text).with_context(|| format!("unknown diet type {text}"))
}

fn print_record(rec: &Record) {
    println!(
        "{:<10} {:<12} {:<13} {:<14} {:<12} {:<14} {:<12} {:>4} {:>8.2}  {}",
        rec.id,
        rec.nickname,
        rec.classification.map_or("-", Classification::as_str),
        rec.family,
        rec.genus,
        rec.species,
        rec.diet_type.map_or("-", DietType::as_str),
        rec.age,
        rec.weight,
        rec.notes.as_deref().unwrap_or(""),
    );
}
