use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mmap_slots::{Record, Slot, SlotStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// mmap-slots - sparse fixed-slot records in a pre-allocated, memory-mapped file.
#[derive(Parser)]
#[command(name = "mmap-slots")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML config file (capacity, sync_on_write)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured capacity in bytes (must be a multiple of 20)
    #[arg(long, global = true)]
    capacity: Option<u64>,

    /// Flush the mapping before releasing it after writes
    #[arg(long, global = true)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or truncate) the backing file at full capacity
    Allocate {
        /// Backing file
        file: PathBuf,
    },

    /// Write records given as INDEX=TEXT
    Write {
        /// Backing file
        file: PathBuf,

        /// Records to write, in order (last write to a slot wins)
        #[arg(required = true)]
        records: Vec<Record>,
    },

    /// Print slots 0..count
    Read {
        /// Backing file
        file: PathBuf,

        /// Number of slots (defaults to every slot a u8 index can reach)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Show slot occupancy
    Stats {
        /// Backing file
        file: PathBuf,
    },

    /// Allocate, write a sample record set and print it back
    Demo {
        /// Backing file
        #[arg(default_value = "large_file.dat")]
        file: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default = if verbose > 0 { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }
    if cli.sync {
        config.sync_on_write = true;
    }
    Ok(config)
}

fn print_slots(slots: &[Slot]) {
    for slot in slots {
        println!("{slot}");
    }
}

fn demo_records() -> anyhow::Result<Vec<Record>> {
    [
        (0, "1 record data"),
        (2, "3 record data"),
        (5, "6 record data"),
        (7, "8 record data"),
        (10, "11 record data"),
        (50, "51 record data"),
    ]
    .into_iter()
    .map(|(i, text)| Record::new(i, text).map_err(Into::into))
    .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;

    match &cli.command {
        Commands::Allocate { file } => {
            let store = SlotStore::open(file, config)?;
            store.allocate()?;
        }
        Commands::Write { file, records } => {
            let store = SlotStore::open(file, config)?;
            let report = store.write(records)?;
            info!(
                "wrote {} records, skipped {}",
                report.written.len(),
                report.skipped.len()
            );
        }
        Commands::Read { file, count } => {
            let store = SlotStore::open(file, config)?;
            let count = match count {
                Some(n) => *n,
                None => store.stats()?.addressable_slots as usize,
            };
            print_slots(&store.read(count)?);
        }
        Commands::Stats { file } => {
            let store = SlotStore::open(file, config)?;
            print!("{}", store.stats()?);
        }
        Commands::Demo { file } => {
            let store = SlotStore::open(file, config)?;
            store.allocate()?;

            let records = demo_records()?;
            store.write(&records)?;

            let count = records.last().map(|r| r.index as usize + 1).unwrap_or(0);
            print_slots(&store.read(count)?);
        }
    }

    Ok(())
}
