//! `scheduler` CLI: load event drafts from JSON, then list, search, or check them.
//!
//! ## Usage
//!
//! ```sh
//! # List events ascending by start time (quick sort by default)
//! scheduler list -i events.json
//!
//! # List in insertion order from a linked store, as JSON
//! scheduler list -i events.json --store linked --unsorted --json
//!
//! # Find an event by ID with linear search
//! cat events.json | scheduler search --id 3 --algorithm linear
//!
//! # Report drafts rejected as conflicts (non-zero exit if any)
//! scheduler check -i events.json
//!
//! # Override capacity, duration, or first ID
//! scheduler --config scheduler.json list -i events.json
//! ```
//!
//! Input is a JSON array of `{"title", "date", "time", "location"}` objects.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scheduler_core::{
    ArrayEventCollection, Event, EventCollection, EventDraft, LinkedEventCollection,
    ScheduleError, SchedulerConfig, SearchAlgorithm, SortAlgorithm,
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "scheduler",
    version,
    about = "Conflict-checked event scheduling from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (capacity, event duration, first ID)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log collection operations to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load events and print them
    List {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[arg(long, value_enum, default_value_t = Store::Array)]
        store: Store,
        /// Sorting algorithm: insertion, merge, or quick
        #[arg(long, default_value_t = SortAlgorithm::default())]
        sort: SortAlgorithm,
        /// Keep insertion order instead of sorting by start time
        #[arg(long, conflicts_with = "sort")]
        unsorted: bool,
        /// Print a JSON array instead of one line per event
        #[arg(long)]
        json: bool,
    },
    /// Load events and look one up by ID
    Search {
        #[arg(long)]
        id: u64,
        /// Search algorithm: linear or binary
        #[arg(long, default_value_t = SearchAlgorithm::default())]
        algorithm: SearchAlgorithm,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[arg(long, value_enum, default_value_t = Store::Array)]
        store: Store,
        #[arg(long)]
        json: bool,
    },
    /// Report which events would be rejected as conflicts
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[arg(long, value_enum, default_value_t = Store::Array)]
        store: Store,
    },
}

/// Backing representation for the loaded collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Store {
    Array,
    Linked,
}

/// Drafts that were skipped because they overlapped an accepted event.
struct Rejected {
    position: usize,
    error: ScheduleError,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::List {
            input,
            store,
            sort,
            unsorted,
            json,
        } => {
            let (collection, _) = load_events(input.as_deref(), store, &config)?;
            let order = if unsorted { None } else { Some(sort) };
            let events = collection.list_all(order);
            if json {
                let rendered =
                    serde_json::to_string_pretty(&events).context("Failed to serialize events")?;
                println!("{rendered}");
            } else {
                for event in events {
                    println!("{event}");
                }
            }
        }
        Commands::Search {
            id,
            algorithm,
            input,
            store,
            json,
        } => {
            let (collection, _) = load_events(input.as_deref(), store, &config)?;
            let event = collection
                .search_by_id(id, algorithm)
                .with_context(|| format!("Search with {algorithm} failed"))?;
            print_event(event, json)?;
        }
        Commands::Check { input, store } => {
            let (collection, rejected) = load_events(input.as_deref(), store, &config)?;
            println!("Accepted: {}", collection.len());
            println!("Rejected: {}", rejected.len());
            for Rejected { position, error } in &rejected {
                println!("  #{position}: {error}");
            }
            if !rejected.is_empty() {
                anyhow::bail!("{} event(s) rejected as conflicts", rejected.len());
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&str>) -> Result<SchedulerConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            SchedulerConfig::from_json_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path))
        }
        None => Ok(SchedulerConfig::default()),
    }
}

/// Insert every draft in input order, skipping (and recording) conflicts.
///
/// A malformed draft aborts the whole load.
fn load_events(
    path: Option<&str>,
    store: Store,
    config: &SchedulerConfig,
) -> Result<(Box<dyn EventCollection>, Vec<Rejected>)> {
    let raw = read_input(path)?;
    let drafts: Vec<EventDraft> =
        serde_json::from_str(&raw).context("Input must be a JSON array of events")?;

    let mut collection: Box<dyn EventCollection> = match store {
        Store::Array => Box::new(ArrayEventCollection::from_config(config)),
        Store::Linked => Box::new(LinkedEventCollection::from_config(config)),
    };
    let mut rejected = Vec::new();
    let duration = config
        .event_duration()
        .context("Invalid event duration in config")?;

    for (position, draft) in drafts.into_iter().enumerate() {
        let event = draft
            .into_event(duration)
            .with_context(|| format!("Invalid event at position {}", position))?;
        match collection.insert(event, None) {
            Ok(_) => {}
            Err(error @ ScheduleError::Conflict { .. }) => {
                tracing::warn!(position, "skipping event: {error}");
                rejected.push(Rejected { position, error });
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("Failed to insert event at position {}", position));
            }
        }
    }

    tracing::debug!(
        loaded = collection.len(),
        rejected = rejected.len(),
        ?store,
        "events loaded"
    );
    Ok((collection, rejected))
}

fn print_event(event: &Event, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(event).context("Failed to serialize event")?;
        println!("{rendered}");
    } else {
        println!("{event}");
    }
    Ok(())
}

/// Read the event array from `path`, or from stdin when no path is given.
fn read_input(path: Option<&str>) -> Result<String> {
    let Some(path) = path else {
        let mut events = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut events)
            .context("Failed to read events from stdin")?;
        return Ok(events);
    };
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}
