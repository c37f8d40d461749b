//! Deckflict - find missing cards across your MTG decks
//!
//! Keeps a collection and a set of decks in a local store and reports which
//! cards several decks compete for and how many are still missing.

use chrono::Utc;
use clap::{Parser, Subcommand};
use deckflict::archidekt::{extract_deck_id, ArchidektClient};
use deckflict::error::{DeckflictError, Result};
use deckflict::formatters::{
    collection_summary, format_analysis_report, format_collection_summary, format_missing_cards,
    format_unallocated, write_analysis_csv, OverlapFilter, OverlapSort, ReportOptions,
};
use deckflict::io::{file_name, read_card_list};
use deckflict::rate_limit::FixedWindowLimiter;
use deckflict::storage::{default_db_path, SqliteStore};
use deckflict::unallocated::unallocated;
use deckflict::workspace::{default_deck_name, Workspace};
use mtg_common::ApiError;
use std::path::PathBuf;

/// Find missing cards across your MTG decks
#[derive(Parser, Debug)]
#[command(name = "deckflict")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite store
    #[arg(short, long, global = true, default_value_os_t = default_db_path())]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the owned collection
    #[command(subcommand)]
    Collection(CollectionCommand),
    /// Manage decks
    #[command(subcommand)]
    Deck(DeckCommand),
    /// Show cards shared by several decks and cards not owned
    Analyze {
        /// Write every short card as CSV instead of the text report
        #[arg(long)]
        csv: bool,
        #[arg(long, value_enum, default_value_t = OverlapFilter::All)]
        filter: OverlapFilter,
        #[arg(long, value_enum, default_value_t = OverlapSort::Shortage)]
        sort: OverlapSort,
        /// List basic lands in the text report
        #[arg(long)]
        include_basic_lands: bool,
    },
    /// Print the missing overlapping cards as a deck list
    Missing {
        #[arg(long)]
        include_basic_lands: bool,
    },
    /// Print owned cards not used by any deck
    Unallocated,
    /// Remove the collection and all decks
    Clear,
}

#[derive(Subcommand, Debug)]
enum CollectionCommand {
    /// Replace the collection with a CSV export or list file
    Load { file: PathBuf },
    Clear,
    Summary,
}

#[derive(Subcommand, Debug)]
enum DeckCommand {
    /// Add a deck from a CSV export or deck list file
    Add {
        file: PathBuf,
        /// Deck name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Import a public deck from Archidekt by URL or id
    Import { deck: String },
    /// Re-fetch an imported deck
    Refresh { id: String },
    Remove { id: String },
    Rename { id: String, name: String },
    /// Move the deck at position FROM to position TO (0-based)
    Move { from: usize, to: usize },
    List,
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=deckflict=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let store = SqliteStore::open(&args.database)?;
    let mut workspace = Workspace::load(&store)?;

    match args.command {
        Command::Collection(cmd) => run_collection(cmd, &mut workspace)?,
        Command::Deck(cmd) => run_deck(cmd, &mut workspace)?,
        Command::Analyze {
            csv,
            filter,
            sort,
            include_basic_lands,
        } => {
            let options = ReportOptions {
                filter,
                sort,
                include_basic_lands,
            };
            match workspace.analysis() {
                None => println!("No decks loaded yet."),
                Some(analysis) if csv => write_analysis_csv(&analysis, std::io::stdout().lock())?,
                Some(analysis) => print!("{}", format_analysis_report(&analysis, &options)),
            }
        }
        Command::Missing {
            include_basic_lands,
        } => {
            let missing = workspace
                .analysis()
                .and_then(|a| format_missing_cards(&a, include_basic_lands));
            match missing {
                Some(list) => println!("{list}"),
                None => println!("No missing cards to export!"),
            }
        }
        Command::Unallocated => {
            let free = unallocated(&workspace.collection, &workspace.decks);
            match format_unallocated(&free) {
                Some(list) => println!("{list}"),
                None => println!("No unallocated cards! All your cards are used in decks."),
            }
        }
        Command::Clear => {
            workspace.clear_all(&store)?;
            log::info!("Cleared all data");
            return Ok(());
        }
    }

    workspace.save(&store)
}

fn run_collection(cmd: CollectionCommand, workspace: &mut Workspace) -> Result<()> {
    match cmd {
        CollectionCommand::Load { file } => {
            let collection = workspace.set_collection(read_card_list(&file)?, Utc::now());
            if collection.cards.is_empty() {
                log::warn!("No cards found in {}", file.display());
            }
        }
        CollectionCommand::Clear => workspace.clear_collection(),
        CollectionCommand::Summary => {
            if !workspace.collection.is_loaded() {
                println!("No collection loaded.");
                return Ok(());
            }
            let summary = collection_summary(&workspace.collection, &workspace.decks);
            print!("{}", format_collection_summary(&summary));
        }
    }
    Ok(())
}

fn import_client() -> ArchidektClient {
    ArchidektClient::new(Box::new(FixedWindowLimiter::default()))
}

fn parse_deck_ref(input: &str) -> Result<String> {
    extract_deck_id(input).ok_or_else(|| ApiError::InvalidDeckId(input.to_string()).into())
}

fn run_deck(cmd: DeckCommand, workspace: &mut Workspace) -> Result<()> {
    match cmd {
        DeckCommand::Add { file, name } => {
            let name = name.unwrap_or_else(|| default_deck_name(&file_name(&file)));
            let cards = read_card_list(&file)?;
            if cards.is_empty() {
                log::warn!("No cards found in {}", file.display());
            }
            let deck = workspace.add_deck(&name, cards, Utc::now())?;
            println!("{}\t{}", deck.id, deck.name);
        }
        DeckCommand::Import { deck } => {
            let archidekt_id = parse_deck_ref(&deck)?;
            let imported = import_client().fetch_deck(&archidekt_id)?;
            let deck = workspace.add_imported_deck(imported, &archidekt_id, Utc::now());
            println!("{}\t{}", deck.id, deck.name);
        }
        DeckCommand::Refresh { id } => {
            let archidekt_id = workspace
                .deck(&id)
                .ok_or_else(|| DeckflictError::DeckNotFound(id.clone()))?
                .archidekt_id
                .clone()
                .ok_or_else(|| DeckflictError::NotRefreshable(id.clone()))?;
            let imported = import_client().fetch_deck(&archidekt_id)?;
            workspace.refresh_deck(&id, imported, Utc::now())?;
        }
        DeckCommand::Remove { id } => {
            if !workspace.remove_deck(&id) {
                return Err(DeckflictError::DeckNotFound(id));
            }
        }
        DeckCommand::Rename { id, name } => workspace.rename_deck(&id, &name)?,
        DeckCommand::Move { from, to } => workspace.move_deck(from, to),
        DeckCommand::List => {
            for (i, deck) in workspace.decks.iter().enumerate() {
                let source = deck
                    .archidekt_id
                    .as_deref()
                    .map(|id| format!(" [archidekt {id}]"))
                    .unwrap_or_default();
                println!(
                    "{i}\t{}\t{} ({} entries){source}",
                    deck.id,
                    deck.name,
                    deck.cards.len()
                );
            }
        }
    }
    Ok(())
}
