//! Text and CSV exports of analysis results.

use mtg_common::{CardEntry, CardOverlap, Collection, Deck, DeckAnalysis};
use std::io::Write;

use crate::error::Result;
use crate::overlap::display_order;
use crate::unallocated::unallocated;

const BASIC_LANDS: [&str; 10] = [
    "plains",
    "island",
    "swamp",
    "mountain",
    "forest",
    "snow-covered plains",
    "snow-covered island",
    "snow-covered swamp",
    "snow-covered mountain",
    "snow-covered forest",
];

pub fn is_basic_land(card_name: &str) -> bool {
    let normalized = card_name.trim().to_lowercase();
    BASIC_LANDS.contains(&normalized.as_str())
}

fn deck_breakdown(card: &CardOverlap) -> String {
    card.decks
        .iter()
        .map(|d| format!("{} ({})", d.deck_name, d.quantity))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builds the shopping list of overlapping cards still short.
///
/// One `"<shortage> <name>"` line per card, in analysis order. Returns
/// `None` when nothing is missing.
pub fn format_missing_cards(analysis: &DeckAnalysis, include_basic_lands: bool) -> Option<String> {
    let lines: Vec<String> = analysis
        .overlapping_cards
        .iter()
        .filter(|c| c.shortage > 0)
        .filter(|c| include_basic_lands || !is_basic_land(&c.card_name))
        .map(|c| format!("{} {}", c.shortage, c.card_name))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Lists unallocated cards as `"<quantity> <name>"`, sorted by name.
pub fn format_unallocated(cards: &[CardEntry]) -> Option<String> {
    if cards.is_empty() {
        return None;
    }
    let mut sorted: Vec<&CardEntry> = cards.iter().collect();
    sorted.sort_by(|a, b| display_order(&a.name, &b.name));
    Some(
        sorted
            .iter()
            .map(|c| format!("{} {}", c.quantity, c.name))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Writes every card with a shortage as CSV: `Card,Needed,Owned,Shortage,Decks`.
pub fn write_analysis_csv<W: Write>(analysis: &DeckAnalysis, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Card", "Needed", "Owned", "Shortage", "Decks"])?;
    for card in &analysis.cards_not_owned {
        wtr.write_record([
            card.card_name.clone(),
            card.total_needed.to_string(),
            card.owned.to_string(),
            card.shortage.to_string(),
            deck_breakdown(card),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Which overlapping cards the report lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverlapFilter {
    #[default]
    All,
    /// Only cards with a shortage
    Shortage,
    /// Only cards the collection covers
    Sufficient,
}

/// Order of the overlapping cards in the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverlapSort {
    /// Shortage, then deck count, both descending
    #[default]
    Shortage,
    /// Deck count, then shortage, both descending
    Decks,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub filter: OverlapFilter,
    pub sort: OverlapSort,
    pub include_basic_lands: bool,
}

fn keep_land(card: &CardOverlap, include_basic_lands: bool) -> bool {
    include_basic_lands || !is_basic_land(&card.card_name)
}

/// Overlapping cards after the basic land toggle, the filter and the sort
pub fn overlap_view<'a>(
    analysis: &'a DeckAnalysis,
    options: &ReportOptions,
) -> Vec<&'a CardOverlap> {
    let mut cards: Vec<&CardOverlap> = analysis
        .overlapping_cards
        .iter()
        .filter(|c| keep_land(c, options.include_basic_lands))
        .filter(|c| match options.filter {
            OverlapFilter::All => true,
            OverlapFilter::Shortage => c.shortage > 0,
            OverlapFilter::Sufficient => c.shortage == 0,
        })
        .collect();

    match options.sort {
        OverlapSort::Shortage => cards.sort_by(|a, b| {
            b.shortage
                .cmp(&a.shortage)
                .then_with(|| b.decks.len().cmp(&a.decks.len()))
        }),
        OverlapSort::Decks => cards.sort_by(|a, b| {
            b.decks
                .len()
                .cmp(&a.decks.len())
                .then_with(|| b.shortage.cmp(&a.shortage))
        }),
        OverlapSort::Name => cards.sort_by(|a, b| display_order(&a.card_name, &b.card_name)),
    }
    cards
}

/// Cards with a shortage after the basic land toggle, in analysis order
pub fn not_owned_view(analysis: &DeckAnalysis, include_basic_lands: bool) -> Vec<&CardOverlap> {
    analysis
        .cards_not_owned
        .iter()
        .filter(|c| keep_land(c, include_basic_lands))
        .collect()
}

fn push_card(output: &mut String, card: &CardOverlap) {
    let status = if card.shortage > 0 {
        format!("SHORT {}", card.shortage)
    } else {
        "OK".to_string()
    };
    output.push_str(&format!(
        "{} - need {}, own {} [{status}]\n",
        card.card_name, card.total_needed, card.owned
    ));
    output.push_str(&format!("    {}\n", deck_breakdown(card)));
}

pub fn format_analysis_report(analysis: &DeckAnalysis, options: &ReportOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Deck Analysis: {} unique cards, {} total needed, {} with shortage\n",
        analysis.total_unique_cards, analysis.total_cards_needed, analysis.cards_with_shortage
    ));
    output.push_str("-----------------------------------------------\n\n");

    if analysis.overlapping_cards.is_empty() {
        output.push_str("No overlapping cards found! Your decks don't share any cards.\n");
    } else {
        let overlapping = overlap_view(analysis, options);
        output.push_str(&format!("Cards in multiple decks ({}):\n", overlapping.len()));
        if overlapping.is_empty() {
            output.push_str("No cards match the current filter.\n");
        }
        for card in overlapping {
            push_card(&mut output, card);
        }
    }

    let not_owned = not_owned_view(analysis, options.include_basic_lands);
    output.push_str(&format!("\nCards not owned ({}):\n", not_owned.len()));
    if not_owned.is_empty() {
        output.push_str("You own enough copies of every card.\n");
    }
    for card in not_owned {
        push_card(&mut output, card);
    }

    output
}

/// Counts shown next to the loaded collection
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    pub unique_cards: usize,
    pub total_cards: u32,
    /// Only present when at least one deck is loaded
    pub unallocated: Option<UnallocatedSummary>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnallocatedSummary {
    pub unique_cards: usize,
    pub total_free: u32,
}

pub fn collection_summary(collection: &Collection, decks: &[Deck]) -> CollectionSummary {
    let unallocated = if decks.is_empty() {
        None
    } else {
        let free = unallocated(collection, decks);
        Some(UnallocatedSummary {
            unique_cards: free.len(),
            total_free: free
                .iter()
                .fold(0, |total: u32, c| total.saturating_add(c.quantity)),
        })
    };

    CollectionSummary {
        unique_cards: collection.cards.len(),
        total_cards: collection.total_quantity(),
        unallocated,
    }
}

pub fn format_collection_summary(summary: &CollectionSummary) -> String {
    let mut output = format!(
        "{} unique cards, {} total\n",
        summary.unique_cards, summary.total_cards
    );
    if let Some(free) = &summary.unallocated {
        output.push_str(&format!(
            "{} unique unallocated, {} total free\n",
            free.unique_cards, free.total_free
        ));
    }
    output
}
