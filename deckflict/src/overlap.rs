//! Cross-deck overlap and shortage analysis.

use deunicode::deunicode;
use mtg_common::{CardOverlap, Collection, Deck, DeckAnalysis, DeckQuantity};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::cleaning::clean_card_name;
use crate::normalize::normalize_card_name;

/// Per-card accumulator. Deck records are matched by deck id so that two
/// decks sharing a name stay separate.
struct Accumulator {
    key: String,
    card_name: String,
    total_needed: u32,
    decks: Vec<(String, DeckQuantity)>,
}

impl Accumulator {
    fn new(key: String, card_name: String) -> Self {
        Self {
            key,
            card_name,
            total_needed: 0,
            decks: Vec::new(),
        }
    }

    fn add(&mut self, deck: &Deck, quantity: u32) {
        self.total_needed = self.total_needed.saturating_add(quantity);
        match self.decks.iter_mut().find(|(id, _)| *id == deck.id) {
            Some((_, record)) => record.quantity = record.quantity.saturating_add(quantity),
            None => self.decks.push((
                deck.id.clone(),
                DeckQuantity {
                    deck_name: deck.name.clone(),
                    quantity,
                },
            )),
        }
    }

    fn finish(self, owned: &HashMap<String, u32>) -> CardOverlap {
        let owned = owned.get(&self.key).copied().unwrap_or(0);
        CardOverlap {
            card_name: self.card_name,
            total_needed: self.total_needed,
            owned,
            shortage: self.total_needed.saturating_sub(owned),
            decks: self.decks.into_iter().map(|(_, record)| record).collect(),
        }
    }
}

/// Sums collection quantities by normalized name. Sums saturate at `u32::MAX`.
pub fn owned_quantities(collection: &Collection) -> HashMap<String, u32> {
    let mut owned: HashMap<String, u32> = HashMap::new();
    for card in &collection.cards {
        let total = owned.entry(normalize_card_name(&card.name)).or_insert(0);
        *total = total.saturating_add(card.quantity);
    }
    owned
}

/// Case-insensitive ordering that sorts accented letters with their base
/// letter (`Éomer` next to `Eomer`). Unaccented spellings come first on a
/// tie, then lowercase before uppercase.
pub(crate) fn display_order(a: &str, b: &str) -> Ordering {
    deunicode(a)
        .to_lowercase()
        .cmp(&deunicode(b).to_lowercase())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Aggregates every deck's cards against the collection.
///
/// Decks and their entries are visited in order: the first cleaned name seen
/// for a normalized key becomes the display name, and deck records keep
/// encounter order.
pub fn analyze(collection: &Collection, decks: &[Deck]) -> DeckAnalysis {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut accumulators: Vec<Accumulator> = Vec::new();

    for deck in decks {
        for card in &deck.cards {
            let cleaned = clean_card_name(&card.name);
            let key = normalize_card_name(&cleaned);
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                accumulators.push(Accumulator::new(key, cleaned));
                accumulators.len() - 1
            });
            accumulators[slot].add(deck, card.quantity);
        }
    }

    let owned = owned_quantities(collection);
    let all: Vec<CardOverlap> = accumulators
        .into_iter()
        .map(|acc| acc.finish(&owned))
        .collect();

    let mut overlapping_cards: Vec<CardOverlap> =
        all.iter().filter(|c| c.decks.len() > 1).cloned().collect();
    overlapping_cards.sort_by(|a, b| {
        b.shortage
            .cmp(&a.shortage)
            .then_with(|| b.decks.len().cmp(&a.decks.len()))
    });

    let mut cards_not_owned: Vec<CardOverlap> =
        all.iter().filter(|c| c.shortage > 0).cloned().collect();
    cards_not_owned.sort_by(|a, b| display_order(&a.card_name, &b.card_name));

    let analysis = DeckAnalysis {
        overlapping_cards,
        cards_not_owned,
        total_unique_cards: all.len(),
        total_cards_needed: all
            .iter()
            .fold(0, |total: u32, c| total.saturating_add(c.total_needed)),
        cards_with_shortage: all.iter().filter(|c| c.shortage > 0).count(),
    };

    log::debug!(
        "Analyzed {} decks: {} unique cards, {} overlapping, {} short",
        decks.len(),
        analysis.total_unique_cards,
        analysis.overlapping_cards.len(),
        analysis.cards_with_shortage
    );
    analysis
}

#[cfg(test)]
#[path = "overlap_tests.rs"]
mod tests;
