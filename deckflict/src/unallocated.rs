//! Owned cards that no deck uses.

use mtg_common::{CardEntry, Collection, Deck};
use std::collections::HashMap;

use crate::cleaning::clean_card_name;
use crate::normalize::normalize_card_name;

/// Total quantity per normalized name across every deck, saturating at `u32::MAX`
pub fn deck_usage(decks: &[Deck]) -> HashMap<String, u32> {
    let mut usage: HashMap<String, u32> = HashMap::new();
    for deck in decks {
        for card in &deck.cards {
            let key = normalize_card_name(&clean_card_name(&card.name));
            let used = usage.entry(key).or_insert(0);
            *used = used.saturating_add(card.quantity);
        }
    }
    usage
}

/// Subtracts deck usage from the collection, in collection order.
///
/// Usage is consumed line by line: when several collection entries share a
/// name (different printings), the first ones absorb the usage and later
/// ones see whatever is left. Collection names are assumed to be clean.
pub fn unallocated(collection: &Collection, decks: &[Deck]) -> Vec<CardEntry> {
    let mut usage = deck_usage(decks);
    let mut result = Vec::new();

    for card in &collection.cards {
        let key = normalize_card_name(&card.name);
        let used = usage.get(&key).copied().unwrap_or(0);

        let remaining = card.quantity.saturating_sub(used);
        if remaining > 0 {
            result.push(CardEntry {
                quantity: remaining,
                ..card.clone()
            });
        }
        if used > 0 {
            usage.insert(key, used.saturating_sub(card.quantity));
        }
    }

    result
}
