use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line item of a collection or deck list.
///
/// `name` is the cleaned display name. Quantities are additive and never
/// negative; entries for the same card may repeat (different printings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEntry {
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<String>,
    #[serde(default)]
    pub foil: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl CardEntry {
    /// Creates a bare entry with only a name and quantity
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            set_code: None,
            set_name: None,
            collector_number: None,
            foil: false,
            condition: None,
            language: None,
        }
    }
}

/// The owned inventory. `uploaded_at == None` means no collection is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub cards: Vec<CardEntry>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Collection {
    pub fn new(cards: Vec<CardEntry>, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            cards,
            uploaded_at: Some(uploaded_at),
        }
    }

    /// Returns true if a collection has been loaded
    pub fn is_loaded(&self) -> bool {
        self.uploaded_at.is_some()
    }

    /// Sum of all entry quantities, saturating at `u32::MAX`
    pub fn total_quantity(&self) -> u32 {
        self.cards
            .iter()
            .fold(0, |total: u32, c| total.saturating_add(c.quantity))
    }
}

/// A deck list. `id` is unique within the active deck set, `name` is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub cards: Vec<CardEntry>,
    pub uploaded_at: DateTime<Utc>,
    /// Set when the deck came from Archidekt and can be refreshed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archidekt_id: Option<String>,
}

impl Deck {
    /// Returns true if the deck was imported and can be re-fetched
    pub fn is_refreshable(&self) -> bool {
        self.archidekt_id.is_some()
    }
}

/// Quantity of a card inside one deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckQuantity {
    pub deck_name: String,
    pub quantity: u32,
}

/// Aggregate for one normalized card name across all decks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOverlap {
    pub card_name: String,
    pub total_needed: u32,
    pub owned: u32,
    pub shortage: u32,
    pub decks: Vec<DeckQuantity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckAnalysis {
    /// Cards used by two or more decks
    pub overlapping_cards: Vec<CardOverlap>,
    /// Cards with a shortage, in any number of decks
    pub cards_not_owned: Vec<CardOverlap>,
    pub total_unique_cards: usize,
    pub total_cards_needed: u32,
    pub cards_with_shortage: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_entry_serializes_camel_case() {
        let mut card = CardEntry::new("Lightning Bolt", 4);
        card.set_code = Some("2ed".to_string());
        card.collector_number = Some("161".to_string());

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["name"], "Lightning Bolt");
        assert_eq!(json["setCode"], "2ed");
        assert_eq!(json["collectorNumber"], "161");
        assert!(json.get("setName").is_none());
    }

    #[test]
    fn card_entry_deserializes_minimal_json() {
        let card: CardEntry = serde_json::from_str(r#"{"name":"Forest","quantity":2}"#).unwrap();
        assert_eq!(card, CardEntry::new("Forest", 2));
    }

    #[test]
    fn card_entry_ignores_legacy_maybeboard_key() {
        let card: CardEntry =
            serde_json::from_str(r#"{"name":"Forest","quantity":2,"maybeboard":false}"#).unwrap();
        assert_eq!(card, CardEntry::new("Forest", 2));
    }

    #[test]
    fn total_quantity_saturates() {
        let collection = Collection::new(
            vec![CardEntry::new("Forest", u32::MAX), CardEntry::new("Forest", 3)],
            Utc::now(),
        );
        assert_eq!(collection.total_quantity(), u32::MAX);
    }

    #[test]
    fn empty_collection_is_not_loaded() {
        let collection = Collection::default();
        assert!(!collection.is_loaded());
        assert_eq!(collection.total_quantity(), 0);
    }

    #[test]
    fn collection_deserializes_null_upload_date() {
        let collection: Collection =
            serde_json::from_str(r#"{"cards":[],"uploadedAt":null}"#).unwrap();
        assert!(collection.uploaded_at.is_none());
    }

    #[test]
    fn deck_with_archidekt_id_is_refreshable() {
        let deck: Deck = serde_json::from_str(
            r#"{"id":"abc","name":"Atraxa","cards":[],"uploadedAt":"2025-01-15T12:00:00Z","archidektId":"42"}"#,
        )
        .unwrap();
        assert!(deck.is_refreshable());
        assert_eq!(deck.archidekt_id.as_deref(), Some("42"));
    }
}
