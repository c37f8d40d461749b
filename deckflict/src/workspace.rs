//! The loaded collection and deck set, with the edits a user can make.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use mtg_common::{CardEntry, Collection, Deck, DeckAnalysis};
use regex::Regex;

use crate::archidekt::ImportedDeck;
use crate::error::{DeckflictError, Result};
use crate::overlap::analyze;
use crate::parser::parse_card_list;
use crate::storage::{self, Store};

lazy_static! {
    static ref LIST_EXTENSION: Regex = Regex::new(r"(?i)\.(csv|txt)$").unwrap();
}

/// Deck name suggested for an uploaded file: `my_deck-v2.txt` → `my deck v2`
pub fn default_deck_name(file_name: &str) -> String {
    LIST_EXTENSION
        .replace(file_name, "")
        .replace(['-', '_'], " ")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workspace {
    pub collection: Collection,
    pub decks: Vec<Deck>,
}

impl Workspace {
    pub fn load(store: &dyn Store) -> Result<Self> {
        Ok(Self {
            collection: storage::load_collection(store)?,
            decks: storage::load_decks(store)?,
        })
    }

    pub fn save(&self, store: &dyn Store) -> Result<()> {
        storage::save_collection(store, &self.collection)?;
        storage::save_decks(store, &self.decks)
    }

    /// Replaces the collection with the parsed content of a list file.
    pub fn set_collection_from_text(&mut self, content: &str, now: DateTime<Utc>) -> &Collection {
        self.set_collection(parse_card_list(content), now)
    }

    pub fn set_collection(&mut self, cards: Vec<CardEntry>, now: DateTime<Utc>) -> &Collection {
        self.collection = Collection::new(cards, now);
        log::info!(
            "Loaded collection with {} entries",
            self.collection.cards.len()
        );
        &self.collection
    }

    pub fn clear_collection(&mut self) {
        self.collection = Collection::default();
    }

    /// Parses `content` into a new deck appended to the deck set.
    pub fn add_deck_from_text(
        &mut self,
        name: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&Deck> {
        self.add_deck(name, parse_card_list(content), now)
    }

    pub fn add_deck(
        &mut self,
        name: &str,
        cards: Vec<CardEntry>,
        now: DateTime<Utc>,
    ) -> Result<&Deck> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeckflictError::InvalidDeckName);
        }

        let deck = Deck {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            cards,
            uploaded_at: now,
            archidekt_id: None,
        };
        log::info!("Added deck '{}' with {} entries", deck.name, deck.cards.len());
        Ok(self.push(deck))
    }

    pub fn add_imported_deck(
        &mut self,
        imported: ImportedDeck,
        archidekt_id: &str,
        now: DateTime<Utc>,
    ) -> &Deck {
        self.push(imported.into_deck(archidekt_id, now))
    }

    fn push(&mut self, deck: Deck) -> &Deck {
        self.decks.push(deck);
        &self.decks[self.decks.len() - 1]
    }

    pub fn deck(&self, id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == id)
    }

    fn deck_mut(&mut self, id: &str) -> Result<&mut Deck> {
        self.decks
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DeckflictError::DeckNotFound(id.to_string()))
    }

    /// Removes a deck; returns false if the id is unknown
    pub fn remove_deck(&mut self, id: &str) -> bool {
        let before = self.decks.len();
        self.decks.retain(|d| d.id != id);
        self.decks.len() != before
    }

    /// Renames a deck. Blank names leave the deck unchanged.
    pub fn rename_deck(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        let deck = self.deck_mut(id)?;
        if !name.is_empty() {
            deck.name = name.to_string();
        }
        Ok(())
    }

    /// Moves the deck at `from` to position `to`; out-of-range indices are ignored.
    pub fn move_deck(&mut self, from: usize, to: usize) {
        if from >= self.decks.len() || to >= self.decks.len() {
            return;
        }
        let deck = self.decks.remove(from);
        self.decks.insert(to, deck);
    }

    /// Replaces an imported deck's name and cards with a fresh import.
    pub fn refresh_deck(
        &mut self,
        id: &str,
        imported: ImportedDeck,
        now: DateTime<Utc>,
    ) -> Result<&Deck> {
        let deck = self.deck_mut(id)?;
        if !deck.is_refreshable() {
            return Err(DeckflictError::NotRefreshable(id.to_string()));
        }
        deck.name = imported.name;
        deck.cards = imported.cards;
        deck.uploaded_at = now;
        log::info!("Refreshed deck '{}'", deck.name);
        Ok(deck)
    }

    /// Overlap analysis, or `None` when no deck is loaded
    pub fn analysis(&self) -> Option<DeckAnalysis> {
        if self.decks.is_empty() {
            None
        } else {
            Some(analyze(&self.collection, &self.decks))
        }
    }

    /// Clears memory and the store
    pub fn clear_all(&mut self, store: &dyn Store) -> Result<()> {
        storage::clear_all(store)?;
        *self = Self::default();
        Ok(())
    }
}
