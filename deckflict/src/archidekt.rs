//! Archidekt deck import client
//!
//! Uses blocking reqwest; decks are fetched one at a time before analysis.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use mtg_common::{ApiError, ApiResult, CardEntry, Deck};
use regex::Regex;
use serde::Deserialize;

use crate::rate_limit::{RateLimiter, Unlimited};

pub const ARCHIDEKT_BASE_URL: &str = "https://archidekt.com";
const USER_AGENT: &str = "Deckflict/1.0 (MTG deck conflict checker)";
const LOCAL_CLIENT_KEY: &str = "local";

lazy_static! {
    static ref DECK_URL: Regex = Regex::new(r"(?i)archidekt\.com/(?:api/)?decks/([0-9]+)").unwrap();
}

fn is_numeric_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Extracts a deck id from a raw id or an Archidekt deck URL.
///
/// Accepts `12345`, `archidekt.com/decks/12345`,
/// `https://www.archidekt.com/decks/12345/deck-name` and the `/api/decks/`
/// form.
pub fn extract_deck_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if is_numeric_id(trimmed) {
        return Some(trimmed.to_string());
    }
    DECK_URL
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Deserialize)]
pub struct ArchidektDeckResponse {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<ArchidektCard>,
}

#[derive(Debug, Deserialize)]
pub struct ArchidektCard {
    pub quantity: u32,
    pub card: ArchidektCardInfo,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchidektCardInfo {
    pub oracle_card: OracleCard,
    #[serde(default)]
    pub edition: Option<Edition>,
    #[serde(default)]
    pub collector_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OracleCard {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Edition {
    #[serde(default)]
    pub editioncode: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ArchidektCard {
    /// Returns true if the card sits in the maybeboard
    pub fn is_maybeboard(&self) -> bool {
        self.categories
            .iter()
            .flatten()
            .any(|c| c.eq_ignore_ascii_case("maybeboard"))
    }

    fn to_entry(&self) -> Option<CardEntry> {
        let name = self.card.oracle_card.name.trim();
        if name.is_empty() || self.quantity == 0 {
            return None;
        }
        let non_empty = |s: &Option<String>| s.as_ref().filter(|s| !s.is_empty()).cloned();
        let edition = self.card.edition.as_ref();

        let mut entry = CardEntry::new(name, self.quantity);
        entry.set_code = edition.and_then(|e| non_empty(&e.editioncode));
        entry.set_name = edition.and_then(|e| non_empty(&e.name));
        entry.collector_number = non_empty(&self.card.collector_number);
        Some(entry)
    }
}

/// A deck as returned by the import service, maybeboard removed
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDeck {
    pub name: String,
    pub cards: Vec<CardEntry>,
}

impl From<ArchidektDeckResponse> for ImportedDeck {
    fn from(response: ArchidektDeckResponse) -> Self {
        let cards = response
            .cards
            .iter()
            .filter(|c| !c.is_maybeboard())
            .filter_map(ArchidektCard::to_entry)
            .collect();
        Self {
            name: response.name,
            cards,
        }
    }
}

impl ImportedDeck {
    /// Turns the import into a refreshable deck with a fresh id
    pub fn into_deck(self, archidekt_id: &str, uploaded_at: DateTime<Utc>) -> Deck {
        Deck {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            cards: self.cards,
            uploaded_at,
            archidekt_id: Some(archidekt_id.to_string()),
        }
    }
}

/// Deck import client with an injected rate limiter
pub struct ArchidektClient {
    base_url: String,
    http: reqwest::blocking::Client,
    limiter: Box<dyn RateLimiter>,
}

impl ArchidektClient {
    pub fn new(limiter: Box<dyn RateLimiter>) -> Self {
        Self::with_base_url(ARCHIDEKT_BASE_URL, limiter)
    }

    /// Points the client at another host (for testing with mock servers).
    pub fn with_base_url(base_url: &str, limiter: Box<dyn RateLimiter>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
            limiter,
        }
    }

    pub fn fetch_deck(&self, deck_id: &str) -> ApiResult<ImportedDeck> {
        self.fetch_deck_for(LOCAL_CLIENT_KEY, deck_id)
    }

    /// Fetches a deck on behalf of `client_key`, counted against its rate limit.
    pub fn fetch_deck_for(&self, client_key: &str, deck_id: &str) -> ApiResult<ImportedDeck> {
        if !self.limiter.allow(client_key) {
            return Err(ApiError::RateLimited);
        }
        if !is_numeric_id(deck_id) {
            return Err(ApiError::InvalidDeckId(deck_id.to_string()));
        }

        let url = format!("{}/api/decks/{}/", self.base_url, deck_id);
        log::debug!("Fetching deck from Archidekt: {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .send()?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::DeckNotFound(deck_id.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status));
        }

        let body = response.text()?;
        let deck: ArchidektDeckResponse = serde_json::from_str(&body)?;
        let imported = ImportedDeck::from(deck);
        log::info!(
            "Imported deck '{}' with {} entries",
            imported.name,
            imported.cards.len()
        );
        Ok(imported)
    }
}

/// Fetch a deck from Archidekt by id
pub fn fetch_deck(deck_id: &str) -> ApiResult<ImportedDeck> {
    fetch_deck_from(ARCHIDEKT_BASE_URL, deck_id)
}

/// Fetches a deck from the given host without rate limiting.
pub fn fetch_deck_from(base_url: &str, deck_id: &str) -> ApiResult<ImportedDeck> {
    ArchidektClient::with_base_url(base_url, Box::new(Unlimited)).fetch_deck(deck_id)
}

#[cfg(test)]
#[path = "archidekt_tests.rs"]
mod tests;
