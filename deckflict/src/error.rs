use mtg_common::ApiError;
use std::fmt;

/// Unified error type for deck import, storage and I/O operations
#[derive(Debug)]
pub enum DeckflictError {
    /// Deck import request failed
    Api(ApiError),
    /// Persistence store failed
    Database(rusqlite::Error),
    /// Failed to serialize or deserialize stored data
    Json(serde_json::Error),
    /// File I/O error
    Io(std::io::Error),
    /// CSV export failed
    Csv(csv::Error),
    /// No deck with this id in the active deck set
    DeckNotFound(String),
    /// Deck was not imported from Archidekt
    NotRefreshable(String),
    /// Deck name is empty after trimming
    InvalidDeckName,
}

impl fmt::Display for DeckflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckflictError::Api(e) => write!(f, "{}", e),
            DeckflictError::Database(e) => write!(f, "Database error: {}", e),
            DeckflictError::Json(e) => write!(f, "JSON error: {}", e),
            DeckflictError::Io(e) => write!(f, "I/O error: {}", e),
            DeckflictError::Csv(e) => write!(f, "CSV error: {}", e),
            DeckflictError::DeckNotFound(id) => write!(f, "No deck with id {}", id),
            DeckflictError::NotRefreshable(id) => {
                write!(f, "Deck {} was not imported from Archidekt", id)
            }
            DeckflictError::InvalidDeckName => write!(f, "Deck name must not be empty"),
        }
    }
}

impl std::error::Error for DeckflictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckflictError::Api(e) => Some(e),
            DeckflictError::Database(e) => Some(e),
            DeckflictError::Json(e) => Some(e),
            DeckflictError::Io(e) => Some(e),
            DeckflictError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for DeckflictError {
    fn from(err: ApiError) -> Self {
        DeckflictError::Api(err)
    }
}

impl From<rusqlite::Error> for DeckflictError {
    fn from(err: rusqlite::Error) -> Self {
        DeckflictError::Database(err)
    }
}

impl From<serde_json::Error> for DeckflictError {
    fn from(err: serde_json::Error) -> Self {
        DeckflictError::Json(err)
    }
}

impl From<std::io::Error> for DeckflictError {
    fn from(err: std::io::Error) -> Self {
        DeckflictError::Io(err)
    }
}

impl From<csv::Error> for DeckflictError {
    fn from(err: csv::Error) -> Self {
        DeckflictError::Csv(err)
    }
}

/// Result type alias for deckflict operations
pub type Result<T> = std::result::Result<T, DeckflictError>;
