//! Shared types for MTG deck tracking.
//!
//! Cards, collections and decks as they come out of the list parsers and the
//! deck import service, plus the derived overlap analysis.

pub mod error;
pub mod models;

pub use error::{ApiError, ApiResult};
pub use models::{CardEntry, CardOverlap, Collection, Deck, DeckAnalysis, DeckQuantity};
