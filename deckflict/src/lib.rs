pub mod archidekt;
pub mod cleaning;
pub mod error;
pub mod formatters;
pub mod io;
pub mod normalize;
pub mod overlap;
pub mod parser;
pub mod rate_limit;
pub mod storage;
pub mod unallocated;
pub mod workspace;

// Re-export commonly used items
pub use archidekt::{extract_deck_id, fetch_deck, ArchidektClient, ImportedDeck};
pub use cleaning::clean_card_name;
pub use error::{DeckflictError, Result};
pub use formatters::{format_missing_cards, format_unallocated, write_analysis_csv};
pub use io::read_card_list;
pub use mtg_common::{CardEntry, CardOverlap, Collection, Deck, DeckAnalysis, DeckQuantity};
pub use normalize::normalize_card_name;
pub use overlap::analyze;
pub use parser::{detect_format, parse_card_list, parse_csv_export, parse_deck_list, ListFormat};
pub use rate_limit::{FixedWindowLimiter, RateLimiter, Unlimited};
pub use storage::{SqliteStore, Store};
pub use unallocated::unallocated;
pub use workspace::Workspace;
