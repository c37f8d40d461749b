use mtg_common::CardEntry;
use std::fs;
use std::io;
use std::path::Path;

use crate::parser::parse_card_list;

/// Reads a collection or deck list file and parses it with format detection.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
pub fn read_card_list<P: AsRef<Path>>(path: P) -> Result<Vec<CardEntry>, io::Error> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    let cards = parse_card_list(&content);
    log::debug!("Read {} entries from {}", cards.len(), path.display());
    Ok(cards)
}

/// File name without directories, used for default deck names
pub fn file_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
