//! Comparison keys for card names.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPLIT_SEPARATOR: Regex = Regex::new(r"\s*//\s*").unwrap();
}

const RIGHT_SINGLE_QUOTE: char = '\u{2019}';

/// Maps a card name to the key used for all cross-entry matching.
///
/// Lowercased, split-card separators unified to `" // "`, typographic
/// apostrophes folded to `'`. Display names keep their original form.
pub fn normalize_card_name(name: &str) -> String {
    let lower = name.to_lowercase();
    SPLIT_SEPARATOR
        .replace_all(&lower, " // ")
        .replace(RIGHT_SINGLE_QUOTE, "'")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_card_spacing_variants_match() {
        let expected = normalize_card_name("Fire // Ice");
        assert_eq!(expected, "fire // ice");
        assert_eq!(normalize_card_name("fire  //  ice"), expected);
        assert_eq!(normalize_card_name("Fire//Ice"), expected);
    }

    #[test]
    fn apostrophe_variants_match() {
        assert_eq!(
            normalize_card_name("Urza\u{2019}s Saga"),
            normalize_card_name("urza's saga")
        );
    }

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_card_name("  Lightning BOLT "), "lightning bolt");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_card_name(""), "");
    }
}
