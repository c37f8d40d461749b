//! Card name cleaning.
//!
//! Export tools decorate card names with set codes, collector numbers, foil
//! markers and category tags, e.g. Archidekt's
//! `"Card Name (set) 123 *F* [Category] ^Have,#37d67a^"`. Cleaning strips all
//! of that and leaves the display name.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `^Have,#37d67a^` style color/category tags
    static ref CARET_TAG: Regex = Regex::new(r"\s*\^[^\^]*\^\s*").unwrap();
    /// `(abc) 123` or `(abc) 123a`
    static ref SET_AND_NUMBER: Regex =
        Regex::new(r"(?i)\s*\([a-z0-9]+\)\s*[0-9]+[a-z]?\s*").unwrap();
    /// `[Artifact]`, `[Land,Creature]`
    static ref CATEGORY_LIST: Regex = Regex::new(r"\s*\[[^\]]*\]\s*").unwrap();
    static ref TRAILING_PARENS: Regex = Regex::new(r"\s*\([^)]*\)\s*$").unwrap();
    static ref TRAILING_ANGLE: Regex = Regex::new(r"\s*<[^>]*>\s*$").unwrap();
    static ref FOIL_MARKER: Regex = Regex::new(r"(?i)\s*\*F\*\s*").unwrap();
    static ref HEX_COLOR: Regex = Regex::new(r"\s*#[0-9a-fA-F]{6}\s*").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strips export decoration from a raw card name.
///
/// Rules run in a fixed order; set/number pairs must be removed before the
/// generic trailing parenthesis rule. Never fails; an empty result means
/// "no card".
pub fn clean_card_name(raw: &str) -> String {
    let name = CARET_TAG.replace_all(raw, " ");
    let name = SET_AND_NUMBER.replace_all(&name, " ");
    let name = CATEGORY_LIST.replace_all(&name, " ");
    let name = TRAILING_PARENS.replace_all(&name, "");
    let name = TRAILING_ANGLE.replace_all(&name, "");
    let name = FOIL_MARKER.replace_all(&name, " ");
    let name = HEX_COLOR.replace_all(&name, " ");
    WHITESPACE.replace_all(&name, " ").trim().to_string()
}
