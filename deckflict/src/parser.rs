//! Card list parsing.
//!
//! Three input shapes are recognised:
//! - CSV exports with a header line (`Quantity,Name,Set Code,...`)
//! - the same CSV layout without a header (`4,Lightning Bolt,2ed,...`)
//! - free-form deck lists (`1 Sol Ring`, `Sol Ring x1`, `Sol Ring (1)`)
//!
//! Parsing never fails. Lines that fit no shape are skipped.

use lazy_static::lazy_static;
use log::debug;
use mtg_common::CardEntry;
use regex::Regex;

use crate::cleaning::clean_card_name;

lazy_static! {
    static ref HEADLESS_CSV: Regex = Regex::new(r"^[0-9]+,").unwrap();
    static ref BOARD_HEADER: Regex =
        Regex::new(r"(?i)^(commander|mainboard|sideboard|maybeboard)").unwrap();
    /// `1 Name`, `1x Name`
    static ref LEADING_QUANTITY: Regex = Regex::new(r"(?i)^([0-9]+)x?\s+(.+)$").unwrap();
    /// `Name x1`, `Name ×1`
    static ref TRAILING_MULTIPLIER: Regex = Regex::new(r"(?i)^(.+?)\s*[x×]\s*([0-9]+)$").unwrap();
    /// `Name (1)`
    static ref TRAILING_COUNT: Regex = Regex::new(r"^(.+?)\s*\(([0-9]+)\)$").unwrap();
}

const HEADER_KEYWORDS: [&str; 3] = ["quantity", "name", "set"];

/// Input shape detected by [`detect_format`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    HeaderCsv,
    HeadlessCsv,
    DeckList,
}

type FormatRule = (fn(&str) -> bool, ListFormat);

/// Checked in order, first match wins. Anything else is a deck list.
const FORMAT_RULES: &[FormatRule] = &[
    (looks_like_header_csv, ListFormat::HeaderCsv),
    (looks_like_headless_csv, ListFormat::HeadlessCsv),
];

fn first_line(content: &str) -> &str {
    content.trim().split('\n').next().unwrap_or("").trim()
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains(',') && HEADER_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn looks_like_header_csv(content: &str) -> bool {
    is_header_line(first_line(content))
}

fn looks_like_headless_csv(content: &str) -> bool {
    HEADLESS_CSV.is_match(content.trim())
}

/// Picks the parser for `content`.
pub fn detect_format(content: &str) -> ListFormat {
    FORMAT_RULES
        .iter()
        .find(|(matches, _)| matches(content))
        .map(|(_, format)| *format)
        .unwrap_or(ListFormat::DeckList)
}

/// Auto-detects the input shape and parses it.
pub fn parse_card_list(content: &str) -> Vec<CardEntry> {
    let format = detect_format(content);
    debug!("Detected card list format: {:?}", format);

    let cards = match format {
        ListFormat::HeaderCsv => parse_csv_rows(content, true),
        ListFormat::HeadlessCsv => parse_csv_rows(content, false),
        ListFormat::DeckList => parse_deck_list(content),
    };

    debug!("Parsed {} card entries", cards.len());
    cards
}

/// Parses an Archidekt-style CSV export.
///
/// Columns: `Quantity,Name,Set Code,Set Name,Collector Number,Foil,Condition,Language`.
/// The first line is skipped when it looks like a header.
pub fn parse_csv_export(content: &str) -> Vec<CardEntry> {
    parse_csv_rows(content, looks_like_header_csv(content))
}

fn parse_csv_rows(content: &str, skip_header: bool) -> Vec<CardEntry> {
    content
        .trim()
        .split('\n')
        .skip(usize::from(skip_header))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_csv_record)
        .collect()
}

fn parse_csv_record(line: &str) -> Option<CardEntry> {
    let fields = split_csv_line(line);
    if fields.len() < 2 {
        return None;
    }

    let name = clean_card_name(&fields[1]);
    if name.is_empty() {
        return None;
    }

    let field = |i: usize| fields.get(i).filter(|f| !f.is_empty()).cloned();
    let foil = fields
        .get(5)
        .map(|f| f.eq_ignore_ascii_case("true") || f.eq_ignore_ascii_case("foil"))
        .unwrap_or(false);

    Some(CardEntry {
        name,
        quantity: parse_csv_quantity(&fields[0]),
        set_code: field(2),
        set_name: field(3),
        collector_number: field(4),
        foil,
        condition: field(6),
        language: field(7),
    })
}

/// Leading digits of the field; 1 when there are none or they read as zero.
fn parse_csv_quantity(field: &str) -> u32 {
    let digits: String = field.chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<u32>() {
        Ok(quantity) if quantity > 0 => quantity,
        _ => 1,
    }
}

/// Splits one CSV line. A `"` toggles quoting and is dropped from the output;
/// commas inside quotes belong to the field.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Parses a free-form deck list (`1 Card Name`, `Card Name x1`, ...).
///
/// Comments (`//`, `#`), section headers ending in `:` and board headers
/// such as `Sideboard` are skipped.
pub fn parse_deck_list(content: &str) -> Vec<CardEntry> {
    content
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !is_skipped_deck_line(line))
        .filter_map(parse_deck_line)
        .collect()
}

fn is_skipped_deck_line(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("//")
        || line.starts_with('#')
        || line.ends_with(':')
        || BOARD_HEADER.is_match(line)
}

fn parse_deck_line(line: &str) -> Option<CardEntry> {
    let (quantity, raw_name) = split_quantity(line)?;
    let name = clean_card_name(raw_name);

    if name.is_empty() || quantity == 0 {
        return None;
    }
    Some(CardEntry::new(name, quantity))
}

/// Returns `(quantity, name)`; `None` only when the digits overflow.
fn split_quantity(line: &str) -> Option<(u32, &str)> {
    if let Some(caps) = LEADING_QUANTITY.captures(line) {
        let name = caps.get(2).map_or("", |m| m.as_str());
        return Some((caps[1].parse().ok()?, name));
    }
    for re in [&*TRAILING_MULTIPLIER, &*TRAILING_COUNT] {
        if let Some(caps) = re.captures(line) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            return Some((caps[2].parse().ok()?, name));
        }
    }
    Some((1, line))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
