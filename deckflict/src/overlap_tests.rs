//! Tests for overlap analysis.

use super::*;
use chrono::{TimeZone, Utc};
use mtg_common::CardEntry;

fn deck(id: &str, name: &str, cards: &[(&str, u32)]) -> Deck {
    Deck {
        id: id.to_string(),
        name: name.to_string(),
        cards: cards.iter().map(|(n, q)| CardEntry::new(*n, *q)).collect(),
        uploaded_at: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        archidekt_id: None,
    }
}

fn collection(cards: &[(&str, u32)]) -> Collection {
    Collection::new(
        cards.iter().map(|(n, q)| CardEntry::new(*n, *q)).collect(),
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
    )
}

fn names(cards: &[CardOverlap]) -> Vec<&str> {
    cards.iter().map(|c| c.card_name.as_str()).collect()
}

#[test]
fn shared_card_reports_totals_and_deck_breakdown() {
    let collection = collection(&[("Forest", 4)]);
    let decks = vec![
        deck("a", "Deck A", &[("Forest", 2)]),
        deck("b", "Deck B", &[("Forest", 3)]),
    ];

    let analysis = analyze(&collection, &decks);

    assert_eq!(analysis.overlapping_cards.len(), 1);
    let forest = &analysis.overlapping_cards[0];
    assert_eq!(forest.card_name, "Forest");
    assert_eq!(forest.total_needed, 5);
    assert_eq!(forest.owned, 4);
    assert_eq!(forest.shortage, 1);
    assert_eq!(
        forest.decks,
        vec![
            DeckQuantity {
                deck_name: "Deck A".to_string(),
                quantity: 2
            },
            DeckQuantity {
                deck_name: "Deck B".to_string(),
                quantity: 3
            },
        ]
    );
}

#[test]
fn single_deck_card_is_not_overlapping_but_can_be_missing() {
    let collection = collection(&[]);
    let decks = vec![
        deck("a", "Deck A", &[("Sol Ring", 1), ("Forest", 1)]),
        deck("b", "Deck B", &[("Forest", 1)]),
    ];

    let analysis = analyze(&collection, &decks);

    assert_eq!(names(&analysis.overlapping_cards), vec!["Forest"]);
    assert_eq!(names(&analysis.cards_not_owned), vec!["Forest", "Sol Ring"]);
}

#[test]
fn repeated_entries_in_one_deck_are_merged() {
    let decks = vec![
        deck("a", "Deck A", &[("Forest", 2), ("forest", 3)]),
        deck("b", "Deck B", &[("Forest", 1)]),
    ];

    let analysis = analyze(&Collection::default(), &decks);

    let forest = &analysis.overlapping_cards[0];
    assert_eq!(forest.total_needed, 6);
    assert_eq!(forest.decks.len(), 2);
    assert_eq!(forest.decks[0].quantity, 5);
}

#[test]
fn decks_with_same_name_stay_separate() {
    let decks = vec![
        deck("a", "Untitled", &[("Sol Ring", 1)]),
        deck("b", "Untitled", &[("Sol Ring", 1)]),
    ];

    let analysis = analyze(&Collection::default(), &decks);

    assert_eq!(analysis.overlapping_cards.len(), 1);
    let ring = &analysis.overlapping_cards[0];
    assert_eq!(ring.decks.len(), 2);
    assert!(ring.decks.iter().all(|d| d.deck_name == "Untitled"));
}

#[test]
fn first_cleaned_name_wins_for_display() {
    let decks = vec![
        deck("a", "Deck A", &[("fire//ice (mh2) 290", 1)]),
        deck("b", "Deck B", &[("Fire // Ice", 1)]),
    ];
    let analysis = analyze(&Collection::default(), &decks);
    assert_eq!(names(&analysis.overlapping_cards), vec!["fire//ice"]);

    let swapped: Vec<Deck> = decks.into_iter().rev().collect();
    let analysis = analyze(&Collection::default(), &swapped);
    assert_eq!(names(&analysis.overlapping_cards), vec!["Fire // Ice"]);
}

#[test]
fn stored_deck_names_are_cleaned_again() {
    let decks = vec![
        deck("a", "Deck A", &[("Brainstorm ^Have,#37d67a^", 1)]),
        deck("b", "Deck B", &[("Brainstorm", 1)]),
    ];
    let analysis = analyze(&collection(&[("Brainstorm", 2)]), &decks);

    let brainstorm = &analysis.overlapping_cards[0];
    assert_eq!(brainstorm.card_name, "Brainstorm");
    assert_eq!(brainstorm.owned, 2);
    assert_eq!(brainstorm.shortage, 0);
}

#[test]
fn owned_sums_all_printings_by_normalized_name() {
    let collection = collection(&[("Urza's Saga", 1), ("urza\u{2019}s saga", 2)]);
    let decks = vec![
        deck("a", "Deck A", &[("Urza's Saga", 2)]),
        deck("b", "Deck B", &[("Urza's Saga", 2)]),
    ];

    let saga = &analyze(&collection, &decks).overlapping_cards[0];
    assert_eq!(saga.owned, 3);
    assert_eq!(saga.shortage, 1);
}

#[test]
fn surplus_never_produces_negative_shortage() {
    let decks = vec![deck("a", "Deck A", &[("Island", 1)])];
    let analysis = analyze(&collection(&[("Island", 10)]), &decks);

    assert!(analysis.cards_not_owned.is_empty());
    assert_eq!(analysis.cards_with_shortage, 0);
}

#[test]
fn overlapping_sorted_by_shortage_then_deck_count() {
    let collection = collection(&[("Sol Ring", 3), ("Arcane Signet", 1)]);
    let decks = vec![
        deck("a", "A", &[("Sol Ring", 1), ("Arcane Signet", 1), ("Forest", 1)]),
        deck("b", "B", &[("Sol Ring", 1), ("Arcane Signet", 1), ("Forest", 1)]),
        deck("c", "C", &[("Sol Ring", 1), ("Command Tower", 1)]),
        deck("d", "D", &[("Command Tower", 1)]),
    ];

    let analysis = analyze(&collection, &decks);

    // Forest and Command Tower short by 2, Arcane Signet by 1, Sol Ring by 0
    assert_eq!(
        names(&analysis.overlapping_cards),
        vec!["Forest", "Command Tower", "Arcane Signet", "Sol Ring"]
    );
}

#[test]
fn ties_keep_encounter_order() {
    let decks = vec![
        deck("a", "A", &[("Zombie Token", 1), ("Angel Token", 1)]),
        deck("b", "B", &[("Zombie Token", 1), ("Angel Token", 1)]),
    ];
    let analysis = analyze(&Collection::default(), &decks);
    assert_eq!(
        names(&analysis.overlapping_cards),
        vec!["Zombie Token", "Angel Token"]
    );
}

#[test]
fn cards_not_owned_sorted_case_insensitively() {
    let decks = vec![deck(
        "a",
        "A",
        &[("zurgo", 1), ("Birds of Paradise", 1), ("aether vial", 1)],
    )];
    let analysis = analyze(&Collection::default(), &decks);
    assert_eq!(
        names(&analysis.cards_not_owned),
        vec!["aether vial", "Birds of Paradise", "zurgo"]
    );
}

#[test]
fn summary_counters_cover_all_cards() {
    let collection = collection(&[("Forest", 1)]);
    let decks = vec![
        deck("a", "A", &[("Forest", 2), ("Sol Ring", 1)]),
        deck("b", "B", &[("Forest", 1), ("Island", 4)]),
    ];

    let analysis = analyze(&collection, &decks);

    assert_eq!(analysis.total_unique_cards, 3);
    assert_eq!(analysis.total_cards_needed, 8);
    assert_eq!(analysis.cards_with_shortage, 3);
}

#[test]
fn no_decks_gives_empty_analysis() {
    let analysis = analyze(&collection(&[("Forest", 1)]), &[]);
    assert_eq!(analysis, DeckAnalysis::default());
}

#[test]
fn repeated_analysis_is_identical() {
    let collection = collection(&[("Forest", 1)]);
    let decks = vec![
        deck("a", "A", &[("Forest", 2), ("Sol Ring", 1)]),
        deck("b", "B", &[("Forest", 1), ("Sol Ring", 1)]),
    ];
    assert_eq!(analyze(&collection, &decks), analyze(&collection, &decks));
}

#[test]
fn accented_names_sort_with_their_base_letter() {
    let decks = vec![deck(
        "a",
        "A",
        &[("Fblthp, the Lost", 1), ("Éomer, Marshal of Rohan", 1), ("Elesh Norn", 1)],
    )];
    let analysis = analyze(&Collection::default(), &decks);
    assert_eq!(
        names(&analysis.cards_not_owned),
        vec!["Elesh Norn", "Éomer, Marshal of Rohan", "Fblthp, the Lost"]
    );
}

#[test]
fn display_order_ties() {
    assert_eq!(display_order("ancestral", "Ancestral"), Ordering::Less);
    assert_eq!(display_order("Eomer", "Éomer"), Ordering::Less);
    assert_eq!(display_order("Forest", "Forest"), Ordering::Equal);
}

fn parsed_deck(id: &str, list: &str) -> Deck {
    Deck {
        cards: crate::parser::parse_card_list(list),
        ..deck(id, id, &[])
    }
}

#[test]
fn maximum_quantities_saturate_instead_of_overflowing() {
    let decks = vec![
        parsed_deck("a", "4294967295 Forest\n1 Island"),
        parsed_deck("b", "4294967295 Forest"),
    ];
    let collection = Collection::new(
        crate::parser::parse_card_list("4294967295 Forest\n4294967295 Forest"),
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
    );

    let analysis = analyze(&collection, &decks);

    let forest = &analysis.overlapping_cards[0];
    assert_eq!(forest.total_needed, u32::MAX);
    assert_eq!(forest.owned, u32::MAX);
    assert_eq!(forest.shortage, 0);
    assert_eq!(analysis.total_cards_needed, u32::MAX);
    assert_eq!(analysis.cards_with_shortage, 1);
}

#[test]
fn repeated_maximum_entries_in_one_deck_saturate() {
    let decks = vec![parsed_deck("a", "4294967295 Forest\n4294967295 Forest")];
    let analysis = analyze(&Collection::default(), &decks);

    let forest = &analysis.cards_not_owned[0];
    assert_eq!(forest.total_needed, u32::MAX);
    assert_eq!(forest.decks[0].quantity, u32::MAX);
}
