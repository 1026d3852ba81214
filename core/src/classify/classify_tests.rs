//! Tests for document classification and ability attribution.

use patchlog_types::Note;

use super::*;
use crate::catalog::{EntityRegistry, HeroEntry, ItemEntry, ItemKind};
use crate::document::Document;

fn hero(id: u32, name: &str) -> HeroEntry {
    HeroEntry {
        id,
        name: name.to_string(),
    }
}

fn ability_item(id: u32, name: &str, image: &str) -> ItemEntry {
    ItemEntry {
        id,
        name: name.to_string(),
        kind: ItemKind::Ability,
        image: Some(image.to_string()),
    }
}

fn upgrade_item(id: u32, name: &str) -> ItemEntry {
    ItemEntry {
        id,
        name: name.to_string(),
        kind: ItemKind::Upgrade,
        image: None,
    }
}

/// Registry with a handful of heroes, shop items, and abilities.
fn test_registry() -> EntityRegistry {
    EntityRegistry::new(
        vec![
            hero(1, "Abrams"),
            hero(2, "Bebop"),
            hero(3, "Seven"),
            hero(4, "Infernus"),
        ],
        vec![
            upgrade_item(101, "Superior Stamina"),
            upgrade_item(102, "Metal Skin"),
            ability_item(201, "Fireball", "fireball.webp"),
            ability_item(202, "Hook", "hook.webp"),
        ],
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Line filtering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_bracket_headings_are_dropped() {
    assert!(!is_candidate_line("[General]"));
    assert!(!is_candidate_line("  [ Hero Changes ]  "));
    // Not bracket-only, but still dropped: starts with neither a bullet
    // nor an alphanumeric character
    assert!(!is_candidate_line("[General] bug fixes"));
}

#[test]
fn test_decorative_lines_are_dropped() {
    assert!(!is_candidate_line(""));
    assert!(!is_candidate_line("   "));
    assert!(!is_candidate_line("====="));
    assert!(!is_candidate_line("> quoted aside"));
}

#[test]
fn test_bullet_and_alnum_lines_survive() {
    assert!(is_candidate_line("- Bebop: Hook change"));
    assert!(is_candidate_line("• General change"));
    assert!(is_candidate_line("Plain prose line"));
    assert!(is_candidate_line("3 lanes instead of 4"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Line classification
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_line_without_colon_is_general() {
    let registry = test_registry();
    let class = classify_line("- Fixed various crashes", &registry).unwrap();
    assert_eq!(
        class,
        LineClass::General {
            text: "Fixed various crashes"
        }
    );
}

#[test]
fn test_hero_label_matches_case_insensitively() {
    let registry = test_registry();
    let class = classify_line("- bebop: Hook cooldown reduced", &registry).unwrap();
    match class {
        LineClass::Hero { hero, text } => {
            assert_eq!(hero.name, "Bebop");
            assert_eq!(text, "Hook cooldown reduced");
        }
        other => panic!("expected hero line, got {other:?}"),
    }
}

#[test]
fn test_item_label_after_hero_miss() {
    let registry = test_registry();
    let class = classify_line("Superior Stamina: Cost reduced", &registry).unwrap();
    match class {
        LineClass::Item { item, text } => {
            assert_eq!(item.id, 101);
            assert_eq!(text, "Cost reduced");
        }
        other => panic!("expected item line, got {other:?}"),
    }
}

#[test]
fn test_unmatched_label_falls_back() {
    let registry = test_registry();
    let class = classify_line("- Denizens: Now roam the map", &registry).unwrap();
    assert_eq!(
        class,
        LineClass::AbilityLabel {
            label: "Denizens",
            text: "Now roam the map"
        }
    );
}

#[test]
fn test_split_happens_at_first_colon() {
    let registry = test_registry();
    let class = classify_line("- Abrams: Fireball: Damage up", &registry).unwrap();
    match class {
        LineClass::Hero { hero, text } => {
            assert_eq!(hero.name, "Abrams");
            assert_eq!(text, "Fireball: Damage up");
        }
        other => panic!("expected hero line, got {other:?}"),
    }
}

#[test]
fn test_bare_bullet_is_skipped() {
    let registry = test_registry();
    assert!(classify_line("-  ", &registry).is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Document classification
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hero_note_without_patterns() {
    let registry = test_registry();
    let doc = Document::from_plain_text("Bebop: Hook cooldown reduced from 20s to 18s");
    let content = classify_document(&doc, &registry);

    assert_eq!(
        content.heroes["Bebop"].notes,
        vec![Note::plain("Hook cooldown reduced from 20s to 18s")]
    );
    assert!(content.items.is_empty());
    assert!(content.notes.is_empty());
}

#[test]
fn test_item_note_with_change_span() {
    let registry = test_registry();
    let doc = Document::from_plain_text("- Superior Stamina: Cost reduced from 6200 to 5800");
    let content = classify_document(&doc, &registry);

    let notes = &content.items["Superior Stamina"].notes;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "Cost reduced from 6200 to 5800");
    assert_eq!(notes[0].patterns.len(), 1);
    assert_eq!(notes[0].patterns[0].text, "6200 to 5800");
    assert_eq!(
        &notes[0].text[notes[0].patterns[0].start..notes[0].patterns[0].end],
        "6200 to 5800"
    );
}

#[test]
fn test_records_accumulate_in_document_order() {
    let registry = test_registry();
    let doc = Document::from_plain_text(
        "[ Heroes ]\n\
         - Bebop: Hook range increased\n\
         - Seven: Base damage reduced\n\
         - Bebop: Bomb damage reduced\n\
         \n\
         General map adjustments",
    );
    let content = classify_document(&doc, &registry);

    let keys: Vec<&String> = content.heroes.keys().collect();
    assert_eq!(keys, vec!["Bebop", "Seven"], "first-appearance order");
    assert_eq!(content.heroes["Bebop"].notes.len(), 2);
    assert_eq!(content.heroes["Bebop"].id, 2);
    assert_eq!(content.notes, vec![Note::plain("General map adjustments")]);
}

#[test]
fn test_canonical_casing_used_for_keys() {
    let registry = test_registry();
    let doc = Document::from_plain_text("- INFERNUS: Burn damage reduced");
    let content = classify_document(&doc, &registry);
    assert!(content.heroes.contains_key("Infernus"));
}

#[test]
fn test_unmatched_label_lands_in_abilities_bucket() {
    let registry = test_registry();
    let doc = Document::from_plain_text("- Midboss: Respawn time increased from 8 to 10");
    let content = classify_document(&doc, &registry);

    assert!(content.heroes.is_empty());
    assert!(content.items.is_empty());
    let record = &content.abilities["Midboss"];
    assert_eq!(record.notes[0].text, "Respawn time increased from 8 to 10");
    assert_eq!(record.notes[0].patterns[0].text, "8 to 10");
}

// ─────────────────────────────────────────────────────────────────────────────
// Ability extraction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_ability_note_moves_into_group() {
    let registry = test_registry();
    let doc = Document::from_plain_text(
        "- Abrams: Fireball: Damage increased from 10 to 20\n\
         - Abrams: Base health increased",
    );
    let content = classify_announcement(&doc, &registry);

    let abrams = &content.heroes["Abrams"];
    assert_eq!(abrams.abilities.len(), 1);
    let fireball = &abrams.abilities[0];
    assert_eq!(fireball.ability_name, "Fireball");
    assert_eq!(fireball.ability_image, "fireball.webp");
    assert_eq!(fireball.notes.len(), 1);
    assert_eq!(fireball.notes[0].text, "Damage increased from 10 to 20");

    assert_eq!(abrams.notes, vec![Note::plain("Base health increased")]);
}

#[test]
fn test_ability_patterns_follow_the_stripped_text() {
    let registry = test_registry();
    let doc = Document::from_plain_text("- Abrams: Fireball: Damage increased from 10 to 20");
    let content = classify_announcement(&doc, &registry);

    let note = &content.heroes["Abrams"].abilities[0].notes[0];
    assert_eq!(note.patterns.len(), 1);
    let pattern = &note.patterns[0];
    assert_eq!(pattern.text, "10 to 20");
    assert_eq!(&note.text[pattern.start..pattern.end], "10 to 20");
    assert_eq!(pattern.start, 22);
    assert_eq!(pattern.end, 30);
}

#[test]
fn test_ability_match_without_colon_uppercases_rest() {
    let registry = test_registry();
    let doc = Document::from_plain_text("- Bebop: Hook cooldown reduced");
    let content = classify_announcement(&doc, &registry);

    let bebop = &content.heroes["Bebop"];
    assert!(bebop.notes.is_empty());
    assert_eq!(bebop.abilities[0].ability_name, "Hook");
    assert_eq!(bebop.abilities[0].notes[0].text, "Cooldown reduced");
}

#[test]
fn test_ability_match_is_whole_word() {
    let registry = EntityRegistry::new(
        vec![hero(1, "Abrams")],
        vec![ability_item(201, "Fire", "fire.webp")],
    );
    let doc = Document::from_plain_text("- Abrams: Firerate increased");
    let content = classify_announcement(&doc, &registry);

    let abrams = &content.heroes["Abrams"];
    assert!(abrams.abilities.is_empty(), "'Fire' must not match 'Firerate'");
    assert_eq!(abrams.notes[0].text, "Firerate increased");
}

#[test]
fn test_catalog_order_breaks_prefix_ties() {
    // "Fire" is listed before "Fireball": the earlier entry wins even for a
    // line that names the longer ability.
    let registry = EntityRegistry::new(
        vec![hero(1, "Abrams")],
        vec![
            ability_item(201, "Fire", "fire.webp"),
            ability_item(202, "Fireball", "fireball.webp"),
        ],
    );
    let doc = Document::from_plain_text("- Abrams: Fire damage up\n- Abrams: Fireball radius up");
    let content = classify_announcement(&doc, &registry);

    let abrams = &content.heroes["Abrams"];
    let names: Vec<&str> = abrams
        .abilities
        .iter()
        .map(|a| a.ability_name.as_str())
        .collect();
    assert_eq!(names, vec!["Fire", "Fireball"]);
    assert_eq!(abrams.abilities[0].notes[0].text, "Damage up");
    // "Fireball radius up" starts with "Fire" followed by a word character,
    // so the tie-break never even applies; the longer name matches.
    assert_eq!(abrams.abilities[1].notes[0].text, "Radius up");
}

#[test]
fn test_groups_ordered_by_first_appearance() {
    let registry = test_registry();
    let doc = Document::from_plain_text(
        "- Bebop: Hook range up\n\
         - Bebop: Fireball damage up\n\
         - Bebop: Hook cooldown down",
    );
    let content = classify_announcement(&doc, &registry);

    let names: Vec<&str> = content.heroes["Bebop"]
        .abilities
        .iter()
        .map(|a| a.ability_name.as_str())
        .collect();
    assert_eq!(names, vec!["Hook", "Fireball"]);
    assert_eq!(content.heroes["Bebop"].abilities[0].notes.len(), 2);
}

#[test]
fn test_extract_abilities_is_a_fixed_point() {
    let registry = test_registry();
    let doc = Document::from_plain_text(
        "- Abrams: Fireball: Damage increased from 10 to 20\n\
         - Abrams: Base health increased\n\
         - Bebop: Hook range up",
    );
    let mut content = classify_announcement(&doc, &registry);
    let snapshot = content.clone();

    extract_abilities(&mut content, registry.abilities());
    assert_eq!(content, snapshot);
}
