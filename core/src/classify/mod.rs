//! Content classification engine.
//!
//! Walks an announcement document line by line and buckets every surviving
//! line under its owner: a hero, an item, an unrecognized labelled aside,
//! or the general notes block. Ability attribution inside hero records is a
//! separate post-pass ([`extract_abilities`]).

use memchr::memchr;
use patchlog_types::{AbilityOnlyRecord, ChangelogContent, HeroChangeRecord, ItemChangeRecord};

use crate::catalog::{EntityRegistry, HeroEntry, ItemEntry};
use crate::document::{Document, bullet_prefix_len};
use crate::scaling::extract_patterns;

mod ability_extract;
pub use ability_extract::extract_abilities;

#[cfg(test)]
mod classify_tests;

/// Classification result for a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass<'a> {
    /// Line labelled with a known hero name; `text` is what follows the
    /// label.
    Hero { hero: &'a HeroEntry, text: &'a str },
    /// Line labelled with a known item name.
    Item { item: &'a ItemEntry, text: &'a str },
    /// Labelled line whose label matched neither registry. The label is
    /// preserved as the fallback bucket key so nothing the author wrote is
    /// dropped.
    AbilityLabel { label: &'a str, text: &'a str },
    /// Prose without an owner.
    General { text: &'a str },
}

/// Whether a raw line takes part in classification at all.
///
/// Bracket-only headings (`[General]`) and decorative lines that start with
/// neither a bullet marker nor an alphanumeric character are dropped.
pub fn is_candidate_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
        return false;
    }
    bullet_prefix_len(line).is_some()
        || trimmed.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
}

/// Classify one candidate line against the registry.
///
/// Strips a leading bullet marker, splits at the first `:`, and resolves
/// the label case-insensitively: heroes take precedence over items, and an
/// unmatched label falls back to [`LineClass::AbilityLabel`]. Returns None
/// when nothing is left after stripping the bullet.
pub fn classify_line<'a>(line: &'a str, registry: &'a EntityRegistry) -> Option<LineClass<'a>> {
    let cleaned = match bullet_prefix_len(line) {
        Some(len) => line[len..].trim(),
        None => line.trim(),
    };
    if cleaned.is_empty() {
        return None;
    }

    let Some(colon) = memchr(b':', cleaned.as_bytes()) else {
        return Some(LineClass::General { text: cleaned });
    };

    let label = cleaned[..colon].trim();
    let text = cleaned[colon + 1..].trim();

    if let Some(hero) = registry.hero_by_label(label) {
        return Some(LineClass::Hero { hero, text });
    }
    if let Some(item) = registry.item_by_label(label) {
        return Some(LineClass::Item { item, text });
    }
    Some(LineClass::AbilityLabel { label, text })
}

/// Classify a whole document into per-entity change records.
///
/// Map keys are the canonical registry names; records are created on first
/// mention and accumulate notes in document order.
pub fn classify_document(document: &Document, registry: &EntityRegistry) -> ChangelogContent {
    let mut content = ChangelogContent::default();

    for line in document.lines() {
        if !is_candidate_line(line) {
            continue;
        }
        let Some(class) = classify_line(line, registry) else {
            continue;
        };

        match class {
            LineClass::General { text } => content.notes.push(extract_patterns(text)),
            LineClass::Hero { hero, text } => {
                content
                    .heroes
                    .entry(hero.name.clone())
                    .or_insert_with(|| HeroChangeRecord::new(hero.id))
                    .notes
                    .push(extract_patterns(text));
            }
            LineClass::Item { item, text } => {
                content
                    .items
                    .entry(item.name.clone())
                    .or_insert_with(|| ItemChangeRecord::new(item.id))
                    .notes
                    .push(extract_patterns(text));
            }
            LineClass::AbilityLabel { label, text } => {
                content
                    .abilities
                    .entry(label.to_string())
                    .or_insert_with(AbilityOnlyRecord::default)
                    .notes
                    .push(extract_patterns(text));
            }
        }
    }

    tracing::debug!(
        general = content.notes.len(),
        heroes = content.heroes.len(),
        items = content.items.len(),
        unmatched_labels = content.abilities.len(),
        "classified announcement"
    );

    content
}

/// Full classification pipeline: document walk plus ability attribution.
pub fn classify_announcement(document: &Document, registry: &EntityRegistry) -> ChangelogContent {
    let mut content = classify_document(document, registry);
    extract_abilities(&mut content, registry.abilities());
    content
}
