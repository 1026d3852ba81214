//! Ability attribution inside hero records.
//!
//! After classification every hero line sits in the hero's flat note list.
//! This pass re-scans those notes and moves the ones that open with a known
//! ability name into per-ability groups, so "Abrams: Fireball damage up"
//! renders under a Fireball heading with its icon.

use indexmap::IndexMap;
use patchlog_types::{AbilityChange, ChangelogContent, Note, ScalingPattern};

use crate::catalog::AbilityEntry;

/// Regroup hero notes under the abilities they mention.
///
/// For each note the abilities are tried in catalog order and the first
/// whole-word prefix match wins; when one ability name is a prefix of
/// another the earlier catalog entry decides, not the longer name. Matched
/// notes move into that ability's group (created on first use, in
/// first-appearance order) with the name stripped from the text;
/// non-matching notes keep their position in the hero's note list.
///
/// Running the pass again on its own output changes nothing: leftover
/// notes matched no ability, and grouped notes are not re-scanned.
pub fn extract_abilities(content: &mut ChangelogContent, abilities: &[AbilityEntry]) {
    for record in content.heroes.values_mut() {
        let mut groups: IndexMap<String, AbilityChange> = std::mem::take(&mut record.abilities)
            .into_iter()
            .map(|group| (group.ability_name.clone(), group))
            .collect();

        let mut remaining = Vec::new();
        for note in std::mem::take(&mut record.notes) {
            match match_ability(&note, abilities) {
                Some((ability, stripped)) => {
                    groups
                        .entry(ability.name.clone())
                        .or_insert_with(|| AbilityChange {
                            ability_name: ability.name.clone(),
                            ability_image: ability.image.clone(),
                            notes: Vec::new(),
                        })
                        .notes
                        .push(stripped);
                }
                None => remaining.push(note),
            }
        }

        record.notes = remaining;
        record.abilities = groups.into_values().collect();
    }
}

/// First ability (in catalog order) whose name is a whole-word prefix of
/// the note's text, together with the note rewritten without the prefix.
fn match_ability<'a>(note: &Note, abilities: &'a [AbilityEntry]) -> Option<(&'a AbilityEntry, Note)> {
    for ability in abilities {
        if let Some(prefix_len) = word_prefix_len(&note.text, &ability.name) {
            return Some((ability, strip_prefix(note, prefix_len)));
        }
    }
    None
}

/// Byte length of `name` matched case-insensitively at the start of `text`,
/// requiring a word boundary after the match. None when `text` does not
/// open with `name`.
fn word_prefix_len(text: &str, name: &str) -> Option<usize> {
    let mut text_chars = text.chars();
    let mut consumed = 0;
    for name_char in name.chars() {
        let text_char = text_chars.next()?;
        if !chars_eq_ignore_case(text_char, name_char) {
            return None;
        }
        consumed += text_char.len_utf8();
    }

    let last_is_word = name.chars().next_back().is_some_and(is_word_char);
    let next_is_word = text[consumed..].chars().next().is_some_and(is_word_char);
    (last_is_word != next_is_word).then_some(consumed)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Drop the matched ability name (plus a separating `:` and whitespace)
/// from the front of a note and uppercase the first remaining character.
/// Scaling spans are rebased to the shorter text; a span is kept only if it
/// still frames its original text at the shifted offsets.
fn strip_prefix(note: &Note, prefix_len: usize) -> Note {
    let mut removed = prefix_len;

    let rest = note.text[removed..].trim_start();
    removed = note.text.len() - rest.len();
    if let Some(after_colon) = rest.strip_prefix(':') {
        let rest = after_colon.trim_start();
        removed = note.text.len() - rest.len();
    }

    let stripped = note.text[removed..].trim_end();
    let text = uppercase_first(stripped);

    let patterns = note
        .patterns
        .iter()
        .filter_map(|p| {
            let start = p.start.checked_sub(removed)?;
            let end = p.end.checked_sub(removed)?;
            (text.get(start..end)? == p.text).then(|| ScalingPattern {
                text: p.text.clone(),
                start,
                end,
            })
        })
        .collect();

    Note { text, patterns }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
