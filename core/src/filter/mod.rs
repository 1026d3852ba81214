//! Filter and visibility resolution.
//!
//! Read-side queries over classified changelogs. Given the filter state of
//! one browse request this module decides which changelogs match at all,
//! which hero/item sections of a matching changelog should be expanded, and
//! whether (and which of) the general notes should surface.
//!
//! Everything here is a pure function over an already-built [`Changelog`];
//! nothing is mutated and no entity name is ever invented - every returned
//! name is a key of the changelog's own content maps.

use std::collections::HashSet;

use patchlog_types::{Changelog, ChangelogContent, FilterCriteria, Note};


/// Which entity dimension a visibility query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Hero,
    Item,
}

/// Whether a changelog satisfies the criteria.
///
/// Every selected hero must have a section, every selected item must have a
/// section, and a non-blank search query must hit the title or the plain
/// text. All active clauses are ANDed.
pub fn matches(changelog: &Changelog, criteria: &FilterCriteria) -> bool {
    if !criteria
        .selected_hero_names
        .iter()
        .all(|name| changelog.content.heroes.contains_key(name))
    {
        return false;
    }
    if !criteria
        .selected_item_names
        .iter()
        .all(|name| changelog.content.items.contains_key(name))
    {
        return false;
    }

    let query = criteria.search();
    if !query.is_empty() {
        let query = query.to_lowercase();
        if !changelog.title.to_lowercase().contains(&query)
            && !changelog.plain_text.to_lowercase().contains(&query)
        {
            return false;
        }
    }
    true
}

/// Apply [`matches`] across a list, preserving order.
pub fn filter_changelogs<'a>(
    changelogs: &'a [Changelog],
    criteria: &FilterCriteria,
) -> Vec<&'a Changelog> {
    changelogs
        .iter()
        .filter(|changelog| matches(changelog, criteria))
        .collect()
}

/// Which entity sections of `kind` a renderer should expand.
///
/// `None` means "no filtering applies to this kind - show everything".
/// `Some(empty)` is a real answer: either the opposite kind is filtered and
/// this kind is suppressed, or a search matched nothing of this kind.
pub fn visible_names(
    changelog: &Changelog,
    criteria: &FilterCriteria,
    kind: EntityKind,
) -> Option<HashSet<String>> {
    let (selected, other) = match kind {
        EntityKind::Hero => (&criteria.selected_hero_names, &criteria.selected_item_names),
        EntityKind::Item => (&criteria.selected_item_names, &criteria.selected_hero_names),
    };
    let query = criteria.search();

    // Nothing active for this kind: show all, unless the opposite kind is
    // filtered, which suppresses unfiltered display of this one.
    if selected.is_empty() && query.is_empty() {
        return if other.is_empty() {
            None
        } else {
            Some(HashSet::new())
        };
    }

    // Selection only: membership, no text scanning
    if !selected.is_empty() && query.is_empty() {
        return Some(collect_names(&changelog.content, kind, Some(selected), None));
    }

    let query = query.to_lowercase();

    // A title or general-note hit illuminates every section of this kind
    if matches_general_content(changelog, &query) {
        return Some(collect_names(&changelog.content, kind, None, None));
    }

    let matched = collect_names(&changelog.content, kind, None, Some(&query));
    if selected.is_empty() {
        Some(matched)
    } else {
        Some(matched.intersection(selected).cloned().collect())
    }
}

/// Whether the general notes block should surface for this filter state.
///
/// True on a search hit against the title or a general note, and also when
/// a selected entity has no dedicated section here but is mentioned inside
/// a general note - the prose mention is the only place to show it.
pub fn show_general_notes(changelog: &Changelog, criteria: &FilterCriteria) -> bool {
    if criteria.is_inactive() {
        return false;
    }

    let query = criteria.search();
    if !query.is_empty() && matches_general_content(changelog, &query.to_lowercase()) {
        return true;
    }

    criteria
        .selected_hero_names
        .iter()
        .any(|name| mentioned_only_in_general(changelog, name, EntityKind::Hero))
        || criteria
            .selected_item_names
            .iter()
            .any(|name| mentioned_only_in_general(changelog, name, EntityKind::Item))
}

/// The general notes relevant to this filter state: notes containing the
/// search query or any selected entity name. `None` when nothing is active;
/// an empty list is a real "no general note is relevant" answer.
pub fn filtered_general_notes<'a>(
    changelog: &'a Changelog,
    criteria: &FilterCriteria,
) -> Option<Vec<&'a Note>> {
    if criteria.is_inactive() {
        return None;
    }

    let query = criteria.search();
    let query = (!query.is_empty()).then(|| query.to_lowercase());
    let selected: Vec<String> = criteria
        .selected_hero_names
        .iter()
        .chain(criteria.selected_item_names.iter())
        .map(|name| name.to_lowercase())
        .collect();

    Some(
        changelog
            .content
            .notes
            .iter()
            .filter(|note| {
                let text = note.text.to_lowercase();
                query.as_deref().is_some_and(|q| text.contains(q))
                    || selected.iter().any(|name| text.contains(name))
            })
            .collect(),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Entity names of `kind` present in the content, optionally restricted to
/// a selection and/or to entries whose name or notes contain a lowercased
/// query.
fn collect_names(
    content: &ChangelogContent,
    kind: EntityKind,
    selected: Option<&HashSet<String>>,
    query: Option<&str>,
) -> HashSet<String> {
    let entries: Vec<(&String, &Vec<Note>)> = match kind {
        EntityKind::Hero => content
            .heroes
            .iter()
            .map(|(name, record)| (name, &record.notes))
            .collect(),
        EntityKind::Item => content
            .items
            .iter()
            .map(|(name, record)| (name, &record.notes))
            .collect(),
    };

    let mut result = HashSet::new();
    for (name, notes) in entries {
        if selected.is_some_and(|sel| !sel.contains(name)) {
            continue;
        }
        if let Some(query) = query {
            let name_hit = name.to_lowercase().contains(query);
            let note_hit = notes
                .iter()
                .any(|note| note.text.to_lowercase().contains(query));
            if !name_hit && !note_hit {
                continue;
            }
        }
        result.insert(name.clone());
    }
    result
}

/// Whether a lowercased query hits the title or any general note.
fn matches_general_content(changelog: &Changelog, query: &str) -> bool {
    changelog.title.to_lowercase().contains(query)
        || changelog
            .content
            .notes
            .iter()
            .any(|note| note.text.to_lowercase().contains(query))
}

/// Whether `name` has no dedicated section of `kind` but shows up inside a
/// general note.
fn mentioned_only_in_general(changelog: &Changelog, name: &str, kind: EntityKind) -> bool {
    let has_section = match kind {
        EntityKind::Hero => changelog.content.heroes.contains_key(name),
        EntityKind::Item => changelog.content.items.contains_key(name),
    };
    if has_section {
        return false;
    }

    let name = name.to_lowercase();
    changelog
        .content
        .notes
        .iter()
        .any(|note| note.text.to_lowercase().contains(&name))
}
