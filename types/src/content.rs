//! Classified changelog content model.
//!
//! These types are the persisted shape of a parsed announcement. The JSON
//! produced here is read back by both rendering and filtering, so field
//! names and nesting are a stable contract - serde renames must not change.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A substring span inside a note's text describing a numeric value or a
/// value transition (`7/9/13/20`, `80 to 90`, `10% -> 15%`).
///
/// `start`/`end` are byte offsets into the owning note's text and always
/// satisfy `0 <= start < end <= text.len()`; spans of one note never
/// overlap and are sorted ascending by `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingPattern {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// One line of change text with its detected scaling spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    #[serde(default)]
    pub patterns: Vec<ScalingPattern>,
}

impl Note {
    /// Note with no scaling spans.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            patterns: Vec::new(),
        }
    }
}

/// Notes grouped under one ability of a hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityChange {
    pub ability_name: String,
    pub ability_image: String,
    pub notes: Vec<Note>,
}

/// Everything one changelog says about a single hero.
///
/// `notes` and `abilities` partition the hero's lines: a note is either
/// hero-general or belongs to exactly one ability group, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroChangeRecord {
    pub id: u32,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub abilities: Vec<AbilityChange>,
}

impl HeroChangeRecord {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            notes: Vec::new(),
            abilities: Vec::new(),
        }
    }
}

/// Everything one changelog says about a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChangeRecord {
    pub id: u32,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl ItemChangeRecord {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            notes: Vec::new(),
        }
    }
}

/// Fallback bucket for a labelled line whose label matched neither the hero
/// nor the item registry. Keyed by the label so nothing the author wrote is
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityOnlyRecord {
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// The classified content of one announcement.
///
/// Map keys are the canonical display names from the entity registry
/// (registry casing, not source casing), in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogContent {
    /// Prose not attributable to any specific hero, item, or ability.
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub heroes: IndexMap<String, HeroChangeRecord>,
    #[serde(default)]
    pub items: IndexMap<String, ItemChangeRecord>,
    #[serde(default)]
    pub abilities: IndexMap<String, AbilityOnlyRecord>,
}

/// One game-update announcement with its classified content.
///
/// Built once per announcement and immutable afterwards; the filter engine
/// only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changelog {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub author: String,
    pub content: ChangelogContent,
    /// Flat text rendering of the announcement body, used for search.
    pub plain_text: String,
}
