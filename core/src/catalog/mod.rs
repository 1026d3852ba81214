//! Entity catalog lookup tables.
//!
//! The catalog is the game's hero/item roster, supplied as JSON by an
//! external data source. This module builds the immutable lookup tables the
//! classification engine resolves line labels against:
//! - hero name -> hero entry (case-insensitive, canonical casing preserved)
//! - item name -> item entry
//! - the ordered ability list (ability-kind items carrying name and image)

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Item category in the game catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Ability,
    Upgrade,
}

/// One hero from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroEntry {
    pub id: u32,
    pub name: String,
}

/// One item from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub image: Option<String>,
}

/// An ability usable for note attribution: an ability-kind item that has
/// both a name and an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityEntry {
    pub name: String,
    pub image: String,
}

/// Errors raised while loading catalog files.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable name lookup tables over the catalog.
///
/// Lookups are case-insensitive exact matches and return entries with their
/// canonical catalog casing. When two entries share a name the first one
/// wins. The ability list keeps catalog order; that order is the tie-break
/// used by ability note attribution and must not be re-sorted.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    heroes: Vec<HeroEntry>,
    items: Vec<ItemEntry>,
    abilities: Vec<AbilityEntry>,
    hero_lookup: HashMap<String, usize>,
    item_lookup: HashMap<String, usize>,
}

impl EntityRegistry {
    pub fn new(heroes: Vec<HeroEntry>, items: Vec<ItemEntry>) -> Self {
        // The upstream catalog can list the same item name under several
        // entries; keep the first occurrence of each (name, kind) pair.
        let mut seen = HashMap::new();
        let items: Vec<ItemEntry> = items
            .into_iter()
            .filter(|item| seen.insert((item.name.clone(), item.kind), true).is_none())
            .collect();

        let mut hero_lookup = HashMap::with_capacity(heroes.len());
        for (idx, hero) in heroes.iter().enumerate() {
            hero_lookup.entry(hero.name.to_lowercase()).or_insert(idx);
        }

        let mut item_lookup = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            item_lookup.entry(item.name.to_lowercase()).or_insert(idx);
        }

        let abilities = items
            .iter()
            .filter(|item| item.kind == ItemKind::Ability && !item.name.is_empty())
            .filter_map(|item| {
                item.image.as_ref().map(|image| AbilityEntry {
                    name: item.name.clone(),
                    image: image.clone(),
                })
            })
            .collect();

        Self {
            heroes,
            items,
            abilities,
            hero_lookup,
            item_lookup,
        }
    }

    /// Load a registry from `heroes.json` and `items.json` in a directory.
    pub fn load(catalog_dir: &Path) -> Result<Self, CatalogError> {
        let heroes: Vec<HeroEntry> = load_json(&catalog_dir.join("heroes.json"))?;
        let items: Vec<ItemEntry> = load_json(&catalog_dir.join("items.json"))?;
        let registry = Self::new(heroes, items);
        tracing::debug!(
            heroes = registry.heroes.len(),
            items = registry.items.len(),
            abilities = registry.abilities.len(),
            "catalog loaded"
        );
        Ok(registry)
    }

    /// Resolve a line label against the hero roster.
    pub fn hero_by_label(&self, label: &str) -> Option<&HeroEntry> {
        self.hero_lookup
            .get(&label.to_lowercase())
            .map(|&idx| &self.heroes[idx])
    }

    /// Resolve a line label against the item roster.
    pub fn item_by_label(&self, label: &str) -> Option<&ItemEntry> {
        self.item_lookup
            .get(&label.to_lowercase())
            .map(|&idx| &self.items[idx])
    }

    /// Abilities in catalog order.
    pub fn abilities(&self) -> &[AbilityEntry] {
        &self.abilities
    }

    pub fn heroes(&self) -> &[HeroEntry] {
        &self.heroes
    }

    pub fn items(&self) -> &[ItemEntry] {
        &self.items
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
