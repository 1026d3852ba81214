//! Filter criteria built from browse-request parameters.

use std::collections::HashSet;

/// The filter state of one browse request.
///
/// All three fields are independently optional; an empty set or a blank
/// query means that dimension is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub selected_hero_names: HashSet<String>,
    pub selected_item_names: HashSet<String>,
    pub search_query: String,
}

impl FilterCriteria {
    /// Build criteria from raw request parameters: comma-separated hero and
    /// item name lists plus a free-text query.
    pub fn from_params(hero: &str, item: &str, query: &str) -> Self {
        Self {
            selected_hero_names: parse_csv(hero),
            selected_item_names: parse_csv(item),
            search_query: query.to_string(),
        }
    }

    /// The search query with surrounding whitespace removed; empty when the
    /// search dimension is inactive.
    pub fn search(&self) -> &str {
        self.search_query.trim()
    }

    pub fn has_hero_filter(&self) -> bool {
        !self.selected_hero_names.is_empty()
    }

    pub fn has_item_filter(&self) -> bool {
        !self.selected_item_names.is_empty()
    }

    /// True when no dimension is active at all.
    pub fn is_inactive(&self) -> bool {
        self.selected_hero_names.is_empty()
            && self.selected_item_names.is_empty()
            && self.search().is_empty()
    }
}

/// Split a comma-separated parameter value, trimming entries and dropping
/// empties.
pub fn parse_csv(value: &str) -> HashSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
