//! Build and query pipelines over a changelogs directory.

use std::fs;
use std::path::{Path, PathBuf};

use patchlog_core::catalog::{CatalogError, EntityRegistry};
use patchlog_core::classify::classify_announcement;
use patchlog_core::document::Document;
use patchlog_core::filter::{self, EntityKind};
use patchlog_types::{Changelog, FilterCriteria};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::ingest::{self, IngestError};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize {id}: {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct BuildSummary {
    pub changelog_count: usize,
    pub hero_refs: usize,
    pub item_refs: usize,
}

/// Index entry written alongside the per-changelog files.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexEntry<'a> {
    id: &'a str,
    title: &'a str,
    date: &'a chrono::DateTime<chrono::Utc>,
    author: &'a str,
}

/// Parse and classify every announcement in the directory.
///
/// Announcements are independent, so classification fans out across a
/// thread pool; the result is sorted newest first.
fn build_changelogs(
    catalog_dir: &Path,
    changelogs_dir: &Path,
) -> Result<Vec<Changelog>, BuildError> {
    let registry = EntityRegistry::load(catalog_dir)?;
    let paths = ingest::announcement_paths(changelogs_dir)?;

    let mut changelogs: Vec<Changelog> = paths
        .par_iter()
        .map(|path| -> Result<Changelog, BuildError> {
            let announcement = ingest::load_announcement(path)?;
            let document = Document::from_plain_text(&announcement.body);
            let content = classify_announcement(&document, &registry);
            tracing::debug!(id = %announcement.id, heroes = content.heroes.len(), "classified");
            Ok(Changelog {
                plain_text: document.plain_text(),
                id: announcement.id,
                title: announcement.title,
                date: announcement.date,
                author: ingest::parse_author(announcement.author.as_deref()),
                content,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    changelogs.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(changelogs)
}

/// Build every changelog and write the classified JSON to `output_dir`.
pub fn build(
    catalog_dir: &Path,
    changelogs_dir: &Path,
    output_dir: &Path,
) -> Result<BuildSummary, BuildError> {
    let changelogs = build_changelogs(catalog_dir, changelogs_dir)?;

    fs::create_dir_all(output_dir).map_err(|e| BuildError::Write {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    for changelog in &changelogs {
        let json = serde_json::to_string_pretty(changelog).map_err(|e| BuildError::Serialize {
            id: changelog.id.clone(),
            source: e,
        })?;
        let path = output_dir.join(format!("{}.json", changelog.id));
        fs::write(&path, json).map_err(|e| BuildError::Write { path, source: e })?;
    }

    let index: Vec<IndexEntry> = changelogs
        .iter()
        .map(|c| IndexEntry {
            id: &c.id,
            title: &c.title,
            date: &c.date,
            author: &c.author,
        })
        .collect();
    let index_path = output_dir.join("index.json");
    let json = serde_json::to_string_pretty(&index).map_err(|e| BuildError::Serialize {
        id: "index".to_string(),
        source: e,
    })?;
    fs::write(&index_path, json).map_err(|e| BuildError::Write {
        path: index_path,
        source: e,
    })?;

    let summary = BuildSummary {
        changelog_count: changelogs.len(),
        hero_refs: changelogs.iter().map(|c| c.content.heroes.len()).sum(),
        item_refs: changelogs.iter().map(|c| c.content.items.len()).sum(),
    };
    tracing::info!(
        changelogs = summary.changelog_count,
        hero_refs = summary.hero_refs,
        item_refs = summary.item_refs,
        "build finished"
    );
    Ok(summary)
}

/// Build in memory, apply filter criteria, and print the result.
pub fn query(
    catalog_dir: &Path,
    changelogs_dir: &Path,
    hero: &str,
    item: &str,
    search: &str,
) -> Result<(), BuildError> {
    let changelogs = build_changelogs(catalog_dir, changelogs_dir)?;
    let criteria = FilterCriteria::from_params(hero, item, search);

    let matched = filter::filter_changelogs(&changelogs, &criteria);
    println!("{} of {} changelogs match", matched.len(), changelogs.len());

    for changelog in matched {
        println!();
        println!(
            "{} - {} ({})",
            changelog.date.format("%Y-%m-%d"),
            changelog.title,
            changelog.id
        );
        print_visibility(changelog, &criteria, EntityKind::Hero, "heroes");
        print_visibility(changelog, &criteria, EntityKind::Item, "items");
        if filter::show_general_notes(changelog, &criteria) {
            let shown = filter::filtered_general_notes(changelog, &criteria)
                .map(|notes| notes.len())
                .unwrap_or(0);
            println!("  general notes: {shown} shown");
        }
    }
    Ok(())
}

fn print_visibility(
    changelog: &Changelog,
    criteria: &FilterCriteria,
    kind: EntityKind,
    label: &str,
) {
    match filter::visible_names(changelog, criteria, kind) {
        None => println!("  {label}: all"),
        Some(names) if names.is_empty() => println!("  {label}: none"),
        Some(names) => {
            let mut names: Vec<String> = names.into_iter().collect();
            names.sort();
            println!("  {label}: {}", names.join(", "));
        }
    }
}
