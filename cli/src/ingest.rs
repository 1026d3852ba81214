//! Announcement file ingestion.
//!
//! Each announcement is one TOML file: id, title, date, optional raw
//! author string, and the body text of the patch notes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Raw author field, feed-style (`email@example.com (Name)`)
    #[serde(default)]
    pub author: Option<String>,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum IngestError {
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
        source: toml::de::Error,
    },
}

pub fn load_announcement(path: &Path) -> Result<Announcement, IngestError> {
    let contents = fs::read_to_string(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| IngestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// All announcement files in a directory, sorted by file name for
/// deterministic processing order.
pub fn announcement_paths(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let entries = fs::read_dir(dir).map_err(|e| IngestError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Extract a display author from a feed-style author string.
///
/// Feeds publish `email@example.com (Author Name)`; only the name matters.
/// Bare emails and blank input reduce to `"Unknown"`, anything else passes
/// through trimmed.
pub fn parse_author(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or("Unknown").trim();
    if raw.is_empty() {
        return "Unknown".to_string();
    }

    if let Some(open) = raw.find('(') {
        if let Some(close) = raw[open + 1..].find(')') {
            let inner = &raw[open + 1..open + 1 + close];
            if !inner.is_empty() {
                return inner.trim().to_string();
            }
        }
    }

    if raw.contains('@') {
        "Unknown".to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_author_feed_format() {
        assert_eq!(parse_author(Some("noreply@example.com (Yoshi)")), "Yoshi");
        assert_eq!(parse_author(Some("(Yoshi)")), "Yoshi");
        assert_eq!(parse_author(Some("mail@example.com ( Yoshi )")), "Yoshi");
    }

    #[test]
    fn test_parse_author_fallbacks() {
        assert_eq!(parse_author(Some("Yoshi")), "Yoshi");
        assert_eq!(parse_author(Some("noreply@example.com")), "Unknown");
        assert_eq!(parse_author(Some("   ")), "Unknown");
        assert_eq!(parse_author(None), "Unknown");
    }

    #[test]
    fn test_parse_announcement_toml() {
        let toml = r#"
id = "post-1234"
title = "Update 5/29/2025"
date = "2025-05-29T17:00:00Z"
author = "noreply@example.com (Yoshi)"
body = """
[General]
- Bebop: Hook cooldown reduced from 20s to 18s
"""
"#;

        let announcement: Announcement = toml::from_str(toml).unwrap();
        assert_eq!(announcement.id, "post-1234");
        assert_eq!(announcement.title, "Update 5/29/2025");
        assert_eq!(
            parse_author(announcement.author.as_deref()),
            "Yoshi"
        );
        assert!(announcement.body.contains("Hook cooldown"));
    }
}
