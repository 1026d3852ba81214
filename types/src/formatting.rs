//! Display formatting helpers for changelog rendering.
//!
//! Date formatting and note segmentation go through this module so every
//! consumer renders changelogs the same way.

use crate::content::Note;
use chrono::{DateTime, Datelike, Utc};

/// Ordinal suffix for a day of the month.
fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Format a date for display with an ordinal day suffix.
///
/// # Examples
/// ```
/// use patchlog_types::formatting::format_date;
/// let date = "2025-01-01T00:00:00Z".parse().unwrap();
/// assert_eq!(format_date(&date), "January 1st, 2025");
/// ```
pub fn format_date(date: &DateTime<Utc>) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// A slice of note text, flagged when it should be rendered with emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub emphasized: bool,
}

/// Split a note's text into plain and emphasized segments along its scaling
/// spans, in text order. Concatenating the segments reproduces the text.
pub fn note_segments(note: &Note) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for pattern in &note.patterns {
        if pattern.start > cursor {
            segments.push(Segment {
                text: &note.text[cursor..pattern.start],
                emphasized: false,
            });
        }
        segments.push(Segment {
            text: &note.text[pattern.start..pattern.end],
            emphasized: true,
        });
        cursor = pattern.end;
    }

    if cursor < note.text.len() {
        segments.push(Segment {
            text: &note.text[cursor..],
            emphasized: false,
        });
    }

    segments
}

/// Split text into plain and emphasized segments along the non-overlapping,
/// left-to-right occurrences of `query` (ASCII case-insensitive). A blank
/// query yields the whole text as one plain segment.
pub fn search_segments<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let query = query.trim();
    if query.is_empty() || query.len() > text.len() {
        return vec![Segment {
            text,
            emphasized: false,
        }];
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut i = 0;
    while i + query.len() <= text.len() {
        match text.get(i..i + query.len()) {
            Some(window) if window.eq_ignore_ascii_case(query) => {
                if i > cursor {
                    segments.push(Segment {
                        text: &text[cursor..i],
                        emphasized: false,
                    });
                }
                segments.push(Segment {
                    text: window,
                    emphasized: true,
                });
                cursor = i + query.len();
                i = cursor;
            }
            _ => i += 1,
        }
    }

    if cursor < text.len() {
        segments.push(Segment {
            text: &text[cursor..],
            emphasized: false,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ScalingPattern;

    fn date(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_date_ordinals() {
        assert_eq!(format_date(&date("2025-01-01T00:00:00Z")), "January 1st, 2025");
        assert_eq!(format_date(&date("2025-03-02T00:00:00Z")), "March 2nd, 2025");
        assert_eq!(format_date(&date("2025-03-03T00:00:00Z")), "March 3rd, 2025");
        assert_eq!(format_date(&date("2025-06-04T00:00:00Z")), "June 4th, 2025");
        assert_eq!(format_date(&date("2025-06-11T00:00:00Z")), "June 11th, 2025");
        assert_eq!(format_date(&date("2025-06-12T00:00:00Z")), "June 12th, 2025");
        assert_eq!(format_date(&date("2025-06-13T00:00:00Z")), "June 13th, 2025");
        assert_eq!(format_date(&date("2025-06-21T00:00:00Z")), "June 21st, 2025");
        assert_eq!(format_date(&date("2025-12-31T00:00:00Z")), "December 31st, 2025");
    }

    #[test]
    fn test_note_segments() {
        let note = Note {
            text: "Damage increased from 80 to 90".to_string(),
            patterns: vec![ScalingPattern {
                text: "80 to 90".to_string(),
                start: 22,
                end: 30,
            }],
        };

        let segments = note_segments(&note);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Damage increased from ");
        assert!(!segments[0].emphasized);
        assert_eq!(segments[1].text, "80 to 90");
        assert!(segments[1].emphasized);

        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, note.text);
    }

    #[test]
    fn test_note_segments_no_patterns() {
        let note = Note::plain("General bug fixes");
        let segments = note_segments(&note);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "General bug fixes");
        assert!(!segments[0].emphasized);
    }

    #[test]
    fn test_search_segments() {
        let segments = search_segments("Metal Skin and metal skin", "metal");
        let emphasized: Vec<&str> = segments
            .iter()
            .filter(|s| s.emphasized)
            .map(|s| s.text)
            .collect();
        assert_eq!(emphasized, vec!["Metal", "metal"]);

        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, "Metal Skin and metal skin");
    }

    #[test]
    fn test_search_segments_blank_query() {
        let segments = search_segments("anything", "   ");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].emphasized);
    }
}
