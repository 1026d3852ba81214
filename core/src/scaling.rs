//! Scaling pattern detection.
//!
//! Scans note text for numeric spans worth emphasizing in the UI:
//! - slash-joined sequences: `7/9/13/20`, `1.5/2/2.5/3`
//! - value-change phrases: `80 to 90`, `10% -> 15%`, `6 → 4`
//!
//! Both passes collect matches left to right without overlap; a change
//! phrase whose span intersects an already-found sequence is discarded.

use patchlog_types::{Note, ScalingPattern};

/// Detect scaling spans in `text` and wrap it as a [`Note`].
///
/// Pure and deterministic; offsets in the result are byte offsets into
/// `text` and the returned spans are sorted ascending and non-overlapping.
pub fn extract_patterns(text: &str) -> Note {
    let bytes = text.as_bytes();

    let mut spans = find_sequences(bytes);

    let mut i = 0;
    while i < bytes.len() {
        if !is_number_byte(bytes[i]) {
            i += 1;
            continue;
        }
        match change_end(bytes, i) {
            Some(end) => {
                let overlaps = spans
                    .iter()
                    .any(|&(s, e)| (i >= s && i < e) || (end > s && end <= e));
                if !overlaps {
                    spans.push((i, end));
                }
                // Scanning resumes after the candidate whether or not it
                // was kept
                i = end;
            }
            None => i += 1,
        }
    }

    spans.sort_by_key(|&(start, _)| start);

    let patterns = spans
        .into_iter()
        .map(|(start, end)| ScalingPattern {
            text: text[start..end].to_string(),
            start,
            end,
        })
        .collect();

    Note {
        text: text.to_string(),
        patterns,
    }
}

/// Find all slash-joined numeric sequences (two or more numbers).
fn find_sequences(bytes: &[u8]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        let Some(mut pos) = number_end(bytes, i) else {
            i += 1;
            continue;
        };
        let mut joined = 0;
        while pos < bytes.len() && bytes[pos] == b'/' {
            match number_end(bytes, pos + 1) {
                Some(end) => {
                    pos = end;
                    joined += 1;
                }
                None => break,
            }
        }
        if joined > 0 {
            spans.push((start, pos));
            i = pos;
        } else {
            i += 1;
        }
    }
    spans
}

/// End offset of a number at `start`: digits with an optional `.digits`
/// fraction. None if `start` is not a digit.
fn number_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == start {
        return None;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > i + 1 {
            i = j;
        }
    }
    Some(i)
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

/// End offset of a change phrase starting at `start`:
/// `[0-9.]+` `%`? whitespace* (`→` | `->` | `to`) whitespace* `[0-9.]+` `%`?
fn change_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = number_run_end(bytes, start)?;
    if i < bytes.len() && bytes[i] == b'%' {
        i += 1;
    }
    i = skip_whitespace(bytes, i);
    i = arrow_end(bytes, i)?;
    i = skip_whitespace(bytes, i);
    i = number_run_end(bytes, i)?;
    if i < bytes.len() && bytes[i] == b'%' {
        i += 1;
    }
    Some(i)
}

/// End offset of a run of digits and dots, at least one byte long.
fn number_run_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i < bytes.len() && is_number_byte(bytes[i]) {
        i += 1;
    }
    (i > start).then_some(i)
}

fn skip_whitespace(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// UTF-8 encoding of `→`.
const RIGHT_ARROW: &[u8] = "\u{2192}".as_bytes();

/// End offset of a transition marker: `→`, `->`, or `to`
/// (case-insensitive).
fn arrow_end(bytes: &[u8], start: usize) -> Option<usize> {
    let rest = &bytes[start..];
    if rest.starts_with(RIGHT_ARROW) {
        return Some(start + RIGHT_ARROW.len());
    }
    if rest.starts_with(b"->") {
        return Some(start + 2);
    }
    if rest.len() >= 2 && rest[0].eq_ignore_ascii_case(&b't') && rest[1].eq_ignore_ascii_case(&b'o')
    {
        return Some(start + 2);
    }
    None
}
