//! Announcement document model.
//!
//! An announcement body arrives as a tree of block nodes. Only two shapes
//! matter to classification: list blocks, which contribute one input line
//! per item, and everything else, which contributes its own full text. Line
//! expansion trims and drops blanks in both cases.

/// A block-level node of an announcement document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Freeform block; each non-blank line of its text is one input line.
    Text(String),
    /// Ordered or unordered list; each item is one input line.
    List(Vec<String>),
}

/// A parsed announcement body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Build a document from plain announcement text.
    ///
    /// Consecutive bullet lines group into one list block; other non-blank
    /// lines accumulate into text blocks; blank lines close the current
    /// block.
    pub fn from_plain_text(text: &str) -> Self {
        let mut blocks = Vec::new();
        let mut list_items: Vec<String> = Vec::new();
        let mut text_lines: Vec<&str> = Vec::new();

        fn flush(blocks: &mut Vec<Block>, list: &mut Vec<String>, text: &mut Vec<&str>) {
            if !list.is_empty() {
                blocks.push(Block::List(std::mem::take(list)));
            }
            if !text.is_empty() {
                blocks.push(Block::Text(std::mem::take(text).join("\n")));
            }
        }

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                flush(&mut blocks, &mut list_items, &mut text_lines);
            } else if bullet_prefix_len(line).is_some() {
                if !text_lines.is_empty() {
                    blocks.push(Block::Text(std::mem::take(&mut text_lines).join("\n")));
                }
                list_items.push(line.to_string());
            } else {
                if !list_items.is_empty() {
                    blocks.push(Block::List(std::mem::take(&mut list_items)));
                }
                text_lines.push(line);
            }
        }
        flush(&mut blocks, &mut list_items, &mut text_lines);

        Self { blocks }
    }

    /// All input lines in document order: trimmed, blanks dropped.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().flat_map(|block| {
            let texts: Vec<&str> = match block {
                Block::Text(text) => vec![text.as_str()],
                Block::List(items) => items.iter().map(String::as_str).collect(),
            };
            texts.into_iter().flat_map(split_lines)
        })
    }

    /// Flat text rendering of the whole document, one line per entry.
    pub fn plain_text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}

/// Split text into trimmed, non-blank lines.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Byte length of a leading bullet marker (`-`, `•`, or `*` followed by at
/// least one whitespace character, after optional indentation), or None.
pub(crate) fn bullet_prefix_len(line: &str) -> Option<usize> {
    let after_indent = line.trim_start();
    let indent = line.len() - after_indent.len();

    let mut chars = after_indent.chars();
    let marker = chars.next()?;
    if !matches!(marker, '-' | '•' | '*') {
        return None;
    }

    let rest = chars.as_str();
    let after_gap = rest.trim_start();
    if after_gap.len() == rest.len() {
        // No whitespace after the marker: not a bullet
        return None;
    }

    Some(indent + marker.len_utf8() + (rest.len() - after_gap.len()))
}
