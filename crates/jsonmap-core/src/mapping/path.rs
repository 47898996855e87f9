//! Dotted field paths and their keyword segments
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

use super::descriptor::SpecError;
use std::fmt;
use std::sync::Arc;

/// Delimiter between path segments
pub const PATH_DELIMITER: char = '.';

/// Keyword restarting resolution from the top-level source value
pub const KEYWORD_ROOT: &str = "$ROOT";
/// Keyword standing for the current array item itself
pub const KEYWORD_ITEM: &str = "$ITEM";
/// Keyword returning the current value without descending
pub const KEYWORD_EMPTY: &str = "$EMPTY";

/// One segment of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `$ROOT`, only recognized as the first segment
    Root,
    /// `$ITEM`, skipped without descending
    Item,
    /// `$EMPTY`, terminal
    Empty,
    /// Plain field name (or sequence index)
    Field(String),
}

impl Segment {
    fn parse(raw: &str, position: usize) -> Self {
        if position == 0 && raw.eq_ignore_ascii_case(KEYWORD_ROOT) {
            Segment::Root
        } else if raw.eq_ignore_ascii_case(KEYWORD_ITEM) {
            Segment::Item
        } else if raw.eq_ignore_ascii_case(KEYWORD_EMPTY) {
            Segment::Empty
        } else {
            Segment::Field(raw.to_string())
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Root => f.write_str(KEYWORD_ROOT),
            Segment::Item => f.write_str(KEYWORD_ITEM),
            Segment::Empty => f.write_str(KEYWORD_EMPTY),
            Segment::Field(name) => f.write_str(name),
        }
    }
}

/// A parsed path: the caller's text plus the segments still to resolve
///
/// Reduced paths (fan-out branches, `$ROOT` restarts) keep the original text
/// so errors always name the full path as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    text: Arc<str>,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a dotted path; the path must be non-empty
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        if text.is_empty() {
            return Err(SpecError::EmptyPath);
        }

        let segments = text
            .split(PATH_DELIMITER)
            .enumerate()
            .map(|(position, raw)| Segment::parse(raw, position))
            .collect();

        Ok(Self {
            text: Arc::from(text),
            segments,
        })
    }

    /// The path exactly as the caller wrote it
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Segments left to resolve
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// A path over `segments` that still reports the original text
    ///
    /// An empty remainder becomes `$EMPTY`, keeping at least one segment.
    pub fn reduced(&self, segments: &[Segment]) -> Self {
        let segments = if segments.is_empty() {
            vec![Segment::Empty]
        } else {
            segments.to_vec()
        };
        Self {
            text: Arc::clone(&self.text),
            segments,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
