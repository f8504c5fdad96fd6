//! Dotted index paths addressing projects and tasks.
//!
//! # Responsibility
//! - Parse and render `"2.1.3"`-style 1-based index chains.
//! - Provide the descending ordering used by batch deletion.
//!
//! # Invariants
//! - Segments are 1-based and never zero.
//! - A one-segment path addresses a project; two or more segments address a
//!   task.
//! - The derived `Ord` is segment-wise; reversed, it puts deeper and
//!   higher-index paths first, which is the batch-delete application order.

use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// 1-based, dot-separated index chain: project index, then a task index at
/// each nesting level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemPath(Vec<usize>);

impl ItemPath {
    /// Parses a dotted path like `"2.1.3"`.
    ///
    /// # Errors
    /// - Returns an error for empty input or an empty segment.
    /// - Returns an error for non-numeric or zero segments.
    pub fn parse(raw: &str) -> Result<Self, ItemPathError> {
        if raw.trim().is_empty() {
            return Err(ItemPathError::Empty);
        }
        let mut segments = Vec::new();
        for part in raw.split('.') {
            let segment: usize = part
                .parse()
                .map_err(|_| ItemPathError::BadSegment(part.to_string()))?;
            if segment == 0 {
                return Err(ItemPathError::BadSegment(part.to_string()));
            }
            segments.push(segment);
        }
        Ok(Self(segments))
    }

    /// Builds a path from already-validated 1-based segments.
    pub fn from_segments(segments: Vec<usize>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    /// A single segment addresses a project, not a task.
    pub fn is_project(&self) -> bool {
        self.0.len() == 1
    }

    /// Path with the last segment dropped; `None` for one-segment paths.
    pub fn parent(&self) -> Option<ItemPath> {
        if self.0.len() < 2 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// New path extending this one by a child index.
    pub fn child(&self, segment: usize) -> ItemPath {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl Display for ItemPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for ItemPath {
    type Err = ItemPathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl Serialize for ItemPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Rejected dotted-path input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPathError {
    Empty,
    /// Segment is not a positive integer.
    BadSegment(String),
}

impl Display for ItemPathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "item path must not be empty"),
            Self::BadSegment(segment) => {
                write!(f, "item path segment `{segment}` is not a positive integer")
            }
        }
    }
}

impl Error for ItemPathError {}
