//! Task domain model.
//!
//! # Responsibility
//! - Define the task record with status, note, subtasks and annotation views.
//! - Keep the annotation views (`tags`/`actions`/`oracles`) consistent with
//!   the raw line text.
//!
//! # Invariants
//! - `text` is authoritative for annotation content; the views are a parsed
//!   projection, never an independent store.
//! - Every write path that touches `text` re-scans the views in the same call.
//! - The views are not publicly mutable, so view/text divergence is
//!   unrepresentable.

use crate::parser::annotations::AnnotationScanner;
use serde::{Deserialize, Serialize};

/// Task lifecycle state, bijectively mapped to a line marker by
/// [`StatusSymbols`](crate::config::StatusSymbols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Done.
    Completed,
    /// Work is in progress.
    Underway,
    /// Started but parked.
    Paused,
    /// Created but not started.
    Uncompleted,
}

impl TaskStatus {
    /// Stable lowercase name, matching the wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Underway => "underway",
            Self::Paused => "paused",
            Self::Uncompleted => "uncompleted",
        }
    }
}

/// `@name(value)` metadata annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

/// `>type(params)` directive for an external executor (execution out of scope).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRef {
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: String,
    pub params: String,
}

/// `#type(params)` reference to an external read-only data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRef {
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: String,
    pub params: String,
}

/// A unit of work: one marker line in a todo file, plus note and subtasks.
///
/// `text` and the annotation views are private behind accessors; the only
/// write paths re-scan the views, which is what makes re-serialization safe
/// against annotation duplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    text: String,
    pub status: TaskStatus,
    /// Multi-line free text, newline-joined. Empty string means no note.
    pub note: String,
    tags: Vec<Tag>,
    actions: Vec<ActionRef>,
    oracles: Vec<OracleRef>,
    pub tasks: Vec<Task>,
}

impl Task {
    /// Creates a task and scans `text` for annotation views.
    pub fn new(text: impl Into<String>, status: TaskStatus, scanner: &AnnotationScanner) -> Self {
        let text = text.into();
        let (tags, actions, oracles) = scanner.scan_all(&text);
        Self {
            text,
            status,
            note: String::new(),
            tags,
            actions,
            oracles,
            tasks: Vec::new(),
        }
    }

    /// The raw line text, inline annotations included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed `@name(value)` occurrences, in text order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Parsed action occurrences, in text order.
    pub fn actions(&self) -> &[ActionRef] {
        &self.actions
    }

    /// Parsed oracle occurrences, in text order.
    pub fn oracles(&self) -> &[OracleRef] {
        &self.oracles
    }

    /// Replaces the line text and re-scans the annotation views.
    pub fn set_text(&mut self, text: impl Into<String>, scanner: &AnnotationScanner) {
        self.text = text.into();
        let (tags, actions, oracles) = scanner.scan_all(&self.text);
        self.tags = tags;
        self.actions = actions;
        self.oracles = oracles;
    }

    /// Appends `@name(value)` to the text unless that exact rendering is
    /// already present, then re-scans.
    pub fn add_tag(&mut self, name: &str, value: &str, scanner: &AnnotationScanner) {
        let rendered = scanner.render_tag(name, value);
        if self.text.contains(&rendered) {
            return;
        }
        let updated = format!("{} {rendered}", self.text.trim());
        self.set_text(updated, scanner);
    }

    /// Strips every `@name(...)` occurrence (with leading whitespace) from the
    /// text, then re-scans.
    pub fn remove_tag(&mut self, name: &str, scanner: &AnnotationScanner) {
        let updated = scanner.strip_tag(&self.text, name);
        self.set_text(updated, scanner);
    }

    /// Replaces the note text.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Flips between completed and uncompleted; any non-completed status
    /// completes.
    pub fn toggle_status(&mut self) {
        self.status = if self.is_completed() {
            TaskStatus::Uncompleted
        } else {
            TaskStatus::Completed
        };
    }
}
