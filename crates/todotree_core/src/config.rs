//! Explicit parser/serializer configuration.
//!
//! # Responsibility
//! - Map each task status to its literal line marker and back.
//! - Carry the three annotation sigils used by extraction.
//!
//! # Invariants
//! - The status/marker mapping is bijective; `validate()` rejects duplicates.
//! - Reverse lookup is exact-match only, resolved by longest marker when one
//!   marker is a prefix of another.
//! - Configuration is a plain value threaded into constructors, never
//!   process-global state.

use crate::model::task::TaskStatus;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Literal line markers for the four task statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSymbols {
    pub completed: String,
    pub underway: String,
    pub paused: String,
    pub uncompleted: String,
}

impl Default for StatusSymbols {
    fn default() -> Self {
        Self {
            completed: "[x]".to_string(),
            underway: "[>]".to_string(),
            paused: "[o]".to_string(),
            uncompleted: "[ ]".to_string(),
        }
    }
}

impl StatusSymbols {
    /// Returns the marker emitted for `status` during serialization.
    pub fn symbol_for(&self, status: TaskStatus) -> &str {
        match status {
            TaskStatus::Completed => &self.completed,
            TaskStatus::Underway => &self.underway,
            TaskStatus::Paused => &self.paused,
            TaskStatus::Uncompleted => &self.uncompleted,
        }
    }

    /// Reverse lookup: the status whose marker starts `trimmed`, if any.
    ///
    /// Longest-match wins when markers prefix each other, so a marker set like
    /// `-` / `--` classifies `-- done` as the two-character status.
    pub fn match_status(&self, trimmed: &str) -> Option<(TaskStatus, &str)> {
        self.entries()
            .into_iter()
            .filter(|(_, marker)| !marker.is_empty() && trimmed.starts_with(marker))
            .max_by_key(|(_, marker)| marker.len())
    }

    fn entries(&self) -> [(TaskStatus, &str); 4] {
        [
            (TaskStatus::Completed, self.completed.as_str()),
            (TaskStatus::Underway, self.underway.as_str()),
            (TaskStatus::Paused, self.paused.as_str()),
            (TaskStatus::Uncompleted, self.uncompleted.as_str()),
        ]
    }
}

/// Sigil characters (or short strings) that introduce inline annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sigils {
    pub tags: String,
    pub actions: String,
    pub oracles: String,
}

impl Default for Sigils {
    fn default() -> Self {
        Self {
            tags: "@".to_string(),
            actions: ">".to_string(),
            oracles: "#".to_string(),
        }
    }
}

/// Full parser/serializer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoConfig {
    #[serde(default)]
    pub symbols: StatusSymbols,
    #[serde(default)]
    pub sigils: Sigils,
}

impl TodoConfig {
    /// Checks that the mapping is usable by the parser.
    ///
    /// # Errors
    /// - Returns an error when any status marker is empty.
    /// - Returns an error when two statuses share one marker.
    /// - Returns an error when any annotation sigil is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = [
            (TaskStatus::Completed, self.symbols.completed.as_str()),
            (TaskStatus::Underway, self.symbols.underway.as_str()),
            (TaskStatus::Paused, self.symbols.paused.as_str()),
            (TaskStatus::Uncompleted, self.symbols.uncompleted.as_str()),
        ];

        for (status, marker) in entries {
            if marker.is_empty() {
                return Err(ConfigError::EmptyMarker { status });
            }
        }
        for (index, (_, marker)) in entries.iter().enumerate() {
            if entries[index + 1..].iter().any(|(_, other)| other == marker) {
                return Err(ConfigError::DuplicateMarker {
                    marker: (*marker).to_string(),
                });
            }
        }

        let sigils = [
            ("tags", self.sigils.tags.as_str()),
            ("actions", self.sigils.actions.as_str()),
            ("oracles", self.sigils.oracles.as_str()),
        ];
        for (field, sigil) in sigils {
            if sigil.is_empty() {
                return Err(ConfigError::EmptySigil { field });
            }
        }

        Ok(())
    }
}

/// Rejected configuration values.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A status has no marker text.
    EmptyMarker { status: TaskStatus },
    /// Two statuses map to the same marker, breaking reverse lookup.
    DuplicateMarker { marker: String },
    /// An annotation sigil is empty.
    EmptySigil { field: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMarker { status } => {
                write!(f, "status marker for `{}` must not be empty", status.as_str())
            }
            Self::DuplicateMarker { marker } => {
                write!(f, "status marker `{marker}` is mapped to more than one status")
            }
            Self::EmptySigil { field } => {
                write!(f, "annotation sigil `{field}` must not be empty")
            }
        }
    }
}

impl Error for ConfigError {}
