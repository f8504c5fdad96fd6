//! Project domain model.

use crate::model::task::Task;
use serde::Serialize;

/// Top-level named grouping of tasks in a todo file.
///
/// Name uniqueness within a file is not enforced; lookups by name resolve to
/// the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Project {
    /// Creates an empty project. A project with zero tasks is valid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }
}
