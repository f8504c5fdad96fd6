//! Domain model for todo files.
//!
//! # Responsibility
//! - Define the project/task tree parsed from and serialized to text.
//!
//! # Invariants
//! - Task `text` is the single source of truth for inline annotations; the
//!   structured views are recomputed on every text write.
//! - Ownership is a strict tree: a project owns its root tasks, each task
//!   owns its subtasks.

pub mod project;
pub mod task;
