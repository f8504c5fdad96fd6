//! Use-case services over the todo store.
//!
//! # Responsibility
//! - Address projects and tasks by dotted 1-based index paths.
//! - Orchestrate load-modify-save flows for task mutation.
//!
//! # Invariants
//! - Load-modify-save is not transactional; concurrent callers writing the
//!   same file race. Callers needing isolation must serialize externally.

pub mod item_path;
pub mod todo_service;
