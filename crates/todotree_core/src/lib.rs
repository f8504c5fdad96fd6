//! Core domain logic for plain-text todo files.
//! This crate is the single source of truth for the text format and its
//! mutation invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod service;
pub mod store;

pub use config::{ConfigError, Sigils, StatusSymbols, TodoConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::Project;
pub use model::task::{ActionRef, OracleRef, Tag, Task, TaskStatus};
pub use parser::annotations::AnnotationScanner;
pub use parser::todo_file::TodoParser;
pub use service::item_path::{ItemPath, ItemPathError};
pub use service::todo_service::{
    CreatedTask, DeletedEntry, DeletedItem, DeletedKind, NewTask, ServiceError, ServiceResult,
    TagPatch, TaskPatch, TodoService,
};
pub use store::{FileStore, StoreError, StoreResult, TodoStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
