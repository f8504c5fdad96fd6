//! Filesystem-backed todo store.
//!
//! # Responsibility
//! - Resolve relative file paths against a configured base directory.
//! - Read and parse files, serialize and overwrite them.
//! - Emit load/save logging events with duration and status.

use super::{StoreError, StoreResult, TodoStore};
use crate::config::{ConfigError, TodoConfig};
use crate::model::project::Project;
use crate::parser::todo_file::TodoParser;
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Loads and saves todo files under one base directory.
pub struct FileStore {
    base_dir: PathBuf,
    parser: TodoParser,
}

impl FileStore {
    /// Creates a store with a validated configuration.
    pub fn new(base_dir: impl Into<PathBuf>, config: TodoConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            base_dir: base_dir.into(),
            parser: TodoParser::new(config)?,
        })
    }

    /// Creates a store with the default marker and sigil tables.
    pub fn with_defaults(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            parser: TodoParser::with_defaults(),
        }
    }

    pub fn parser(&self) -> &TodoParser {
        &self.parser
    }

    /// Absolute paths pass through; relative paths join the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl TodoStore for FileStore {
    fn load(&self, path: &Path) -> StoreResult<Vec<Project>> {
        let started_at = Instant::now();
        let full_path = self.resolve(path);
        info!(
            "event=todo_load module=store status=start path={}",
            full_path.display()
        );

        let content = match fs::read_to_string(&full_path) {
            Ok(content) => content,
            Err(source) => {
                error!(
                    "event=todo_load module=store status=error path={} duration_ms={} error={}",
                    full_path.display(),
                    started_at.elapsed().as_millis(),
                    source
                );
                return Err(StoreError::Read {
                    path: full_path,
                    source,
                });
            }
        };

        let projects = self.parser.parse(&content);
        info!(
            "event=todo_load module=store status=ok path={} duration_ms={} projects={}",
            full_path.display(),
            started_at.elapsed().as_millis(),
            projects.len()
        );
        Ok(projects)
    }

    fn save(&self, path: &Path, projects: &[Project]) -> StoreResult<()> {
        let started_at = Instant::now();
        let full_path = self.resolve(path);
        info!(
            "event=todo_save module=store status=start path={}",
            full_path.display()
        );

        let content = self.parser.serialize(projects);
        // Plain overwrite: load-modify-save is not transactional.
        if let Err(source) = fs::write(&full_path, content) {
            error!(
                "event=todo_save module=store status=error path={} duration_ms={} error={}",
                full_path.display(),
                started_at.elapsed().as_millis(),
                source
            );
            return Err(StoreError::Write {
                path: full_path,
                source,
            });
        }

        info!(
            "event=todo_save module=store status=ok path={} duration_ms={} projects={}",
            full_path.display(),
            started_at.elapsed().as_millis(),
            projects.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::store::{StoreError, TodoStore};
    use std::path::Path;

    #[test]
    fn resolve_joins_relative_paths_only() {
        let store = FileStore::with_defaults("/data/todo");
        assert_eq!(
            store.resolve(Path::new("work.todo")),
            Path::new("/data/todo/work.todo")
        );
        assert_eq!(
            store.resolve(Path::new("/elsewhere/home.todo")),
            Path::new("/elsewhere/home.todo")
        );
    }

    #[test]
    fn load_reports_read_error_with_resolved_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileStore::with_defaults(dir.path());
        let err = store
            .load(Path::new("missing.todo"))
            .expect_err("missing file should fail");
        match err {
            StoreError::Read { path, .. } => {
                assert_eq!(path, dir.path().join("missing.todo"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
