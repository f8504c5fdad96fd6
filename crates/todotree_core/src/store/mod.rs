//! Persistence layer for todo files.
//!
//! # Responsibility
//! - Define the load/save contract used by the service layer.
//! - Keep filesystem details out of service orchestration.
//!
//! # Invariants
//! - `save` rewrites the whole file from the serialized tree. There is no
//!   partial-write or rename-based atomicity guarantee; concurrent writers
//!   must be serialized by the caller.

use crate::model::project::Project;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

mod file_store;

pub use file_store::FileStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Load/save contract for one todo file.
pub trait TodoStore {
    fn load(&self, path: &Path) -> StoreResult<Vec<Project>>;
    fn save(&self, path: &Path, projects: &[Project]) -> StoreResult<()>;
}

/// Persistence failure with the resolved path for context.
#[derive(Debug)]
pub enum StoreError {
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read todo file `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write todo file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}
