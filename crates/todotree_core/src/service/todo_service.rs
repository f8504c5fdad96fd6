//! Todo file use-case service.
//!
//! # Responsibility
//! - Provide task update, project/task creation and batch deletion over one
//!   todo file, addressed by dotted index paths.
//! - Keep mutation safe against annotation duplication by routing every text
//!   change through the re-scanning task API.
//!
//! # Invariants
//! - Every operation is one load-modify-save cycle over a single in-memory
//!   snapshot; no operation saves more than once.
//! - Batch deletion applies paths in descending order (deeper and
//!   higher-index paths first), so earlier deletes never shift a later
//!   target's indices.
//! - Out-of-range delete targets are skipped silently; the returned report
//!   is the caller's signal.

use crate::config::{ConfigError, TodoConfig};
use crate::model::project::Project;
use crate::model::task::{Task, TaskStatus};
use crate::parser::annotations::AnnotationScanner;
use crate::service::item_path::{ItemPath, ItemPathError};
use crate::store::{StoreError, TodoStore};
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from todo use-case operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Dotted-path input could not be parsed.
    InvalidPath(ItemPathError),
    /// Path is well-formed but no task exists there.
    TaskNotFound(ItemPath),
    /// Project identifier (index or name) resolved to nothing.
    ProjectNotFound(String),
    /// Parent path for a new subtask resolved to nothing.
    ParentNotFound(ItemPath),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(err) => write!(f, "{err}"),
            Self::TaskNotFound(path) => write!(f, "task not found: {path}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::ParentNotFound(path) => write!(f, "parent task not found: {path}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPath(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemPathError> for ServiceError {
    fn from(value: ItemPathError) -> Self {
        Self::InvalidPath(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Tag to append through [`TaskPatch::add_tag`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagPatch {
    pub name: String,
    pub value: String,
}

/// Partial task update. Absent fields are left untouched.
///
/// Tag edits go through text rewriting, so the annotation views can never
/// diverge from the serialized output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub status: Option<TaskStatus>,
    pub note: Option<String>,
    pub add_tag: Option<TagPatch>,
    pub remove_tag: Option<String>,
}

/// One task to create in a [`TodoService::create_tasks`] batch.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    /// 1-based project index as digits, or a project name.
    pub project_id: String,
    /// Dotted path of an existing task to attach under, if any.
    #[serde(default)]
    pub parent_task_id: Option<String>,
    pub text: String,
}

/// A created task with its assigned dotted id.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedTask {
    pub id: ItemPath,
    pub task: Task,
}

/// What kind of item a delete removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletedKind {
    Project,
    Task,
    Subtask,
}

/// The removed item itself, reported back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletedEntry {
    Project(Project),
    Task(Task),
}

/// One entry of a batch-delete report, in application order.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedItem {
    pub kind: DeletedKind,
    pub id: ItemPath,
    pub item: DeletedEntry,
}

/// Use-case facade over a todo store.
///
/// Not transactional: each operation is an isolated load-modify-save cycle,
/// and two concurrent callers writing the same file race.
pub struct TodoService<S: TodoStore> {
    store: S,
    scanner: AnnotationScanner,
}

impl<S: TodoStore> TodoService<S> {
    /// Creates a service whose tag rewriting uses `config`'s sigils.
    ///
    /// The configuration should match the one the store parses with.
    pub fn new(store: S, config: &TodoConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            scanner: AnnotationScanner::new(&config.sigils),
        })
    }

    /// Creates a service with the default sigils.
    pub fn with_defaults(store: S) -> Self {
        Self {
            store,
            scanner: AnnotationScanner::new(&crate::config::Sigils::default()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads and parses one todo file.
    pub fn load(&self, file: &Path) -> ServiceResult<Vec<Project>> {
        Ok(self.store.load(file)?)
    }

    /// Resolves a dotted path to a task. One-segment paths address projects
    /// and resolve to `None`.
    pub fn find_task<'a>(projects: &'a [Project], path: &ItemPath) -> Option<&'a Task> {
        let segments = path.segments();
        if segments.len() < 2 {
            return None;
        }
        let project = projects.get(segments[0] - 1)?;
        let mut task = project.tasks.get(segments[1] - 1)?;
        for &segment in &segments[2..] {
            task = task.tasks.get(segment - 1)?;
        }
        Some(task)
    }

    /// Applies a partial update to one task and saves the file.
    ///
    /// Returns the task state after the update.
    pub fn update_task(
        &self,
        file: &Path,
        path: &ItemPath,
        patch: &TaskPatch,
    ) -> ServiceResult<Task> {
        let mut projects = self.store.load(file)?;
        let task = find_task_mut(&mut projects, path)
            .ok_or_else(|| ServiceError::TaskNotFound(path.clone()))?;

        if let Some(text) = &patch.text {
            task.set_text(text.clone(), &self.scanner);
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(note) = &patch.note {
            task.set_note(note.clone());
        }
        if let Some(tag) = &patch.add_tag {
            task.add_tag(&tag.name, &tag.value, &self.scanner);
        }
        if let Some(name) = &patch.remove_tag {
            task.remove_tag(name, &self.scanner);
        }

        let updated = task.clone();
        self.store.save(file, &projects)?;
        info!(
            "event=task_update module=service status=ok id={path} file={}",
            file.display()
        );
        Ok(updated)
    }

    /// Appends an empty project and saves. The returned path is the new
    /// project's 1-based index.
    pub fn create_project(&self, file: &Path, name: &str) -> ServiceResult<(Project, ItemPath)> {
        let mut projects = self.store.load(file)?;
        let project = Project::new(name);
        projects.push(project.clone());
        let id = ItemPath::from_segments(vec![projects.len()]);
        self.store.save(file, &projects)?;
        info!(
            "event=project_create module=service status=ok id={id} file={}",
            file.display()
        );
        Ok((project, id))
    }

    /// Creates a batch of tasks in one load-modify-save cycle.
    ///
    /// Each entry addresses its project by 1-based index digits or by name,
    /// and may attach under an existing task via `parent_task_id`. New tasks
    /// start uncompleted; annotation views are scanned from the given text.
    pub fn create_tasks(&self, file: &Path, tasks: &[NewTask]) -> ServiceResult<Vec<CreatedTask>> {
        let mut projects = self.store.load(file)?;
        let mut created = Vec::with_capacity(tasks.len());

        for spec in tasks {
            let project_index = resolve_project_index(&projects, &spec.project_id)?;
            let task = Task::new(spec.text.clone(), TaskStatus::Uncompleted, &self.scanner);

            let id = match &spec.parent_task_id {
                Some(parent_id) => {
                    let parent_path = ItemPath::parse(parent_id)?;
                    let parent = find_task_mut(&mut projects, &parent_path)
                        .ok_or_else(|| ServiceError::ParentNotFound(parent_path.clone()))?;
                    parent.tasks.push(task.clone());
                    parent_path.child(parent.tasks.len())
                }
                None => {
                    let project = &mut projects[project_index];
                    project.tasks.push(task.clone());
                    ItemPath::from_segments(vec![project_index + 1, project.tasks.len()])
                }
            };

            created.push(CreatedTask { id, task });
        }

        self.store.save(file, &projects)?;
        info!(
            "event=tasks_create module=service status=ok created={} file={}",
            created.len(),
            file.display()
        );
        Ok(created)
    }

    /// Deletes projects, tasks and subtasks addressed by dotted paths.
    ///
    /// Works on one in-memory snapshot: paths are sorted descending before
    /// application, so no delete invalidates another target's indices.
    /// Out-of-range paths are skipped silently. Saves only when something was
    /// deleted.
    pub fn delete_items(&self, file: &Path, item_ids: &[ItemPath]) -> ServiceResult<Vec<DeletedItem>> {
        let mut projects = self.store.load(file)?;

        let mut sorted = item_ids.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));

        let mut deleted = Vec::new();
        for id in sorted {
            let segments = id.segments();
            if id.is_project() {
                let index = segments[0] - 1;
                if index < projects.len() {
                    let project = projects.remove(index);
                    deleted.push(DeletedItem {
                        kind: DeletedKind::Project,
                        id,
                        item: DeletedEntry::Project(project),
                    });
                }
            } else if segments.len() == 2 {
                let Some(project) = projects.get_mut(segments[0] - 1) else {
                    continue;
                };
                let index = segments[1] - 1;
                if index < project.tasks.len() {
                    let task = project.tasks.remove(index);
                    deleted.push(DeletedItem {
                        kind: DeletedKind::Task,
                        id,
                        item: DeletedEntry::Task(task),
                    });
                }
            } else {
                let Some(parent_path) = id.parent() else {
                    continue;
                };
                let Some(parent) = find_task_mut(&mut projects, &parent_path) else {
                    continue;
                };
                let index = segments[segments.len() - 1] - 1;
                if index < parent.tasks.len() {
                    let task = parent.tasks.remove(index);
                    deleted.push(DeletedItem {
                        kind: DeletedKind::Subtask,
                        id,
                        item: DeletedEntry::Task(task),
                    });
                }
            }
        }

        if !deleted.is_empty() {
            self.store.save(file, &projects)?;
        }
        info!(
            "event=items_delete module=service status=ok requested={} deleted={} file={}",
            item_ids.len(),
            deleted.len(),
            file.display()
        );
        Ok(deleted)
    }
}

fn resolve_project_index(projects: &[Project], project_id: &str) -> ServiceResult<usize> {
    if !project_id.is_empty() && project_id.bytes().all(|b| b.is_ascii_digit()) {
        let index = project_id
            .parse::<usize>()
            .ok()
            .and_then(|id| id.checked_sub(1))
            .ok_or_else(|| ServiceError::ProjectNotFound(project_id.to_string()))?;
        if index >= projects.len() {
            return Err(ServiceError::ProjectNotFound(project_id.to_string()));
        }
        return Ok(index);
    }

    projects
        .iter()
        .position(|project| project.name == project_id)
        .ok_or_else(|| ServiceError::ProjectNotFound(project_id.to_string()))
}

fn find_task_mut<'a>(projects: &'a mut [Project], path: &ItemPath) -> Option<&'a mut Task> {
    let segments = path.segments();
    if segments.len() < 2 {
        return None;
    }
    let project = projects.get_mut(segments[0] - 1)?;
    let mut task = project.tasks.get_mut(segments[1] - 1)?;
    for &segment in &segments[2..] {
        task = task.tasks.get_mut(segment - 1)?;
    }
    Some(task)
}
