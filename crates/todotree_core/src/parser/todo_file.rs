//! Line classification, tree construction and serialization.
//!
//! # Responsibility
//! - Parse full file content into ordered projects with nested tasks.
//! - Serialize a project list back to the indented text format.
//!
//! # Invariants
//! - Nesting compares raw leading-whitespace character counts; no tab-width
//!   normalization is applied.
//! - A blank line leaves the task stack intact but breaks note continuation.
//! - The project-header check runs before the task-marker check, so a marker
//!   line ending in `:` is a header.

use crate::config::{ConfigError, TodoConfig};
use crate::model::project::Project;
use crate::model::task::Task;
use crate::parser::annotations::AnnotationScanner;

/// Classification of the previously processed line, driving note continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Empty,
    Project,
    Task,
    Note,
    Other,
}

/// A task on the nesting stack: its index path within the current project and
/// the raw indent column it was seen at.
struct StackEntry {
    path: Vec<usize>,
    indent: usize,
}

/// Text-format parser and serializer for one configuration.
///
/// Pure and stateless across calls; all parse state is local to one `parse`
/// invocation.
#[derive(Debug)]
pub struct TodoParser {
    config: TodoConfig,
    scanner: AnnotationScanner,
}

impl TodoParser {
    /// Creates a parser after validating the configuration.
    pub fn new(config: TodoConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let scanner = AnnotationScanner::new(&config.sigils);
        Ok(Self { config, scanner })
    }

    /// Creates a parser with the default marker and sigil tables.
    pub fn with_defaults() -> Self {
        Self {
            config: TodoConfig::default(),
            scanner: AnnotationScanner::new(&crate::config::Sigils::default()),
        }
    }

    pub fn config(&self) -> &TodoConfig {
        &self.config
    }

    pub fn scanner(&self) -> &AnnotationScanner {
        &self.scanner
    }

    /// Parses full file content into ordered projects. Never fails:
    /// unrecognized lines are classified `Other` and skipped.
    pub fn parse(&self, content: &str) -> Vec<Project> {
        let mut projects: Vec<Project> = Vec::new();
        let mut stack: Vec<StackEntry> = Vec::new();
        let mut current_task: Option<Vec<usize>> = None;
        let mut previous = LineKind::Other;

        for raw in content.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let trimmed = line.trim();

            if trimmed.is_empty() {
                previous = LineKind::Empty;
                continue;
            }

            let indent = leading_whitespace_width(line);

            if trimmed.ends_with(':') {
                projects.push(Project::new(&trimmed[..trimmed.len() - 1]));
                stack.clear();
                current_task = None;
                previous = LineKind::Project;
                continue;
            }

            if let Some((status, marker)) = self.config.symbols.match_status(trimmed) {
                // A task line before any project header has nowhere to attach.
                let Some(project) = projects.last_mut() else {
                    current_task = None;
                    previous = LineKind::Other;
                    continue;
                };

                let remainder = &trimmed[marker.len()..];
                let text = remainder.strip_prefix(' ').unwrap_or(remainder);
                let task = Task::new(text, status, &self.scanner);

                while stack.last().is_some_and(|top| top.indent >= indent) {
                    stack.pop();
                }

                let path = match stack.last() {
                    None => {
                        project.tasks.push(task);
                        vec![project.tasks.len() - 1]
                    }
                    Some(top) => {
                        let parent = task_at_mut(project, &top.path);
                        parent.tasks.push(task);
                        let mut path = top.path.clone();
                        path.push(parent.tasks.len() - 1);
                        path
                    }
                };

                stack.push(StackEntry {
                    path: path.clone(),
                    indent,
                });
                current_task = Some(path);
                previous = LineKind::Task;
                continue;
            }

            // Note continuation: only directly after a task or another note
            // line, at equal-or-deeper indent than the innermost open task.
            let continues = matches!(previous, LineKind::Task | LineKind::Note);
            let eligible = continues
                && current_task.is_some()
                && stack.last().is_some_and(|top| indent >= top.indent);

            if eligible {
                if let (Some(path), Some(project)) = (&current_task, projects.last_mut()) {
                    let task = task_at_mut(project, path);
                    if task.note.is_empty() {
                        task.note.push_str(trimmed);
                    } else {
                        task.note.push('\n');
                        task.note.push_str(trimmed);
                    }
                }
                previous = LineKind::Note;
            } else {
                current_task = None;
                previous = LineKind::Other;
            }
        }

        projects
    }

    /// Serializes projects back to file text.
    ///
    /// Task text is emitted verbatim; note lines are re-indented at the task's
    /// level before subtasks.
    pub fn serialize(&self, projects: &[Project]) -> String {
        let mut output = String::new();
        for project in projects {
            output.push_str(&project.name);
            output.push_str(":\n");
            for task in &project.tasks {
                self.serialize_task(&mut output, task, 1);
            }
        }
        output
    }

    fn serialize_task(&self, output: &mut String, task: &Task, depth: usize) {
        let indent = "    ".repeat(depth);
        output.push_str(&indent);
        output.push_str(self.config.symbols.symbol_for(task.status));
        output.push(' ');
        output.push_str(task.text());
        output.push('\n');

        if !task.note.is_empty() {
            for line in task.note.split('\n') {
                output.push_str(&indent);
                output.push_str(line);
                output.push('\n');
            }
        }

        for subtask in &task.tasks {
            self.serialize_task(output, subtask, depth + 1);
        }
    }
}

/// Raw leading-whitespace character count. Columns, not normalized units.
fn leading_whitespace_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

// Stack paths are produced by the parse loop itself, so the indices are
// always in bounds and the path is never empty.
fn task_at_mut<'a>(project: &'a mut Project, path: &[usize]) -> &'a mut Task {
    let mut task = &mut project.tasks[path[0]];
    for &index in &path[1..] {
        task = &mut task.tasks[index];
    }
    task
}
