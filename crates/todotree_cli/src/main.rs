//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `todotree_core` linkage.
//! - Parse a todo file (argv[1], or a built-in sample) and print a
//!   deterministic project/task summary with dotted ids.

use std::process::ExitCode;
use todotree_core::{Task, TodoParser};

const SAMPLE: &str = "\
Inbox:
    [ ] Buy milk @due(2024-01-01)
    [>] Write report >notify(email)
        [x] Collect figures
        Draft is in the shared folder
Errands:
";

fn main() -> ExitCode {
    let content = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("todotree: cannot read `{path}`: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => SAMPLE.to_string(),
    };

    let parser = TodoParser::with_defaults();
    let projects = parser.parse(&content);

    println!("todotree_core version={}", todotree_core::core_version());
    for (project_index, project) in projects.iter().enumerate() {
        println!(
            "{}. {} ({} tasks)",
            project_index + 1,
            project.name,
            project.tasks.len()
        );
        for (task_index, task) in project.tasks.iter().enumerate() {
            print_task(
                &parser,
                task,
                &format!("{}.{}", project_index + 1, task_index + 1),
                1,
            );
        }
    }
    ExitCode::SUCCESS
}

fn print_task(parser: &TodoParser, task: &Task, id: &str, depth: usize) {
    println!(
        "{}{id} {} {}",
        "  ".repeat(depth),
        parser.config().symbols.symbol_for(task.status),
        task.text()
    );
    for (index, subtask) in task.tasks.iter().enumerate() {
        print_task(parser, subtask, &format!("{id}.{}", index + 1), depth + 1);
    }
}
