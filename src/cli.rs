use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::models::{Project, Status, Task, Todo, TodoError};
use crate::storage::{StorageError, TaskStore};
use crate::utils::parse_due;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Track tasks and projects, ordered by importance and urgency")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/data file)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task; accepts "Description##keyword;keyword;" shorthand
    Add {
        /// Task description
        description: String,
        /// Due date (YYYY-MM-DD or "YYYY-MM-DD HH:MM")
        #[arg(long)]
        due: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Mark as important
        #[arg(long)]
        important: bool,
        /// Mark as urgent
        #[arg(long)]
        urgent: bool,
        /// Estimated hours to complete
        #[arg(long, allow_negative_numbers = true)]
        estimate: Option<i32>,
    },
    /// List tasks, most important and urgent first
    List,
    /// Mark a task as done
    Done {
        /// Description of the task
        description: String,
    },
    /// Set the progress percentage of a task
    Progress {
        /// Description of the task
        description: String,
        /// Percentage between 0 and 100
        #[arg(allow_negative_numbers = true)]
        percent: i32,
    },
    /// Remove a task
    Remove {
        /// Description of the task
        description: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Invalid task: {0}")]
    TodoError(#[from] TodoError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("No task named '{0}'")]
    NotFound(String),
    #[error("A task named '{0}' already exists")]
    DuplicateTask(String),
}

/// Handle the add command
pub fn handle_add(
    description: String,
    due: Option<String>,
    tags: Option<String>,
    important: bool,
    urgent: bool,
    estimate: Option<i32>,
    store: &TaskStore,
) -> Result<(), CliError> {
    let task = Task::parse(&description)?;

    if let Some(due_str) = due {
        let due_date = parse_due(&due_str).map_err(|e| {
            CliError::DateParseError(format!("Invalid date format '{}': {}", due_str, e))
        })?;
        task.set_due_date(Some(due_date));
    }
    if let Some(tags) = tags {
        for name in tags.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            task.add_tag(name)?;
        }
    }
    let mut priority = task.priority();
    if important {
        priority = priority.with_important(true);
    }
    if urgent {
        priority = priority.with_urgent(true);
    }
    task.set_priority(priority);
    if let Some(hours) = estimate {
        task.set_estimated_time_to_complete(hours)?;
    }

    let mut tasks = store.load()?;
    if tasks.contains(&task) {
        return Err(CliError::DuplicateTask(task.description()));
    }
    tasks.push(task.clone());
    store.save(&tasks)?;
    println!("Task added: {}", task.description());

    Ok(())
}

/// Handle the list command
pub fn handle_list(store: &TaskStore) -> Result<(), CliError> {
    let tasks = store.load()?;
    print!("{}", render_list(&tasks)?);
    Ok(())
}

/// Handle the done command. Status and progress are both set.
pub fn handle_done(description: String, store: &TaskStore) -> Result<(), CliError> {
    let tasks = store.load()?;
    let task = find_task(&tasks, &description)?;
    task.set_status(Status::Done);
    task.set_progress(100)?;
    store.save(&tasks)?;
    println!("Task done: {}", description);
    Ok(())
}

/// Handle the progress command
pub fn handle_progress(description: String, percent: i32, store: &TaskStore) -> Result<(), CliError> {
    let tasks = store.load()?;
    let task = find_task(&tasks, &description)?;
    task.set_progress(percent)?;
    store.save(&tasks)?;
    println!("Progress of '{}' set to {}%", description, percent);
    Ok(())
}

/// Handle the remove command
pub fn handle_remove(description: String, store: &TaskStore) -> Result<(), CliError> {
    let mut tasks = store.load()?;
    let before = tasks.len();
    tasks.retain(|t| t.description() != description);
    if tasks.len() == before {
        return Err(CliError::NotFound(description));
    }
    store.save(&tasks)?;
    println!("Task removed: {}", description);
    Ok(())
}

fn find_task<'a>(tasks: &'a [Task], description: &str) -> Result<&'a Task, CliError> {
    tasks
        .iter()
        .find(|t| t.description() == description)
        .ok_or_else(|| CliError::NotFound(description.to_string()))
}

/// Render all tasks in priority order followed by the aggregated totals.
pub fn render_list(tasks: &[Task]) -> Result<String, TodoError> {
    let all = Project::new("All tasks")?;
    for task in tasks {
        all.add(task);
    }

    let mut out = String::new();
    for todo in &all {
        if let Todo::Task(task) = todo {
            out.push_str(&format!(
                "[{}] {} ({})",
                task.status(),
                task.description(),
                task.priority()
            ));
            if let Some(due) = task.due_date() {
                out.push_str(&format!(" due {}", due));
            }
            for tag in task.tags() {
                out.push_str(&format!(" {}", tag));
            }
            out.push_str(&format!(" {}%\n", task.progress()));
        }
    }

    out.push_str(&format!(
        "{} tasks, {}h estimated, {}% progress{}\n",
        all.number_of_tasks(),
        all.estimated_time_to_complete(),
        all.progress(),
        if all.is_completed() { ", all completed" } else { "" }
    ));
    Ok(out)
}
