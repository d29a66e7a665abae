use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Task;
use crate::records::TaskRecord;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read task file: {0}")]
    ReadError(String),
    #[error("Failed to write task file: {0}")]
    WriteError(String),
    #[error("Invalid task JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Parse a JSON array of task records.
///
/// The document itself must be an array; an element that is not a valid task
/// is logged and skipped, the rest are still returned.
pub fn parse_tasks(input: &str) -> Result<Vec<Task>, StorageError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(input)?;
    let mut tasks = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let record = match serde_json::from_value::<TaskRecord>(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, "Skipping malformed task record: {}", e);
                continue;
            }
        };
        match Task::try_from(record) {
            Ok(task) => tasks.push(task),
            Err(e) => tracing::warn!(index, "Skipping invalid task record: {}", e),
        }
    }

    Ok(tasks)
}

/// Serialize tasks as a JSON array of records.
pub fn tasks_to_json(tasks: &[Task]) -> Result<String, StorageError> {
    let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// A JSON file holding the user's tasks. Saving overwrites the whole file.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every valid task. A missing file is an empty task list.
    pub fn load(&self) -> Result<Vec<Task>, StorageError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No task file yet");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::ReadError(format!("{}: {}", self.path.display(), e)))?;
        let tasks = parse_tasks(&contents)?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "Loaded tasks");
        Ok(tasks)
    }

    /// Replace the file contents with `tasks`, creating parent directories.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::WriteError(e.to_string()))?;
            }
        }

        let json = tasks_to_json(tasks)?;
        fs::write(&self.path, json)
            .map_err(|e| StorageError::WriteError(format!("{}: {}", self.path.display(), e)))?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "Saved tasks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Status};

    const SAMPLE: &str = r#"[
        {
            "description": "Buy groceries",
            "tags": [{"name": "errand"}],
            "due-date": {"year": 2019, "month": 1, "day": 14, "hour": 17, "minute": 30},
            "priority": {"important": false, "urgent": true},
            "status": "TODO"
        },
        {
            "description": "",
            "tags": [],
            "due-date": null,
            "priority": {"important": false, "urgent": false},
            "status": "TODO"
        },
        {
            "description": "No status",
            "tags": [],
            "due-date": null,
            "priority": {"important": false, "urgent": false}
        },
        {
            "description": "Bad status",
            "tags": [],
            "due-date": null,
            "priority": {"important": false, "urgent": false},
            "status": "SOMEDAY"
        },
        "not even an object",
        {
            "description": "File taxes",
            "tags": [{"name": "money"}, {"name": "home"}],
            "due-date": null,
            "priority": {"important": true, "urgent": true},
            "status": "DONE"
        }
    ]"#;

    #[test]
    fn test_parse_skips_bad_records() {
        let tasks = parse_tasks(SAMPLE).unwrap();
        assert_eq!(tasks.len(), 2);

        assert_eq!(tasks[0].description(), "Buy groceries");
        assert_eq!(tasks[0].priority(), Priority::Urgent);
        assert_eq!(
            tasks[0].due_date().unwrap().components(),
            (2019, 1, 14, 17, 30)
        );
        assert!(tasks[0].contains_tag("errand").unwrap());

        assert_eq!(tasks[1].description(), "File taxes");
        assert_eq!(tasks[1].status(), Status::Done);
        assert_eq!(tasks[1].tags().len(), 2);
        // older files carry no progress or estimate
        assert_eq!(tasks[1].progress(), 0);
        assert_eq!(tasks[1].estimated_time_to_complete(), 0);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_tasks(r#"{"description": "x"}"#),
            Err(StorageError::JsonError(_))
        ));
        assert!(parse_tasks("not json").is_err());
        assert!(parse_tasks("[]").unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_month_skips_only_that_record() {
        let input = r#"[
            {"description": "Good", "tags": [], "due-date": null,
             "priority": {"important": false, "urgent": false}, "status": "TODO"},
            {"description": "Bad month", "tags": [],
             "due-date": {"year": 2019, "month": 4294967295, "day": 1, "hour": 0, "minute": 0},
             "priority": {"important": false, "urgent": false}, "status": "TODO"}
        ]"#;
        let tasks = parse_tasks(input).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description(), "Good");
    }

    #[test]
    fn test_missing_tags_or_due_date_key_skips_record() {
        let input = r#"[
            {"description": "No tags", "due-date": null,
             "priority": {"important": false, "urgent": false}, "status": "TODO"},
            {"description": "No due date", "tags": [],
             "priority": {"important": false, "urgent": false}, "status": "TODO"},
            {"description": "Complete", "tags": [], "due-date": null,
             "priority": {"important": false, "urgent": false}, "status": "TODO"}
        ]"#;
        let tasks = parse_tasks(input).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description(), "Complete");
    }

    #[test]
    fn test_json_reloads_to_equal_tasks() {
        let tasks = parse_tasks(SAMPLE).unwrap();
        tasks[0].set_progress(30).unwrap();
        let json = tasks_to_json(&tasks).unwrap();
        let reloaded = parse_tasks(&json).unwrap();
        assert_eq!(reloaded, tasks);
        assert_eq!(reloaded[0].progress(), 30);
        assert_eq!(reloaded[0].due_date(), tasks[0].due_date());
        assert_eq!(reloaded[1].priority(), Priority::ImportantUrgent);
    }
}
