//! Plain serde records for persisted tasks.
//!
//! A record is the flat, owned form of a [`Task`]: no shared handles, no
//! back-references. Converting a record into a task goes through the task's
//! own setters, so every invariant is checked again on load.

use serde::{Deserialize, Serialize};

use crate::models::{DueDate, Priority, Status, Task, TodoError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityRecord {
    pub important: bool,
    pub urgent: bool,
}

/// Calendar components of a due date. `month` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DueDateRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: String,
    pub tags: Vec<TagRecord>,
    /// The key must be present; `null` means no due date.
    #[serde(rename = "due-date", deserialize_with = "Option::deserialize")]
    pub due_date: Option<DueDateRecord>,
    #[serde(default)]
    pub priority: Option<PriorityRecord>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub progress: i32,
    #[serde(rename = "estimated-time", default)]
    pub estimated_time: i32,
}

impl From<Priority> for PriorityRecord {
    fn from(priority: Priority) -> Self {
        Self {
            important: priority.is_important(),
            urgent: priority.is_urgent(),
        }
    }
}

impl From<PriorityRecord> for Priority {
    fn from(record: PriorityRecord) -> Self {
        Priority::new(record.important, record.urgent)
    }
}

impl From<DueDate> for DueDateRecord {
    fn from(due: DueDate) -> Self {
        let (year, month, day, hour, minute) = due.components();
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }
}

impl TryFrom<DueDateRecord> for DueDate {
    type Error = TodoError;

    fn try_from(record: DueDateRecord) -> Result<Self, Self::Error> {
        DueDate::from_components(
            record.year,
            record.month,
            record.day,
            record.hour,
            record.minute,
        )
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            description: task.description(),
            tags: task
                .tags()
                .iter()
                .map(|t| TagRecord {
                    name: t.name().to_string(),
                })
                .collect(),
            due_date: task.due_date().map(DueDateRecord::from),
            priority: Some(task.priority().into()),
            status: Some(task.status()),
            progress: task.progress() as i32,
            estimated_time: task.estimated_time_to_complete() as i32,
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = TodoError;

    /// Builds the task in a fixed order: description, status, due date,
    /// priority, tags, then progress and estimate.
    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let task = Task::new(record.description)?;
        task.set_status(record.status.ok_or(TodoError::NullArgument("status"))?);
        let due_date = record.due_date.map(DueDate::try_from).transpose()?;
        task.set_due_date(due_date);
        let priority = record.priority.ok_or(TodoError::NullArgument("priority"))?;
        task.set_priority(priority.into());
        for tag in record.tags {
            task.add_tag(tag.name)?;
        }
        task.set_progress(record.progress)?;
        task.set_estimated_time_to_complete(record.estimated_time)?;
        Ok(task)
    }
}
