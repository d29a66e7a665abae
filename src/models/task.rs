use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::due_date::DueDate;
use super::error::{require_non_empty, TodoError};
use super::priority::Priority;
use super::shorthand::Shorthand;
use super::status::Status;
use super::tag::{IntoTag, Tag};

/// A single unit of work.
///
/// `Task` is a shared handle: cloning it yields another reference to the same
/// task, so a task placed in several projects (or kept by the caller) is
/// updated everywhere at once. Two tasks compare equal when their
/// descriptions are equal.
#[derive(Clone)]
pub struct Task {
    inner: Rc<RefCell<TaskData>>,
}

pub(crate) struct TaskData {
    description: String,
    priority: Priority,
    status: Status,
    due_date: Option<DueDate>,
    tags: Vec<Tag>,
    estimated_time: u32,
    progress: u32,
}

impl Task {
    /// Create a task with default status, priority and no tags.
    pub fn new(description: impl Into<String>) -> Result<Self, TodoError> {
        let description = description.into();
        require_non_empty("description", &description)?;
        Ok(Self {
            inner: Rc::new(RefCell::new(TaskData {
                description,
                priority: Priority::default(),
                status: Status::default(),
                due_date: None,
                tags: Vec::new(),
                estimated_time: 0,
                progress: 0,
            })),
        })
    }

    /// Create a task from the one-line `"Description##keyword;..."` form.
    /// See [`Shorthand`] for the keywords.
    pub fn parse(input: &str) -> Result<Self, TodoError> {
        let shorthand = Shorthand::parse(input);
        let task = Self::new(shorthand.description)?;
        if let Some(status) = shorthand.status {
            task.set_status(status);
        }
        task.set_priority(shorthand.priority);
        task.set_due_date(shorthand.due_date);
        for name in shorthand.tags {
            task.add_tag(name)?;
        }
        Ok(task)
    }

    pub(crate) fn from_inner(inner: Rc<RefCell<TaskData>>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<TaskData>> {
        Rc::downgrade(&self.inner)
    }

    /// Whether both handles point at the same task (not merely equal ones).
    pub fn ptr_eq(&self, other: &Task) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn description(&self) -> String {
        self.inner.borrow().description.clone()
    }

    pub fn set_description(&self, description: impl Into<String>) -> Result<(), TodoError> {
        let description = description.into();
        require_non_empty("description", &description)?;
        self.inner.borrow_mut().description = description;
        Ok(())
    }

    pub fn priority(&self) -> Priority {
        self.inner.borrow().priority
    }

    pub fn set_priority(&self, priority: Priority) {
        self.inner.borrow_mut().priority = priority;
    }

    pub fn status(&self) -> Status {
        self.inner.borrow().status
    }

    pub fn set_status(&self, status: Status) {
        self.inner.borrow_mut().status = status;
    }

    pub fn due_date(&self) -> Option<DueDate> {
        self.inner.borrow().due_date
    }

    /// `None` clears the due date.
    pub fn set_due_date(&self, due_date: Option<DueDate>) {
        self.inner.borrow_mut().due_date = due_date;
    }

    /// Percentage in `[0, 100]`, set by hand and unrelated to the status.
    pub fn progress(&self) -> u32 {
        self.inner.borrow().progress
    }

    pub fn set_progress(&self, progress: i32) -> Result<(), TodoError> {
        if !(0..=100).contains(&progress) {
            return Err(TodoError::InvalidRange {
                field: "progress",
                value: progress as i64,
                min: 0,
                max: 100,
            });
        }
        self.inner.borrow_mut().progress = progress as u32;
        Ok(())
    }

    pub fn estimated_time_to_complete(&self) -> u32 {
        self.inner.borrow().estimated_time
    }

    pub fn set_estimated_time_to_complete(&self, hours: i32) -> Result<(), TodoError> {
        if hours < 0 {
            return Err(TodoError::NegativeValue {
                field: "estimated time",
                value: hours as i64,
            });
        }
        self.inner.borrow_mut().estimated_time = hours as u32;
        Ok(())
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.inner.borrow().tags.clone()
    }

    /// Attach a tag (or a tag built from a name). No-op if a tag with the same
    /// name is already attached; otherwise the tag also records this task.
    pub fn add_tag(&self, tag: impl IntoTag) -> Result<(), TodoError> {
        self.attach_tag(tag.into_tag()?);
        Ok(())
    }

    /// Detach the tag with the same name, on both sides. No-op if absent.
    pub fn remove_tag(&self, tag: impl IntoTag) -> Result<(), TodoError> {
        self.detach_tag(&tag.into_tag()?);
        Ok(())
    }

    pub(crate) fn attach_tag(&self, tag: Tag) {
        if self.inner.borrow().tags.contains(&tag) {
            return;
        }
        self.inner.borrow_mut().tags.push(tag.clone());
        tag.register(self);
    }

    pub(crate) fn detach_tag(&self, tag: &Tag) {
        let removed = {
            let mut data = self.inner.borrow_mut();
            let position = data.tags.iter().position(|t| t == tag);
            position.map(|i| data.tags.remove(i))
        };
        if let Some(stored) = removed {
            stored.unregister(self);
            // The caller's handle may be a different tag with the same name
            tag.unregister(self);
        }
    }

    pub fn contains_tag(&self, tag: impl IntoTag) -> Result<bool, TodoError> {
        let tag = tag.into_tag()?;
        Ok(self.inner.borrow().tags.contains(&tag))
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.borrow().description == other.inner.borrow().description
    }
}

impl Eq for Task {}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Task")
            .field("description", &data.description)
            .field("status", &data.status)
            .field("priority", &data.priority)
            .field("due_date", &data.due_date)
            .field("tags", &data.tags)
            .field("estimated_time", &data.estimated_time)
            .field("progress", &data.progress)
            .finish()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        let due = data.due_date.map(|d| d.to_string()).unwrap_or_default();
        let tags = if data.tags.is_empty() {
            " ".to_string()
        } else {
            data.tags
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "\n{{\n\tDescription: {}\n\tDue date: {}\n\tStatus: {}\n\tPriority: {}\n\tTags: {}\n}}",
            data.description, due, data.status, data.priority, tags
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task() -> Task {
        Task::new("This is the description").unwrap()
    }

    #[test]
    fn test_constructor_defaults() {
        let task = task();
        assert_eq!(task.description(), "This is the description");
        assert_eq!(task.status(), Status::Todo);
        assert!(!task.priority().is_urgent());
        assert!(!task.priority().is_important());
        assert!(task.tags().is_empty());
        assert_eq!(task.due_date(), None);
        assert_eq!(task.progress(), 0);
        assert_eq!(task.estimated_time_to_complete(), 0);
    }

    #[test]
    fn test_constructor_empty() {
        assert_eq!(Task::new("").unwrap_err(), TodoError::EmptyValue("description"));
        assert!(Task::parse("##urgent;").is_err());
    }

    #[test]
    fn test_parse_shorthand() {
        let task = Task::parse("Description##todo;urgent;").unwrap();
        assert_eq!(task.description(), "Description");
        assert_eq!(task.status(), Status::Todo);
        assert!(task.priority().is_urgent());
        assert!(!task.priority().is_important());
        assert_eq!(task.due_date(), None);

        let task = Task::parse("Task2##urgent;DONE;errands").unwrap();
        assert_eq!(task.status(), Status::Done);
        assert!(task.contains_tag("errands").unwrap());
    }

    #[test]
    fn test_equality_by_description() {
        let same = Task::new("This is the description").unwrap();
        same.set_status(Status::Done);
        assert_eq!(task(), same);
        assert_ne!(task(), Task::parse("Task2##urgent;DONE;").unwrap());
    }

    #[test]
    fn test_set_description() {
        let task = task();
        task.set_description("New description now").unwrap();
        assert_eq!(task.description(), "New description now");
        assert!(task.set_description("").is_err());
        assert_eq!(task.description(), "New description now");
    }

    #[test]
    fn test_set_priority_and_status() {
        let task = task();
        task.set_priority(Priority::from_rank(1).unwrap());
        assert!(task.priority().is_important() && task.priority().is_urgent());
        task.set_status(Status::Done);
        assert_eq!(task.status(), Status::Done);
        // status does not drive progress
        assert_eq!(task.progress(), 0);
    }

    #[test]
    fn test_set_and_clear_due_date() {
        let task = task();
        let when = NaiveDate::from_ymd_opt(2019, 1, 10)
            .unwrap()
            .and_hms_opt(10, 10, 0)
            .unwrap();
        task.set_due_date(Some(DueDate::new(when)));
        assert_eq!(task.due_date().unwrap().date_time(), when);
        task.set_due_date(None);
        assert_eq!(task.due_date(), None);
    }

    #[test]
    fn test_progress_range() {
        let task = task();
        task.set_progress(10).unwrap();
        assert_eq!(task.progress(), 10);
        task.set_progress(100).unwrap();
        task.set_progress(50).unwrap();
        assert!(matches!(
            task.set_progress(101),
            Err(TodoError::InvalidRange { value: 101, .. })
        ));
        assert!(task.set_progress(-1).is_err());
        assert_eq!(task.progress(), 50);
    }

    #[test]
    fn test_estimated_time() {
        let task = task();
        task.set_estimated_time_to_complete(5).unwrap();
        task.set_estimated_time_to_complete(2).unwrap();
        assert_eq!(task.estimated_time_to_complete(), 2);
        assert!(matches!(
            task.set_estimated_time_to_complete(-1),
            Err(TodoError::NegativeValue { value: -1, .. })
        ));
        assert_eq!(task.estimated_time_to_complete(), 2);
    }

    #[test]
    fn test_add_tags_by_name_without_duplicates() {
        let task = task();
        task.add_tag("tag1").unwrap();
        task.add_tag("tag2").unwrap();
        task.add_tag("tag1").unwrap();
        task.add_tag(Tag::new("tag2").unwrap()).unwrap();
        assert!(task.contains_tag("tag1").unwrap());
        assert!(task.contains_tag("tag2").unwrap());
        assert_eq!(task.tags().len(), 2);
        assert_eq!(task.add_tag(""), Err(TodoError::EmptyValue("tag name")));
        assert_eq!(task.tags().len(), 2);
    }

    #[test]
    fn test_tag_symmetry() {
        let task = Task::new("Task 1").unwrap();
        let tag = Tag::new("Tag 1").unwrap();
        task.add_tag(&tag).unwrap();
        assert!(task.contains_tag(&tag).unwrap());
        assert!(task.contains_tag("Tag 1").unwrap());
        assert!(task.contains_tag(Tag::new("Tag 1").unwrap()).unwrap());
        assert!(tag.contains_task(&task));

        task.remove_tag(&tag).unwrap();
        assert!(!task.contains_tag(&tag).unwrap());
        assert!(!tag.contains_task(&task));
    }

    #[test]
    fn test_remove_tag_by_other_handle() {
        let task = Task::new("Task 1").unwrap();
        let tag1 = Tag::new("Tag 1").unwrap();
        let tag2 = Tag::new("Tag 2").unwrap();
        task.add_tag(&tag1).unwrap();
        task.add_tag(&tag2).unwrap();

        task.remove_tag(Tag::new("Tag 1").unwrap()).unwrap();
        assert!(!task.contains_tag(&tag1).unwrap());
        assert!(!tag1.contains_task(&task));
        assert!(!task.tags().is_empty());

        task.remove_tag("Tag 3").unwrap();
        task.remove_tag("Tag 2").unwrap();
        assert!(task.tags().is_empty());
        assert!(!tag2.contains_task(&task));
    }

    #[test]
    fn test_remove_and_contains_empty_name() {
        let task = task();
        task.add_tag("tag1").unwrap();
        assert!(task.remove_tag("").is_err());
        assert!(task.contains_tag("").is_err());
        assert_eq!(task.tags().len(), 1);
    }

    #[test]
    fn test_shared_handle() {
        let task = task();
        let alias = task.clone();
        alias.set_progress(40).unwrap();
        assert_eq!(task.progress(), 40);
        assert!(task.ptr_eq(&alias));
        assert!(!task.ptr_eq(&Task::new("This is the description").unwrap()));
    }

    #[test]
    fn test_display() {
        let task = task();
        let when = NaiveDate::from_ymd_opt(2019, 1, 20)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        task.set_due_date(Some(DueDate::new(when)));
        let expected = "\n{\n\tDescription: This is the description\n\tDue date: \
                        Sun Jan 20 2019 08:00 PM\n\tStatus: TODO\n\tPriority: DEFAULT\n\tTags:  \n}";
        assert_eq!(task.to_string(), expected);

        task.add_tag("tag1").unwrap();
        task.add_tag("tag2").unwrap();
        let expected = "\n{\n\tDescription: This is the description\n\tDue date: \
                        Sun Jan 20 2019 08:00 PM\n\tStatus: TODO\n\tPriority: DEFAULT\n\tTags: #tag1, #tag2\n}";
        assert_eq!(task.to_string(), expected);
    }
}
