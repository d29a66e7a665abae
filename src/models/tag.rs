use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use super::error::{require_non_empty, TodoError};
use super::task::{Task, TaskData};

/// A named label attached to tasks.
///
/// `Tag` is a cheap handle: clones share the same back-reference list. The
/// list holds weak references only, so a tag never keeps a task alive and the
/// task -> tag -> task loop does not leak.
#[derive(Clone)]
pub struct Tag {
    inner: Rc<TagData>,
}

struct TagData {
    name: String,
    tasks: RefCell<Vec<Weak<RefCell<TaskData>>>>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Result<Self, TodoError> {
        let name = name.into();
        require_non_empty("tag name", &name)?;
        Ok(Self {
            inner: Rc::new(TagData {
                name,
                tasks: RefCell::new(Vec::new()),
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether a task equal to `task` currently carries this tag.
    pub fn contains_task(&self, task: &Task) -> bool {
        self.tasks().iter().any(|t| t == task)
    }

    /// Live tasks carrying this tag, in the order they were tagged.
    pub fn tasks(&self) -> Vec<Task> {
        self.inner
            .tasks
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .map(Task::from_inner)
            .collect()
    }

    /// Tag `task`. Same as `task.add_tag(self)`.
    pub fn add_task(&self, task: &Task) {
        task.attach_tag(self.clone());
    }

    /// Untag `task`. Same as `task.remove_tag(self)`.
    pub fn remove_task(&self, task: &Task) {
        task.detach_tag(self);
    }

    /// Record `task` in the back-reference list. Called by `Task::add_tag`.
    pub(crate) fn register(&self, task: &Task) {
        if self.contains_task(task) {
            return;
        }
        self.inner.tasks.borrow_mut().push(task.downgrade());
    }

    /// Drop `task` (and any dead entries) from the back-reference list.
    pub(crate) fn unregister(&self, task: &Task) {
        let keep: Vec<_> = self
            .inner
            .tasks
            .borrow()
            .iter()
            .filter(|weak| match weak.upgrade() {
                Some(inner) => Task::from_inner(inner) != *task,
                None => false,
            })
            .cloned()
            .collect();
        *self.inner.tasks.borrow_mut() = keep;
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("name", &self.name())
            .field("tasks", &self.inner.tasks.borrow().len())
            .finish()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.name())
    }
}

/// Anything a task accepts where a tag is expected: a tag handle or its name.
pub trait IntoTag {
    fn into_tag(self) -> Result<Tag, TodoError>;
}

impl IntoTag for Tag {
    fn into_tag(self) -> Result<Tag, TodoError> {
        Ok(self)
    }
}

impl IntoTag for &Tag {
    fn into_tag(self) -> Result<Tag, TodoError> {
        Ok(self.clone())
    }
}

impl IntoTag for &str {
    fn into_tag(self) -> Result<Tag, TodoError> {
        Tag::new(self)
    }
}

impl IntoTag for String {
    fn into_tag(self) -> Result<Tag, TodoError> {
        Tag::new(self)
    }
}

impl IntoTag for &String {
    fn into_tag(self) -> Result<Tag, TodoError> {
        Tag::new(self.as_str())
    }
}
