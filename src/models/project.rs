use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::error::{require_non_empty, TodoError};
use super::priority::Priority;
use super::todo::Todo;

/// An ordered, duplicate-free collection of todos, possibly nested.
///
/// Like [`Task`](super::Task), a `Project` is a shared handle. Children are
/// shared too: removing a task from one project leaves it in every other
/// project holding it. Nothing prevents a project from containing itself;
/// aggregating such a project does not terminate.
#[derive(Clone)]
pub struct Project {
    inner: Rc<ProjectData>,
}

struct ProjectData {
    description: String,
    priority: Cell<Priority>,
    children: RefCell<Vec<Todo>>,
}

impl Project {
    pub fn new(description: impl Into<String>) -> Result<Self, TodoError> {
        let description = description.into();
        require_non_empty("description", &description)?;
        Ok(Self {
            inner: Rc::new(ProjectData {
                description,
                priority: Cell::new(Priority::default()),
                children: RefCell::new(Vec::new()),
            }),
        })
    }

    pub fn description(&self) -> &str {
        &self.inner.description
    }

    pub fn priority(&self) -> Priority {
        self.inner.priority.get()
    }

    pub fn set_priority(&self, priority: Priority) {
        self.inner.priority.set(priority);
    }

    /// Append `todo` unless an equal todo is already a direct child.
    /// Returns whether it was added.
    pub fn add(&self, todo: impl Into<Todo>) -> bool {
        let todo = todo.into();
        if self.contains(&todo) {
            return false;
        }
        tracing::debug!(project = %self.description(), child = %todo.description(), "adding todo");
        self.inner.children.borrow_mut().push(todo);
        true
    }

    /// Remove the direct child equal to `todo`, keeping the order of the rest.
    /// Returns whether anything was removed.
    pub fn remove(&self, todo: impl Into<Todo>) -> bool {
        let todo = todo.into();
        let mut children = self.inner.children.borrow_mut();
        match children.iter().position(|child| *child == todo) {
            Some(index) => {
                children.remove(index);
                tracing::debug!(project = %self.description(), child = %todo.description(), "removed todo");
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, todo: impl Into<Todo>) -> bool {
        let todo = todo.into();
        self.inner.children.borrow().iter().any(|child| *child == todo)
    }

    /// Number of direct children.
    pub fn number_of_tasks(&self) -> usize {
        self.inner.children.borrow().len()
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> Vec<Todo> {
        self.inner.children.borrow().clone()
    }

    /// Sum of the children's estimates, descending into sub-projects.
    pub fn estimated_time_to_complete(&self) -> u64 {
        self.inner
            .children
            .borrow()
            .iter()
            .map(Todo::estimated_time_to_complete)
            .sum()
    }

    /// Floor of the children's average progress. An empty project reports 100.
    pub fn progress(&self) -> u32 {
        let children = self.inner.children.borrow();
        if children.is_empty() {
            return 100;
        }
        let total: u32 = children.iter().map(Todo::progress).sum();
        total / children.len() as u32
    }

    /// True when the project has children and all of them are fully done.
    /// An empty project is not completed even though its progress reads 100.
    pub fn is_completed(&self) -> bool {
        self.number_of_tasks() != 0 && self.progress() == 100
    }

    /// Direct children ordered by priority bucket, see [`PriorityIter`].
    pub fn iter(&self) -> PriorityIter {
        PriorityIter::new(&self.inner.children.borrow())
    }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.description() == other.description()
    }
}

impl Eq for Project {}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("description", &self.description())
            .field("priority", &self.priority())
            .field("children", &self.number_of_tasks())
            .finish()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl IntoIterator for &Project {
    type Item = Todo;
    type IntoIter = PriorityIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Stable partition of `children` into the four priority buckets:
/// important and urgent, important, urgent, neither. Insertion order is kept
/// within each bucket.
pub fn priority_order(children: &[Todo]) -> Vec<Todo> {
    Priority::BUCKETS
        .iter()
        .flat_map(|bucket| {
            children
                .iter()
                .filter(move |child| child.priority() == *bucket)
                .cloned()
        })
        .collect()
}

/// Single-pass walk over a project's direct children in priority order.
///
/// The order is fixed when the iterator is created; later changes to the
/// project are not observed.
#[derive(Debug)]
pub struct PriorityIter {
    ordered: std::vec::IntoIter<Todo>,
}

impl PriorityIter {
    fn new(children: &[Todo]) -> Self {
        Self {
            ordered: priority_order(children).into_iter(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.ordered.len() > 0
    }

    /// Next child, or `EndOfSequence` once every child has been handed out.
    pub fn advance(&mut self) -> Result<Todo, TodoError> {
        self.ordered.next().ok_or(TodoError::EndOfSequence)
    }
}

impl Iterator for PriorityIter {
    type Item = Todo;

    fn next(&mut self) -> Option<Todo> {
        self.ordered.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ordered.size_hint()
    }
}

impl ExactSizeIterator for PriorityIter {}
