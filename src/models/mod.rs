//! The todo model: leaf tasks, composite projects and their value types.
//!
//! Tasks, projects and tags are reference-counted handles for single-threaded
//! use. Mutators take `&self` and validate before changing anything.

pub mod due_date;
pub mod error;
pub mod priority;
pub mod project;
pub mod shorthand;
pub mod status;
pub mod tag;
pub mod task;
pub mod todo;

pub use due_date::DueDate;
pub use error::TodoError;
pub use priority::Priority;
pub use project::{priority_order, PriorityIter, Project};
pub use shorthand::Shorthand;
pub use status::Status;
pub use tag::{IntoTag, Tag};
pub use task::Task;
pub use todo::Todo;
