pub mod cli;
pub mod config;
pub mod models;
pub mod records;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use models::{DueDate, Priority, Project, Status, Tag, Task, Todo, TodoError};
pub use storage::TaskStore;
pub use utils::Profile;
