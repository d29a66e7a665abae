use super::priority::Priority;
use super::project::Project;
use super::task::Task;

/// Either a leaf task or a project of further todos.
///
/// Two todos are equal when they are the same kind and their descriptions
/// match.
#[derive(Debug, Clone, PartialEq)]
pub enum Todo {
    Task(Task),
    Project(Project),
}

impl Todo {
    pub fn description(&self) -> String {
        match self {
            Todo::Task(task) => task.description(),
            Todo::Project(project) => project.description().to_string(),
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            Todo::Task(task) => task.priority(),
            Todo::Project(project) => project.priority(),
        }
    }

    pub fn set_priority(&self, priority: Priority) {
        match self {
            Todo::Task(task) => task.set_priority(priority),
            Todo::Project(project) => project.set_priority(priority),
        }
    }

    /// Stored estimate for a task, recursive sum for a project.
    pub fn estimated_time_to_complete(&self) -> u64 {
        match self {
            Todo::Task(task) => u64::from(task.estimated_time_to_complete()),
            Todo::Project(project) => project.estimated_time_to_complete(),
        }
    }

    /// Stored progress for a task, recursive average for a project.
    pub fn progress(&self) -> u32 {
        match self {
            Todo::Task(task) => task.progress(),
            Todo::Project(project) => project.progress(),
        }
    }

    pub fn as_task(&self) -> Option<&Task> {
        match self {
            Todo::Task(task) => Some(task),
            Todo::Project(_) => None,
        }
    }

    pub fn as_project(&self) -> Option<&Project> {
        match self {
            Todo::Project(project) => Some(project),
            Todo::Task(_) => None,
        }
    }
}

impl From<Task> for Todo {
    fn from(task: Task) -> Self {
        Todo::Task(task)
    }
}

impl From<&Task> for Todo {
    fn from(task: &Task) -> Self {
        Todo::Task(task.clone())
    }
}

impl From<Project> for Todo {
    fn from(project: Project) -> Self {
        Todo::Project(project)
    }
}

impl From<&Project> for Todo {
    fn from(project: &Project) -> Self {
        Todo::Project(project.clone())
    }
}

impl From<&Todo> for Todo {
    fn from(todo: &Todo) -> Self {
        todo.clone()
    }
}
