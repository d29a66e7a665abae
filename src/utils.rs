use chrono::{NaiveDate, NaiveDateTime};
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

use crate::models::DueDate;

const APP_NAME: &str = "todo-tree";
const DEV_APP_NAME: &str = "todo-tree-dev";

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    fn app_name(&self) -> &'static str {
        match self {
            Profile::Dev => DEV_APP_NAME,
            Profile::Prod => APP_NAME,
        }
    }
}

/// Get the configuration directory path
/// If profile is Dev, uses "todo-tree-dev" instead of "todo-tree"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", APP_NAME, profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", APP_NAME, profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Parse a due date given as `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`.
/// A bare date is due at the end of that day.
pub fn parse_due(due_str: &str) -> Result<DueDate, chrono::ParseError> {
    let due_str = due_str.trim();
    match NaiveDateTime::parse_from_str(due_str, "%Y-%m-%d %H:%M") {
        Ok(when) => Ok(DueDate::new(when)),
        Err(_) => NaiveDate::parse_from_str(due_str, "%Y-%m-%d").map(DueDate::end_of_day),
    }
}
