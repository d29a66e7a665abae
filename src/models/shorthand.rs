//! Compact `"Description##keyword;keyword;"` notation accepted when a task is
//! typed in one line.
//!
//! Recognised keywords (case-insensitive): `today` and `tomorrow` set the due
//! date, `important` and `urgent` raise the priority, status names set the
//! status. When two date or two status keywords appear, the first wins. Any
//! other token is a tag name.

use super::due_date::DueDate;
use super::priority::Priority;
use super::status::Status;

const SEPARATOR: &str = "##";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shorthand {
    pub description: String,
    pub status: Option<Status>,
    pub priority: Priority,
    pub due_date: Option<DueDate>,
    pub tags: Vec<String>,
}

impl Shorthand {
    /// Split `input` into its description and keyword parts. Never fails;
    /// validation of the description happens when the task is built.
    pub fn parse(input: &str) -> Self {
        let (description, modifiers) = match input.split_once(SEPARATOR) {
            Some((description, modifiers)) => (description, modifiers),
            None => (input, ""),
        };

        let mut parsed = Shorthand {
            description: description.to_string(),
            ..Default::default()
        };

        for token in modifiers.split(';').map(str::trim).filter(|t| !t.is_empty()) {
            match token.to_lowercase().as_str() {
                "today" => {
                    parsed.due_date.get_or_insert_with(DueDate::end_of_today);
                }
                "tomorrow" => {
                    parsed.due_date.get_or_insert_with(DueDate::end_of_tomorrow);
                }
                "important" => parsed.priority = parsed.priority.with_important(true),
                "urgent" => parsed.priority = parsed.priority.with_urgent(true),
                other => match Status::parse(other) {
                    Some(status) => {
                        parsed.status.get_or_insert(status);
                    }
                    None => parsed.tags.push(token.to_string()),
                },
            }
        }

        parsed
    }
}
