use std::fmt;

use super::error::TodoError;

/// Importance x urgency classification of a todo.
///
/// The four categories are ranked 1 to 4, which is also the order in which a
/// project hands out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    ImportantUrgent,
    Important,
    Urgent,
    #[default]
    Neither,
}

impl Priority {
    /// All categories in bucket order.
    pub const BUCKETS: [Priority; 4] = [
        Priority::ImportantUrgent,
        Priority::Important,
        Priority::Urgent,
        Priority::Neither,
    ];

    /// Build a priority from its numeric rank:
    /// 1 = important and urgent, 2 = important, 3 = urgent, 4 = neither.
    pub fn from_rank(rank: i32) -> Result<Self, TodoError> {
        match rank {
            1 => Ok(Self::ImportantUrgent),
            2 => Ok(Self::Important),
            3 => Ok(Self::Urgent),
            4 => Ok(Self::Neither),
            _ => Err(TodoError::InvalidRange {
                field: "priority rank",
                value: rank as i64,
                min: 1,
                max: 4,
            }),
        }
    }

    pub fn new(important: bool, urgent: bool) -> Self {
        match (important, urgent) {
            (true, true) => Self::ImportantUrgent,
            (true, false) => Self::Important,
            (false, true) => Self::Urgent,
            (false, false) => Self::Neither,
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Self::ImportantUrgent => 1,
            Self::Important => 2,
            Self::Urgent => 3,
            Self::Neither => 4,
        }
    }

    pub fn is_important(&self) -> bool {
        matches!(self, Self::ImportantUrgent | Self::Important)
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::ImportantUrgent | Self::Urgent)
    }

    /// Same category with the importance flag replaced.
    pub fn with_important(self, important: bool) -> Self {
        Self::new(important, self.is_urgent())
    }

    /// Same category with the urgency flag replaced.
    pub fn with_urgent(self, urgent: bool) -> Self {
        Self::new(self.is_important(), urgent)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ImportantUrgent => "IMPORTANT & URGENT",
            Self::Important => "IMPORTANT",
            Self::Urgent => "URGENT",
            Self::Neither => "DEFAULT",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
