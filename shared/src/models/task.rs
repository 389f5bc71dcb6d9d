//! Monthly task calendar models

use serde::{Deserialize, Serialize};

/// Tasks for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyTasks {
    /// 1 = January, 12 = December
    pub month: u32,
    pub month_name: String,
    pub tasks: Vec<String>,
    pub priority: TaskPriority,
}

/// Workload label derived from the number of tasks in a month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// More than 4 tasks is high, more than 2 is medium
    pub fn from_task_count(count: usize) -> Self {
        if count > 4 {
            TaskPriority::High
        } else if count > 2 {
            TaskPriority::Medium
        } else {
            TaskPriority::Low
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "Low"),
            TaskPriority::Medium => write!(f, "Medium"),
            TaskPriority::High => write!(f, "High"),
        }
    }
}
