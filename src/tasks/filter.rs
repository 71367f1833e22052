//! Client-side task filtering
//!
//! All criteria of a filter are conjunctive.

use chrono::{DateTime, Utc};
use std::str::FromStr;

use super::types::{ParseEnumError, Priority, Status, Task};

/// Search and field filters for the task board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    /// Case-insensitive substring matched against title or description
    pub search: String,
    /// Exact status, `None` = all
    pub status: Option<Status>,
    /// Exact priority, `None` = all
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the search text
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Builder method: restrict to one status
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Builder method: restrict to one priority
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Check a single task against every criterion
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && self.status.map(|s| task.status == s).unwrap_or(true)
            && self.priority.map(|p| task.priority == p).unwrap_or(true)
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }

    /// Tasks matching this filter, in their original order
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Quick filters shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardFilter {
    #[default]
    All,
    InProgress,
    Completed,
    Overdue,
}

impl DashboardFilter {
    pub fn all() -> &'static [DashboardFilter] {
        &[
            DashboardFilter::All,
            DashboardFilter::InProgress,
            DashboardFilter::Completed,
            DashboardFilter::Overdue,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardFilter::All => "all",
            DashboardFilter::InProgress => "in_progress",
            DashboardFilter::Completed => "completed",
            DashboardFilter::Overdue => "overdue",
        }
    }

    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            DashboardFilter::All => true,
            DashboardFilter::InProgress => task.status == Status::InProgress,
            DashboardFilter::Completed => task.status == Status::Completed,
            DashboardFilter::Overdue => task.is_overdue(now),
        }
    }

    pub fn apply<'a>(&self, tasks: &'a [Task], now: DateTime<Utc>) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t, now)).collect()
    }
}

impl std::fmt::Display for DashboardFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "all" => Ok(DashboardFilter::All),
            "in_progress" => Ok(DashboardFilter::InProgress),
            "completed" => Ok(DashboardFilter::Completed),
            "overdue" => Ok(DashboardFilter::Overdue),
            _ => Err(ParseEnumError::new("dashboard filter", s)),
        }
    }
}
