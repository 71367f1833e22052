//! Dashboard: headline counters, quick add and the recent task list

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::list::TaskList;
use super::ViewError;
use crate::client::TaskApi;
use crate::tasks::{DashboardFilter, DashboardStats, Status, Task, TaskDraft, TaskId};

/// Number of tasks shown in the recent list
pub const RECENT_LIMIT: usize = 8;

pub struct DashboardView {
    list: TaskList,
}

impl DashboardView {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            list: TaskList::new(api),
        }
    }

    pub async fn load(&mut self) -> Result<&[Task], ViewError> {
        self.list.refresh().await
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    pub fn stats(&self, now: DateTime<Utc>) -> DashboardStats {
        DashboardStats::compute(self.list.tasks(), now)
    }

    pub fn visible(&self, filter: DashboardFilter, now: DateTime<Utc>) -> Vec<&Task> {
        filter.apply(self.list.tasks(), now)
    }

    /// First [`RECENT_LIMIT`] tasks passing `filter`, in server order
    pub fn recent(&self, filter: DashboardFilter, now: DateTime<Utc>) -> Vec<&Task> {
        let mut tasks = self.visible(filter, now);
        tasks.truncate(RECENT_LIMIT);
        tasks
    }

    /// Create a task from the quick-add form; it always starts in progress
    pub async fn quick_add(&mut self, draft: TaskDraft) -> Result<Task, ViewError> {
        let draft = draft.status(Status::InProgress);
        self.list.create(&draft).await
    }

    pub async fn toggle(&mut self, id: TaskId) -> Result<Status, ViewError> {
        self.list.toggle(id).await
    }

    pub async fn delete(&mut self, id: TaskId) -> Result<(), ViewError> {
        self.list.delete(id).await
    }
}
