//! All-tasks board with search and filters

use std::sync::Arc;

use super::list::TaskList;
use super::ViewError;
use crate::client::TaskApi;
use crate::tasks::{Status, Task, TaskDraft, TaskFilter, TaskId};

pub struct TaskBoard {
    list: TaskList,
}

impl TaskBoard {
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

    pub fn visible(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter.apply(self.list.tasks())
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.list.find(id)
    }

    /// Form contents for editing a loaded task
    pub fn edit_draft(&self, id: TaskId) -> Result<TaskDraft, ViewError> {
        self.find(id)
            .map(TaskDraft::from)
            .ok_or(ViewError::TaskNotFound(id))
    }

    pub async fn create(&mut self, draft: &TaskDraft) -> Result<Task, ViewError> {
        self.list.create(draft).await
    }

    pub async fn update(&mut self, id: TaskId, draft: &TaskDraft) -> Result<(), ViewError> {
        self.list.update(id, draft).await
    }

    pub async fn toggle(&mut self, id: TaskId) -> Result<Status, ViewError> {
        self.list.toggle(id).await
    }

    pub async fn delete(&mut self, id: TaskId) -> Result<(), ViewError> {
        self.list.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::Priority;
    use crate::views::testing::FakeApi;

    fn seeded() -> Vec<Task> {
        let mut report = FakeApi::task(1, "Quarterly report");
        report.priority = Priority::High;
        report.description = Some("numbers for finance".to_string());

        let mut groceries = FakeApi::task(2, "Groceries");
        groceries.priority = Priority::Low;
        groceries.status = Status::Completed;

        let mut review = FakeApi::task(3, "Code review");
        review.description = Some("Finance dashboard PR".to_string());

        vec![report, groceries, review]
    }

    #[tokio::test]
    async fn test_visible_combines_filters() {
        let mut board = TaskBoard::new(Arc::new(FakeApi::with_tasks(seeded())));
        board.load().await.unwrap();

        assert_eq!(board.visible(&TaskFilter::new()).len(), 3);

        let finance: Vec<TaskId> = board
            .visible(&TaskFilter::new().search("FINANCE"))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(finance, vec![1, 3]);

        let urgent = TaskFilter::new()
            .search("finance")
            .priority(Priority::High)
            .status(Status::InProgress);
        assert_eq!(board.visible(&urgent).len(), 1);
    }

    #[tokio::test]
    async fn test_edit_replaces_whole_task() {
        let api = Arc::new(FakeApi::with_tasks(seeded()));
        let mut board = TaskBoard::new(api.clone());
        board.load().await.unwrap();

        let mut draft = board.edit_draft(1).unwrap();
        assert_eq!(draft.priority, Priority::High);
        draft.title = "Annual report".to_string();
        board.update(1, &draft).await.unwrap();

        let task = board.find(1).unwrap();
        assert_eq!(task.title, "Annual report");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.description.as_deref(), Some("numbers for finance"));
    }

    #[tokio::test]
    async fn test_create_keeps_requested_status() {
        let mut board = TaskBoard::new(Arc::new(FakeApi::default()));
        let task = board
            .create(&TaskDraft::new("Done already").status(Status::Completed))
            .await
            .unwrap();
        assert_eq!(task.status, Status::Completed);
        assert!(matches!(
            board.edit_draft(42),
            Err(ViewError::TaskNotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let api = Arc::new(FakeApi::with_tasks(seeded()));
        let mut board = TaskBoard::new(api.clone());
        board.load().await.unwrap();

        let draft = TaskDraft::new("");
        assert!(board.update(1, &draft).await.is_err());
        assert_eq!(api.stored()[0].title, "Quarterly report");
    }
}
