//! In-memory task list shared by the task-centric views

use std::sync::Arc;

use super::ViewError;
use crate::client::TaskApi;
use crate::tasks::{Status, Task, TaskDraft, TaskId};
use crate::validation::validate_task;

/// A view's copy of the server task list
///
/// Mutations go to the server first; the list is only replaced by a full
/// re-fetch once the server accepted the change.
pub(crate) struct TaskList {
    api: Arc<dyn TaskApi>,
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub async fn refresh(&mut self) -> Result<&[Task], ViewError> {
        self.tasks = self.api.list_tasks().await?;
        Ok(&self.tasks)
    }

    pub async fn create(&mut self, draft: &TaskDraft) -> Result<Task, ViewError> {
        validate_task(draft)?;
        let task = self.api.create_task(draft).await?;
        self.refresh().await?;
        Ok(task)
    }

    pub async fn update(&mut self, id: TaskId, draft: &TaskDraft) -> Result<(), ViewError> {
        validate_task(draft)?;
        self.api.update_task(id, draft).await?;
        self.refresh().await?;
        Ok(())
    }

    /// Flip the status of a loaded task, returning the new status
    pub async fn toggle(&mut self, id: TaskId) -> Result<Status, ViewError> {
        let draft = self
            .find(id)
            .map(|task| task.toggled().to_draft())
            .ok_or(ViewError::TaskNotFound(id))?;

        self.api.update_task(id, &draft).await?;
        self.refresh().await?;
        Ok(draft.status)
    }

    pub async fn delete(&mut self, id: TaskId) -> Result<(), ViewError> {
        self.api.delete_task(id).await?;
        self.refresh().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use crate::views::testing::FakeApi;

    #[tokio::test]
    async fn test_mutations_refetch() {
        let api = Arc::new(FakeApi::with_tasks(vec![FakeApi::task(1, "Existing")]));
        let mut list = TaskList::new(api.clone());

        list.refresh().await.unwrap();
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(api.list_calls(), 1);

        list.create(&TaskDraft::new("New")).await.unwrap();
        assert_eq!(list.tasks().len(), 2);
        assert_eq!(api.list_calls(), 2);

        assert_eq!(list.toggle(1).await.unwrap(), Status::Completed);
        assert!(list.find(1).unwrap().is_completed());
        assert_eq!(api.list_calls(), 3);

        list.delete(1).await.unwrap();
        assert!(list.find(1).is_none());
        assert_eq!(api.list_calls(), 4);
    }

    #[tokio::test]
    async fn test_blank_title_never_reaches_server() {
        let api = Arc::new(FakeApi::default());
        let mut list = TaskList::new(api.clone());

        let err = list.create(&TaskDraft::new("   ")).await.unwrap_err();
        assert!(matches!(
            err,
            ViewError::Validation(ValidationError::Required(_))
        ));
        assert_eq!(api.create_calls(), 0);
        assert_eq!(api.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_toggle_unknown_task() {
        let api = Arc::new(FakeApi::default());
        let mut list = TaskList::new(api);
        list.refresh().await.unwrap();

        assert!(matches!(
            list.toggle(99).await,
            Err(ViewError::TaskNotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_list() {
        let api = Arc::new(FakeApi::with_tasks(vec![FakeApi::task(1, "Keep me")]));
        let mut list = TaskList::new(api.clone());
        list.refresh().await.unwrap();

        api.expire_session();
        let err = list.delete(1).await.unwrap_err();
        assert!(err.redirect().is_some());
        assert_eq!(list.tasks().len(), 1);
    }
}
