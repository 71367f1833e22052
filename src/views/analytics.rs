//! Analytics report over the full task list

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::list::TaskList;
use super::ViewError;
use crate::client::TaskApi;
use crate::tasks::{AnalyticsReport, Task};

pub struct AnalyticsView {
    list: TaskList,
}

impl AnalyticsView {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            list: TaskList::new(api),
        }
    }

    pub async fn load(&mut self) -> Result<&[Task], ViewError> {
        self.list.refresh().await
    }

    pub fn report(&self, now: DateTime<Utc>) -> AnalyticsReport {
        AnalyticsReport::compute(self.list.tasks(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{Priority, Status, ACTIVITY_DAYS};
    use crate::views::testing::FakeApi;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_report_after_load() {
        let mut tasks: Vec<Task> = (1..=4).map(|id| FakeApi::task(id, "t")).collect();
        tasks[0].status = Status::Completed;
        tasks[1].priority = Priority::High;
        tasks[2].priority = Priority::Low;

        let mut view = AnalyticsView::new(Arc::new(FakeApi::with_tasks(tasks)));
        let now = Utc.with_ymd_and_hms(2025, 3, 2, 18, 0, 0).unwrap();

        assert_eq!(view.report(now).total_created, 0);

        view.load().await.unwrap();
        let report = view.report(now);
        assert_eq!(report.total_created, 4);
        assert_eq!(report.total_completed, 1);
        assert_eq!(report.completion_rate, 25);
        assert_eq!(report.priority_distribution.high, 1);
        assert_eq!(report.priority_distribution.medium, 2);
        assert_eq!(report.activity.len(), ACTIVITY_DAYS as usize);
    }
}
