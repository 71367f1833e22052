//! Aggregate statistics for the dashboard and analytics report

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::types::{Priority, Status, Task};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days shown in the activity series
pub const ACTIVITY_DAYS: i64 = 7;

/// Number of weeks shown in the completion trend
pub const TREND_WEEKS: i64 = 4;

/// Headline counters for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Not completed and due strictly before now
    pub overdue: usize,
    /// Mean days between creation and last update of completed tasks
    pub avg_completion_days: f64,
}

impl DashboardStats {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let completed: Vec<&Task> = tasks.iter().filter(|t| t.is_completed()).collect();

        let avg_completion_days = if completed.is_empty() {
            0.0
        } else {
            let total_days: f64 = completed
                .iter()
                .map(|t| (t.last_modified() - t.created_at).num_seconds() as f64 / SECONDS_PER_DAY)
                .sum();
            total_days / completed.len() as f64
        };

        Self {
            total: tasks.len(),
            in_progress: tasks.iter().filter(|t| t.status == Status::InProgress).count(),
            completed: completed.len(),
            overdue: tasks.iter().filter(|t| t.is_overdue(now)).count(),
            avg_completion_days,
        }
    }
}

/// Task counts per priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityDistribution {
    pub fn count(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Created/completed counts for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub created: usize,
    pub completed: usize,
}

/// Completion rate of tasks created within one week (`start`, `end`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyRate {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub created: usize,
    pub completion_rate: u32,
}

/// Everything shown on the analytics page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_created: usize,
    pub total_completed: usize,
    /// Rounded percentage, 0 when there are no tasks
    pub completion_rate: u32,
    pub priority_distribution: PriorityDistribution,
    /// Oldest day first
    pub activity: Vec<DailyActivity>,
    /// Oldest week first
    pub weekly_trend: Vec<WeeklyRate>,
}

impl AnalyticsReport {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let total_completed = tasks.iter().filter(|t| t.is_completed()).count();

        let mut priority_distribution = PriorityDistribution::default();
        for task in tasks {
            match task.priority {
                Priority::High => priority_distribution.high += 1,
                Priority::Medium => priority_distribution.medium += 1,
                Priority::Low => priority_distribution.low += 1,
            }
        }

        Self {
            total_created: tasks.len(),
            total_completed,
            completion_rate: completion_rate(total_completed, tasks.len()),
            priority_distribution,
            activity: daily_activity(tasks, now),
            weekly_trend: weekly_trend(tasks, now),
        }
    }
}

/// Rounded completion percentage
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

fn daily_activity(tasks: &[Task], now: DateTime<Utc>) -> Vec<DailyActivity> {
    let today = now.date_naive();

    (0..ACTIVITY_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DailyActivity {
                date,
                created: tasks
                    .iter()
                    .filter(|t| t.created_at.date_naive() == date)
                    .count(),
                completed: tasks
                    .iter()
                    .filter(|t| t.is_completed() && t.last_modified().date_naive() == date)
                    .count(),
            }
        })
        .collect()
}

fn weekly_trend(tasks: &[Task], now: DateTime<Utc>) -> Vec<WeeklyRate> {
    (0..TREND_WEEKS)
        .map(|week| {
            let start = now - Duration::weeks(TREND_WEEKS - week);
            let end = start + Duration::weeks(1);
            let window: Vec<&Task> = tasks
                .iter()
                .filter(|t| t.created_at > start && t.created_at <= end)
                .collect();
            let completed = window.iter().filter(|t| t.is_completed()).count();

            WeeklyRate {
                label: format!("Week {}", week + 1),
                start,
                end,
                created: window.len(),
                completion_rate: completion_rate(completed, window.len()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    fn task(id: i64, status: Status, priority: Priority, created_days_ago: i64) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            priority,
            status,
            due_date: None,
            created_at: now() - Duration::days(created_days_ago),
            updated_at: None,
            user_id: None,
        }
    }

    #[test]
    fn test_dashboard_counts() {
        let mut tasks = vec![
            task(1, Status::InProgress, Priority::High, 3),
            task(2, Status::Completed, Priority::Low, 4),
            task(3, Status::InProgress, Priority::Medium, 1),
        ];
        tasks[0].due_date = NaiveDate::from_ymd_opt(2025, 3, 14);
        tasks[1].due_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        tasks[2].due_date = NaiveDate::from_ymd_opt(2025, 3, 20);
        tasks[1].updated_at = Some(tasks[1].created_at + Duration::days(2));

        let stats = DashboardStats::compute(&tasks, now());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.overdue, 1);
        assert!((stats.avg_completion_days - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_overdue_is_zero_when_all_completed() {
        let tasks: Vec<Task> = (0..5)
            .map(|i| {
                let mut t = task(i, Status::Completed, Priority::Medium, 10);
                t.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);
                t
            })
            .collect();

        assert_eq!(DashboardStats::compute(&tasks, now()).overdue, 0);
    }

    #[test]
    fn test_empty_list() {
        let stats = DashboardStats::compute(&[], now());
        assert_eq!(stats, DashboardStats::default());

        let report = AnalyticsReport::compute(&[], now());
        assert_eq!(report.completion_rate, 0);
        assert_eq!(report.activity.len(), ACTIVITY_DAYS as usize);
        assert_eq!(report.weekly_trend.len(), TREND_WEEKS as usize);
    }

    #[test]
    fn test_analytics_report() {
        let mut tasks = vec![
            task(1, Status::Completed, Priority::High, 0),
            task(2, Status::InProgress, Priority::High, 0),
            task(3, Status::Completed, Priority::Low, 6),
            task(4, Status::InProgress, Priority::Medium, 20),
        ];
        tasks[2].updated_at = Some(now() - Duration::days(1));

        let report = AnalyticsReport::compute(&tasks, now());
        assert_eq!(report.total_created, 4);
        assert_eq!(report.total_completed, 2);
        assert_eq!(report.completion_rate, 50);
        assert_eq!(report.priority_distribution.count(Priority::High), 2);
        assert_eq!(report.priority_distribution.low, 1);

        let today = report.activity.last().unwrap();
        assert_eq!(today.date, now().date_naive());
        assert_eq!(today.created, 2);
        assert_eq!(today.completed, 1);

        let first = report.activity.first().unwrap();
        assert_eq!(first.date, now().date_naive() - Duration::days(6));
        assert_eq!(first.created, 1);

        let yesterday = &report.activity[5];
        assert_eq!(yesterday.completed, 1);

        let last_week = report.weekly_trend.last().unwrap();
        assert_eq!(last_week.label, "Week 4");
        assert_eq!(last_week.created, 3);
        assert_eq!(last_week.completion_rate, 67);
        assert_eq!(report.weekly_trend[1].created, 1);
        assert_eq!(report.weekly_trend[1].completion_rate, 0);
    }

    #[test]
    fn test_completion_rate_rounding() {
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(0, 0), 0);
    }
}
