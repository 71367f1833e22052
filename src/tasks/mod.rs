//! Task domain
//!
//! Pure, synchronous transformations over the task list fetched from the
//! server: filtering, aggregate statistics and export.
//!
//! ## Example
//!
//! ```rust,ignore
//! use taskflow::tasks::{DashboardStats, Status, TaskFilter};
//!
//! let open = TaskFilter::new().search("report").status(Status::InProgress).apply(&tasks);
//! let stats = DashboardStats::compute(&tasks, chrono::Utc::now());
//! ```

pub mod export;
mod filter;
mod stats;
mod types;

pub use export::{default_export_filename, ExportError, ExportFormat};
pub use filter::{DashboardFilter, TaskFilter};
pub use stats::{
    completion_rate, AnalyticsReport, DailyActivity, DashboardStats, PriorityDistribution,
    WeeklyRate, ACTIVITY_DAYS, TREND_WEEKS,
};
pub use types::{
    parse_due_date, parse_timestamp, ParseEnumError, Priority, Status, Task, TaskDraft, TaskId,
};
