//! Benchmarks for the task list transformations
//!
//! Run with: cargo bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use taskflow::tasks::export::format_csv;
use taskflow::tasks::*;

fn create_test_tasks(count: usize) -> Vec<Task> {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();

    (0..count)
        .map(|i| {
            let created_at = base + Duration::hours(i as i64 * 7);
            Task {
                id: i as TaskId + 1,
                title: format!("Task {} for the weekly review", i),
                description: (i % 2 == 0).then(|| format!("Notes, \"quoted\" for task {}", i)),
                priority: Priority::all()[i % 3],
                status: Status::all()[i % 2],
                due_date: (i % 4 == 0).then(|| (created_at + Duration::days(3)).date_naive()),
                created_at,
                updated_at: Some(created_at + Duration::hours(30)),
                user_id: Some(1),
            }
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    for size in [100, 500] {
        let tasks = create_test_tasks(size);
        group.throughput(Throughput::Elements(size as u64));

        let filter = TaskFilter::new()
            .search("REVIEW")
            .status(Status::InProgress)
            .priority(Priority::High);

        group.bench_function(format!("search_{}", size), |b| {
            b.iter(|| filter.apply(black_box(&tasks)).len())
        });

        group.bench_function(format!("overdue_{}", size), |b| {
            b.iter(|| DashboardFilter::Overdue.apply(black_box(&tasks), now).len())
        });
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");
    let tasks = create_test_tasks(500);
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    group.bench_function("dashboard_500", |b| {
        b.iter(|| DashboardStats::compute(black_box(&tasks), now))
    });

    group.bench_function("analytics_500", |b| {
        b.iter(|| AnalyticsReport::compute(black_box(&tasks), now))
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let tasks = create_test_tasks(500);
    group.throughput(Throughput::Elements(tasks.len() as u64));

    group.bench_function("csv_500", |b| {
        b.iter(|| format_csv(black_box(&tasks)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_filter, bench_stats, bench_export);
criterion_main!(benches);
