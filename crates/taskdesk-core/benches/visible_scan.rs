#![allow(missing_docs)]

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use taskdesk_core::{Completion, DueDate, FilterSpec, Task, TaskId, TaskQuery};

fn build_tasks(count: usize) -> Vec<Task> {
    (0..count)
        .map(|idx| Task {
            id: TaskId::new(idx.to_string()),
            title: format!("Task {idx} quarterly proposal"),
            body: format!("Body text for task {idx}"),
            due_date: DueDate::new("2024-12-15T14:30:00Z"),
            completed: idx % 3 == 0,
            assigned_to: format!("user-{}", idx % 8),
            comments: Vec::new(),
        })
        .collect()
}

fn visible_scan_benchmark(c: &mut Criterion) {
    let filter = FilterSpec::new()
        .with_completion(Completion::Incomplete)
        .with_assignee("user-3");
    let mut group = c.benchmark_group("visible_scan");
    for &count in &[100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || build_tasks(count),
                |tasks| {
                    let query = TaskQuery::new("proposal", &filter);
                    black_box(query.filter(tasks.iter()));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, visible_scan_benchmark);
criterion_main!(benches);
