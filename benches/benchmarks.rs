//! Benchmark suite for the projman store.
//!
//! - Record save (serialize, fsync, rename) for projects of various sizes
//! - `load_all` over stores holding many projects
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench -- --save-baseline main
//! cargo bench -- --baseline main
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

use projman::model::{Project, Task, TaskPriority, TaskStatus};
use projman::store::{FileStore, ProjectStore};

/// A project with `tasks` tasks, every third one done.
fn project_with_tasks(name: &str, tasks: usize) -> Project {
    let mut project = Project::new(name, Some("benchmark project".to_string()));
    for i in 0..tasks {
        let mut task = Task::new(format!("task-{i}"), None, TaskPriority::Normal);
        if i % 3 == 0 {
            task.change_status(TaskStatus::InProgress).unwrap();
            task.change_status(TaskStatus::Done).unwrap();
        }
        project.add_task(task).unwrap();
    }
    project
}

// ============================================================================
// Save Benchmarks
// ============================================================================

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_save");

    for size in [0, 10, 100] {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let project = project_with_tasks("Bench", size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("tasks", size), &project, |b, project| {
            b.iter(|| store.save(black_box(project)).unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// Load Benchmarks
// ============================================================================

fn bench_load_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_load_all");
    group.sample_size(20);

    for count in [10, 50, 200] {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        for i in 0..count {
            store
                .save(&project_with_tasks(&format!("project-{i}"), 10))
                .unwrap();
        }

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("projects", count), &store, |b, store| {
            b.iter(|| black_box(store.load_all().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(store_benches, bench_save, bench_load_all);
criterion_main!(store_benches);
