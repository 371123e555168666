use std::num::NonZeroUsize;
use std::sync::Barrier;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;

use link_alloc::Allocator;
use link_alloc::AllocatorConfig;
use link_alloc::BatchedRoundRobin;
use link_alloc::SharedAllocator;
use link_alloc::project;

const LINKS: usize = 10;

/// The projection bench only runs a few thousand allocations.
const PROJECTION_QUOTA: usize = 1_000;

/// A configuration whose capacity covers at least `iters` allocations, so a
/// measured run never reaches the exhausted path.
///
/// `group_size` of `None` fills links one after the other.
fn fresh_config(iters: u64, group_size: Option<usize>) -> AllocatorConfig {
    let per_link = (iters as usize).div_ceil(LINKS).max(1);
    let group = group_size.unwrap_or(per_link);
    // Round up to whole groups.
    let quota = per_link.div_ceil(group) * group;
    let config = AllocatorConfig::new(
        (0..LINKS).map(|i| format!("http://link-{i}.example")).collect(),
        quota,
        NonZeroUsize::new(group).expect("group size is positive"),
    );
    assert!(config.capacity() >= iters as usize);
    config
}

fn fresh_allocator(iters: u64, group_size: Option<usize>) -> BatchedRoundRobin {
    BatchedRoundRobin::new(fresh_config(iters, group_size))
}

fn drain(allocator: &BatchedRoundRobin, iters: u64) -> Duration {
    let start = Instant::now();
    for _ in 0..iters {
        black_box(allocator.next()).expect("capacity covers the run");
    }
    start.elapsed()
}

fn bench_allocation(name: &str, c: &mut Criterion, group_size: Option<usize>) {
    let mut group = c.benchmark_group(name);

    group.bench_function("single-threaded", |b| {
        b.iter_custom(|iters| drain(&fresh_allocator(iters, group_size), iters))
    });

    for threads in [2usize, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("threads", threads),
            &threads,
            |b, &threads| {
                b.iter_custom(|iters| {
                    let allocator = fresh_allocator(iters, group_size);
                    let per_thread = iters / threads as u64;
                    let start_line = Barrier::new(threads + 1);

                    thread::scope(|s| {
                        for _ in 0..threads {
                            s.spawn(|| {
                                start_line.wait();
                                for _ in 0..per_thread {
                                    let _ = black_box(allocator.next());
                                }
                            });
                        }
                        start_line.wait();
                        // Leaving the scope joins every worker.
                        Instant::now()
                    })
                    .elapsed()
                })
            },
        );
    }

    group.finish();
}

fn bench_shared_handle(c: &mut Criterion) {
    let shared = SharedAllocator::new();
    let mut group = c.benchmark_group("SharedAllocator");

    group.bench_function("next", |b| {
        b.iter_custom(|iters| {
            shared.install(fresh_config(iters, Some(5)));
            let start = Instant::now();
            for _ in 0..iters {
                black_box(shared.next()).expect("capacity covers the run");
            }
            start.elapsed()
        })
    });

    shared.install(fresh_config(12_345, Some(5)));
    for _ in 0..6_000 {
        let _ = shared.next();
    }
    group.bench_function("progress", |b| {
        b.iter(|| {
            let _ = black_box(&shared).progress();
        })
    });

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let allocator = BatchedRoundRobin::new(AllocatorConfig::new(
        (0..100).map(|i| format!("http://link-{i}.example")).collect(),
        PROJECTION_QUOTA,
        NonZeroUsize::new(5).expect("group size is positive"),
    ));
    for _ in 0..12_345 {
        let _ = allocator.next();
    }
    let snapshot = allocator.info();

    c.bench_function("project-100-links", |b| {
        b.iter(|| project(black_box(&snapshot)))
    });
}

fn run_all_benches(c: &mut Criterion) {
    bench_allocation("Sequential", c, None);
    bench_allocation("Batched", c, Some(5));
    bench_shared_handle(c);
    bench_projection(c);
}

criterion_group!(benches, run_all_benches);
criterion_main!(benches);
