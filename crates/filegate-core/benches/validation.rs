//! Validation benchmarks for filegate.
//!
//! Measures the hot request-path checks:
//! - File name validation throughput
//! - Path resolution (containment check)
//! - Sequential naming fast path
//!
//! Resolution and naming hit the filesystem (canonicalize/exists), so
//! their numbers are syscall-bound; name validation should stay well
//! under a microsecond.

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use filegate_core::FileName;
use filegate_core::SandboxRoot;
use filegate_core::SequentialNamer;
use filegate_core::resolve_safe_path;
use std::hint::black_box;
use tempfile::TempDir;

/// File name validation benchmarks.
fn benchmark_name_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("name_validation");

    group.bench_function("ordinary", |b| {
        b.iter(|| FileName::validate(black_box("quarterly-report.pdf")));
    });

    group.bench_function("rejected_character", |b| {
        b.iter(|| FileName::validate(black_box("bad:name?.txt")));
    });

    group.bench_function("long_unicode", |b| {
        let name = "é".repeat(200);
        b.iter(|| FileName::validate(black_box(&name)));
    });

    group.finish();
}

/// Path resolution benchmarks.
fn benchmark_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");

    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("a/b")).unwrap();
    let root = SandboxRoot::new(temp.path()).unwrap();

    group.bench_function("leaf_in_root", |b| {
        b.iter(|| resolve_safe_path(black_box(&root), black_box("file.txt")));
    });

    group.bench_function("nested_leaf", |b| {
        b.iter(|| resolve_safe_path(black_box(&root), black_box("a/b/file.txt")));
    });

    group.bench_function("traversal_rejected", |b| {
        b.iter(|| resolve_safe_path(black_box(&root), black_box("../escape.txt")));
    });

    group.finish();
}

/// Sequential naming benchmarks.
fn benchmark_naming(c: &mut Criterion) {
    let mut group = c.benchmark_group("naming");

    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("taken.txt"), "x").unwrap();
    let namer = SequentialNamer::new();

    group.bench_function("fast_path_free", |b| {
        b.iter(|| namer.free_path(black_box(temp.path()), black_box("free.txt")));
    });

    group.bench_function("slow_path_one_collision", |b| {
        b.iter(|| namer.free_path(black_box(temp.path()), black_box("taken.txt")));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_name_validation,
    benchmark_resolution,
    benchmark_naming
);
criterion_main!(benches);
