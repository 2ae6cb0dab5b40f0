// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for pattern compilation and first-match lookup.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use itinerary::{RoutePattern, Router};

const PATTERNS: &[&str] = &[
    "help",
    "search/:query(/p:page)",
    "users/:id",
    "users/:id/posts/:post",
    "files/*path",
    "docs(/:section(/:page))",
];

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern/compile");
    for pattern in PATTERNS {
        group.bench_function(BenchmarkId::from_parameter(pattern), |b| {
            b.iter(|| black_box(RoutePattern::parse(black_box(pattern))));
        });
    }
    group.finish();
}

fn bench_captures(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern/captures");

    let param = RoutePattern::parse("users/:id/posts/:post").unwrap();
    group.bench_function("params", |b| {
        b.iter(|| black_box(param.captures(black_box("users/42/posts/hello-world"))));
    });

    let optional = RoutePattern::parse("docs(/:section(/:page))").unwrap();
    group.bench_function("optional_absent", |b| {
        b.iter(|| black_box(optional.captures(black_box("docs"))));
    });
    group.bench_function("optional_present", |b| {
        b.iter(|| black_box(optional.captures(black_box("docs/guide/3"))));
    });

    let splat = RoutePattern::parse("*head/end/*tail").unwrap();
    let long: String = "a/".repeat(64) + "end/b";
    group.bench_function(BenchmarkId::new("splat_backtrack", long.len()), |b| {
        b.iter(|| black_box(splat.captures(black_box(&long))));
    });

    group.bench_function("miss", |b| {
        b.iter(|| black_box(param.captures(black_box("users/42/comments/7"))));
    });
    group.finish();
}

fn bench_router(c: &mut Criterion) {
    let mut group = c.benchmark_group("router/match_path");
    for count in [8_usize, 64, 256] {
        let router = Router::new();
        for i in 0..count {
            router
                .add_routes([(format!("section{i}/:id").as_str(), "section")])
                .unwrap();
        }
        let last = format!("section{}/7", count - 1);
        group.bench_function(BenchmarkId::new("last_route", count), |b| {
            b.iter(|| black_box(router.match_path(black_box(&last))));
        });
        group.bench_function(BenchmarkId::new("no_match", count), |b| {
            b.iter(|| black_box(router.match_path(black_box("elsewhere"))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compile, bench_captures, bench_router);
criterion_main!(benches);
