// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for event dispatch and binding churn.

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use itinerary_events::{ALL, Callback, Emitter, Events};

fn counter(total: &Rc<Cell<u64>>) -> Callback<u64> {
    let total = Rc::clone(total);
    Callback::<u64>::new(move |ev| total.set(total.get() + *ev.args()))
}

fn bench_trigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("events/trigger");
    let total = Rc::new(Cell::new(0));

    for bindings in [1_usize, 4, 32] {
        let events = Events::<u64>::new();
        for _ in 0..bindings {
            events.on("change", counter(&total));
        }
        group.bench_function(BenchmarkId::new("named", bindings), |b| {
            b.iter(|| events.trigger(black_box("change"), &1));
        });
    }

    let events = Events::<u64>::new();
    events.on("change", counter(&total)).on(ALL, counter(&total));
    group.bench_function("named_and_all", |b| {
        b.iter(|| events.trigger(black_box("change"), &1));
    });
    group.bench_function("three_names", |b| {
        b.iter(|| events.trigger(black_box("change other change"), &1));
    });
    group.bench_function("unbound", |b| {
        b.iter(|| events.trigger(black_box("nothing"), &1));
    });
    group.finish();

    black_box(total.get());
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("events/churn");
    let total = Rc::new(Cell::new(0));

    group.bench_function("on_off", |b| {
        let events = Events::<u64>::new();
        let cb = counter(&total);
        b.iter(|| {
            events
                .on("change", cb.clone())
                .off(Some("change"), Some(&cb), None);
        });
    });

    group.bench_function("once_fire", |b| {
        let events = Events::<u64>::new();
        let cb = counter(&total);
        b.iter(|| {
            events.once("change", cb.clone()).trigger("change", &1);
        });
    });

    group.bench_function("listen_stop", |b| {
        b.iter_batched(
            || (Events::<()>::new(), Events::<u64>::new()),
            |(listener, target)| {
                listener
                    .listen_to(&target, "a b c", counter(&total))
                    .stop_listening(None, None, None);
                black_box(listener.listening_count())
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_trigger, bench_churn);
criterion_main!(benches);
