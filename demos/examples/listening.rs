// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-object listening.
//!
//! A view listens to a model and to a router, then tears every binding down
//! with one `stop_listening` call.
//!
//! Run:
//! - `RUST_LOG=itinerary_events=trace cargo run -p itinerary_demos --example listening`

use std::cell::Cell;
use std::rc::Rc;

use itinerary::{RouteEvent, Router};
use itinerary_events::{Callback, Emitter, Event, Events};
use tracing_subscriber::EnvFilter;

/// A model whose `change` events carry the new value.
struct Counter {
    events: Events<i64>,
    value: Cell<i64>,
}

impl Counter {
    fn add(&self, delta: i64) {
        self.value.set(self.value.get() + delta);
        self.trigger("change", &self.value.get());
    }
}

impl Emitter for Counter {
    type Payload = i64;

    fn events(&self) -> &Events<i64> {
        &self.events
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let counter = Rc::new(Counter {
        events: Events::new(),
        value: Cell::new(0),
    });
    let router = Router::new();
    router
        .add_routes([("counter", "counter"), ("about", "about")])
        .expect("route patterns are valid");

    let view = Events::<()>::new();
    view.listen_to(
        &*counter,
        "change",
        Callback::new(|ev: &Event<'_, i64>| println!("view: counter is {}", ev.args())),
    )
    .listen_to_once(
        &router,
        "route:about",
        Callback::new(|_: &Event<'_, RouteEvent>| println!("view: about page (shown once)")),
    )
    .listen_to(
        &router,
        "route:counter",
        Callback::new(|ev: &Event<'_, RouteEvent>| {
            println!("view: counter page via {:?}", ev.args().name);
        }),
    );
    println!("view listens to {} objects", view.listening_count());

    counter.add(2);
    router.navigate("about");
    router.navigate("about");
    router.navigate("counter");
    counter.add(3);

    view.stop_listening(None, None, None);
    println!("after stop_listening: {} objects", view.listening_count());

    counter.add(10);
    router.navigate("counter");
    println!("counter ended at {}", counter.value.get());
}
