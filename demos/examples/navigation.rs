// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router and history basics.
//!
//! Register a few routes, observe them through `route` events, and walk a
//! `MemoryHistory` back and forth.
//!
//! Run:
//! - `cargo run -p itinerary_demos --example navigation`
//! - `RUST_LOG=itinerary=debug cargo run -p itinerary_demos --example navigation`

use itinerary::events::{Callback, Emitter};
use itinerary::history::{MemoryHistory, NavigateOptions};
use itinerary::{RouteEvent, Router, VERSION};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("itinerary {VERSION}");

    let router = Router::new();
    router
        .add_route("", Some("home"), |_| println!("  handler: home"))
        .and_then(|r| {
            r.add_route("search/:query(/p:page)", Some("search"), |params| {
                let page = params[1].as_deref().unwrap_or("1");
                println!(
                    "  handler: search {:?} page {page}",
                    params[0].as_deref().unwrap_or_default()
                );
            })
        })
        .and_then(|r| {
            r.add_route("files/*path", Some("file"), |params| {
                println!("  handler: file {:?}", params[0]);
            })
        })
        .expect("route patterns are valid");

    router.on(
        "route",
        Callback::<RouteEvent>::new(|ev| {
            let route = ev.args();
            println!("  event:   route name={:?} params={:?}", route.name, route.params);
        }),
    );

    // A redirect from inside a handler goes through the same history.
    let history = MemoryHistory::with_root(router.clone(), "/app");
    let redirect = history.clone();
    router
        .add_route("old-search/:query", None, move |params| {
            let query = params[0].as_deref().unwrap_or_default();
            println!("  handler: redirecting old search");
            redirect.navigate(&format!("search/{query}"), NavigateOptions::REPLACE);
        })
        .expect("route pattern is valid");

    for url in [
        "/app/search/rust%20lang",
        "/app/search/rust/p2",
        "/app/files/src/lib.rs",
        "/app/old-search/tracing",
        "/app/nowhere",
    ] {
        println!("navigate {url}");
        if history.navigate(url, NavigateOptions::TRIGGER).is_none() {
            println!("  (no route)");
        }
    }

    println!("history: {:?}", history.entries());
    while history.can_go_back() {
        println!("back -> {:?}", history.back().map(|m| m.name().map(str::to_owned)));
    }
    if let Some(matched) = history.forward() {
        println!("forward -> {:?} {:?}", matched.name(), matched.params());
    }
}
