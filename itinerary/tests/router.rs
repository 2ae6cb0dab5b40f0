// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing behavior as seen from an application: registration order,
//! captured parameters, `route` events and navigation through history.

use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use itinerary::events::{ALL, Callback, Emitter, Event, Events};
use itinerary::history::{MemoryHistory, NavigateOptions};
use itinerary::{PatternError, ROUTE, RouteEvent, Router, VERSION};

type Log = Rc<RefCell<Vec<String>>>;

fn log() -> Log {
    Rc::default()
}

/// Records every event the router fires as `name params`.
fn record_events(router: &Router, log: &Log) {
    let sink = Rc::clone(log);
    router.on(
        ALL,
        Callback::<RouteEvent>::new(move |ev| {
            sink.borrow_mut()
                .push(format!("{} {:?}", ev.name(), ev.args().params));
        }),
    );
}

fn handler(log: &Log, tag: &'static str) -> impl Fn(&[Option<String>]) + 'static {
    let sink = Rc::clone(log);
    move |params| sink.borrow_mut().push(format!("{tag} {params:?}"))
}

#[test]
fn first_registered_match_wins() {
    let router = Router::new();
    let calls = log();
    router
        .add_route("foo/:id", Some("param"), handler(&calls, "param"))
        .unwrap()
        .add_route("foo/bar", Some("literal"), handler(&calls, "literal"))
        .unwrap();

    let matched = router.navigate("foo/bar").unwrap();
    assert_eq!(matched.name(), Some("param"));
    assert_eq!(*calls.borrow(), [r#"param [Some("bar")]"#]);
}

#[test]
fn duplicate_patterns_keep_the_earliest() {
    let router = Router::new();
    router.add_routes([("same", "first"), ("same", "second")]).unwrap();

    assert_eq!(router.len(), 2);
    assert_eq!(router.match_path("same").unwrap().name(), Some("first"));
}

#[test]
fn optional_groups_report_absent_params_as_none() {
    let router = Router::new();
    let calls = log();
    router
        .add_route("docs(/:section)", None, handler(&calls, "docs"))
        .unwrap();

    router.navigate("docs");
    router.navigate("docs/intro");
    assert_eq!(
        *calls.borrow(),
        [r#"docs [None]"#, r#"docs [Some("intro")]"#]
    );
}

#[test]
fn named_routes_fire_route_then_route_name_with_identical_params() {
    let router = Router::new();
    let order = log();
    router
        .add_route("show/:id", Some("show"), handler(&order, "handler"))
        .unwrap();
    record_events(&router, &order);

    router.navigate("show/5");
    assert_eq!(
        *order.borrow(),
        [
            r#"handler [Some("5")]"#,
            r#"route [Some("5")]"#,
            r#"route:show [Some("5")]"#,
        ]
    );
}

#[test]
fn unnamed_routes_fire_only_route() {
    let router = Router::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    router.add_route("anon", None, |_| {}).unwrap();

    let sink = Rc::clone(&events);
    router.on(
        ALL,
        Callback::new(move |ev: &Event<'_, RouteEvent>| {
            sink.borrow_mut().push((ev.name().to_owned(), ev.args().clone()));
        }),
    );

    router.navigate("anon");
    assert_eq!(
        *events.borrow(),
        [(
            ROUTE.to_owned(),
            RouteEvent {
                name: None,
                params: vec![],
            }
        )]
    );
}

#[test]
fn handler_less_routes_are_observed_through_events() {
    let router = Router::new();
    let seen = log();
    router
        .add_routes([("help", "help"), ("search/:query", "search")])
        .unwrap();

    let sink = Rc::clone(&seen);
    router.on(
        "route:search",
        Callback::<RouteEvent>::new(move |ev| {
            sink.borrow_mut().push(format!("{:?}", ev.args().params));
        }),
    );

    router.navigate("search/kittens").unwrap();
    router.navigate("help").unwrap();
    assert_eq!(*seen.borrow(), [r#"[Some("kittens")]"#]);
}

#[test]
fn unmatched_paths_are_silent() {
    let router = Router::new();
    let calls = log();
    router.add_route("known", None, handler(&calls, "known")).unwrap();
    record_events(&router, &calls);

    assert!(router.navigate("unknown").is_none());
    assert!(calls.borrow().is_empty());
}

#[test]
fn malformed_patterns_fail_at_registration() {
    let router = Router::new();
    let err = router.add_route("a/(b", None, |_| {}).err();
    assert_eq!(err, Some(PatternError::UnclosedGroup { position: 2 }));

    let err = router.add_route("a/b)", None, |_| {}).err();
    assert_eq!(err, Some(PatternError::UnexpectedClose { position: 3 }));
    assert_eq!(
        err.map(|e| e.to_string()),
        Some("unexpected `)` at byte 3".to_owned())
    );
    assert!(router.is_empty());
}

#[test]
fn handlers_may_navigate_reentrantly() {
    let router = Router::new();
    let order = log();

    let (inner, sink) = (router.clone(), Rc::clone(&order));
    router
        .add_route("old/:id", Some("old"), move |params| {
            sink.borrow_mut().push("redirect".to_owned());
            let target = format!("new/{}", params[0].as_deref().unwrap_or_default());
            inner.navigate(&target);
        })
        .unwrap()
        .add_route("new/:id", Some("new"), handler(&order, "new"))
        .unwrap();
    record_events(&router, &order);

    let outer = router.navigate("old/3").unwrap();
    assert_eq!(outer.name(), Some("old"));
    assert_eq!(outer.params(), [Some("3".to_owned())]);
    assert_eq!(
        *order.borrow(),
        [
            "redirect",
            r#"new [Some("3")]"#,
            r#"route [Some("3")]"#,
            r#"route:new [Some("3")]"#,
            r#"route [Some("3")]"#,
            r#"route:old [Some("3")]"#,
        ]
    );
}

#[test]
fn routes_added_during_dispatch_apply_to_the_next_navigation() {
    let router = Router::new();
    let calls = log();

    let (inner, sink) = (router.clone(), Rc::clone(&calls));
    router
        .add_route("*any", Some("fallback"), move |_| {
            sink.borrow_mut().push("fallback".to_owned());
            inner.remove_route("*any");
            inner
                .add_route("page", None, handler(&sink, "page"))
                .unwrap();
        })
        .unwrap();

    router.navigate("page");
    router.navigate("page");
    assert_eq!(*calls.borrow(), ["fallback", "page []"]);
}

#[test]
fn handler_panics_reach_the_caller() {
    let router = Router::new();
    let calls = log();
    router.add_route("boom", None, |_| panic!("handler failed")).unwrap();
    router.add_route("fine", None, handler(&calls, "fine")).unwrap();
    record_events(&router, &calls);

    let result = catch_unwind(AssertUnwindSafe(|| router.navigate("boom")));
    assert!(result.is_err());
    assert!(calls.borrow().is_empty());

    router.navigate("fine");
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn other_emitters_can_listen_to_a_router() {
    let router = Router::new();
    router.add_routes([("inbox", "inbox")]).unwrap();
    let view = Events::<()>::new();
    let hits = Rc::new(std::cell::Cell::new(0));

    let sink = Rc::clone(&hits);
    view.listen_to(
        &router,
        "route:inbox",
        Callback::<RouteEvent>::new(move |_| sink.set(sink.get() + 1)),
    );
    router.navigate("inbox");
    assert_eq!(hits.get(), 1);
    assert!(view.is_listening_to(router.id()));

    view.stop_listening(None, None, None);
    router.navigate("inbox");
    assert_eq!(hits.get(), 1);
    assert!(router.events().is_empty());
}

#[test]
fn history_drives_the_router() {
    let router = Router::new();
    let calls = log();
    router
        .add_route("", Some("home"), handler(&calls, "home"))
        .unwrap()
        .add_route("items/:id", Some("item"), handler(&calls, "item"))
        .unwrap();
    let history = MemoryHistory::new(router);

    history.navigate("#items/1", NavigateOptions::TRIGGER);
    history.navigate("#items/2", NavigateOptions::default());
    history.navigate("#items/2", NavigateOptions::TRIGGER);
    assert_eq!(history.entries(), ["", "items/1", "items/2"]);

    let back = history.back().unwrap();
    assert_eq!(back.param("id"), Some("1"));
    history.back();
    history.forward();
    history.load_url();
    history.navigate("items/3", NavigateOptions::REPLACE);

    assert_eq!(history.entries(), ["", "items/3"]);
    assert_eq!(
        *calls.borrow(),
        [
            r#"item [Some("1")]"#,
            r#"item [Some("1")]"#,
            "home []",
            r#"item [Some("1")]"#,
            r#"item [Some("1")]"#,
            r#"item [Some("3")]"#,
        ]
    );
}

#[test]
fn history_redirects_from_handlers() {
    let router = Router::new();
    let history = MemoryHistory::new(router.clone());
    let calls = log();

    let (redirect, sink) = (history.clone(), Rc::clone(&calls));
    router
        .add_route("private", None, move |_| {
            sink.borrow_mut().push("denied".to_owned());
            redirect.navigate("login", NavigateOptions::REPLACE);
        })
        .unwrap()
        .add_route("login", None, handler(&calls, "login"))
        .unwrap();

    history.navigate("private", NavigateOptions::TRIGGER);
    assert_eq!(history.fragment(), "login");
    assert_eq!(history.entries(), ["", "login"]);
    assert_eq!(*calls.borrow(), ["denied", "login []"]);
}

#[test]
fn version_matches_the_package() {
    assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    assert!(!VERSION.is_empty());
}
