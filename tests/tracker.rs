//! Tests for registration and edge detection.
//!
//! These tests verify that:
//! - `on` checks a breakpoint immediately
//! - callbacks fire exactly once per transition edge
//! - `not_matched` reads style directly and leaves tracked state alone

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use floem_breakpoints::{
    Breakpoint, BreakpointTracker, Transition,
    headless::{ElementId, HeadlessStyle},
};

#[derive(Default)]
struct Counts {
    matched: Cell<u32>,
    exited: Cell<u32>,
}

fn counted(name: &str, counts: &Rc<Counts>) -> Breakpoint<ElementId> {
    Breakpoint::new(name)
        .on_matched({
            let counts = counts.clone();
            move |_| counts.matched.set(counts.matched.get() + 1)
        })
        .on_exit({
            let counts = counts.clone();
            move |_| counts.exited.set(counts.exited.get() + 1)
        })
}

#[test]
fn registering_a_matching_breakpoint_fires_matched() {
    let style = HeadlessStyle::new();
    style.set_breakpoint("mobile");
    let tracker = BreakpointTracker::new(style);
    let counts = Rc::new(Counts::default());

    let mobile = tracker.on(counted("mobile", &counts));

    assert!(mobile.is_matched());
    assert_eq!(counts.matched.get(), 1);
    assert_eq!(counts.exited.get(), 0);
}

#[test]
fn registering_a_non_matching_breakpoint_fires_nothing() {
    let style = HeadlessStyle::new();
    style.set_breakpoint("desktop");
    let tracker = BreakpointTracker::new(style);
    let counts = Rc::new(Counts::default());

    let mobile = tracker.on(counted("mobile", &counts));

    assert!(!mobile.is_matched());
    assert_eq!(counts.matched.get(), 0);
    assert_eq!(counts.exited.get(), 0);
}

#[test]
fn content_change_between_passes_fires_exit_once() {
    let style = HeadlessStyle::new();
    style.set_breakpoint("mobile");
    let tracker = BreakpointTracker::new(style.clone());
    let counts = Rc::new(Counts::default());
    let mobile = tracker.on(counted("mobile", &counts));

    tracker.evaluate_all();
    assert!(mobile.is_matched());

    style.set_breakpoint("desktop");
    tracker.evaluate_all();

    assert!(!mobile.is_matched());
    assert_eq!(counts.matched.get(), 1);
    assert_eq!(counts.exited.get(), 1);
}

#[test]
fn repeated_passes_without_change_do_not_refire() {
    let style = HeadlessStyle::new();
    style.set_breakpoint("tablet");
    let tracker = BreakpointTracker::new(style);
    let counts = Rc::new(Counts::default());
    let tablet = tracker.on(counted("tablet", &counts));

    for _ in 0..5 {
        tracker.evaluate_all();
        assert_eq!(tablet.check(), Transition::Unchanged);
    }
    assert_eq!(counts.matched.get(), 1);
    assert_eq!(counts.exited.get(), 0);
}

#[test]
fn quoted_content_matches_bare_name() {
    let style = HeadlessStyle::new();
    let root = style.root().unwrap();
    style.set_content(root, "\"tablet\"");
    let tracker: BreakpointTracker<_> = BreakpointTracker::new(style);

    assert!(tracker.is_matched(&Breakpoint::<ElementId>::new("tablet")));
    assert!(!tracker.is_matched(&Breakpoint::<ElementId>::new("\"tablet\"")));
}

#[test]
fn missing_content_never_matches() {
    let tracker: BreakpointTracker<_> = BreakpointTracker::new(HeadlessStyle::new());
    assert!(!tracker.is_matched(&Breakpoint::<ElementId>::new("mobile")));

    let rootless = BreakpointTracker::new(HeadlessStyle::without_root());
    let mobile = rootless.on(Breakpoint::new("mobile"));
    assert!(!mobile.is_matched());
    assert!(mobile.is_not_matched());
}

#[test]
fn empty_name_matches_empty_content_only() {
    let style = HeadlessStyle::new();
    let tracker: BreakpointTracker<_> = BreakpointTracker::new(style.clone());
    assert!(tracker.is_matched(&Breakpoint::<ElementId>::new("")));

    style.set_breakpoint("mobile");
    assert!(!tracker.is_matched(&Breakpoint::<ElementId>::new("")));
}

#[test]
fn breakpoint_element_overrides_root() {
    let style = HeadlessStyle::new();
    let sidebar = style.create_element();
    style.set_breakpoint("desktop");
    style.set_element_breakpoint(sidebar, "narrow");
    let tracker = BreakpointTracker::new(style.clone());

    let narrow = tracker.on(Breakpoint::new("narrow").element(sidebar));
    let desktop = tracker.on(Breakpoint::new("desktop"));
    assert!(narrow.is_matched());
    assert!(desktop.is_matched());
    assert_eq!(narrow.element(), Some(&sidebar));
    assert_eq!(desktop.element(), None);

    style.clear_content(sidebar);
    tracker.evaluate_all();
    assert!(!narrow.is_matched());
    assert!(desktop.is_matched());
}

#[test]
fn duplicate_registrations_are_independent() {
    let style = HeadlessStyle::new();
    style.set_breakpoint("mobile");
    let tracker = BreakpointTracker::new(style);
    let first = Rc::new(Counts::default());
    let second = Rc::new(Counts::default());

    tracker.on(counted("mobile", &first));
    tracker.on(counted("mobile", &second));

    assert_eq!(tracker.len(), 2);
    assert_eq!(first.matched.get(), 1);
    assert_eq!(second.matched.get(), 1);
}

#[test]
fn passes_run_in_registration_order() {
    let style = HeadlessStyle::new();
    let tracker = BreakpointTracker::new(style.clone());
    let order = Rc::new(RefCell::new(Vec::new()));

    for name in ["first", "second", "third"] {
        let order = order.clone();
        tracker.on(
            Breakpoint::with_context(name, name)
                .on_exit(move |name| order.borrow_mut().push(*name)),
        );
    }
    let all = tracker.breakpoints();
    let names: Vec<_> = all.iter().map(|bp| bp.name()).collect();
    assert_eq!(names, ["first", "second", "third"]);

    // Force every breakpoint into the matched state, then clear the content.
    for bp in &all {
        style.set_breakpoint(bp.name());
        bp.check();
    }
    style.set_breakpoint("none");
    tracker.evaluate_all();
    assert_eq!(*order.borrow(), ["first", "second", "third"]);
}

#[test]
fn not_matched_runs_callback_only_when_unmatched() {
    let style = HeadlessStyle::new();
    style.set_breakpoint("desktop");
    let tracker = BreakpointTracker::new(style.clone());
    let mobile = tracker.on(Breakpoint::new("mobile"));
    let calls = Cell::new(0);

    assert!(mobile.not_matched(|| calls.set(calls.get() + 1)));
    assert_eq!(calls.get(), 1);

    style.set_breakpoint("mobile");
    assert!(!mobile.not_matched(|| calls.set(calls.get() + 1)));
    assert_eq!(calls.get(), 1);
}

#[test]
fn not_matched_does_not_touch_tracked_state() {
    let style = HeadlessStyle::new();
    style.set_breakpoint("mobile");
    let tracker = BreakpointTracker::new(style.clone());
    let counts = Rc::new(Counts::default());
    let mobile = tracker.on(counted("mobile", &counts));

    // Style moved on but no pass has run yet.
    style.set_breakpoint("desktop");
    assert!(mobile.is_not_matched());
    assert!(mobile.is_matched());
    assert_eq!(counts.exited.get(), 0);

    tracker.evaluate_all();
    assert!(!mobile.is_matched());
    assert_eq!(counts.exited.get(), 1);
}

#[test]
fn callbacks_receive_their_context() {
    let style = HeadlessStyle::new();
    style.set_breakpoint("tablet");
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let tracker = BreakpointTracker::new(style.clone());

    let tablet = tracker.on(
        Breakpoint::with_context("tablet", log.clone())
            .on_matched(|log| log.borrow_mut().push("matched".into()))
            .on_exit(|log| log.borrow_mut().push("exit".into())),
    );
    style.set_breakpoint("mobile");
    assert_eq!(tablet.check(), Transition::Exited);

    assert_eq!(*log.borrow(), ["matched", "exit"]);
    assert!(Rc::ptr_eq(tablet.context(), &log));
}

#[test]
fn callbacks_may_register_more_breakpoints() {
    let style = HeadlessStyle::new();
    let tracker = BreakpointTracker::new(style.clone());
    let nested = Rc::new(Counts::default());

    tracker.on(Breakpoint::new("mobile").on_matched({
        let tracker = tracker.clone();
        let nested = nested.clone();
        move |_| {
            tracker.on(counted("mobile", &nested));
        }
    }));
    assert_eq!(tracker.len(), 1);

    style.set_breakpoint("mobile");
    tracker.evaluate_all();

    assert_eq!(tracker.len(), 2);
    assert_eq!(nested.matched.get(), 1);
    assert!(tracker.breakpoints()[1].is_matched());
}

#[test]
fn reentrant_pass_from_callback_does_not_refire() {
    let style = HeadlessStyle::new();
    style.set_breakpoint("mobile");
    let tracker = BreakpointTracker::new(style.clone());
    let calls = Rc::new(Cell::new(0));

    let mobile = tracker.on(Breakpoint::new("mobile"));
    tracker.on(Breakpoint::new("tablet").on_matched({
        let calls = calls.clone();
        let tracker = tracker.clone();
        move |_| {
            calls.set(calls.get() + 1);
            // Re-enters this very callback through the pass.
            tracker.evaluate_all();
        }
    }));
    assert!(mobile.is_matched());

    style.set_breakpoint("tablet");
    tracker.evaluate_all();
    assert_eq!(calls.get(), 1);
    assert!(!mobile.is_matched());
}

#[test]
fn callbacks_see_the_new_state() {
    let style = HeadlessStyle::new();
    let tracker = BreakpointTracker::new(style.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));

    let record = |seen: &Rc<RefCell<Vec<bool>>>, tracker: &BreakpointTracker<HeadlessStyle>| {
        let seen = seen.clone();
        let tracker = tracker.clone();
        move |_: &()| seen.borrow_mut().push(tracker.breakpoints()[0].is_matched())
    };
    tracker.on(
        Breakpoint::new("mobile")
            .on_matched(record(&seen, &tracker))
            .on_exit(record(&seen, &tracker)),
    );

    style.set_breakpoint("mobile");
    tracker.evaluate_all();
    style.set_breakpoint("desktop");
    tracker.evaluate_all();

    assert_eq!(*seen.borrow(), [true, false]);
}
