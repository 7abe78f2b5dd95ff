#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn element_lookup_misses_unknown_ids() {
    let host = MemoryHost::new().with_element("present");
    assert!(host.element_by_id("present").is_some());
    assert!(host.element_by_id("absent").is_none());
}

#[test]
fn store_round_trips_values() {
    let host = MemoryHost::new();
    let store = host.local_store().unwrap();
    assert_eq!(store.get_item("k").unwrap(), None);
    store.set_item("k", "v").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    assert_eq!(host.stored("k").as_deref(), Some("v"));
}

#[test]
fn unavailable_storage_has_no_store() {
    let host = MemoryHost::new().with_storage(StorageMode::Unavailable);
    assert!(matches!(host.local_store(), Err(ChromeError::StorageUnavailable)));
}

#[test]
fn failing_storage_errors_on_read_and_write() {
    let host = MemoryHost::new().with_storage(StorageMode::Failing);
    let store = host.local_store().unwrap();
    assert!(matches!(store.get_item("k"), Err(ChromeError::Storage(_))));
    assert!(matches!(store.set_item("k", "v"), Err(ChromeError::Storage(_))));
}

#[test]
fn control_mutations_are_observable() {
    let host = MemoryHost::new().with_element("btn");
    let control = host.element_by_id("btn").unwrap();
    assert_eq!(host.display("btn"), None);
    control.set_display("block").unwrap();
    control.set_inner_html("<b>hi</b>").unwrap();
    assert_eq!(host.display("btn").as_deref(), Some("block"));
    assert_eq!(host.inner_html("btn").as_deref(), Some("<b>hi</b>"));
}

#[test]
fn scroll_to_runs_every_scroll_handler_in_order() {
    let host = MemoryHost::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second"] {
        let seen = Rc::clone(&seen);
        let viewport = host.viewport();
        host.on_scroll(Box::new(move || seen.borrow_mut().push((tag, viewport.scroll_offset()))))
            .unwrap();
    }

    host.scroll_to(42.0);

    assert_eq!(*seen.borrow(), vec![("first", 42.0), ("second", 42.0)]);
    assert_eq!(host.scroll_listener_count(), 2);
}

#[test]
fn click_reports_prevented_default() {
    let host = MemoryHost::new().with_element("a").with_element("b");
    let a = host.element_by_id("a").unwrap();
    let b = host.element_by_id("b").unwrap();
    host.on_click(&a, Box::new(|event: &dyn Activation| event.prevent_default())).unwrap();
    host.on_click(&b, Box::new(|_: &dyn Activation| {})).unwrap();

    assert!(host.click("a"));
    assert!(!host.click("b"));
    assert!(!host.click("missing"));
    assert_eq!(host.click_listener_count("a"), 1);
}

#[test]
fn handlers_may_mutate_the_page_during_dispatch() {
    let host = MemoryHost::new().with_element("btn");
    let control = host.element_by_id("btn").unwrap();
    let target = control.clone();
    host.on_click(&control, Box::new(move |_: &dyn Activation| target.set_inner_html("clicked").unwrap()))
        .unwrap();

    host.click("btn");

    assert_eq!(host.inner_html("btn").as_deref(), Some("clicked"));
}

#[test]
fn smooth_scroll_requests_are_recorded() {
    let host = MemoryHost::new();
    let viewport = host.viewport();
    viewport.smooth_scroll_to(0.0).unwrap();
    assert_eq!(host.scroll_requests(), vec![0.0]);
}
