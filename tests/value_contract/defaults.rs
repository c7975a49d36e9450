//! Default references resolved against the registry

use ttcn::{BaseValue, DefaultRef, DefaultRegistry, ValueEq};

#[test]
fn handles_compare_by_identity() {
    let mut registry = DefaultRegistry::new();
    let a = registry.activate("as_timeout");
    let b = registry.activate("as_timeout");
    let copy = a;
    assert!(a.equals(&copy).unwrap());
    assert!(!a.equals(&b).unwrap());
    assert!(DefaultRef::make_null().equals(&DefaultRef::make_null()).unwrap());
    assert!(!a.equals(&DefaultRef::make_null()).unwrap());
}

#[test]
fn deactivated_handle_stays_bound_but_resolves_to_nothing() {
    let mut registry = DefaultRegistry::new();
    let handle = registry.activate("as_unexpected");
    registry.deactivate(&handle).unwrap();
    assert!(handle.is_bound());
    assert!(registry.lookup(&handle).unwrap().is_none());
}

#[test]
fn logging_shows_null_and_identity() {
    let mut registry = DefaultRegistry::new();
    let handle = registry.activate("as_any");
    assert_eq!(DefaultRef::make_null().to_log_string(), "null");
    assert_eq!(handle.to_log_string(), "default#1");
}
