//! EXTERNAL composite: field-wise state and logging

use ttcn::{
    BaseValue, ExternalIdentification, External, GeneralString, ObjectIdentifier, OctetString,
    Optional, ValueEq,
};

fn sample() -> External {
    External::new(
        ExternalIdentification::syntax(ObjectIdentifier::new(vec![2, 1, 1])),
        Some(GeneralString::new("doc").unwrap()),
        OctetString::new(vec![0xCA, 0xFE]),
    )
}

#[test]
fn omitted_descriptor_is_still_a_value() {
    let mut value = sample();
    value.data_value_descriptor = Optional::Omit;
    assert!(value.is_value());
}

#[test]
fn unbound_descriptor_is_bound_but_not_a_value() {
    let mut value = sample();
    value.data_value_descriptor = Optional::Unbound;
    assert!(value.is_bound());
    assert!(!value.is_value());
}

#[test]
fn partially_assigned_value_logs_unbound_fields() {
    let value = External {
        data_value: OctetString::new(vec![0x01]),
        ..External::default()
    };
    assert_eq!(
        value.to_log_string(),
        "{ identification := <unbound>, data_value_descriptor := <unbound>, data_value := '01'O }"
    );
}

#[test]
fn full_value_log() {
    assert_eq!(
        sample().to_log_string(),
        "{ identification := { syntax := objid { 2 1 1 } }, data_value_descriptor := \"doc\", data_value := 'CAFE'O }"
    );
}

#[test]
fn copy_then_modify_source() {
    let mut source = sample();
    let copy = source.clone();
    source.data_value.set(vec![0x00]);
    assert!(!copy.equals(&source).unwrap());
    assert_eq!(copy.data_value.as_bytes().unwrap(), [0xCA, 0xFE]);
}
