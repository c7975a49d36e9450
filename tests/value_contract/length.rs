//! Length restriction descriptors applied to values

use ttcn::{Bitstring, LengthRestriction, Lengthof, OctetString};

#[test]
fn single_length() {
    let restriction = LengthRestriction::single(5);
    assert!(restriction.is_single());
    assert!(restriction.validate(5));
    assert!(!restriction.validate(4));
    assert_eq!(restriction.render(), "length(5)");
}

#[test]
fn open_ended_length() {
    let mut restriction = LengthRestriction::default();
    restriction.set_min(2);
    assert!(restriction.validate(2));
    assert!(restriction.validate(1_000_000));
    assert!(!restriction.validate(1));
    assert_eq!(restriction.render(), "length(2..infinity)");
}

#[test]
fn range_checked_against_values() {
    let restriction = LengthRestriction::range(1, 3);
    assert!(OctetString::new(vec![1, 2]).check_length(&restriction).unwrap());
    assert!(!OctetString::new(vec![]).check_length(&restriction).unwrap());
    assert!(!Bitstring::parse("1111").unwrap().check_length(&restriction).unwrap());
    assert!(OctetString::default().check_length(&restriction).unwrap_err().is_binding());
}
