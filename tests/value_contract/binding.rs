//! Bound/unbound state of representative value types

use ttcn::{
    BaseValue, Bitstring, DefaultRef, External, GeneralString, Integer, OctetString, ValueEq,
};

fn assert_unbound<T: BaseValue + Default>() {
    let value = T::default();
    assert!(!value.is_bound(), "{} default is bound", T::TYPE_NAME);
    assert!(!value.is_value());
    assert_eq!(value.to_log_string(), "<unbound>");
}

#[test]
fn default_construction_is_unbound_for_every_type() {
    assert_unbound::<Integer>();
    assert_unbound::<OctetString>();
    assert_unbound::<Bitstring>();
    assert_unbound::<GeneralString>();
    assert_unbound::<DefaultRef>();
    assert_unbound::<External>();
}

#[test]
fn copies_are_independent() {
    let source = GeneralString::new("abc").unwrap();
    let mut copy = GeneralString::default();
    copy.assign(&source).unwrap();

    let mut source = source;
    source.clean_up();
    assert!(!source.is_bound());
    assert_eq!(copy.as_bytes().unwrap(), b"abc");
}

#[test]
fn assign_from_unbound_leaves_destination_unchanged() {
    let mut dest = OctetString::new(vec![0x01, 0x02]);
    let err = dest.assign(&OctetString::default()).unwrap_err();
    assert!(err.is_binding());
    assert_eq!(dest.as_bytes().unwrap(), [0x01, 0x02]);
}

#[test]
fn comparison_with_unbound_operand_fails() {
    let bound = Integer::new(1);
    let unbound = Integer::default();
    assert!(bound.equals(&unbound).unwrap_err().is_binding());
    assert!(unbound.equals(&bound).unwrap_err().is_binding());
    assert!(bound.equals(&Integer::new(1)).unwrap());
}

#[test]
fn clean_up_returns_to_unbound() {
    let mut bits = Bitstring::parse("1010").unwrap();
    assert!(bits.is_bound());
    bits.clean_up();
    assert!(!bits.is_bound());
    assert!(bits.len().unwrap_err().is_binding());
}

#[test]
fn bitstring_elements_read_and_write_through() {
    let mut bits = Bitstring::parse("0110").unwrap();
    assert!(bits.element(1).unwrap().get());
    bits.element_mut(0).unwrap().set(true);
    bits.element_mut(4).unwrap().set(true);
    assert_eq!(bits.to_log_string(), "'11101'B");
    assert!(bits.element(9).is_err());
}
