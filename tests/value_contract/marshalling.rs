//! Text marshalling through the transfer buffer

use ttcn::{
    decode_message, encode_message, BaseValue, Bitstring, DefaultRef, ExternalIdentification,
    External, GeneralString, Integer, Marshal, ObjectIdentifier, OctetString, Optional, TextBuf,
    ValueEq,
};

fn round_trip<T: Marshal + Default>(value: &T) -> T {
    let mut buf = TextBuf::new();
    value.encode_text(&mut buf).unwrap();
    buf.rewind();
    let mut decoded = T::default();
    decoded.decode_text(&mut buf).unwrap();
    assert_eq!(buf.remaining(), 0);
    decoded
}

#[test]
fn scalar_values_survive_transfer() {
    assert_eq!(round_trip(&Integer::new(-70_000)), Integer::new(-70_000));
    assert_eq!(
        round_trip(&OctetString::new(vec![0xDE, 0xAD])),
        OctetString::new(vec![0xDE, 0xAD])
    );
    let bits = Bitstring::parse("101100101").unwrap();
    assert_eq!(round_trip(&bits), bits);
    let text = GeneralString::from_bytes(vec![b'a', 0x00, 0xFF]);
    assert_eq!(round_trip(&text), text);
}

#[test]
fn external_with_present_and_omitted_descriptor() {
    let oid = ObjectIdentifier::new(vec![2, 1, 1]);
    let with_descriptor = External::new(
        ExternalIdentification::syntax(oid.clone()),
        Some(GeneralString::new("doc").unwrap()),
        OctetString::new(vec![0xCA, 0xFE]),
    );
    let decoded = round_trip(&with_descriptor);
    assert!(decoded.equals(&with_descriptor).unwrap());

    let omitted = External::new(
        ExternalIdentification::syntax(oid),
        None,
        OctetString::new(vec![]),
    );
    let decoded = round_trip(&omitted);
    assert!(matches!(decoded.data_value_descriptor, Optional::Omit));
    assert!(decoded.is_value());
}

#[test]
fn unbound_values_refuse_to_encode() {
    let mut buf = TextBuf::new();
    let err = Integer::default().encode_text(&mut buf).unwrap_err();
    assert!(err.is_marshalling());
    assert!(err.to_string().contains("unbound integer"));
}

#[test]
fn default_references_are_never_transferred() {
    let mut buf = TextBuf::new();
    assert!(DefaultRef::make_null().encode_text(&mut buf).unwrap_err().is_marshalling());
    assert!(buf.is_empty());

    buf.push_int(1);
    buf.rewind();
    let mut handle = DefaultRef::default();
    assert!(handle.decode_text(&mut buf).unwrap_err().is_marshalling());
}

#[test]
fn truncated_input_is_a_marshalling_error() {
    let mut buf = TextBuf::new();
    OctetString::new(vec![1, 2, 3, 4]).encode_text(&mut buf).unwrap();
    let bytes = buf.as_bytes();
    let mut short = TextBuf::from_bytes(bytes[..bytes.len() - 1].to_vec());
    let mut decoded = OctetString::default();
    assert!(decoded.decode_text(&mut short).unwrap_err().is_marshalling());
    assert!(!decoded.is_bound());
}

#[test]
fn framed_messages_decode_in_order() {
    let mut buf = TextBuf::new();
    encode_message(&Integer::new(7), &mut buf).unwrap();
    encode_message(&OctetString::new(vec![0x42]), &mut buf).unwrap();
    assert!(encode_message(&Integer::default(), &mut buf).is_err());

    let first: Integer = decode_message(&mut buf).unwrap();
    let second: OctetString = decode_message(&mut buf).unwrap();
    assert_eq!(first.get().unwrap(), 7);
    assert_eq!(second.as_bytes().unwrap(), [0x42]);
    assert!(!buf.is_message());
}
