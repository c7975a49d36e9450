//! Integer value type

use std::fmt;
use ttcn_core::{
    check_operands, unbound_encoding, BaseValue, Binding, LogSink, Marshal, Result, TextBuf,
    ValueEq,
};

/// TTCN-3 `integer`
///
/// Backed by an `i64`; arbitrary precision is not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Integer(Binding<i64>);

impl Integer {
    /// Create a bound integer
    pub fn new(value: i64) -> Self {
        Integer(Binding::Bound(value))
    }

    /// Read the value
    ///
    /// # Errors
    ///
    /// Returns a binding error if unbound.
    pub fn get(&self) -> Result<i64> {
        self.0.get(Self::TYPE_NAME).copied()
    }

    /// Assign a concrete value
    pub fn set(&mut self, value: i64) {
        self.0.set(value);
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::new(value)
    }
}

impl BaseValue for Integer {
    const TYPE_NAME: &'static str = "integer";

    fn is_bound(&self) -> bool {
        self.0.is_bound()
    }

    fn clean_up(&mut self) {
        self.0.clear();
    }

    fn log(&self, sink: &mut dyn LogSink) {
        match &self.0 {
            Binding::Bound(v) => sink.write_str(&v.to_string()),
            Binding::Unbound => sink.write_unbound(),
        }
    }
}

impl ValueEq for Integer {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        Ok(self.0 == other.0)
    }
}

impl Marshal for Integer {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        let value = self
            .0
            .as_option()
            .ok_or_else(|| unbound_encoding(Self::TYPE_NAME))?;
        buf.push_int(*value);
        Ok(())
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        self.0.set(buf.pull_int()?);
        Ok(())
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_log_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_unbound() {
        let i = Integer::default();
        assert!(!i.is_bound());
        assert!(i.get().unwrap_err().is_binding());
        assert_eq!(i.to_log_string(), "<unbound>");
    }

    #[test]
    fn test_set_get_clean_up() {
        let mut i = Integer::default();
        i.set(-42);
        assert_eq!(i.get().unwrap(), -42);
        assert_eq!(i.to_string(), "-42");
        i.clean_up();
        assert!(!i.is_bound());
    }

    #[test]
    fn test_equals() {
        assert!(Integer::new(3).equals(&Integer::from(3)).unwrap());
        assert!(!Integer::new(3).equals(&Integer::new(4)).unwrap());
        assert!(Integer::new(3)
            .equals(&Integer::default())
            .unwrap_err()
            .is_binding());
    }

    #[test]
    fn test_encode_unbound() {
        let mut buf = TextBuf::new();
        let err = Integer::default().encode_text(&mut buf).unwrap_err();
        assert!(err.is_marshalling());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_truncated_keeps_value() {
        let mut i = Integer::new(1);
        let mut buf = TextBuf::from_bytes(vec![0x81]);
        assert!(i.decode_text(&mut buf).unwrap_err().is_marshalling());
        assert_eq!(i.get().unwrap(), 1);
    }
}
