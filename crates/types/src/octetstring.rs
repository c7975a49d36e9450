//! Octetstring value type

use crate::Lengthof;
use ttcn_core::{
    check_operands, unbound_encoding, BaseValue, Binding, LogSink, Marshal, Result, TextBuf,
    ValueEq,
};

/// TTCN-3 `octetstring`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OctetString(Binding<Vec<u8>>);

impl OctetString {
    /// Create a bound octetstring
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        OctetString(Binding::Bound(bytes.into()))
    }

    /// Borrow the octets
    ///
    /// # Errors
    ///
    /// Returns a binding error if unbound.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        self.0.get(Self::TYPE_NAME).map(Vec::as_slice)
    }

    /// Assign a concrete value
    pub fn set(&mut self, bytes: impl Into<Vec<u8>>) {
        self.0.set(bytes.into());
    }
}

impl BaseValue for OctetString {
    const TYPE_NAME: &'static str = "octetstring";

    fn is_bound(&self) -> bool {
        self.0.is_bound()
    }

    fn clean_up(&mut self) {
        self.0.clear();
    }

    fn log(&self, sink: &mut dyn LogSink) {
        match &self.0 {
            Binding::Bound(bytes) => {
                sink.write_char('\'');
                for b in bytes {
                    sink.write_str(&format!("{:02X}", b));
                }
                sink.write_str("'O");
            }
            Binding::Unbound => sink.write_unbound(),
        }
    }
}

impl ValueEq for OctetString {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        Ok(self.0 == other.0)
    }
}

impl Marshal for OctetString {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        let bytes = self
            .0
            .as_option()
            .ok_or_else(|| unbound_encoding(Self::TYPE_NAME))?;
        buf.push_bytes(bytes);
        Ok(())
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        self.0.set(buf.pull_bytes()?);
        Ok(())
    }
}

impl Lengthof for OctetString {
    fn lengthof(&self) -> Result<usize> {
        Ok(self.as_bytes()?.len())
    }
}
