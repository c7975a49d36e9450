//! GeneralString value type
//!
//! An 8-bit character string. Characters above 0xFF cannot be stored.
//! `ObjectDescriptor` shares the representation.

use crate::Lengthof;
use ttcn_core::{
    check_operands, unbound_encoding, BaseValue, Binding, Error, LogSink, Marshal, Result, TextBuf,
    ValueEq,
};

/// ASN.1 `GeneralString`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GeneralString(Binding<Vec<u8>>);

/// ASN.1 `ObjectDescriptor`
pub type ObjectDescriptor = GeneralString;

impl GeneralString {
    /// Create a bound string from raw 8-bit characters
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        GeneralString(Binding::Bound(bytes.into()))
    }

    /// Create a bound string from text
    ///
    /// # Errors
    ///
    /// Returns a binding error if a character does not fit in 8 bits.
    pub fn new(text: &str) -> Result<Self> {
        let bytes = text
            .chars()
            .map(|c| {
                u8::try_from(u32::from(c)).map_err(|_| {
                    Error::binding(format!(
                        "Character U+{:04X} cannot be stored in a GeneralString value.",
                        u32::from(c)
                    ))
                })
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self::from_bytes(bytes))
    }

    /// Borrow the characters
    ///
    /// # Errors
    ///
    /// Returns a binding error if unbound.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        self.0.get(Self::TYPE_NAME).map(Vec::as_slice)
    }

    /// Concatenate another string onto this one
    ///
    /// # Errors
    ///
    /// Returns a binding error if either operand is unbound.
    pub fn concat(&self, other: &GeneralString) -> Result<GeneralString> {
        let mut bytes = self.as_bytes()?.to_vec();
        bytes.extend_from_slice(other.as_bytes()?);
        Ok(Self::from_bytes(bytes))
    }
}

impl BaseValue for GeneralString {
    const TYPE_NAME: &'static str = "GeneralString";

    fn is_bound(&self) -> bool {
        self.0.is_bound()
    }

    fn clean_up(&mut self) {
        self.0.clear();
    }

    fn log(&self, sink: &mut dyn LogSink) {
        let bytes = match &self.0 {
            Binding::Bound(bytes) => bytes,
            Binding::Unbound => return sink.write_unbound(),
        };
        if bytes.is_empty() {
            return sink.write_str("\"\"");
        }
        // Printable runs are quoted, everything else becomes a char() quadruple
        let mut in_quotes = false;
        for (i, &b) in bytes.iter().enumerate() {
            let printable = (0x20..0x7F).contains(&b);
            if printable {
                if !in_quotes {
                    if i > 0 {
                        sink.write_str(" & ");
                    }
                    sink.write_char('"');
                    in_quotes = true;
                }
                if b == b'"' {
                    sink.write_char('"');
                }
                sink.write_char(char::from(b));
            } else {
                if in_quotes {
                    sink.write_char('"');
                    in_quotes = false;
                }
                if i > 0 {
                    sink.write_str(" & ");
                }
                sink.write_str(&format!("char(0, 0, 0, {})", b));
            }
        }
        if in_quotes {
            sink.write_char('"');
        }
    }
}

impl ValueEq for GeneralString {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        Ok(self.0 == other.0)
    }
}

impl Marshal for GeneralString {
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

impl Lengthof for GeneralString {
    fn lengthof(&self) -> Result<usize> {
        Ok(self.as_bytes()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_printable() {
        assert_eq!(GeneralString::new("abc").unwrap().to_log_string(), "\"abc\"");
        assert_eq!(GeneralString::new("").unwrap().to_log_string(), "\"\"");
    }

    #[test]
    fn test_log_doubles_quotes() {
        let s = GeneralString::new("say \"hi\"").unwrap();
        assert_eq!(s.to_log_string(), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_log_mixed_control_characters() {
        let s = GeneralString::from_bytes(b"ab\x01c".to_vec());
        assert_eq!(s.to_log_string(), "\"ab\" & char(0, 0, 0, 1) & \"c\"");

        let s = GeneralString::from_bytes(vec![0x0A]);
        assert_eq!(s.to_log_string(), "char(0, 0, 0, 10)");
    }

    #[test]
    fn test_latin1_accepted_wide_rejected() {
        let s = GeneralString::new("é").unwrap();
        assert_eq!(s.as_bytes().unwrap(), &[0xE9]);
        assert!(GeneralString::new("€").unwrap_err().is_binding());
    }

    #[test]
    fn test_concat() {
        let a = GeneralString::new("ab").unwrap();
        let b = GeneralString::new("cd").unwrap();
        assert_eq!(a.concat(&b).unwrap().as_bytes().unwrap(), b"abcd");
        assert!(a
            .concat(&GeneralString::default())
            .unwrap_err()
            .is_binding());
    }
}
