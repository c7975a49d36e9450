//! Bitstring value type and element access
//!
//! Bits are packed eight to a byte, bit `i` living in byte `i / 8` at
//! position `i % 8` (least significant first). Unused bits of the last
//! byte are always zero so packed bytes can be compared directly.

use crate::Lengthof;
use ttcn_core::{
    check_operands, unbound_encoding, BaseValue, Binding, Error, LogSink, Marshal, Result, TextBuf,
    ValueEq,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct Bits {
    n_bits: usize,
    data: Vec<u8>,
}

impl Bits {
    fn get(&self, index: usize) -> bool {
        self.data[index / 8] & (1 << (index % 8)) != 0
    }

    fn set(&mut self, index: usize, bit: bool) {
        let mask = 1 << (index % 8);
        if bit {
            self.data[index / 8] |= mask;
        } else {
            self.data[index / 8] &= !mask;
        }
    }

    fn push(&mut self, bit: bool) {
        if self.n_bits % 8 == 0 {
            self.data.push(0);
        }
        self.n_bits += 1;
        self.set(self.n_bits - 1, bit);
    }

    fn clear_padding(&mut self) {
        let used = self.n_bits % 8;
        if used != 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= (1u8 << used) - 1;
            }
        }
    }
}

/// TTCN-3 `bitstring`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitstring(Binding<Bits>);

impl Bitstring {
    /// Create a bound bitstring from individual bits
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut packed = Bits::default();
        for bit in bits {
            packed.push(*bit);
        }
        Bitstring(Binding::Bound(packed))
    }

    /// Parse a string of `0` and `1` characters
    ///
    /// # Errors
    ///
    /// Returns a binding error if any other character is present.
    pub fn parse(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::binding(format!(
                    "Invalid character '{}' in bitstring literal.",
                    other
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_bits(&bits))
    }

    /// Number of bits
    ///
    /// # Errors
    ///
    /// Returns a binding error if unbound.
    pub fn len(&self) -> Result<usize> {
        Ok(self.0.get(Self::TYPE_NAME)?.n_bits)
    }

    /// Check if the bitstring has no bits
    ///
    /// # Errors
    ///
    /// Returns a binding error if unbound.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Read-only access to one bit
    ///
    /// # Errors
    ///
    /// Returns a binding error if the bitstring is unbound or `index` is
    /// past the last bit.
    pub fn element(&self, index: usize) -> Result<BitstringElement<'_>> {
        let bits = self.0.as_option().ok_or_else(|| {
            Error::binding("Accessing an element of an unbound bitstring value.")
        })?;
        if index >= bits.n_bits {
            return Err(index_overflow(index, bits.n_bits));
        }
        Ok(BitstringElement { bits, index })
    }

    /// Writable access to one bit
    ///
    /// `index` may equal the current length, in which case the element
    /// starts unbound and assigning it appends a bit. An unbound bitstring
    /// accepts index 0 and becomes an empty bound bitstring first.
    ///
    /// # Errors
    ///
    /// Returns a binding error if `index` is past the end.
    pub fn element_mut(&mut self, index: usize) -> Result<BitstringElementMut<'_>> {
        if !self.0.is_bound() && index == 0 {
            self.0.set(Bits::default());
        }
        let bits = self.0.get_mut(Self::TYPE_NAME).map_err(|_| {
            Error::binding("Accessing an element of an unbound bitstring value.")
        })?;
        if index > bits.n_bits {
            return Err(index_overflow(index, bits.n_bits));
        }
        Ok(BitstringElementMut { bits, index })
    }
}

fn index_overflow(index: usize, len: usize) -> Error {
    Error::binding(format!(
        "Index overflow when accessing a bitstring element: The index is {}, but the string has only {} elements.",
        index, len
    ))
}

impl BaseValue for Bitstring {
    const TYPE_NAME: &'static str = "bitstring";

    fn is_bound(&self) -> bool {
        self.0.is_bound()
    }

    fn clean_up(&mut self) {
        self.0.clear();
    }

    fn log(&self, sink: &mut dyn LogSink) {
        match &self.0 {
            Binding::Bound(bits) => {
                sink.write_char('\'');
                for i in 0..bits.n_bits {
                    sink.write_char(if bits.get(i) { '1' } else { '0' });
                }
                sink.write_str("'B");
            }
            Binding::Unbound => sink.write_unbound(),
        }
    }
}

impl ValueEq for Bitstring {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        Ok(self.0 == other.0)
    }
}

impl Marshal for Bitstring {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        let bits = self
            .0
            .as_option()
            .ok_or_else(|| unbound_encoding(Self::TYPE_NAME))?;
        buf.push_int(bits.n_bits as i64);
        buf.push_raw(&bits.data);
        Ok(())
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        let start = buf.get_pos();
        let n_bits = buf.pull_len()?;
        let data = match buf.pull_raw(n_bits / 8 + usize::from(n_bits % 8 != 0)) {
            Ok(data) => data.to_vec(),
            Err(e) => {
                buf.set_pos(start);
                return Err(e);
            }
        };
        let mut bits = Bits { n_bits, data };
        bits.clear_padding();
        self.0.set(bits);
        Ok(())
    }
}

impl Lengthof for Bitstring {
    fn lengthof(&self) -> Result<usize> {
        self.len()
    }
}

// ============================================================================
// Elements
// ============================================================================

/// One bit of a bound bitstring, borrowed for reading
#[derive(Debug, Clone, Copy)]
pub struct BitstringElement<'a> {
    bits: &'a Bits,
    index: usize,
}

impl BitstringElement<'_> {
    /// Position of the bit
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of the bit
    pub fn get(&self) -> bool {
        self.bits.get(self.index)
    }

    /// Compare with another element
    pub fn equals(&self, other: &BitstringElement<'_>) -> bool {
        self.get() == other.get()
    }

    /// Compare with a bitstring, which must be exactly one bit long
    ///
    /// # Errors
    ///
    /// Returns a binding error if `other` is unbound.
    pub fn equals_bitstring(&self, other: &Bitstring) -> Result<bool> {
        let bits = other.0.as_option().ok_or_else(|| {
            Error::binding("The right operand of comparison is an unbound bitstring value.")
        })?;
        Ok(bits.n_bits == 1 && bits.get(0) == self.get())
    }

    /// Write as a one-bit literal, e.g. `'1'B`
    pub fn log(&self, sink: &mut dyn LogSink) {
        sink.write_str(if self.get() { "'1'B" } else { "'0'B" });
    }
}

/// One bit of a bitstring, borrowed for writing
#[derive(Debug)]
pub struct BitstringElementMut<'a> {
    bits: &'a mut Bits,
    index: usize,
}

impl BitstringElementMut<'_> {
    /// Check if the element refers to an existing bit
    pub fn is_bound(&self) -> bool {
        self.index < self.bits.n_bits
    }

    /// Value of the bit
    ///
    /// # Errors
    ///
    /// Returns a binding error if the element is the unassigned position
    /// just past the end.
    pub fn get(&self) -> Result<bool> {
        if !self.is_bound() {
            return Err(Error::binding("Using the value of an unbound bitstring element."));
        }
        Ok(self.bits.get(self.index))
    }

    /// Assign the bit, appending it when the element is past the end
    pub fn set(&mut self, bit: bool) {
        if self.is_bound() {
            self.bits.set(self.index, bit);
        } else {
            self.bits.push(bit);
        }
    }

    /// Assign from another bitstring element
    pub fn assign(&mut self, other: &BitstringElement<'_>) {
        self.set(other.get());
    }

    /// Write as a one-bit literal, or the unbound marker
    pub fn log(&self, sink: &mut dyn LogSink) {
        match self.get() {
            Ok(true) => sink.write_str("'1'B"),
            Ok(false) => sink.write_str("'0'B"),
            Err(_) => sink.write_unbound(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_log() {
        let b = Bitstring::parse("0110").unwrap();
        assert_eq!(b.len().unwrap(), 4);
        assert_eq!(b.to_log_string(), "'0110'B");
        assert!(Bitstring::parse("012").unwrap_err().is_binding());
    }

    #[test]
    fn test_element_read() {
        let b = Bitstring::parse("10").unwrap();
        assert!(b.element(0).unwrap().get());
        assert!(!b.element(1).unwrap().get());
        let mut out = String::new();
        b.element(0).unwrap().log(&mut out);
        assert_eq!(out, "'1'B");
    }

    #[test]
    fn test_element_errors() {
        let unbound = Bitstring::default();
        assert!(unbound.element(0).unwrap_err().is_binding());

        let b = Bitstring::parse("1").unwrap();
        let msg = b.element(1).unwrap_err().to_string();
        assert!(msg.contains("Index overflow"));
    }

    #[test]
    fn test_element_mut_appends() {
        let mut b = Bitstring::default();
        {
            let mut e = b.element_mut(0).unwrap();
            assert!(!e.is_bound());
            assert!(e.get().unwrap_err().is_binding());
            e.set(true);
        }
        b.element_mut(1).unwrap().set(false);
        b.element_mut(0).unwrap().set(false);
        assert_eq!(b.to_log_string(), "'00'B");
        assert!(b.element_mut(5).unwrap_err().is_binding());
    }

    #[test]
    fn test_unbound_element_mut_beyond_zero() {
        let mut b = Bitstring::default();
        assert!(b.element_mut(1).unwrap_err().is_binding());
        assert!(!b.is_bound());
    }

    #[test]
    fn test_element_comparisons() {
        let a = Bitstring::parse("101").unwrap();
        let one = Bitstring::parse("1").unwrap();
        assert!(a.element(0).unwrap().equals(&a.element(2).unwrap()));
        assert!(a.element(0).unwrap().equals_bitstring(&one).unwrap());
        assert!(!a.element(1).unwrap().equals_bitstring(&one).unwrap());
        assert!(a
            .element(0)
            .unwrap()
            .equals_bitstring(&Bitstring::default())
            .unwrap_err()
            .is_binding());
    }

    #[test]
    fn test_element_assign_between_strings() {
        let src = Bitstring::parse("1").unwrap();
        let mut dst = Bitstring::parse("00").unwrap();
        dst.element_mut(1).unwrap().assign(&src.element(0).unwrap());
        assert_eq!(dst.to_log_string(), "'01'B");
    }

    #[test]
    fn test_decode_clears_padding() {
        let mut buf = TextBuf::new();
        buf.push_int(3);
        buf.push_raw(&[0xFF]);
        let mut b = Bitstring::default();
        b.decode_text(&mut buf).unwrap();
        assert!(b.equals(&Bitstring::parse("111").unwrap()).unwrap());
    }

    #[test]
    fn test_decode_truncated_restores_cursor() {
        let mut buf = TextBuf::new();
        buf.push_int(16);
        buf.push_raw(&[0x01]);
        let mut b = Bitstring::default();
        assert!(b.decode_text(&mut buf).unwrap_err().is_marshalling());
        assert_eq!(buf.get_pos(), 0);
    }
}
