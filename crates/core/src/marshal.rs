//! Text marshalling contract
//!
//! Values travel between test components as bytes in a [`TextBuf`].
//! Each transferable type writes a self-describing encoding of its bound
//! value and reads back exactly the bytes it wrote.
//!
//! ## Rules
//!
//! - Encoding an unbound value is a marshalling error
//! - Process-local types (default references) refuse both directions
//! - Composites write their fields in declaration order; optional fields
//!   carry a presence flag ahead of the payload
//! - For every bound transferable value `v`, decoding the encoding of `v`
//!   yields a value equal to `v`

use crate::error::{Error, Result};
use crate::text_buf::TextBuf;

/// Serialize and deserialize a value through a transfer buffer
pub trait Marshal {
    /// Append the encoding of this value to `buf`
    ///
    /// # Errors
    ///
    /// Returns a marshalling error if the value is unbound or the type
    /// cannot be transferred.
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()>;

    /// Replace this value with one read from `buf`
    ///
    /// # Errors
    ///
    /// Returns a marshalling error on truncated or malformed input, or if
    /// the type cannot be transferred.
    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()>;
}

/// Error for an attempt to encode an unbound value of `type_name`
pub fn unbound_encoding(type_name: &str) -> Error {
    Error::marshalling(format!(
        "Text encoder: Encoding an unbound {} value.",
        type_name
    ))
}

/// Encode `value` as one framed message
///
/// On failure the partial message is removed again, so the buffer is
/// exactly as it was before the call.
pub fn encode_message<T: Marshal + ?Sized>(value: &T, buf: &mut TextBuf) -> Result<()> {
    let mark = buf.begin_message();
    value
        .encode_text(buf)
        .and_then(|()| buf.end_message(mark))
        .map_err(|e| {
            buf.discard_message(mark);
            e
        })
}

/// Decode one framed message into a fresh `T`
///
/// The message is always cut from the buffer, including when decoding
/// fails, so the next message can still be read. A payload that is not
/// consumed completely is rejected.
pub fn decode_message<T: Marshal + Default>(buf: &mut TextBuf) -> Result<T> {
    buf.open_message()?;
    let mut value = T::default();
    let decoded = value.decode_text(buf).and_then(|()| match buf.message_remaining() {
        Some(0) | None => Ok(()),
        Some(extra) => Err(Error::marshalling(format!(
            "{} unread bytes left in message after decoding",
            extra
        ))),
    });
    buf.cut_message()?;
    decoded.map(|()| value)
}
