//! Inter-component transfer buffer
//!
//! `TextBuf` is the buffer values are marshalled into when they travel
//! between test components. It is not a wire protocol encoding.
//!
//! ## Format
//!
//! ```text
//! int:     [c|s|m5..m0] ([c|m6..m0])*      variable length, LSB group first
//! bool:    int 0 or 1
//! string:  int length, then raw UTF-8 bytes
//! message: [length: u32 LE][payload]
//! ```
//!
//! - **c**: continuation bit (0x80), another byte follows
//! - **s**: sign bit (0x40), first byte only
//! - **m**: magnitude bits
//!
//! A failed pull leaves the read cursor where the pull started.

use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};

const CONTINUATION: u8 = 0x80;
const SIGN: u8 = 0x40;
const FIRST_MASK: u8 = 0x3F;
const NEXT_MASK: u8 = 0x7F;
const HEADER_LEN: usize = 4;

fn message_header(payload_len: usize) -> Result<u32> {
    u32::try_from(payload_len).map_err(|_| {
        Error::marshalling(format!(
            "Message payload of {} bytes exceeds the length header",
            payload_len
        ))
    })
}

/// Position of a message header reserved by [`TextBuf::begin_message`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageMark(usize);

/// Append-only output buffer with a read cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuf {
    data: Vec<u8>,
    pos: usize,
    message_end: Option<usize>,
}

impl TextBuf {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer for reading previously marshalled bytes
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        TextBuf {
            data: data.into(),
            pos: 0,
            message_end: None,
        }
    }

    // =========================================================================
    // Buffer state
    // =========================================================================

    /// All bytes written so far, including already-read ones
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Total number of bytes in the buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read position
    pub fn get_pos(&self) -> usize {
        self.pos
    }

    /// Move the read cursor
    ///
    /// Positions past the end are clamped to the end.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Move the read cursor back to the start
    pub fn rewind(&mut self) {
        self.pos = 0;
        self.message_end = None;
    }

    /// Number of unread bytes
    ///
    /// Inside an open message only the rest of that message counts.
    pub fn remaining(&self) -> usize {
        self.limit().saturating_sub(self.pos)
    }

    /// Unread payload bytes of the open message, if any
    pub fn message_remaining(&self) -> Option<usize> {
        self.message_end.map(|end| end.saturating_sub(self.pos))
    }

    fn limit(&self) -> usize {
        self.message_end.unwrap_or(self.data.len())
    }

    // =========================================================================
    // Integers
    // =========================================================================

    /// Append a signed integer in variable-length form
    pub fn push_int(&mut self, value: i64) {
        let mut magnitude = value.unsigned_abs();
        let mut first = (magnitude as u8) & FIRST_MASK;
        if value < 0 {
            first |= SIGN;
        }
        magnitude >>= 6;
        if magnitude != 0 {
            first |= CONTINUATION;
        }
        self.data.push(first);

        while magnitude != 0 {
            let mut byte = (magnitude as u8) & NEXT_MASK;
            magnitude >>= 7;
            if magnitude != 0 {
                byte |= CONTINUATION;
            }
            self.data.push(byte);
        }
    }

    /// Read a signed integer written by [`push_int`](Self::push_int)
    pub fn pull_int(&mut self) -> Result<i64> {
        let start = self.pos;
        let result = self.pull_int_inner();
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    fn pull_int_inner(&mut self) -> Result<i64> {
        let first = self.next_byte()?;
        let negative = first & SIGN != 0;
        let mut magnitude = u64::from(first & FIRST_MASK);
        let mut shift = 6u32;
        let mut more = first & CONTINUATION != 0;

        while more {
            let byte = self.next_byte()?;
            let part = u64::from(byte & NEXT_MASK);
            if shift >= 64 || (part << shift) >> shift != part {
                return Err(Error::marshalling(format!(
                    "Integer at offset {} does not fit in 64 bits",
                    self.pos
                )));
            }
            magnitude |= part << shift;
            shift += 7;
            more = byte & CONTINUATION != 0;
        }

        const MIN_MAGNITUDE: u64 = 1 << 63;
        match (negative, magnitude) {
            (true, MIN_MAGNITUDE) => Ok(i64::MIN),
            (true, m) if m < MIN_MAGNITUDE => Ok(-(m as i64)),
            (false, m) if m < MIN_MAGNITUDE => Ok(m as i64),
            _ => Err(Error::marshalling(format!(
                "Integer magnitude {} out of range",
                magnitude
            ))),
        }
    }

    /// Read an integer and check it is a valid length
    pub fn pull_len(&mut self) -> Result<usize> {
        let start = self.pos;
        let value = self.pull_int()?;
        usize::try_from(value).map_err(|_| {
            self.pos = start;
            Error::marshalling(format!("Negative length {} at offset {}", value, start))
        })
    }

    // =========================================================================
    // Booleans, raw bytes and strings
    // =========================================================================

    /// Append a boolean as integer 0 or 1
    pub fn push_bool(&mut self, value: bool) {
        self.push_int(i64::from(value));
    }

    /// Read a boolean, rejecting anything but 0 and 1
    pub fn pull_bool(&mut self) -> Result<bool> {
        let start = self.pos;
        match self.pull_int()? {
            0 => Ok(false),
            1 => Ok(true),
            other => {
                self.pos = start;
                Err(Error::marshalling(format!(
                    "Invalid boolean flag {} at offset {}",
                    other, start
                )))
            }
        }
    }

    /// Append raw bytes without a length prefix
    pub fn push_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Read exactly `len` raw bytes
    pub fn pull_raw(&mut self, len: usize) -> Result<&[u8]> {
        if self.remaining() < len {
            return Err(Error::marshalling(format!(
                "Unexpected end of buffer: need {} bytes at offset {}, have {}",
                len,
                self.pos,
                self.remaining()
            )));
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.data[start..self.pos])
    }

    /// Append length-prefixed bytes
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.push_int(bytes.len() as i64);
        self.push_raw(bytes);
    }

    /// Read length-prefixed bytes
    pub fn pull_bytes(&mut self) -> Result<Vec<u8>> {
        let start = self.pos;
        let len = self.pull_len()?;
        match self.pull_raw(len) {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }

    /// Append a length-prefixed UTF-8 string
    pub fn push_string(&mut self, s: &str) {
        self.push_bytes(s.as_bytes());
    }

    /// Read a length-prefixed UTF-8 string
    pub fn pull_string(&mut self) -> Result<String> {
        let start = self.pos;
        let bytes = self.pull_bytes()?;
        String::from_utf8(bytes).map_err(|_| {
            self.pos = start;
            Error::marshalling(format!("Invalid UTF-8 string at offset {}", start))
        })
    }

    // =========================================================================
    // Multi-field values
    // =========================================================================

    /// Drop every byte from `len` on
    ///
    /// The read cursor and any open message end are clamped to the new end.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
        let end = self.data.len();
        self.pos = self.pos.min(end);
        self.message_end = self.message_end.map(|e| e.min(end));
    }

    /// Run a sequence of pushes that succeeds or leaves no bytes behind
    ///
    /// # Errors
    ///
    /// Returns the error of `push`, after truncating the buffer back to
    /// its length before the call.
    pub fn push_all<F>(&mut self, push: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let len = self.data.len();
        push(self).map_err(|e| {
            self.truncate(len);
            e
        })
    }

    /// Run a sequence of pulls that succeeds or leaves the cursor in place
    ///
    /// # Errors
    ///
    /// Returns the error of `pull`, after moving the read cursor back to
    /// where it was before the call.
    pub fn pull_all<T, F>(&mut self, pull: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let start = self.pos;
        pull(self).map_err(|e| {
            self.pos = start;
            e
        })
    }

    // =========================================================================
    // Message framing
    // =========================================================================

    /// Reserve a length header for a new message
    pub fn begin_message(&mut self) -> MessageMark {
        let mark = MessageMark(self.data.len());
        self.data.extend_from_slice(&[0u8; HEADER_LEN]);
        mark
    }

    /// Fill in the length header reserved by `begin_message`
    ///
    /// # Errors
    ///
    /// Returns a marshalling error if the payload does not fit the 32-bit
    /// header. The message is left open; drop it with `discard_message`.
    pub fn end_message(&mut self, mark: MessageMark) -> Result<()> {
        let header = message_header(self.data.len() - mark.0 - HEADER_LEN)?;
        LittleEndian::write_u32(&mut self.data[mark.0..mark.0 + HEADER_LEN], header);
        Ok(())
    }

    /// Drop a message started with `begin_message` and everything after it
    pub fn discard_message(&mut self, mark: MessageMark) {
        self.truncate(mark.0);
    }

    /// Check if a complete message starts at the read cursor
    pub fn is_message(&self) -> bool {
        self.peek_message_len()
            .map(|len| self.remaining() >= HEADER_LEN + len)
            .unwrap_or(false)
    }

    /// Enter the message at the read cursor, returning its payload length
    ///
    /// The cursor is left at the start of the payload.
    pub fn open_message(&mut self) -> Result<usize> {
        if !self.is_message() {
            return Err(Error::marshalling(format!(
                "No complete message at offset {}",
                self.pos
            )));
        }
        let len = self.peek_message_len().unwrap_or(0);
        self.pos += HEADER_LEN;
        self.message_end = Some(self.pos + len);
        Ok(len)
    }

    /// Discard the current message and everything before it
    ///
    /// Works on the message entered with `open_message`, or on the complete
    /// message at the read cursor when none is open. Remaining bytes are
    /// shifted to the front of the buffer.
    pub fn cut_message(&mut self) -> Result<()> {
        let end = match self.message_end.take() {
            Some(end) => end,
            None => {
                if !self.is_message() {
                    return Err(Error::marshalling(format!(
                        "No complete message to cut at offset {}",
                        self.pos
                    )));
                }
                self.pos + HEADER_LEN + self.peek_message_len().unwrap_or(0)
            }
        };
        self.data.drain(..end);
        self.pos = 0;
        Ok(())
    }

    fn peek_message_len(&self) -> Option<usize> {
        if self.remaining() < HEADER_LEN {
            return None;
        }
        Some(LittleEndian::read_u32(&self.data[self.pos..self.pos + HEADER_LEN]) as usize)
    }

    fn next_byte(&mut self) -> Result<u8> {
        if self.pos >= self.limit() {
            return Err(Error::marshalling(format!(
                "Unexpected end of buffer at offset {}",
                self.pos
            )));
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }
}
