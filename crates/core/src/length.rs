//! Length restriction descriptor
//!
//! A `(min, max?)` range applied to the length of strings and sequences,
//! as in `length(2..5)` or `length(3..infinity)`.
//!
//! ## Contract
//!
//! - Without a maximum the range is open-ended: `min..infinity`
//! - `single(n)` sets both bounds to `n` and marks the maximum present
//! - Bounds are not cross-checked: `min > max` or negative bounds are
//!   accepted as given and simply make `validate` reject every length

use crate::error::Result;
use crate::log::LogSink;
use crate::text_buf::TextBuf;
use crate::Marshal;
use std::fmt;

/// Allowed length range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LengthRestriction {
    min: i64,
    max: i64,
    has_max: bool,
}

impl LengthRestriction {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Open-ended restriction `0..infinity`
    pub const fn new() -> Self {
        LengthRestriction {
            min: 0,
            max: 0,
            has_max: false,
        }
    }

    /// Exact length `n`
    pub const fn single(n: i64) -> Self {
        LengthRestriction {
            min: n,
            max: n,
            has_max: true,
        }
    }

    /// Closed range `min..max`
    pub const fn range(min: i64, max: i64) -> Self {
        LengthRestriction {
            min,
            max,
            has_max: true,
        }
    }

    /// Open-ended range `min..infinity`
    pub const fn unbounded(min: i64) -> Self {
        LengthRestriction {
            min,
            max: 0,
            has_max: false,
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Restrict to exactly `n`
    pub fn set_single(&mut self, n: i64) {
        self.min = n;
        self.max = n;
        self.has_max = true;
    }

    /// Set the lower bound
    pub fn set_min(&mut self, n: i64) {
        self.min = n;
    }

    /// Set the upper bound, making the range closed
    pub fn set_max(&mut self, n: i64) {
        self.max = n;
        self.has_max = true;
    }

    /// Drop the upper bound, making the range open-ended
    pub fn clear_max(&mut self) {
        self.max = 0;
        self.has_max = false;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Lower bound
    #[inline]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound, if the range is closed
    #[inline]
    pub const fn max(&self) -> Option<i64> {
        if self.has_max {
            Some(self.max)
        } else {
            None
        }
    }

    /// Check if an upper bound is set
    #[inline]
    pub const fn has_max(&self) -> bool {
        self.has_max
    }

    /// Check if exactly one length is allowed
    #[inline]
    pub const fn is_single(&self) -> bool {
        self.has_max && self.min == self.max
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Check a length against the range
    pub const fn validate(&self, length: i64) -> bool {
        length >= self.min && (!self.has_max || length <= self.max)
    }

    /// Render as `length(n)`, `length(min..max)` or `length(min..infinity)`
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Write the rendered form to a log sink
    pub fn log(&self, sink: &mut dyn LogSink) {
        sink.write_str(&self.render());
    }
}

impl fmt::Display for LengthRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "length({})", self.min)
        } else if self.has_max {
            write!(f, "length({}..{})", self.min, self.max)
        } else {
            write!(f, "length({}..infinity)", self.min)
        }
    }
}

impl Marshal for LengthRestriction {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        buf.push_bool(self.has_max);
        buf.push_int(self.min);
        if self.has_max {
            buf.push_int(self.max);
        }
        Ok(())
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        *self = buf.pull_all(|buf| {
            let has_max = buf.pull_bool()?;
            let min = buf.pull_int()?;
            let max = if has_max { buf.pull_int()? } else { 0 };
            Ok(LengthRestriction { min, max, has_max })
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_open_from_zero() {
        let r = LengthRestriction::default();
        assert_eq!(r, LengthRestriction::new());
        assert!(r.validate(0));
        assert!(r.validate(i64::MAX));
        assert!(!r.validate(-1));
        assert_eq!(r.render(), "length(0..infinity)");
    }

    #[test]
    fn test_single() {
        let r = LengthRestriction::single(5);
        assert!(r.is_single());
        assert!(r.validate(5));
        assert!(!r.validate(4));
        assert!(!r.validate(6));
        assert_eq!(r.render(), "length(5)");
    }

    #[test]
    fn test_set_single_overrides_range() {
        let mut r = LengthRestriction::range(1, 9);
        r.set_single(3);
        assert!(r.is_single());
        assert_eq!(r.max(), Some(3));
    }

    #[test]
    fn test_min_without_max() {
        let mut r = LengthRestriction::new();
        r.set_min(2);
        assert!(!r.has_max());
        assert!(r.validate(2));
        assert!(r.validate(1_000_000));
        assert!(!r.validate(1));
        assert_eq!(r.render(), "length(2..infinity)");
    }

    #[test]
    fn test_set_max_closes_range() {
        let mut r = LengthRestriction::unbounded(1);
        r.set_max(4);
        assert!(r.has_max());
        assert!(!r.is_single());
        assert!(r.validate(4));
        assert!(!r.validate(5));
        assert_eq!(r.render(), "length(1..4)");

        r.clear_max();
        assert!(r.validate(5));
    }

    #[test]
    fn test_inverted_bounds_accepted_unchecked() {
        let r = LengthRestriction::range(5, 2);
        assert_eq!(r.min(), 5);
        assert_eq!(r.max(), Some(2));
        assert!(!r.validate(3));
        assert_eq!(r.render(), "length(5..2)");
    }

    #[test]
    fn test_log_matches_display() {
        let mut out = String::new();
        LengthRestriction::range(0, 10).log(&mut out);
        assert_eq!(out, "length(0..10)");
    }

    #[test]
    fn test_marshal_open_range_omits_max() {
        let mut buf = TextBuf::new();
        LengthRestriction::unbounded(3).encode_text(&mut buf).unwrap();
        assert_eq!(buf.as_bytes(), &[0x00, 0x03]);

        let mut decoded = LengthRestriction::single(1);
        decoded.decode_text(&mut buf).unwrap();
        assert_eq!(decoded, LengthRestriction::unbounded(3));
    }

    #[test]
    fn test_marshal_truncated() {
        let mut buf = TextBuf::new();
        buf.push_bool(true);
        buf.push_int(1);
        let mut decoded = LengthRestriction::single(7);
        assert!(decoded.decode_text(&mut buf).unwrap_err().is_marshalling());
        assert_eq!(decoded, LengthRestriction::single(7));
        assert_eq!(buf.get_pos(), 0);
    }
}
