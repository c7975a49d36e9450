//! Logging sink abstraction
//!
//! Value types render themselves through this narrow append interface.
//! They never know how the sink stores or emits events; the runtime
//! crate decides that (see `ttcn_runtime::logging`).

/// Token written for an unbound value
pub const UNBOUND_MARKER: &str = "<unbound>";

/// Append-only textual event sink
pub trait LogSink {
    /// Append a single character
    fn write_char(&mut self, c: char);

    /// Append a piece of text
    fn write_str(&mut self, s: &str);

    /// Append the distinguished marker for an unbound value
    fn write_unbound(&mut self) {
        self.write_str(UNBOUND_MARKER);
    }
}

impl LogSink for String {
    fn write_char(&mut self, c: char) {
        self.push(c);
    }

    fn write_str(&mut self, s: &str) {
        self.push_str(s);
    }
}

/// Sink that renders the unbound marker with a custom token
///
/// Wraps another sink; everything except the unbound marker is forwarded
/// unchanged.
pub struct MarkerSink<'a, S: LogSink + ?Sized> {
    inner: &'a mut S,
    marker: &'a str,
}

impl<'a, S: LogSink + ?Sized> MarkerSink<'a, S> {
    /// Wrap `inner`, rendering unbound values as `marker`
    pub fn new(inner: &'a mut S, marker: &'a str) -> Self {
        MarkerSink { inner, marker }
    }
}

impl<S: LogSink + ?Sized> LogSink for MarkerSink<'_, S> {
    fn write_char(&mut self, c: char) {
        self.inner.write_char(c);
    }

    fn write_str(&mut self, s: &str) {
        self.inner.write_str(s);
    }

    fn write_unbound(&mut self) {
        self.inner.write_str(self.marker);
    }
}
