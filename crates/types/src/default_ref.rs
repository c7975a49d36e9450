//! Default reference handle
//!
//! A `DefaultRef` names an activated default (an altstep kept running in the
//! background of a test component). The activation record itself lives in
//! the runtime's registry; the handle only carries its identifier.
//!
//! ## States
//!
//! - **Unbound**: never assigned. Any use is a binding error.
//! - **Null**: a valid empty reference (`null` in TTCN-3).
//! - **Active**: refers to one registry entry by [`DefaultId`].
//!
//! Handles compare by identity and are meaningful only inside the process
//! that owns the registry, so they refuse to be marshalled.

use std::fmt;
use ttcn_core::{check_operands, BaseValue, Error, LogSink, Marshal, Result, TextBuf, ValueEq};

/// Identifier of an activated default, issued by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefaultId(u64);

impl DefaultId {
    /// Wrap a raw identifier
    pub const fn new(raw: u64) -> Self {
        DefaultId(raw)
    }

    /// Raw identifier
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DefaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "default#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
enum DefaultState {
    #[default]
    Unbound,
    Null,
    Active(DefaultId),
}

/// TTCN-3 `default` reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DefaultRef(DefaultState);

impl DefaultRef {
    /// A bound handle with no referent
    pub const fn make_null() -> Self {
        DefaultRef(DefaultState::Null)
    }

    /// A bound handle referring to `id`
    pub const fn bind(id: DefaultId) -> Self {
        DefaultRef(DefaultState::Active(id))
    }

    /// The referent, or `None` for a null handle
    ///
    /// # Errors
    ///
    /// Returns a binding error if the handle is unbound.
    pub fn resolve(&self) -> Result<Option<DefaultId>> {
        match self.0 {
            DefaultState::Unbound => Err(Error::binding(
                "Using the value of an unbound default reference.",
            )),
            DefaultState::Null => Ok(None),
            DefaultState::Active(id) => Ok(Some(id)),
        }
    }

    /// Check if the handle is the null reference
    ///
    /// # Errors
    ///
    /// Returns a binding error if the handle is unbound.
    pub fn is_null(&self) -> Result<bool> {
        Ok(self.resolve()?.is_none())
    }
}

impl BaseValue for DefaultRef {
    const TYPE_NAME: &'static str = "default reference";

    fn is_bound(&self) -> bool {
        self.0 != DefaultState::Unbound
    }

    fn clean_up(&mut self) {
        self.0 = DefaultState::Unbound;
    }

    fn log(&self, sink: &mut dyn LogSink) {
        match self.0 {
            DefaultState::Unbound => sink.write_unbound(),
            DefaultState::Null => sink.write_str("null"),
            DefaultState::Active(id) => sink.write_str(&id.to_string()),
        }
    }
}

impl ValueEq for DefaultRef {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        Ok(self.0 == other.0)
    }
}

impl Marshal for DefaultRef {
    fn encode_text(&self, _buf: &mut TextBuf) -> Result<()> {
        Err(Error::marshalling(
            "Default references cannot be sent to other test components.",
        ))
    }

    fn decode_text(&mut self, _buf: &mut TextBuf) -> Result<()> {
        Err(Error::marshalling(
            "Default references cannot be received from other test components.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_states() {
        let unbound = DefaultRef::default();
        assert!(!unbound.is_bound());
        assert!(unbound.resolve().unwrap_err().is_binding());

        let null = DefaultRef::make_null();
        assert!(null.is_bound());
        assert!(null.is_null().unwrap());

        let active = DefaultRef::bind(DefaultId::new(3));
        assert_eq!(active.resolve().unwrap(), Some(DefaultId::new(3)));
        assert!(!active.is_null().unwrap());
    }

    #[test]
    fn test_identity_equality() {
        let id = DefaultId::new(1);
        assert!(DefaultRef::bind(id).equals(&DefaultRef::bind(id)).unwrap());
        assert!(DefaultRef::make_null()
            .equals(&DefaultRef::make_null())
            .unwrap());
        assert!(!DefaultRef::bind(id)
            .equals(&DefaultRef::make_null())
            .unwrap());
        assert!(!DefaultRef::bind(id)
            .equals(&DefaultRef::bind(DefaultId::new(2)))
            .unwrap());
    }

    #[test]
    fn test_unbound_comparison_fails() {
        let err = DefaultRef::default()
            .equals(&DefaultRef::make_null())
            .unwrap_err();
        assert!(err.to_string().contains("left operand"));
        let err = DefaultRef::make_null()
            .equals(&DefaultRef::default())
            .unwrap_err();
        assert!(err.to_string().contains("right operand"));
    }

    #[test]
    fn test_log() {
        assert_eq!(DefaultRef::default().to_log_string(), "<unbound>");
        assert_eq!(DefaultRef::make_null().to_log_string(), "null");
        assert_eq!(
            DefaultRef::bind(DefaultId::new(7)).to_log_string(),
            "default#7"
        );
    }

    #[test]
    fn test_never_marshalled() {
        let mut buf = TextBuf::new();
        assert!(DefaultRef::make_null()
            .encode_text(&mut buf)
            .unwrap_err()
            .is_marshalling());
        assert!(buf.is_empty());

        buf.push_int(0);
        let mut handle = DefaultRef::make_null();
        assert!(handle.decode_text(&mut buf).unwrap_err().is_marshalling());
        assert!(handle.is_null().unwrap());
    }
}
