//! Value state contract
//!
//! Every runtime value type tracks whether it holds a determinate value:
//!
//! - **Unbound**: nothing assigned yet (or cleared). Reading is illegal.
//! - **Bound**: some determinate state, possibly with optional fields
//!   still unset.
//! - **Value**: bound, and every mandatory field is itself a value while
//!   every optional field is either omitted or a value.
//!
//! ## Rules
//!
//! - Default construction yields an unbound instance
//! - Every read path (compare, log, marshal) branches on boundness before
//!   touching the payload
//! - `assign` from an unbound source is a binding error and leaves the
//!   destination unchanged
//! - Copies are deep: mutating the source afterwards never affects the copy
//!
//! Boundness is an explicit tag ([`Binding`], [`Optional`]) stored alongside
//! the payload, so an unbound instance has no payload to misread.

use crate::error::{Error, Result};
use crate::log::LogSink;
use crate::text_buf::TextBuf;
use crate::Marshal;

/// Lifecycle shared by every runtime value type
pub trait BaseValue: Clone {
    /// Name used in binding error messages (e.g. "integer")
    const TYPE_NAME: &'static str;

    /// True unless the value is unbound
    fn is_bound(&self) -> bool;

    /// True if the value is fully determinate
    ///
    /// Stricter than `is_bound` for composites and optional fields.
    fn is_value(&self) -> bool {
        self.is_bound()
    }

    /// True if the value is present
    ///
    /// Equivalent to `is_bound` for top-level values; optional fields
    /// additionally report false when omitted.
    fn is_present(&self) -> bool {
        self.is_bound()
    }

    /// Reset to unbound, dropping any owned sub-values
    fn clean_up(&mut self);

    /// Render the value; writes only the unbound marker when unbound
    fn log(&self, sink: &mut dyn LogSink);

    /// Deep-copy `source` into `self`
    ///
    /// # Errors
    ///
    /// Returns a binding error if `source` is unbound. `self` is left
    /// untouched in that case.
    fn assign(&mut self, source: &Self) -> Result<()> {
        if !source.is_bound() {
            return Err(Error::binding(format!(
                "Copying an unbound {} value.",
                Self::TYPE_NAME
            )));
        }
        *self = source.clone();
        Ok(())
    }

    /// Render the value into a fresh string
    fn to_log_string(&self) -> String {
        let mut out = String::new();
        self.log(&mut out);
        out
    }
}

/// Equality that refuses to compare unbound operands
pub trait ValueEq: BaseValue {
    /// Compare two values of the same type
    ///
    /// # Errors
    ///
    /// Returns a binding error if either operand is unbound.
    fn equals(&self, other: &Self) -> Result<bool>;
}

/// Check both comparison operands are bound
///
/// Shared by `ValueEq` implementations so the error text is uniform.
pub fn check_operands<T: BaseValue>(lhs: &T, rhs: &T) -> Result<()> {
    if !lhs.is_bound() {
        return Err(Error::binding(format!(
            "The left operand of comparison is an unbound {} value.",
            T::TYPE_NAME
        )));
    }
    if !rhs.is_bound() {
        return Err(Error::binding(format!(
            "The right operand of comparison is an unbound {} value.",
            T::TYPE_NAME
        )));
    }
    Ok(())
}

/// Compare one field of two composite values
///
/// Two unbound fields are equal, a bound field never equals an unbound one,
/// and two bound fields defer to the field type's own equality.
pub fn field_equals<T: ValueEq>(lhs: &T, rhs: &T) -> Result<bool> {
    match (lhs.is_bound(), rhs.is_bound()) {
        (false, false) => Ok(true),
        (true, true) => lhs.equals(rhs),
        _ => Ok(false),
    }
}

// ============================================================================
// Binding<T>
// ============================================================================

/// Payload carrier with an explicit bound/unbound tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding<T> {
    /// No value assigned
    Unbound,
    /// Holds a value
    Bound(T),
}

impl<T> Default for Binding<T> {
    fn default() -> Self {
        Binding::Unbound
    }
}

impl<T> Binding<T> {
    /// Check if a payload is present
    #[inline]
    pub fn is_bound(&self) -> bool {
        matches!(self, Binding::Bound(_))
    }

    /// Borrow the payload
    ///
    /// # Errors
    ///
    /// Returns a binding error naming `type_name` if unbound.
    pub fn get(&self, type_name: &str) -> Result<&T> {
        match self {
            Binding::Bound(v) => Ok(v),
            Binding::Unbound => Err(Error::binding(format!(
                "Accessing an unbound {} value.",
                type_name
            ))),
        }
    }

    /// Mutably borrow the payload
    ///
    /// # Errors
    ///
    /// Returns a binding error naming `type_name` if unbound.
    pub fn get_mut(&mut self, type_name: &str) -> Result<&mut T> {
        match self {
            Binding::Bound(v) => Ok(v),
            Binding::Unbound => Err(Error::binding(format!(
                "Accessing an unbound {} value.",
                type_name
            ))),
        }
    }

    /// Borrow the payload if bound
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Binding::Bound(v) => Some(v),
            Binding::Unbound => None,
        }
    }

    /// Replace the payload, binding the carrier
    pub fn set(&mut self, value: T) {
        *self = Binding::Bound(value);
    }

    /// Drop the payload
    pub fn clear(&mut self) {
        *self = Binding::Unbound;
    }
}

// ============================================================================
// Optional<T>
// ============================================================================

/// Optional field of a composite value
///
/// Distinguishes a field that was never set (`Unbound`) from one that was
/// explicitly omitted (`Omit`).
#[derive(Debug, Clone, PartialEq)]
pub enum Optional<T> {
    /// Neither set nor omitted
    Unbound,
    /// Explicitly omitted
    Omit,
    /// Present with a value (which may itself still be unbound)
    Present(T),
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Optional::Unbound
    }
}

impl<T: BaseValue> Optional<T> {
    /// Set the field to a value
    pub fn set(&mut self, value: T) {
        *self = Optional::Present(value);
    }

    /// Mark the field as omitted
    pub fn omit(&mut self) {
        *self = Optional::Omit;
    }

    /// Check if the field is explicitly omitted
    pub fn is_omit(&self) -> bool {
        matches!(self, Optional::Omit)
    }

    /// Borrow the present value
    ///
    /// # Errors
    ///
    /// Returns a binding error if the field is omitted or unbound.
    pub fn get(&self) -> Result<&T> {
        match self {
            Optional::Present(v) => Ok(v),
            Optional::Omit => Err(Error::binding(format!(
                "Using the value of an optional {} field containing omit.",
                T::TYPE_NAME
            ))),
            Optional::Unbound => Err(Error::binding(format!(
                "Using the value of an unbound optional {} field.",
                T::TYPE_NAME
            ))),
        }
    }

    /// Borrow the value mutably, switching the field to present first
    ///
    /// An omitted or unbound field becomes present with an unbound value.
    pub fn present_mut(&mut self) -> &mut T
    where
        T: Default,
    {
        match self {
            Optional::Present(v) => v,
            slot => {
                *slot = Optional::Present(T::default());
                slot.present_mut()
            }
        }
    }
}

impl<T: BaseValue> BaseValue for Optional<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn is_bound(&self) -> bool {
        match self {
            Optional::Unbound => false,
            Optional::Omit => true,
            Optional::Present(v) => v.is_bound(),
        }
    }

    fn is_value(&self) -> bool {
        match self {
            Optional::Unbound => false,
            Optional::Omit => true,
            Optional::Present(v) => v.is_value(),
        }
    }

    fn is_present(&self) -> bool {
        match self {
            Optional::Present(v) => v.is_bound(),
            _ => false,
        }
    }

    fn clean_up(&mut self) {
        *self = Optional::Unbound;
    }

    fn log(&self, sink: &mut dyn LogSink) {
        match self {
            Optional::Unbound => sink.write_unbound(),
            Optional::Omit => sink.write_str("omit"),
            Optional::Present(v) => v.log(sink),
        }
    }
}

impl<T: ValueEq> ValueEq for Optional<T> {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        match (self, other) {
            (Optional::Omit, Optional::Omit) => Ok(true),
            (Optional::Present(a), Optional::Present(b)) => a.equals(b),
            _ => Ok(false),
        }
    }
}

impl<T: BaseValue + Marshal + Default> Marshal for Optional<T> {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        match self {
            Optional::Omit => {
                buf.push_bool(false);
                Ok(())
            }
            Optional::Present(v) if v.is_bound() => buf.push_all(|buf| {
                buf.push_bool(true);
                v.encode_text(buf)
            }),
            _ => Err(Error::marshalling(format!(
                "Text encoder: Encoding an unbound optional {} field.",
                T::TYPE_NAME
            ))),
        }
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        *self = buf.pull_all(|buf| {
            if buf.pull_bool()? {
                let mut value = T::default();
                value.decode_text(buf)?;
                Ok(Optional::Present(value))
            } else {
                Ok(Optional::Omit)
            }
        })?;
        Ok(())
    }
}
