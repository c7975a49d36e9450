//! Representative TTCN-3 / ASN.1 value types
//!
//! Each type follows the contracts from `ttcn-core`:
//! - Integer, OctetString, ObjectIdentifier: simple bound/unbound payloads
//! - Bitstring: packed bits with borrowed element access
//! - GeneralString (alias ObjectDescriptor): 8-bit character string
//! - DefaultRef: non-owning, non-transferable reference handle
//! - External: the ASN.1 EXTERNAL composite with an optional field

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitstring;
pub mod default_ref;
pub mod external;
pub mod general_string;
pub mod integer;
pub mod objid;
pub mod octetstring;

pub use bitstring::{Bitstring, BitstringElement, BitstringElementMut};
pub use default_ref::{DefaultId, DefaultRef};
pub use external::{ContextNegotiation, External, ExternalIdentification, Identification, Syntaxes};
pub use general_string::{GeneralString, ObjectDescriptor};
pub use integer::Integer;
pub use objid::ObjectIdentifier;
pub use octetstring::OctetString;

use ttcn_core::{LengthRestriction, Result};

/// Types whose length can be checked against a [`LengthRestriction`]
pub trait Lengthof {
    /// Number of elements (bits, octets, characters)
    ///
    /// # Errors
    ///
    /// Returns a binding error if the value is unbound.
    fn lengthof(&self) -> Result<usize>;

    /// Check the length against `restriction`
    ///
    /// # Errors
    ///
    /// Returns a binding error if the value is unbound.
    fn check_length(&self, restriction: &LengthRestriction) -> Result<bool> {
        let len = i64::try_from(self.lengthof()?).unwrap_or(i64::MAX);
        Ok(restriction.validate(len))
    }
}
