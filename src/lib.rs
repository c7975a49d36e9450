//! TTCN - runtime value layer for TTCN-3 test suites
//!
//! Generated test code is built from a small set of runtime pieces:
//!
//! - value types that track whether they are bound, log themselves and
//!   marshal through a [`TextBuf`] when sent between test components
//! - [`LengthRestriction`] descriptors used by templates
//! - module lifecycle hooks and the single-mode driver
//!
//! # Quick Start
//!
//! ```
//! use ttcn::{BaseValue, Integer, Marshal, TextBuf};
//!
//! let value = Integer::new(42);
//! let mut buf = TextBuf::new();
//! value.encode_text(&mut buf)?;
//!
//! let mut copy = Integer::default();
//! assert!(!copy.is_bound());
//! copy.decode_text(&mut buf)?;
//! assert_eq!(copy.get()?, 42);
//! # Ok::<(), ttcn::Error>(())
//! ```
//!
//! # Crates
//!
//! - `ttcn-core`: value contract, errors, the transfer buffer
//! - `ttcn-types`: concrete value types
//! - `ttcn-runtime`: configuration, logging, defaults, modules, single mode

pub use ttcn_core::*;
pub use ttcn_runtime::*;
pub use ttcn_types::*;
