//! Core contracts for TTCN runtime values
//!
//! This crate defines the conventions every runtime value type follows:
//! - Error: binding and marshalling error kinds
//! - Value state: `BaseValue`, `ValueEq`, `Binding<T>`, `Optional<T>`
//! - Marshalling: `TextBuf` transfer buffer and the `Marshal` trait
//! - Logging: the `LogSink` append interface
//! - LengthRestriction: `(min, max?)` length ranges

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod length;
pub mod log;
pub mod marshal;
pub mod text_buf;
pub mod value;

pub use error::{Error, Result};
pub use length::LengthRestriction;
pub use log::{LogSink, MarkerSink, UNBOUND_MARKER};
pub use marshal::{decode_message, encode_message, unbound_encoding, Marshal};
pub use text_buf::{MessageMark, TextBuf};
pub use value::{check_operands, field_equals, BaseValue, Binding, Optional, ValueEq};
