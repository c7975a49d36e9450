//! Value Contract Test Suite
//!
//! End-to-end checks of the runtime value layer through the `ttcn` facade.
//!
//! ## Areas Covered
//!
//! - `binding`: unbound defaults, deep copies, assignment atomicity
//! - `marshalling`: transfer buffer round trips and framing
//! - `defaults`: default references against a live registry
//! - `length`: length restriction descriptors
//! - `external`: the EXTERNAL composite and its optional field
//! - `single_mode`: module lifecycle and the single-mode driver
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test value_contract
//! cargo test --test value_contract marshalling::
//! ```

mod binding;
mod defaults;
mod external;
mod length;
mod marshalling;
mod single_mode;
