//! eGRN Types
//!
//! This crate defines the value type shared across the `egrn` workspace
//! (currently `egrn-conversion` and `egrn-cli`). Raw form submissions and
//! coerced conversion inputs are both expressed as [`FieldValue`]s, which keeps
//! the CLI and the engine free of a dependency on each other's internals.

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![deny(missing_docs)]

mod types;
pub use types::FieldValue;
