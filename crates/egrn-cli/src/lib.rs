//! Command-line front end for the eGRN conversion engine.
//!
//! The binary is a thin caller of `egrn-conversion`: it owns configuration,
//! logging and the mapping of conversion failures to exit codes, none of
//! which the engine itself concerns itself with.

pub mod cli;
pub mod config;
pub mod input;
pub mod logging;

pub use cli::{Cli, Command, Outcome};
pub use config::{ConfigSource, EgrnConfig};
