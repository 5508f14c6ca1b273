//! # Commands
//!
//! Implementations behind the `srch` binary: the default search command and
//! the `generate` subcommand.
pub mod generate;
pub mod search;
