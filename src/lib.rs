//! Blockfall (workspace facade crate).
//!
//! Re-exports the game crates under `blockfall::{core,input,term,types}` and
//! adds the pieces the binary needs on top of them: loading and validating the
//! configuration file.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
