//! Test helpers shared by headsmith crates.

pub mod env;
/// Block fixtures in JSON-RPC format, with their known hashes and encodings.
pub mod fixtures;
