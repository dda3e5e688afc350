//! Header era tables of known Ethereum L1 and OP Stack chains.

/// Chain IDs and their era activations.
pub mod chains;

pub use headsmith_block_header::Era;
