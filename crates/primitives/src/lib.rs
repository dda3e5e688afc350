//! Primitive types shared by all headsmith crates.

pub use alloy_primitives::{
    Address, B64, B256, Bloom, Bytes, FixedBytes, U64, U256, address, b256, bytes, hex,
    keccak256, ruint::UintTryFrom,
};

/// Root hash of an empty trie.
pub const KECCAK_NULL_RLP: B256 =
    b256!("0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

/// Hash of an empty RLP list, i.e. the ommers hash of a block without uncles.
pub const KECCAK_RLP_EMPTY_ARRAY: B256 =
    b256!("0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347");

/// Requests hash of a block without EIP-7685 requests.
pub const EMPTY_REQUESTS_HASH: B256 =
    b256!("0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
