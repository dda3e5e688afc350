use alloy_rlp::{Encodable, Header};
use headsmith_primitives::{FixedBytes, U256, UintTryFrom};

/// Encodes a byte string.
///
/// A single byte below `0x80` encodes as itself, strings of up to 55 bytes
/// get a one byte prefix and longer strings a length-of-length prefix.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.length());
    bytes.encode(&mut out);
    out
}

/// Encodes a non-negative integer as its minimal big-endian byte string.
/// Zero encodes as the empty string.
pub fn encode_int<IntT>(value: IntT) -> Vec<u8>
where
    U256: UintTryFrom<IntT>,
{
    let value = U256::from(value);

    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out
}

/// Wraps already encoded items into a list.
pub fn encode_list<ItemT: AsRef<[u8]>>(items: &[ItemT]) -> Vec<u8> {
    let mut builder = RlpListBuilder::default();
    for item in items {
        builder.push_encoded(item.as_ref());
    }
    builder.finish()
}

/// Converts a possibly malformed fixed-width value to exactly `N` bytes.
///
/// Short inputs are left-padded with zeros, long inputs keep their right-most
/// `N` bytes.
pub fn to_fixed<const N: usize>(bytes: &[u8]) -> FixedBytes<N> {
    let start = bytes.len().saturating_sub(N);
    let tail = bytes.get(start..).unwrap_or_default();
    FixedBytes::left_padding_from(tail)
}

/// Incrementally builds an RLP list.
#[derive(Clone, Debug, Default)]
pub struct RlpListBuilder {
    payload: Vec<u8>,
    item_count: usize,
}

impl RlpListBuilder {
    /// Appends an item that is already RLP encoded.
    pub fn push_encoded(&mut self, encoded: &[u8]) -> &mut Self {
        self.payload.extend_from_slice(encoded);
        self.item_count += 1;
        self
    }

    /// Appends a byte string.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        bytes.encode(&mut self.payload);
        self.item_count += 1;
        self
    }

    /// Appends an integer.
    pub fn push_int<IntT>(&mut self, value: IntT) -> &mut Self
    where
        U256: UintTryFrom<IntT>,
    {
        let value = U256::from(value);
        value.encode(&mut self.payload);
        self.item_count += 1;
        self
    }

    /// Number of items pushed so far.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Consumes the builder, returning the encoded list.
    pub fn finish(self) -> Vec<u8> {
        let header = Header {
            list: true,
            payload_length: self.payload.len(),
        };

        let mut out = Vec::with_capacity(header.length() + self.payload.len());
        header.encode(&mut out);
        out.extend_from_slice(&self.payload);
        out
    }
}
