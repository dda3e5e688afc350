//! Retrieval of chain-provided header encodings through non-standard debug
//! methods.

use std::collections::BTreeSet;

use headsmith_primitives::{B256, Bytes, hex};
use serde_json::Value;

use crate::chain::{ChainReader, RawRequestError};

/// A debug method that returns an RLP-encoded header or block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RawHeaderMethod {
    /// `debug_getRawHeader(hash)`
    GetRawHeader,
    /// `debug_getRawBlock(hash)`
    GetRawBlock,
    /// `debug_getBlockRlp(number)`
    GetBlockRlp,
}

impl RawHeaderMethod {
    /// All methods, in the order in which they are tried.
    pub const ALL: [Self; 3] = [Self::GetRawHeader, Self::GetRawBlock, Self::GetBlockRlp];

    /// The JSON-RPC method name.
    pub const fn name(self) -> &'static str {
        match self {
            RawHeaderMethod::GetRawHeader => "debug_getRawHeader",
            RawHeaderMethod::GetRawBlock => "debug_getRawBlock",
            RawHeaderMethod::GetBlockRlp => "debug_getBlockRlp",
        }
    }

    fn params(self, hash: Option<B256>, number: u64) -> Option<Vec<Value>> {
        match self {
            RawHeaderMethod::GetRawHeader | RawHeaderMethod::GetRawBlock => {
                hash.map(|hash| vec![Value::String(hash.to_string())])
            }
            RawHeaderMethod::GetBlockRlp => Some(vec![Value::String(format!("{number:#x}"))]),
        }
    }
}

/// A header encoding returned by the node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawHeader {
    /// The method that returned the encoding
    pub method: RawHeaderMethod,
    /// The RLP-encoded header
    pub rlp: Bytes,
}

/// Extracts the RLP-encoded header from a debug method's response.
///
/// The response must be a hex string holding an RLP list. If its first item is
/// itself a list, the response is a block and that item is its header.
/// Otherwise the response is the header itself. Only length prefixes are
/// interpreted; the header bytes are returned unchanged.
pub fn extract_header(response: &Value) -> Option<Bytes> {
    let encoded = hex::decode(response.as_str()?).ok()?;
    let first_item = headsmith_rlp::first_list_item(&encoded)?;

    let is_block = first_item.first().is_some_and(|prefix| *prefix >= 0xc0);
    let header = if is_block { first_item } else { &encoded };
    Some(Bytes::copy_from_slice(header))
}

/// Probes debug methods for a header encoding.
///
/// Methods that the node rejects are remembered and not requested again by
/// the same adapter.
#[derive(Clone, Debug, Default)]
pub struct RawHeaderAdapter {
    unsupported: BTreeSet<RawHeaderMethod>,
}

impl RawHeaderAdapter {
    /// Constructs an adapter that assumes every method is supported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the method has not been rejected by the node yet.
    pub fn is_supported(&self, method: RawHeaderMethod) -> bool {
        !self.unsupported.contains(&method)
    }

    /// Tries each supported method in order and returns the first header
    /// encoding. Returns `None` if no method produced one; failures are not
    /// errors.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self, reader)))]
    pub async fn fetch<ReaderT: ChainReader>(
        &mut self,
        reader: &ReaderT,
        hash: Option<B256>,
        number: u64,
    ) -> Option<RawHeader> {
        for method in RawHeaderMethod::ALL {
            if !self.is_supported(method) {
                continue;
            }

            let Some(params) = method.params(hash, number) else {
                continue;
            };

            match reader.raw_request(method.name(), params).await {
                Ok(response) => {
                    if let Some(rlp) = extract_header(&response) {
                        return Some(RawHeader { method, rlp });
                    }
                    log::debug!("{} returned no header encoding", method.name());
                }
                Err(RawRequestError::Rejected { message, .. }) => {
                    log::debug!("{} is unsupported: {message}", method.name());
                    self.unsupported.insert(method);
                }
                Err(RawRequestError::Transport(error)) => {
                    log::debug!("{} failed: {error}", method.name());
                }
            }
        }

        None
    }
}
