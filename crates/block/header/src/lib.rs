//! Block header fields as reported by a node, and their canonical RLP
//! encoding for each protocol era.

mod encode;
mod era;

use headsmith_primitives::{Address, B64, B256, Bloom, Bytes, U256, keccak256};

pub use self::{
    encode::{encode_header, push_base_fields},
    era::{Era, UnknownEraError},
};

/// Header fields of a block, as far as they are known.
///
/// Fields introduced by protocol upgrades are optional. The set of present
/// optional fields determines the header's [`Era`] when no chain-specific
/// upgrade table is available.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeaderFields {
    /// The parent block's hash
    pub parent_hash: B256,
    /// The ommers' root hash, called `sha3Uncles` by JSON-RPC
    #[serde(alias = "sha3Uncles")]
    pub ommers_hash: B256,
    /// The block's beneficiary address
    #[serde(alias = "miner")]
    pub beneficiary: Address,
    /// The state's root hash
    pub state_root: B256,
    /// The transactions' root hash
    pub transactions_root: B256,
    /// The receipts' root hash
    pub receipts_root: B256,
    /// The logs' bloom
    pub logs_bloom: Bloom,
    /// The block's difficulty
    pub difficulty: U256,
    /// The block's number
    #[serde(with = "alloy_serde::quantity")]
    pub number: u64,
    /// The block's gas limit
    #[serde(with = "alloy_serde::quantity")]
    pub gas_limit: u64,
    /// The amount of gas used by the block
    #[serde(with = "alloy_serde::quantity")]
    pub gas_used: u64,
    /// The block's timestamp
    #[serde(with = "alloy_serde::quantity")]
    pub timestamp: u64,
    /// The block's extra data
    pub extra_data: Bytes,
    /// The block's mix hash
    pub mix_hash: Option<B256>,
    /// The post-merge randomness beacon, occupying the mix hash slot
    pub prev_randao: Option<B256>,
    /// The block's nonce
    pub nonce: Option<B64>,
    /// `BaseFee` was added by EIP-1559 and is ignored in legacy headers.
    pub base_fee_per_gas: Option<U256>,
    /// `WithdrawalsHash` was added by EIP-4895 and is ignored in legacy
    /// headers.
    pub withdrawals_root: Option<B256>,
    /// The total amount of blob gas consumed by the transactions within the
    /// block (EIP-4844).
    #[serde(default, with = "alloy_serde::quantity::opt")]
    pub blob_gas_used: Option<u64>,
    /// The running total of blob gas consumed in excess of the target, prior
    /// to the block (EIP-4844).
    #[serde(default, with = "alloy_serde::quantity::opt")]
    pub excess_blob_gas: Option<u64>,
    /// The hash tree root of the parent beacon block for the given execution
    /// block (EIP-4788).
    pub parent_beacon_block_root: Option<B256>,
    /// The commitment hash calculated for a list of [EIP-7685] data requests.
    ///
    /// [EIP-7685]: https://eips.ethereum.org/EIPS/eip-7685
    pub requests_hash: Option<B256>,
}

impl BlockHeaderFields {
    /// Value of the 14th header field: the randomness beacon if known,
    /// otherwise the mix hash, otherwise zero.
    pub fn randao_or_mix_hash(&self) -> B256 {
        self.prev_randao.or(self.mix_hash).unwrap_or_default()
    }

    /// Whether at least one of the EIP-4844 blob gas fields is present.
    pub fn has_blob_gas(&self) -> bool {
        self.blob_gas_used.is_some() || self.excess_blob_gas.is_some()
    }

    /// Calculates the hash of the header encoded for the provided era.
    pub fn hash_for_era(&self, era: Era) -> B256 {
        keccak256(encode_header(self, era))
    }
}

/// A block header fetched from a remote node, together with the hash the node
/// reported for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteBlockHeader {
    /// The hash reported by the node, if any
    pub hash: Option<B256>,
    /// The header fields
    pub fields: BlockHeaderFields,
}

impl RemoteBlockHeader {
    /// Whether encoding the header for the provided era reproduces the hash
    /// reported by the node. Returns `false` if no hash was reported.
    pub fn matches_reported_hash(&self, era: Era) -> bool {
        self.hash
            .is_some_and(|hash| hash == self.fields.hash_for_era(era))
    }
}
