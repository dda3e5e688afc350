use headsmith_block_header::{BlockHeaderFields, RemoteBlockHeader};
use headsmith_primitives::{
    Address, B256, Bloom, Bytes, FixedBytes, KECCAK_NULL_RLP, KECCAK_RLP_EMPTY_ARRAY, U256,
};
use serde::{Deserialize, Serialize};

/// Block object returned by `eth_getBlockBy*`, without transaction data.
///
/// Nodes of different clients and chains disagree on which header fields
/// they report and how they name them, so every field that is not universally
/// present is optional. Fixed-width fields are kept as reported, since some
/// nodes trim leading zeros or return odd-length hex strings, and are only
/// normalized when converted to [`BlockHeaderFields`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Hash of the block
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub hash: Option<Bytes>,
    /// hash of the parent block.
    #[serde(default, deserialize_with = "crate::serde::lenient_hex")]
    pub parent_hash: Bytes,
    /// SHA3 of the uncles data in the block
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub sha3_uncles: Option<Bytes>,
    /// the address of the beneficiary, as reported by most clients
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub miner: Option<Bytes>,
    /// the address of the beneficiary, as reported by some clients
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub beneficiary: Option<Bytes>,
    /// the address of the beneficiary, as reported by some L2 clients
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub coinbase: Option<Bytes>,
    /// the address of the beneficiary, in beacon chain terminology
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub fee_recipient: Option<Bytes>,
    /// the root of the final state trie of the block
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub state_root: Option<Bytes>,
    /// the root of the transaction trie of the block
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub transactions_root: Option<Bytes>,
    /// the root of the receipts trie of the block
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub receipts_root: Option<Bytes>,
    /// the bloom filter for the logs of the block
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub logs_bloom: Option<Bytes>,
    /// integer of the difficulty for this block
    pub difficulty: Option<U256>,
    /// the block number. None when its pending block.
    #[serde(default, with = "alloy_serde::quantity::opt")]
    pub number: Option<u64>,
    /// the maximum gas allowed in this block
    #[serde(default, with = "alloy_serde::quantity")]
    pub gas_limit: u64,
    /// the total used gas by all transactions in this block
    #[serde(default, with = "alloy_serde::quantity")]
    pub gas_used: u64,
    /// the unix timestamp for when the block was collated
    #[serde(default, with = "alloy_serde::quantity")]
    pub timestamp: u64,
    /// the "extra data" field of this block
    #[serde(default, deserialize_with = "crate::serde::lenient_hex")]
    pub extra_data: Bytes,
    /// Mix hash. None when it's a pending block.
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub mix_hash: Option<Bytes>,
    /// The randomness beacon, reported separately by some clients
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub prev_randao: Option<Bytes>,
    /// hash of the generated proof-of-work. null when its pending block.
    #[serde(default, deserialize_with = "crate::serde::optional_lenient_hex")]
    pub nonce: Option<Bytes>,
    /// base fee per gas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<U256>,
    /// withdrawals root
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde::optional_lenient_hex"
    )]
    pub withdrawals_root: Option<Bytes>,
    /// The total amount of gas used by the transactions.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "alloy_serde::quantity::opt"
    )]
    pub blob_gas_used: Option<u64>,
    /// A running total of blob gas consumed in excess of the target, prior to
    /// the block.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "alloy_serde::quantity::opt"
    )]
    pub excess_blob_gas: Option<u64>,
    /// Root of the parent beacon block
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde::optional_lenient_hex"
    )]
    pub parent_beacon_block_root: Option<Bytes>,
    /// The commitment hash of the block's execution layer requests
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde::optional_lenient_hex"
    )]
    pub requests_hash: Option<Bytes>,
}

fn fixed<const N: usize>(bytes: Option<&Bytes>) -> Option<FixedBytes<N>> {
    bytes.map(|bytes| headsmith_rlp::to_fixed::<N>(bytes))
}

impl Block {
    /// The beneficiary under whichever name the node reported it, or the zero
    /// address.
    pub fn beneficiary(&self) -> Address {
        let reported = self
            .beneficiary
            .as_ref()
            .or(self.miner.as_ref())
            .or(self.coinbase.as_ref())
            .or(self.fee_recipient.as_ref());

        fixed::<20>(reported).map(Address::from).unwrap_or_default()
    }

    /// The reported block hash, normalized to 32 bytes.
    pub fn hash(&self) -> Option<B256> {
        fixed(self.hash.as_ref())
    }
}

impl From<Block> for BlockHeaderFields {
    fn from(value: Block) -> Self {
        let beneficiary = value.beneficiary();
        let logs_bloom = fixed::<256>(value.logs_bloom.as_ref())
            .map(Bloom::from)
            .unwrap_or_default();

        Self {
            parent_hash: headsmith_rlp::to_fixed(&value.parent_hash),
            ommers_hash: fixed(value.sha3_uncles.as_ref()).unwrap_or(KECCAK_RLP_EMPTY_ARRAY),
            beneficiary,
            state_root: fixed(value.state_root.as_ref()).unwrap_or_default(),
            transactions_root: fixed(value.transactions_root.as_ref()).unwrap_or(KECCAK_NULL_RLP),
            receipts_root: fixed(value.receipts_root.as_ref()).unwrap_or(KECCAK_NULL_RLP),
            logs_bloom,
            difficulty: value.difficulty.unwrap_or_default(),
            number: value.number.unwrap_or_default(),
            gas_limit: value.gas_limit,
            gas_used: value.gas_used,
            timestamp: value.timestamp,
            extra_data: value.extra_data,
            mix_hash: fixed(value.mix_hash.as_ref()),
            prev_randao: fixed(value.prev_randao.as_ref()),
            nonce: fixed(value.nonce.as_ref()),
            base_fee_per_gas: value.base_fee_per_gas,
            withdrawals_root: fixed(value.withdrawals_root.as_ref()),
            blob_gas_used: value.blob_gas_used,
            excess_blob_gas: value.excess_blob_gas,
            parent_beacon_block_root: fixed(value.parent_beacon_block_root.as_ref()),
            requests_hash: fixed(value.requests_hash.as_ref()),
        }
    }
}

impl From<Block> for RemoteBlockHeader {
    fn from(value: Block) -> Self {
        Self {
            hash: value.hash(),
            fields: value.into(),
        }
    }
}
