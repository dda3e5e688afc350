use core::fmt;
use std::str::FromStr;

use headsmith_chain_config::ChainConfig;

use crate::BlockHeaderFields;

/// The shape of a block header, as defined by the protocol upgrade that
/// introduced its last field.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Era {
    /// Genesis until London: 15 fields.
    PreLondon,
    /// London until the merge: base fee added, proof-of-work values kept.
    London,
    /// The merge until Shanghai: difficulty and nonce are zeroed.
    Paris,
    /// Shanghai until Cancun: withdrawals root added.
    Shanghai,
    /// Cancun until Prague: blob gas fields and parent beacon block root
    /// added.
    Cancun,
    /// Prague onwards: requests hash added.
    Prague,
}

impl Era {
    /// All eras, in activation order.
    pub const ALL: [Era; 6] = [
        Era::PreLondon,
        Era::London,
        Era::Paris,
        Era::Shanghai,
        Era::Cancun,
        Era::Prague,
    ];

    /// Determines the era from the optional fields that are present.
    ///
    /// Pre-merge London headers cannot be told apart from Paris headers by
    /// their fields alone, so a base fee without withdrawals root is always
    /// reported as [`Era::Paris`]. Returns `None` for combinations that do
    /// not correspond to a canonical header shape.
    pub fn from_fields(fields: &BlockHeaderFields) -> Option<Self> {
        let has_base_fee = fields.base_fee_per_gas.is_some();
        let has_withdrawals = fields.withdrawals_root.is_some();
        let has_blob_gas = fields.has_blob_gas();
        let has_beacon_root = fields.parent_beacon_block_root.is_some();
        let has_requests = fields.requests_hash.is_some();

        match (
            has_base_fee,
            has_withdrawals,
            has_blob_gas,
            has_beacon_root,
            has_requests,
        ) {
            (false, false, false, false, false) => Some(Era::PreLondon),
            (true, false, false, false, false) => Some(Era::Paris),
            // Some chains report a beacon root before enabling blobs; the
            // Shanghai shape ignores it.
            (true, true, false, _, false) => Some(Era::Shanghai),
            (true, true, true, true, false) => Some(Era::Cancun),
            (true, true, true, true, true) => Some(Era::Prague),
            _ => None,
        }
    }

    /// Looks up the era of a block in a chain's upgrade table.
    pub fn at(chain_config: &ChainConfig<Era>, block_number: u64, timestamp: u64) -> Option<Self> {
        chain_config
            .hardfork_activations
            .hardfork_at_block(block_number, timestamp)
    }

    /// Number of fields in a header of this era.
    pub const fn field_count(self) -> usize {
        match self {
            Era::PreLondon => 15,
            Era::London | Era::Paris => 16,
            Era::Shanghai => 17,
            Era::Cancun => 20,
            Era::Prague => 21,
        }
    }

    /// Whether headers of this era have zero difficulty and nonce.
    pub fn is_post_merge(self) -> bool {
        self >= Era::Paris
    }

    /// Whether headers of this era carry a base fee.
    pub fn has_base_fee(self) -> bool {
        self >= Era::London
    }

    /// Whether headers of this era carry a withdrawals root.
    pub fn has_withdrawals_root(self) -> bool {
        self >= Era::Shanghai
    }

    /// Whether headers of this era carry blob gas fields and the parent beacon
    /// block root.
    pub fn has_blob_gas(self) -> bool {
        self >= Era::Cancun
    }

    /// Whether headers of this era carry a requests hash.
    pub fn has_requests_hash(self) -> bool {
        self >= Era::Prague
    }

    /// The era's name.
    pub const fn name(self) -> &'static str {
        match self {
            Era::PreLondon => "pre-london",
            Era::London => "london",
            Era::Paris => "paris",
            Era::Shanghai => "shanghai",
            Era::Cancun => "cancun",
            Era::Prague => "prague",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown era name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown era: '{0}'")]
pub struct UnknownEraError(String);

impl FromStr for Era {
    type Err = UnknownEraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace(['_', ' '], "-");
        Era::ALL
            .into_iter()
            .find(|era| era.name() == normalized)
            .ok_or_else(|| UnknownEraError(s.to_owned()))
    }
}
