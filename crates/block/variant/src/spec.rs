use headsmith_block_header::BlockHeaderFields;

/// Number of distinct toggle combinations.
pub const VARIANT_COUNT: usize = 1 << 8;

/// Toggles controlling how a header variant is encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderVariantSpec {
    /// Append the base fee, if the block has one.
    pub include_base_fee: bool,
    /// Append the withdrawals root, if the block has one.
    pub include_withdrawals: bool,
    /// Append the blob gas fields the block has.
    pub include_blob: bool,
    /// Append the parent beacon block root and the requests hash, if the block
    /// has them.
    pub include_parent_beacon_block_root: bool,
    /// Encode the difficulty as zero.
    pub force_difficulty_zero: bool,
    /// Encode the nonce as an empty string instead of 8 bytes.
    pub nonce_empty: bool,
    /// Use the randomness beacon instead of the mix hash when both are
    /// reported.
    pub prefer_prev_randao: bool,
    /// Place the parent beacon block root before the blob gas fields.
    pub parent_beacon_block_root_before_blob: bool,
}

impl HeaderVariantSpec {
    /// Constructs the toggles from their position in the enumeration order.
    ///
    /// The most significant bit controls the base fee and the least
    /// significant bit the beacon root placement.
    pub fn from_index(index: u8) -> Self {
        let bit = |position: u8| index & (1 << position) != 0;

        Self {
            include_base_fee: bit(7),
            include_withdrawals: bit(6),
            include_blob: bit(5),
            include_parent_beacon_block_root: bit(4),
            force_difficulty_zero: bit(3),
            nonce_empty: bit(2),
            prefer_prev_randao: bit(1),
            parent_beacon_block_root_before_blob: bit(0),
        }
    }

    /// The position of the toggles in the enumeration order.
    pub fn index(&self) -> u8 {
        [
            self.include_base_fee,
            self.include_withdrawals,
            self.include_blob,
            self.include_parent_beacon_block_root,
            self.force_difficulty_zero,
            self.nonce_empty,
            self.prefer_prev_randao,
            self.parent_beacon_block_root_before_blob,
        ]
        .into_iter()
        .fold(0u8, |index, toggle| (index << 1) | u8::from(toggle))
    }

    /// All toggle combinations, in enumeration order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=u8::MAX).map(Self::from_index)
    }

    /// Likelihood score; higher scores are tried first.
    pub fn score(&self) -> i32 {
        let weight = |toggle: bool, weight: i32| if toggle { weight } else { 0 };

        weight(self.include_base_fee, 12)
            + weight(self.include_withdrawals, 4)
            + weight(self.include_parent_beacon_block_root, 3)
            + weight(self.parent_beacon_block_root_before_blob, 1)
            + weight(self.prefer_prev_randao, 2)
            - weight(self.include_blob, 3)
            - weight(self.force_difficulty_zero, 2)
            - weight(self.nonce_empty, 1)
    }

    /// The toggles that include every optional field the block reports.
    ///
    /// Used to produce diagnostics when no variant is accepted.
    pub fn including_present_fields(fields: &BlockHeaderFields) -> Self {
        Self {
            include_base_fee: fields.base_fee_per_gas.is_some(),
            include_withdrawals: fields.withdrawals_root.is_some(),
            include_blob: fields.has_blob_gas(),
            include_parent_beacon_block_root: fields.parent_beacon_block_root.is_some(),
            force_difficulty_zero: false,
            nonce_empty: false,
            prefer_prev_randao: true,
            parent_beacon_block_root_before_blob: true,
        }
    }
}
