use headsmith_primitives::{Address, B256};

/// Receipt object returned by `eth_getTransactionReceipt`, restricted to the
/// fields needed to follow a transaction to inclusion.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the transaction
    pub transaction_hash: B256,
    /// Number of the block that includes the transaction
    #[serde(default, with = "alloy_serde::quantity::opt")]
    pub block_number: Option<u64>,
    /// Address of the created contract, if any
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// `1` for success, `0` for failure. Absent for pre-Byzantium receipts.
    #[serde(default, with = "alloy_serde::quantity::opt")]
    pub status: Option<u64>,
}

impl TransactionReceipt {
    /// Whether the transaction succeeded. Receipts without a status are
    /// considered successful.
    pub fn is_success(&self) -> bool {
        self.status != Some(0)
    }
}
