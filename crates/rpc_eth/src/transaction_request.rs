use headsmith_primitives::{Address, Bytes, U256};

/// Transaction submitted with `eth_sendTransaction`, signed by an account
/// managed by the node.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// the sender, which must be unlocked on the node
    pub from: Address,
    /// the recipient, or `None` for a contract creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// gas limit; estimated by the node when absent
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "alloy_serde::quantity::opt"
    )]
    pub gas: Option<u64>,
    /// transferred value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// call data or creation code
    #[serde(alias = "input", skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    /// sender nonce; assigned by the node when absent
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "alloy_serde::quantity::opt"
    )]
    pub nonce: Option<u64>,
}
