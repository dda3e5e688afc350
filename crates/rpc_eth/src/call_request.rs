use headsmith_primitives::{Address, Bytes, U256};

/// For specifying input to `eth_call`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// the address from which the transaction should be sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// the address to which the transaction should be sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// gas
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "alloy_serde::quantity::opt"
    )]
    pub gas: Option<u64>,
    /// transaction value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// transaction data
    #[serde(alias = "input", skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}
