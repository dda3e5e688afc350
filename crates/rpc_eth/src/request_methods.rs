use headsmith_primitives::{Address, B256, Bytes, U256};
use headsmith_rpc_client::RpcMethod;
use serde::{Deserialize, Serialize};

use crate::{CallRequest, TransactionRequest};

/// A block tag, as accepted by block-scoped methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    /// The earliest block
    Earliest,
    /// The most recent block
    Latest,
    /// The pending block
    Pending,
}

/// Identifies a block by number or tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BlockSpec {
    /// Block number, serialized as a quantity
    Number(#[serde(with = "alloy_serde::quantity")] u64),
    /// Block tag
    Tag(BlockTag),
}

impl BlockSpec {
    /// Constructs a [`BlockSpec`] for the latest block.
    pub const fn latest() -> Self {
        Self::Tag(BlockTag::Latest)
    }
}

impl From<u64> for BlockSpec {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

/// Methods for requests to a remote Ethereum node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum RequestMethod {
    /// `eth_blockNumber`
    #[serde(rename = "eth_blockNumber", serialize_with = "crate::serde::no_params")]
    BlockNumber(()),
    /// `eth_call`
    #[serde(rename = "eth_call")]
    Call(CallRequest, BlockSpec),
    /// `eth_chainId`
    #[serde(rename = "eth_chainId", serialize_with = "crate::serde::no_params")]
    ChainId(()),
    /// `eth_getBlockByNumber`
    #[serde(rename = "eth_getBlockByNumber")]
    GetBlockByNumber(
        BlockSpec,
        /// include transaction data
        bool,
    ),
    /// `eth_getCode`
    #[serde(rename = "eth_getCode")]
    GetCode(Address, BlockSpec),
    /// `eth_getStorageAt`
    #[serde(rename = "eth_getStorageAt")]
    GetStorageAt(Address, U256, BlockSpec),
    /// `eth_getTransactionReceipt`
    #[serde(rename = "eth_getTransactionReceipt", serialize_with = "crate::serde::single_param")]
    GetTransactionReceipt(B256),
    /// `eth_sendRawTransaction`
    #[serde(rename = "eth_sendRawTransaction", serialize_with = "crate::serde::single_param")]
    SendRawTransaction(Bytes),
    /// `eth_sendTransaction`
    #[serde(rename = "eth_sendTransaction", serialize_with = "crate::serde::single_param")]
    SendTransaction(TransactionRequest),
}

impl RpcMethod for RequestMethod {
    fn block_number_request() -> Self {
        Self::BlockNumber(())
    }

    fn chain_id_request() -> Self {
        Self::ChainId(())
    }
}
