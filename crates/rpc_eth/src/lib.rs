//! Ethereum JSON-RPC types and client

/// Types for Ethereum JSON-RPC blocks
pub mod block;
/// Input type for `eth_call`
mod call_request;
/// Types related to the Ethereum JSON-RPC API
pub mod client;
mod receipt;
mod request_methods;
/// Helper utilities for serde
pub mod serde;
mod transaction_request;

pub use self::{
    call_request::CallRequest,
    receipt::TransactionReceipt,
    request_methods::{BlockSpec, BlockTag, RequestMethod},
    transaction_request::TransactionRequest,
};
