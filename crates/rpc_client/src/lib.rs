#![warn(missing_docs)]

//! JSON-RPC client for Ethereum nodes

mod client;
mod reqwest_error;

/// Types specific to JSON-RPC
pub mod jsonrpc;

pub use reqwest::header::{self, HeaderMap};

pub use self::{
    client::{RpcClient, RpcClientError, RpcMethod},
    reqwest_error::{MiddlewareError, ReqwestError},
};
