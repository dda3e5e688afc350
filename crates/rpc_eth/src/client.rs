use headsmith_primitives::{Address, B256, Bytes, U256};
use headsmith_rpc_client::RpcClient;
pub use headsmith_rpc_client::{HeaderMap, RpcClientError, header, jsonrpc};

use crate::{
    BlockSpec, CallRequest, RequestMethod, TransactionReceipt, TransactionRequest, block::Block,
};

/// A client for the subset of the Ethereum JSON-RPC API that is needed to
/// reconstruct block headers and drive contract interactions.
#[derive(Debug)]
pub struct EthRpcClient {
    inner: RpcClient<RequestMethod>,
}

impl EthRpcClient {
    /// Creates a new instance, given a remote node URL.
    pub fn new(url: &str, extra_headers: Option<HeaderMap>) -> Result<Self, RpcClientError> {
        let inner = RpcClient::new(url, extra_headers)?;
        Ok(Self { inner })
    }

    /// The URL of the remote node.
    pub fn url(&self) -> &str {
        self.inner.url().as_str()
    }

    /// Calls `eth_blockNumber` and returns the block number.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn block_number(&self) -> Result<u64, RpcClientError> {
        self.inner.block_number().await
    }

    /// Calls `eth_chainId` and returns the chain ID.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn chain_id(&self) -> Result<u64, RpcClientError> {
        self.inner.chain_id().await
    }

    /// Calls `eth_call` and returns the return data.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn call(
        &self,
        request: CallRequest,
        block: BlockSpec,
    ) -> Result<Bytes, RpcClientError> {
        self.inner.call(RequestMethod::Call(request, block)).await
    }

    /// Calls `eth_getBlockByNumber` without transaction data.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn get_block_by_number(
        &self,
        block: BlockSpec,
    ) -> Result<Option<Block>, RpcClientError> {
        self.inner
            .call(RequestMethod::GetBlockByNumber(block, false))
            .await
    }

    /// Calls `eth_getCode`.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn get_code(
        &self,
        address: Address,
        block: BlockSpec,
    ) -> Result<Bytes, RpcClientError> {
        self.inner.call(RequestMethod::GetCode(address, block)).await
    }

    /// Calls `eth_getStorageAt`.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn get_storage_at(
        &self,
        address: Address,
        index: U256,
        block: BlockSpec,
    ) -> Result<B256, RpcClientError> {
        self.inner
            .call(RequestMethod::GetStorageAt(address, index, block))
            .await
    }

    /// Calls `eth_getTransactionReceipt`. Returns `None` while the
    /// transaction is pending.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn get_transaction_receipt(
        &self,
        transaction_hash: B256,
    ) -> Result<Option<TransactionReceipt>, RpcClientError> {
        self.inner
            .call(RequestMethod::GetTransactionReceipt(transaction_hash))
            .await
    }

    /// Calls `eth_sendRawTransaction` and returns the transaction hash.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn send_raw_transaction(&self, transaction: Bytes) -> Result<B256, RpcClientError> {
        self.inner
            .call(RequestMethod::SendRawTransaction(transaction))
            .await
    }

    /// Calls `eth_sendTransaction` and returns the transaction hash.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn send_transaction(
        &self,
        transaction: TransactionRequest,
    ) -> Result<B256, RpcClientError> {
        self.inner
            .call(RequestMethod::SendTransaction(transaction))
            .await
    }

    /// Calls a method outside of the standard API, such as `debug_*`
    /// methods, and returns the raw result.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn raw_request(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcClientError> {
        self.inner.call_raw(method, params).await
    }
}
