use alloy_sol_types::SolError as _;
use headsmith_block_header::RemoteBlockHeader;
use headsmith_primitives::{Address, B256, Bytes, U256, hex};
use headsmith_rpc_eth::{
    BlockSpec, CallRequest, TransactionRequest,
    client::{EthRpcClient, RpcClientError, jsonrpc},
};

use crate::{
    chain::{
        BoxedError, CallOutcome, ChainReader, ChainWriter, ContractCall, RawRequestError,
        TransactionReceipt,
    },
    config::PollPolicy,
    interfaces::Error as RevertError,
};

/// Error returned when a transaction is not included in time.
#[derive(Debug, thiserror::Error)]
#[error("Transaction {transaction_hash} was not included after {polls} polls")]
pub struct ReceiptTimeoutError {
    /// The transaction hash
    pub transaction_hash: B256,
    /// The number of polls
    pub polls: u64,
}

/// [`ChainReader`] and [`ChainWriter`] over an Ethereum JSON-RPC node.
///
/// Transactions are signed by the node, so `account` must be unlocked on it.
/// Pre-signed transactions can be submitted with
/// [`ChainWriter::send_raw_transaction`].
#[derive(Debug)]
pub struct EthRpcChain {
    client: EthRpcClient,
    account: Address,
    receipt_polling: PollPolicy,
}

impl EthRpcChain {
    /// Constructs a chain that sends transactions from `account`.
    pub fn new(client: EthRpcClient, account: Address) -> Self {
        Self {
            client,
            account,
            receipt_polling: PollPolicy::receipts(),
        }
    }

    /// Replaces the receipt polling policy.
    pub fn with_receipt_polling(mut self, policy: PollPolicy) -> Self {
        self.receipt_polling = policy;
        self
    }

    /// The underlying client.
    pub fn client(&self) -> &EthRpcClient {
        &self.client
    }

    async fn send(&self, to: Option<Address>, data: Bytes) -> Result<B256, BoxedError> {
        let transaction = TransactionRequest {
            from: self.account,
            to,
            data: Some(data),
            ..TransactionRequest::default()
        };

        Ok(self.client.send_transaction(transaction).await?)
    }
}

/// Decodes the revert reason from a JSON-RPC error of `eth_call`, falling back
/// to the error message.
fn revert_reason(error: &jsonrpc::Error) -> String {
    error
        .data
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|data| hex::decode(data).ok())
        .and_then(|data| RevertError::abi_decode(&data).ok())
        .map_or_else(|| error.message.clone(), |revert| revert.message)
}

impl ChainReader for EthRpcChain {
    async fn chain_id(&self) -> Result<u64, BoxedError> {
        Ok(self.client.chain_id().await?)
    }

    async fn block_number(&self) -> Result<u64, BoxedError> {
        Ok(self.client.block_number().await?)
    }

    async fn block_by_number(&self, number: u64) -> Result<Option<RemoteBlockHeader>, BoxedError> {
        let block = self
            .client
            .get_block_by_number(BlockSpec::Number(number))
            .await?;

        Ok(block.map(RemoteBlockHeader::from))
    }

    async fn storage_at(&self, address: Address, slot: U256) -> Result<B256, BoxedError> {
        Ok(self
            .client
            .get_storage_at(address, slot, BlockSpec::latest())
            .await?)
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, BoxedError> {
        Ok(self.client.get_code(address, BlockSpec::latest()).await?)
    }

    async fn simulate_call(
        &self,
        call: &ContractCall,
        block_number: Option<u64>,
    ) -> Result<CallOutcome, BoxedError> {
        let request = CallRequest {
            from: Some(call.from),
            to: Some(call.to),
            data: Some(call.data.clone()),
            ..CallRequest::default()
        };
        let block = block_number.map_or_else(BlockSpec::latest, BlockSpec::Number);

        match self.client.call(request, block).await {
            Ok(output) => Ok(CallOutcome::Success(output)),
            Err(error) => match error.as_json_rpc_error() {
                Some(error) => Ok(CallOutcome::Reverted(revert_reason(error))),
                None => Err(error.into()),
            },
        }
    }

    async fn raw_request(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RawRequestError> {
        self.client
            .raw_request(method, params)
            .await
            .map_err(|error| match error {
                RpcClientError::JsonRpcError { error, .. } => RawRequestError::Rejected {
                    method: method.to_owned(),
                    code: error.code,
                    message: error.message,
                },
                error => RawRequestError::Transport(error.into()),
            })
    }
}

impl ChainWriter for EthRpcChain {
    fn account(&self) -> Address {
        self.account
    }

    async fn send_raw_transaction(&self, transaction: Bytes) -> Result<B256, BoxedError> {
        Ok(self.client.send_raw_transaction(transaction).await?)
    }

    async fn deploy_contract(&self, creation_code: Bytes) -> Result<B256, BoxedError> {
        self.send(None, creation_code).await
    }

    async fn invoke(&self, to: Address, data: Bytes) -> Result<B256, BoxedError> {
        self.send(Some(to), data).await
    }

    async fn wait_for_receipt(
        &self,
        transaction_hash: B256,
    ) -> Result<TransactionReceipt, BoxedError> {
        for poll in 0..self.receipt_polling.max_polls {
            if poll > 0 {
                tokio::time::sleep(self.receipt_polling.interval()).await;
            }

            let receipt = self.client.get_transaction_receipt(transaction_hash).await?;
            if let Some(receipt) = receipt
                && let Some(block_number) = receipt.block_number
            {
                return Ok(TransactionReceipt {
                    transaction_hash: receipt.transaction_hash,
                    block_number,
                    contract_address: receipt.contract_address,
                    success: receipt.is_success(),
                });
            }
        }

        Err(ReceiptTimeoutError {
            transaction_hash,
            polls: self.receipt_polling.max_polls,
        }
        .into())
    }
}
