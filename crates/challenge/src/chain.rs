//! Narrow interfaces to the blockchain client.

use headsmith_block_header::RemoteBlockHeader;
use headsmith_primitives::{Address, B256, Bytes, U256};

use crate::ChallengeError;

/// Error reported by a chain client implementation.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// A non-mutating contract invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCall {
    /// The caller
    pub from: Address,
    /// The called contract
    pub to: Address,
    /// ABI-encoded call data
    pub data: Bytes,
}

/// Result of a simulated contract call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallOutcome {
    /// The call succeeded with the provided return data.
    Success(Bytes),
    /// The call reverted with the provided reason.
    Reverted(String),
}

impl CallOutcome {
    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success(_))
    }
}

/// Error of a passthrough JSON-RPC request.
#[derive(Debug, thiserror::Error)]
pub enum RawRequestError {
    /// The node answered with a JSON-RPC error, e.g. because it does not
    /// support the method.
    #[error("{method} was rejected with code {code}: {message}")]
    Rejected {
        /// The requested method
        method: String,
        /// The JSON-RPC error code
        code: i64,
        /// The JSON-RPC error message
        message: String,
    },
    /// The request did not reach the node, or its response was malformed.
    #[error(transparent)]
    Transport(BoxedError),
}

/// Inclusion receipt of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// The transaction hash
    pub transaction_hash: B256,
    /// The number of the including block
    pub block_number: u64,
    /// The address of the created contract, if any
    pub contract_address: Option<Address>,
    /// Whether execution succeeded
    pub success: bool,
}

/// Read access to a blockchain.
#[allow(async_fn_in_trait)]
pub trait ChainReader {
    /// The chain ID.
    async fn chain_id(&self) -> Result<u64, BoxedError>;

    /// The number of the latest block.
    async fn block_number(&self) -> Result<u64, BoxedError>;

    /// The header of the block with the provided number, or `None` if it
    /// doesn't exist yet.
    async fn block_by_number(&self, number: u64) -> Result<Option<RemoteBlockHeader>, BoxedError>;

    /// The value of a storage slot in the latest block.
    async fn storage_at(&self, address: Address, slot: U256) -> Result<B256, BoxedError>;

    /// The code of an account in the latest block.
    async fn code_at(&self, address: Address) -> Result<Bytes, BoxedError>;

    /// Simulates a call on top of the provided block, or the latest block if
    /// `None`. A revert is reported as [`CallOutcome::Reverted`], not as an
    /// error.
    async fn simulate_call(
        &self,
        call: &ContractCall,
        block_number: Option<u64>,
    ) -> Result<CallOutcome, BoxedError>;

    /// Sends a JSON-RPC request for a method outside of the standard API.
    async fn raw_request(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RawRequestError>;
}

/// Write access to a blockchain, on behalf of a single account.
#[allow(async_fn_in_trait)]
pub trait ChainWriter: ChainReader {
    /// The account that sends transactions.
    fn account(&self) -> Address;

    /// Submits a signed transaction and returns its hash.
    async fn send_raw_transaction(&self, transaction: Bytes) -> Result<B256, BoxedError>;

    /// Submits a contract creation and returns the transaction hash.
    async fn deploy_contract(&self, creation_code: Bytes) -> Result<B256, BoxedError>;

    /// Submits a contract invocation and returns the transaction hash.
    async fn invoke(&self, to: Address, data: Bytes) -> Result<B256, BoxedError>;

    /// Waits until the transaction is included and returns its receipt.
    async fn wait_for_receipt(&self, transaction_hash: B256)
    -> Result<TransactionReceipt, BoxedError>;
}

/// Invokes a contract and waits for the transaction to succeed.
pub async fn invoke_and_confirm<WriterT: ChainWriter>(
    writer: &WriterT,
    to: Address,
    data: Vec<u8>,
) -> Result<TransactionReceipt, ChallengeError> {
    let transaction_hash = writer.invoke(to, data.into()).await?;
    confirm(writer, transaction_hash).await
}

/// Deploys a contract and waits for the transaction to succeed. Returns the
/// address of the created contract.
pub async fn deploy_and_confirm<WriterT: ChainWriter>(
    writer: &WriterT,
    creation_code: Bytes,
) -> Result<Address, ChallengeError> {
    let transaction_hash = writer.deploy_contract(creation_code).await?;
    let receipt = confirm(writer, transaction_hash).await?;

    receipt
        .contract_address
        .ok_or(ChallengeError::MissingContractAddress(transaction_hash))
}

async fn confirm<WriterT: ChainWriter>(
    writer: &WriterT,
    transaction_hash: B256,
) -> Result<TransactionReceipt, ChallengeError> {
    let receipt = writer.wait_for_receipt(transaction_hash).await?;
    if receipt.success {
        log::debug!(
            "Transaction {transaction_hash} included in block {}",
            receipt.block_number
        );
        Ok(receipt)
    } else {
        Err(ChallengeError::TransactionFailed(transaction_hash))
    }
}
