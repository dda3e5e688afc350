use headsmith_create2::SaltSearchError;
use headsmith_primitives::{Address, B256};

use crate::{ResolveError, chain::BoxedError, registry::RegistryError};

/// Error of a challenge step.
#[derive(Debug, thiserror::Error)]
pub enum ChallengeError {
    /// A chain request failed.
    #[error("Chain request failed: {0}")]
    Chain(#[from] BoxedError),
    /// A registry or artifact could not be loaded.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A required contract is not registered for the chain.
    #[error("No {name} on chain {chain_id}")]
    MissingContract {
        /// The contract name
        name: String,
        /// The chain ID
        chain_id: u64,
    },
    /// A required input is not configured.
    #[error("{0}")]
    MissingPrerequisite(String),
    /// The node doesn't know the block.
    #[error("Block {0} is not available")]
    MissingBlock(u64),
    /// A transaction was included but reverted.
    #[error("Transaction {0} reverted")]
    TransactionFailed(B256),
    /// A contract creation did not report a contract address.
    #[error("Transaction {0} did not create a contract")]
    MissingContractAddress(B256),
    /// No code was deployed at the predicted address.
    #[error("No code at predicted address {0}")]
    MissingCode(Address),
    /// The chain did not reach the required height in time.
    #[error("Block {target} was not mined after {polls} polls")]
    MaturityTimeout {
        /// The block that needed to be mined
        target: u64,
        /// The number of polls
        polls: u64,
    },
    /// The target block left the `BLOCKHASH` window too many times.
    #[error(
        "Block {target} is no longer accessible by BLOCKHASH at height {now}, after {restarts} premint restart(s)"
    )]
    Stale {
        /// The target block
        target: u64,
        /// The chain height
        now: u64,
        /// The number of premint restarts
        restarts: u32,
    },
    /// No header encoding was accepted.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// No salt produced a suitable address.
    #[error(transparent)]
    SaltSearch(#[from] SaltSearchError),
}

impl ChallengeError {
    /// Whether the error signals a missing prerequisite rather than a
    /// failure, in which case the step is reported as skipped.
    pub fn is_missing_prerequisite(&self) -> bool {
        matches!(
            self,
            ChallengeError::MissingContract { .. } | ChallengeError::MissingPrerequisite(_)
        )
    }
}
