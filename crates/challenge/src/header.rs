//! The header challenge: premint, wait for the target block, and mint with
//! its RLP-encoded header.

use alloy_sol_types::SolCall as _;
use headsmith_block_header::Era;
use headsmith_chain_config::ChainConfig;
use headsmith_defaults::{BLOCKHASH_WINDOW, PREMINT_OFFSET};
use headsmith_primitives::{Address, B256};

use crate::{
    ChallengeError,
    chain::{ChainReader, ChainWriter, invoke_and_confirm},
    config::{PollPolicy, RunConfig},
    interfaces::IHeaderChallenge,
    resolver::{ContractVerifier, HeaderResolver, HeaderStrategy},
};

/// Accessibility of the target block's hash at a given chain height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetentionWindow {
    /// The target block is not older than the latest block yet.
    Pending,
    /// `BLOCKHASH` returns the target block's hash.
    Open,
    /// The target block is older than the `BLOCKHASH` window.
    Expired,
}

/// A premint, recorded by the contract for the block that included it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premint {
    /// The block that included the premint transaction
    pub block_number: u64,
}

impl Premint {
    /// The block whose header has to be supplied.
    pub fn target_block(&self) -> u64 {
        self.block_number + PREMINT_OFFSET
    }

    /// Accessibility of the target block's hash at height `now`.
    pub fn window(&self, now: u64) -> RetentionWindow {
        let target = self.target_block();
        if now <= target {
            RetentionWindow::Pending
        } else if now >= target + BLOCKHASH_WINDOW {
            RetentionWindow::Expired
        } else {
            RetentionWindow::Open
        }
    }
}

/// Sends `preMintFlag()` and waits for its inclusion.
pub async fn premint<WriterT: ChainWriter>(
    writer: &WriterT,
    contract: Address,
) -> Result<Premint, ChallengeError> {
    let receipt = invoke_and_confirm(
        writer,
        contract,
        IHeaderChallenge::preMintFlagCall {}.abi_encode(),
    )
    .await?;

    Ok(Premint {
        block_number: receipt.block_number,
    })
}

/// Polls the chain height until the target block is older than the latest
/// block. Returns the height.
pub async fn wait_for_maturity<ReaderT: ChainReader>(
    reader: &ReaderT,
    premint: &Premint,
    policy: &PollPolicy,
) -> Result<u64, ChallengeError> {
    for poll in 0..policy.max_polls {
        if poll > 0 {
            tokio::time::sleep(policy.interval()).await;
        }

        let now = reader.block_number().await?;
        if premint.window(now) != RetentionWindow::Pending {
            return Ok(now);
        }
    }

    Err(ChallengeError::MaturityTimeout {
        target: premint.target_block(),
        polls: policy.max_polls,
    })
}

/// A premint whose target block can be read with `BLOCKHASH` at height `now`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaturePremint {
    /// The premint
    pub premint: Premint,
    /// The chain height at which the target block was found mature
    pub now: u64,
    /// The number of premints that were repeated because their target block
    /// expired
    pub restarts: u32,
}

/// Premints and waits for the target block to mature. If the target block
/// has already left the `BLOCKHASH` window, the premint is repeated up to
/// `max_restarts` times.
pub async fn mature_premint<WriterT: ChainWriter>(
    writer: &WriterT,
    contract: Address,
    policy: &PollPolicy,
    max_restarts: u32,
) -> Result<MaturePremint, ChallengeError> {
    let mut restarts = 0;
    loop {
        let premint = premint(writer, contract).await?;
        let now = wait_for_maturity(writer, &premint, policy).await?;

        if premint.window(now) != RetentionWindow::Expired {
            return Ok(MaturePremint {
                premint,
                now,
                restarts,
            });
        }

        if restarts >= max_restarts {
            return Err(ChallengeError::Stale {
                target: premint.target_block(),
                now,
                restarts,
            });
        }

        restarts += 1;
        log::info!(
            "Window for block {} expired at height {now}; repeating the premint",
            premint.target_block()
        );
    }
}

/// Result of a solved header challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderChallengeReport {
    /// The premint block
    pub premint_block: u64,
    /// The block whose header was supplied
    pub target_block: u64,
    /// The strategy that produced the accepted header
    pub strategy: HeaderStrategy,
    /// The `mintFlag` transaction
    pub transaction_hash: B256,
}

/// Solves the header challenge deployed at `contract`.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip_all))]
pub async fn solve_header_challenge<WriterT: ChainWriter>(
    writer: &WriterT,
    contract: Address,
    chain_config: Option<&ChainConfig<Era>>,
    config: &RunConfig,
) -> Result<HeaderChallengeReport, ChallengeError> {
    let MaturePremint { premint, now, .. } = mature_premint(
        writer,
        contract,
        &config.block_polling,
        config.max_premint_restarts,
    )
    .await?;

    let target_block = premint.target_block();
    log::info!(
        "Premint in block {}, target block {target_block}, height {now}",
        premint.block_number
    );

    let header = writer
        .block_by_number(target_block)
        .await?
        .ok_or(ChallengeError::MissingBlock(target_block))?;

    let verifier = ContractVerifier::new(writer, writer.account(), contract, now);
    let resolved = HeaderResolver::new(chain_config)
        .resolve(writer, &header, &verifier)
        .await?;
    log::info!("Using {} with hash {}", resolved.strategy, resolved.hash());

    let receipt = invoke_and_confirm(
        writer,
        contract,
        IHeaderChallenge::mintFlagCall {
            header: resolved.rlp,
        }
        .abi_encode(),
    )
    .await?;

    Ok(HeaderChallengeReport {
        premint_block: premint.block_number,
        target_block,
        strategy: resolved.strategy,
        transaction_hash: receipt.transaction_hash,
    })
}
