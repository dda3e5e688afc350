//! The factory challenge: deploy a caller through a CREATE2 factory at an
//! address sharing masked trailing bits with the sender, then mint through it.

use alloy_sol_types::SolCall as _;
use headsmith_create2::{SaltSearch, SaltSearchError, SaltSearchResult, creation_code};
use headsmith_primitives::{Address, B256, Bytes};

use crate::{
    ChallengeError,
    chain::{ChainWriter, deploy_and_confirm, invoke_and_confirm},
    config::RunConfig,
    interfaces::{IFactory, IFactoryChild},
};

/// A planned factory deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryPlan {
    /// Creation code of the child contract
    pub creation_code: Bytes,
    /// The salt and the child's address
    pub salt_search: SaltSearchResult,
}

/// Builds the child's creation code for `challenge` and searches a salt that
/// gives it the same masked trailing bits as `account`.
pub fn plan_deployment(
    factory: Address,
    child_bytecode: &[u8],
    challenge: Address,
    account: Address,
    config: &RunConfig,
) -> Result<FactoryPlan, SaltSearchError> {
    let creation_code = creation_code(child_bytecode, challenge);
    let salt_search = SaltSearch::new(factory, &creation_code, account)
        .with_mask(config.address_mask)
        .with_limit(config.salt_search_limit)
        .run()?;

    Ok(FactoryPlan {
        creation_code,
        salt_search,
    })
}

/// Deploys a contract and returns its address.
pub async fn deploy_factory<WriterT: ChainWriter>(
    writer: &WriterT,
    bytecode: Bytes,
) -> Result<Address, ChallengeError> {
    let address = deploy_and_confirm(writer, bytecode).await?;
    log::info!("Deployed factory at {address}");
    Ok(address)
}

/// Result of a solved factory challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryChallengeReport {
    /// The salt passed to the factory
    pub salt: B256,
    /// The child's address
    pub child: Address,
    /// The `callMint` transaction
    pub transaction_hash: B256,
}

/// Solves the factory challenge at `challenge` using the factory at
/// `factory`.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip_all))]
pub async fn solve_factory_challenge<WriterT: ChainWriter>(
    writer: &WriterT,
    challenge: Address,
    factory: Address,
    child_bytecode: &[u8],
    config: &RunConfig,
) -> Result<FactoryChallengeReport, ChallengeError> {
    let FactoryPlan {
        creation_code,
        salt_search: SaltSearchResult {
            salt,
            predicted_address,
        },
    } = plan_deployment(
        factory,
        child_bytecode,
        challenge,
        writer.account(),
        config,
    )?;
    log::info!("Deploying child at {predicted_address} with salt {salt}");

    invoke_and_confirm(
        writer,
        factory,
        IFactory::deployWithSaltCall {
            salt,
            bytecode: creation_code,
        }
        .abi_encode(),
    )
    .await?;

    if writer.code_at(predicted_address).await?.is_empty() {
        return Err(ChallengeError::MissingCode(predicted_address));
    }

    let receipt = invoke_and_confirm(
        writer,
        predicted_address,
        IFactoryChild::callMintCall {}.abi_encode(),
    )
    .await?;

    Ok(FactoryChallengeReport {
        salt,
        child: predicted_address,
        transaction_hash: receipt.transaction_hash,
    })
}
