use std::path::Path;

use headsmith_chain_l1::chains::chain_config;
use headsmith_primitives::Address;

use crate::{
    ChallengeError,
    chain::ChainWriter,
    config::RunConfig,
    factory::{deploy_factory, solve_factory_challenge},
    header::solve_header_challenge,
    registry::{Artifact, ContractRegistry},
};

/// Outcome of a single step.
#[derive(Debug)]
pub enum StepOutcome {
    /// The step completed, with a summary.
    Succeeded(String),
    /// The step did not run, with the reason.
    Skipped(String),
    /// The step failed.
    Failed(ChallengeError),
}

/// A step and its outcome.
#[derive(Debug)]
pub struct StepReport {
    /// The canonical challenge name
    pub name: String,
    /// Description of the step
    pub label: String,
    /// The outcome
    pub outcome: StepOutcome,
}

/// Outcomes of all steps of a run, in execution order.
#[derive(Debug)]
pub struct RunReport {
    /// The chain the steps ran on
    pub chain_id: u64,
    /// The steps
    pub steps: Vec<StepReport>,
}

impl RunReport {
    /// Looks up a step by canonical name.
    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|step| step.name == name)
    }

    /// Number of failed steps.
    pub fn failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step.outcome, StepOutcome::Failed(_)))
            .count()
    }
}

/// Runs the enabled challenge steps in order. A failing step does not abort
/// the run.
#[derive(Debug)]
pub struct Runner<'a, WriterT: ChainWriter> {
    chain: &'a WriterT,
    registry: &'a ContractRegistry,
    config: &'a RunConfig,
}

impl<'a, WriterT: ChainWriter> Runner<'a, WriterT> {
    /// Constructs a runner.
    pub fn new(chain: &'a WriterT, registry: &'a ContractRegistry, config: &'a RunConfig) -> Self {
        Self {
            chain,
            registry,
            config,
        }
    }

    /// Runs all enabled steps. Only fails if the chain ID cannot be
    /// determined.
    pub async fn run(&self) -> Result<RunReport, ChallengeError> {
        let chain_id = self.chain.chain_id().await?;
        log::info!("Target chain: {chain_id}, account: {}", self.chain.account());

        let factory = &self.config.factory.contract;
        let header = &self.config.header.contract;

        let steps = vec![
            self.run_step(
                factory,
                format!("{factory}: CREATE2 caller and mint"),
                self.factory_step(chain_id),
            )
            .await,
            self.run_step(
                header,
                format!("{header}: preMintFlag and mintFlag(header)"),
                self.header_step(chain_id),
            )
            .await,
        ];

        Ok(RunReport { chain_id, steps })
    }

    async fn run_step(
        &self,
        name: &str,
        label: String,
        step: impl Future<Output = Result<String, ChallengeError>>,
    ) -> StepReport {
        let outcome = if self.config.filter.is_enabled(name) {
            match step.await {
                Ok(summary) => {
                    log::info!("{label}: {summary}");
                    StepOutcome::Succeeded(summary)
                }
                Err(error) if error.is_missing_prerequisite() => {
                    log::info!("{label} skipped: {error}");
                    StepOutcome::Skipped(error.to_string())
                }
                Err(error) => {
                    log::warn!("{label} failed: {error}");
                    StepOutcome::Failed(error)
                }
            }
        } else {
            log::info!("{label} skipped (filtered: {name})");
            StepOutcome::Skipped(format!("filtered: {name}"))
        };

        StepReport {
            name: name.to_owned(),
            label,
            outcome,
        }
    }

    fn contract_address(&self, chain_id: u64, name: &str) -> Result<Address, ChallengeError> {
        self.registry
            .contract(chain_id, name)
            .map(|contract| contract.address)
            .ok_or_else(|| ChallengeError::MissingContract {
                name: name.to_owned(),
                chain_id,
            })
    }

    fn artifacts_dir(&self) -> Result<&Path, ChallengeError> {
        self.config.artifacts_dir.as_deref().ok_or_else(|| {
            ChallengeError::MissingPrerequisite("No artifacts directory configured".to_owned())
        })
    }

    async fn header_step(&self, chain_id: u64) -> Result<String, ChallengeError> {
        let contract = self.contract_address(chain_id, &self.config.header.contract)?;

        let report =
            solve_header_challenge(self.chain, contract, chain_config(chain_id), self.config)
                .await?;

        Ok(format!(
            "minted with the header of block {} ({}) in transaction {}",
            report.target_block, report.strategy, report.transaction_hash
        ))
    }

    async fn factory_step(&self, chain_id: u64) -> Result<String, ChallengeError> {
        let step_config = &self.config.factory;
        let challenge = self.contract_address(chain_id, &step_config.contract)?;

        let factory = match self.contract_address(chain_id, &step_config.factory) {
            Ok(factory) => factory,
            Err(error) if step_config.deploy_missing_factory => {
                log::info!("{error}; deploying it");
                let path = Artifact::path(
                    self.artifacts_dir()?,
                    &step_config.source_file,
                    &step_config.factory,
                );
                let artifact = Artifact::load(&path)?;
                deploy_factory(self.chain, artifact.bytecode().clone()).await?
            }
            Err(error) => return Err(error),
        };

        let path = Artifact::path(
            self.artifacts_dir()?,
            &step_config.source_file,
            &step_config.child,
        );
        let child = Artifact::load(&path)?;

        let report =
            solve_factory_challenge(self.chain, challenge, factory, child.bytecode(), self.config)
                .await?;

        Ok(format!(
            "minted through {} (salt {}) in transaction {}",
            report.child, report.salt, report.transaction_hash
        ))
    }
}
