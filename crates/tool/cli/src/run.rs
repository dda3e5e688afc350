use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::Args;
use headsmith_challenge::{
    ChallengeFilter, ContractRegistry, EthRpcChain, RunConfig, Runner, StepOutcome,
};
use headsmith_primitives::Address;

use crate::RpcArgs;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    rpc: RpcArgs,
    /// Sender of all transactions; must be unlocked on the node
    #[arg(long, env = "HEADSMITH_ACCOUNT")]
    account: Address,
    /// JSON file with the deployed contracts by chain ID and name
    #[arg(long, env = "HEADSMITH_REGISTRY")]
    registry: PathBuf,
    /// TOML run configuration
    #[arg(long, env = "HEADSMITH_CONFIG")]
    config: Option<PathBuf>,
    /// Hardhat artifacts directory; overrides the configuration
    #[arg(long)]
    artifacts: Option<PathBuf>,
    /// Only runs these challenges, e.g. `12,c11`
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,
    /// Skips these challenges
    #[arg(long, value_delimiter = ',')]
    skip: Vec<String>,
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip_all))]
pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => RunConfig::default(),
    };
    if !args.only.is_empty() || !args.skip.is_empty() {
        config.filter = ChallengeFilter::new(&args.only, &args.skip);
    }
    if args.artifacts.is_some() {
        config.artifacts_dir = args.artifacts;
    }

    let registry = ContractRegistry::load(&args.registry)
        .with_context(|| format!("Failed to load registry {}", args.registry.display()))?;

    let chain = EthRpcChain::new(args.rpc.client()?, args.account)
        .with_receipt_polling(config.receipt_polling);
    let report = Runner::new(&chain, &registry, &config).run().await?;

    println!("Chain {}", report.chain_id);
    for step in &report.steps {
        match &step.outcome {
            StepOutcome::Succeeded(summary) => println!("  ok      {}: {summary}", step.label),
            StepOutcome::Skipped(reason) => println!("  skipped {}: {reason}", step.label),
            StepOutcome::Failed(error) => println!("  failed  {}: {error}", step.label),
        }
    }

    let failures = report.failures();
    if failures > 0 {
        bail!("{failures} of {} steps failed", report.steps.len());
    }

    Ok(())
}
