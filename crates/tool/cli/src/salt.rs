use std::{num::ParseIntError, path::PathBuf};

use clap::Args;
use headsmith_challenge::{Artifact, RunConfig, factory::plan_deployment};
use headsmith_primitives::{Address, Bytes};

#[derive(Args)]
pub struct SaltArgs {
    /// The CREATE2 factory
    #[arg(long)]
    factory: Address,
    /// Bytecode of the child contract, without constructor arguments
    #[arg(long, required_unless_present = "artifact", conflicts_with = "artifact")]
    bytecode: Option<Bytes>,
    /// Hardhat artifact of the child contract
    #[arg(long)]
    artifact: Option<PathBuf>,
    /// The challenge contract, passed to the child's constructor
    #[arg(long)]
    challenge: Address,
    /// The account whose trailing address bits have to match
    #[arg(long, env = "HEADSMITH_ACCOUNT")]
    account: Address,
    /// Bits of the last address byte that have to match, e.g. 0x0f
    #[arg(long, value_parser = parse_mask)]
    mask: Option<u8>,
    /// Number of salts to try
    #[arg(long)]
    limit: Option<u64>,
}

fn parse_mask(value: &str) -> Result<u8, ParseIntError> {
    match value.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

pub fn execute(args: SaltArgs) -> anyhow::Result<()> {
    let bytecode = match (args.bytecode, args.artifact) {
        (Some(bytecode), _) => bytecode,
        (None, Some(path)) => Artifact::load(&path)?.bytecode().clone(),
        (None, None) => anyhow::bail!("Either --bytecode or --artifact is required"),
    };

    let defaults = RunConfig::default();
    let config = RunConfig {
        address_mask: args.mask.unwrap_or(defaults.address_mask),
        salt_search_limit: args.limit.unwrap_or(defaults.salt_search_limit),
        ..defaults
    };

    let plan = plan_deployment(
        args.factory,
        &bytecode,
        args.challenge,
        args.account,
        &config,
    )?;

    println!("salt:    {}", plan.salt_search.salt);
    println!("address: {}", plan.salt_search.predicted_address);
    println!("init code hash: {}", headsmith_primitives::keccak256(&plan.creation_code));

    Ok(())
}
