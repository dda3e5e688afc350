use std::{fs, path::Path};

use alloy_json_abi::JsonAbi;
use alloy_sol_types::SolCall as _;
use headsmith_block_header::Era;
use headsmith_challenge::{
    ChallengeError, ChallengeFilter, ContractRegistry, DeployedContract, IFactory, IFactoryChild,
    PollPolicy, RunConfig, Runner, StepOutcome,
    test_utils::{CanonicalHeader, FakeChain, TEST_ACCOUNT},
};
use headsmith_create2::trailing_bits;
use headsmith_primitives::{Address, address};

use crate::cancun_header;

const CHAIN_ID: u64 = 31_337;
const HEADER_CHALLENGE: Address = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");
const FACTORY_CHALLENGE: Address = address!("0xe7f1725e7734ce288f8367e1bb143e90bb3f0512");
const FACTORY: Address = address!("0x9fe46736679d2d9a65f0992f2272de9f3c7fa6e0");

fn fake_chain() -> FakeChain {
    FakeChain::new(CHAIN_ID, cancun_header().fields, Era::Cancun)
}

fn registry(contracts: &[(&str, Address)]) -> ContractRegistry {
    let mut registry = ContractRegistry::default();
    for (name, address) in contracts {
        registry.insert(
            CHAIN_ID,
            *name,
            DeployedContract {
                address: *address,
                abi: JsonAbi::default(),
            },
        );
    }
    registry
}

fn config() -> RunConfig {
    RunConfig {
        block_polling: PollPolicy {
            interval_ms: 0,
            max_polls: 10,
        },
        ..RunConfig::default()
    }
}

fn write_artifact(root: &Path, contract: &str, bytecode: &str) -> anyhow::Result<()> {
    let directory = root.join("Challenge11Factory.sol");
    fs::create_dir_all(&directory)?;
    fs::write(
        directory.join(format!("{contract}.json")),
        format!(r#"{{ "contractName": "{contract}", "abi": [], "bytecode": "{bytecode}" }}"#),
    )?;
    Ok(())
}

#[tokio::test]
async fn unregistered_challenge_is_skipped() -> anyhow::Result<()> {
    let chain = fake_chain();
    let registry = registry(&[("Challenge12", HEADER_CHALLENGE)]);
    let config = config();

    let report = Runner::new(&chain, &registry, &config).run().await?;

    assert_eq!(report.chain_id, CHAIN_ID);
    assert_eq!(
        report
            .steps
            .iter()
            .map(|step| step.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Challenge11", "Challenge12"]
    );

    let factory = report.step("Challenge11").expect("factory step");
    assert!(matches!(factory.outcome, StepOutcome::Skipped(_)));

    let header = report.step("Challenge12").expect("header step");
    assert!(matches!(header.outcome, StepOutcome::Succeeded(_)));
    assert_eq!(report.failures(), 0);
    Ok(())
}

#[tokio::test]
async fn filtered_challenge_does_not_run() -> anyhow::Result<()> {
    let chain = fake_chain();
    let registry = registry(&[("Challenge12", HEADER_CHALLENGE)]);
    let config = RunConfig {
        filter: ChallengeFilter::new(Vec::<&str>::new(), ["12"]),
        ..config()
    };

    let report = Runner::new(&chain, &registry, &config).run().await?;

    let header = report.step("Challenge12").expect("header step");
    let StepOutcome::Skipped(reason) = &header.outcome else {
        panic!("expected a skipped step, got {:?}", header.outcome);
    };
    assert_eq!(reason, "filtered: Challenge12");
    assert!(chain.sent_transactions().is_empty());
    Ok(())
}

#[tokio::test]
async fn failing_step_does_not_abort_run() -> anyhow::Result<()> {
    let chain = fake_chain().with_canonical_header(CanonicalHeader::Unmatchable);
    let registry = registry(&[("Challenge12", HEADER_CHALLENGE)]);
    let config = config();

    let report = Runner::new(&chain, &registry, &config).run().await?;

    assert_eq!(report.failures(), 1);
    let header = report.step("Challenge12").expect("header step");
    assert!(matches!(
        header.outcome,
        StepOutcome::Failed(ChallengeError::Resolve(_))
    ));
    Ok(())
}

#[tokio::test]
async fn factory_step_mints_through_child() -> anyhow::Result<()> {
    let artifacts = tempfile::tempdir()?;
    write_artifact(artifacts.path(), "Challenge11Caller", "0x6080604052")?;

    let chain = fake_chain();
    let registry = registry(&[
        ("Challenge11", FACTORY_CHALLENGE),
        ("Challenge11Factory", FACTORY),
    ]);
    let config = RunConfig {
        filter: ChallengeFilter::new(["11"], Vec::<&str>::new()),
        artifacts_dir: Some(artifacts.path().to_path_buf()),
        ..config()
    };

    let report = Runner::new(&chain, &registry, &config).run().await?;

    let factory = report.step("Challenge11").expect("factory step");
    assert!(
        matches!(factory.outcome, StepOutcome::Succeeded(_)),
        "{:?}",
        factory.outcome
    );

    let sent = chain.sent_transactions();
    assert_eq!(sent.len(), 2);

    let deployment = sent.first().expect("deployment");
    assert_eq!(deployment.to, Some(FACTORY));
    assert!(IFactory::deployWithSaltCall::abi_decode(&deployment.data).is_ok());

    let mint = sent.get(1).expect("mint");
    let child = mint.to.expect("call to child");
    assert!(IFactoryChild::callMintCall::abi_decode(&mint.data).is_ok());
    assert_eq!(
        trailing_bits(&child, config.address_mask),
        trailing_bits(&TEST_ACCOUNT, config.address_mask)
    );
    Ok(())
}

#[tokio::test]
async fn missing_factory_is_deployed_from_artifact() -> anyhow::Result<()> {
    let artifacts = tempfile::tempdir()?;
    write_artifact(artifacts.path(), "Challenge11Factory", "0x60806040")?;
    write_artifact(artifacts.path(), "Challenge11Caller", "0x6080604052")?;

    let chain = fake_chain();
    let registry = registry(&[("Challenge11", FACTORY_CHALLENGE)]);
    let mut config = RunConfig {
        filter: ChallengeFilter::new(["c11"], Vec::<&str>::new()),
        artifacts_dir: Some(artifacts.path().to_path_buf()),
        ..config()
    };
    config.factory.deploy_missing_factory = true;

    let report = Runner::new(&chain, &registry, &config).run().await?;

    let factory = report.step("Challenge11").expect("factory step");
    assert!(matches!(factory.outcome, StepOutcome::Succeeded(_)));

    let sent = chain.sent_transactions();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent.first().map(|transaction| transaction.to), Some(None));
    Ok(())
}

#[tokio::test]
async fn missing_artifacts_are_skipped() -> anyhow::Result<()> {
    let chain = fake_chain();
    let registry = registry(&[
        ("Challenge11", FACTORY_CHALLENGE),
        ("Challenge11Factory", FACTORY),
    ]);
    let config = config();

    let report = Runner::new(&chain, &registry, &config).run().await?;

    let factory = report.step("Challenge11").expect("factory step");
    assert!(matches!(factory.outcome, StepOutcome::Skipped(_)));
    Ok(())
}
