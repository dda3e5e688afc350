use headsmith_block_header::Era;
use headsmith_block_variant::HeaderVariantSpec;
use headsmith_challenge::{
    ChallengeError, HeaderStrategy, PollPolicy, ResolveError, RunConfig,
    header::{MaturePremint, Premint, mature_premint, solve_header_challenge, wait_for_maturity},
    test_utils::{CanonicalHeader, FakeChain},
};
use headsmith_primitives::{Address, address, keccak256};

use crate::cancun_header;

const CONTRACT: Address = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");

fn fast_polling(max_polls: u64) -> PollPolicy {
    PollPolicy {
        interval_ms: 0,
        max_polls,
    }
}

fn config() -> RunConfig {
    RunConfig {
        block_polling: fast_polling(10),
        ..RunConfig::default()
    }
}

fn fake_chain() -> FakeChain {
    // Starts at height 100, so the premint lands in block 101
    FakeChain::new(31_337, cancun_header().fields, Era::Cancun)
}

#[tokio::test]
async fn maturity_waits_for_target_block() -> anyhow::Result<()> {
    let chain = fake_chain();
    let premint = Premint { block_number: 100 };

    let now = wait_for_maturity(&chain, &premint, &fast_polling(10)).await?;
    assert_eq!(now, 103);
    Ok(())
}

#[tokio::test]
async fn maturity_times_out() {
    let chain = fake_chain().with_poll_advances([0, 0, 0]);
    let premint = Premint { block_number: 100 };

    let result = wait_for_maturity(&chain, &premint, &fast_polling(3)).await;
    assert!(matches!(
        result,
        Err(ChallengeError::MaturityTimeout {
            target: 102,
            polls: 3
        })
    ));
}

#[tokio::test]
async fn expired_premint_is_repeated() -> anyhow::Result<()> {
    // The first poll jumps past the `BLOCKHASH` window of block 103
    let chain = fake_chain().with_poll_advances([300]);

    let mature = mature_premint(&chain, CONTRACT, &fast_polling(10), 1).await?;
    assert_eq!(
        mature,
        MaturePremint {
            premint: Premint { block_number: 402 },
            now: 405,
            restarts: 1,
        }
    );
    assert_eq!(chain.premint_blocks(), vec![101, 402]);
    Ok(())
}

#[tokio::test]
async fn repeated_expiry_is_stale() {
    let chain = fake_chain().with_poll_advances([300, 300]);

    let result = mature_premint(&chain, CONTRACT, &fast_polling(10), 1).await;
    assert!(matches!(
        result,
        Err(ChallengeError::Stale {
            target: 404,
            now: 702,
            restarts: 1
        })
    ));
    assert_eq!(chain.premint_blocks(), vec![101, 402]);
}

#[tokio::test]
async fn solves_with_reported_fields() -> anyhow::Result<()> {
    let chain = fake_chain();

    let report = solve_header_challenge(&chain, CONTRACT, None, &config()).await?;

    assert_eq!(report.premint_block, 101);
    assert_eq!(report.target_block, 103);
    assert_eq!(report.strategy, HeaderStrategy::FieldPresence(Era::Cancun));

    // Dry-run at the height where the target block matured
    let simulated = chain.simulated_headers();
    assert_eq!(simulated.len(), 1);
    let accepted = simulated.first().expect("simulated call");
    assert_eq!(keccak256(accepted), chain.canonical_hash(103));

    let sent = chain.sent_transactions();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|transaction| transaction.to == Some(CONTRACT)));
    Ok(())
}

#[tokio::test]
async fn solves_with_header_variant() -> anyhow::Result<()> {
    let spec = HeaderVariantSpec {
        include_base_fee: true,
        include_withdrawals: true,
        nonce_empty: true,
        ..HeaderVariantSpec::default()
    };
    let chain = fake_chain().with_canonical_header(CanonicalHeader::Variant(spec));

    let report = solve_header_challenge(&chain, CONTRACT, None, &config()).await?;

    assert!(matches!(report.strategy, HeaderStrategy::Variant(_)));
    assert_eq!(chain.raw_requests().len(), 3);

    let simulated = chain.simulated_headers();
    let accepted = simulated.last().expect("simulated calls");
    assert_eq!(keccak256(accepted), chain.canonical_hash(report.target_block));
    Ok(())
}

#[tokio::test]
async fn unmatchable_header_does_not_mint() {
    let chain = fake_chain().with_canonical_header(CanonicalHeader::Unmatchable);

    let result = solve_header_challenge(&chain, CONTRACT, None, &config()).await;

    assert!(matches!(
        result,
        Err(ChallengeError::Resolve(ResolveError::Exhausted { .. }))
    ));
    // Only the premint was sent
    assert_eq!(chain.sent_transactions().len(), 1);
}
