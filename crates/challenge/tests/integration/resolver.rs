use std::{collections::HashSet, sync::Mutex};

use headsmith_block_header::{Era, encode_header};
use headsmith_block_variant::{HeaderVariantSpec, VARIANT_COUNT, encode_variant};
use headsmith_challenge::{
    BoxedError, CallOutcome, HeaderResolver, HeaderStrategy, ResolveError,
    raw_header::RawHeaderMethod, resolver::HeaderVerifier, test_utils::FakeChain,
};
use headsmith_chain_l1::chains::{L1_MAINNET_CHAIN_ID, chain_config};
use headsmith_primitives::{B256, Bytes, hex, keccak256};
use serde_json::json;

use crate::cancun_header;

/// Accepts a single header hash and records every verified encoding.
#[derive(Default)]
struct HashVerifier {
    accepted: Option<B256>,
    verified: Mutex<Vec<Bytes>>,
}

impl HashVerifier {
    fn accepting(rlp: &[u8]) -> Self {
        Self {
            accepted: Some(keccak256(rlp)),
            ..Self::default()
        }
    }

    fn verified(&self) -> Vec<Bytes> {
        self.verified.lock().expect("lock poisoned").clone()
    }
}

impl HeaderVerifier for HashVerifier {
    async fn verify(&self, rlp: &Bytes) -> Result<CallOutcome, BoxedError> {
        self.verified.lock().expect("lock poisoned").push(rlp.clone());

        if Some(keccak256(rlp)) == self.accepted {
            Ok(CallOutcome::Success(Bytes::new()))
        } else {
            Ok(CallOutcome::Reverted("Invalid block header".to_owned()))
        }
    }
}

struct FailingVerifier;

impl HeaderVerifier for FailingVerifier {
    async fn verify(&self, _rlp: &Bytes) -> Result<CallOutcome, BoxedError> {
        Err("connection reset".into())
    }
}

fn fake_chain() -> FakeChain {
    FakeChain::new(31_337, cancun_header().fields, Era::Cancun)
}

/// Cancun's optional fields, but the nonce encoded as an empty string. No era
/// encodes the nonce like this.
fn empty_nonce_spec() -> HeaderVariantSpec {
    HeaderVariantSpec {
        include_base_fee: true,
        include_withdrawals: true,
        include_blob: true,
        include_parent_beacon_block_root: true,
        nonce_empty: true,
        ..HeaderVariantSpec::default()
    }
}

#[test]
fn era_strategies_start_with_chain_table() {
    let header = cancun_header();

    let resolver = HeaderResolver::new(chain_config(L1_MAINNET_CHAIN_ID));
    assert_eq!(
        resolver.era_strategies(&header),
        vec![
            HeaderStrategy::ChainTable(Era::PreLondon),
            HeaderStrategy::FieldPresence(Era::Cancun),
        ]
    );

    let resolver = HeaderResolver::new(None);
    assert_eq!(
        resolver.era_strategies(&header),
        vec![HeaderStrategy::FieldPresence(Era::Cancun)]
    );
}

#[tokio::test]
async fn chain_table_era_is_accepted_first() -> anyhow::Result<()> {
    let header = cancun_header();
    let chain = fake_chain();
    let verifier = HashVerifier::accepting(&encode_header(&header.fields, Era::PreLondon));

    let resolved = HeaderResolver::new(chain_config(L1_MAINNET_CHAIN_ID))
        .resolve(&chain, &header, &verifier)
        .await?;

    assert_eq!(resolved.strategy, HeaderStrategy::ChainTable(Era::PreLondon));
    assert_eq!(verifier.verified().len(), 1);
    assert!(chain.raw_requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn field_presence_follows_chain_table() -> anyhow::Result<()> {
    let header = cancun_header();
    let chain = fake_chain();
    let verifier = HashVerifier::accepting(&encode_header(&header.fields, Era::Cancun));

    let resolved = HeaderResolver::new(chain_config(L1_MAINNET_CHAIN_ID))
        .resolve(&chain, &header, &verifier)
        .await?;

    assert_eq!(resolved.strategy, HeaderStrategy::FieldPresence(Era::Cancun));
    assert_eq!(resolved.hash(), header.hash.expect("reported hash"));
    assert_eq!(verifier.verified().len(), 2);
    Ok(())
}

#[tokio::test]
async fn raw_header_follows_eras() -> anyhow::Result<()> {
    let header = cancun_header();
    let rlp = encode_variant(&header.fields, &empty_nonce_spec());
    let chain = fake_chain().with_raw_response(
        RawHeaderMethod::GetRawHeader.name(),
        json!(hex::encode_prefixed(&rlp)),
    );
    let verifier = HashVerifier::accepting(&rlp);

    let resolved = HeaderResolver::new(None)
        .resolve(&chain, &header, &verifier)
        .await?;

    assert_eq!(
        resolved.strategy,
        HeaderStrategy::RawRetrieval(RawHeaderMethod::GetRawHeader)
    );
    assert_eq!(resolved.rlp, rlp);
    assert_eq!(chain.raw_requests(), vec!["debug_getRawHeader"]);
    Ok(())
}

#[tokio::test]
async fn raw_block_yields_its_header() -> anyhow::Result<()> {
    let header = cancun_header();
    let rlp = encode_variant(&header.fields, &empty_nonce_spec());

    // [header, [], []]
    let payload_length = u16::try_from(rlp.len() + 2)?;
    let mut block = vec![0xf9];
    block.extend_from_slice(&payload_length.to_be_bytes());
    block.extend_from_slice(&rlp);
    block.extend_from_slice(&[0xc0, 0xc0]);

    let chain = fake_chain().with_raw_response(
        RawHeaderMethod::GetRawBlock.name(),
        json!(hex::encode_prefixed(&block)),
    );
    let verifier = HashVerifier::accepting(&rlp);

    let resolved = HeaderResolver::new(None)
        .resolve(&chain, &header, &verifier)
        .await?;

    assert_eq!(
        resolved.strategy,
        HeaderStrategy::RawRetrieval(RawHeaderMethod::GetRawBlock)
    );
    assert_eq!(resolved.rlp, rlp);
    assert_eq!(
        chain.raw_requests(),
        vec!["debug_getRawHeader", "debug_getRawBlock"]
    );
    Ok(())
}

#[tokio::test]
async fn rejected_raw_methods_are_not_retried() -> anyhow::Result<()> {
    let header = cancun_header();
    let chain = fake_chain();
    let rlp = encode_variant(&header.fields, &empty_nonce_spec());
    let verifier = HashVerifier::accepting(&rlp);

    let mut resolver = HeaderResolver::new(None);
    let first = resolver.resolve(&chain, &header, &verifier).await?;
    assert_eq!(chain.raw_requests().len(), RawHeaderMethod::ALL.len());

    let second = resolver.resolve(&chain, &header, &verifier).await?;
    assert_eq!(chain.raw_requests().len(), RawHeaderMethod::ALL.len());

    assert_eq!(first, second);
    assert!(matches!(first.strategy, HeaderStrategy::Variant(_)));
    Ok(())
}

#[tokio::test]
async fn variant_search_finds_unmodeled_shape() -> anyhow::Result<()> {
    let header = cancun_header();
    let chain = fake_chain();
    let rlp = encode_variant(&header.fields, &empty_nonce_spec());
    let verifier = HashVerifier::accepting(&rlp);

    let resolved = HeaderResolver::new(None)
        .resolve(&chain, &header, &verifier)
        .await?;

    let HeaderStrategy::Variant(spec) = resolved.strategy else {
        panic!("expected a variant, got {}", resolved.strategy);
    };
    assert_eq!(encode_variant(&header.fields, &spec), rlp);
    assert_eq!(resolved.rlp, rlp);
    Ok(())
}

#[tokio::test]
async fn exhaustion_reports_default_variant() -> anyhow::Result<()> {
    let header = cancun_header();
    let chain = fake_chain();
    let verifier = HashVerifier::default();

    let result = HeaderResolver::new(chain_config(L1_MAINNET_CHAIN_ID))
        .resolve(&chain, &header, &verifier)
        .await;

    let (candidates, rejected_rlp, rejected_hash) = match result {
        Err(ResolveError::Exhausted {
            candidates,
            rejected_rlp,
            rejected_hash,
        }) => (candidates, rejected_rlp, rejected_hash),
        other => panic!("expected exhaustion, got {other:?}"),
    };

    let default_rlp = encode_variant(
        &header.fields,
        &HeaderVariantSpec::including_present_fields(&header.fields),
    );
    assert_eq!(candidates, VARIANT_COUNT);
    assert_eq!(rejected_rlp, default_rlp);
    assert_eq!(rejected_hash, keccak256(&default_rlp));

    // Identical encodings are only verified once
    let verified = verifier.verified();
    let distinct: HashSet<&Bytes> = verified.iter().collect();
    assert_eq!(distinct.len(), verified.len());
    assert!(verified.len() <= VARIANT_COUNT + 2);
    Ok(())
}

#[tokio::test]
async fn verifier_failure_aborts() {
    let header = cancun_header();
    let chain = fake_chain();

    let result = HeaderResolver::new(None)
        .resolve(&chain, &header, &FailingVerifier)
        .await;

    assert!(matches!(result, Err(ResolveError::Verification(_))));
}
