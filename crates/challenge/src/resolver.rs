//! Finding the header encoding that a chain hashes for `BLOCKHASH`.
//!
//! Strategies are tried from most to least authoritative: the era from the
//! chain's upgrade table, the era implied by the reported fields, the node's
//! own encoding, and finally all header variants. Each candidate is checked
//! by a [`HeaderVerifier`], usually a simulated contract call.

use std::collections::HashSet;

use alloy_sol_types::SolCall as _;
use headsmith_block_header::{Era, RemoteBlockHeader, encode_header};
use headsmith_block_variant::{HeaderVariant, HeaderVariantSpec, VARIANT_COUNT, ranked_variants};
use headsmith_chain_config::ChainConfig;
use headsmith_primitives::{Address, B256, Bytes, keccak256};

use crate::{
    chain::{BoxedError, CallOutcome, ChainReader, ContractCall},
    interfaces::IHeaderChallenge,
    raw_header::{RawHeaderAdapter, RawHeaderMethod},
};

/// Checks whether a header encoding is accepted.
#[allow(async_fn_in_trait)]
pub trait HeaderVerifier {
    /// Verifies the encoding. A rejection is reported as
    /// [`CallOutcome::Reverted`].
    async fn verify(&self, rlp: &Bytes) -> Result<CallOutcome, BoxedError>;
}

/// Verifies header encodings by simulating `mintFlag(header)` on the header
/// challenge contract.
#[derive(Debug)]
pub struct ContractVerifier<'reader, ReaderT: ChainReader> {
    reader: &'reader ReaderT,
    caller: Address,
    contract: Address,
    block_number: u64,
}

impl<'reader, ReaderT: ChainReader> ContractVerifier<'reader, ReaderT> {
    /// Constructs a verifier that simulates calls from `caller` on top of
    /// the block with the provided number.
    pub fn new(
        reader: &'reader ReaderT,
        caller: Address,
        contract: Address,
        block_number: u64,
    ) -> Self {
        Self {
            reader,
            caller,
            contract,
            block_number,
        }
    }
}

impl<ReaderT: ChainReader> HeaderVerifier for ContractVerifier<'_, ReaderT> {
    async fn verify(&self, rlp: &Bytes) -> Result<CallOutcome, BoxedError> {
        let call = ContractCall {
            from: self.caller,
            to: self.contract,
            data: IHeaderChallenge::mintFlagCall {
                header: rlp.clone(),
            }
            .abi_encode()
            .into(),
        };

        self.reader
            .simulate_call(&call, Some(self.block_number))
            .await
    }
}

/// The strategy that produced an accepted header encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// The era from the chain's upgrade table
    ChainTable(Era),
    /// The era implied by the set of reported fields
    FieldPresence(Era),
    /// The node's own encoding
    RawRetrieval(RawHeaderMethod),
    /// A header variant
    Variant(HeaderVariantSpec),
}

impl std::fmt::Display for HeaderStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderStrategy::ChainTable(era) => write!(f, "{era} header from the chain table"),
            HeaderStrategy::FieldPresence(era) => write!(f, "{era} header from reported fields"),
            HeaderStrategy::RawRetrieval(method) => write!(f, "raw header from {}", method.name()),
            HeaderStrategy::Variant(spec) => write!(f, "header variant {:#04x}", spec.index()),
        }
    }
}

/// An accepted header encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedHeader {
    /// The strategy that produced the encoding
    pub strategy: HeaderStrategy,
    /// The RLP-encoded header
    pub rlp: Bytes,
}

impl ResolvedHeader {
    /// The hash of the encoded header.
    pub fn hash(&self) -> B256 {
        keccak256(&self.rlp)
    }
}

/// Error resolving a header encoding.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No candidate was accepted. The header's hashing rule differs from
    /// every modeled shape.
    #[error(
        "No valid header variant found among {candidates} candidates; default variant {rejected_rlp} hashes to {rejected_hash}"
    )]
    Exhausted {
        /// Number of header variants considered
        candidates: usize,
        /// Encoding with every present field, as a diagnostic
        rejected_rlp: Bytes,
        /// Hash of `rejected_rlp`
        rejected_hash: B256,
    },
    /// The verifier failed for reasons other than a rejection.
    #[error("Header verification failed: {0}")]
    Verification(BoxedError),
}

/// Tracks rejected encodings, so each distinct encoding is verified once.
#[derive(Debug, Default)]
struct Attempts {
    rejected: HashSet<Bytes>,
}

impl Attempts {
    async fn is_accepted<VerifierT: HeaderVerifier>(
        &mut self,
        verifier: &VerifierT,
        rlp: &Bytes,
        strategy: HeaderStrategy,
    ) -> Result<bool, ResolveError> {
        if self.rejected.contains(rlp) {
            log::trace!("Skipping {strategy}: identical to a rejected encoding");
            return Ok(false);
        }

        match verifier
            .verify(rlp)
            .await
            .map_err(ResolveError::Verification)?
        {
            CallOutcome::Success(_) => Ok(true),
            CallOutcome::Reverted(reason) => {
                log::debug!(
                    "Rejected {strategy} with hash {}: {reason}",
                    keccak256(rlp)
                );
                self.rejected.insert(rlp.clone());
                Ok(false)
            }
        }
    }
}

/// Runs the header strategy chain for a single chain.
#[derive(Clone, Debug)]
pub struct HeaderResolver<'config> {
    chain_config: Option<&'config ChainConfig<Era>>,
    raw_headers: RawHeaderAdapter,
}

impl<'config> HeaderResolver<'config> {
    /// Constructs a resolver. Without a chain config, eras are only derived
    /// from the reported fields.
    pub fn new(chain_config: Option<&'config ChainConfig<Era>>) -> Self {
        Self {
            chain_config,
            raw_headers: RawHeaderAdapter::new(),
        }
    }

    /// The era strategies for the header, most authoritative first.
    pub fn era_strategies(&self, header: &RemoteBlockHeader) -> Vec<HeaderStrategy> {
        let fields = &header.fields;

        let table_era = self
            .chain_config
            .and_then(|config| Era::at(config, fields.number, fields.timestamp));
        let presence_era = Era::from_fields(fields);

        let mut strategies: Vec<HeaderStrategy> =
            table_era.into_iter().map(HeaderStrategy::ChainTable).collect();
        if let Some(era) = presence_era
            && presence_era != table_era
        {
            strategies.push(HeaderStrategy::FieldPresence(era));
        }

        strategies
    }

    /// Finds an accepted encoding of the header.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(number = header.fields.number))
    )]
    pub async fn resolve<ReaderT: ChainReader, VerifierT: HeaderVerifier>(
        &mut self,
        reader: &ReaderT,
        header: &RemoteBlockHeader,
        verifier: &VerifierT,
    ) -> Result<ResolvedHeader, ResolveError> {
        let fields = &header.fields;
        let mut attempts = Attempts::default();

        for strategy in self.era_strategies(header) {
            let (HeaderStrategy::ChainTable(era) | HeaderStrategy::FieldPresence(era)) = strategy
            else {
                continue;
            };

            let rlp = encode_header(fields, era);
            if attempts.is_accepted(verifier, &rlp, strategy).await? {
                return Ok(ResolvedHeader { strategy, rlp });
            }
        }

        if let Some(raw) = self
            .raw_headers
            .fetch(reader, header.hash, fields.number)
            .await
        {
            let strategy = HeaderStrategy::RawRetrieval(raw.method);
            if attempts.is_accepted(verifier, &raw.rlp, strategy).await? {
                return Ok(ResolvedHeader {
                    strategy,
                    rlp: raw.rlp,
                });
            }
        }

        log::info!("Searching {VARIANT_COUNT} header variants for block {}", fields.number);
        for HeaderVariant { spec, rlp } in ranked_variants(fields) {
            let strategy = HeaderStrategy::Variant(spec);
            if attempts.is_accepted(verifier, &rlp, strategy).await? {
                return Ok(ResolvedHeader { strategy, rlp });
            }
        }

        let default_variant =
            HeaderVariant::new(fields, HeaderVariantSpec::including_present_fields(fields));
        Err(ResolveError::Exhausted {
            candidates: VARIANT_COUNT,
            rejected_hash: default_variant.hash(),
            rejected_rlp: default_variant.rlp,
        })
    }
}
