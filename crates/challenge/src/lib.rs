//! Solves the header and factory challenges against a live chain.
//!
//! The chain is accessed through the [`ChainReader`] and [`ChainWriter`]
//! traits, implemented for JSON-RPC nodes by [`EthRpcChain`].

pub mod chain;
mod config;
mod error;
mod eth_chain;
pub mod factory;
pub mod header;
mod interfaces;
pub mod raw_header;
mod registry;
pub mod resolver;
mod runner;
/// Test doubles
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use self::{
    chain::{BoxedError, CallOutcome, ChainReader, ChainWriter, ContractCall, TransactionReceipt},
    config::{
        ChallengeFilter, ConfigError, FactoryStepConfig, HeaderStepConfig, PollPolicy, RunConfig,
        canonical_challenge_name,
    },
    error::ChallengeError,
    eth_chain::{EthRpcChain, ReceiptTimeoutError},
    interfaces::{IFactory, IFactoryChild, IHeaderChallenge},
    registry::{Artifact, ContractRegistry, DeployedContract, RegistryError},
    resolver::{HeaderResolver, HeaderStrategy, ResolveError, ResolvedHeader},
    runner::{RunReport, Runner, StepOutcome, StepReport},
};
