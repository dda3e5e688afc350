//! Deployed contract registry and compilation artifacts.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use alloy_json_abi::JsonAbi;
use headsmith_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

/// Error loading a registry or an artifact.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The file could not be read.
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        /// The file path
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },
    /// The file is not valid JSON of the expected shape.
    #[error("Failed to parse '{}': {source}", .path.display())]
    Json {
        /// The file path
        path: PathBuf,
        /// The underlying error
        source: serde_json::Error,
    },
    /// The artifact has no bytecode, e.g. because it is an interface.
    #[error("Artifact '{}' has no bytecode", .0.display())]
    MissingBytecode(PathBuf),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, RegistryError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_owned(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| RegistryError::Json {
        path: path.to_owned(),
        source,
    })
}

/// A contract deployed on a chain.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeployedContract {
    /// The contract address
    pub address: Address,
    /// The contract ABI
    #[serde(default)]
    pub abi: JsonAbi,
}

/// Deployed contracts by chain ID and name, in the format of the
/// `deployedContracts` export of deployment tools:
///
/// ```json
/// { "31337": { "Challenge12": { "address": "0x…", "abi": [] } } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ContractRegistry {
    chains: BTreeMap<u64, BTreeMap<String, DeployedContract>>,
}

impl ContractRegistry {
    /// Parses a registry from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a registry from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        read_json(path)
    }

    /// Looks up a contract by chain ID and name.
    pub fn contract(&self, chain_id: u64, name: &str) -> Option<&DeployedContract> {
        self.chains.get(&chain_id)?.get(name)
    }

    /// Registers a contract, replacing any previous entry with the same name.
    pub fn insert(&mut self, chain_id: u64, name: impl Into<String>, contract: DeployedContract) {
        self.chains
            .entry(chain_id)
            .or_default()
            .insert(name.into(), contract);
    }

    /// Names of the contracts registered for the chain.
    pub fn contract_names(&self, chain_id: u64) -> impl Iterator<Item = &str> {
        self.chains
            .get(&chain_id)
            .into_iter()
            .flat_map(|contracts| contracts.keys().map(String::as_str))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    Hex(Bytes),
    Object { object: Bytes },
}

/// A Hardhat compilation artifact.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Artifact {
    /// The contract ABI
    pub abi: JsonAbi,
    bytecode: ArtifactBytecode,
}

impl Artifact {
    /// The path of an artifact in a Hardhat artifacts directory:
    /// `<root>/<source file>/<contract>.json`.
    pub fn path(root: &Path, source_file: &str, contract: &str) -> PathBuf {
        root.join(source_file).join(format!("{contract}.json"))
    }

    /// Loads an artifact from a JSON file. Fails if the artifact has no
    /// bytecode.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let artifact: Self = read_json(path)?;
        if artifact.bytecode().is_empty() {
            return Err(RegistryError::MissingBytecode(path.to_owned()));
        }

        Ok(artifact)
    }

    /// The creation bytecode, without constructor arguments.
    pub fn bytecode(&self) -> &Bytes {
        match &self.bytecode {
            ArtifactBytecode::Hex(bytecode) | ArtifactBytecode::Object { object: bytecode } => {
                bytecode
            }
        }
    }
}
