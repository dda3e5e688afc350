//! Run configuration, loadable from TOML.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    time::Duration,
};

use headsmith_defaults::{
    ADDRESS_MASK, BLOCK_POLL_INTERVAL, MAX_BLOCK_POLLS, MAX_PREMINT_RESTARTS, MAX_RECEIPT_POLLS,
    RECEIPT_POLL_INTERVAL, SALT_SEARCH_LIMIT,
};
use serde::{Deserialize, Serialize};

/// Error loading a [`RunConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        /// The config file path
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },
    /// The file is not a valid config.
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Bounded polling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PollPolicy {
    /// Delay between polls, in milliseconds
    pub interval_ms: u64,
    /// Maximum number of polls
    pub max_polls: u64,
}

impl PollPolicy {
    /// Polling policy for the chain height.
    pub fn blocks() -> Self {
        Self::new(BLOCK_POLL_INTERVAL, MAX_BLOCK_POLLS)
    }

    /// Polling policy for transaction receipts.
    pub fn receipts() -> Self {
        Self::new(RECEIPT_POLL_INTERVAL, MAX_RECEIPT_POLLS)
    }

    fn new(interval: Duration, max_polls: u64) -> Self {
        Self {
            interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            max_polls,
        }
    }

    /// Delay between polls.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Converts user input such as `4`, `C4`, `c4`, or `Challenge4` to the
/// canonical challenge name `Challenge4`. Returns `None` for anything without
/// a positive number.
pub fn canonical_challenge_name(input: &str) -> Option<String> {
    let input = input.trim();
    let lowercase = input.to_ascii_lowercase();

    let rest = lowercase.strip_prefix("challenge").unwrap_or(&lowercase);
    let rest = rest.strip_prefix('c').unwrap_or(rest);

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    let number: u32 = digits.parse().ok()?;
    (number > 0).then(|| format!("Challenge{number}"))
}

#[derive(Deserialize)]
struct FilterLists {
    #[serde(default)]
    only: Vec<String>,
    #[serde(default)]
    skip: Vec<String>,
}

fn canonical_set<NamesT>(names: NamesT) -> BTreeSet<String>
where
    NamesT: IntoIterator,
    NamesT::Item: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let canonical = canonical_challenge_name(name);
            if canonical.is_none() {
                log::warn!("Ignoring unrecognised challenge name '{name}'");
            }
            canonical
        })
        .collect()
}

impl From<FilterLists> for ChallengeFilter {
    fn from(value: FilterLists) -> Self {
        Self::new(value.only, value.skip)
    }
}

/// Selects which challenges to run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "FilterLists")]
pub struct ChallengeFilter {
    only: BTreeSet<String>,
    skip: BTreeSet<String>,
}

impl ChallengeFilter {
    /// Constructs a filter from user input. Unrecognised names are ignored.
    pub fn new<OnlyT, SkipT>(only: OnlyT, skip: SkipT) -> Self
    where
        OnlyT: IntoIterator,
        OnlyT::Item: AsRef<str>,
        SkipT: IntoIterator,
        SkipT::Item: AsRef<str>,
    {
        Self {
            only: canonical_set(only),
            skip: canonical_set(skip),
        }
    }

    /// Whether the challenge with the provided canonical name runs. A
    /// non-empty `only` set takes precedence over `skip`.
    pub fn is_enabled(&self, name: &str) -> bool {
        if self.only.is_empty() {
            !self.skip.contains(name)
        } else {
            self.only.contains(name)
        }
    }
}

/// Configuration of the header challenge step.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderStepConfig {
    /// Canonical challenge name, which is also its registry name
    pub contract: String,
}

impl Default for HeaderStepConfig {
    fn default() -> Self {
        Self {
            contract: "Challenge12".to_owned(),
        }
    }
}

/// Configuration of the factory challenge step.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FactoryStepConfig {
    /// Canonical challenge name, which is also its registry name
    pub contract: String,
    /// Registry and artifact name of the factory
    pub factory: String,
    /// Artifact name of the contract deployed through the factory
    pub child: String,
    /// Source file of both artifacts, relative to the artifacts directory
    pub source_file: String,
    /// Whether to deploy the factory when it isn't registered
    pub deploy_missing_factory: bool,
}

impl Default for FactoryStepConfig {
    fn default() -> Self {
        Self {
            contract: "Challenge11".to_owned(),
            factory: "Challenge11Factory".to_owned(),
            child: "Challenge11Caller".to_owned(),
            source_file: "Challenge11Factory.sol".to_owned(),
            deploy_missing_factory: false,
        }
    }
}

/// Configuration of a run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Which challenges to run
    pub filter: ChallengeFilter,
    /// Polling of the chain height while waiting for block maturity
    pub block_polling: PollPolicy,
    /// Polling of transaction receipts
    pub receipt_polling: PollPolicy,
    /// How often the premint is repeated when the target block leaves the
    /// `BLOCKHASH` window
    pub max_premint_restarts: u32,
    /// Number of salts to try
    pub salt_search_limit: u64,
    /// Bits of the last address byte that have to match
    pub address_mask: u8,
    /// Directory of Hardhat artifacts, e.g. `artifacts/contracts`
    pub artifacts_dir: Option<PathBuf>,
    /// Header challenge step
    pub header: HeaderStepConfig,
    /// Factory challenge step
    pub factory: FactoryStepConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            filter: ChallengeFilter::default(),
            block_polling: PollPolicy::blocks(),
            receipt_polling: PollPolicy::receipts(),
            max_premint_restarts: MAX_PREMINT_RESTARTS,
            salt_search_limit: SALT_SEARCH_LIMIT,
            address_mask: ADDRESS_MASK,
            artifacts_dir: None,
            header: HeaderStepConfig::default(),
            factory: FactoryStepConfig::default(),
        }
    }
}

impl RunConfig {
    /// Parses a TOML document. Missing fields take their default values.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(document)?)
    }

    /// Loads a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&document)
    }
}
