//! Era activations of supported chains.
//!
//! OP Stack upgrades map onto the L1 header shape they adopt: Bedrock headers
//! have the Paris shape, Canyon adds the withdrawals root, Ecotone the blob gas
//! fields and the parent beacon block root, and Isthmus the requests hash.

use std::{collections::HashMap, sync::OnceLock};

use headsmith_block_header::Era;
use headsmith_chain_config::{ChainConfig, ForkCondition, HardforkActivation};

/// Mainnet chain ID
pub const L1_MAINNET_CHAIN_ID: u64 = 0x1;

const MAINNET_ERAS: &[HardforkActivation<Era>] = &[
    HardforkActivation {
        condition: ForkCondition::Block(0),
        hardfork: Era::PreLondon,
    },
    HardforkActivation {
        condition: ForkCondition::Block(12_965_000),
        hardfork: Era::London,
    },
    HardforkActivation {
        condition: ForkCondition::Block(15_537_394),
        hardfork: Era::Paris,
    },
    HardforkActivation {
        condition: ForkCondition::Block(17_034_870),
        hardfork: Era::Shanghai,
    },
    HardforkActivation {
        condition: ForkCondition::Block(19_426_589),
        hardfork: Era::Cancun,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_746_612_311),
        hardfork: Era::Prague,
    },
];

fn mainnet_config() -> &'static ChainConfig<Era> {
    static CONFIG: OnceLock<ChainConfig<Era>> = OnceLock::new();

    CONFIG.get_or_init(|| ChainConfig {
        name: "Mainnet".to_owned(),
        hardfork_activations: MAINNET_ERAS.into(),
    })
}

/// Holesky chain ID
pub const HOLESKY_CHAIN_ID: u64 = 0x4268;

const HOLESKY_ERAS: &[HardforkActivation<Era>] = &[
    HardforkActivation {
        condition: ForkCondition::Block(0),
        hardfork: Era::Paris,
    },
    HardforkActivation {
        condition: ForkCondition::Block(6_698),
        hardfork: Era::Shanghai,
    },
    HardforkActivation {
        condition: ForkCondition::Block(894_733),
        hardfork: Era::Cancun,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_740_434_112),
        hardfork: Era::Prague,
    },
];

fn holesky_config() -> &'static ChainConfig<Era> {
    static CONFIG: OnceLock<ChainConfig<Era>> = OnceLock::new();

    CONFIG.get_or_init(|| ChainConfig {
        name: "Holesky".to_owned(),
        hardfork_activations: HOLESKY_ERAS.into(),
    })
}

/// Hoodi chain ID
pub const HOODI_CHAIN_ID: u64 = 0x88bb0;

const HOODI_ERAS: &[HardforkActivation<Era>] = &[
    HardforkActivation {
        condition: ForkCondition::Block(0),
        hardfork: Era::Cancun,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_742_999_832),
        hardfork: Era::Prague,
    },
];

fn hoodi_config() -> &'static ChainConfig<Era> {
    static CONFIG: OnceLock<ChainConfig<Era>> = OnceLock::new();

    CONFIG.get_or_init(|| ChainConfig {
        name: "Hoodi".to_owned(),
        hardfork_activations: HOODI_ERAS.into(),
    })
}

/// Sepolia chain ID
pub const SEPOLIA_CHAIN_ID: u64 = 0xaa36a7;

const SEPOLIA_ERAS: &[HardforkActivation<Era>] = &[
    HardforkActivation {
        condition: ForkCondition::Block(0),
        hardfork: Era::London,
    },
    HardforkActivation {
        condition: ForkCondition::Block(1_450_409),
        hardfork: Era::Paris,
    },
    HardforkActivation {
        condition: ForkCondition::Block(2_990_908),
        hardfork: Era::Shanghai,
    },
    HardforkActivation {
        condition: ForkCondition::Block(5_187_023),
        hardfork: Era::Cancun,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_741_159_776),
        hardfork: Era::Prague,
    },
];

fn sepolia_config() -> &'static ChainConfig<Era> {
    static CONFIG: OnceLock<ChainConfig<Era>> = OnceLock::new();

    CONFIG.get_or_init(|| ChainConfig {
        name: "Sepolia".to_owned(),
        hardfork_activations: SEPOLIA_ERAS.into(),
    })
}

/// OP Mainnet chain ID
pub const OP_MAINNET_CHAIN_ID: u64 = 0xa;

// <https://github.com/ethereum-optimism/superchain-registry/blob/main/superchain/configs/mainnet/op.toml>
const OP_MAINNET_ERAS: &[HardforkActivation<Era>] = &[
    HardforkActivation {
        condition: ForkCondition::Block(105_235_063),
        hardfork: Era::Paris,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_704_992_401),
        hardfork: Era::Shanghai,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_710_374_401),
        hardfork: Era::Cancun,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_746_806_401),
        hardfork: Era::Prague,
    },
];

fn op_mainnet_config() -> &'static ChainConfig<Era> {
    static CONFIG: OnceLock<ChainConfig<Era>> = OnceLock::new();

    CONFIG.get_or_init(|| ChainConfig {
        name: "op-mainnet".to_owned(),
        hardfork_activations: OP_MAINNET_ERAS.into(),
    })
}

/// OP Sepolia chain ID
pub const OP_SEPOLIA_CHAIN_ID: u64 = 0xaa37dc;

// <https://github.com/ethereum-optimism/superchain-registry/blob/main/superchain/configs/sepolia/op.toml>
const OP_SEPOLIA_ERAS: &[HardforkActivation<Era>] = &[
    HardforkActivation {
        condition: ForkCondition::Block(0),
        hardfork: Era::Paris,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_699_981_200),
        hardfork: Era::Shanghai,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_708_534_800),
        hardfork: Era::Cancun,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_744_905_600),
        hardfork: Era::Prague,
    },
];

fn op_sepolia_config() -> &'static ChainConfig<Era> {
    static CONFIG: OnceLock<ChainConfig<Era>> = OnceLock::new();

    CONFIG.get_or_init(|| ChainConfig {
        name: "op-sepolia".to_owned(),
        hardfork_activations: OP_SEPOLIA_ERAS.into(),
    })
}

/// Base Mainnet chain ID
pub const BASE_MAINNET_CHAIN_ID: u64 = 8453;

// <https://github.com/ethereum-optimism/superchain-registry/blob/main/superchain/configs/mainnet/base.toml>
const BASE_MAINNET_ERAS: &[HardforkActivation<Era>] = &[
    HardforkActivation {
        condition: ForkCondition::Block(0),
        hardfork: Era::Paris,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_704_992_401),
        hardfork: Era::Shanghai,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_710_374_401),
        hardfork: Era::Cancun,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_746_806_401),
        hardfork: Era::Prague,
    },
];

fn base_mainnet_config() -> &'static ChainConfig<Era> {
    static CONFIG: OnceLock<ChainConfig<Era>> = OnceLock::new();

    CONFIG.get_or_init(|| ChainConfig {
        name: "base-mainnet".to_owned(),
        hardfork_activations: BASE_MAINNET_ERAS.into(),
    })
}

/// Base Sepolia chain ID
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

// <https://github.com/ethereum-optimism/superchain-registry/blob/main/superchain/configs/sepolia/base.toml>
const BASE_SEPOLIA_ERAS: &[HardforkActivation<Era>] = &[
    HardforkActivation {
        condition: ForkCondition::Block(0),
        hardfork: Era::Paris,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_699_981_200),
        hardfork: Era::Shanghai,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_708_534_800),
        hardfork: Era::Cancun,
    },
    HardforkActivation {
        condition: ForkCondition::Timestamp(1_744_905_600),
        hardfork: Era::Prague,
    },
];

fn base_sepolia_config() -> &'static ChainConfig<Era> {
    static CONFIG: OnceLock<ChainConfig<Era>> = OnceLock::new();

    CONFIG.get_or_init(|| ChainConfig {
        name: "base-sepolia".to_owned(),
        hardfork_activations: BASE_SEPOLIA_ERAS.into(),
    })
}

fn chain_configs() -> &'static HashMap<u64, &'static ChainConfig<Era>> {
    static CONFIGS: OnceLock<HashMap<u64, &'static ChainConfig<Era>>> = OnceLock::new();

    CONFIGS.get_or_init(|| {
        let mut configs = HashMap::new();
        configs.insert(L1_MAINNET_CHAIN_ID, mainnet_config());
        configs.insert(HOLESKY_CHAIN_ID, holesky_config());
        configs.insert(HOODI_CHAIN_ID, hoodi_config());
        configs.insert(SEPOLIA_CHAIN_ID, sepolia_config());
        configs.insert(OP_MAINNET_CHAIN_ID, op_mainnet_config());
        configs.insert(OP_SEPOLIA_CHAIN_ID, op_sepolia_config());
        configs.insert(BASE_MAINNET_CHAIN_ID, base_mainnet_config());
        configs.insert(BASE_SEPOLIA_CHAIN_ID, base_sepolia_config());
        configs
    })
}

/// Returns the era table of the provided chain ID, if it is supported.
pub fn chain_config(chain_id: u64) -> Option<&'static ChainConfig<Era>> {
    chain_configs().get(&chain_id).copied()
}

/// Returns the IDs of all supported chains, in ascending order.
pub fn supported_chain_ids() -> Vec<u64> {
    let mut chain_ids: Vec<u64> = chain_configs().keys().copied().collect();
    chain_ids.sort_unstable();
    chain_ids
}
