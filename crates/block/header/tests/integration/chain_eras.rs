use headsmith_block_header::Era;
use headsmith_chain_l1::chains::{
    L1_MAINNET_CHAIN_ID, OP_MAINNET_CHAIN_ID, SEPOLIA_CHAIN_ID, chain_config,
};

#[test]
fn mainnet_upgrade_boundaries() {
    let config = chain_config(L1_MAINNET_CHAIN_ID).expect("mainnet is supported");

    let cases = [
        (0, 0, Era::PreLondon),
        (12_964_999, 0, Era::PreLondon),
        (12_965_000, 0, Era::London),
        (15_537_393, 0, Era::London),
        (15_537_394, 0, Era::Paris),
        (17_034_870, 0, Era::Shanghai),
        (19_426_589, 0, Era::Cancun),
        (22_431_084, 1_746_612_311, Era::Prague),
    ];

    for (block_number, timestamp, expected) in cases {
        assert_eq!(
            Era::at(config, block_number, timestamp),
            Some(expected),
            "block {block_number}"
        );
    }
}

#[test]
fn sepolia_started_in_london() {
    let config = chain_config(SEPOLIA_CHAIN_ID).expect("sepolia is supported");
    assert_eq!(Era::at(config, 0, 0), Some(Era::London));
}

#[test]
fn op_mainnet_predates_bedrock() {
    let config = chain_config(OP_MAINNET_CHAIN_ID).expect("OP mainnet is supported");
    assert_eq!(Era::at(config, 105_235_062, 0), None);
    assert_eq!(Era::at(config, 105_235_063, 0), Some(Era::Paris));
}
