use headsmith_block_header::{BlockHeaderFields, Era, encode_header};
use headsmith_primitives::{B64, hex, keccak256};
use headsmith_rlp::list_items;
use headsmith_test_utils::fixtures::{
    CANCUN_BLOCK_HASH, CANCUN_HEADER_RLP, MAINNET_GENESIS_HASH, cancun_block,
    mainnet_genesis_block,
};

#[test]
fn mainnet_genesis_reproduces_hash() -> anyhow::Result<()> {
    let fields: BlockHeaderFields = serde_json::from_value(mainnet_genesis_block())?;
    assert_eq!(fields.nonce, Some(B64::from(0x42u64.to_be_bytes())));

    let era = Era::from_fields(&fields).expect("genesis has no optional fields");
    assert_eq!(era, Era::PreLondon);

    let encoded = encode_header(&fields, era);
    assert_eq!(list_items(&encoded)?.len(), 15);
    assert_eq!(keccak256(&encoded), MAINNET_GENESIS_HASH);

    Ok(())
}

#[test]
fn cancun_block_reproduces_encoding() -> anyhow::Result<()> {
    let fields: BlockHeaderFields = serde_json::from_value(cancun_block())?;

    let era = Era::from_fields(&fields).expect("all Cancun fields are present");
    assert_eq!(era, Era::Cancun);

    let encoded = encode_header(&fields, era);
    assert_eq!(encoded.as_ref(), hex::decode(CANCUN_HEADER_RLP)?.as_slice());
    assert_eq!(fields.hash_for_era(era), CANCUN_BLOCK_HASH);

    Ok(())
}

#[test]
fn cancun_block_with_wrong_era_differs() -> anyhow::Result<()> {
    let fields: BlockHeaderFields = serde_json::from_value(cancun_block())?;

    for era in [Era::Paris, Era::Shanghai, Era::Prague] {
        assert_ne!(fields.hash_for_era(era), CANCUN_BLOCK_HASH, "{era}");
    }

    Ok(())
}
