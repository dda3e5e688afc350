use headsmith_primitives::{B256, b256};
use serde_json::json;

/// Hash of the Ethereum mainnet genesis block.
pub const MAINNET_GENESIS_HASH: B256 =
    b256!("0xd4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3");

/// Hash of the Cancun block returned by [`cancun_block`].
pub const CANCUN_BLOCK_HASH: B256 =
    b256!("0xd2caf87ef0ecbbf1d8721e4f63d56b3a5b4bf8b5faa0409aa6b99a729affe346");

/// RLP encoding of the header of the block returned by [`cancun_block`].
// Test vector from https://github.com/ethereum/tests/blob/a33949df17a1c382ffee5666e66d26bde7a089f9/EIPTests/Pyspecs/cancun/eip4844_blobs/correct_increasing_blob_gas_costs.json#L16
pub const CANCUN_HEADER_RLP: &str = "0xf90242a0258811d02512e87e09253a948330eff05da06b7656143a211fa3687901217f57a01dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347942adc25665018aa1fe0e6bc666dac8fc2697ff9baa06a086c92bb1d4ee6dc4ca73e66529037591bd4d6590350f6c904bc78dc21b75ca0dc387fc6ef9e3eb53baa85df89a1f9b91a4a9ab472ee7e928b4b7fdc06dfa5d1a0eaa8c40899a61ae59615cf9985f5e2194f8fd2b57d273be63bde6733e89b12abb9010000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000800188016345785d8a00008252080c80a0000000000000000000000000000000000000000000000000000000000000000088000000000000000007a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b4218308000083220000a00000000000000000000000000000000000000000000000000000000000000000";

const ZERO_HASH: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";
const EMPTY_TRIE_ROOT: &str = "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421";
const EMPTY_OMMERS_HASH: &str =
    "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347";

fn empty_bloom() -> String {
    format!("0x{}", "0".repeat(512))
}

/// The Ethereum mainnet genesis block, as returned by `eth_getBlockByNumber`.
pub fn mainnet_genesis_block() -> serde_json::Value {
    json!({
        "hash": MAINNET_GENESIS_HASH,
        "parentHash": ZERO_HASH,
        "sha3Uncles": EMPTY_OMMERS_HASH,
        "miner": "0x0000000000000000000000000000000000000000",
        "stateRoot": "0xd7f8974fb5ac78d9ac099b9ad5018bedc2ce0a72dad1827a1709da30580f0544",
        "transactionsRoot": EMPTY_TRIE_ROOT,
        "receiptsRoot": EMPTY_TRIE_ROOT,
        "logsBloom": empty_bloom(),
        "difficulty": "0x400000000",
        "totalDifficulty": "0x400000000",
        "number": "0x0",
        "gasLimit": "0x1388",
        "gasUsed": "0x0",
        "timestamp": "0x0",
        "extraData": "0x11bbe8db4e347b4e8c937c1c8370e4b5ed33adb3db69cbdb7a38e1e50b1b82fa",
        "mixHash": ZERO_HASH,
        "nonce": "0x0000000000000042",
        "size": "0x21c",
        "uncles": [],
        "transactions": []
    })
}

/// A Cancun block from the Ethereum execution spec tests, as returned by
/// `eth_getBlockByNumber`.
pub fn cancun_block() -> serde_json::Value {
    json!({
        "hash": CANCUN_BLOCK_HASH,
        "parentHash": "0x258811d02512e87e09253a948330eff05da06b7656143a211fa3687901217f57",
        "sha3Uncles": EMPTY_OMMERS_HASH,
        "miner": "0x2adc25665018aa1fe0e6bc666dac8fc2697ff9ba",
        "stateRoot": "0x6a086c92bb1d4ee6dc4ca73e66529037591bd4d6590350f6c904bc78dc21b75c",
        "transactionsRoot": "0xdc387fc6ef9e3eb53baa85df89a1f9b91a4a9ab472ee7e928b4b7fdc06dfa5d1",
        "receiptsRoot": "0xeaa8c40899a61ae59615cf9985f5e2194f8fd2b57d273be63bde6733e89b12ab",
        "logsBloom": empty_bloom(),
        "difficulty": "0x0",
        "number": "0x1",
        "gasLimit": "0x16345785d8a0000",
        "gasUsed": "0x5208",
        "timestamp": "0xc",
        "extraData": "0x",
        "mixHash": ZERO_HASH,
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x7",
        "withdrawalsRoot": EMPTY_TRIE_ROOT,
        "blobGasUsed": "0x80000",
        "excessBlobGas": "0x220000",
        "parentBeaconBlockRoot": ZERO_HASH,
        "size": "0x245",
        "uncles": [],
        "transactions": [],
        "withdrawals": []
    })
}
