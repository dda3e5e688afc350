//! Default values shared across headsmith crates.

use std::time::Duration;

/// Number of most recent block hashes the `BLOCKHASH` opcode can access.
pub const BLOCKHASH_WINDOW: u64 = 256;

/// Distance between the premint block and the block whose header is minted.
pub const PREMINT_OFFSET: u64 = 2;

/// Maximum number of salts tried by the CREATE2 salt search.
pub const SALT_SEARCH_LIMIT: u64 = 4096;

/// Bits of the deployer's trailing address byte that the predicted address
/// has to reproduce.
pub const ADDRESS_MASK: u8 = 0x15;

/// Interval between two `eth_blockNumber` polls while waiting for a block.
pub const BLOCK_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Maximum number of `eth_blockNumber` polls while waiting for a block.
pub const MAX_BLOCK_POLLS: u64 = 2_400;

/// Interval between two receipt polls.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Maximum number of receipt polls before a transaction is considered lost.
pub const MAX_RECEIPT_POLLS: u64 = 240;

/// Maximum number of times the premint step is repeated after its block
/// fell out of the `BLOCKHASH` window.
pub const MAX_PREMINT_RESTARTS: u32 = 1;

/// Default JSON-RPC endpoint of a local development node.
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";
