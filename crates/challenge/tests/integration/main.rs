mod eth_chain;
mod header;
mod resolver;
mod runner;

use headsmith_block_header::RemoteBlockHeader;
use headsmith_rpc_eth::block::Block;
use headsmith_test_utils::fixtures::cancun_block;

/// The Cancun fixture block, converted as if fetched from a node.
fn cancun_header() -> RemoteBlockHeader {
    let block: Block = serde_json::from_value(cancun_block()).expect("valid fixture");
    RemoteBlockHeader::from(block)
}
