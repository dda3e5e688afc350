use anyhow::{anyhow, bail};
use clap::Args;
use headsmith_block_header::RemoteBlockHeader;
use headsmith_challenge::{EthRpcChain, raw_header::RawHeaderAdapter};
use headsmith_primitives::Address;
use headsmith_rpc_eth::BlockSpec;

use crate::RpcArgs;

#[derive(Args)]
pub struct RawHeaderArgs {
    #[command(flatten)]
    rpc: RpcArgs,
    /// Block number; defaults to the latest block
    #[arg(long)]
    block: Option<u64>,
}

pub async fn execute(args: RawHeaderArgs) -> anyhow::Result<()> {
    let client = args.rpc.client()?;
    let number = match args.block {
        Some(number) => number,
        None => client.block_number().await?,
    };

    let block = client
        .get_block_by_number(BlockSpec::Number(number))
        .await?
        .ok_or_else(|| anyhow!("Block {number} does not exist"))?;
    let header = RemoteBlockHeader::from(block);

    // Only reads, so the account is irrelevant
    let chain = EthRpcChain::new(client, Address::ZERO);
    let Some(raw) = RawHeaderAdapter::new()
        .fetch(&chain, header.hash, number)
        .await
    else {
        bail!("No debug method returned a header for block {number}");
    };

    let hash = headsmith_primitives::keccak256(&raw.rlp);
    println!("{}: {hash}", raw.method.name());
    match header.hash {
        Some(reported) if reported == hash => println!("  matches the reported hash"),
        Some(reported) => println!("  differs from the reported hash {reported}"),
        None => println!("  the node did not report a hash"),
    }
    println!("  {}", raw.rlp);

    Ok(())
}
