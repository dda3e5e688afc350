use anyhow::anyhow;
use clap::Args;
use headsmith_block_header::{Era, RemoteBlockHeader, encode_header};
use headsmith_block_variant::ranked_variants;
use headsmith_chain_l1::chains::chain_config;
use headsmith_challenge::HeaderResolver;
use headsmith_primitives::{Bytes, keccak256};
use headsmith_rpc_eth::BlockSpec;

use crate::RpcArgs;

#[derive(Args)]
pub struct HeaderArgs {
    #[command(flatten)]
    rpc: RpcArgs,
    /// Block number; defaults to the latest block
    #[arg(long)]
    block: Option<u64>,
    /// Only encodes the header for this era
    #[arg(long)]
    era: Option<Era>,
    /// Searches header variants if no era reproduces the reported hash
    #[arg(long)]
    variants: bool,
    /// Prints the RLP encodings
    #[arg(long)]
    rlp: bool,
}

pub async fn execute(args: HeaderArgs) -> anyhow::Result<()> {
    let client = args.rpc.client()?;
    let chain_id = client.chain_id().await?;
    let number = match args.block {
        Some(number) => number,
        None => client.block_number().await?,
    };

    let block = client
        .get_block_by_number(BlockSpec::Number(number))
        .await?
        .ok_or_else(|| anyhow!("Block {number} does not exist"))?;
    let header = RemoteBlockHeader::from(block);

    match header.hash {
        Some(hash) => println!("Block {number} on chain {chain_id}, reported hash {hash}"),
        None => println!("Block {number} on chain {chain_id}, no reported hash"),
    }

    let strategies = HeaderResolver::new(chain_config(chain_id)).era_strategies(&header);
    for strategy in &strategies {
        println!("  candidate: {strategy}");
    }

    let eras = args.era.map_or_else(|| Era::ALL.to_vec(), |era| vec![era]);
    let mut matched = false;
    for era in eras {
        let rlp = encode_header(&header.fields, era);
        let is_match = header.hash == Some(keccak256(&rlp));
        matched |= is_match;
        print_encoding(&era.to_string(), &rlp, is_match, args.rlp);
    }

    if !matched && args.variants {
        let reported = header
            .hash
            .ok_or_else(|| anyhow!("The node did not report a hash for block {number}"))?;

        match ranked_variants(&header.fields).find(|variant| variant.hash() == reported) {
            Some(variant) => print_encoding(
                &format!("variant {:#04x}", variant.spec.index()),
                &variant.rlp,
                true,
                args.rlp,
            ),
            None => println!("  no header variant reproduces {reported}"),
        }
    }

    Ok(())
}

fn print_encoding(label: &str, rlp: &Bytes, is_match: bool, show_rlp: bool) {
    let marker = if is_match { "match" } else { "" };
    println!("  {label:<14} {} {marker}", keccak256(rlp));
    if show_rlp {
        println!("    {rlp}");
    }
}
