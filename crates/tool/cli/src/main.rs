mod header;
mod logger;
mod raw_header;
mod run;
mod salt;

use clap::{Args, Parser, Subcommand};
use headsmith_rpc_eth::client::EthRpcClient;

#[derive(Parser)]
#[command(
    name = "headsmith",
    version,
    about = "Reproduces block header hashes and solves the header and factory challenges"
)]
struct CliArgs {
    /// Enables verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encodes a block header and compares its hash with the reported one
    Header(header::HeaderArgs),
    /// Requests a block header encoding through the node's debug methods
    RawHeader(raw_header::RawHeaderArgs),
    /// Searches a CREATE2 salt for the factory challenge
    Salt(salt::SaltArgs),
    /// Runs the enabled challenge steps
    Run(run::RunArgs),
}

#[derive(Args)]
struct RpcArgs {
    /// JSON-RPC endpoint of the node
    #[arg(long, env = "HEADSMITH_RPC_URL")]
    url: String,
}

impl RpcArgs {
    fn client(&self) -> anyhow::Result<EthRpcClient> {
        Ok(EthRpcClient::new(&self.url, None)?)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logger::init(args.verbose)?;

    match args.command {
        Command::Header(args) => header::execute(args).await,
        Command::RawHeader(args) => raw_header::execute(args).await,
        Command::Salt(args) => salt::execute(args),
        Command::Run(args) => run::execute(args).await,
    }
}
