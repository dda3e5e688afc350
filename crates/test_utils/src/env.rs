//! JSON-RPC endpoints for tests against remote nodes.

/// A remote node, reached through the Alchemy endpoint in `ALCHEMY_URL`.
#[derive(Clone, Copy, Debug)]
pub enum RemoteNode {
    /// Ethereum mainnet
    EthereumMainnet,
    /// Ethereum Sepolia
    EthereumSepolia,
    /// OP Mainnet
    OpMainnet,
}

impl RemoteNode {
    /// The node's JSON-RPC URL.
    ///
    /// # Panics
    ///
    /// Panics if `ALCHEMY_URL` is not defined or is empty. It must hold the
    /// Ethereum mainnet endpoint.
    pub fn url(self) -> String {
        let mainnet = required_env_var("ALCHEMY_URL");
        match self {
            RemoteNode::EthereumMainnet => mainnet,
            RemoteNode::EthereumSepolia => mainnet.replace("mainnet", "sepolia"),
            RemoteNode::OpMainnet => mainnet.replace("eth-", "opt-"),
        }
    }
}

fn required_env_var(name: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value,
        Ok(_) => panic!("{name} environment variable is empty"),
        Err(error) => panic!("{name} environment variable: {error}"),
    }
}
