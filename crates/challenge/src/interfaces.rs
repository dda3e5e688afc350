//! ABI of the challenge contracts.

alloy_sol_types::sol! {
    /// Contract that mints a flag for the RLP-encoded header of the block two
    /// blocks after the caller's premint.
    interface IHeaderChallenge {
        function preMintFlag() external;
        function mintFlag(bytes calldata header) external;
    }

    /// Factory that deploys creation code with CREATE2.
    interface IFactory {
        function deployWithSalt(bytes32 salt, bytes calldata bytecode) external returns (address);
    }

    /// Contract deployed through the factory, which mints on behalf of the
    /// transaction origin.
    interface IFactoryChild {
        function callMint() external;
    }

    /// Built-in revert reason.
    error Error(string message);
}
