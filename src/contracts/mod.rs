//! Contract ABI definitions for the Safe wallet and the merge targets

use alloy::sol;

sol! {
    /// The subset of the Safe interface used to sign and execute a transaction
    #[sol(rpc)]
    interface ISafe {
        /// Execute a transaction (requires valid signature)
        function execTransaction(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address payable refundReceiver,
            bytes memory signatures
        ) external payable returns (bool success);

        /// Returns the current nonce of the Safe
        function nonce() external view returns (uint256 nonce);

        /// Computes the hash of a Safe transaction
        function getTransactionHash(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            uint256 _nonce
        ) external view returns (bytes32);
    }

    /// Neg-risk adapter; merges both outcome positions of a neg-risk market
    #[sol(rpc)]
    interface INegRiskAdapter {
        function mergePositions(bytes32 conditionId, uint256 amount) external;
    }

    /// Gnosis conditional-tokens framework (CTF)
    #[sol(rpc)]
    interface IConditionalTokens {
        function mergePositions(
            address collateralToken,
            bytes32 parentCollectionId,
            bytes32 conditionId,
            uint256[] calldata partition,
            uint256 amount
        ) external;
    }
}
