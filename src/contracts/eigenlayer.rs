use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]

    // Reference source code: https://github.com/Layr-Labs/eigenlayer-contracts/blob/main/src/contracts/interfaces/IStrategy.sol
    //
    // NOTE: IERC20 tokens are replaced with `address` because there's no support for it: https://docs.rs/alloy-sol-macro/latest/alloy_sol_macro/macro.sol.html#solidity

    /**
    * @title Minimal interface for an `Strategy` contract.
    * @notice Custom `Strategy` implementations may expand extensively on this interface.
    */
    interface IStrategy {
        /// @notice The underlying token for shares in this Strategy
        function underlyingToken() external view returns (address token);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]

    /**
    * @title Interface for the primary entrypoint for funds into EigenLayer.
    * @notice See the `StrategyManager` contract itself for implementation details.
    */
    interface IStrategyManager {
        /**
        * @notice Deposits `amount` of `token` into the specified `strategy`, with the resultant shares credited to `msg.sender`
        * @dev The `msg.sender` must have previously approved this contract to transfer at least `amount` of `token` on their behalf.
        */
        function depositIntoStrategy(address strategy, address token, uint256 amount) external returns (uint256 shares);

        error MaxStrategiesExceeded();
        error StrategyNotWhitelisted();
        error SharesAmountZero();
        error CurrentlyPaused();
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]

    // Reference source code: https://github.com/Layr-Labs/eigenlayer-contracts/blob/main/src/contracts/interfaces/IDelegationManager.sol
    interface IDelegationManager {
        /**
        * @notice Registers the caller as an operator in EigenLayer.
        * @param initDelegationApprover is an address that, if set, must provide a signature when stakers delegate
        * to an operator.
        * @param allocationDelay The delay before allocations take effect.
        * @param metadataURI is a URI for the operator's metadata, i.e. a link providing more details on the operator.
        */
        function registerAsOperator(address initDelegationApprover, uint32 allocationDelay, string calldata metadataURI) external;

        /// @notice Returns true is an operator has previously registered for delegation.
        function isOperator(address operator) external view returns (bool);

        /// @notice Returns the shares that an operator has delegated to them in the given strategy.
        function operatorShares(address operator, address strategy) external view returns (uint256);

        error ActivelyDelegated();
        error CurrentlyPaused();
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]

    // Reference source code: https://github.com/Layr-Labs/eigenlayer-contracts/blob/main/src/contracts/interfaces/IAllocationManager.sol
    interface IAllocationManager {
        #[derive(Debug, PartialEq, Eq)]
        struct OperatorSet {
            address avs;
            uint32 id;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct RegisterParams {
            address avs;
            uint32[] operatorSetIds;
            bytes data;
        }

        /**
        * @notice Allows an operator to register for one or more operator sets for an AVS. If the operator
        * has any stake allocated to these operator sets, it immediately becomes slashable.
        */
        function registerForOperatorSets(address operator, RegisterParams calldata params) external;

        /// @notice Returns whether the operator is a member of the given operator set.
        function isMemberOfOperatorSet(address operator, OperatorSet memory operatorSet) external view returns (bool);

        error InvalidOperator();
        error InvalidOperatorSet();
        error AlreadyMemberOfSet();
        error InvalidCaller();
        error CurrentlyPaused();
    }
}
