use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    /// Allowlist surface of the service manager. Each operator type has its own list and
    /// only the service owner can add operators to it.
    interface IServiceAllowlist {
        function addValidatorToAllowlist(address validator) external;
        function addBspToAllowlist(address bsp) external;
        function addMspToAllowlist(address msp) external;

        function validatorsAllowlist(address validator) external view returns (bool);
        function bspsAllowlist(address bsp) external view returns (bool);
        function mspsAllowlist(address msp) external view returns (bool);

        error OnlyOwner();
        error OperatorNotInAllowlist();
        error CallerIsNotValidator();
    }
}
