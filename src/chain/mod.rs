use alloy::{
    contract::Error as ContractError,
    primitives::{Address, TxHash, U256},
    providers::PendingTransactionError,
};
use async_trait::async_trait;
use thiserror::Error;

use crate::{contracts::eigenlayer::IAllocationManager::OperatorSet, primitives::RegistrationRequest};

/// Alloy-backed implementation of [`OnboardingChain`].
pub mod ethereum;

#[cfg(test)]
pub(crate) mod mock;

/// The per-operator-type allowlists kept by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allowlist {
    Validators,
    Bsps,
    Msps,
}

/// A failed call to one of the external registries.
#[derive(Debug, Error)]
pub enum CallError {
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error(transparent)]
    PendingTransaction(#[from] PendingTransactionError),
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Every external call the onboarding flow makes. State-changing calls return once the
/// transaction is included, with its hash.
#[async_trait]
pub trait OnboardingChain: Send + Sync {
    async fn underlying_token(&self, strategy: Address) -> Result<Address, CallError>;

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, CallError>;

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, CallError>;

    async fn deposit_into_strategy(
        &self,
        strategy_manager: Address,
        strategy: Address,
        token: Address,
        amount: U256,
    ) -> Result<TxHash, CallError>;

    async fn is_operator(
        &self,
        delegation_manager: Address,
        operator: Address,
    ) -> Result<bool, CallError>;

    async fn register_as_operator(
        &self,
        delegation_manager: Address,
        delegation_approver: Address,
        allocation_delay: u32,
        metadata_uri: &str,
    ) -> Result<TxHash, CallError>;

    async fn operator_shares(
        &self,
        delegation_manager: Address,
        operator: Address,
        strategy: Address,
    ) -> Result<U256, CallError>;

    async fn is_member_of_operator_set(
        &self,
        allocation_manager: Address,
        operator: Address,
        operator_set: OperatorSet,
    ) -> Result<bool, CallError>;

    async fn register_for_operator_sets(
        &self,
        allocation_manager: Address,
        operator: Address,
        request: &RegistrationRequest,
    ) -> Result<TxHash, CallError>;

    async fn is_allowlisted(
        &self,
        allowlist: Address,
        list: Allowlist,
        operator: Address,
    ) -> Result<bool, CallError>;

    /// Sent with the service owner's authority.
    async fn add_to_allowlist(
        &self,
        allowlist: Address,
        list: Allowlist,
        operator: Address,
    ) -> Result<TxHash, CallError>;
}
