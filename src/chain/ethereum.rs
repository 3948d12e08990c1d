use alloy::{
    contract::Error as ContractError,
    network::Ethereum,
    primitives::{Address, TxHash, U256},
    providers::{PendingTransactionBuilder, Provider},
    sol_types::SolInterface,
    transports::http::Http,
};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{Allowlist, CallError, OnboardingChain};
use crate::{
    common::try_parse_contract_error,
    contracts::{
        eigenlayer::{
            IAllocationManager::{self, IAllocationManagerErrors, OperatorSet},
            IDelegationManager::{self, IDelegationManagerErrors},
            IStrategy,
            IStrategyManager::{self, IStrategyManagerErrors},
        },
        erc20::IERC20,
        service::IServiceAllowlist::{self, IServiceAllowlistErrors},
    },
    primitives::RegistrationRequest,
};

/// Talks to the registries over JSON-RPC.
///
/// Operator calls are signed by the `operator` provider's wallet. Allowlist insertions are
/// signed by the `owner` provider's wallet, which is the operator's when no owner key is set.
#[derive(Debug, Clone)]
pub struct EthereumChain<P> {
    operator: P,
    owner: P,
}

impl<P> EthereumChain<P>
where
    P: Provider<Http<Client>> + Clone,
{
    pub fn new(operator: P, owner: P) -> Self {
        Self { operator, owner }
    }

    /// Use the same wallet for operator and owner calls.
    pub fn single_signer(provider: P) -> Self {
        Self { operator: provider.clone(), owner: provider }
    }
}

/// Wait for a sent transaction to be included and check that it succeeded.
async fn confirm(
    call: &'static str,
    pending: PendingTransactionBuilder<Http<Client>, Ethereum>,
) -> Result<TxHash, CallError> {
    let tx_hash = *pending.tx_hash();
    debug!(call, hash = ?tx_hash, "Transaction sent, awaiting receipt...");

    let receipt = pending.get_receipt().await?;
    if !receipt.status() {
        return Err(CallError::Reverted { tx_hash });
    }

    Ok(tx_hash)
}

/// Decode a revert with the given interface, keeping the raw error when it doesn't match.
fn decode_revert<T: SolInterface>(
    err: ContractError,
    describe: fn(T) -> &'static str,
) -> CallError {
    match try_parse_contract_error::<T>(err) {
        Ok(decoded) => CallError::Rejected(describe(decoded).to_string()),
        Err(err) => CallError::Contract(err),
    }
}

fn strategy_manager_error(err: IStrategyManagerErrors) -> &'static str {
    match err {
        IStrategyManagerErrors::MaxStrategiesExceeded(_) => "maximum number of strategies reached",
        IStrategyManagerErrors::StrategyNotWhitelisted(_) => "strategy is not whitelisted",
        IStrategyManagerErrors::SharesAmountZero(_) => "deposit amount yields zero shares",
        IStrategyManagerErrors::CurrentlyPaused(_) => "strategy manager is paused",
    }
}

fn delegation_manager_error(err: IDelegationManagerErrors) -> &'static str {
    match err {
        IDelegationManagerErrors::ActivelyDelegated(_) => "operator is already registered",
        IDelegationManagerErrors::CurrentlyPaused(_) => "delegation manager is paused",
    }
}

fn allocation_manager_error(err: IAllocationManagerErrors) -> &'static str {
    match err {
        IAllocationManagerErrors::InvalidOperator(_) => "operator is not registered for delegation",
        IAllocationManagerErrors::InvalidOperatorSet(_) => "operator set does not exist",
        IAllocationManagerErrors::AlreadyMemberOfSet(_) => "operator is already registered",
        IAllocationManagerErrors::InvalidCaller(_) => "caller is not the operator",
        IAllocationManagerErrors::CurrentlyPaused(_) => "allocation manager is paused",
    }
}

fn allowlist_error(err: IServiceAllowlistErrors) -> &'static str {
    match err {
        IServiceAllowlistErrors::OnlyOwner(_) => "only the service owner can modify allowlists",
        IServiceAllowlistErrors::OperatorNotInAllowlist(_) => "operator is not allowlisted",
        IServiceAllowlistErrors::CallerIsNotValidator(_) => "caller is not a validator",
    }
}

#[async_trait]
impl<P> OnboardingChain for EthereumChain<P>
where
    P: Provider<Http<Client>> + Clone,
{
    async fn underlying_token(&self, strategy: Address) -> Result<Address, CallError> {
        let strategy = IStrategy::new(strategy, &self.operator);
        Ok(strategy.underlyingToken().call().await?.token)
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, CallError> {
        let token = IERC20::new(token, &self.operator);
        Ok(token.balanceOf(owner).call().await?._0)
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, CallError> {
        let token = IERC20::new(token, &self.operator);
        let pending = token.approve(spender, amount).send().await?;
        confirm("approve", pending).await
    }

    async fn deposit_into_strategy(
        &self,
        strategy_manager: Address,
        strategy: Address,
        token: Address,
        amount: U256,
    ) -> Result<TxHash, CallError> {
        let manager = IStrategyManager::new(strategy_manager, &self.operator);
        let pending = manager
            .depositIntoStrategy(strategy, token, amount)
            .send()
            .await
            .map_err(|e| decode_revert(e, strategy_manager_error))?;
        confirm("depositIntoStrategy", pending).await
    }

    async fn is_operator(
        &self,
        delegation_manager: Address,
        operator: Address,
    ) -> Result<bool, CallError> {
        let manager = IDelegationManager::new(delegation_manager, &self.operator);
        Ok(manager.isOperator(operator).call().await?._0)
    }

    async fn register_as_operator(
        &self,
        delegation_manager: Address,
        delegation_approver: Address,
        allocation_delay: u32,
        metadata_uri: &str,
    ) -> Result<TxHash, CallError> {
        let manager = IDelegationManager::new(delegation_manager, &self.operator);
        let pending = manager
            .registerAsOperator(delegation_approver, allocation_delay, metadata_uri.to_string())
            .send()
            .await
            .map_err(|e| decode_revert(e, delegation_manager_error))?;
        confirm("registerAsOperator", pending).await
    }

    async fn operator_shares(
        &self,
        delegation_manager: Address,
        operator: Address,
        strategy: Address,
    ) -> Result<U256, CallError> {
        let manager = IDelegationManager::new(delegation_manager, &self.operator);
        Ok(manager.operatorShares(operator, strategy).call().await?._0)
    }

    async fn is_member_of_operator_set(
        &self,
        allocation_manager: Address,
        operator: Address,
        operator_set: OperatorSet,
    ) -> Result<bool, CallError> {
        let manager = IAllocationManager::new(allocation_manager, &self.operator);
        Ok(manager.isMemberOfOperatorSet(operator, operator_set).call().await?._0)
    }

    async fn register_for_operator_sets(
        &self,
        allocation_manager: Address,
        operator: Address,
        request: &RegistrationRequest,
    ) -> Result<TxHash, CallError> {
        let manager = IAllocationManager::new(allocation_manager, &self.operator);
        let pending = manager
            .registerForOperatorSets(operator, request.into())
            .send()
            .await
            .map_err(|e| decode_revert(e, allocation_manager_error))?;
        confirm("registerForOperatorSets", pending).await
    }

    async fn is_allowlisted(
        &self,
        allowlist: Address,
        list: Allowlist,
        operator: Address,
    ) -> Result<bool, CallError> {
        let allowlist = IServiceAllowlist::new(allowlist, &self.operator);
        let listed = match list {
            Allowlist::Validators => allowlist.validatorsAllowlist(operator).call().await?._0,
            Allowlist::Bsps => allowlist.bspsAllowlist(operator).call().await?._0,
            Allowlist::Msps => allowlist.mspsAllowlist(operator).call().await?._0,
        };
        Ok(listed)
    }

    async fn add_to_allowlist(
        &self,
        allowlist: Address,
        list: Allowlist,
        operator: Address,
    ) -> Result<TxHash, CallError> {
        let allowlist = IServiceAllowlist::new(allowlist, &self.owner);
        let sent = match list {
            Allowlist::Validators => allowlist.addValidatorToAllowlist(operator).send().await,
            Allowlist::Bsps => allowlist.addBspToAllowlist(operator).send().await,
            Allowlist::Msps => allowlist.addMspToAllowlist(operator).send().await,
        };
        let pending = sent.map_err(|e| decode_revert(e, allowlist_error))?;
        confirm("addToAllowlist", pending).await
    }
}
