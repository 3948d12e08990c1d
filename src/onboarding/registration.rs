use alloy::primitives::{utils::format_ether, Address, U256};
use tracing::info;

use super::{OnboardError, OperatorType};
use crate::{
    chain::OnboardingChain,
    contracts::Deployments,
    primitives::{OperatorIdentity, RegistrationRequest},
};

/// How the delegation registration phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationOutcome {
    Registered,
    AlreadyRegistered,
}

/// How the allowlist insertion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowlistOutcome {
    Added,
    AlreadyAllowlisted,
}

/// How the operator-set registration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorSetOutcome {
    Registered,
    AlreadyMember,
}

/// Register the operator with the delegation manager unless it already is one.
///
/// Registration uses no delegation approver, no allocation delay and empty metadata.
pub async fn ensure_delegation_registered<C: OnboardingChain>(
    chain: &C,
    deployments: &Deployments,
    identity: &OperatorIdentity,
) -> Result<DelegationOutcome, OnboardError> {
    let operator = identity.address;
    let registered = chain
        .is_operator(deployments.delegation_manager, operator)
        .await
        .map_err(OnboardError::call("isOperator"))?;

    if registered {
        info!(%operator, "Operator is already registered in the delegation manager");
        return Ok(DelegationOutcome::AlreadyRegistered);
    }

    let hash = chain
        .register_as_operator(deployments.delegation_manager, Address::ZERO, 0, "")
        .await
        .map_err(OnboardError::call("registerAsOperator"))?;
    info!(%operator, ?hash, "Registered as operator in the delegation manager");

    Ok(DelegationOutcome::Registered)
}

/// Read and log the operator's shares in every strategy.
pub async fn log_operator_shares<C: OnboardingChain>(
    chain: &C,
    deployments: &Deployments,
    operator: Address,
) -> Result<Vec<(Address, U256)>, OnboardError> {
    let mut shares = Vec::with_capacity(deployments.strategies.len());

    for strategy in deployments.strategies.iter().copied() {
        let amount = chain
            .operator_shares(deployments.delegation_manager, operator, strategy)
            .await
            .map_err(OnboardError::call("operatorShares"))?;
        info!(%operator, %strategy, shares = format_ether(amount), "Operator shares");
        shares.push((strategy, amount));
    }

    Ok(shares)
}

/// Add the operator to the allowlist of its type, unless it is already on it.
pub async fn ensure_allowlisted<C: OnboardingChain>(
    chain: &C,
    deployments: &Deployments,
    identity: &OperatorIdentity,
    operator_type: OperatorType,
) -> Result<AllowlistOutcome, OnboardError> {
    let operator = identity.address;
    let listed = operator_type
        .is_allowlisted(chain, deployments.allowlist, operator)
        .await
        .map_err(OnboardError::call("isAllowlisted"))?;

    if listed {
        info!(%operator, "Operator is already in the {} allowlist", operator_type);
        return Ok(AllowlistOutcome::AlreadyAllowlisted);
    }

    let hash = operator_type
        .add_to_allowlist(chain, deployments.allowlist, operator)
        .await
        .map_err(OnboardError::call("addToAllowlist"))?;
    info!(%operator, ?hash, "Added operator to the {} allowlist", operator_type);

    Ok(AllowlistOutcome::Added)
}

/// Register the operator for its type's operator set on the service, unless it is already
/// a member. A rejection from the allocation manager is returned as an error.
pub async fn register_for_operator_set<C: OnboardingChain>(
    chain: &C,
    deployments: &Deployments,
    identity: &OperatorIdentity,
    operator_type: OperatorType,
) -> Result<OperatorSetOutcome, OnboardError> {
    let operator = identity.address;
    let request =
        RegistrationRequest::new(identity, deployments.service_manager, operator_type.operator_set_id());

    let member = chain
        .is_member_of_operator_set(deployments.allocation_manager, operator, request.operator_set())
        .await
        .map_err(OnboardError::call("isMemberOfOperatorSet"))?;

    if member {
        info!(%operator, set_id = operator_type.operator_set_id(), "Operator is already in the {} operator set", operator_type);
        return Ok(OperatorSetOutcome::AlreadyMember);
    }

    let hash = chain
        .register_for_operator_sets(deployments.allocation_manager, operator, &request)
        .await
        .map_err(OnboardError::call("registerForOperatorSets"))?;
    info!(
        %operator,
        ?hash,
        set_id = operator_type.operator_set_id(),
        payload = %request.payload,
        "Registered for the {} operator set",
        operator_type
    );

    Ok(OperatorSetOutcome::Registered)
}
