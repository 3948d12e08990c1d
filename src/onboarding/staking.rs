use alloy::primitives::{utils::format_ether, Address, U256};
use tracing::info;

use super::{OnboardError, Progress};
use crate::{chain::OnboardingChain, contracts::Deployments};

/// Only this fraction of the operator's balance is staked into each strategy.
pub const STAKE_DIVISOR: u64 = 10;

/// A completed deposit into one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeReceipt {
    pub index: usize,
    pub strategy: Address,
    pub token: Address,
    pub balance: U256,
    pub amount: U256,
}

/// The amount staked out of `balance`.
pub fn stake_amount(balance: U256) -> U256 {
    balance / U256::from(STAKE_DIVISOR)
}

/// Stake a tenth of the operator's balance into every strategy, in order. Stops at the first
/// strategy that can't be staked; deposits already made stay in place.
pub async fn stake_into_strategies<C: OnboardingChain>(
    chain: &C,
    deployments: &Deployments,
    operator: Address,
    progress: &mut Progress,
) -> Result<Vec<StakeReceipt>, OnboardError> {
    let mut receipts = Vec::with_capacity(deployments.strategies.len());

    for (index, strategy) in deployments.strategies.iter().copied().enumerate() {
        let receipt = stake(chain, deployments.strategy_manager, operator, index, strategy).await?;
        receipts.push(receipt);
    }

    if deployments.strategies.is_empty() {
        info!("No strategies configured, nothing to stake");
    }

    progress.advance();
    Ok(receipts)
}

async fn stake<C: OnboardingChain>(
    chain: &C,
    strategy_manager: Address,
    operator: Address,
    index: usize,
    strategy: Address,
) -> Result<StakeReceipt, OnboardError> {
    if strategy.is_zero() {
        return Err(OnboardError::InvalidStrategy { index });
    }

    let token =
        chain.underlying_token(strategy).await.map_err(OnboardError::call("underlyingToken"))?;
    let balance =
        chain.balance_of(token, operator).await.map_err(OnboardError::call("balanceOf"))?;

    if balance.is_zero() {
        return Err(OnboardError::NoBalance { strategy, token });
    }

    let amount = stake_amount(balance);
    if amount.is_zero() {
        return Err(OnboardError::StakeTooSmall { strategy, token, balance });
    }

    info!(%strategy, %token, balance = format_ether(balance), amount = format_ether(amount), "Staking into strategy #{index}");

    let hash = chain
        .approve(token, strategy_manager, amount)
        .await
        .map_err(OnboardError::call("approve"))?;
    info!(?hash, "Approved transfer of {} to the strategy manager", format_ether(amount));

    let hash = chain
        .deposit_into_strategy(strategy_manager, strategy, token, amount)
        .await
        .map_err(OnboardError::call("depositIntoStrategy"))?;
    info!(?hash, %strategy, "Staked {} into strategy #{index}", format_ether(amount));

    Ok(StakeReceipt { index, strategy, token, balance, amount })
}
