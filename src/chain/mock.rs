use std::collections::{HashMap, HashSet};

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Allowlist, CallError, OnboardingChain};
use crate::{contracts::eigenlayer::IAllocationManager::OperatorSet, primitives::RegistrationRequest};

/// A call observed by [`MockChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Approve { token: Address, spender: Address, amount: U256 },
    Deposit { strategy: Address, token: Address, amount: U256 },
    RegisterAsOperator { approver: Address, allocation_delay: u32, metadata_uri: String },
    RegisterForOperatorSets { operator: Address, request: RegistrationRequest },
    AddToAllowlist { list: Allowlist, operator: Address },
}

#[derive(Debug, Default)]
struct State {
    tokens: HashMap<Address, Address>,
    balances: HashMap<Address, U256>,
    shares: HashMap<Address, U256>,
    operators: HashSet<Address>,
    allowlisted: HashSet<(Allowlist, Address)>,
    members: HashSet<(u32, Address)>,
    failing: HashSet<&'static str>,
    calls: Vec<Call>,
}

/// In-memory registries that record every state-changing call.
#[derive(Debug, Default)]
pub(crate) struct MockChain {
    state: Mutex<State>,
}

impl MockChain {
    /// Register a strategy whose underlying token holds `balance` for the operator.
    pub(crate) fn with_strategy(self, strategy: Address, token: Address, balance: U256) -> Self {
        {
            let mut state = self.state.lock();
            state.tokens.insert(strategy, token);
            state.balances.insert(token, balance);
        }
        self
    }

    pub(crate) fn with_operator(self, operator: Address) -> Self {
        self.state.lock().operators.insert(operator);
        self
    }

    pub(crate) fn with_allowlisted(self, list: Allowlist, operator: Address) -> Self {
        self.state.lock().allowlisted.insert((list, operator));
        self
    }

    pub(crate) fn with_member(self, operator_set_id: u32, operator: Address) -> Self {
        self.state.lock().members.insert((operator_set_id, operator));
        self
    }

    /// Make every call to the named method fail.
    pub(crate) fn failing(self, method: &'static str) -> Self {
        self.state.lock().failing.insert(method);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    fn check(&self, method: &'static str) -> Result<(), CallError> {
        if self.state.lock().failing.contains(method) {
            return Err(CallError::Rejected(format!("{method} reverted")));
        }
        Ok(())
    }

    fn record(&self, call: Call) -> TxHash {
        let mut state = self.state.lock();
        state.calls.push(call);
        TxHash::with_last_byte(state.calls.len() as u8)
    }
}

#[async_trait]
impl OnboardingChain for MockChain {
    async fn underlying_token(&self, strategy: Address) -> Result<Address, CallError> {
        self.check("underlying_token")?;
        self.state
            .lock()
            .tokens
            .get(&strategy)
            .copied()
            .ok_or_else(|| CallError::Rejected(format!("unknown strategy {strategy}")))
    }

    async fn balance_of(&self, token: Address, _owner: Address) -> Result<U256, CallError> {
        self.check("balance_of")?;
        Ok(self.state.lock().balances.get(&token).copied().unwrap_or_default())
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, CallError> {
        self.check("approve")?;
        Ok(self.record(Call::Approve { token, spender, amount }))
    }

    async fn deposit_into_strategy(
        &self,
        _strategy_manager: Address,
        strategy: Address,
        token: Address,
        amount: U256,
    ) -> Result<TxHash, CallError> {
        self.check("deposit_into_strategy")?;
        {
            let mut state = self.state.lock();
            *state.shares.entry(strategy).or_default() += amount;
            if let Some(balance) = state.balances.get_mut(&token) {
                *balance -= amount;
            }
        }
        Ok(self.record(Call::Deposit { strategy, token, amount }))
    }

    async fn is_operator(
        &self,
        _delegation_manager: Address,
        operator: Address,
    ) -> Result<bool, CallError> {
        self.check("is_operator")?;
        Ok(self.state.lock().operators.contains(&operator))
    }

    async fn register_as_operator(
        &self,
        _delegation_manager: Address,
        delegation_approver: Address,
        allocation_delay: u32,
        metadata_uri: &str,
    ) -> Result<TxHash, CallError> {
        self.check("register_as_operator")?;
        Ok(self.record(Call::RegisterAsOperator {
            approver: delegation_approver,
            allocation_delay,
            metadata_uri: metadata_uri.to_string(),
        }))
    }

    async fn operator_shares(
        &self,
        _delegation_manager: Address,
        _operator: Address,
        strategy: Address,
    ) -> Result<U256, CallError> {
        self.check("operator_shares")?;
        Ok(self.state.lock().shares.get(&strategy).copied().unwrap_or_default())
    }

    async fn is_member_of_operator_set(
        &self,
        _allocation_manager: Address,
        operator: Address,
        operator_set: OperatorSet,
    ) -> Result<bool, CallError> {
        self.check("is_member_of_operator_set")?;
        Ok(self.state.lock().members.contains(&(operator_set.id, operator)))
    }

    async fn register_for_operator_sets(
        &self,
        _allocation_manager: Address,
        operator: Address,
        request: &RegistrationRequest,
    ) -> Result<TxHash, CallError> {
        self.check("register_for_operator_sets")?;
        Ok(self.record(Call::RegisterForOperatorSets { operator, request: request.clone() }))
    }

    async fn is_allowlisted(
        &self,
        _allowlist: Address,
        list: Allowlist,
        operator: Address,
    ) -> Result<bool, CallError> {
        self.check("is_allowlisted")?;
        Ok(self.state.lock().allowlisted.contains(&(list, operator)))
    }

    async fn add_to_allowlist(
        &self,
        _allowlist: Address,
        list: Allowlist,
        operator: Address,
    ) -> Result<TxHash, CallError> {
        self.check("add_to_allowlist")?;
        Ok(self.record(Call::AddToAllowlist { list, operator }))
    }
}
