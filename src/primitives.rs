use alloy::primitives::{Address, Bytes};

use crate::contracts::eigenlayer::IAllocationManager::{OperatorSet, RegisterParams};

/// The operator being onboarded. The signing key stays with the chain client's wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorIdentity {
    /// The operator's account on the staking network.
    pub address: Address,
    /// The operator's account on the secondary chain, sent as the registration payload.
    pub cross_chain_address: Bytes,
}

impl OperatorIdentity {
    pub fn new(address: Address, cross_chain_address: impl Into<Bytes>) -> Self {
        Self { address, cross_chain_address: cross_chain_address.into() }
    }
}

/// An operator-set registration against the service's allocation registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub target_service: Address,
    pub operator_set_ids: Vec<u32>,
    pub payload: Bytes,
}

impl RegistrationRequest {
    /// Build the request for a single operator set, carrying the operator's cross-chain address.
    pub fn new(identity: &OperatorIdentity, target_service: Address, operator_set_id: u32) -> Self {
        Self {
            target_service,
            operator_set_ids: vec![operator_set_id],
            payload: identity.cross_chain_address.clone(),
        }
    }

    /// The operator set this request targets.
    pub fn operator_set(&self) -> OperatorSet {
        OperatorSet { avs: self.target_service, id: self.operator_set_ids[0] }
    }
}

impl From<&RegistrationRequest> for RegisterParams {
    fn from(request: &RegistrationRequest) -> Self {
        Self {
            avs: request.target_service,
            operatorSetIds: request.operator_set_ids.clone(),
            data: request.payload.clone(),
        }
    }
}
