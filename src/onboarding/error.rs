use alloy::primitives::{Address, U256};
use thiserror::Error;

use super::Stage;
use crate::{chain::CallError, contracts::ResolutionError};

#[derive(Debug, Error)]
pub enum OnboardError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("strategy #{index} has no address")]
    InvalidStrategy { index: usize },

    #[error("operator holds no {token} for strategy {strategy}")]
    NoBalance { strategy: Address, token: Address },

    #[error("balance of {balance} {token} is too small to stake into strategy {strategy}")]
    StakeTooSmall { strategy: Address, token: Address, balance: U256 },

    #[error("{call} failed: {source}")]
    ExternalCall {
        call: &'static str,
        #[source]
        source: CallError,
    },

    /// The run stopped after reaching `stage`. Phases already committed are not undone.
    #[error("onboarding stopped after {stage:?}: {source}")]
    Phase {
        stage: Stage,
        #[source]
        source: Box<Self>,
    },
}

impl OnboardError {
    pub(crate) fn call(call: &'static str) -> impl FnOnce(CallError) -> Self {
        move |source| Self::ExternalCall { call, source }
    }

    /// The error that stopped the run, without the stage it stopped at.
    pub fn root(&self) -> &Self {
        match self {
            Self::Phase { source, .. } => source.root(),
            other => other,
        }
    }
}
