use std::fmt;

use alloy::primitives::{Address, TxHash};
use clap::ValueEnum;

use crate::chain::{Allowlist, CallError, OnboardingChain};

/// The kind of operator being onboarded. Fixes the operator set and allowlist it joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OperatorType {
    Validator,
    /// Bridging service provider.
    Bsp,
    /// Messaging service provider.
    Msp,
}

impl OperatorType {
    pub const fn operator_set_id(&self) -> u32 {
        match self {
            Self::Validator => 0,
            Self::Bsp => 1,
            Self::Msp => 2,
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Validator => "Validator",
            Self::Bsp => "BSP",
            Self::Msp => "MSP",
        }
    }

    const fn allowlist(&self) -> Allowlist {
        match self {
            Self::Validator => Allowlist::Validators,
            Self::Bsp => Allowlist::Bsps,
            Self::Msp => Allowlist::Msps,
        }
    }

    pub async fn is_allowlisted<C: OnboardingChain>(
        &self,
        chain: &C,
        allowlist: Address,
        operator: Address,
    ) -> Result<bool, CallError> {
        chain.is_allowlisted(allowlist, self.allowlist(), operator).await
    }

    pub async fn add_to_allowlist<C: OnboardingChain>(
        &self,
        chain: &C,
        allowlist: Address,
        operator: Address,
    ) -> Result<TxHash, CallError> {
        chain.add_to_allowlist(allowlist, self.allowlist(), operator).await
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
