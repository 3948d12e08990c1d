use alloy::{primitives::utils::format_ether, signers::local::PrivateKeySigner};
use eyre::Context;
use tracing::{error, info};

use super::signing_provider;
use crate::{
    chain::ethereum::EthereumChain, cli::SignUpCommand, common::request_confirmation,
    onboarding::Orchestrator, primitives::OperatorIdentity,
};

impl SignUpCommand {
    /// Run the `sign-up` command.
    pub async fn run(self) -> eyre::Result<()> {
        let signer = PrivateKeySigner::from_bytes(&self.operator_private_key)
            .wrap_err("valid operator private key")?;
        let owner = match self.owner_private_key {
            Some(key) => PrivateKeySigner::from_bytes(&key).wrap_err("valid owner private key")?,
            None => signer.clone(),
        };

        let identity = OperatorIdentity::new(signer.address(), self.cross_chain_address);
        // Fail on an unknown network before asking anything.
        let (resolver, deployments) = self.network.resolve()?;

        info!(
            operator = %identity.address,
            owner = %owner.address(),
            operator_type = %self.operator_type,
            network = %self.network.network,
            rpc = %self.network.rpc_url,
            strategies = deployments.strategies.len(),
            service_manager = %deployments.service_manager,
            "Signing up operator"
        );

        if !self.yes {
            request_confirmation()?;
        }

        let chain = EthereumChain::new(
            signing_provider(signer, self.network.rpc_url.clone()),
            signing_provider(owner, self.network.rpc_url.clone()),
        );

        let mut orchestrator = Orchestrator::new(chain, resolver, identity, self.operator_type);
        let report = match orchestrator.run(&self.network.network).await {
            Ok(report) => report,
            Err(err) => {
                let progress = orchestrator.progress();
                error!(
                    stage = ?orchestrator.stage(),
                    cause = %err.root(),
                    "Onboarding stopped at step {}/{}",
                    progress.completed(),
                    progress.total()
                );
                return Err(err.into());
            }
        };

        for stake in &report.stakes {
            info!(
                strategy = %stake.strategy,
                token = %stake.token,
                balance = format_ether(stake.balance),
                amount = format_ether(stake.amount),
                "Stake #{}",
                stake.index
            );
        }
        for (strategy, shares) in &report.shares {
            info!(%strategy, shares = format_ether(*shares), "Operator shares");
        }
        info!(
            operator = %report.operator,
            operator_type = %report.operator_type,
            delegation = ?report.delegation,
            allowlist = ?report.allowlist,
            operator_set = ?report.operator_set,
            "Onboarding finished ({}/{} steps)",
            report.progress.completed(),
            report.progress.total()
        );

        Ok(())
    }
}
