use alloy::{primitives::utils::format_ether, providers::ProviderBuilder};
use futures::future::try_join_all;
use tracing::{info, warn};

use crate::{
    chain::{ethereum::EthereumChain, OnboardingChain},
    cli::StatusCommand,
    contracts::eigenlayer::IAllocationManager::OperatorSet,
};

impl StatusCommand {
    /// Run the `status` command.
    pub async fn run(self) -> eyre::Result<()> {
        let (_, deployments) = self.network.resolve()?;

        let provider = ProviderBuilder::new().on_http(self.network.rpc_url.clone());
        let chain = EthereumChain::single_signer(provider);

        let address = self.address;
        let operator_type = self.operator_type;
        info!(?address, %operator_type, network = %self.network.network, "Checking operator status");

        if chain.is_operator(deployments.delegation_manager, address).await? {
            info!(?address, "Operator is registered in the delegation manager");
        } else {
            warn!(?address, "Operator is not registered in the delegation manager");
        }

        let shares = try_join_all(deployments.strategies.iter().map(|strategy| {
            chain.operator_shares(deployments.delegation_manager, address, *strategy)
        }))
        .await?;
        for (strategy, amount) in deployments.strategies.iter().zip(shares) {
            info!(?address, %strategy, shares = format_ether(amount), "Operator shares");
        }

        if operator_type.is_allowlisted(&chain, deployments.allowlist, address).await? {
            info!(?address, "Operator is in the {} allowlist", operator_type);
        } else {
            warn!(?address, "Operator is not in the {} allowlist", operator_type);
        }

        let operator_set =
            OperatorSet { avs: deployments.service_manager, id: operator_type.operator_set_id() };
        let member = chain
            .is_member_of_operator_set(deployments.allocation_manager, address, operator_set)
            .await?;
        if member {
            info!(?address, set_id = operator_type.operator_set_id(), "Operator is registered in the {} operator set", operator_type);
        } else {
            warn!(?address, set_id = operator_type.operator_set_id(), "Operator is not registered in the {} operator set", operator_type);
        }

        Ok(())
    }
}
