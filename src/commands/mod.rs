use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::Http,
};
use reqwest::{Client, Url};

use crate::{
    cli::NetworkOpts,
    contracts::{resolver_for, ContractResolver, Deployments, ResolutionError},
};

/// Module for the `sign-up` command, which runs the full onboarding flow.
pub mod sign_up;

/// Module for the read-only `status` command.
pub mod status;

impl NetworkOpts {
    /// Load the deployments of the selected network, along with the resolver they came from.
    pub fn resolve(&self) -> Result<(Box<dyn ContractResolver>, Deployments), ResolutionError> {
        let resolver = resolver_for(self.deployments.as_deref())?;
        let deployments = resolver.resolve(&self.network)?;
        Ok((resolver, deployments))
    }
}

/// Build an HTTP provider that signs with the given wallet.
fn signing_provider(signer: PrivateKeySigner, rpc_url: Url) -> impl Provider<Http<Client>> + Clone {
    ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::from(signer))
        .on_http(rpc_url)
}
