use std::{collections::HashMap, fs, path::Path};

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod eigenlayer;
pub mod erc20;
pub mod service;

/// Addresses of every registry the onboarding flow touches on a given network.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deployments {
    /// Strategies to stake into, in the order they are staked.
    #[serde(default)]
    pub strategies: Vec<Address>,
    pub strategy_manager: Address,
    pub delegation_manager: Address,
    pub allocation_manager: Address,
    pub service_manager: Address,
    /// The contract holding the per-operator-type allowlists. Usually the service manager itself.
    pub allowlist: Address,
}

impl Deployments {
    /// Check that every registry address is set.
    pub fn validate(&self) -> Result<(), ResolutionError> {
        let required = [
            ("strategyManager", self.strategy_manager),
            ("delegationManager", self.delegation_manager),
            ("allocationManager", self.allocation_manager),
            ("serviceManager", self.service_manager),
            ("allowlist", self.allowlist),
        ];

        match required.into_iter().find(|(_, address)| address.is_zero()) {
            Some((name, _)) => Err(ResolutionError::MissingEntry(name)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("no deployments known for network `{0}`")]
    UnknownNetwork(String),
    #[error("deployment entry `{0}` is missing or zero")]
    MissingEntry(&'static str),
    #[error("failed to read deployments file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse deployments file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolves the registries deployed on a network.
pub trait ContractResolver {
    fn resolve(&self, network: &str) -> Result<Deployments, ResolutionError>;
}

impl<T: ContractResolver + ?Sized> ContractResolver for Box<T> {
    fn resolve(&self, network: &str) -> Result<Deployments, ResolutionError> {
        (**self).resolve(network)
    }
}

/// Resolver backed by the deployments compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDeployments;

impl ContractResolver for BuiltinDeployments {
    fn resolve(&self, network: &str) -> Result<Deployments, ResolutionError> {
        let deployments = deployments()
            .remove(network)
            .ok_or_else(|| ResolutionError::UnknownNetwork(network.to_string()))?;
        deployments.validate()?;
        Ok(deployments)
    }
}

/// Resolver backed by a JSON file mapping network names to [`Deployments`].
///
/// ```json
/// { "anvil": { "strategies": ["0x.."], "strategyManager": "0x..", ... } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeploymentsFile {
    networks: HashMap<String, Deployments>,
}

impl DeploymentsFile {
    /// Read and parse a deployments file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResolutionError> {
        let raw = fs::read_to_string(path)?;
        let networks = serde_json::from_str(&raw)?;
        Ok(Self { networks })
    }
}

impl ContractResolver for DeploymentsFile {
    fn resolve(&self, network: &str) -> Result<Deployments, ResolutionError> {
        let deployments = self
            .networks
            .get(network)
            .cloned()
            .ok_or_else(|| ResolutionError::UnknownNetwork(network.to_string()))?;
        deployments.validate()?;
        Ok(deployments)
    }
}

/// Pick the resolver for the given optional deployments file.
pub fn resolver_for(path: Option<&Path>) -> Result<Box<dyn ContractResolver>, ResolutionError> {
    match path {
        Some(path) => Ok(Box::new(DeploymentsFile::load(path)?)),
        None => Ok(Box::new(BuiltinDeployments)),
    }
}

pub fn deployments() -> HashMap<&'static str, Deployments> {
    let mut deployments = HashMap::new();
    deployments.insert("anvil", anvil_deployments());

    deployments
}

// Local devnet, deployed from the first anvil account.
fn anvil_deployments() -> Deployments {
    Deployments {
        strategies: vec![address!("Dc64a140Aa3E981100a9becA4E685f962f0cF6C9")],
        strategy_manager: address!("a513E6E4b8f2a923D98304ec87F64353C4D5C853"),
        delegation_manager: address!("Cf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9"),
        allocation_manager: address!("8A791620dd6260079BF849Dc5567aDC3F2FdC318"),
        service_manager: address!("B7f8BC63BbcaD18155201308C8f3540b07f84F5e"),
        allowlist: address!("B7f8BC63BbcaD18155201308C8f3540b07f84F5e"),
    }
}
