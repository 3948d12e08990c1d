use alloy::primitives::{Address, U256};
use tracing::info;

use crate::{
    chain::OnboardingChain,
    contracts::{ContractResolver, Deployments},
    primitives::OperatorIdentity,
};

mod error;
pub use error::OnboardError;

mod operator;
pub use operator::OperatorType;

mod progress;
pub use progress::Progress;

pub mod registration;
use registration::{AllowlistOutcome, DelegationOutcome, OperatorSetOutcome};

pub mod staking;
use staking::StakeReceipt;

/// Stages of an onboarding run, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    ContractsLoaded,
    Staked,
    DelegationRegistered,
    ServiceRegistered,
    Complete,
}

/// Summary of a completed onboarding run.
#[derive(Debug, Clone)]
pub struct OnboardingReport {
    pub operator: Address,
    pub operator_type: OperatorType,
    pub stakes: Vec<StakeReceipt>,
    pub delegation: DelegationOutcome,
    pub shares: Vec<(Address, U256)>,
    pub allowlist: AllowlistOutcome,
    pub operator_set: OperatorSetOutcome,
    pub progress: Progress,
}

/// Drives a single operator through staking, delegation registration and service registration.
///
/// Phases run strictly in order and every call is awaited before the next one is made. The
/// first failure stops the run; whatever was already committed on-chain stays committed.
#[derive(Debug)]
pub struct Orchestrator<C, R> {
    chain: C,
    resolver: R,
    identity: OperatorIdentity,
    operator_type: OperatorType,
    stage: Stage,
    progress: Progress,
}

impl<C, R> Orchestrator<C, R>
where
    C: OnboardingChain,
    R: ContractResolver,
{
    pub fn new(chain: C, resolver: R, identity: OperatorIdentity, operator_type: OperatorType) -> Self {
        Self {
            chain,
            resolver,
            identity,
            operator_type,
            stage: Stage::Init,
            progress: Progress::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[cfg(test)]
    pub(crate) fn chain(&self) -> &C {
        &self.chain
    }

    /// Run every phase against the registries deployed on `network`.
    pub async fn run(&mut self, network: &str) -> Result<OnboardingReport, OnboardError> {
        self.run_phases(network)
            .await
            .map_err(|source| OnboardError::Phase { stage: self.stage, source: Box::new(source) })
    }

    async fn run_phases(&mut self, network: &str) -> Result<OnboardingReport, OnboardError> {
        let name = self.operator_type.display_name();
        let operator = self.identity.address;
        info!(%operator, %network, "=== Signing up {} ===", name);

        info!("Loading contracts");
        let deployments = self.resolver.resolve(network)?;
        info!(
            strategies = deployments.strategies.len(),
            delegation_manager = %deployments.delegation_manager,
            allocation_manager = %deployments.allocation_manager,
            service_manager = %deployments.service_manager,
            "Contracts loaded"
        );
        self.complete(Stage::ContractsLoaded);

        info!("Staking tokens into strategies");
        let stakes = staking::stake_into_strategies(
            &self.chain,
            &deployments,
            operator,
            &mut self.progress,
        )
        .await?;
        self.stage = Stage::Staked;

        info!("Registering as staking-protocol operator");
        let delegation =
            registration::ensure_delegation_registered(&self.chain, &deployments, &self.identity)
                .await?;
        let shares =
            registration::log_operator_shares(&self.chain, &deployments, operator).await?;
        self.complete(Stage::DelegationRegistered);

        let (allowlist, operator_set) = self.register_with_service(&deployments).await?;
        self.complete(Stage::ServiceRegistered);

        self.stage = Stage::Complete;
        info!(
            %operator,
            operator_type = name,
            cross_chain_address = %self.identity.cross_chain_address,
            "{} sign-up complete ({}/{} steps)",
            name,
            self.progress.completed(),
            self.progress.total()
        );

        Ok(OnboardingReport {
            operator,
            operator_type: self.operator_type,
            stakes,
            delegation,
            shares,
            allowlist,
            operator_set,
            progress: self.progress,
        })
    }

    async fn register_with_service(
        &self,
        deployments: &Deployments,
    ) -> Result<(AllowlistOutcome, OperatorSetOutcome), OnboardError> {
        info!("Registering with the service as {}", self.operator_type);

        // The service rejects operator-set registrations from operators missing from its allowlist.
        let allowlist = registration::ensure_allowlisted(
            &self.chain,
            deployments,
            &self.identity,
            self.operator_type,
        )
        .await?;
        let operator_set = registration::register_for_operator_set(
            &self.chain,
            deployments,
            &self.identity,
            self.operator_type,
        )
        .await?;

        Ok((allowlist, operator_set))
    }

    fn complete(&mut self, stage: Stage) {
        self.stage = stage;
        self.progress.advance();
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, bytes, Address, U256};

    use super::{progress::TOTAL_STEPS, *};
    use crate::{
        chain::{
            mock::{Call, MockChain},
            Allowlist,
        },
        contracts::ResolutionError,
    };

    const STRATEGY: Address = Address::with_last_byte(0x51);
    const TOKEN: Address = Address::with_last_byte(0x71);

    struct TestResolver(Vec<Address>);

    impl ContractResolver for TestResolver {
        fn resolve(&self, network: &str) -> Result<Deployments, ResolutionError> {
            if network != "test" {
                return Err(ResolutionError::UnknownNetwork(network.to_string()));
            }

            Ok(Deployments {
                strategies: self.0.clone(),
                strategy_manager: Address::with_last_byte(0xa0),
                delegation_manager: Address::with_last_byte(0xa1),
                allocation_manager: Address::with_last_byte(0xa2),
                service_manager: Address::with_last_byte(0xa3),
                allowlist: Address::with_last_byte(0xa3),
            })
        }
    }

    fn identity() -> OperatorIdentity {
        OperatorIdentity::new(
            address!("90F79bf6EB2c4f870365E785982E1f101E93b906"),
            bytes!("15d34AAf54267DB7D7c367839AAf71A00a2C6A65"),
        )
    }

    #[tokio::test]
    async fn test_full_sign_up() {
        let _ = tracing_subscriber::fmt::try_init();
        let chain = MockChain::default().with_strategy(STRATEGY, TOKEN, U256::from(100));
        let mut orchestrator =
            Orchestrator::new(chain, TestResolver(vec![STRATEGY]), identity(), OperatorType::Msp);

        let report = orchestrator.run("test").await.expect("sign-up succeeds");

        assert_eq!(orchestrator.stage(), Stage::Complete);
        assert_eq!(report.progress.completed(), TOTAL_STEPS);
        assert_eq!(report.operator, identity().address);
        assert_eq!(report.operator_type.display_name(), "MSP");
        assert_eq!(report.stakes.len(), 1);
        assert_eq!(report.stakes[0].amount, U256::from(10));
        assert_eq!(report.shares, vec![(STRATEGY, U256::from(10))]);
        assert_eq!(report.delegation, DelegationOutcome::Registered);

        let calls = orchestrator.chain().calls();
        assert_eq!(calls.len(), 5);
        assert!(matches!(calls[0], Call::Approve { amount, .. } if amount == U256::from(10)));
        assert!(matches!(calls[1], Call::Deposit { amount, .. } if amount == U256::from(10)));
        assert!(matches!(calls[2], Call::RegisterAsOperator { .. }));
        assert_eq!(calls[3], Call::AddToAllowlist {
            list: Allowlist::Msps,
            operator: identity().address
        });
        assert!(
            matches!(&calls[4], Call::RegisterForOperatorSets { request, .. } if request.operator_set_ids == [2])
        );
    }

    #[tokio::test]
    async fn test_already_registered_operator_completes() {
        let chain = MockChain::default()
            .with_strategy(STRATEGY, TOKEN, U256::from(100))
            .with_operator(identity().address);
        let mut orchestrator = Orchestrator::new(
            chain,
            TestResolver(vec![STRATEGY]),
            identity(),
            OperatorType::Validator,
        );

        let report = orchestrator.run("test").await.expect("sign-up succeeds");

        assert_eq!(report.delegation, DelegationOutcome::AlreadyRegistered);
        assert_eq!(orchestrator.stage(), Stage::Complete);
        assert_eq!(orchestrator.progress().completed(), TOTAL_STEPS);
        assert!(!orchestrator
            .chain()
            .calls()
            .iter()
            .any(|call| matches!(call, Call::RegisterAsOperator { .. })));
    }

    #[tokio::test]
    async fn test_no_strategies() {
        let mut orchestrator = Orchestrator::new(
            MockChain::default(),
            TestResolver(vec![]),
            identity(),
            OperatorType::Bsp,
        );

        let report = orchestrator.run("test").await.expect("sign-up succeeds");

        assert!(report.stakes.is_empty());
        assert_eq!(report.progress.completed(), TOTAL_STEPS);
        assert!(!orchestrator
            .chain()
            .calls()
            .iter()
            .any(|call| matches!(call, Call::Approve { .. } | Call::Deposit { .. })));
    }

    #[tokio::test]
    async fn test_unknown_network_stops_before_any_call() {
        let mut orchestrator = Orchestrator::new(
            MockChain::default().with_strategy(STRATEGY, TOKEN, U256::from(100)),
            TestResolver(vec![STRATEGY]),
            identity(),
            OperatorType::Validator,
        );

        let err = orchestrator.run("mainnet").await.unwrap_err();

        assert!(matches!(err, OnboardError::Phase { stage: Stage::Init, .. }));
        assert!(matches!(err.root(), OnboardError::Resolution(ResolutionError::UnknownNetwork(_))));
        assert_eq!(orchestrator.progress().completed(), 0);
        assert!(orchestrator.chain().calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_halts_in_place() {
        let chain = MockChain::default()
            .with_strategy(STRATEGY, TOKEN, U256::from(100))
            .failing("register_as_operator");
        let mut orchestrator = Orchestrator::new(
            chain,
            TestResolver(vec![STRATEGY]),
            identity(),
            OperatorType::Validator,
        );

        let err = orchestrator.run("test").await.unwrap_err();

        assert!(matches!(err, OnboardError::Phase { stage: Stage::Staked, .. }));
        assert_eq!(orchestrator.progress().completed(), 2);
        // the deposit is not rolled back and nothing after the failure is sent
        let calls = orchestrator.chain().calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[1], Call::Deposit { .. }));
    }

    #[tokio::test]
    async fn test_zero_balance_fails_run() {
        let chain = MockChain::default().with_strategy(STRATEGY, TOKEN, U256::ZERO);
        let mut orchestrator = Orchestrator::new(
            chain,
            TestResolver(vec![STRATEGY]),
            identity(),
            OperatorType::Validator,
        );

        let err = orchestrator.run("test").await.unwrap_err();

        assert!(matches!(err.root(), OnboardError::NoBalance { strategy, .. } if *strategy == STRATEGY));
        assert_eq!(orchestrator.stage(), Stage::ContractsLoaded);
        assert_eq!(orchestrator.progress().completed(), 1);
    }

    #[tokio::test]
    async fn test_rerun_skips_registrations() {
        let identity = identity();
        let chain = MockChain::default()
            .with_strategy(STRATEGY, TOKEN, U256::from(1_000))
            .with_operator(identity.address)
            .with_allowlisted(Allowlist::Bsps, identity.address)
            .with_member(OperatorType::Bsp.operator_set_id(), identity.address);
        let mut orchestrator =
            Orchestrator::new(chain, TestResolver(vec![STRATEGY]), identity, OperatorType::Bsp);

        let report = orchestrator.run("test").await.expect("re-run succeeds");

        assert_eq!(report.allowlist, AllowlistOutcome::AlreadyAllowlisted);
        assert_eq!(report.operator_set, OperatorSetOutcome::AlreadyMember);
        // staking is never skipped: a re-run tops up the deposit
        assert_eq!(orchestrator.chain().calls().len(), 2);
    }
}
