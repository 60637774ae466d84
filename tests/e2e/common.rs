//! Common test utilities for E2E tests

use alloy::network::{AnyNetwork, EthereumWallet};
use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::primitives::{address, Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::sol_types::SolCall;
use poly_merger::{ChainConfig, Safe};

/// Macro to skip tests when POLYGON_RPC_URL is not set
#[macro_export]
macro_rules! skip_if_no_rpc {
    () => {
        if std::env::var("POLYGON_RPC_URL").is_err() {
            eprintln!("Skipping test: POLYGON_RPC_URL not set");
            return;
        }
    };
}

/// Safe v1.3.0 proxy factory on Polygon
pub const PROXY_FACTORY: Address = address!("a6B71E26C5e0845f74c812102Ca7114b6a896AB2");
/// Safe v1.3.0 singleton on Polygon
pub const SAFE_SINGLETON: Address = address!("d9Db270c1B5E3Bd161E8c8503c55cEABeE709552");
/// Safe v1.3.0 compatibility fallback handler on Polygon
pub const FALLBACK_HANDLER: Address = address!("f48f2B2d2a534e402487b3ee7C18c33Aec0Fe5e4");

sol! {
    #[sol(rpc)]
    interface ISafeProxyFactory {
        function createProxyWithNonce(
            address _singleton,
            bytes memory initializer,
            uint256 saltNonce
        ) external returns (address proxy);
    }

    interface ISafeSetup {
        function setup(
            address[] calldata _owners,
            uint256 _threshold,
            address to,
            bytes calldata data,
            address fallbackHandler,
            address paymentToken,
            uint256 payment,
            address payable paymentReceiver
        ) external;
    }

    #[sol(rpc)]
    interface IConditionalTokensAdmin {
        function prepareCondition(address oracle, bytes32 questionId, uint256 outcomeSlotCount) external;
        function getConditionId(address oracle, bytes32 questionId, uint256 outcomeSlotCount) external pure returns (bytes32);
        function getOutcomeSlotCount(bytes32 conditionId) external view returns (uint256);
    }
}

/// Type alias for the wallet provider used in tests
pub type TestProvider = alloy::providers::fillers::FillProvider<
    alloy::providers::fillers::JoinFill<
        alloy::providers::fillers::JoinFill<
            alloy::providers::Identity,
            alloy::providers::fillers::JoinFill<
                alloy::providers::fillers::GasFiller,
                alloy::providers::fillers::JoinFill<
                    alloy::providers::fillers::BlobGasFiller,
                    alloy::providers::fillers::JoinFill<
                        alloy::providers::fillers::NonceFiller,
                        alloy::providers::fillers::ChainIdFiller,
                    >,
                >,
            >,
        >,
        alloy::providers::fillers::WalletFiller<EthereumWallet>,
    >,
    alloy::providers::RootProvider<AnyNetwork>,
    AnyNetwork,
>;

/// Anvil fork of Polygon with a funded owner key
pub struct TestHarness {
    pub provider: TestProvider,
    pub signer: PrivateKeySigner,
    pub _anvil: AnvilInstance,
}

impl TestHarness {
    /// Spawns Anvil forking from POLYGON_RPC_URL
    ///
    /// `ANVIL_RETRIES` and `ANVIL_TIMEOUT` are forwarded to Anvil when set.
    pub async fn new() -> Self {
        let rpc_url = std::env::var("POLYGON_RPC_URL").expect("POLYGON_RPC_URL must be set");

        let mut args = Vec::new();
        if let Ok(retries) = std::env::var("ANVIL_RETRIES") {
            args.push("--retries".to_string());
            args.push(retries);
        }
        if let Ok(timeout) = std::env::var("ANVIL_TIMEOUT") {
            args.push("--timeout".to_string());
            args.push(timeout);
        }

        let anvil = Anvil::new().fork(rpc_url).args(args).spawn();

        let signer: PrivateKeySigner = anvil.keys()[0].clone().into();

        let provider = ProviderBuilder::new()
            .network::<AnyNetwork>()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_http(anvil.endpoint_url());

        Self {
            provider,
            signer,
            _anvil: anvil,
        }
    }

    /// Returns the owner address
    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// Deploys a 1/1 Safe owned by the harness signer
    pub async fn deploy_safe(&self, salt_nonce: U256) -> Result<Address, Box<dyn std::error::Error>> {
        let initializer = ISafeSetup::setupCall {
            _owners: vec![self.signer_address()],
            _threshold: U256::from(1),
            to: Address::ZERO,
            data: Bytes::new(),
            fallbackHandler: FALLBACK_HANDLER,
            paymentToken: Address::ZERO,
            payment: U256::ZERO,
            paymentReceiver: Address::ZERO,
        }
        .abi_encode();

        let factory = ISafeProxyFactory::new(PROXY_FACTORY, &self.provider);
        let create = factory.createProxyWithNonce(SAFE_SINGLETON, initializer.into(), salt_nonce);

        // Dry run for the address, then deploy
        let safe_address = create.call().await?;
        create.send().await?.get_receipt().await?;

        let code: Bytes = self.provider.get_code_at(safe_address).await?;
        if code.is_empty() {
            return Err("Safe deployment failed: no code at expected address".into());
        }

        Ok(safe_address)
    }

    /// Creates a Safe client for the given Safe address
    pub fn safe_client(&self, safe_address: Address) -> Safe<TestProvider> {
        Safe::new(
            self.provider.clone(),
            self.signer.clone(),
            safe_address,
            ChainConfig::polygon(),
        )
    }
}
