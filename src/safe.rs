//! Safe client: transaction signing and execution
//!
//! A Safe transaction goes through three remote steps, strictly in order:
//!
//! 1. read the Safe nonce,
//! 2. ask the Safe for the transaction hash it will verify on-chain,
//! 3. submit `execTransaction` with the packed owner signature.
//!
//! The nonce is read once and never refreshed. If another transaction lands
//! on the same Safe between steps 1 and 3 the execution reverts on-chain; no
//! attempt is made to detect or recover from that here.

use alloy::network::AnyNetwork;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{PendingTransactionBuilder, Provider};
use alloy::signers::local::PrivateKeySigner;
use tracing::{debug, info};

use crate::chain::ChainConfig;
use crate::contracts::ISafe;
use crate::error::{Error, Result};
use crate::signing::{eth_sign_hash, DigestSigner};
use crate::types::{GasOverrides, SafeTxParams};

/// A Safe transaction together with the owner signature over its hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedSafeTx {
    /// Parameters that were hashed
    pub params: SafeTxParams,
    /// Hash returned by `getTransactionHash`
    pub safe_tx_hash: B256,
    /// Packed 65-byte signature
    pub signature: Bytes,
}

/// Safe client for a single-owner (1/1 threshold) Safe
pub struct Safe<P, S = PrivateKeySigner> {
    /// The provider for RPC calls
    provider: P,
    /// The owner key signing Safe transactions
    signer: S,
    /// The Safe contract address
    address: Address,
    /// Chain configuration
    config: ChainConfig,
}

impl<P, S> Safe<P, S>
where
    P: Provider<AnyNetwork> + Clone + 'static,
    S: DigestSigner + Send + Sync,
{
    /// Creates a new Safe client
    pub fn new(provider: P, signer: S, address: Address, config: ChainConfig) -> Self {
        Self {
            provider,
            signer,
            address,
            config,
        }
    }

    /// Returns the Safe address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns the owner address
    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// Returns the chain configuration
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Gets the current nonce of the Safe
    pub async fn nonce(&self) -> Result<U256> {
        let safe = ISafe::new(self.address, &self.provider);
        let nonce = safe
            .nonce()
            .call()
            .await
            .map_err(|e| Error::Fetch {
                what: "nonce",
                reason: e.to_string(),
            })?;
        Ok(nonce)
    }

    /// Asks the Safe for the hash of `params`
    ///
    /// The value is computed by the contract itself, so it always matches what
    /// `execTransaction` will recompute for the same parameters.
    pub async fn transaction_hash(&self, params: &SafeTxParams) -> Result<B256> {
        let safe = ISafe::new(self.address, &self.provider);
        let hash = safe
            .getTransactionHash(
                params.to(),
                SafeTxParams::VALUE,
                params.data().clone(),
                SafeTxParams::OPERATION,
                SafeTxParams::SAFE_TX_GAS,
                SafeTxParams::BASE_GAS,
                SafeTxParams::GAS_PRICE,
                SafeTxParams::GAS_TOKEN,
                SafeTxParams::REFUND_RECEIVER,
                params.nonce(),
            )
            .call()
            .await
            .map_err(|e| Error::Fetch {
                what: "transaction hash",
                reason: e.to_string(),
            })?;
        Ok(hash)
    }

    /// Reads the nonce, hashes the call and signs the hash
    pub async fn sign(&self, to: Address, data: Bytes) -> Result<SignedSafeTx> {
        let nonce = self.nonce().await?;
        info!(safe = %self.address, nonce = %nonce, "Read Safe nonce");

        let params = SafeTxParams::call(to, data, nonce);
        let safe_tx_hash = self.transaction_hash(&params).await?;
        info!(safe_tx_hash = %safe_tx_hash, "Computed Safe transaction hash");

        let signature = eth_sign_hash(&self.signer, safe_tx_hash).await?;
        debug!(signer = %self.signer.address(), signature = %signature, "Signed Safe transaction");

        Ok(SignedSafeTx {
            params,
            safe_tx_hash,
            signature,
        })
    }

    /// Submits `execTransaction` and returns the pending transaction
    ///
    /// No retries are made and the receipt is not awaited.
    pub async fn execute(
        &self,
        signed: &SignedSafeTx,
        overrides: GasOverrides,
    ) -> Result<PendingTransactionBuilder<AnyNetwork>> {
        let safe = ISafe::new(self.address, &self.provider);

        let mut builder = safe.execTransaction(
            signed.params.to(),
            SafeTxParams::VALUE,
            signed.params.data().clone(),
            SafeTxParams::OPERATION,
            SafeTxParams::SAFE_TX_GAS,
            SafeTxParams::BASE_GAS,
            SafeTxParams::GAS_PRICE,
            SafeTxParams::GAS_TOKEN,
            SafeTxParams::REFUND_RECEIVER,
            signed.signature.clone(),
        );

        if let Some(gas_limit) = overrides.gas_limit {
            builder = builder.gas(gas_limit);
        }
        if let Some(gas_price) = overrides.gas_price {
            builder = builder.gas_price(gas_price);
        }

        let pending_tx = builder
            .send()
            .await
            .map_err(|e| Error::ExecutionFailed {
                reason: e.to_string(),
            })?;

        info!(tx_hash = %pending_tx.tx_hash(), "Submitted execTransaction");

        Ok(pending_tx)
    }

    /// Signs and submits a call in one go
    pub async fn sign_and_execute(
        &self,
        to: Address,
        data: Bytes,
        overrides: GasOverrides,
    ) -> Result<(SignedSafeTx, PendingTransactionBuilder<AnyNetwork>)> {
        let signed = self.sign(to, data).await?;
        let pending_tx = self.execute(&signed, overrides).await?;
        Ok((signed, pending_tx))
    }
}
