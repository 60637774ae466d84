//! Merger configuration
//!
//! Built once from operator input and validated before any network call.

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use url::Url;

use crate::chain::ChainConfig;
use crate::error::{Error, Result};

/// RPC endpoint used when none is configured
pub const DEFAULT_RPC_URL: &str = "https://polygon.llamarpc.com";

/// Everything needed to sign and submit a merge through a Safe
#[derive(Debug, Clone)]
pub struct MergerConfig {
    /// JSON-RPC endpoint
    pub rpc_url: Url,
    /// Safe owner key
    pub signer: PrivateKeySigner,
    /// Safe wallet address
    pub safe_address: Address,
    /// Chain ID and merge target addresses
    pub chain: ChainConfig,
}

impl MergerConfig {
    /// Validates raw configuration values
    ///
    /// A missing key or Safe address is a configuration error; a missing RPC
    /// URL falls back to [`DEFAULT_RPC_URL`].
    pub fn from_parts(
        rpc_url: Option<&str>,
        private_key: Option<&str>,
        safe_address: Option<&str>,
        chain: ChainConfig,
    ) -> Result<Self> {
        let private_key = private_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("private key (PK) not set".to_string()))?;
        let safe_address = safe_address
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| Error::Config("Safe address (BROWSER_ADDRESS) not set".to_string()))?;

        let rpc_url = rpc_url.unwrap_or(DEFAULT_RPC_URL);
        let rpc_url = Url::parse(rpc_url)
            .map_err(|e| Error::Config(format!("invalid RPC URL '{rpc_url}': {e}")))?;

        Ok(Self {
            rpc_url,
            signer: parse_private_key(private_key)?,
            safe_address: parse_address(safe_address)?,
            chain,
        })
    }
}

/// Parses a hex private key, with or without `0x` prefix
pub fn parse_private_key(key: &str) -> Result<PrivateKeySigner> {
    let key = key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);

    key.parse::<PrivateKeySigner>()
        .map_err(|e| Error::Config(format!("invalid private key: {e}")))
}

fn parse_address(address: &str) -> Result<Address> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|e| Error::Config(format!("invalid Safe address '{address}': {e}")))
}
