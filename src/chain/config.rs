//! Chain configuration for the merge target contracts

use alloy::primitives::{address, Address};

/// Addresses of the contracts a merge can target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeAddresses {
    /// Neg-risk adapter, target for neg-risk markets
    pub neg_risk_adapter: Address,
    /// Collateral token the positions are merged back into (USDC.e)
    pub collateral: Address,
    /// Conditional-tokens contract, target for standard markets
    pub conditional_tokens: Address,
}

impl Default for MergeAddresses {
    fn default() -> Self {
        Self::polygon()
    }
}

impl MergeAddresses {
    /// Returns the Polymarket deployment on Polygon mainnet
    pub fn polygon() -> Self {
        Self {
            neg_risk_adapter: address!("d91E80cF2E7be2e162c6513ceD06f1dD0dA35296"),
            collateral: address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
            conditional_tokens: address!("4D97DCd97eC945f40cF65F87097ACe5EA0476045"),
        }
    }

    /// Creates a custom address configuration
    pub fn custom(neg_risk_adapter: Address, collateral: Address, conditional_tokens: Address) -> Self {
        Self {
            neg_risk_adapter,
            collateral,
            conditional_tokens,
        }
    }
}

/// Chain configuration including addresses and chain ID
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Chain ID
    pub chain_id: u64,
    /// Contract addresses
    pub addresses: MergeAddresses,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::polygon()
    }
}

impl ChainConfig {
    /// Creates a chain configuration with the Polygon merge addresses
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            addresses: MergeAddresses::polygon(),
        }
    }

    /// Creates a chain configuration with custom addresses
    pub fn with_addresses(chain_id: u64, addresses: MergeAddresses) -> Self {
        Self { chain_id, addresses }
    }

    /// Returns configuration for Polygon
    pub fn polygon() -> Self {
        Self::new(chain_ids::POLYGON)
    }
}

/// Well-known chain IDs
pub mod chain_ids {
    pub const POLYGON: u64 = 137;
    pub const AMOY: u64 = 80002;
}
