//! Safe transaction parameters

use alloy::primitives::{Address, Bytes, U256};

/// Parameters of a Safe transaction as hashed and executed by the wallet
///
/// Only `to`, `data` and `nonce` vary. Value, operation, the gas refund fields
/// and the refund token/receiver are fixed to zero: the Safe pays nothing back
/// to the submitter and the call is never a delegate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeTxParams {
    to: Address,
    data: Bytes,
    nonce: U256,
}

impl SafeTxParams {
    /// ETH value forwarded with the call
    pub const VALUE: U256 = U256::ZERO;
    /// Operation type: 0 is a plain call, a delegate call is never made
    pub const OPERATION: u8 = 0;
    /// Gas reserved for the inner call (0 = all available)
    pub const SAFE_TX_GAS: U256 = U256::ZERO;
    /// Gas overhead used for refunds
    pub const BASE_GAS: U256 = U256::ZERO;
    /// Refund gas price
    pub const GAS_PRICE: U256 = U256::ZERO;
    /// Refund token (zero address = native token)
    pub const GAS_TOKEN: Address = Address::ZERO;
    /// Refund receiver (zero address = tx.origin)
    pub const REFUND_RECEIVER: Address = Address::ZERO;

    /// Creates the parameters for a plain call at the given Safe nonce
    pub fn call(to: Address, data: impl Into<Bytes>, nonce: U256) -> Self {
        Self {
            to,
            data: data.into(),
            nonce,
        }
    }

    /// Target address
    pub fn to(&self) -> Address {
        self.to
    }

    /// Calldata
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Safe nonce
    pub fn nonce(&self) -> U256 {
        self.nonce
    }
}

/// Overrides for the outer transaction that submits `execTransaction`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasOverrides {
    /// Gas limit; estimated by the provider when unset
    pub gas_limit: Option<u64>,
    /// Legacy gas price in wei; filled by the provider when unset
    pub gas_price: Option<u128>,
}

impl GasOverrides {
    /// Sets the gas limit
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Sets the gas price
    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }
}
