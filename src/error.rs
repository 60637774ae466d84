//! Error types for poly-merger

use alloy::primitives::TxHash;
use thiserror::Error;

/// Result type alias for poly-merger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a position merge
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed key material, wallet address or endpoint
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied merge argument could not be parsed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A packed-encoding parameter was rejected
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The signer produced a recovery id outside {0, 1, 27, 28}
    #[error("Invalid signature recovery id: {0}")]
    InvalidRecoveryId(u64),

    /// Signature generation failed
    #[error("Failed to sign: {0}")]
    Signing(String),

    /// Failed to fetch data from the blockchain
    #[error("Failed to fetch {what}: {reason}")]
    Fetch { what: &'static str, reason: String },

    /// Submitting the Safe transaction or waiting for it failed
    #[error("Failed to submit execTransaction: {reason}")]
    ExecutionFailed { reason: String },

    /// The transaction was sent but its receipt could not be obtained
    ///
    /// The transaction may still be mined; check `tx_hash` before retrying.
    #[error("Transaction {tx_hash} was submitted but its receipt could not be fetched: {reason}")]
    ReceiptUnavailable { tx_hash: TxHash, reason: String },

    /// Failed to talk to the RPC provider
    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<alloy::transports::RpcError<alloy::transports::TransportErrorKind>> for Error {
    fn from(err: alloy::transports::RpcError<alloy::transports::TransportErrorKind>) -> Self {
        Error::Provider(err.to_string())
    }
}

impl From<alloy::contract::Error> for Error {
    fn from(err: alloy::contract::Error) -> Self {
        Error::Provider(err.to_string())
    }
}

impl From<alloy::signers::Error> for Error {
    fn from(err: alloy::signers::Error) -> Self {
        Error::Signing(err.to_string())
    }
}
