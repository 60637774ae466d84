//! # poly-merger
//!
//! Merges the two complementary outcome positions of a conditional-token
//! market back into collateral, executed through a single-owner Safe.
//!
//! ## Flow
//!
//! 1. [`build_merge_call`] picks the neg-risk adapter or the conditional-tokens
//!    contract and encodes `mergePositions`.
//! 2. [`Safe::sign`] reads the Safe nonce, asks the Safe for the transaction
//!    hash and signs it with the personal-message prefix. The recovery id is
//!    shifted to 31/32 and `r || s || v` is packed with [`encode_packed`].
//! 3. [`Safe::execute`] submits `execTransaction` with that signature.
//!
//! ```rust,ignore
//! use poly_merger::{merge_positions, GasOverrides, MergerConfig, PositionMergeRequest, Safe};
//!
//! let safe = Safe::new(provider, config.signer.clone(), config.safe_address, config.chain.clone());
//! let request = PositionMergeRequest::parse("1000000", condition_id, "false")?;
//!
//! let outcome = merge_positions(&safe, &request, GasOverrides::default()).await?;
//! println!("merged in {}", outcome.tx_hash);
//! ```

pub mod chain;
pub mod config;
pub mod contracts;
pub mod encoding;
pub mod error;
pub mod merge;
pub mod safe;
pub mod signing;
pub mod types;

// Re-export main types at crate root
pub use chain::{ChainConfig, MergeAddresses};
pub use config::{parse_private_key, MergerConfig, DEFAULT_RPC_URL};
pub use contracts::{IConditionalTokens, INegRiskAdapter, ISafe};
pub use encoding::{encode_packed, PackedParam};
pub use error::{Error, Result};
pub use merge::{build_merge_call, merge_positions, MergeCall, MergeOutcome, BINARY_PARTITION};
pub use safe::{Safe, SignedSafeTx};
pub use signing::{
    eth_sign_hash, normalize_v, pack_safe_signature, DigestSigner, SignatureComponents,
};
pub use types::{GasOverrides, PositionMergeRequest, SafeTxParams};

// Re-export alloy types that are commonly used
pub use alloy::network::AnyNetwork;
pub use alloy::primitives::{Address, Bytes, B256, U256};
pub use alloy::providers::Provider;
