//! ECDSA signature generation for Safe transactions
//!
//! The Safe transaction hash is signed with the `eth_sign` / personal-message
//! scheme: the signer hashes `"\x19Ethereum Signed Message:\n32" || hash`.
//! The Safe recognises such signatures by a recovery id of 31 or 32 (27/28
//! shifted by 4) and re-applies the prefix before recovering the owner.

use std::future::Future;

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::signers::Signer;

use crate::encoding::{encode_packed, PackedParam};
use crate::error::{Error, Result};

/// Length of a single-owner Safe signature: r (32) || s (32) || v (1)
pub const SAFE_SIGNATURE_LEN: usize = 65;

/// Raw `(r, s, v)` components of an ECDSA signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureComponents {
    pub r: U256,
    pub s: U256,
    pub v: u64,
}

impl SignatureComponents {
    pub fn new(r: U256, s: U256, v: u64) -> Self {
        Self { r, s, v }
    }

    /// Shifts the recovery id to the Safe's `eth_sign` range
    pub fn normalize(self) -> Result<Self> {
        Ok(Self {
            v: u64::from(normalize_v(self.v)?),
            ..self
        })
    }

    /// Packs `r || s || v` as `abi.encodePacked(uint256, uint256, uint8)`
    pub fn to_packed(&self) -> Result<Bytes> {
        let v = u8::try_from(self.v).map_err(|_| Error::InvalidRecoveryId(self.v))?;
        encode_packed(&[
            PackedParam::uint256(self.r),
            PackedParam::uint256(self.s),
            PackedParam::uint8(v),
        ])
    }
}

/// Maps a raw recovery id to the Safe's `eth_sign` convention
///
/// | raw v   | Safe v |
/// |---------|--------|
/// | 0 or 27 | 31     |
/// | 1 or 28 | 32     |
pub fn normalize_v(v: u64) -> Result<u8> {
    match v {
        0 | 1 => Ok(v as u8 + 31),
        27 | 28 => Ok(v as u8 + 4),
        _ => Err(Error::InvalidRecoveryId(v)),
    }
}

/// Normalizes `raw` and packs it into the 65-byte Safe signature
pub fn pack_safe_signature(raw: SignatureComponents) -> Result<Bytes> {
    let packed = raw.normalize()?.to_packed()?;
    debug_assert_eq!(packed.len(), SAFE_SIGNATURE_LEN);
    Ok(packed)
}

/// Signs 32-byte digests with the personal-message prefix
///
/// Implemented for every alloy [`Signer`]; other implementations may return
/// recovery ids in either the {0, 1} or the {27, 28} convention.
pub trait DigestSigner {
    /// Address of the signing key
    fn address(&self) -> Address;

    /// Signs `"\x19Ethereum Signed Message:\n32" || digest`
    fn sign_digest(&self, digest: B256) -> impl Future<Output = Result<SignatureComponents>> + Send;
}

impl<S> DigestSigner for S
where
    S: Signer + Send + Sync,
{
    fn address(&self) -> Address {
        Signer::address(self)
    }

    async fn sign_digest(&self, digest: B256) -> Result<SignatureComponents> {
        let signature = self.sign_message(digest.as_slice()).await?;
        // v is the y parity in alloy
        Ok(SignatureComponents::new(
            signature.r(),
            signature.s(),
            u64::from(signature.v()),
        ))
    }
}

/// Signs a Safe transaction hash and formats it for `execTransaction`
pub async fn eth_sign_hash<S: DigestSigner>(signer: &S, hash: B256) -> Result<Bytes> {
    let raw = signer.sign_digest(hash).await?;
    pack_safe_signature(raw)
}

/// Validates that a signature is 65 bytes and carries an `eth_sign` recovery id
pub fn validate_signature(signature: &[u8]) -> Result<()> {
    if signature.len() != SAFE_SIGNATURE_LEN {
        return Err(Error::Signing(format!(
            "Invalid signature length: expected {}, got {}",
            SAFE_SIGNATURE_LEN,
            signature.len()
        )));
    }

    let v = signature[64];
    if !matches!(v, 31 | 32) {
        return Err(Error::InvalidRecoveryId(u64::from(v)));
    }

    Ok(())
}
