//! Signature generation for Safe transactions

mod ecdsa;

pub use ecdsa::{
    eth_sign_hash, normalize_v, pack_safe_signature, validate_signature, DigestSigner,
    SignatureComponents, SAFE_SIGNATURE_LEN,
};
