//! Solidity `abi.encodePacked` for the parameter types the Safe signing flow needs
//!
//! Every parameter is first ABI-encoded on its own with the standard 32-byte
//! word layout (as if it were the single argument of a call), and the
//! meaningful bytes are then sliced out of that encoding:
//!
//! | parameter            | bytes kept                                      |
//! |----------------------|-------------------------------------------------|
//! | `uintN` / `intN`     | last `N / 8` bytes of the word                  |
//! | `address`            | last 20 bytes of the word                       |
//! | `bytesN`             | first `N` bytes of the word                     |
//! | `bytes` / `string`   | `length` bytes following the length word        |
//! | `T[]` (elementary T) | every element word, offset and count stripped   |
//!
//! The slices are concatenated in input order with no padding between them.
//!
//! The dynamic-type rules read the length word at a fixed offset of the
//! standalone encoding, so at most one dynamic parameter (`bytes`, `string` or
//! an array) is accepted per call. This is not a general-purpose packer.

use alloy::primitives::{Address, Bytes, B256, I256, U256};
use alloy_dyn_abi::DynSolValue;

use crate::error::{Error, Result};

/// Size of a standard ABI word
const WORD: usize = 32;

/// Size of an address
const ADDRESS_LEN: usize = 20;

/// A single value to be packed, tagged with its Solidity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackedParam {
    /// `uintN`, `N` in 8..=256 and a multiple of 8
    Uint { bits: usize, value: U256 },
    /// `intN`, `N` in 8..=256 and a multiple of 8
    Int { bits: usize, value: I256 },
    /// `bytesN`; `value` holds the `size` meaningful bytes left-aligned
    FixedBytes { size: usize, value: B256 },
    /// Dynamic `bytes`
    Bytes(Bytes),
    /// Dynamic `string`
    String(String),
    /// `address`
    Address(Address),
    /// Dynamic array of one elementary type
    Array(Vec<PackedParam>),
}

impl PackedParam {
    /// `uint256`, the width used when a Solidity `uint` has no explicit size
    pub fn uint256(value: U256) -> Self {
        PackedParam::Uint { bits: 256, value }
    }

    /// `uint8`
    pub fn uint8(value: u8) -> Self {
        PackedParam::Uint {
            bits: 8,
            value: U256::from(value),
        }
    }

    /// `bytesN` built from a slice of exactly `N` bytes
    pub fn fixed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() || bytes.len() > WORD {
            return Err(Error::Encoding(format!(
                "bytes{} is not a valid fixed-size byte type",
                bytes.len()
            )));
        }
        let mut padded = [0u8; WORD];
        padded[..bytes.len()].copy_from_slice(bytes);
        Ok(PackedParam::FixedBytes {
            size: bytes.len(),
            value: B256::from(padded),
        })
    }

    /// Returns true for `bytes`, `string` and arrays
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            PackedParam::Bytes(_) | PackedParam::String(_) | PackedParam::Array(_)
        )
    }

    /// Solidity type name, used in error messages
    pub fn type_name(&self) -> String {
        match self {
            PackedParam::Uint { bits, .. } => format!("uint{bits}"),
            PackedParam::Int { bits, .. } => format!("int{bits}"),
            PackedParam::FixedBytes { size, .. } => format!("bytes{size}"),
            PackedParam::Bytes(_) => "bytes".to_string(),
            PackedParam::String(_) => "string".to_string(),
            PackedParam::Address(_) => "address".to_string(),
            PackedParam::Array(items) => match items.first() {
                Some(first) => format!("{}[]", first.type_name()),
                None => "[]".to_string(),
            },
        }
    }

    /// Packs this parameter on its own
    pub fn encode(&self) -> Result<Vec<u8>> {
        let standard = DynSolValue::Tuple(vec![self.to_sol_value()?]).abi_encode_params();

        let packed = match self {
            PackedParam::Bytes(_) | PackedParam::String(_) => {
                // offset word | length word | data (right-padded)
                let length = U256::from_be_slice(&standard[WORD..2 * WORD]).saturating_to::<usize>();
                standard[2 * WORD..2 * WORD + length].to_vec()
            }
            // offset word | element count word | element words
            PackedParam::Array(_) => standard[2 * WORD..].to_vec(),
            PackedParam::FixedBytes { size, .. } => standard[..*size].to_vec(),
            PackedParam::Uint { bits, .. } | PackedParam::Int { bits, .. } => {
                standard[WORD - bits / 8..].to_vec()
            }
            PackedParam::Address(_) => standard[WORD - ADDRESS_LEN..].to_vec(),
        };

        Ok(packed)
    }

    /// Validates the parameter and converts it to its dynamic ABI value
    fn to_sol_value(&self) -> Result<DynSolValue> {
        match self {
            PackedParam::Uint { bits, value } => {
                check_int_width(*bits, "uint")?;
                if value.bit_len() > *bits {
                    return Err(Error::Encoding(format!(
                        "value {value} does not fit in uint{bits}"
                    )));
                }
                Ok(DynSolValue::Uint(*value, *bits))
            }
            PackedParam::Int { bits, value } => {
                check_int_width(*bits, "int")?;
                let raw = value.into_raw();
                let magnitude = if value.is_negative() { !raw } else { raw };
                if magnitude.bit_len() >= *bits {
                    return Err(Error::Encoding(format!(
                        "value {value} does not fit in int{bits}"
                    )));
                }
                Ok(DynSolValue::Int(*value, *bits))
            }
            PackedParam::FixedBytes { size, value } => {
                if *size == 0 || *size > WORD {
                    return Err(Error::Encoding(format!(
                        "bytes{size} is not a valid fixed-size byte type"
                    )));
                }
                if value[*size..].iter().any(|b| *b != 0) {
                    return Err(Error::Encoding(format!(
                        "bytes{size} value has data past its declared size"
                    )));
                }
                Ok(DynSolValue::FixedBytes(*value, *size))
            }
            PackedParam::Bytes(bytes) => Ok(DynSolValue::Bytes(bytes.to_vec())),
            PackedParam::String(s) => Ok(DynSolValue::String(s.clone())),
            PackedParam::Address(address) => Ok(DynSolValue::Address(*address)),
            PackedParam::Array(items) => {
                if let Some(first) = items.first() {
                    let element = first.type_name();
                    for item in items {
                        if item.is_dynamic() {
                            return Err(Error::Encoding(format!(
                                "arrays of {} cannot be packed",
                                item.type_name()
                            )));
                        }
                        if item.type_name() != element {
                            return Err(Error::Encoding(format!(
                                "array mixes {} and {} elements",
                                element,
                                item.type_name()
                            )));
                        }
                    }
                }
                let values = items
                    .iter()
                    .map(PackedParam::to_sol_value)
                    .collect::<Result<Vec<_>>>()?;
                Ok(DynSolValue::Array(values))
            }
        }
    }
}

fn check_int_width(bits: usize, prefix: &str) -> Result<()> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(Error::Encoding(format!(
            "{prefix}{bits} is not a valid integer type"
        )));
    }
    Ok(())
}

/// Packs `params` in order, equivalent to Solidity's `abi.encodePacked(...)`
///
/// Fails with [`Error::Encoding`] on a malformed parameter or when more than
/// one dynamic parameter is supplied.
pub fn encode_packed(params: &[PackedParam]) -> Result<Bytes> {
    let dynamic = params.iter().filter(|p| p.is_dynamic()).count();
    if dynamic > 1 {
        return Err(Error::Encoding(format!(
            "at most one dynamic parameter can be packed per call, got {dynamic}"
        )));
    }

    let mut packed = Vec::new();
    for param in params {
        packed.extend(param.encode()?);
    }

    Ok(Bytes::from(packed))
}
