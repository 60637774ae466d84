//! Encoding utilities for Safe signatures

mod packed;

pub use packed::{encode_packed, PackedParam};
