//! Address-bound proof challenges
//!
//! The challenge is the 20 address bytes placed at the start of a 32-byte
//! word, read as a big-endian integer with the word's byte order reversed.
//! The verifier contract derives the same value from `msg.sender`, so it
//! must be reproduced bit-exact.

use alloy::primitives::{Address, U256};

use crate::infra::{ClaimError, Result};

/// Length of an EVM address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Challenge for an already-typed address.
///
/// The top 12 bytes of the result are zero; the low 20 bytes are the
/// address bytes in reverse order.
pub fn bind_address(address: Address) -> U256 {
    let mut word = [0u8; 32];
    word[..ADDRESS_LENGTH].copy_from_slice(address.as_slice());
    word.reverse();
    U256::from_be_bytes(word)
}

/// Challenge for raw address bytes.
pub fn bind(address: &[u8]) -> Result<U256> {
    let bytes: [u8; ADDRESS_LENGTH] = address
        .try_into()
        .map_err(|_| ClaimError::InvalidAddressLength(address.len()))?;
    Ok(bind_address(Address::from(bytes)))
}

/// Challenge for a hex address, with or without `0x`, any letter case.
pub fn bind_hex(address: &str) -> Result<U256> {
    let trimmed = address.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| {
        ClaimError::Configuration(format!("invalid hex address {address:?}: {e}"))
    })?;
    bind(&bytes)
}
