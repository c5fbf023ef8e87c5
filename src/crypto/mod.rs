//! Cryptographic encodings for the claim orchestrator
//!
//! Provides:
//! - Challenge binding of a proof to the submitting address
//! - Re-encoding of prover output into verifier calldata

mod challenge;
mod encoding;

pub use challenge::*;
pub use encoding::*;

#[cfg(test)]
mod tests;
