//! Verifier calldata encoding of Groth16 proofs
//!
//! The prover writes G2 coordinates as `[c0, c1]`; the verifier's pairing
//! precompile expects `[c1, c0]`. A proof submitted without the swap passes
//! local verification and fails on-chain.

use alloy::primitives::U256;

use crate::domain::{GeneratedProof, OnChainProofArgs};

/// Swap the two coefficients of each G2 coordinate.
///
/// Applying it twice yields the input.
pub fn swap_g2_coefficients<T>(b: [[T; 2]; 2]) -> [[T; 2]; 2] {
    let [[b00, b01], [b10, b11]] = b;
    [[b01, b00], [b11, b10]]
}

/// Reshape a generated proof into `submitZKPResponse` arguments.
///
/// `pi_a` and `pi_c` keep their first two coordinates, `pi_b` keeps its
/// first two rows with coefficients swapped, and public signals pass
/// through in order.
pub fn encode(proof: &GeneratedProof) -> OnChainProofArgs {
    let raw = &proof.proof;
    let [a0, a1, _] = raw.pi_a;
    let [c0, c1, _] = raw.pi_c;
    let [row0, row1, _] = raw.pi_b;

    let native_b: [[U256; 2]; 2] = [
        [row0[0].to_u256(), row0[1].to_u256()],
        [row1[0].to_u256(), row1[1].to_u256()],
    ];

    OnChainProofArgs {
        inputs: proof.pub_signals.iter().map(|s| s.to_u256()).collect(),
        a: [a0.to_u256(), a1.to_u256()],
        b: swap_g2_coefficients(native_b),
        c: [c0.to_u256(), c1.to_u256()],
    }
}
