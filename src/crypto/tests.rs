//! Unit tests for the crypto module
//!
//! - Challenge binding test vectors
//! - Calldata encoding of prover output

use super::challenge::*;
use super::encoding::*;
use crate::domain::{FieldElement, GeneratedProof, RawProof};
use crate::infra::ClaimError;
use alloy::primitives::{address, U256};

// ============================================================================
// Challenge Tests
// ============================================================================

#[test]
fn test_challenge_reversal_law() {
    let actor = address!("0102030405060708090a0b0c0d0e0f1011121314");
    let challenge = bind_address(actor);
    let bytes = challenge.to_be_bytes::<32>();

    // Top 12 bytes are zero
    assert!(bytes[..12].iter().all(|b| *b == 0));
    // Least significant byte is the address's first byte
    assert_eq!(bytes[31], 0x01);
    assert_eq!(bytes[30], 0x02);
    assert_eq!(bytes[12], 0x14);
}

#[test]
fn test_challenge_known_vector() {
    // Address used in the reference deployment scripts
    let actor = address!("f754d0f4de0e815b391d997eeec5cd07e59858f0");
    let expected: U256 = "1372133569577688864461476957267755639645351728375"
        .parse()
        .unwrap();
    assert_eq!(bind_address(actor), expected);
}

#[test]
fn test_bind_rejects_wrong_length() {
    for len in [0usize, 19, 21, 32] {
        let err = bind(&vec![0xAB; len]).unwrap_err();
        assert!(matches!(err, ClaimError::InvalidAddressLength(n) if n == len));
    }
}

#[test]
fn test_bind_hex_ignores_case_and_prefix() {
    let lower = bind_hex("0xabcdef0123456789abcdef0123456789abcdef01").unwrap();
    let upper = bind_hex("ABCDEF0123456789ABCDEF0123456789ABCDEF01").unwrap();
    assert_eq!(lower, upper);

    let short = bind_hex("0xabcd").unwrap_err();
    assert!(matches!(short, ClaimError::InvalidAddressLength(2)));

    assert!(matches!(
        bind_hex("0xzz"),
        Err(ClaimError::Configuration(_))
    ));
}

// ============================================================================
// Encoding Tests
// ============================================================================

fn fe(v: u64) -> FieldElement {
    FieldElement::from(v)
}

fn sample_proof() -> GeneratedProof {
    GeneratedProof {
        proof: RawProof {
            pi_a: [fe(11), fe(12), fe(1)],
            pi_b: [[fe(21), fe(22)], [fe(23), fe(24)], [fe(1), fe(0)]],
            pi_c: [fe(31), fe(32), fe(1)],
            protocol: Some("groth16".to_string()),
            curve: Some("bn128".to_string()),
        },
        pub_signals: vec![fe(5), fe(4), fe(3), fe(2), fe(1)],
    }
}

#[test]
fn test_encode_layout() {
    let args = encode(&sample_proof());

    assert_eq!(args.a, [U256::from(11u64), U256::from(12u64)]);
    assert_eq!(args.c, [U256::from(31u64), U256::from(32u64)]);
    assert_eq!(
        args.b,
        [
            [U256::from(22u64), U256::from(21u64)],
            [U256::from(24u64), U256::from(23u64)],
        ]
    );
}

#[test]
fn test_encode_preserves_signal_order() {
    let args = encode(&sample_proof());
    let expected: Vec<U256> = [5u64, 4, 3, 2, 1].into_iter().map(U256::from).collect();
    assert_eq!(args.inputs, expected);
}

#[test]
fn test_encode_does_not_reduce_values() {
    let mut proof = sample_proof();
    proof.pub_signals = vec![FieldElement(U256::MAX)];
    proof.proof.pi_a[0] = FieldElement(U256::MAX);

    let args = encode(&proof);
    assert_eq!(args.inputs, vec![U256::MAX]);
    assert_eq!(args.a[0], U256::MAX);
}
