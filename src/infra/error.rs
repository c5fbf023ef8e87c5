//! Error types for the claim orchestrator

use thiserror::Error;

use crate::domain::{CircuitId, ClaimState, VerifierMode};

/// Errors that can occur while preparing or running a claim
#[derive(Error, Debug)]
pub enum ClaimError {
    /// Challenge input was not a 20-byte address
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidAddressLength(usize),

    /// Configured verifier mode label is not recognised
    #[error("unknown verifier mode: {0}")]
    UnknownVerifierMode(String),

    /// Circuit name is not in the catalogue
    #[error("unknown circuit: {0}")]
    UnknownCircuit(String),

    /// The proof service cannot satisfy the predicate with the held credentials
    #[error("unsatisfiable predicate: {0}")]
    UnsatisfiablePredicate(String),

    /// The proof service failed to build a witness or proof
    #[error("proof generation failed: {0}")]
    ProofGenerationFailed(String),

    /// A generated proof did not pass local re-verification
    #[error("local verification failed for circuit {circuit_id}")]
    LocalVerificationFailed { circuit_id: CircuitId },

    /// RPC call, transaction or confirmation failure
    #[error("chain call failed: {0}")]
    ChainCallFailed(String),

    /// Identity wallet or credential store failure
    #[error("identity wallet call failed: {0}")]
    IdentityWalletFailed(String),

    /// The request is already verified for the actor; nothing to submit
    #[error("request {request_id} already verified")]
    AlreadyVerifiedNoop { request_id: u64 },

    /// The proof request cannot be served by the configured verifier
    #[error("verifier mode {mode} cannot serve this request: {reason}")]
    ModeMismatch { mode: VerifierMode, reason: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// JSON (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClaimError {
    /// The idempotency short-circuit; a success, not a failure.
    pub fn is_noop(&self) -> bool {
        matches!(self, ClaimError::AlreadyVerifiedNoop { .. })
    }
}

/// A failed claim attempt: the error and the last state reached before it.
#[derive(Error, Debug)]
#[error("claim attempt failed after reaching {state}: {source}")]
pub struct ClaimFailure {
    pub state: ClaimState,
    #[source]
    pub source: ClaimError,
}

impl ClaimFailure {
    pub fn new(state: ClaimState, source: ClaimError) -> Self {
        Self { state, source }
    }
}

/// Result type for claim operations
pub type Result<T> = std::result::Result<T, ClaimError>;
