//! Proof-Gated Claim Orchestrator
//!
//! Binds a zero-knowledge credential proof to an on-chain actor, re-encodes
//! it for the verifier contract and drives the claim from credential
//! issuance through submission and (for universal verifiers) reward minting.
//!
//! ## Modules
//!
//! - [`domain`] - Core domain types (requests, proofs, modes, claim states)
//! - [`crypto`] - Challenge binding and proof calldata encoding
//! - [`request`] - Proof request builder, templates and protocol messages
//! - [`infra`] - Errors, collaborator traits and the identity agent client
//! - [`chain`] - Verifier and reward contract bindings
//! - [`claim`] - The claim state machine
//! - [`config`] - Environment profile
//! - [`telemetry`] - Logging setup

pub mod chain;
pub mod claim;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod request;
pub mod telemetry;

// Re-export commonly used types
pub use domain::{
    CircuitId, ClaimOutcome, ClaimState, ClaimStatus, Did, GeneratedProof, OnChainProofArgs,
    ProofRequest, Query, VerificationStatus, VerifierMode,
};

pub use claim::{ClaimConfig, ClaimOrchestrator};

pub use infra::{
    ClaimError, ClaimFailure, IdentityWallet, ProofService, Result, RewardContract,
    VerifierContract,
};
