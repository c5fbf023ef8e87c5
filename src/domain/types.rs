//! Core type definitions for the claim orchestrator
//!
//! Identifiers, circuit catalogue and the on-chain verifier's view types.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::infra::ClaimError;

/// Decentralized identifier naming an identity (user, issuer or verifier).
///
/// Parsing and validation belong to the identity library; here it is an
/// opaque, printable string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Did(pub String);

impl Did {
    pub fn new(did: impl Into<String>) -> Self {
        Self(did.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Did {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Zero-knowledge circuits understood by the proof service.
///
/// Serialized with the circuit names used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CircuitId {
    #[serde(rename = "authV2")]
    AuthV2,
    #[serde(rename = "credentialAtomicQuerySigV2")]
    AtomicQuerySigV2,
    #[serde(rename = "credentialAtomicQuerySigV2OnChain")]
    AtomicQuerySigV2OnChain,
    #[serde(rename = "credentialAtomicQueryMTPV2")]
    AtomicQueryMtpV2,
    #[serde(rename = "credentialAtomicQueryMTPV2OnChain")]
    AtomicQueryMtpV2OnChain,
    #[serde(rename = "credentialAtomicQueryV3-beta.1")]
    AtomicQueryV3,
    #[serde(rename = "credentialAtomicQueryV3OnChain-beta.1")]
    AtomicQueryV3OnChain,
    #[serde(rename = "linkedMultiQuery10-beta.1")]
    LinkedMultiQuery10,
}

impl CircuitId {
    pub const ALL: [CircuitId; 8] = [
        CircuitId::AuthV2,
        CircuitId::AtomicQuerySigV2,
        CircuitId::AtomicQuerySigV2OnChain,
        CircuitId::AtomicQueryMtpV2,
        CircuitId::AtomicQueryMtpV2OnChain,
        CircuitId::AtomicQueryV3,
        CircuitId::AtomicQueryV3OnChain,
        CircuitId::LinkedMultiQuery10,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitId::AuthV2 => "authV2",
            CircuitId::AtomicQuerySigV2 => "credentialAtomicQuerySigV2",
            CircuitId::AtomicQuerySigV2OnChain => "credentialAtomicQuerySigV2OnChain",
            CircuitId::AtomicQueryMtpV2 => "credentialAtomicQueryMTPV2",
            CircuitId::AtomicQueryMtpV2OnChain => "credentialAtomicQueryMTPV2OnChain",
            CircuitId::AtomicQueryV3 => "credentialAtomicQueryV3-beta.1",
            CircuitId::AtomicQueryV3OnChain => "credentialAtomicQueryV3OnChain-beta.1",
            CircuitId::LinkedMultiQuery10 => "linkedMultiQuery10-beta.1",
        }
    }

    /// Circuits whose public signals are laid out for an on-chain validator.
    pub fn is_on_chain(&self) -> bool {
        matches!(
            self,
            CircuitId::AtomicQuerySigV2OnChain
                | CircuitId::AtomicQueryMtpV2OnChain
                | CircuitId::AtomicQueryV3OnChain
        )
    }

    /// V3 family (supports nullifiers, group ids and selective disclosure).
    pub fn is_v3(&self) -> bool {
        matches!(
            self,
            CircuitId::AtomicQueryV3 | CircuitId::AtomicQueryV3OnChain
        )
    }
}

impl fmt::Display for CircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CircuitId {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CircuitId::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ClaimError::UnknownCircuit(s.to_string()))
    }
}

/// Proof type a query asks the holder to use for the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofType {
    #[serde(rename = "BJJSignature2021")]
    BjjSignature,
    #[serde(rename = "Iden3SparseMerkleTreeProof")]
    Iden3SparseMerkleTreeProof,
}

/// Revocation status mechanism attached to issued credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialStatusType {
    SparseMerkleTreeProof,
    Iden3ReverseSparseMerkleTreeProof,
    Iden3OnchainSparseMerkleTreeProof2023,
    Iden3commRevocationStatusV1,
}

impl fmt::Display for CredentialStatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CredentialStatusType::SparseMerkleTreeProof => "SparseMerkleTreeProof",
            CredentialStatusType::Iden3ReverseSparseMerkleTreeProof => {
                "Iden3ReverseSparseMerkleTreeProof"
            }
            CredentialStatusType::Iden3OnchainSparseMerkleTreeProof2023 => {
                "Iden3OnchainSparseMerkleTreeProof2023"
            }
            CredentialStatusType::Iden3commRevocationStatusV1 => "Iden3commRevocationStatusV1",
        };
        f.write_str(s)
    }
}

/// Proof status for an (actor, request) pair as reported by the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatus {
    pub is_verified: bool,
    pub validator_version: String,
    pub block_number: U256,
    pub block_timestamp: U256,
}

impl VerificationStatus {
    pub fn unverified() -> Self {
        Self::default()
    }
}

/// A request registered on the verifier contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkpRequest {
    pub metadata: String,
    pub validator: Address,
    pub data: Bytes,
}
