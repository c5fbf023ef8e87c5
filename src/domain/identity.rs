//! Identity and credential shapes exchanged with the identity wallet
//!
//! Credentials and tree states are opaque JSON documents owned by the
//! identity library; only the fields the orchestrator needs are typed.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::{CredentialStatusType, Did};

/// Where and how revocation status is published for issued credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationOptions {
    #[serde(rename = "type")]
    pub status_type: CredentialStatusType,
    /// RHS URL (off-chain) or revocation contract address (on-chain).
    pub id: String,
}

/// Parameters for creating an identity on a DID method/network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityCreationOptions {
    pub method: String,
    pub blockchain: String,
    pub network_id: String,
    pub revocation_opts: RevocationOptions,
}

/// DID method/network registration handed to the identity library once at
/// start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidMethodNetwork {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_byte: Option<u8>,
    pub blockchain: String,
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    pub network_flag: u8,
}

/// A verifiable credential, opaque apart from its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(pub Value);

impl Credential {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }
}

/// Result of identity creation: the DID and its auth credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedIdentity {
    pub did: Did,
    pub credential: Credential,
}

/// Request to issue one credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequest {
    pub credential_schema: String,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub credential_subject: Map<String, Value>,
    /// Unix seconds.
    pub expiration: u64,
    pub revocation_opts: RevocationOptions,
}

/// Issuer tree roots before a batch insertion; opaque to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeState(pub Value);

/// Outcome of inserting credentials into the issuer's claims tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerkleTreeUpdate {
    pub old_tree_state: TreeState,
    pub credentials: Vec<Credential>,
}

/// Destination of a revocation-info publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevocationTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhs_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhs_address: Option<String>,
}

impl RevocationTarget {
    /// Target derived from the revocation options used at issuance.
    pub fn from_options(opts: &RevocationOptions) -> Self {
        match opts.status_type {
            CredentialStatusType::Iden3OnchainSparseMerkleTreeProof2023 => Self {
                rhs_url: None,
                rhs_address: Some(opts.id.clone()),
            },
            _ => Self {
                rhs_url: Some(opts.id.clone()),
                rhs_address: None,
            },
        }
    }
}

/// Options for proof generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofOptions {
    /// Challenge binding the proof to the submitting address.
    pub challenge: U256,
    pub skip_revocation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier_did: Option<Did>,
}
