//! JSON-RPC client for an external identity/proof agent
//!
//! The identity library (wallets, claims trees, circuits) runs as a sidecar
//! process. This client implements [`IdentityWallet`] and [`ProofService`]
//! on top of its JSON-RPC interface.

use alloy::primitives::TxHash;
use alloy::rpc::client::ClientBuilder;
use alloy::transports::http::reqwest::Url;
use alloy::transports::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    CircuitId, CreatedIdentity, Credential, CredentialRequest, CredentialStatusType, Did,
    DidMethodNetwork, GeneratedProof, IdentityCreationOptions, MerkleTreeUpdate, ProofOptions,
    ProofRequest, RevocationTarget, TreeState,
};

use super::{ClaimError, IdentityWallet, ProofService, Result};

/// JSON-RPC error code the agent uses when no held credential satisfies a query.
pub const UNSATISFIABLE_PREDICATE_CODE: i64 = -32001;

/// Identity agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// JSON-RPC endpoint of the agent
    pub url: String,
}

impl AgentConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("IDENTITY_AGENT_URL").ok()?;
        Some(Self { url })
    }
}

/// [`IdentityWallet`] and [`ProofService`] backed by the identity agent.
///
/// A client is built per call, the same way chain providers are.
#[derive(Debug, Clone)]
pub struct RpcIdentityAgent {
    url: Url,
}

impl RpcIdentityAgent {
    /// Validate the endpoint; no connection is made until the first call
    pub fn connect(config: &AgentConfig) -> Result<Self> {
        let url = config
            .url
            .parse()
            .map_err(|e| ClaimError::Configuration(format!("Invalid agent URL: {}", e)))?;
        Ok(Self { url })
    }

    /// Register DID methods/networks with the agent. Idempotent on the agent side.
    pub async fn register_did_networks(&self, networks: &[DidMethodNetwork]) -> Result<()> {
        for network in networks {
            let _: bool = ClientBuilder::default()
                .http(self.url.clone())
                .request("core_registerDidMethodNetwork", network.clone())
                .await
                .map_err(identity_error)?;
            debug!(
                method = %network.method,
                blockchain = %network.blockchain,
                network = %network.network,
                "DID method network registered"
            );
        }
        Ok(())
    }
}

fn identity_error(err: TransportError) -> ClaimError {
    ClaimError::IdentityWalletFailed(err.to_string())
}

fn proof_error(err: TransportError) -> ClaimError {
    match err.as_error_resp() {
        Some(payload) if payload.code == UNSATISFIABLE_PREDICATE_CODE => {
            ClaimError::UnsatisfiablePredicate(payload.message.to_string())
        }
        _ => ClaimError::ProofGenerationFailed(err.to_string()),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct IssueCredentialParams {
    issuer_did: Did,
    request: CredentialRequest,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToTreeParams {
    credentials: Vec<Credential>,
    issuer_did: Did,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishRevocationParams {
    issuer_did: Did,
    status_type: CredentialStatusType,
    target: RevocationTarget,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransitStateParams {
    issuer_did: Did,
    old_tree_state: TreeState,
    is_old_state_genesis: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransitStateResult {
    tx_id: TxHash,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateProofParams {
    request: ProofRequest,
    subject_did: Did,
    options: ProofOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyProofParams {
    proof: GeneratedProof,
    circuit_id: CircuitId,
}

#[async_trait]
impl IdentityWallet for RpcIdentityAgent {
    async fn create_identity(&self, options: &IdentityCreationOptions) -> Result<CreatedIdentity> {
        ClientBuilder::default()
            .http(self.url.clone())
            .request("identity_createIdentity", options.clone())
            .await
            .map_err(identity_error)
    }

    async fn issue_credential(
        &self,
        issuer: &Did,
        request: &CredentialRequest,
    ) -> Result<Credential> {
        let params = IssueCredentialParams {
            issuer_did: issuer.clone(),
            request: request.clone(),
        };
        ClientBuilder::default()
            .http(self.url.clone())
            .request("identity_issueCredential", params)
            .await
            .map_err(identity_error)
    }

    async fn save_credential(&self, credential: &Credential) -> Result<()> {
        let _: bool = ClientBuilder::default()
            .http(self.url.clone())
            .request("credential_save", credential.clone())
            .await
            .map_err(identity_error)?;
        Ok(())
    }

    async fn add_credentials_to_merkle_tree(
        &self,
        credentials: &[Credential],
        issuer: &Did,
    ) -> Result<MerkleTreeUpdate> {
        let params = AddToTreeParams {
            credentials: credentials.to_vec(),
            issuer_did: issuer.clone(),
        };
        ClientBuilder::default()
            .http(self.url.clone())
            .request("identity_addCredentialsToMerkleTree", params)
            .await
            .map_err(identity_error)
    }

    async fn publish_revocation_info(
        &self,
        issuer: &Did,
        status_type: CredentialStatusType,
        target: &RevocationTarget,
    ) -> Result<()> {
        let params = PublishRevocationParams {
            issuer_did: issuer.clone(),
            status_type,
            target: target.clone(),
        };
        let _: bool = ClientBuilder::default()
            .http(self.url.clone())
            .request("identity_publishRevocationInfo", params)
            .await
            .map_err(identity_error)?;
        Ok(())
    }

    async fn transit_state(
        &self,
        issuer: &Did,
        old_tree_state: &TreeState,
        is_old_state_genesis: bool,
    ) -> Result<TxHash> {
        let params = TransitStateParams {
            issuer_did: issuer.clone(),
            old_tree_state: old_tree_state.clone(),
            is_old_state_genesis,
        };
        let result: TransitStateResult = ClientBuilder::default()
            .http(self.url.clone())
            .request("identity_transitState", params)
            .await
            .map_err(|e| ClaimError::ChainCallFailed(format!("State transition failed: {}", e)))?;
        Ok(result.tx_id)
    }
}

#[async_trait]
impl ProofService for RpcIdentityAgent {
    async fn generate_proof(
        &self,
        request: &ProofRequest,
        subject: &Did,
        options: &ProofOptions,
    ) -> Result<GeneratedProof> {
        let params = GenerateProofParams {
            request: request.clone(),
            subject_did: subject.clone(),
            options: options.clone(),
        };
        ClientBuilder::default()
            .http(self.url.clone())
            .request("proof_generate", params)
            .await
            .map_err(proof_error)
    }

    async fn verify_proof(&self, proof: &GeneratedProof, circuit_id: CircuitId) -> Result<bool> {
        let params = VerifyProofParams {
            proof: proof.clone(),
            circuit_id,
        };
        ClientBuilder::default()
            .http(self.url.clone())
            .request("proof_verify", params)
            .await
            .map_err(proof_error)
    }
}
