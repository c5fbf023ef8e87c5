//! Trait definitions for the collaborators a claim is delegated to

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::{
    CircuitId, CreatedIdentity, Credential, CredentialRequest, CredentialStatusType, Did,
    GeneratedProof, IdentityCreationOptions, MerkleTreeUpdate, OnChainProofArgs, ProofOptions,
    ProofRequest, RevocationTarget, TreeState, VerificationStatus, ZkpRequest,
};

use super::Result;

/// Identity wallet and credential store.
///
/// Owns keys, DIDs, claims trees and revocation publication. Every call may
/// block on the network.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityWallet: Send + Sync {
    /// Create a fresh identity and its auth credential
    async fn create_identity(&self, options: &IdentityCreationOptions) -> Result<CreatedIdentity>;

    /// Issue one credential from `issuer`
    async fn issue_credential(&self, issuer: &Did, request: &CredentialRequest)
        -> Result<Credential>;

    /// Persist a credential in the credential store
    async fn save_credential(&self, credential: &Credential) -> Result<()>;

    /// Insert credentials into the issuer's claims tree
    async fn add_credentials_to_merkle_tree(
        &self,
        credentials: &[Credential],
        issuer: &Did,
    ) -> Result<MerkleTreeUpdate>;

    /// Publish revocation tree nodes for the issuer
    async fn publish_revocation_info(
        &self,
        issuer: &Did,
        status_type: CredentialStatusType,
        target: &RevocationTarget,
    ) -> Result<()>;

    /// Publish the issuer's new state on-chain and wait for it to settle
    ///
    /// Returns the state-transition transaction hash.
    async fn transit_state(
        &self,
        issuer: &Did,
        old_tree_state: &TreeState,
        is_old_state_genesis: bool,
    ) -> Result<TxHash>;
}

/// Zero-knowledge proof generation and local verification.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProofService: Send + Sync {
    /// Generate a proof for `request` on behalf of `subject`
    async fn generate_proof(
        &self,
        request: &ProofRequest,
        subject: &Did,
        options: &ProofOptions,
    ) -> Result<GeneratedProof>;

    /// Re-verify a proof against the circuit's verification key
    async fn verify_proof(&self, proof: &GeneratedProof, circuit_id: CircuitId) -> Result<bool>;
}

/// On-chain ZKP verifier contract.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VerifierContract: Send + Sync {
    /// Read the registered request
    async fn get_zkp_request(&self, request_id: u64) -> Result<ZkpRequest>;

    /// Read the proof status for an (actor, request) pair
    async fn get_proof_status(&self, actor: Address, request_id: u64)
        -> Result<VerificationStatus>;

    /// Submit an encoded proof and wait for confirmation
    async fn submit_zkp_response(&self, request_id: u64, args: &OnChainProofArgs)
        -> Result<TxHash>;
}

/// On-chain reward (airdrop) contract.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RewardContract: Send + Sync {
    /// Token balance of `actor`
    async fn balance_of(&self, actor: Address) -> Result<U256>;

    /// Mint the reward to `actor` and wait for confirmation
    async fn mint(&self, actor: Address) -> Result<TxHash>;
}
