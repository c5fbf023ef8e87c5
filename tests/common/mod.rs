//! Common test utilities and in-memory collaborators for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use serde_json::json;

use zk_claim_orchestrator::crypto::{bind_address, swap_g2_coefficients};
use zk_claim_orchestrator::domain::{
    CircuitId, CreatedIdentity, Credential, CredentialRequest, CredentialStatusType, Did,
    FieldElement, GeneratedProof, IdentityCreationOptions, MerkleTreeUpdate, OnChainProofArgs,
    ProofOptions, ProofRequest, RawProof, RevocationOptions, RevocationTarget, TreeState,
    VerificationStatus, ZkpRequest,
};
use zk_claim_orchestrator::{
    ClaimError, IdentityWallet, ProofService, Result, RewardContract, VerifierContract,
};

/// Mint amount credited by the fake reward contract
pub const MINT_AMOUNT: u64 = 5;

/// Test actor address
pub fn test_actor() -> Address {
    "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01".parse().unwrap()
}

pub fn identity_options() -> IdentityCreationOptions {
    IdentityCreationOptions {
        method: "opid".to_string(),
        blockchain: "optimism".to_string(),
        network_id: "sepolia".to_string(),
        revocation_opts: RevocationOptions {
            status_type: CredentialStatusType::Iden3ReverseSparseMerkleTreeProof,
            id: "https://rhs.example.org".to_string(),
        },
    }
}

fn tx(n: usize) -> TxHash {
    TxHash::from(U256::from(n as u64).to_be_bytes::<32>())
}

/// Ordered record of every collaborator call, shared by all fakes
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.0.lock().unwrap().iter().position(|c| c == call)
    }
}

// ============================================================================
// Identity wallet
// ============================================================================

/// Identity wallet that issues credentials as plain JSON.
///
/// The credential carries its subject's birthday so the fake prover can
/// evaluate the age predicate.
#[derive(Clone, Default)]
pub struct InMemoryWallet {
    log: CallLog,
    identities: Arc<Mutex<u64>>,
    credentials: Arc<Mutex<Vec<Credential>>>,
    published_state: Arc<Mutex<bool>>,
}

impl InMemoryWallet {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    pub fn credentials(&self) -> Vec<Credential> {
        self.credentials.lock().unwrap().clone()
    }

    pub fn state_published(&self) -> bool {
        *self.published_state.lock().unwrap()
    }
}

#[async_trait]
impl IdentityWallet for InMemoryWallet {
    async fn create_identity(&self, _options: &IdentityCreationOptions) -> Result<CreatedIdentity> {
        self.log.push("create_identity");
        let mut n = self.identities.lock().unwrap();
        *n += 1;
        Ok(CreatedIdentity {
            did: Did::new(format!("did:opid:optimism:sepolia:{}", *n)),
            credential: Credential(json!({ "id": format!("urn:auth:{}", *n) })),
        })
    }

    async fn issue_credential(&self, issuer: &Did, request: &CredentialRequest) -> Result<Credential> {
        self.log.push("issue_credential");
        Ok(Credential(json!({
            "id": "urn:uuid:kyc-age",
            "issuer": issuer.as_str(),
            "type": ["VerifiableCredential", request.credential_type],
            "credentialSubject": request.credential_subject,
        })))
    }

    async fn save_credential(&self, credential: &Credential) -> Result<()> {
        self.log.push("save_credential");
        self.credentials.lock().unwrap().push(credential.clone());
        Ok(())
    }

    async fn add_credentials_to_merkle_tree(
        &self,
        credentials: &[Credential],
        _issuer: &Did,
    ) -> Result<MerkleTreeUpdate> {
        self.log.push("add_credentials_to_merkle_tree");
        Ok(MerkleTreeUpdate {
            old_tree_state: TreeState(json!({ "state": "genesis" })),
            credentials: credentials.to_vec(),
        })
    }

    async fn publish_revocation_info(
        &self,
        _issuer: &Did,
        _status_type: CredentialStatusType,
        _target: &RevocationTarget,
    ) -> Result<()> {
        self.log.push("publish_revocation_info");
        Ok(())
    }

    async fn transit_state(
        &self,
        _issuer: &Did,
        _old_tree_state: &TreeState,
        _is_old_state_genesis: bool,
    ) -> Result<TxHash> {
        self.log.push("transit_state");
        *self.published_state.lock().unwrap() = true;
        Ok(TxHash::repeat_byte(0xAA))
    }
}

// ============================================================================
// Proof service
// ============================================================================

/// Prover that evaluates `birthday < threshold` on the saved credential and
/// places the challenge in the first public signal.
#[derive(Clone)]
pub struct InMemoryProver {
    log: CallLog,
    wallet: InMemoryWallet,
    verifies: bool,
}

impl InMemoryProver {
    pub fn new(log: CallLog, wallet: InMemoryWallet) -> Self {
        Self {
            log,
            wallet,
            verifies: true,
        }
    }

    /// Prover whose proofs fail local verification
    pub fn rejecting(mut self) -> Self {
        self.verifies = false;
        self
    }
}

fn fe(v: u64) -> FieldElement {
    FieldElement::from(v)
}

#[async_trait]
impl ProofService for InMemoryProver {
    async fn generate_proof(
        &self,
        request: &ProofRequest,
        subject: &Did,
        options: &ProofOptions,
    ) -> Result<GeneratedProof> {
        self.log.push("generate_proof");

        if !self.wallet.state_published() {
            return Err(ClaimError::ProofGenerationFailed(
                "issuer state not published".into(),
            ));
        }

        let held = self.wallet.credentials();
        let credential = held
            .iter()
            .find(|c| c.0["credentialSubject"]["id"] == subject.as_str())
            .ok_or_else(|| ClaimError::UnsatisfiablePredicate("no credential".into()))?;

        let birthday = credential.0["credentialSubject"]["birthday"]
            .as_u64()
            .unwrap_or(u64::MAX);
        let satisfied = match request.query.credential_subject.get("birthday") {
            Some(predicate) if predicate.is_disclosure() => true,
            Some(_) => birthday < 20020101,
            None => true,
        };
        if !satisfied {
            return Err(ClaimError::UnsatisfiablePredicate("birthday".into()));
        }

        Ok(GeneratedProof {
            proof: RawProof {
                pi_a: [fe(1), fe(2), fe(1)],
                pi_b: [[fe(3), fe(4)], [fe(5), fe(6)], [fe(1), fe(0)]],
                pi_c: [fe(7), fe(8), fe(1)],
                protocol: Some("groth16".to_string()),
                curve: Some("bn128".to_string()),
            },
            pub_signals: vec![FieldElement(options.challenge), fe(request.id)],
        })
    }

    async fn verify_proof(&self, _proof: &GeneratedProof, _circuit_id: CircuitId) -> Result<bool> {
        self.log.push("verify_proof");
        Ok(self.verifies)
    }
}

// ============================================================================
// Chain
// ============================================================================

#[derive(Default)]
struct ChainState {
    statuses: HashMap<(Address, u64), VerificationStatus>,
    balances: HashMap<Address, U256>,
    block: u64,
    txs: usize,
}

/// One in-memory chain shared by the verifier and reward fakes.
///
/// Transactions are sent from `sender`. The verifier accepts a proof only
/// when its first public signal is the sender's challenge and the G2 point
/// arrives in verifier order.
#[derive(Clone)]
pub struct InMemoryChain {
    log: CallLog,
    sender: Address,
    mint_on_verify: bool,
    state: Arc<Mutex<ChainState>>,
}

impl InMemoryChain {
    pub fn new(log: CallLog, sender: Address) -> Self {
        Self {
            log,
            sender,
            mint_on_verify: false,
            state: Arc::default(),
        }
    }

    /// Token that credits the reward itself on verification (embedded verifier)
    pub fn minting_on_verify(mut self) -> Self {
        self.mint_on_verify = true;
        self
    }

    /// Mark a request as already verified for `actor`
    pub fn preverify(&self, actor: Address, request_id: u64) {
        let mut state = self.state.lock().unwrap();
        state.statuses.insert(
            (actor, request_id),
            VerificationStatus {
                is_verified: true,
                validator_version: "2.0.1".to_string(),
                block_number: U256::from(1u64),
                block_timestamp: U256::from(1u64),
            },
        );
    }

    pub fn balance(&self, actor: Address) -> U256 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(&actor)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl VerifierContract for InMemoryChain {
    async fn get_zkp_request(&self, request_id: u64) -> Result<ZkpRequest> {
        self.log.push("get_zkp_request");
        Ok(ZkpRequest {
            metadata: format!("request {request_id}"),
            validator: Address::repeat_byte(0x22),
            data: Bytes::new(),
        })
    }

    async fn get_proof_status(&self, actor: Address, request_id: u64) -> Result<VerificationStatus> {
        self.log.push("get_proof_status");
        Ok(self
            .state
            .lock()
            .unwrap()
            .statuses
            .get(&(actor, request_id))
            .cloned()
            .unwrap_or_else(VerificationStatus::unverified))
    }

    async fn submit_zkp_response(&self, request_id: u64, args: &OnChainProofArgs) -> Result<TxHash> {
        self.log.push("submit_zkp_response");

        let native_b = [[U256::from(3u64), U256::from(4u64)], [U256::from(5u64), U256::from(6u64)]];
        if args.b != swap_g2_coefficients(native_b) {
            return Err(ClaimError::ChainCallFailed("execution reverted: invalid proof".into()));
        }
        if args.inputs.first() != Some(&bind_address(self.sender)) {
            return Err(ClaimError::ChainCallFailed(
                "execution reverted: challenge is not bound to sender".into(),
            ));
        }

        let mut state = self.state.lock().unwrap();
        if state
            .statuses
            .get(&(self.sender, request_id))
            .is_some_and(|s| s.is_verified)
        {
            return Err(ClaimError::ChainCallFailed(
                "execution reverted: proof already verified".into(),
            ));
        }
        state.block += 1;
        let status = VerificationStatus {
            is_verified: true,
            validator_version: "2.0.1".to_string(),
            block_number: U256::from(state.block),
            block_timestamp: U256::from(1_700_000_000u64 + state.block),
        };
        state.statuses.insert((self.sender, request_id), status);
        if self.mint_on_verify {
            *state.balances.entry(self.sender).or_default() += U256::from(MINT_AMOUNT);
        }
        state.txs += 1;
        Ok(tx(state.txs))
    }
}

#[async_trait]
impl RewardContract for InMemoryChain {
    async fn balance_of(&self, actor: Address) -> Result<U256> {
        self.log.push("balance_of");
        Ok(self.balance(actor))
    }

    async fn mint(&self, actor: Address) -> Result<TxHash> {
        self.log.push("mint");
        let mut state = self.state.lock().unwrap();
        let balance = state.balances.entry(actor).or_default();
        *balance += U256::from(MINT_AMOUNT);
        state.txs += 1;
        Ok(tx(state.txs))
    }
}
