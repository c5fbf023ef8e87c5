use alloy::primitives::{Address, TxHash, U256};
use tracing::{debug, info, warn};

use crate::config::EnvironmentConfig;
use crate::crypto::{bind_address, encode};
use crate::domain::{
    ClaimOutcome, ClaimState, ClaimStatus, Did, GeneratedProof, IdentityCreationOptions,
    ProofOptions, ProofRequest, RevocationTarget, VerificationStatus, VerifierMode,
};
use crate::infra::{
    ClaimError, ClaimFailure, IdentityWallet, ProofService, Result, RewardContract,
    VerifierContract,
};
use crate::request::{kyc_age_credential, ClaimTemplate, KycAgeAttributes};

/// Fixed inputs of a claim attempt
#[derive(Debug, Clone)]
pub struct ClaimConfig {
    pub mode: VerifierMode,
    pub request: ProofRequest,
    pub identity_options: IdentityCreationOptions,
    pub credential: KycAgeAttributes,
    /// Passed through to the issuer's state transition
    pub is_old_state_genesis: bool,
    pub skip_revocation: bool,
    pub verifier_did: Option<Did>,
}

impl ClaimConfig {
    pub fn new(
        mode: VerifierMode,
        request: ProofRequest,
        identity_options: IdentityCreationOptions,
    ) -> Self {
        Self {
            mode,
            request,
            identity_options,
            credential: KycAgeAttributes::default(),
            is_old_state_genesis: true,
            skip_revocation: false,
            verifier_did: None,
        }
    }

    /// Claim config for one of the predefined flows
    pub fn from_environment(env: &EnvironmentConfig, template: ClaimTemplate) -> Self {
        let request = template.request(env.request_ids.for_template(template));
        Self {
            mode: env.verifier_mode,
            request,
            identity_options: env.identity_options(),
            credential: KycAgeAttributes::default(),
            is_old_state_genesis: env.is_old_state_genesis,
            skip_revocation: env.skip_revocation_check,
            verifier_did: env.verifier_did.clone(),
        }
    }
}

/// Progress of one attempt
struct Attempt {
    actor: Address,
    request_id: u64,
    state: ClaimState,
    challenge: U256,
    tx_hashes: Vec<TxHash>,
    status: Option<VerificationStatus>,
}

impl Attempt {
    fn new(actor: Address, request_id: u64) -> Self {
        Self {
            actor,
            request_id,
            state: ClaimState::Start,
            challenge: U256::ZERO,
            tx_hashes: Vec::new(),
            status: None,
        }
    }

    fn reach(&mut self, state: ClaimState) {
        self.state = state;
        info!(
            request_id = self.request_id,
            actor = %self.actor,
            state = %state,
            "Claim state reached"
        );
    }
}

/// Drives a single claim from credential issuance to on-chain acceptance.
///
/// Steps run strictly in order and each waits for the previous one to
/// settle. Nothing is retried or rolled back: credentials and state
/// transitions persist across a failed attempt.
pub struct ClaimOrchestrator<W, P, V, R> {
    wallet: W,
    prover: P,
    verifier: V,
    reward: R,
    config: ClaimConfig,
}

impl<W, P, V, R> ClaimOrchestrator<W, P, V, R>
where
    W: IdentityWallet,
    P: ProofService,
    V: VerifierContract,
    R: RewardContract,
{
    pub fn new(wallet: W, prover: P, verifier: V, reward: R, config: ClaimConfig) -> Self {
        Self {
            wallet,
            prover,
            verifier,
            reward,
            config,
        }
    }

    pub fn config(&self) -> &ClaimConfig {
        &self.config
    }

    /// Run the full state machine for `actor`.
    ///
    /// On failure the error carries the last state reached.
    pub async fn run_claim(&self, actor: Address) -> std::result::Result<ClaimOutcome, ClaimFailure> {
        let request = &self.config.request;
        let mut attempt = Attempt::new(actor, request.id);
        let result = self.drive(&mut attempt, request).await;
        self.conclude(attempt, result)
    }

    /// Resume from `ProofGenerated` with a proof produced elsewhere.
    ///
    /// The proof is still re-verified locally and the verifier status is
    /// still checked before anything is submitted.
    pub async fn submit_generated(
        &self,
        actor: Address,
        request: &ProofRequest,
        proof: GeneratedProof,
    ) -> std::result::Result<ClaimOutcome, ClaimFailure> {
        let mut attempt = Attempt::new(actor, request.id);
        let result = self.resume(&mut attempt, request, proof).await;
        self.conclude(attempt, result)
    }

    async fn resume(
        &self,
        attempt: &mut Attempt,
        request: &ProofRequest,
        proof: GeneratedProof,
    ) -> Result<(Option<U256>, Option<U256>)> {
        self.preflight(request)?;
        attempt.challenge = bind_address(attempt.actor);
        attempt.reach(ClaimState::ProofGenerated);
        self.settle(attempt, request, proof).await
    }

    fn conclude(
        &self,
        mut attempt: Attempt,
        result: Result<(Option<U256>, Option<U256>)>,
    ) -> std::result::Result<ClaimOutcome, ClaimFailure> {
        let (status, balance_before, balance_after) = match result {
            Ok((before, after)) => {
                let status = if attempt.state == ClaimState::Minted {
                    ClaimStatus::Minted
                } else {
                    ClaimStatus::Verified
                };
                (status, before, after)
            }
            Err(e) if e.is_noop() => {
                attempt.reach(ClaimState::AlreadySatisfied);
                (ClaimStatus::AlreadySatisfied, None, None)
            }
            Err(e) => {
                warn!(
                    request_id = attempt.request_id,
                    actor = %attempt.actor,
                    state = %attempt.state,
                    error = %e,
                    "Claim attempt failed"
                );
                return Err(ClaimFailure::new(attempt.state, e));
            }
        };

        Ok(ClaimOutcome {
            status,
            mode: self.config.mode,
            request_id: attempt.request_id,
            challenge: attempt.challenge,
            tx_hashes: attempt.tx_hashes,
            status_after: attempt.status,
            balance_before,
            balance_after,
        })
    }

    /// Mode/request compatibility, checked before any side effect.
    fn preflight(&self, request: &ProofRequest) -> Result<()> {
        let mode = self.config.mode;
        if request.query.is_selective_disclosure() && !mode.accepts_selective_disclosure() {
            return Err(ClaimError::ModeMismatch {
                mode,
                reason: "selective disclosure requires a selective-disclosure verifier".into(),
            });
        }
        if request.circuit_id.is_v3() && mode == VerifierMode::Embedded {
            warn!(
                circuit = %request.circuit_id,
                "Embedded verifiers usually accept V3 proofs only for selective disclosure"
            );
        }
        Ok(())
    }

    async fn drive(
        &self,
        attempt: &mut Attempt,
        request: &ProofRequest,
    ) -> Result<(Option<U256>, Option<U256>)> {
        self.preflight(request)?;

        let options = &self.config.identity_options;
        let user = self.wallet.create_identity(options).await?;
        let issuer = self.wallet.create_identity(options).await?;
        debug!(user = %user.did, issuer = %issuer.did, "Identities created");
        attempt.reach(ClaimState::IdentitiesReady);

        let credential_request =
            kyc_age_credential(&user.did, self.config.credential, &options.revocation_opts);
        let credential = self
            .wallet
            .issue_credential(&issuer.did, &credential_request)
            .await?;
        self.wallet.save_credential(&credential).await?;
        debug!(credential_id = ?credential.id(), "Credential saved");
        attempt.reach(ClaimState::CredentialIssued);

        let update = self
            .wallet
            .add_credentials_to_merkle_tree(std::slice::from_ref(&credential), &issuer.did)
            .await?;
        self.wallet
            .publish_revocation_info(
                &issuer.did,
                options.revocation_opts.status_type,
                &RevocationTarget::from_options(&options.revocation_opts),
            )
            .await?;
        attempt.reach(ClaimState::RevocationPublished);

        let tx_hash = self
            .wallet
            .transit_state(
                &issuer.did,
                &update.old_tree_state,
                self.config.is_old_state_genesis,
            )
            .await?;
        info!(tx_hash = %tx_hash, "Issuer state transitioned");
        attempt.tx_hashes.push(tx_hash);
        attempt.reach(ClaimState::StateTransitioned);

        attempt.challenge = bind_address(attempt.actor);
        attempt.reach(ClaimState::ChallengeBound);

        let proof_options = ProofOptions {
            challenge: attempt.challenge,
            skip_revocation: self.config.skip_revocation,
            verifier_did: self.config.verifier_did.clone(),
        };
        let proof = self
            .prover
            .generate_proof(request, &user.did, &proof_options)
            .await?;
        attempt.reach(ClaimState::ProofGenerated);

        self.settle(attempt, request, proof).await
    }

    /// Everything from local verification onwards.
    ///
    /// Returns the reward balance before submission and after the last step.
    async fn settle(
        &self,
        attempt: &mut Attempt,
        request: &ProofRequest,
        proof: GeneratedProof,
    ) -> Result<(Option<U256>, Option<U256>)> {
        if !self.prover.verify_proof(&proof, request.circuit_id).await? {
            return Err(ClaimError::LocalVerificationFailed {
                circuit_id: request.circuit_id,
            });
        }
        attempt.reach(ClaimState::ProofLocallyVerified);

        let zkp_request = self.verifier.get_zkp_request(request.id).await?;
        debug!(
            request_id = request.id,
            validator = %zkp_request.validator,
            metadata = %zkp_request.metadata,
            "Verifier request loaded"
        );

        let status = self
            .verifier
            .get_proof_status(attempt.actor, request.id)
            .await?;
        let already_verified = status.is_verified;
        attempt.status = Some(status);
        attempt.reach(ClaimState::StatusChecked);
        if already_verified {
            return Err(ClaimError::AlreadyVerifiedNoop {
                request_id: request.id,
            });
        }

        let balance_before = self.read_balance(attempt, "before submission").await;

        let args = encode(&proof);
        let tx_hash = self.verifier.submit_zkp_response(request.id, &args).await?;
        info!(tx_hash = %tx_hash, "ZKP response submitted");
        attempt.tx_hashes.push(tx_hash);
        attempt.reach(ClaimState::Submitted);

        if self.config.mode.requires_mint() {
            attempt.reach(ClaimState::MintPending);
            let tx_hash = self.reward.mint(attempt.actor).await?;
            info!(tx_hash = %tx_hash, "Reward minted");
            attempt.tx_hashes.push(tx_hash);
            attempt.reach(ClaimState::Minted);
        } else {
            attempt.reach(ClaimState::Terminal);
        }

        // Reads below are informational; the claim is already settled.
        attempt.status = match self
            .verifier
            .get_proof_status(attempt.actor, request.id)
            .await
        {
            Ok(status) => {
                if !status.is_verified {
                    warn!(
                        request_id = request.id,
                        actor = %attempt.actor,
                        "Submission confirmed but the verifier does not report the proof as verified"
                    );
                }
                Some(status)
            }
            Err(e) => {
                warn!(
                    request_id = request.id,
                    actor = %attempt.actor,
                    error = %e,
                    "Could not re-read proof status after submission"
                );
                None
            }
        };

        let balance_after = self.read_balance(attempt, "after claim").await;

        Ok((balance_before, balance_after))
    }

    /// Reward balance of the actor, or `None` when the read fails.
    async fn read_balance(&self, attempt: &Attempt, when: &str) -> Option<U256> {
        match self.reward.balance_of(attempt.actor).await {
            Ok(balance) => {
                debug!(balance = %balance, when, "Reward balance");
                Some(balance)
            }
            Err(e) => {
                warn!(
                    request_id = attempt.request_id,
                    actor = %attempt.actor,
                    error = %e,
                    when,
                    "Could not read reward balance"
                );
                None
            }
        }
    }
}
