//! Claim attempt states and outcomes

use alloy::primitives::{TxHash, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::mode::VerifierMode;
use super::types::VerificationStatus;

/// States of one claim attempt, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClaimState {
    Start,
    IdentitiesReady,
    CredentialIssued,
    RevocationPublished,
    StateTransitioned,
    ChallengeBound,
    ProofGenerated,
    ProofLocallyVerified,
    StatusChecked,
    AlreadySatisfied,
    Submitted,
    Terminal,
    MintPending,
    Minted,
}

impl ClaimState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimState::Start => "start",
            ClaimState::IdentitiesReady => "identities_ready",
            ClaimState::CredentialIssued => "credential_issued",
            ClaimState::RevocationPublished => "revocation_published",
            ClaimState::StateTransitioned => "state_transitioned",
            ClaimState::ChallengeBound => "challenge_bound",
            ClaimState::ProofGenerated => "proof_generated",
            ClaimState::ProofLocallyVerified => "proof_locally_verified",
            ClaimState::StatusChecked => "status_checked",
            ClaimState::AlreadySatisfied => "already_satisfied",
            ClaimState::Submitted => "submitted",
            ClaimState::Terminal => "terminal",
            ClaimState::MintPending => "mint_pending",
            ClaimState::Minted => "minted",
        }
    }

    /// No further transition follows this state.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ClaimState::AlreadySatisfied | ClaimState::Terminal | ClaimState::Minted
        )
    }
}

impl fmt::Display for ClaimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal status reported to the caller of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// The verifier already held a verified proof; nothing was submitted.
    AlreadySatisfied,
    /// The proof was accepted on-chain; no mint was needed.
    Verified,
    /// The proof was accepted and the reward was minted.
    Minted,
}

/// Result of a successful claim attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimOutcome {
    pub status: ClaimStatus,
    pub mode: VerifierMode,
    pub request_id: u64,
    pub challenge: U256,
    /// Transactions sent during the attempt, in order.
    pub tx_hashes: Vec<TxHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_after: Option<VerificationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_before: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_after: Option<U256>,
}
