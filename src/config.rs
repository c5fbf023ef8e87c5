//! Environment profile for claim runs
//!
//! Everything a claim attempt needs that is not a chain connection: verifier
//! mode, revocation profile, DID networks and the on-chain request ids.

use crate::domain::{
    CredentialStatusType, Did, DidMethodNetwork, IdentityCreationOptions, RevocationOptions,
    VerifierMode,
};
use crate::infra::{ClaimError, Result};
use crate::request::ClaimTemplate;

pub const OPID_METHOD: &str = "opid";
pub const OPID_METHOD_BYTE: u8 = 0b0000_0011;
pub const OPTIMISM_BLOCKCHAIN: &str = "optimism";
pub const SEPOLIA_NETWORK: &str = "sepolia";

/// DID method/network descriptors handed to the identity agent at start-up.
pub fn did_method_networks() -> Vec<DidMethodNetwork> {
    vec![
        DidMethodNetwork {
            method: OPID_METHOD.to_string(),
            method_byte: Some(OPID_METHOD_BYTE),
            blockchain: OPTIMISM_BLOCKCHAIN.to_string(),
            network: SEPOLIA_NETWORK.to_string(),
            chain_id: Some(11155420),
            network_flag: 0b1000_0000 | 0b0000_0010,
        },
        DidMethodNetwork {
            method: OPID_METHOD.to_string(),
            method_byte: Some(OPID_METHOD_BYTE),
            blockchain: OPTIMISM_BLOCKCHAIN.to_string(),
            network: "main".to_string(),
            chain_id: Some(10),
            network_flag: 0b1000_0000 | 0b0000_0001,
        },
    ]
}

/// Where credential revocation status is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RhsProfile {
    /// Reverse hash service reachable over HTTP
    OffChain { rhs_url: String },
    /// Revocation tree stored in an on-chain contract
    OnChain { rhs_address: String },
}

impl RhsProfile {
    pub fn revocation_options(&self) -> RevocationOptions {
        match self {
            RhsProfile::OffChain { rhs_url } => RevocationOptions {
                status_type: CredentialStatusType::Iden3ReverseSparseMerkleTreeProof,
                id: rhs_url.clone(),
            },
            RhsProfile::OnChain { rhs_address } => RevocationOptions {
                status_type: CredentialStatusType::Iden3OnchainSparseMerkleTreeProof2023,
                id: rhs_address.clone(),
            },
        }
    }
}

/// Request ids registered on the verifier, per flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestIds {
    pub sig: u64,
    pub mtp: u64,
    pub v3: u64,
}

impl Default for RequestIds {
    fn default() -> Self {
        Self { sig: 1, mtp: 2, v3: 3 }
    }
}

impl RequestIds {
    pub fn for_template(&self, template: ClaimTemplate) -> u64 {
        match template {
            ClaimTemplate::Sig => self.sig,
            ClaimTemplate::Mtp => self.mtp,
            ClaimTemplate::V3 | ClaimTemplate::SelectiveDisclosure => self.v3,
        }
    }
}

/// Claim environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub verifier_mode: VerifierMode,
    /// Passed to V3 proof generation
    pub verifier_did: Option<Did>,
    pub rhs: RhsProfile,
    pub is_old_state_genesis: bool,
    pub skip_revocation_check: bool,
    pub request_ids: RequestIds,
}

impl EnvironmentConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let verifier_mode = lookup("ERC20_VERIFIER")
            .ok_or_else(|| ClaimError::Configuration("ERC20_VERIFIER must be set".into()))
            .and_then(|label| VerifierMode::classify(&label))?;

        let rhs_mode = lookup("RHS_MODE").unwrap_or_else(|| "offchain".to_string());
        let rhs = match rhs_mode.to_ascii_lowercase().as_str() {
            "offchain" | "off-chain" => RhsProfile::OffChain {
                rhs_url: lookup("RHS_URL").ok_or_else(|| {
                    ClaimError::Configuration("RHS_URL must be set for the offchain profile".into())
                })?,
            },
            "onchain" | "on-chain" => RhsProfile::OnChain {
                rhs_address: lookup("RHS_ADDRESS").ok_or_else(|| {
                    ClaimError::Configuration(
                        "RHS_ADDRESS must be set for the onchain profile".into(),
                    )
                })?,
            },
            other => {
                return Err(ClaimError::Configuration(format!(
                    "Unknown RHS_MODE: {}",
                    other
                )))
            }
        };

        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(default)
        };

        let id = |key: &str, default: u64| -> Result<u64> {
            match lookup(key) {
                Some(v) => v
                    .parse()
                    .map_err(|_| ClaimError::Configuration(format!("{} must be a u64: {}", key, v))),
                None => Ok(default),
            }
        };

        let defaults = RequestIds::default();
        let request_ids = RequestIds {
            sig: id("TRANSFER_REQUEST_ID_SIG_VALIDATOR", defaults.sig)?,
            mtp: id("TRANSFER_REQUEST_ID_MTP_VALIDATOR", defaults.mtp)?,
            v3: id("TRANSFER_REQUEST_ID_V3", defaults.v3)?,
        };

        Ok(Self {
            verifier_mode,
            verifier_did: lookup("ERC20_VERIFIER_DID").map(Did::new),
            rhs,
            is_old_state_genesis: flag("IS_OLD_STATE_GENESIS", true),
            skip_revocation_check: flag("SKIP_REVOCATION_CHECK", false),
            request_ids,
        })
    }

    /// Identity creation options for the active profile
    pub fn identity_options(&self) -> IdentityCreationOptions {
        IdentityCreationOptions {
            method: OPID_METHOD.to_string(),
            blockchain: OPTIMISM_BLOCKCHAIN.to_string(),
            network_id: SEPOLIA_NETWORK.to_string(),
            revocation_opts: self.rhs.revocation_options(),
        }
    }
}
