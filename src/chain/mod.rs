//! On-chain verifier and reward contracts
//!
//! `alloy` bindings for the ZKP verifier and the ERC-20 airdrop, plus the
//! [`VerifierContract`](crate::infra::VerifierContract) and
//! [`RewardContract`](crate::infra::RewardContract) implementations used
//! against a live node.

use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::{Address, TxHash};
use alloy::rpc::types::TransactionReceipt;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::transports::http::reqwest::Url;
use tracing::info;

use crate::infra::{ClaimError, Result};

mod reward;
mod verifier;

pub use reward::EthRewardContract;
pub use verifier::EthVerifierContract;

/// Optimism Sepolia
pub const DEFAULT_CHAIN_ID: u64 = 11155420;

// Generate contract bindings
sol! {
    #[sol(rpc)]
    interface IZKPVerifier {
        struct ZKPRequest {
            string metadata;
            address validator;
            bytes data;
        }

        struct ProofStatus {
            bool isVerified;
            string validatorVersion;
            uint256 blockNumber;
            uint256 blockTimestamp;
        }

        function submitZKPResponse(
            uint64 requestId,
            uint256[] inputs,
            uint256[2] a,
            uint256[2][2] b,
            uint256[2] c
        ) external;

        function getZKPRequest(uint64 requestId) external view returns (ZKPRequest memory);

        function getProofStatus(address sender, uint64 requestId) external view returns (ProofStatus memory);

        function isProofVerified(address sender, uint64 requestId) external view returns (bool);
    }
}

sol! {
    #[sol(rpc)]
    interface IERC20ZkAirdrop {
        function mint(address to) external;

        function balanceOf(address account) external view returns (uint256);
    }
}

/// Chain connection configuration
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// ZKP verifier contract address
    pub verifier_address: Address,
    /// Reward (airdrop) contract address
    pub reward_address: Address,
    /// Private key of the submitting actor
    pub private_key: String,
    /// Chain ID
    pub chain_id: u64,
    /// Upper bound on a receipt wait; `None` waits indefinitely
    pub confirmation_timeout: Option<Duration>,
    /// Blocks to wait for after inclusion
    pub required_confirmations: u64,
}

impl ChainConfig {
    /// Load configuration from environment variables.
    ///
    /// `Ok(None)` when a required variable is unset; a variable that is set
    /// but malformed is a configuration error.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (Some(rpc_url), Some(private_key)) = (lookup("RPC_URL"), lookup("WALLET_KEY")) else {
            return Ok(None);
        };
        let Some(verifier_address) = parse_var::<Address, _>(&lookup, "ERC20_VERIFIER_ADDRESS")?
        else {
            return Ok(None);
        };
        // In embedded mode the token contract is the verifier itself
        let reward_address = parse_var::<Address, _>(&lookup, "ERC20_ZK_AIRDROP_ADDRESS")?
            .unwrap_or(verifier_address);
        let chain_id = parse_var::<u64, _>(&lookup, "CHAIN_ID")?.unwrap_or(DEFAULT_CHAIN_ID);
        let confirmation_timeout =
            parse_var::<u64, _>(&lookup, "CONFIRMATION_TIMEOUT_SECS")?.map(Duration::from_secs);
        let required_confirmations =
            parse_var::<u64, _>(&lookup, "REQUIRED_CONFIRMATIONS")?.unwrap_or(1);

        Ok(Some(Self {
            rpc_url,
            verifier_address,
            reward_address,
            private_key,
            chain_id,
            confirmation_timeout,
            required_confirmations,
        }))
    }

    pub(crate) fn signer(&self) -> Result<PrivateKeySigner> {
        self.private_key
            .trim_start_matches("0x")
            .parse()
            .map_err(|e| ClaimError::Configuration(format!("Invalid private key: {}", e)))
    }

    pub(crate) fn url(&self) -> Result<Url> {
        self.rpc_url
            .parse()
            .map_err(|e| ClaimError::Configuration(format!("Invalid RPC URL: {}", e)))
    }

    /// Address transactions are sent from; the claim actor.
    pub fn signer_address(&self) -> Result<Address> {
        Ok(self.signer()?.address())
    }
}

/// Parse an optional variable, failing only when it is set but malformed.
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| ClaimError::Configuration(format!("Invalid {}={:?}: {}", key, raw, e)))
        })
        .transpose()
}

/// Map a mined receipt to its hash, failing on revert.
pub(crate) fn confirmed(receipt: &TransactionReceipt, what: &str) -> Result<TxHash> {
    let tx_hash = receipt.transaction_hash;
    if !receipt.status() {
        return Err(ClaimError::ChainCallFailed(format!(
            "{} reverted in tx {}",
            what, tx_hash
        )));
    }
    info!(
        tx_hash = %tx_hash,
        block = receipt.block_number.unwrap_or(0),
        "{} confirmed", what
    );
    Ok(tx_hash)
}

pub(crate) fn call_failed(e: impl std::fmt::Display) -> ClaimError {
    ClaimError::ChainCallFailed(format!("Contract call failed: {}", e))
}

pub(crate) fn send_failed(e: impl std::fmt::Display) -> ClaimError {
    ClaimError::ChainCallFailed(format!("Failed to send transaction: {}", e))
}

pub(crate) fn receipt_failed(e: impl std::fmt::Display) -> ClaimError {
    ClaimError::ChainCallFailed(format!("Failed to get receipt: {}", e))
}
