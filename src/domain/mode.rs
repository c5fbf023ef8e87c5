//! Verifier deployment modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::infra::{ClaimError, Result};

/// How the verifier contract instance was deployed.
///
/// Fixed for the lifetime of a run; selects which orchestrator branches
/// execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerifierMode {
    /// Verification logic lives in the reward contract itself.
    Embedded,
    /// A shared verifier records proofs; the reward contract is minted separately.
    Universal,
    /// Embedded verifier that accepts V3 selective-disclosure proofs.
    SelectiveDisclosure,
}

impl VerifierMode {
    /// Map a configured label to a mode.
    ///
    /// Labels are case-insensitive; `-`, `_` and no separator are all
    /// accepted for the selective-disclosure label.
    pub fn classify(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "embedded" => Ok(VerifierMode::Embedded),
            "universal" => Ok(VerifierMode::Universal),
            "selective-disclosure" | "selective_disclosure" | "selectivedisclosure" => {
                Ok(VerifierMode::SelectiveDisclosure)
            }
            _ => Err(ClaimError::UnknownVerifierMode(label.to_string())),
        }
    }

    /// Whether an accepted proof must be followed by a separate mint call.
    pub fn requires_mint(&self) -> bool {
        match self {
            VerifierMode::Universal => true,
            VerifierMode::Embedded | VerifierMode::SelectiveDisclosure => false,
        }
    }

    /// Whether the verifier accepts proofs that disclose attribute values.
    pub fn accepts_selective_disclosure(&self) -> bool {
        match self {
            VerifierMode::SelectiveDisclosure => true,
            VerifierMode::Embedded | VerifierMode::Universal => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerifierMode::Embedded => "embedded",
            VerifierMode::Universal => "universal",
            VerifierMode::SelectiveDisclosure => "selective-disclosure",
        }
    }
}

impl fmt::Display for VerifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerifierMode {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self> {
        VerifierMode::classify(s)
    }
}
