//! Proof shapes: the prover's native form and the verifier calldata form.

use alloy::primitives::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// BN254 field element as emitted by the prover.
///
/// Serialized as a decimal string. Values are carried verbatim, never
/// reduced or padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement(pub U256);

impl FieldElement {
    pub fn to_u256(&self) -> U256 {
        self.0
    }
}

impl From<U256> for FieldElement {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl FromStr for FieldElement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        U256::from_str(s.trim())
            .map(FieldElement)
            .map_err(|e| format!("invalid field element {s:?}: {e}"))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FieldElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldElementVisitor;

        impl Visitor<'_> for FieldElementVisitor {
            type Value = FieldElement;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal (or 0x-prefixed) field element string or an integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(FieldElement::from(v))
            }
        }

        deserializer.deserialize_any(FieldElementVisitor)
    }
}

/// Groth16 proof in the prover's projective layout.
///
/// `pi_a` and `pi_c` carry a third normalization coordinate; `pi_b` rows
/// are `[c0, c1]` extension-field coefficients followed by a normalization
/// row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProof {
    pub pi_a: [FieldElement; 3],
    pub pi_b: [[FieldElement; 2]; 3],
    pub pi_c: [FieldElement; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

/// Output of the external proof service for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedProof {
    pub proof: RawProof,
    /// Public inputs, in the circuit's declared order.
    pub pub_signals: Vec<FieldElement>,
}

/// Arguments of `submitZKPResponse` in the verifier's layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnChainProofArgs {
    pub inputs: Vec<U256>,
    pub a: [U256; 2],
    pub b: [[U256; 2]; 2],
    pub c: [U256; 2],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_element_decimal_serde() {
        let fe: FieldElement = serde_json::from_value(json!(
            "21888242871839275222246405745257275088548364400416034343698204186575808495616"
        ))
        .unwrap();
        let back = serde_json::to_value(fe).unwrap();
        assert_eq!(
            back,
            json!("21888242871839275222246405745257275088548364400416034343698204186575808495616")
        );
    }

    #[test]
    fn test_field_element_accepts_integers_and_hex() {
        let from_int: FieldElement = serde_json::from_value(json!(20020101)).unwrap();
        assert_eq!(from_int, FieldElement::from(20020101u64));

        let from_hex: FieldElement = serde_json::from_value(json!("0x10")).unwrap();
        assert_eq!(from_hex, FieldElement::from(16u64));
    }

    #[test]
    fn test_field_element_rejects_garbage() {
        let res: Result<FieldElement, _> = serde_json::from_value(json!("not-a-number"));
        assert!(res.is_err());
    }

    #[test]
    fn test_generated_proof_parses_prover_json() {
        let proof: GeneratedProof = serde_json::from_value(json!({
            "proof": {
                "pi_a": ["1", "2", "1"],
                "pi_b": [["3", "4"], ["5", "6"], ["1", "0"]],
                "pi_c": ["7", "8", "1"],
                "protocol": "groth16",
                "curve": "bn128"
            },
            "pub_signals": ["9", "10", "11"]
        }))
        .unwrap();

        assert_eq!(proof.proof.pi_b[1][0], FieldElement::from(5u64));
        assert_eq!(proof.pub_signals.len(), 3);
        assert_eq!(proof.proof.protocol.as_deref(), Some("groth16"));
    }
}
