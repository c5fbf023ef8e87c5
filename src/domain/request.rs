//! Proof request descriptors
//!
//! A [`ProofRequest`] names a circuit and a declarative predicate over a
//! credential type. It is built once per claim attempt and consumed once by
//! the proof service.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::types::{CircuitId, ProofType};

/// Wildcard accepted as "any issuer".
pub const ANY_ISSUER: &str = "*";

/// Comparison operator on a credential attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Lt,
    Gt,
    Ne,
    In,
    Nin,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Lt => "$lt",
            Operator::Gt => "$gt",
            Operator::Ne => "$ne",
            Operator::In => "$in",
            Operator::Nin => "$nin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "$eq" => Some(Operator::Eq),
            "$lt" => Some(Operator::Lt),
            "$gt" => Some(Operator::Gt),
            "$ne" => Some(Operator::Ne),
            "$in" => Some(Operator::In),
            "$nin" => Some(Operator::Nin),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate on one credential attribute.
///
/// `Disclose` is the empty predicate `{}`: the attribute value itself is
/// revealed instead of a comparison result.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare { operator: Operator, value: Value },
    Disclose,
}

impl Predicate {
    pub fn compare(operator: Operator, value: impl Into<Value>) -> Self {
        Predicate::Compare {
            operator,
            value: value.into(),
        }
    }

    pub fn is_disclosure(&self) -> bool {
        matches!(self, Predicate::Disclose)
    }
}

impl Serialize for Predicate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Predicate::Compare { operator, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(operator.as_str(), value)?;
                map.end()
            }
            Predicate::Disclose => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for Predicate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (None, _) => Ok(Predicate::Disclose),
            (Some((op, value)), None) => {
                let operator = Operator::parse(&op)
                    .ok_or_else(|| de::Error::custom(format!("unknown operator: {op}")))?;
                Ok(Predicate::Compare { operator, value })
            }
            (Some(_), Some(_)) => Err(de::Error::custom(
                "predicate must contain at most one operator",
            )),
        }
    }
}

/// Declarative query over a credential type and context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u32>,
    pub allowed_issuers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_type: Option<ProofType>,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_claim_revocation_check: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub credential_subject: BTreeMap<String, Predicate>,
}

impl Query {
    /// Query accepting any issuer, with no attribute predicates yet.
    pub fn new(credential_type: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            group_id: None,
            allowed_issuers: vec![ANY_ISSUER.to_string()],
            proof_type: None,
            credential_type: credential_type.into(),
            context: context.into(),
            skip_claim_revocation_check: None,
            credential_subject: BTreeMap::new(),
        }
    }

    pub fn with_predicate(mut self, attribute: impl Into<String>, predicate: Predicate) -> Self {
        self.credential_subject.insert(attribute.into(), predicate);
        self
    }

    pub fn with_allowed_issuers(mut self, issuers: Vec<String>) -> Self {
        self.allowed_issuers = issuers;
        self
    }

    pub fn with_group_id(mut self, group_id: u32) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_proof_type(mut self, proof_type: ProofType) -> Self {
        self.proof_type = Some(proof_type);
        self
    }

    pub fn with_skip_claim_revocation_check(mut self, skip: bool) -> Self {
        self.skip_claim_revocation_check = Some(skip);
        self
    }

    /// True when any attribute is disclosed rather than compared.
    pub fn is_selective_disclosure(&self) -> bool {
        self.credential_subject.values().any(Predicate::is_disclosure)
    }
}

/// A request for one zero-knowledge proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRequest {
    pub id: u64,
    pub circuit_id: CircuitId,
    #[serde(default)]
    pub optional: bool,
    pub query: Query,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

impl ProofRequest {
    pub fn nullifier_session_id(&self) -> Option<&Value> {
        self.params.as_ref()?.get("nullifierSessionId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicate_wire_format() {
        let lt = Predicate::compare(Operator::Lt, 20020101);
        assert_eq!(serde_json::to_value(&lt).unwrap(), json!({ "$lt": 20020101 }));

        let disclose = Predicate::Disclose;
        assert_eq!(serde_json::to_value(&disclose).unwrap(), json!({}));
    }

    #[test]
    fn test_predicate_parse() {
        let p: Predicate = serde_json::from_value(json!({ "$ne": 300 })).unwrap();
        assert_eq!(p, Predicate::compare(Operator::Ne, 300));

        let p: Predicate = serde_json::from_value(json!({})).unwrap();
        assert!(p.is_disclosure());

        assert!(serde_json::from_value::<Predicate>(json!({ "$like": 1 })).is_err());
        assert!(serde_json::from_value::<Predicate>(json!({ "$lt": 1, "$gt": 0 })).is_err());
    }

    #[test]
    fn test_query_serializes_like_protocol() {
        let query = Query::new("KYCAgeCredential", "https://example.org/kyc.jsonld")
            .with_predicate("birthday", Predicate::compare(Operator::Lt, 20020101));

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({
                "allowedIssuers": ["*"],
                "type": "KYCAgeCredential",
                "context": "https://example.org/kyc.jsonld",
                "credentialSubject": { "birthday": { "$lt": 20020101 } }
            })
        );
    }

    #[test]
    fn test_selective_disclosure_detection() {
        let q = Query::new("KYCAgeCredential", "ctx").with_predicate("birthday", Predicate::Disclose);
        assert!(q.is_selective_disclosure());

        let q = Query::new("KYCAgeCredential", "ctx")
            .with_predicate("birthday", Predicate::compare(Operator::Eq, 1));
        assert!(!q.is_selective_disclosure());
    }

    #[test]
    fn test_proof_request_params() {
        let request: ProofRequest = serde_json::from_value(json!({
            "id": 19,
            "circuitId": "credentialAtomicQueryV3OnChain-beta.1",
            "params": { "nullifierSessionId": "123443290439234342342423423423423" },
            "query": {
                "groupId": 1,
                "allowedIssuers": ["*"],
                "proofType": "BJJSignature2021",
                "type": "KYCAgeCredential",
                "context": "ctx",
                "credentialSubject": { "documentType": {} }
            }
        }))
        .unwrap();

        assert_eq!(request.circuit_id, CircuitId::AtomicQueryV3OnChain);
        assert_eq!(request.query.group_id, Some(1));
        assert!(!request.optional);
        assert_eq!(
            request.nullifier_session_id(),
            Some(&json!("123443290439234342342423423423423"))
        );
    }
}
