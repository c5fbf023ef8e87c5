//! Proof request construction

use serde_json::{Map, Value};

use crate::domain::{CircuitId, ProofRequest, Query};

/// Builder for a single [`ProofRequest`].
///
/// The builder does not check that the predicate is satisfiable; the proof
/// service reports that at generation time.
#[derive(Debug, Clone)]
pub struct ProofRequestBuilder {
    id: u64,
    circuit_id: CircuitId,
    query: Query,
    optional: bool,
    params: Map<String, Value>,
}

impl ProofRequestBuilder {
    pub fn new(id: u64, circuit_id: CircuitId, query: Query) -> Self {
        Self {
            id,
            circuit_id,
            query,
            optional: false,
            params: Map::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Session-scoped nullifier; accepts numbers or decimal strings.
    pub fn nullifier_session_id(self, session_id: impl Into<Value>) -> Self {
        self.param("nullifierSessionId", session_id)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> ProofRequest {
        ProofRequest {
            id: self.id,
            circuit_id: self.circuit_id,
            optional: self.optional,
            query: self.query,
            params: if self.params.is_empty() {
                None
            } else {
                Some(self.params)
            },
        }
    }
}

/// One-shot form of [`ProofRequestBuilder`].
pub fn build(
    id: u64,
    circuit_id: CircuitId,
    query: Query,
    params: Option<Map<String, Value>>,
) -> ProofRequest {
    let mut builder = ProofRequestBuilder::new(id, circuit_id, query);
    for (key, value) in params.unwrap_or_default() {
        builder = builder.param(key, value);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Operator, Predicate};
    use serde_json::json;

    fn birthday_query() -> Query {
        Query::new("KYCAgeCredential", "ctx")
            .with_predicate("birthday", Predicate::compare(Operator::Lt, 20020101))
    }

    #[test]
    fn test_build_without_params() {
        let request = ProofRequestBuilder::new(1, CircuitId::AtomicQueryMtpV2OnChain, birthday_query())
            .build();

        assert_eq!(request.id, 1);
        assert!(request.params.is_none());
        assert!(!request.optional);

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("params").is_none());
        assert_eq!(value["circuitId"], "credentialAtomicQueryMTPV2OnChain");
    }

    #[test]
    fn test_build_with_nullifier() {
        let request = ProofRequestBuilder::new(3, CircuitId::AtomicQueryV3OnChain, birthday_query())
            .nullifier_session_id(0)
            .build();

        assert_eq!(request.nullifier_session_id(), Some(&json!(0)));
    }

    #[test]
    fn test_one_shot_build_copies_params() {
        let mut params = Map::new();
        params.insert("nullifierSessionId".into(), json!("12345"));

        let request = build(2, CircuitId::AtomicQueryV3, birthday_query(), Some(params));
        assert_eq!(request.nullifier_session_id(), Some(&json!("12345")));
        assert_eq!(request.query, birthday_query());
    }
}
