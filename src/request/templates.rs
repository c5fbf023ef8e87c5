//! Static credential and query templates for the KYC age claim

use serde_json::{json, Map, Value};

use crate::domain::{
    CircuitId, CredentialRequest, Did, Operator, Predicate, ProofRequest, ProofType, Query,
    RevocationOptions,
};

use super::builder::ProofRequestBuilder;

/// JSON schema of the KYC age credential.
pub const KYC_AGE_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/iden3/claim-schema-vocab/main/schemas/json/KYCAgeCredential-v3.json";

/// JSON-LD context of the (merklized) KYC age credential.
pub const KYC_V3_CONTEXT: &str =
    "https://raw.githubusercontent.com/iden3/claim-schema-vocab/main/schemas/json-ld/kyc-v3.json-ld";

pub const KYC_AGE_CREDENTIAL_TYPE: &str = "KYCAgeCredential";

/// Birthdays strictly before this date satisfy the age predicate.
pub const BIRTHDAY_THRESHOLD: u64 = 20020101;

pub const DOCUMENT_TYPE: u64 = 99;

/// Credential expiration used by the sample issuer (unix seconds).
pub const CREDENTIAL_EXPIRATION: u64 = 12345678888;

/// Attribute values carried by an issued KYC age credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KycAgeAttributes {
    /// `YYYYMMDD`
    pub birthday: u64,
    pub document_type: u64,
}

impl Default for KycAgeAttributes {
    fn default() -> Self {
        Self {
            birthday: 19960424,
            document_type: DOCUMENT_TYPE,
        }
    }
}

/// Request for a KYC age credential about `subject`.
pub fn kyc_age_credential(
    subject: &Did,
    attributes: KycAgeAttributes,
    revocation: &RevocationOptions,
) -> CredentialRequest {
    let mut credential_subject = Map::new();
    credential_subject.insert("id".into(), Value::String(subject.to_string()));
    credential_subject.insert("birthday".into(), json!(attributes.birthday));
    credential_subject.insert("documentType".into(), json!(attributes.document_type));

    CredentialRequest {
        credential_schema: KYC_AGE_SCHEMA_URL.to_string(),
        credential_type: KYC_AGE_CREDENTIAL_TYPE.to_string(),
        credential_subject,
        expiration: CREDENTIAL_EXPIRATION,
        revocation_opts: revocation.clone(),
    }
}

/// `documentType == 99`
pub fn document_type_query() -> Query {
    Query::new(KYC_AGE_CREDENTIAL_TYPE, KYC_V3_CONTEXT).with_predicate(
        "documentType",
        Predicate::compare(Operator::Eq, DOCUMENT_TYPE),
    )
}

/// `birthday < 20020101`
pub fn birthday_query() -> Query {
    Query::new(KYC_AGE_CREDENTIAL_TYPE, KYC_V3_CONTEXT).with_predicate(
        "birthday",
        Predicate::compare(Operator::Lt, BIRTHDAY_THRESHOLD),
    )
}

/// Discloses the birthday value instead of comparing it.
pub fn birthday_disclosure_query() -> Query {
    Query::new(KYC_AGE_CREDENTIAL_TYPE, KYC_V3_CONTEXT)
        .with_predicate("birthday", Predicate::Disclose)
}

/// Predefined claim flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimTemplate {
    /// Signature-based proof of the age predicate
    Sig,
    /// Merkle-tree-proof of the age predicate
    Mtp,
    /// V3 proof of the age predicate
    V3,
    /// V3 proof disclosing the birthday
    SelectiveDisclosure,
}

impl ClaimTemplate {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "sig" => Some(ClaimTemplate::Sig),
            "mtp" => Some(ClaimTemplate::Mtp),
            "v3" => Some(ClaimTemplate::V3),
            "selective-disclosure" | "sd" => Some(ClaimTemplate::SelectiveDisclosure),
            _ => None,
        }
    }

    pub fn circuit_id(&self) -> CircuitId {
        match self {
            ClaimTemplate::Sig => CircuitId::AtomicQuerySigV2OnChain,
            ClaimTemplate::Mtp => CircuitId::AtomicQueryMtpV2OnChain,
            ClaimTemplate::V3 | ClaimTemplate::SelectiveDisclosure => {
                CircuitId::AtomicQueryV3OnChain
            }
        }
    }

    /// On-chain proof request for this flow.
    pub fn request(&self, request_id: u64) -> ProofRequest {
        match self {
            ClaimTemplate::Sig | ClaimTemplate::Mtp => {
                ProofRequestBuilder::new(request_id, self.circuit_id(), birthday_query()).build()
            }
            ClaimTemplate::V3 => {
                let query = birthday_query()
                    .with_proof_type(ProofType::BjjSignature)
                    .with_skip_claim_revocation_check(false);
                ProofRequestBuilder::new(request_id, self.circuit_id(), query)
                    .nullifier_session_id(0)
                    .build()
            }
            ClaimTemplate::SelectiveDisclosure => {
                let query = birthday_disclosure_query()
                    .with_proof_type(ProofType::Iden3SparseMerkleTreeProof)
                    .with_skip_claim_revocation_check(false);
                ProofRequestBuilder::new(request_id, self.circuit_id(), query)
                    .nullifier_session_id(0)
                    .build()
            }
        }
    }
}

/// Off-chain request pair: a V3 query opening group 1 and a linked
/// multi-query adding a `$ne` predicate on the same credential.
pub fn linked_multi_query(first_id: u64, nullifier_session_id: impl Into<Value>) -> [ProofRequest; 2] {
    let v3 = ProofRequestBuilder::new(
        first_id,
        CircuitId::AtomicQueryV3,
        document_type_query()
            .with_group_id(1)
            .with_proof_type(ProofType::BjjSignature),
    )
    .nullifier_session_id(nullifier_session_id)
    .build();

    let linked = ProofRequestBuilder::new(
        first_id + 1,
        CircuitId::LinkedMultiQuery10,
        Query::new(KYC_AGE_CREDENTIAL_TYPE, KYC_V3_CONTEXT)
            .with_group_id(1)
            .with_proof_type(ProofType::BjjSignature)
            .with_predicate("birthday", Predicate::compare(Operator::Ne, BIRTHDAY_THRESHOLD)),
    )
    .build();

    [v3, linked]
}
