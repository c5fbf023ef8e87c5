//! Protocol envelopes wrapping proof requests
//!
//! Plain-JSON messages of the iden3comm protocol. Scope order is significant:
//! the counterparty answers requests in the order they appear.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::request::ProofRequest;

/// Media type of unencrypted, unsigned protocol messages.
pub const PLAIN_MESSAGE_MEDIA_TYPE: &str = "application/iden3comm-plain-json";

/// Message type discriminator for authorization requests.
pub const AUTHORIZATION_REQUEST_MESSAGE_TYPE: &str =
    "https://iden3-communication.io/authorization/1.0/request";

/// Message type discriminator for contract invoke requests.
pub const CONTRACT_INVOKE_REQUEST_MESSAGE_TYPE: &str =
    "https://iden3-communication.io/proofs/1.0/contract-invoke-request";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequestBody {
    pub callback_url: String,
    pub reason: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did_doc: Option<Value>,
    pub scope: Vec<ProofRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRequestMessage {
    pub id: String,
    pub thid: String,
    pub typ: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
    pub body: AuthorizationRequestBody,
}

/// Target transaction of a contract invoke request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
    pub contract_address: String,
    pub method_id: String,
    pub chain_id: u64,
    pub network: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractInvokeRequestBody {
    pub reason: String,
    pub transaction_data: TransactionData,
    pub scope: Vec<ProofRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractInvokeRequestMessage {
    pub id: String,
    pub thid: String,
    pub typ: String,
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub body: ContractInvokeRequestBody,
}
