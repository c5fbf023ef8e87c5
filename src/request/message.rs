//! Protocol message assembly

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    AuthorizationRequestBody, AuthorizationRequestMessage, ContractInvokeRequestBody,
    ContractInvokeRequestMessage, Did, ProofRequest, TransactionData,
    AUTHORIZATION_REQUEST_MESSAGE_TYPE, CONTRACT_INVOKE_REQUEST_MESSAGE_TYPE,
    PLAIN_MESSAGE_MEDIA_TYPE,
};

/// Wrap `scope` in an authorization request from `from`.
///
/// The message id is a fresh UUID and opens its own thread. Scope order is
/// kept as given.
pub fn build_authorization_message(
    from: &Did,
    scope: Vec<ProofRequest>,
    callback_url: impl Into<String>,
    reason: impl Into<String>,
    message: impl Into<String>,
) -> AuthorizationRequestMessage {
    let id = Uuid::new_v4().to_string();
    AuthorizationRequestMessage {
        thid: id.clone(),
        id,
        typ: PLAIN_MESSAGE_MEDIA_TYPE.to_string(),
        message_type: AUTHORIZATION_REQUEST_MESSAGE_TYPE.to_string(),
        from: from.to_string(),
        created_time: Some(Utc::now().timestamp()),
        body: AuthorizationRequestBody {
            callback_url: callback_url.into(),
            reason: reason.into(),
            message: message.into(),
            did_doc: None,
            scope,
        },
    }
}

/// Ask a wallet to call `transaction_data` with proofs for `scope`.
pub fn build_contract_invoke_request(
    transaction_data: TransactionData,
    scope: Vec<ProofRequest>,
    reason: impl Into<String>,
) -> ContractInvokeRequestMessage {
    let id = Uuid::new_v4().to_string();
    ContractInvokeRequestMessage {
        thid: id.clone(),
        id,
        typ: PLAIN_MESSAGE_MEDIA_TYPE.to_string(),
        message_type: CONTRACT_INVOKE_REQUEST_MESSAGE_TYPE.to_string(),
        from: None,
        body: ContractInvokeRequestBody {
            reason: reason.into(),
            transaction_data,
            scope,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::templates::{linked_multi_query, ClaimTemplate};

    #[test]
    fn test_authorization_message_envelope() {
        let from = Did::from("did:opid:optimism:sepolia:verifier");
        let scope = linked_multi_query(19, 0).to_vec();

        let msg = build_authorization_message(
            &from,
            scope.clone(),
            "https://verifier.example.org/callback",
            "age verification",
            "prove you were born before 2002",
        );

        assert_eq!(msg.thid, msg.id);
        assert!(Uuid::parse_str(&msg.id).is_ok());
        assert_eq!(msg.message_type, AUTHORIZATION_REQUEST_MESSAGE_TYPE);
        assert_eq!(msg.from, "did:opid:optimism:sepolia:verifier");
        assert!(msg.created_time.is_some());
        assert_eq!(msg.body.scope, scope);

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], AUTHORIZATION_REQUEST_MESSAGE_TYPE);
        assert_eq!(value["body"]["callbackUrl"], "https://verifier.example.org/callback");
        assert_eq!(value["body"]["scope"][0]["id"], 19);
        assert_eq!(value["body"]["scope"][1]["id"], 20);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let from = Did::from("did:opid:optimism:sepolia:verifier");
        let a = build_authorization_message(&from, vec![], "cb", "r", "m");
        let b = build_authorization_message(&from, vec![], "cb", "r", "m");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_contract_invoke_request() {
        let tx = TransactionData {
            contract_address: "0x76a9d02221f4142bbb5c07e50643ccbe0ed6406c".to_string(),
            method_id: "b68967e2".to_string(),
            chain_id: 11155420,
            network: "opt-sepolia".to_string(),
        };
        let msg = build_contract_invoke_request(tx.clone(), vec![ClaimTemplate::Sig.request(1)], "airdrop");

        assert_eq!(msg.message_type, CONTRACT_INVOKE_REQUEST_MESSAGE_TYPE);
        assert_eq!(msg.body.transaction_data, tx);

        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("from").is_none());
        assert_eq!(value["body"]["transaction_data"]["chain_id"], 11155420);
    }
}
