//! Proof request construction
//!
//! - [`ProofRequestBuilder`] for single requests
//! - KYC age credential and query templates
//! - Authorization and contract-invoke message assembly

pub mod builder;
pub mod message;
pub mod templates;

pub use builder::{build, ProofRequestBuilder};
pub use message::{build_authorization_message, build_contract_invoke_request};
pub use templates::{kyc_age_credential, linked_multi_query, ClaimTemplate, KycAgeAttributes};
