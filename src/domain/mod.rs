//! Domain models for the claim orchestrator
//!
//! Typed data model for proof requests, proofs, protocol messages,
//! verifier modes and claim attempt states.

mod claim;
mod identity;
mod message;
mod mode;
mod proof;
mod request;
mod types;

pub use claim::*;
pub use identity::*;
pub use message::*;
pub use mode::*;
pub use proof::*;
pub use request::*;
pub use types::*;
