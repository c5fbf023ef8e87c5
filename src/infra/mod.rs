//! Infrastructure layer for the claim orchestrator
//!
//! Contains:
//! - Error types shared by every layer
//! - Trait definitions for delegated collaborators (identity wallet, proof
//!   service, verifier and reward contracts)
//! - JSON-RPC client for the external identity/proof agent

mod error;
mod rpc_agent;
mod traits;

pub use error::*;
pub use rpc_agent::{AgentConfig, RpcIdentityAgent, UNSATISFIABLE_PREDICATE_CODE};
pub use traits::*;
