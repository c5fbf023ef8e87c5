//! Proof-gated claim state machine
//!
//! A claim walks from credential issuance to on-chain acceptance:
//!
//! ```text
//! Start → IdentitiesReady → CredentialIssued → RevocationPublished
//!       → StateTransitioned → ChallengeBound → ProofGenerated
//!       → ProofLocallyVerified → StatusChecked ─┬→ AlreadySatisfied
//!                                               └→ Submitted ─┬→ Terminal
//!                                                             └→ MintPending → Minted
//! ```
//!
//! A request the verifier already reports as verified is never submitted
//! again. The mint step only runs against universal verifiers.

mod orchestrator;

pub use orchestrator::{ClaimConfig, ClaimOrchestrator};
