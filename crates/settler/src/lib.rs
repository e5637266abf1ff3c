//! Settlement layer for proven auctions.
//!
//! The settler sits between the fast, synchronous core and the heavy
//! proving black box:
//!
//! 1. Runs the reference computation over the revealed bids
//! 2. Rejects malformed or inconsistent auctions deterministically
//! 3. Builds the circuit witness from the simulation
//! 4. Generates a Groth16 proof of auction correctness
//! 5. Packages the proof with the public values the contract layer checks
//!
//! Settlement is permissionless: anyone holding the proving keys can run
//! it, and every successful run commits to the same public values.

pub mod prover;
pub mod service;

pub use prover::{
    generate_settlement_proof, prove_simulation, setup, verify_settlement_proof, AuctionProof,
    AuctionProvingKeys, ProverError,
};
pub use service::{SettlementService, SettlerConfig};
