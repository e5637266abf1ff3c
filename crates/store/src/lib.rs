//! Commitment store for commit-reveal auctions.
//!
//! This crate models the on-chain side of the commit-reveal flow:
//!
//! - fixed-size slot arrays for commitments and bidder addresses, with
//!   unfilled slots holding the per-context null commitment
//! - reveal verification: every revealed bid must open the commitment
//!   stored in its submission slot
//! - settlement recording: proved public values are bound back to the
//!   stored commitment array and constraint bounds before the outcome is
//!   accepted
//!
//! The store is the interface the proving engine hands results to; proof
//! verification itself lives in the settler.

pub mod error;
pub mod state;

pub use error::StoreError;
pub use state::{CommitmentStore, StorePhase};
