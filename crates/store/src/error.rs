//! Commitment store error types.

use thiserror::Error;

use crate::state::StorePhase;

/// Errors that can occur in the commitment store.
///
/// Reveal mismatches are consistency failures, distinct from malformed
/// input: they mean a bidder's revealed bid does not open the stored
/// commitment, and the auction must not proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("auction is full: all {capacity} slots committed")]
    AuctionFull { capacity: usize },

    #[error("bidder already committed in slot {slot}")]
    AlreadyCommitted { slot: usize },

    #[error("the empty-slot sentinel cannot be submitted as a commitment")]
    NullCommitmentSubmitted,

    #[error("invalid phase. Expected: {expected:?}, Got: {got:?}")]
    InvalidPhase {
        expected: StorePhase,
        got: StorePhase,
    },

    #[error("expected {expected} revealed bids, got {got}")]
    RevealCountMismatch { expected: usize, got: usize },

    #[error("commitment at slot {slot} does not match the revealed bid")]
    CommitmentMismatch { slot: usize },

    #[error("proved public values do not match the stored commitments")]
    PublicValuesMismatch,
}
