//! Commitment store state machine.
//!
//! Fixed-size slot layout, indexed by submission order: slot `i` holds the
//! i-th bidder's commitment, defaulting to the null commitment until
//! filled. `commitment_count` tracks the next free slot. The layout
//! mirrors what the on-chain contract stores, so the public commitment
//! array a proof commits to can be checked against it verbatim.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use auction_circuit::{bind_commitment, null_commitment};
use auction_types::circuit_io::PublicValues;
use auction_types::{AggregateResult, AuctionConstraints, Bid, FieldElement, AUCTION_CAPACITY};

use crate::error::StoreError;

/// Auction lifecycle phase.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum StorePhase {
    /// Accepting commitments.
    Collecting,
    /// All reveals checked against the stored commitments.
    Revealed,
    /// Settlement recorded against proved public values.
    Settled,
}

/// In-memory commitment store for one auction instance.
#[derive(Clone, Debug)]
pub struct CommitmentStore {
    constraints: AuctionConstraints,
    commitments: [FieldElement; AUCTION_CAPACITY],
    bidder_addresses: [FieldElement; AUCTION_CAPACITY],
    commitment_count: usize,
    phase: StorePhase,
    outcome: Option<AggregateResult>,
}

impl CommitmentStore {
    /// Open a store for one auction.
    ///
    /// Every slot starts at the null commitment for this context; the
    /// sentinel is fixed before any bidder submits.
    pub fn new(constraints: AuctionConstraints) -> Self {
        let empty = null_commitment(constraints.context_id);
        Self {
            constraints,
            commitments: [empty; AUCTION_CAPACITY],
            bidder_addresses: [FieldElement::ZERO; AUCTION_CAPACITY],
            commitment_count: 0,
            phase: StorePhase::Collecting,
            outcome: None,
        }
    }

    pub fn constraints(&self) -> &AuctionConstraints {
        &self.constraints
    }

    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    pub fn commitment_count(&self) -> usize {
        self.commitment_count
    }

    /// The full slot array, padding sentinels included.
    pub fn commitments(&self) -> &[FieldElement; AUCTION_CAPACITY] {
        &self.commitments
    }

    pub fn outcome(&self) -> Option<&AggregateResult> {
        self.outcome.as_ref()
    }

    fn expect_phase(&self, expected: StorePhase) -> Result<(), StoreError> {
        if self.phase != expected {
            return Err(StoreError::InvalidPhase {
                expected,
                got: self.phase,
            });
        }
        Ok(())
    }

    /// Record a bidder's commitment in the next free slot.
    pub fn submit(
        &mut self,
        bidder_address: FieldElement,
        commitment: FieldElement,
    ) -> Result<usize, StoreError> {
        self.expect_phase(StorePhase::Collecting)?;
        if self.commitment_count == AUCTION_CAPACITY {
            return Err(StoreError::AuctionFull {
                capacity: AUCTION_CAPACITY,
            });
        }
        if commitment == null_commitment(self.constraints.context_id) {
            return Err(StoreError::NullCommitmentSubmitted);
        }
        for slot in 0..self.commitment_count {
            if self.bidder_addresses[slot] == bidder_address {
                return Err(StoreError::AlreadyCommitted { slot });
            }
        }

        let slot = self.commitment_count;
        self.commitments[slot] = commitment;
        self.bidder_addresses[slot] = bidder_address;
        self.commitment_count += 1;
        Ok(slot)
    }

    /// Check every revealed bid against its stored commitment.
    ///
    /// Reveals arrive in submission-slot order and must cover exactly the
    /// filled slots. A mismatch is a consistency failure: the auction must
    /// not proceed to settlement.
    pub fn verify_reveals(&mut self, bids: &[Bid]) -> Result<(), StoreError> {
        self.expect_phase(StorePhase::Collecting)?;
        if bids.len() != self.commitment_count {
            return Err(StoreError::RevealCountMismatch {
                expected: self.commitment_count,
                got: bids.len(),
            });
        }

        for (slot, bid) in bids.iter().enumerate() {
            let recomputed = bind_commitment(bid, self.constraints.context_id);
            if recomputed != self.commitments[slot] {
                return Err(StoreError::CommitmentMismatch { slot });
            }
        }

        self.phase = StorePhase::Revealed;
        Ok(())
    }

    /// Record a settlement whose proof has already been verified.
    ///
    /// Binds the proved public values back to this store: the commitment
    /// array, the context, and the constraint bounds must all match what
    /// bidders actually committed against.
    pub fn record_settlement(
        &mut self,
        public: &PublicValues,
    ) -> Result<AggregateResult, StoreError> {
        self.expect_phase(StorePhase::Revealed)?;
        if public.context_id != self.constraints.context_id
            || public.minimum_price != self.constraints.minimum_price
            || public.maximum_amount != self.constraints.maximum_amount
            || public.commitments != self.commitments
        {
            return Err(StoreError::PublicValuesMismatch);
        }

        let outcome = AggregateResult {
            total_fill: public.total_fill,
            total_value: public.total_value,
            num_winners: public.num_winners,
            winner_bitmask: public.winner_bitmask,
        };
        self.outcome = Some(outcome);
        self.phase = StorePhase::Settled;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(v: u64) -> FieldElement {
        FieldElement::from_u64(v)
    }

    fn constraints() -> AuctionConstraints {
        AuctionConstraints::new(fe(50), fe(100), fe(7)).unwrap()
    }

    fn bid(price: u64, amount: u64, bidder: u64) -> Bid {
        Bid::new(fe(price), fe(amount), fe(bidder))
    }

    #[test]
    fn test_slots_default_to_null_commitment() {
        let store = CommitmentStore::new(constraints());
        let empty = null_commitment(fe(7));
        assert!(store.commitments().iter().all(|c| *c == empty));
        assert_eq!(store.commitment_count(), 0);
    }

    #[test]
    fn test_submit_fills_slots_in_order() {
        let mut store = CommitmentStore::new(constraints());
        let c1 = bind_commitment(&bid(90, 5, 11), fe(7));
        let c2 = bind_commitment(&bid(100, 3, 22), fe(7));

        assert_eq!(store.submit(fe(11), c1).unwrap(), 0);
        assert_eq!(store.submit(fe(22), c2).unwrap(), 1);
        assert_eq!(store.commitment_count(), 2);
        assert_eq!(store.commitments()[0], c1);
        assert_eq!(store.commitments()[1], c2);
    }

    #[test]
    fn test_duplicate_bidder_rejected() {
        let mut store = CommitmentStore::new(constraints());
        store
            .submit(fe(11), bind_commitment(&bid(90, 5, 11), fe(7)))
            .unwrap();
        let err = store
            .submit(fe(11), bind_commitment(&bid(95, 5, 11), fe(7)))
            .unwrap_err();
        assert_eq!(err, StoreError::AlreadyCommitted { slot: 0 });
    }

    #[test]
    fn test_null_sentinel_rejected() {
        let mut store = CommitmentStore::new(constraints());
        let err = store.submit(fe(11), null_commitment(fe(7))).unwrap_err();
        assert_eq!(err, StoreError::NullCommitmentSubmitted);
    }

    #[test]
    fn test_capacity_enforced() {
        let mut store = CommitmentStore::new(constraints());
        for i in 0..AUCTION_CAPACITY as u64 {
            store
                .submit(fe(i + 1), bind_commitment(&bid(60 + i, 1, i + 1), fe(7)))
                .unwrap();
        }
        let err = store
            .submit(fe(99), bind_commitment(&bid(70, 1, 99), fe(7)))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::AuctionFull {
                capacity: AUCTION_CAPACITY,
            }
        );
    }

    #[test]
    fn test_reveal_mismatch_is_a_consistency_error() {
        let mut store = CommitmentStore::new(constraints());
        store
            .submit(fe(11), bind_commitment(&bid(90, 5, 11), fe(7)))
            .unwrap();

        // The bidder reveals a different price than they committed to.
        let err = store.verify_reveals(&[bid(91, 5, 11)]).unwrap_err();
        assert_eq!(err, StoreError::CommitmentMismatch { slot: 0 });
        assert_eq!(store.phase(), StorePhase::Collecting);
    }

    #[test]
    fn test_reveal_count_checked() {
        let mut store = CommitmentStore::new(constraints());
        store
            .submit(fe(11), bind_commitment(&bid(90, 5, 11), fe(7)))
            .unwrap();
        let err = store.verify_reveals(&[]).unwrap_err();
        assert_eq!(
            err,
            StoreError::RevealCountMismatch {
                expected: 1,
                got: 0,
            }
        );
    }

    #[test]
    fn test_settlement_binds_to_stored_commitments() {
        let mut store = CommitmentStore::new(constraints());
        let reveal = bid(90, 5, 11);
        store
            .submit(fe(11), bind_commitment(&reveal, fe(7)))
            .unwrap();
        store.verify_reveals(&[reveal]).unwrap();

        let mut public = PublicValues {
            total_fill: fe(5),
            total_value: fe(450),
            num_winners: 1,
            winner_bitmask: 0b1,
            commitments: *store.commitments(),
            context_id: fe(7),
            minimum_price: fe(50),
            maximum_amount: fe(100),
        };

        // Tampered commitment array is rejected.
        let mut tampered = public;
        tampered.commitments[0] = fe(123);
        assert_eq!(
            store.record_settlement(&tampered).unwrap_err(),
            StoreError::PublicValuesMismatch
        );

        // Tampered constraint bounds are rejected.
        let mut tampered = public;
        tampered.minimum_price = fe(1);
        assert_eq!(
            store.record_settlement(&tampered).unwrap_err(),
            StoreError::PublicValuesMismatch
        );

        let outcome = store.record_settlement(&public).unwrap();
        assert_eq!(outcome.num_winners, 1);
        assert_eq!(store.phase(), StorePhase::Settled);

        // Settling twice is a phase error.
        public.num_winners = 0;
        assert!(matches!(
            store.record_settlement(&public).unwrap_err(),
            StoreError::InvalidPhase { .. }
        ));
    }
}
