//! Off-circuit permutation verification.
//!
//! The non-circuit counterpart of the in-circuit checks: where the circuit
//! proves the gather with a one-hot selector sum, this form does an
//! index-validated lookup into the original array, which is cheaper outside
//! a constraint system.

use auction_circuit::PermutationMode;
use auction_types::{NormalizedBid, SortedBid, AUCTION_CAPACITY};

use crate::error::SimulatorError;

/// Verify that `sorted` is a genuine rearrangement of `original`.
///
/// Checks, in order: non-increasing price across adjacent positions; each
/// claimed original slot exists and holds the claimed price and amount;
/// and, in [`PermutationMode::Strict`], that every slot is claimed exactly
/// once. Legacy mode skips the last check, reproducing the original
/// design's looser guarantee.
pub fn verify_permutation(
    original: &[NormalizedBid; AUCTION_CAPACITY],
    sorted: &[SortedBid; AUCTION_CAPACITY],
    mode: PermutationMode,
) -> Result<(), SimulatorError> {
    for position in 1..AUCTION_CAPACITY {
        if sorted[position].price > sorted[position - 1].price {
            return Err(SimulatorError::OrderViolation { position });
        }
    }

    for (position, entry) in sorted.iter().enumerate() {
        let source = original.get(entry.original_index as usize).ok_or(
            SimulatorError::ClaimOutOfRange {
                position,
                claimed: entry.original_index,
            },
        )?;
        if source.price != entry.price {
            return Err(SimulatorError::SelectionMismatch {
                position,
                claimed: entry.original_index,
                field: "price",
            });
        }
        if source.amount != entry.amount {
            return Err(SimulatorError::SelectionMismatch {
                position,
                claimed: entry.original_index,
                field: "amount",
            });
        }
    }

    if mode == PermutationMode::Strict {
        let mut claims = [0usize; AUCTION_CAPACITY];
        for entry in sorted {
            claims[entry.original_index as usize] += 1;
        }
        for (slot, &count) in claims.iter().enumerate() {
            if count != 1 {
                return Err(SimulatorError::NotABijection { slot, count });
            }
        }
    }

    Ok(())
}
