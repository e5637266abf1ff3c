//! Off-circuit reference computation for the auction proving engine.
//!
//! Composes the bid normalizer, commitment binder, descending-price sort,
//! permutation self-check, greedy engine, and winner encoder into the
//! ground-truth oracle that circuit witnesses must match exactly. The
//! simulator is pure, deterministic, single-pass computation: no shared
//! state, no I/O, safe to call from any thread.
//!
//! The simulator also doubles as the prover's witness builder: a
//! [`Simulation`] carries the normalized bids and the sorted sequence in
//! exactly the shape the circuit consumes.

use auction_circuit::{bind_commitment, PermutationMode};
use auction_types::circuit_io::{CircuitInput, PublicValues};
use auction_types::{
    AggregateResult, AuctionConstraints, Bid, FieldElement, NormalizedBid, SortedBid,
    WinnerIndicator, AUCTION_CAPACITY,
};

pub mod encoder;
pub mod engine;
pub mod error;
pub mod normalizer;
pub mod permutation;
pub mod sort;

pub use error::SimulatorError;

/// The complete result of one reference run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simulation {
    pub constraints: AuctionConstraints,
    pub normalized: [NormalizedBid; AUCTION_CAPACITY],
    pub sorted: [SortedBid; AUCTION_CAPACITY],
    pub commitments: [FieldElement; AUCTION_CAPACITY],
    pub indicator: WinnerIndicator,
    pub aggregate: AggregateResult,
}

impl Simulation {
    /// The public values a proof of this run must expose.
    pub fn public_values(&self) -> PublicValues {
        PublicValues {
            total_fill: self.aggregate.total_fill,
            total_value: self.aggregate.total_value,
            num_winners: self.aggregate.num_winners,
            winner_bitmask: self.aggregate.winner_bitmask,
            commitments: self.commitments,
            context_id: self.constraints.context_id,
            minimum_price: self.constraints.minimum_price,
            maximum_amount: self.constraints.maximum_amount,
        }
    }

    /// The witness package for a proof attempt over this run.
    pub fn circuit_input(&self) -> CircuitInput {
        CircuitInput {
            constraints: self.constraints,
            commitments: self.commitments,
            bids: self.normalized,
            sorted: self.sorted,
        }
    }
}

/// Run the full reference computation over a revealed bid list.
///
/// Rejects malformed input (capacity, value ranges, zero price floor)
/// before any hashing, then normalizes, binds commitments, sorts,
/// self-checks the sort as a strict permutation, and selects winners.
pub fn simulate(
    bids: &[Bid],
    constraints: &AuctionConstraints,
) -> Result<Simulation, SimulatorError> {
    constraints.validate().map_err(SimulatorError::Input)?;
    let normalized = normalizer::normalize(bids)?;

    let commitments: [FieldElement; AUCTION_CAPACITY] = std::array::from_fn(|slot| {
        let entry = &normalized[slot];
        bind_commitment(
            &Bid::new(entry.price, entry.amount, entry.bidder_id),
            constraints.context_id,
        )
    });

    let sorted = sort::sort_bids(&normalized);
    permutation::verify_permutation(&normalized, &sorted, PermutationMode::Strict)?;

    let (indicator, aggregate) = engine::run(&sorted, constraints)?;
    encoder::verify_consistency(&indicator, &sorted, aggregate.winner_bitmask)?;

    Ok(Simulation {
        constraints: *constraints,
        normalized,
        sorted,
        commitments,
        indicator,
        aggregate,
    })
}
