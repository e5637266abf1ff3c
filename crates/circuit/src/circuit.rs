//! The auction-correctness constraint system.
//!
//! One [`AuctionCircuit`] instance proves, for a fixed-capacity auction:
//!
//! 1. every public commitment opens to the witnessed bid in this context;
//! 2. the witnessed sorted sequence is a genuine descending-price
//!    rearrangement of the witnessed bids;
//! 3. the dual-constraint greedy fill over that sequence yields exactly
//!    the public aggregates (fill, value, winner count, winner bitmask).
//!
//! Public inputs are allocated in the order fixed by
//! [`PublicValues::to_field_elements`]; the bids and the sorted sequence
//! are private.

use std::cmp::Ordering;

use ark_bn254::Fr;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use num_bigint::BigUint;

use auction_types::circuit_io::{CircuitInput, PublicValues};
use auction_types::{NormalizedBid, SortedBid, AUCTION_CAPACITY, VALUE_BITS};

use crate::commitment::bind_commitment_var;
use crate::permutation::{self, PermutationMode};
use crate::selection;

/// The auction-correctness circuit.
///
/// Assignment fields are `None` during parameter generation and populated
/// for proving; the permutation mode is part of the circuit shape, so a
/// proving key generated in one mode does not verify witnesses of the
/// other.
#[derive(Clone, Debug)]
pub struct AuctionCircuit {
    pub mode: PermutationMode,
    pub public: Option<PublicValues>,
    pub bids: Option<[NormalizedBid; AUCTION_CAPACITY]>,
    pub sorted: Option<[SortedBid; AUCTION_CAPACITY]>,
}

impl AuctionCircuit {
    /// A circuit with no assignment, for trusted-setup parameter
    /// generation.
    pub fn blank(mode: PermutationMode) -> Self {
        Self {
            mode,
            public: None,
            bids: None,
            sorted: None,
        }
    }

    /// A fully-assigned circuit for one proof attempt.
    pub fn with_assignment(input: &CircuitInput, public: PublicValues, mode: PermutationMode) -> Self {
        Self {
            mode,
            public: Some(public),
            bids: Some(input.bids),
            sorted: Some(input.sorted),
        }
    }
}

impl ConstraintSynthesizer<Fr> for AuctionCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let public = self.public;
        let bids = self.bids;
        let sorted = self.sorted;

        // Public inputs, in the verifier's order.
        let total_fill = FpVar::new_input(cs.clone(), || {
            public
                .map(|p| p.total_fill.into_fr())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let total_value = FpVar::new_input(cs.clone(), || {
            public
                .map(|p| p.total_value.into_fr())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let num_winners = FpVar::new_input(cs.clone(), || {
            public
                .map(|p| Fr::from(p.num_winners as u64))
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let winner_bitmask = FpVar::new_input(cs.clone(), || {
            public
                .map(|p| Fr::from(p.winner_bitmask))
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let mut commitments = Vec::with_capacity(AUCTION_CAPACITY);
        for slot in 0..AUCTION_CAPACITY {
            commitments.push(FpVar::new_input(cs.clone(), || {
                public
                    .map(|p| p.commitments[slot].into_fr())
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }
        let context_id = FpVar::new_input(cs.clone(), || {
            public
                .map(|p| p.context_id.into_fr())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let minimum_price = FpVar::new_input(cs.clone(), || {
            public
                .map(|p| p.minimum_price.into_fr())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let maximum_amount = FpVar::new_input(cs.clone(), || {
            public
                .map(|p| p.maximum_amount.into_fr())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;

        // Private witness: the normalized bids, slot by slot.
        let mut original_prices = Vec::with_capacity(AUCTION_CAPACITY);
        let mut original_amounts = Vec::with_capacity(AUCTION_CAPACITY);
        let mut original_bidders = Vec::with_capacity(AUCTION_CAPACITY);
        for slot in 0..AUCTION_CAPACITY {
            original_prices.push(FpVar::new_witness(cs.clone(), || {
                bids.map(|b| b[slot].price.into_fr())
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
            original_amounts.push(FpVar::new_witness(cs.clone(), || {
                bids.map(|b| b[slot].amount.into_fr())
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
            original_bidders.push(FpVar::new_witness(cs.clone(), || {
                bids.map(|b| b[slot].bidder_id.into_fr())
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }

        // Range discipline: prices and amounts fit VALUE_BITS, which keeps
        // every later comparison inside the gadget's sound range and the
        // value aggregate below the modulus.
        let value_bound = FpVar::Constant(Fr::from(BigUint::from(1u8) << VALUE_BITS));
        for value in original_prices.iter().chain(original_amounts.iter()) {
            value.enforce_cmp(&value_bound, Ordering::Less, false)?;
        }

        // Each public commitment opens to the witnessed bid in this context.
        for slot in 0..AUCTION_CAPACITY {
            let bound = bind_commitment_var(
                cs.clone(),
                &original_prices[slot],
                &original_amounts[slot],
                &original_bidders[slot],
                &context_id,
            )?;
            bound.enforce_equal(&commitments[slot])?;
        }

        // Private witness: the claimed rearrangement.
        let mut sorted_prices = Vec::with_capacity(AUCTION_CAPACITY);
        let mut sorted_amounts = Vec::with_capacity(AUCTION_CAPACITY);
        let mut sorted_indices = Vec::with_capacity(AUCTION_CAPACITY);
        for position in 0..AUCTION_CAPACITY {
            sorted_prices.push(FpVar::new_witness(cs.clone(), || {
                sorted
                    .map(|s| s[position].price.into_fr())
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
            sorted_amounts.push(FpVar::new_witness(cs.clone(), || {
                sorted
                    .map(|s| s[position].amount.into_fr())
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
            sorted_indices.push(FpVar::new_witness(cs.clone(), || {
                sorted
                    .map(|s| Fr::from(s[position].original_index as u64))
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }

        // The claimed sequence is a genuine rearrangement.
        permutation::enforce_descending_order(&sorted_prices)?;
        let matrix = permutation::selection_matrix(&sorted_indices)?;
        permutation::enforce_selection(&matrix, &original_prices, &sorted_prices)?;
        permutation::enforce_selection(&matrix, &original_amounts, &sorted_amounts)?;
        if self.mode == PermutationMode::Strict {
            permutation::enforce_bijection(&matrix)?;
        }

        // Greedy fill, and the aggregates the verifier sees.
        let outcome = selection::enforce_winner_selection(
            &sorted_prices,
            &sorted_amounts,
            &minimum_price,
            &maximum_amount,
        )?;
        let bitmask = selection::recompose_winner_bitmask(&matrix, &outcome.winners)?;
        selection::enforce_aggregates(
            &outcome,
            &bitmask,
            &total_fill,
            &total_value,
            &num_winners,
            &winner_bitmask,
        )?;

        Ok(())
    }
}
