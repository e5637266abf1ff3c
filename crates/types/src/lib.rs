//! Core type definitions for the sealed-bid auction proving engine.
//!
//! This crate provides the shared data structures used across the auction
//! workspace: canonical field elements, bids and their normalized/sorted
//! forms, auction constraints, aggregate results, and the circuit I/O
//! types exchanged with the proving layer.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub mod circuit_io;
pub mod error;
pub mod field;

pub use error::{FieldError, InputError};
pub use field::FieldElement;

/// Fixed number of bid slots per auction instance.
///
/// Shorter bid lists are padded with null bids; longer lists are rejected.
pub const AUCTION_CAPACITY: usize = 8;

/// Maximum width, in bits, of prices, amounts, and the two auction
/// constraint bounds.
///
/// Keeps every in-circuit comparison inside the sound range of the
/// comparison gadgets, and keeps the value aggregate (at most
/// `N * price * amount < 2^195`) far below the field modulus so reference
/// and circuit arithmetic agree exactly.
pub const VALUE_BITS: usize = 96;

// The winner bitmask is a single machine word.
const _: () = assert!(AUCTION_CAPACITY <= 64);

// =========================
// BIDS
// =========================

/// A revealed bid. Immutable once submitted.
///
/// The all-zero bid is the null sentinel used to pad an auction to fixed
/// capacity; it always sorts last and never wins.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Bid {
    pub price: FieldElement,
    pub amount: FieldElement,
    pub bidder_id: FieldElement,
}

impl Bid {
    pub fn new(price: FieldElement, amount: FieldElement, bidder_id: FieldElement) -> Self {
        Self {
            price,
            amount,
            bidder_id,
        }
    }

    /// The null sentinel bid.
    pub fn null() -> Self {
        Self {
            price: FieldElement::ZERO,
            amount: FieldElement::ZERO,
            bidder_id: FieldElement::ZERO,
        }
    }

    pub fn is_null(&self) -> bool {
        self.price.is_zero() && self.amount.is_zero() && self.bidder_id.is_zero()
    }
}

/// A bid pinned to the submission slot it arrived in.
///
/// `original_index` is assigned exactly once, by the normalizer, and is
/// authoritative for every later component: the permutation check gathers
/// by it and the winner bitmask is keyed by it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct NormalizedBid {
    pub price: FieldElement,
    pub amount: FieldElement,
    pub bidder_id: FieldElement,
    pub original_index: u32,
}

impl NormalizedBid {
    pub fn is_null(&self) -> bool {
        self.price.is_zero() && self.amount.is_zero() && self.bidder_id.is_zero()
    }
}

/// One entry of the claimed descending-price rearrangement.
///
/// Carries a back-pointer into the pre-sort array; the bidder id is not
/// carried through the sort, since downstream consumers map winners back
/// to submitters by `original_index`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct SortedBid {
    pub price: FieldElement,
    pub amount: FieldElement,
    pub original_index: u32,
}

/// Per-sorted-position winner flags.
pub type WinnerIndicator = [bool; AUCTION_CAPACITY];

// =========================
// AUCTION CONFIGURATION
// =========================

/// The two simultaneous selection constraints, scoped to one auction.
///
/// `context_id` binds commitments to a single auction instance; it stands
/// in for an on-chain contract/auction address.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct AuctionConstraints {
    /// Price floor: a winning bid's price must be at least this.
    pub minimum_price: FieldElement,
    /// Quantity cap: the cumulative fill stays strictly below this.
    pub maximum_amount: FieldElement,
    /// Commitment scope for this auction instance.
    pub context_id: FieldElement,
}

impl AuctionConstraints {
    pub fn new(
        minimum_price: FieldElement,
        maximum_amount: FieldElement,
        context_id: FieldElement,
    ) -> Result<Self, InputError> {
        let constraints = Self {
            minimum_price,
            maximum_amount,
            context_id,
        };
        constraints.validate()?;
        Ok(constraints)
    }

    /// Check the bounds are well-formed.
    ///
    /// A zero price floor is rejected: the padded null bids carry price
    /// zero, and the selection arithmetic has no other rule excluding them.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.minimum_price.is_zero() {
            return Err(InputError::ZeroMinimumPrice);
        }
        if !self.minimum_price.fits_bits(VALUE_BITS) {
            return Err(InputError::ConstraintTooWide {
                field: "minimum_price",
                max_bits: VALUE_BITS,
            });
        }
        if !self.maximum_amount.fits_bits(VALUE_BITS) {
            return Err(InputError::ConstraintTooWide {
                field: "maximum_amount",
                max_bits: VALUE_BITS,
            });
        }
        Ok(())
    }
}

// =========================
// RESULTS
// =========================

/// Aggregate outputs of winner selection.
///
/// Bit *i* of `winner_bitmask` corresponds to **original** submission slot
/// *i*, not sorted position *i*; downstream consumers map bits back to
/// submitters by slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct AggregateResult {
    /// Sum of winning amounts. Always strictly below the quantity cap.
    pub total_fill: FieldElement,
    /// Sum of `price * amount` over winners. The per-unit average is left
    /// to consumers that can divide outside the constraint system.
    pub total_value: FieldElement,
    pub num_winners: u32,
    pub winner_bitmask: u64,
}

impl AggregateResult {
    pub fn empty() -> Self {
        Self {
            total_fill: FieldElement::ZERO,
            total_value: FieldElement::ZERO,
            num_winners: 0,
            winner_bitmask: 0,
        }
    }
}

// =========================
// HELPER FUNCTIONS
// =========================

/// Derive the commitment scope for one auction instance.
///
/// Hashes the auction id together with the venue (contract) address under a
/// domain tag and reduces into the field. Submissions bound to one context
/// cannot be replayed into another.
pub fn derive_context_id(auction_id: u64, venue: &[u8; 32]) -> FieldElement {
    let mut hasher = Sha256::new();
    hasher.update(b"AUCTION_CONTEXT_V1:");
    hasher.update(auction_id.to_le_bytes());
    hasher.update(venue);
    let digest = hasher.finalize();
    FieldElement::from(Fr::from_le_bytes_mod_order(&digest))
}
