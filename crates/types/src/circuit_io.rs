//! Circuit I/O types for the auction-correctness proof.
//!
//! The prover consumes a [`CircuitInput`] (private witness plus the public
//! commitments and constraints) and exposes a [`PublicValues`] record whose
//! field-element encoding fixes the public-input order checked by the
//! verifier.

use ark_bn254::Fr;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{
    AuctionConstraints, FieldElement, InputError, NormalizedBid, SortedBid, AUCTION_CAPACITY,
    VALUE_BITS,
};

/// Number of public inputs to the auction circuit.
///
/// Four aggregate outputs, the commitment array, the context id, and the
/// two constraint bounds.
pub const PUBLIC_INPUT_LEN: usize = 4 + AUCTION_CAPACITY + 3;

/// Everything the prover needs for one proof attempt.
///
/// `bids` and `sorted` are private; `commitments` and `constraints` are
/// public and must match what the verifying contract has stored.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct CircuitInput {
    pub constraints: AuctionConstraints,
    pub commitments: [FieldElement; AUCTION_CAPACITY],
    pub bids: [NormalizedBid; AUCTION_CAPACITY],
    pub sorted: [SortedBid; AUCTION_CAPACITY],
}

impl CircuitInput {
    /// Validate input consistency, before any hashing or accumulation.
    ///
    /// Rejects malformed honest input with enough context to debug its
    /// construction; it is not a soundness check (the circuit re-verifies
    /// everything that matters against an adversarial witness).
    pub fn validate(&self) -> Result<(), InputError> {
        self.constraints.validate()?;

        for (i, bid) in self.bids.iter().enumerate() {
            if !bid.price.fits_bits(VALUE_BITS) {
                return Err(InputError::ValueTooWide {
                    index: i,
                    field: "price",
                    max_bits: VALUE_BITS,
                });
            }
            if !bid.amount.fits_bits(VALUE_BITS) {
                return Err(InputError::ValueTooWide {
                    index: i,
                    field: "amount",
                    max_bits: VALUE_BITS,
                });
            }
            // Normalization assigns slots in submission order.
            if bid.original_index != i as u32 {
                return Err(InputError::IndexMismatch {
                    index: i,
                    expected: i as u32,
                    got: bid.original_index,
                });
            }
        }

        for (i, entry) in self.sorted.iter().enumerate() {
            if entry.original_index as usize >= AUCTION_CAPACITY {
                return Err(InputError::IndexOutOfRange {
                    index: i,
                    got: entry.original_index,
                    capacity: AUCTION_CAPACITY,
                });
            }
        }

        Ok(())
    }
}

/// Public values of a settled auction, in verifier order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct PublicValues {
    pub total_fill: FieldElement,
    pub total_value: FieldElement,
    pub num_winners: u32,
    pub winner_bitmask: u64,
    pub commitments: [FieldElement; AUCTION_CAPACITY],
    pub context_id: FieldElement,
    pub minimum_price: FieldElement,
    pub maximum_amount: FieldElement,
}

impl PublicValues {
    /// Flatten into the exact public-input assignment the verifier checks.
    ///
    /// Order: `total_fill`, `total_value`, `num_winners`, `winner_bitmask`,
    /// `commitments[0..N]`, `context_id`, `minimum_price`, `maximum_amount`.
    /// The circuit allocates its public inputs in the same order; changing
    /// either side alone breaks verification.
    pub fn to_field_elements(&self) -> Vec<Fr> {
        let mut out = Vec::with_capacity(PUBLIC_INPUT_LEN);
        out.push(self.total_fill.into_fr());
        out.push(self.total_value.into_fr());
        out.push(Fr::from(self.num_winners as u64));
        out.push(Fr::from(self.winner_bitmask));
        for commitment in &self.commitments {
            out.push(commitment.into_fr());
        }
        out.push(self.context_id.into_fr());
        out.push(self.minimum_price.into_fr());
        out.push(self.maximum_amount.into_fr());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_input() -> CircuitInput {
        let constraints = AuctionConstraints::new(
            FieldElement::from_u64(1),
            FieldElement::from_u64(100),
            FieldElement::from_u64(7),
        )
        .unwrap();
        CircuitInput {
            constraints,
            commitments: [FieldElement::ZERO; AUCTION_CAPACITY],
            bids: std::array::from_fn(|i| NormalizedBid {
                price: FieldElement::ZERO,
                amount: FieldElement::ZERO,
                bidder_id: FieldElement::ZERO,
                original_index: i as u32,
            }),
            sorted: std::array::from_fn(|i| SortedBid {
                price: FieldElement::ZERO,
                amount: FieldElement::ZERO,
                original_index: i as u32,
            }),
        }
    }

    #[test]
    fn test_validate_accepts_padded_input() {
        assert!(zero_input().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wide_price() {
        let mut input = zero_input();
        input.bids[3].price =
            FieldElement::from_biguint(&(num_bigint::BigUint::from(1u8) << VALUE_BITS)).unwrap();
        assert_eq!(
            input.validate().unwrap_err(),
            InputError::ValueTooWide {
                index: 3,
                field: "price",
                max_bits: VALUE_BITS,
            }
        );
    }

    #[test]
    fn test_validate_rejects_reordered_slots() {
        let mut input = zero_input();
        input.bids[0].original_index = 5;
        assert!(matches!(
            input.validate().unwrap_err(),
            InputError::IndexMismatch { index: 0, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_sorted_index() {
        let mut input = zero_input();
        input.sorted[2].original_index = AUCTION_CAPACITY as u32;
        assert!(matches!(
            input.validate().unwrap_err(),
            InputError::IndexOutOfRange { index: 2, .. }
        ));
    }

    #[test]
    fn test_public_input_order() {
        let values = PublicValues {
            total_fill: FieldElement::from_u64(80),
            total_value: FieldElement::from_u64(154),
            num_winners: 2,
            winner_bitmask: 0b11,
            commitments: std::array::from_fn(|i| FieldElement::from_u64(100 + i as u64)),
            context_id: FieldElement::from_u64(7),
            minimum_price: FieldElement::from_u64(15),
            maximum_amount: FieldElement::from_u64(100),
        };

        let elements = values.to_field_elements();
        assert_eq!(elements.len(), PUBLIC_INPUT_LEN);
        assert_eq!(elements[0], Fr::from(80u64));
        assert_eq!(elements[1], Fr::from(154u64));
        assert_eq!(elements[2], Fr::from(2u64));
        assert_eq!(elements[3], Fr::from(3u64));
        assert_eq!(elements[4], Fr::from(100u64));
        assert_eq!(elements[4 + AUCTION_CAPACITY], Fr::from(7u64));
        assert_eq!(elements[PUBLIC_INPUT_LEN - 1], Fr::from(100u64));
    }
}
