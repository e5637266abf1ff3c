//! Constraint-system form of the auction-correctness logic.
//!
//! This crate proves that a sealed-bid Dutch auction was settled correctly
//! without revealing the losing bids:
//!
//! 1. Every public commitment opens to a revealed bid bound to this
//!    auction's context (no nonce; binding comes from bidder and context).
//! 2. The claimed sorted sequence is a genuine descending-price
//!    rearrangement of the revealed bids (verified, never performed,
//!    in-circuit).
//! 3. Winner selection under the price floor and quantity cap follows the
//!    branch-free prefix-sum recurrence, and the public aggregates match.
//!
//! # Public Inputs
//! - `total_fill`, `total_value`, `num_winners`, `winner_bitmask`
//! - `commitments[N]`, `context_id`, `minimum_price`, `maximum_amount`
//!
//! # Private Inputs
//! - the normalized bids (price, amount, bidder per slot)
//! - the claimed rearrangement (price, amount, original index per position)
//!
//! The same algorithm exists off-circuit in `auction-simulator`; the two
//! must agree on every input, and the integration tests hold them to that.

pub mod circuit;
pub mod commitment;
pub mod permutation;
pub mod selection;

pub use circuit::AuctionCircuit;
pub use commitment::{bind_commitment, null_commitment, poseidon_config};
pub use permutation::PermutationMode;
