//! Input-validation error types.

use thiserror::Error;

/// Errors constructing a canonical field element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("value {value} is not below the BN254 scalar field modulus")]
    OutOfRange { value: String },

    #[error("invalid base-10 field element literal: {0:?}")]
    InvalidDecimal(String),

    #[error("byte encoding is not a canonical field element")]
    NonCanonicalBytes,
}

/// Errors in auction inputs, raised before any hashing or accumulation.
///
/// These carry the offending slot and field name so a caller can debug how
/// the input was constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{submitted} bids submitted, auction capacity is {capacity}")]
    CapacityExceeded { submitted: usize, capacity: usize },

    #[error("bid {index}: {field} does not fit {max_bits} bits")]
    ValueTooWide {
        index: usize,
        field: &'static str,
        max_bits: usize,
    },

    #[error("auction constraints: {field} does not fit {max_bits} bits")]
    ConstraintTooWide {
        field: &'static str,
        max_bits: usize,
    },

    #[error("minimum price must be positive; a zero floor would let padded null bids win")]
    ZeroMinimumPrice,

    #[error("bid {index}: original index {got} out of range for capacity {capacity}")]
    IndexOutOfRange {
        index: usize,
        got: u32,
        capacity: usize,
    },

    #[error("bid {index}: expected original index {expected}, got {got}")]
    IndexMismatch {
        index: usize,
        expected: u32,
        got: u32,
    },

    #[error("expected {expected} commitments, got {got}")]
    CommitmentCountMismatch { expected: usize, got: usize },
}
