//! Reference-computation error types.

use thiserror::Error;

use auction_types::InputError;

/// Errors from the off-circuit reference computation.
///
/// Input errors are rejected before any hashing or accumulation and carry
/// the offending slot and field; permutation errors are verification
/// failures over a claimed rearrangement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("sorted position {position}: price increases from the previous position")]
    OrderViolation { position: usize },

    #[error("sorted position {position}: claimed slot {claimed} is out of range")]
    ClaimOutOfRange { position: usize, claimed: u32 },

    #[error("sorted position {position}: {field} does not match original slot {claimed}")]
    SelectionMismatch {
        position: usize,
        claimed: u32,
        field: &'static str,
    },

    #[error("original slot {slot} claimed {count} times by the sorted sequence")]
    NotABijection { slot: usize, count: usize },

    #[error("winner bitmask has bits set beyond the {capacity}-slot capacity")]
    BitmaskOverflow { capacity: usize },

    #[error("winner indicator disagrees with bitmask at original slot {slot}")]
    IndicatorMismatch { slot: usize },
}
