//! Winner bitmask encoding.
//!
//! Winner flags are computed in sorted order; the contract layer consumes
//! a compact bitmask keyed by **original** submission slot. The mapping
//! between the two goes through the same `original_index` back-pointers as
//! the permutation check.

use auction_types::{SortedBid, WinnerIndicator, AUCTION_CAPACITY};

use crate::error::SimulatorError;

/// Pack sorted-order winner flags into the per-slot bitmask.
///
/// Bit `j` of the result is set iff the sorted position that claims
/// original slot `j` won. Claims outside the slot range are rejected.
pub fn encode(
    indicator: &WinnerIndicator,
    sorted: &[SortedBid; AUCTION_CAPACITY],
) -> Result<u64, SimulatorError> {
    let mut mask = 0u64;
    for (position, entry) in sorted.iter().enumerate() {
        if indicator[position] {
            let slot = entry.original_index as usize;
            if slot >= AUCTION_CAPACITY {
                return Err(SimulatorError::ClaimOutOfRange {
                    position,
                    claimed: entry.original_index,
                });
            }
            mask |= 1 << slot;
        }
    }
    Ok(mask)
}

/// Unpack a bitmask into per-original-slot winner flags.
pub fn decode(mask: u64) -> Result<[bool; AUCTION_CAPACITY], SimulatorError> {
    if mask >> AUCTION_CAPACITY != 0 {
        return Err(SimulatorError::BitmaskOverflow {
            capacity: AUCTION_CAPACITY,
        });
    }
    Ok(std::array::from_fn(|slot| mask & (1u64 << slot) != 0))
}

/// Pack per-original-slot winner flags into a bitmask.
///
/// Exact inverse of [`decode`] for every capacity up to 64 slots.
pub fn encode_slots(flags: &[bool; AUCTION_CAPACITY]) -> u64 {
    let mut mask = 0u64;
    for (slot, won) in flags.iter().enumerate() {
        mask |= (*won as u64) << slot;
    }
    mask
}

/// Check that the sorted-order indicator and the per-slot bitmask describe
/// the same winner set.
pub fn verify_consistency(
    indicator: &WinnerIndicator,
    sorted: &[SortedBid; AUCTION_CAPACITY],
    mask: u64,
) -> Result<(), SimulatorError> {
    let from_indicator = encode(indicator, sorted)?;
    let flags = decode(mask)?;
    for slot in 0..AUCTION_CAPACITY {
        if (from_indicator >> slot) & 1 != flags[slot] as u64 {
            return Err(SimulatorError::IndicatorMismatch { slot });
        }
    }
    Ok(())
}
