//! Bid list normalization.
//!
//! Pads a variable-length bid list to the fixed auction capacity with null
//! sentinel bids and assigns the stable original-position indices. This is
//! the only place original position is established; every later component
//! treats it as authoritative.

use auction_types::{Bid, InputError, NormalizedBid, AUCTION_CAPACITY, VALUE_BITS};

/// Pad `bids` to capacity and assign submission-order indices.
///
/// Fails with a capacity error if more than [`AUCTION_CAPACITY`] bids were
/// submitted, and rejects prices or amounts wider than [`VALUE_BITS`]
/// before anything downstream touches them.
pub fn normalize(bids: &[Bid]) -> Result<[NormalizedBid; AUCTION_CAPACITY], InputError> {
    if bids.len() > AUCTION_CAPACITY {
        return Err(InputError::CapacityExceeded {
            submitted: bids.len(),
            capacity: AUCTION_CAPACITY,
        });
    }

    for (index, bid) in bids.iter().enumerate() {
        if !bid.price.fits_bits(VALUE_BITS) {
            return Err(InputError::ValueTooWide {
                index,
                field: "price",
                max_bits: VALUE_BITS,
            });
        }
        if !bid.amount.fits_bits(VALUE_BITS) {
            return Err(InputError::ValueTooWide {
                index,
                field: "amount",
                max_bits: VALUE_BITS,
            });
        }
    }

    Ok(std::array::from_fn(|i| {
        let bid = bids.get(i).copied().unwrap_or_else(Bid::null);
        NormalizedBid {
            price: bid.price,
            amount: bid.amount,
            bidder_id: bid.bidder_id,
            original_index: i as u32,
        }
    }))
}
