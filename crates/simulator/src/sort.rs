//! Descending-price sort of the normalized bid array.
//!
//! The sort happens only here, off-circuit; the constraint system verifies
//! the result rather than performing it.

use auction_types::{NormalizedBid, SortedBid, AUCTION_CAPACITY};

/// Stable sort by descending price.
///
/// Null bids carry price zero, so they fall to the end; ties keep
/// submission order. Stability makes the sort idempotent.
pub fn sort_bids(normalized: &[NormalizedBid; AUCTION_CAPACITY]) -> [SortedBid; AUCTION_CAPACITY] {
    let mut entries: Vec<SortedBid> = normalized
        .iter()
        .map(|bid| SortedBid {
            price: bid.price,
            amount: bid.amount,
            original_index: bid.original_index,
        })
        .collect();
    entries.sort_by(|a, b| b.price.cmp(&a.price));
    std::array::from_fn(|i| entries[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use auction_types::{Bid, FieldElement};

    fn bid(price: u64, amount: u64, bidder: u64) -> Bid {
        Bid::new(
            FieldElement::from_u64(price),
            FieldElement::from_u64(amount),
            FieldElement::from_u64(bidder),
        )
    }

    #[test]
    fn test_descending_with_nulls_last() {
        let normalized = normalize(&[bid(90, 1, 1), bid(100, 2, 2), bid(95, 3, 3)]).unwrap();
        let sorted = sort_bids(&normalized);

        let prices: Vec<u64> = sorted
            .iter()
            .map(|s| s.price.to_biguint().try_into().unwrap())
            .collect();
        assert_eq!(prices, vec![100, 95, 90, 0, 0, 0, 0, 0]);
        assert_eq!(sorted[0].original_index, 1);
        assert_eq!(sorted[1].original_index, 2);
        assert_eq!(sorted[2].original_index, 0);
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let normalized = normalize(&[bid(50, 1, 1), bid(50, 2, 2), bid(50, 3, 3)]).unwrap();
        let sorted = sort_bids(&normalized);
        assert_eq!(sorted[0].original_index, 0);
        assert_eq!(sorted[1].original_index, 1);
        assert_eq!(sorted[2].original_index, 2);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let normalized = normalize(&[bid(10, 1, 1), bid(30, 2, 2), bid(20, 3, 3)]).unwrap();
        let sorted = sort_bids(&normalized);

        // Feed the sorted sequence back through as if it were a fresh array.
        let as_normalized: [NormalizedBid; AUCTION_CAPACITY] = std::array::from_fn(|i| {
            NormalizedBid {
                price: sorted[i].price,
                amount: sorted[i].amount,
                bidder_id: FieldElement::ZERO,
                original_index: sorted[i].original_index,
            }
        });
        let resorted = sort_bids(&as_normalized);
        assert_eq!(resorted, sorted);
    }
}
