//! Off-circuit winner selection.
//!
//! Re-implements the circuit's branch-free prefix-sum recurrence with
//! native control flow kept to indicator arithmetic, so the two forms
//! produce bit-identical aggregates on every accepted input.

use auction_types::{
    AggregateResult, AuctionConstraints, FieldElement, SortedBid, WinnerIndicator,
    AUCTION_CAPACITY,
};

use crate::encoder;
use crate::error::SimulatorError;

/// Run the dual-constraint greedy fill over a sorted sequence.
///
/// For each sorted position, the bid wins iff admitting it keeps the
/// cumulative fill strictly below the quantity cap *and* its price meets
/// the floor. Both constraints are per-bid filters: a bid that fails the
/// cap leaves the cumulative fill unchanged, and a later, smaller bid may
/// still be admitted.
///
/// No division happens here; consumers derive the per-unit average from
/// `total_value / total_fill` outside the proving path.
pub fn run(
    sorted: &[SortedBid; AUCTION_CAPACITY],
    constraints: &AuctionConstraints,
) -> Result<(WinnerIndicator, AggregateResult), SimulatorError> {
    let mut cumulative_fill = FieldElement::ZERO;
    let mut cumulative_value = FieldElement::ZERO;
    let mut indicator = [false; AUCTION_CAPACITY];

    for (position, entry) in sorted.iter().enumerate() {
        let fill_after = cumulative_fill + entry.amount;
        let fits = fill_after < constraints.maximum_amount;
        let price_ok = entry.price >= constraints.minimum_price;
        let is_winner = fits && price_ok;

        // Arithmetic selection, mirroring the circuit form.
        let selector = FieldElement::from_u64(is_winner as u64);
        cumulative_fill = cumulative_fill + selector * entry.amount;
        cumulative_value = cumulative_value + selector * entry.price * entry.amount;
        indicator[position] = is_winner;
    }

    let winner_bitmask = encoder::encode(&indicator, sorted)?;
    let num_winners = indicator.iter().filter(|won| **won).count() as u32;

    Ok((
        indicator,
        AggregateResult {
            total_fill: cumulative_fill,
            total_value: cumulative_value,
            num_winners,
            winner_bitmask,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::sort::sort_bids;
    use auction_types::Bid;

    fn fe(v: u64) -> FieldElement {
        FieldElement::from_u64(v)
    }

    fn constraints(floor: u64, cap: u64) -> AuctionConstraints {
        AuctionConstraints::new(fe(floor), fe(cap), fe(7)).unwrap()
    }

    fn sorted_from(bids: &[Bid]) -> [SortedBid; AUCTION_CAPACITY] {
        sort_bids(&normalize(bids).unwrap())
    }

    #[test]
    fn test_both_constraints_filter_independently() {
        // Highest-price bid exceeds the cap on quantity; a cheaper, smaller
        // bid still fits afterwards; the lowest price fails the floor.
        let sorted = sorted_from(&[
            Bid::new(fe(100), fe(60), fe(1)),
            Bid::new(fe(98), fe(50), fe(2)),
            Bid::new(fe(96), fe(30), fe(3)),
            Bid::new(fe(95), fe(10), fe(4)),
        ]);
        let (indicator, aggregate) = run(&sorted, &constraints(96, 100)).unwrap();

        assert_eq!(
            indicator,
            [true, false, true, false, false, false, false, false]
        );
        assert_eq!(aggregate.total_fill, fe(90));
        assert_eq!(aggregate.total_value, fe(100 * 60 + 96 * 30));
        assert_eq!(aggregate.num_winners, 2);
        assert_eq!(aggregate.winner_bitmask, 0b101);
    }

    #[test]
    fn test_cap_is_strict() {
        let sorted = sorted_from(&[Bid::new(fe(10), fe(100), fe(1))]);
        let (indicator, aggregate) = run(&sorted, &constraints(1, 100)).unwrap();
        assert!(!indicator[0]);
        assert_eq!(aggregate.num_winners, 0);

        let (indicator, _) = run(&sorted, &constraints(1, 101)).unwrap();
        assert!(indicator[0]);
    }

    #[test]
    fn test_null_padding_never_wins() {
        let sorted = sorted_from(&[Bid::new(fe(10), fe(5), fe(1))]);
        let (indicator, aggregate) = run(&sorted, &constraints(1, 100)).unwrap();
        assert_eq!(
            indicator,
            [true, false, false, false, false, false, false, false]
        );
        assert_eq!(aggregate.num_winners, 1);
        assert_eq!(aggregate.winner_bitmask, 0b1);
    }
}
