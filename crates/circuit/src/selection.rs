//! In-circuit winner selection.
//!
//! The greedy fill is expressed without branches: every conditional becomes
//! a 0/1 indicator multiplied into the running sums, so the constraint
//! system computes exactly the same prefix-sum recurrence as the reference
//! engine. Division (price-per-unit averaging) is deliberately absent; the
//! circuit exposes the value aggregate and leaves division to consumers
//! outside the constraint system.

use std::cmp::Ordering;

use ark_bn254::Fr;
use ark_r1cs_std::boolean::Boolean;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::fields::FieldVar;
use ark_relations::r1cs::SynthesisError;

use auction_types::AUCTION_CAPACITY;

/// Winner flags and aggregates produced by the selection pass.
pub struct SelectionOutcome {
    /// Per-sorted-position winner flags.
    pub winners: Vec<Boolean<Fr>>,
    /// Cumulative fill after the last position.
    pub total_fill: FpVar<Fr>,
    /// Cumulative `price * amount` over winners.
    pub total_value: FpVar<Fr>,
    /// Number of winners.
    pub num_winners: FpVar<Fr>,
}

/// Run the dual-constraint greedy fill over the sorted sequence.
///
/// For each sorted position, in order:
/// - `fits`: admitting this bid keeps the cumulative fill strictly below
///   the quantity cap;
/// - `price_ok`: the price meets the floor;
/// - the bid wins iff both hold, and only then do its amount and value
///   enter the running sums.
///
/// The cap test is applied independently at every position: a bid that
/// does not fit leaves the cumulative fill unchanged, and a later, smaller
/// bid may still be admitted.
pub fn enforce_winner_selection(
    sorted_prices: &[FpVar<Fr>],
    sorted_amounts: &[FpVar<Fr>],
    minimum_price: &FpVar<Fr>,
    maximum_amount: &FpVar<Fr>,
) -> Result<SelectionOutcome, SynthesisError> {
    let mut cumulative_fill = FpVar::<Fr>::zero();
    let mut cumulative_value = FpVar::<Fr>::zero();
    let mut winner_count = FpVar::<Fr>::zero();
    let mut winners = Vec::with_capacity(sorted_prices.len());

    for (price, amount) in sorted_prices.iter().zip(sorted_amounts) {
        let fill_after = &cumulative_fill + amount;
        let fits = fill_after.is_cmp(maximum_amount, Ordering::Less, false)?;
        let price_ok = price.is_cmp(minimum_price, Ordering::Greater, true)?;
        let is_winner = Boolean::kary_and(&[fits, price_ok])?;

        let indicator = FpVar::from(is_winner.clone());
        let admitted_amount = &indicator * amount;
        let admitted_value = &indicator * &(price * amount);

        cumulative_fill = cumulative_fill + admitted_amount;
        cumulative_value = cumulative_value + admitted_value;
        winner_count = winner_count + indicator;
        winners.push(is_winner);
    }

    Ok(SelectionOutcome {
        winners,
        total_fill: cumulative_fill,
        total_value: cumulative_value,
        num_winners: winner_count,
    })
}

/// Recompose the winner bitmask keyed by original slot.
///
/// The flags live in sorted order; routing them through the same one-hot
/// selector matrix as the permutation check yields one flag per original
/// slot, and the weighted sum with powers of two packs those into the mask
/// the contract layer consumes (bit `j` ↔ submission slot `j`).
pub fn recompose_winner_bitmask(
    matrix: &[Vec<FpVar<Fr>>],
    winners: &[Boolean<Fr>],
) -> Result<FpVar<Fr>, SynthesisError> {
    let mut bitmask = FpVar::<Fr>::zero();
    for slot in 0..AUCTION_CAPACITY {
        let mut slot_won = FpVar::<Fr>::zero();
        for (row, winner) in matrix.iter().zip(winners) {
            slot_won = slot_won + &row[slot] * &FpVar::from(winner.clone());
        }
        bitmask = bitmask + slot_won * FpVar::Constant(Fr::from(1u64 << slot));
    }
    Ok(bitmask)
}

/// Enforce that computed aggregates match the public outputs.
pub fn enforce_aggregates(
    outcome: &SelectionOutcome,
    bitmask: &FpVar<Fr>,
    public_total_fill: &FpVar<Fr>,
    public_total_value: &FpVar<Fr>,
    public_num_winners: &FpVar<Fr>,
    public_winner_bitmask: &FpVar<Fr>,
) -> Result<(), SynthesisError> {
    outcome.total_fill.enforce_equal(public_total_fill)?;
    outcome.total_value.enforce_equal(public_total_value)?;
    outcome.num_winners.enforce_equal(public_num_winners)?;
    bitmask.enforce_equal(public_winner_bitmask)?;
    Ok(())
}
