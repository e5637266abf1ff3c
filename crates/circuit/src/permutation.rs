//! In-circuit permutation verification.
//!
//! Sorting is never performed inside the constraint system; the prover
//! supplies the sorted sequence as a witness and these constraints make an
//! invalid rearrangement unsatisfiable:
//!
//! - **Order check**: prices are non-increasing across adjacent positions.
//! - **Selection check**: the value at each sorted position equals the
//!   original value at the slot it claims, via a one-hot selector sum
//!   (cheaper in-circuit than direct array indexing).
//! - **Bijection check** ([`PermutationMode::Strict`] only): every original
//!   slot is claimed exactly once, so no bid can be invented, dropped, or
//!   duplicated.

use std::cmp::Ordering;

use ark_bn254::Fr;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::fields::FieldVar;
use ark_relations::r1cs::SynthesisError;

use auction_types::AUCTION_CAPACITY;

/// How thoroughly the claimed rearrangement is pinned down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermutationMode {
    /// Order and selection checks only. Nothing forbids two sorted
    /// positions from claiming the same original slot, or a slot from
    /// being omitted. Kept for compatibility testing against the original
    /// design; do not use for new auctions.
    Legacy,
    /// Order, selection, and bijection checks.
    #[default]
    Strict,
}

/// Enforce non-increasing price across consecutive sorted positions.
pub fn enforce_descending_order(sorted_prices: &[FpVar<Fr>]) -> Result<(), SynthesisError> {
    for pair in sorted_prices.windows(2) {
        pair[0].enforce_cmp(&pair[1], Ordering::Greater, true)?;
    }
    Ok(())
}

/// Build the one-hot selector matrix from the claimed original indices.
///
/// Entry `(i, j)` is 1 iff sorted position `i` claims original slot `j`.
/// A claimed index outside `0..N` produces an all-zero row; only the
/// bijection check rules that out.
pub fn selection_matrix(
    claimed_indices: &[FpVar<Fr>],
) -> Result<Vec<Vec<FpVar<Fr>>>, SynthesisError> {
    let mut matrix = Vec::with_capacity(claimed_indices.len());
    for claimed in claimed_indices {
        let mut row = Vec::with_capacity(AUCTION_CAPACITY);
        for slot in 0..AUCTION_CAPACITY {
            let hit = claimed.is_eq(&FpVar::Constant(Fr::from(slot as u64)))?;
            row.push(FpVar::from(hit));
        }
        matrix.push(row);
    }
    Ok(matrix)
}

/// Selector-sum gather: `sorted[i] == Σ_j matrix[i][j] * original[j]`.
///
/// Applied once per gathered column (price, amount).
pub fn enforce_selection(
    matrix: &[Vec<FpVar<Fr>>],
    original: &[FpVar<Fr>],
    sorted: &[FpVar<Fr>],
) -> Result<(), SynthesisError> {
    for (row, claimed_value) in matrix.iter().zip(sorted) {
        let mut gathered = FpVar::<Fr>::zero();
        for (selector, value) in row.iter().zip(original) {
            gathered = gathered + selector * value;
        }
        gathered.enforce_equal(claimed_value)?;
    }
    Ok(())
}

/// Enforce that the claimed indices form a bijection over `0..N`.
///
/// With one-hot rows, summing each column to exactly one forces every
/// original slot to be claimed by exactly one sorted position.
pub fn enforce_bijection(matrix: &[Vec<FpVar<Fr>>]) -> Result<(), SynthesisError> {
    for slot in 0..AUCTION_CAPACITY {
        let mut claims = FpVar::<Fr>::zero();
        for row in matrix {
            claims = claims + &row[slot];
        }
        claims.enforce_equal(&FpVar::one())?;
    }
    Ok(())
}
