//! Bid commitment binding.
//!
//! A commitment is a Poseidon hash over exactly four field elements in a
//! fixed order: `price, amount, bidder_id, context_id`. No nonce is used;
//! uniqueness and replay resistance come from binding to the bidder and to
//! the auction context. The binder exists in two forms that must agree on
//! every input: a native function used by the reference simulator and the
//! commitment store, and an R1CS gadget used inside the auction circuit.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::constraints::CryptographicSpongeVar;
use ark_crypto_primitives::sponge::poseidon::constraints::PoseidonSpongeVar;
use ark_crypto_primitives::sponge::poseidon::{
    find_poseidon_ark_and_mds, PoseidonConfig, PoseidonSponge,
};
use ark_crypto_primitives::sponge::{CryptographicSponge, FieldBasedCryptographicSponge};
use ark_ff::PrimeField;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use auction_types::{Bid, FieldElement};

/// Poseidon parameters shared by the native binder and the gadget.
///
/// Rate-4 sponge over the BN254 scalar field: the binder absorbs exactly
/// four elements, so one permutation covers a full commitment.
pub fn poseidon_config() -> PoseidonConfig<Fr> {
    let rate = 4usize;
    let capacity = 1usize;
    let full_rounds = 8usize;
    let partial_rounds = 60usize;
    let alpha = 5u64;
    let (ark, mds) = find_poseidon_ark_and_mds::<Fr>(
        Fr::MODULUS_BIT_SIZE as u64,
        rate,
        full_rounds as u64,
        partial_rounds as u64,
        0u64,
    );
    PoseidonConfig {
        full_rounds,
        partial_rounds,
        alpha,
        ark,
        mds,
        rate,
        capacity,
    }
}

/// Bind a revealed bid to one auction instance.
///
/// Deterministic and collision resistant: distinct bids (differing in
/// price, amount, or bidder) yield distinct commitments with overwhelming
/// probability. Inputs are canonical [`FieldElement`]s by construction, so
/// the `[0, P)` precondition is already enforced before any hashing.
pub fn bind_commitment(bid: &Bid, context_id: FieldElement) -> FieldElement {
    let config = poseidon_config();
    let mut sponge = PoseidonSponge::<Fr>::new(&config);
    sponge.absorb(&bid.price.into_fr());
    sponge.absorb(&bid.amount.into_fr());
    sponge.absorb(&bid.bidder_id.into_fr());
    sponge.absorb(&context_id.into_fr());
    FieldElement::from(sponge.squeeze_native_field_elements(1)[0])
}

/// The fixed "empty slot" sentinel for one auction context.
///
/// Computed before any bidder submits; every unfilled store slot holds it.
pub fn null_commitment(context_id: FieldElement) -> FieldElement {
    bind_commitment(&Bid::null(), context_id)
}

/// In-circuit form of [`bind_commitment`].
pub fn bind_commitment_var(
    cs: ConstraintSystemRef<Fr>,
    price: &FpVar<Fr>,
    amount: &FpVar<Fr>,
    bidder_id: &FpVar<Fr>,
    context_id: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    let config = poseidon_config();
    let mut sponge = PoseidonSpongeVar::<Fr>::new(cs, &config);
    sponge.absorb(price)?;
    sponge.absorb(amount)?;
    sponge.absorb(bidder_id)?;
    sponge.absorb(context_id)?;
    let out = sponge.squeeze_field_elements(1)?;
    Ok(out[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_r1cs_std::alloc::AllocVar;
    use ark_r1cs_std::R1CSVar;
    use ark_relations::r1cs::ConstraintSystem;

    fn sample_bid() -> Bid {
        Bid::new(
            FieldElement::from_u64(2_000),
            FieldElement::from_u64(50),
            FieldElement::from_u64(0xb1d),
        )
    }

    #[test]
    fn test_bind_deterministic() {
        let ctx = FieldElement::from_u64(7);
        assert_eq!(
            bind_commitment(&sample_bid(), ctx),
            bind_commitment(&sample_bid(), ctx)
        );
    }

    #[test]
    fn test_bind_sensitive_to_every_input() {
        let ctx = FieldElement::from_u64(7);
        let base = bind_commitment(&sample_bid(), ctx);

        let mut bid = sample_bid();
        bid.price = FieldElement::from_u64(2_001);
        assert_ne!(bind_commitment(&bid, ctx), base);

        let mut bid = sample_bid();
        bid.amount = FieldElement::from_u64(51);
        assert_ne!(bind_commitment(&bid, ctx), base);

        let mut bid = sample_bid();
        bid.bidder_id = FieldElement::from_u64(0xb1e);
        assert_ne!(bind_commitment(&bid, ctx), base);

        assert_ne!(
            bind_commitment(&sample_bid(), FieldElement::from_u64(8)),
            base
        );
    }

    #[test]
    fn test_input_order_matters() {
        let ctx = FieldElement::from_u64(7);
        let bid = Bid::new(
            FieldElement::from_u64(3),
            FieldElement::from_u64(5),
            FieldElement::from_u64(9),
        );
        let swapped = Bid::new(
            FieldElement::from_u64(5),
            FieldElement::from_u64(3),
            FieldElement::from_u64(9),
        );
        assert_ne!(bind_commitment(&bid, ctx), bind_commitment(&swapped, ctx));
    }

    #[test]
    fn test_null_commitment_fixed_and_scoped() {
        let ctx = FieldElement::from_u64(7);
        assert_eq!(null_commitment(ctx), null_commitment(ctx));
        assert_ne!(null_commitment(ctx), null_commitment(FieldElement::from_u64(8)));
        assert_ne!(null_commitment(ctx), bind_commitment(&sample_bid(), ctx));
    }

    #[test]
    fn test_gadget_matches_native() {
        let bid = sample_bid();
        let ctx = FieldElement::from_u64(7);
        let expected = bind_commitment(&bid, ctx);

        let cs = ConstraintSystem::<Fr>::new_ref();
        let price = FpVar::new_witness(cs.clone(), || Ok(bid.price.into_fr())).unwrap();
        let amount = FpVar::new_witness(cs.clone(), || Ok(bid.amount.into_fr())).unwrap();
        let bidder = FpVar::new_witness(cs.clone(), || Ok(bid.bidder_id.into_fr())).unwrap();
        let context = FpVar::new_witness(cs.clone(), || Ok(ctx.into_fr())).unwrap();

        let out = bind_commitment_var(cs.clone(), &price, &amount, &bidder, &context).unwrap();
        assert_eq!(out.value().unwrap(), expected.into_fr());
        assert!(cs.is_satisfied().unwrap());
    }
}
