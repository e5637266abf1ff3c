//! Groth16 proof generation for auction settlement.
//!
//! The proving system itself is a black box behind `ark-groth16`; this
//! module prepares the witness from the reference simulation, runs the
//! prover, and packages the proof with the public values the verifying
//! contract checks. Proof bytes differ between runs (Groth16 proofs are
//! randomized) but the public values are fully deterministic in the
//! inputs.

use ark_bn254::Bn254;
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use borsh::{BorshDeserialize, BorshSerialize};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use auction_circuit::{AuctionCircuit, PermutationMode};
use auction_simulator::{simulate, Simulation, SimulatorError};
use auction_types::circuit_io::PublicValues;
use auction_types::{AuctionConstraints, Bid};

/// Errors from the proof layer.
///
/// Simulation errors are deterministic rejections of the auction itself;
/// the rest concern the proving black box. Constraint unsatisfiability
/// surfaces here as a proving failure and means "auction rejected", not
/// something to retry with the same inputs.
#[derive(Debug, Error)]
pub enum ProverError {
    #[error(transparent)]
    Simulation(#[from] SimulatorError),

    #[error("parameter generation failed: {0}")]
    Setup(String),

    #[error("auction proof invalid: {0}")]
    Proving(String),

    #[error("proof verification failed: {0}")]
    Verification(String),

    #[error("proof bytes are not a canonical encoding")]
    MalformedProof,
}

/// Circuit-specific Groth16 parameters.
///
/// The permutation mode is part of the circuit shape, so keys carry the
/// mode they were generated for and refuse nothing else at the type level;
/// mixing modes simply yields proofs that never verify.
pub struct AuctionProvingKeys {
    pub proving_key: ProvingKey<Bn254>,
    pub verifying_key: VerifyingKey<Bn254>,
    pub vkey_hash: [u8; 32],
    pub mode: PermutationMode,
}

/// A settlement proof with its public values.
#[derive(Clone, Debug, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct AuctionProof {
    /// Compressed Groth16 proof.
    pub proof_bytes: Vec<u8>,
    /// Public values the proof commits to.
    pub public_values: PublicValues,
    /// Hash of the verifying key (for upgradability checks downstream).
    pub vkey_hash: [u8; 32],
}

/// Run the trusted setup for the auction circuit.
pub fn setup<R: RngCore + CryptoRng>(
    mode: PermutationMode,
    rng: &mut R,
) -> Result<AuctionProvingKeys, ProverError> {
    let circuit = AuctionCircuit::blank(mode);
    let (proving_key, verifying_key) = Groth16::<Bn254>::circuit_specific_setup(circuit, rng)
        .map_err(|e| ProverError::Setup(e.to_string()))?;
    let vkey_hash = hash_verifying_key(&verifying_key)?;
    Ok(AuctionProvingKeys {
        proving_key,
        verifying_key,
        vkey_hash,
        mode,
    })
}

fn hash_verifying_key(vk: &VerifyingKey<Bn254>) -> Result<[u8; 32], ProverError> {
    let mut bytes = Vec::new();
    vk.serialize_compressed(&mut bytes)
        .map_err(|e| ProverError::Setup(e.to_string()))?;
    Ok(Sha256::digest(&bytes).into())
}

/// Prove an already-computed reference run.
pub fn prove_simulation<R: RngCore + CryptoRng>(
    keys: &AuctionProvingKeys,
    simulation: &Simulation,
    rng: &mut R,
) -> Result<AuctionProof, ProverError> {
    let public_values = simulation.public_values();
    let circuit =
        AuctionCircuit::with_assignment(&simulation.circuit_input(), public_values, keys.mode);

    let proof = Groth16::<Bn254>::prove(&keys.proving_key, circuit, rng)
        .map_err(|e| ProverError::Proving(e.to_string()))?;

    let mut proof_bytes = Vec::new();
    proof
        .serialize_compressed(&mut proof_bytes)
        .map_err(|e| ProverError::Proving(e.to_string()))?;

    Ok(AuctionProof {
        proof_bytes,
        public_values,
        vkey_hash: keys.vkey_hash,
    })
}

/// Generate a settlement proof for a revealed bid list.
///
/// Runs the fast reference computation first; any input or consistency
/// error rejects the auction before the heavy proof job starts.
pub fn generate_settlement_proof<R: RngCore + CryptoRng>(
    keys: &AuctionProvingKeys,
    bids: &[Bid],
    constraints: &AuctionConstraints,
    rng: &mut R,
) -> Result<AuctionProof, ProverError> {
    let simulation = simulate(bids, constraints)?;
    prove_simulation(keys, &simulation, rng)
}

/// Verify a settlement proof against its public values.
pub fn verify_settlement_proof(
    verifying_key: &VerifyingKey<Bn254>,
    proof: &AuctionProof,
) -> Result<bool, ProverError> {
    let decoded = Proof::<Bn254>::deserialize_compressed(proof.proof_bytes.as_slice())
        .map_err(|_| ProverError::MalformedProof)?;
    let public_inputs = proof.public_values.to_field_elements();
    Groth16::<Bn254>::verify(verifying_key, &public_inputs, &decoded)
        .map_err(|e| ProverError::Verification(e.to_string()))
}
