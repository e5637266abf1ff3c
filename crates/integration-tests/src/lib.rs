//! End-to-end integration tests for the auction proving engine.
//!
//! These tests exercise the full auction lifecycle:
//! 1. Context derivation and store creation
//! 2. Commitment submission
//! 3. Reveal verification against stored commitments
//! 4. Reference computation
//! 5. Circuit satisfaction over the simulator's witness
//! 6. Groth16 proof generation and verification
//! 7. Settlement recording against the proved public values
