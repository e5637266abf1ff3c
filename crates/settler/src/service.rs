//! Settlement service implementation.
//!
//! Proof generation is a heavy batch job (seconds to tens of seconds),
//! while the reference computation is fast and synchronous. The service
//! decouples the two: it rejects bad auctions immediately and runs the
//! proof job asynchronously with bounded retries, so a slow or failed
//! proof never blocks bid collection for other auctions.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::OsRng;
use tracing::{info, warn};

use auction_circuit::PermutationMode;
use auction_simulator::simulate;
use auction_types::{AuctionConstraints, Bid};

use crate::prover::{self, AuctionProof, AuctionProvingKeys, ProverError};

/// Configuration for the settlement service.
#[derive(Debug, Clone)]
pub struct SettlerConfig {
    /// Maximum proof attempts per auction.
    pub max_attempts: u32,
    /// Delay between attempts.
    pub retry_delay: Duration,
    /// Permutation mode the proving keys were generated for.
    pub permutation_mode: PermutationMode,
}

impl Default for SettlerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
            permutation_mode: PermutationMode::Strict,
        }
    }
}

/// The settlement service.
pub struct SettlementService {
    config: SettlerConfig,
    keys: Arc<AuctionProvingKeys>,
}

impl SettlementService {
    /// Create a new settlement service around existing proving keys.
    pub fn new(config: SettlerConfig, keys: Arc<AuctionProvingKeys>) -> Self {
        Self { config, keys }
    }

    /// Settle one auction: reference computation, then the proof job.
    ///
    /// Input and consistency errors are deterministic and fail
    /// immediately; the same inputs would fail the same way, so they are
    /// never retried. Prover failures are retried up to the configured
    /// limit. Retries are idempotent: the public values are a pure
    /// function of the inputs, so every successful attempt commits to the
    /// same outputs.
    pub async fn settle(
        &self,
        bids: &[Bid],
        constraints: &AuctionConstraints,
    ) -> Result<AuctionProof> {
        let simulation = simulate(bids, constraints).context("auction rejected")?;
        info!(
            num_winners = simulation.aggregate.num_winners,
            "reference computation complete; starting proof job"
        );

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match prover::prove_simulation(&self.keys, &simulation, &mut OsRng) {
                Ok(proof) => {
                    info!(attempt, "settlement proof generated");
                    return Ok(proof);
                }
                Err(err @ ProverError::Simulation(_)) => {
                    return Err(err).context("auction rejected");
                }
                Err(err) if attempt < self.config.max_attempts => {
                    warn!(attempt, error = %err, "proof attempt failed; retrying");
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("proof generation failed after {attempt} attempts")
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_types::FieldElement;

    fn fe(v: u64) -> FieldElement {
        FieldElement::from_u64(v)
    }

    #[test]
    fn test_settler_config_default() {
        let config = SettlerConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.permutation_mode, PermutationMode::Strict);
    }

    #[tokio::test]
    async fn test_settle_produces_verifiable_proof() {
        let keys = Arc::new(prover::setup(PermutationMode::Strict, &mut OsRng).unwrap());
        let service = SettlementService::new(
            SettlerConfig {
                retry_delay: Duration::from_millis(10),
                ..Default::default()
            },
            keys.clone(),
        );

        let bids = [
            Bid::new(fe(100), fe(3), fe(22)),
            Bid::new(fe(90), fe(5), fe(11)),
        ];
        let constraints = AuctionConstraints::new(fe(50), fe(100), fe(7)).unwrap();

        let proof = service.settle(&bids, &constraints).await.unwrap();
        assert!(prover::verify_settlement_proof(&keys.verifying_key, &proof).unwrap());

        // Deterministic rejection: no retries, immediate error.
        let bad = AuctionConstraints {
            minimum_price: FieldElement::ZERO,
            maximum_amount: fe(100),
            context_id: fe(7),
        };
        assert!(service.settle(&bids, &bad).await.is_err());
    }
}
