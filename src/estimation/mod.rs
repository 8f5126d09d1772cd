/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Gas price estimation, served on the query path.
//!
//! Estimation reads a short-lived snapshot of the pending-transaction
//! list and never touches consensus-critical state; it must not block
//! block production, and its arithmetic is ordinary floating point.

pub mod extract;
pub mod percentile;

pub use extract::extract_gas_prices;
pub use percentile::{estimate_for_tier, median};

use crate::error::FeeError;
use crate::tx::{EnvelopeTxDecoder, TxDecoder};
use crate::types::{PriorityTier, ProtocolParams};

/// Portion of the target block size the mempool must fill before its
/// prices are treated as a congestion signal. Below this, the network
/// floor is the estimate.
pub const GAS_PRICE_ESTIMATION_THRESHOLD: f64 = 0.70;

/// A read-only snapshot of the node's pending transactions, in current
/// priority order.
pub trait MempoolSnapshot {
    /// Raw transaction bytes, highest priority first.
    fn pending_txs(&self) -> Vec<Vec<u8>>;

    /// Total size of all pending transactions in bytes.
    fn total_bytes(&self) -> u64;
}

/// State machine simulation of a transaction, yielding its estimated
/// gas usage.
pub trait SimulateTx {
    fn simulate(&self, tx_bytes: &[u8]) -> Result<u64, FeeError>;
}

/// The gas price query service exposed to clients and wallets.
pub struct GasEstimator<M, S, D = EnvelopeTxDecoder>
where
    M: MempoolSnapshot,
    S: SimulateTx,
    D: TxDecoder,
{
    mempool: M,
    simulator: S,
    decoder: D,
    params: ProtocolParams,
}

impl<M, S> GasEstimator<M, S, EnvelopeTxDecoder>
where
    M: MempoolSnapshot,
    S: SimulateTx,
{
    pub fn new(mempool: M, simulator: S, params: ProtocolParams) -> Self {
        Self::with_decoder(mempool, simulator, EnvelopeTxDecoder::new(), params)
    }
}

impl<M, S, D> GasEstimator<M, S, D>
where
    M: MempoolSnapshot,
    S: SimulateTx,
    D: TxDecoder,
{
    pub fn with_decoder(mempool: M, simulator: S, decoder: D, params: ProtocolParams) -> Self {
        Self {
            mempool,
            simulator,
            decoder,
            params,
        }
    }

    /// Estimates the gas price a client should offer for the requested
    /// priority tier, from the gas prices of the transactions that would
    /// fit in the next block.
    pub fn estimate_gas_price(&self, priority: PriorityTier) -> Result<f64, FeeError> {
        let congestion_floor =
            self.params.max_block_bytes as f64 * GAS_PRICE_ESTIMATION_THRESHOLD;
        if (self.mempool.total_bytes() as f64) < congestion_floor {
            // An uncongested mempool carries no pricing signal.
            log::debug!(
                "mempool below congestion threshold, returning network floor {}",
                self.params.min_gas_price
            );
            return Ok(self.params.min_gas_price);
        }

        let prices = extract_gas_prices(
            &self.decoder,
            &self.mempool.pending_txs(),
            self.params.upper_bound_max_bytes,
            &self.params.bond_denom,
        )?;
        Ok(estimate_for_tier(
            &prices,
            priority,
            self.params.min_gas_price,
        ))
    }

    /// Estimates both the gas price for the tier and, by simulating the
    /// supplied transaction, the gas it would use. Envelope framing is
    /// unwrapped before simulation.
    pub fn estimate_gas_price_and_usage(
        &self,
        priority: PriorityTier,
        tx_bytes: &[u8],
    ) -> Result<(f64, u64), FeeError> {
        let gas_price = self.estimate_gas_price(priority)?;
        let inner = EnvelopeTxDecoder::unwrap_envelope(tx_bytes);
        let gas_used = self.simulator.simulate(&inner)?;
        Ok((gas_price, gas_used))
    }
}
