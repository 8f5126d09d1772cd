/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Extracting gas prices from the pending-transaction list.
//!
//! The mempool's ordering already encodes the node's priority policy, so
//! this module never re-ranks: it takes the longest contiguous prefix of
//! the pending list that fits the byte budget — the transactions that
//! would actually be included in the next block — and decodes a gas
//! price from each.

use crate::error::FeeError;
use crate::tx::TxDecoder;
use crate::types::GasPriceSample;

/// Gas prices of the budget-fitting prefix of `txs`, ascending-sorted.
///
/// Scanning stops entirely at the first transaction that would push the
/// cumulative size over `max_bytes`; skipping past it would misrepresent
/// what the next block can hold. A transaction that fails to decode is a
/// hard error for the whole call.
pub fn extract_gas_prices<D: TxDecoder + ?Sized>(
    decoder: &D,
    txs: &[Vec<u8>],
    max_bytes: u64,
    bond_denom: &str,
) -> Result<Vec<f64>, FeeError> {
    let mut samples: Vec<GasPriceSample> = Vec::with_capacity(txs.len());
    let mut total_bytes: u64 = 0;

    for raw in txs {
        let size_bytes = raw.len();
        if total_bytes.saturating_add(size_bytes as u64) > max_bytes {
            break;
        }
        let tx = decoder.decode(raw)?;
        if tx.gas_limit == 0 {
            return Err(FeeError::Arithmetic(
                "pending transaction declares a gas limit of zero".to_string(),
            ));
        }
        // Fees in a foreign denomination price at zero.
        let fee_amount = if tx.fee.denom == bond_denom {
            tx.fee.amount
        } else {
            0
        };
        total_bytes += size_bytes as u64;
        samples.push(GasPriceSample {
            price: fee_amount as f64 / tx.gas_limit as f64,
            size_bytes,
        });
    }

    let mut prices: Vec<f64> = samples.into_iter().map(|s| s.price).collect();
    // Post-step sort for percentile slicing; not a priority re-ranking.
    prices.sort_by(|a, b| a.total_cmp(b));
    Ok(prices)
}
