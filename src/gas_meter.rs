/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Gas meters: the read-only accounting view the fee layer consumes, and
//! the two meter implementations it swaps between.
//!
//! A meter is owned by the enclosing execution context for the duration
//! of one transaction. The invariant `gas_consumed <= gas_limit` holds at
//! all times; `gas_remaining` can never underflow.

/// Read-only view over an execution context's gas accounting, plus the
/// ability to charge a fixed overhead against it.
pub trait GasMeter {
    fn gas_limit(&self) -> u64;

    fn gas_consumed(&self) -> u64;

    fn gas_remaining(&self) -> u64 {
        self.gas_limit() - self.gas_consumed()
    }

    /// Charge `amount` gas. Consumption is clamped at the limit so the
    /// `gas_consumed <= gas_limit` invariant is preserved.
    fn consume_gas(&mut self, amount: u64, label: &str);
}

/// The bounded per-transaction meter.
#[derive(Debug, Clone)]
pub struct TxGasMeter {
    gas_limit: u64,
    gas_consumed: u64,
}

impl TxGasMeter {
    pub fn new(gas_limit: u64) -> Self {
        Self {
            gas_limit,
            gas_consumed: 0,
        }
    }

    /// A meter for a transaction that has already consumed part of its
    /// budget, as handed over to a post-execution step.
    pub fn with_consumed(gas_limit: u64, gas_consumed: u64) -> Self {
        Self {
            gas_limit,
            gas_consumed: gas_consumed.min(gas_limit),
        }
    }
}

impl GasMeter for TxGasMeter {
    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn gas_consumed(&self) -> u64 {
        self.gas_consumed
    }

    fn consume_gas(&mut self, amount: u64, label: &str) {
        let next = self.gas_consumed.saturating_add(amount);
        if next > self.gas_limit {
            log::warn!(
                "gas meter exhausted while charging {} for {}",
                amount,
                label
            );
        }
        self.gas_consumed = next.min(self.gas_limit);
    }
}

/// An unbounded meter, swapped in while a refund is processed so the
/// refund bookkeeping cannot itself run out of gas.
#[derive(Debug, Clone, Default)]
pub struct InfiniteGasMeter {
    gas_consumed: u64,
}

impl InfiniteGasMeter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GasMeter for InfiniteGasMeter {
    fn gas_limit(&self) -> u64 {
        u64::MAX
    }

    fn gas_consumed(&self) -> u64 {
        self.gas_consumed
    }

    fn consume_gas(&mut self, amount: u64, _label: &str) {
        self.gas_consumed = self.gas_consumed.saturating_add(amount);
    }
}
