/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Defines common data structures to be used inside this library, or from outside application.

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};

/// A 32-byte account address.
pub type PublicAddress = [u8; 32];

/// An amount of a single token denomination. Amounts are unsigned by
/// construction; a coin with an empty denomination is invalid.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u64,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// A coin is valid if it names a denomination.
    pub fn is_valid(&self) -> bool {
        !self.denom.is_empty()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A fee refund to be paid out of the fee-collector module account.
/// Created and consumed within a single post-execution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refund {
    pub recipient: PublicAddress,
    pub amount: u64,
    pub denom: String,
}

/// One gas price observation taken from a pending transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasPriceSample {
    pub price: f64,
    pub size_bytes: usize,
}

/// Client-requested urgency level used to pick a gas price percentile.
/// `Unspecified` is treated as `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityTier {
    #[default]
    Unspecified,
    Low,
    Medium,
    High,
}

/// An entry recorded into the execution context by a post-execution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub topic: String,
    pub value: String,
}

/// The chain's native staking/fee token denomination.
pub const DEFAULT_BOND_DENOM: &str = "gray";

/// Network fallback gas price, returned by estimation when the mempool
/// carries no usable signal.
pub const DEFAULT_MIN_GAS_PRICE: f64 = 0.002;

/// Protocol version from which unused-gas refunds are issued.
pub const REFUND_SUPPORT_VERSION: u64 = 2;

/// Chain fee parameters supplied to the fee accounting components.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolParams {
    /// Protocol version the chain is currently running.
    pub app_version: u64,
    /// The bond denomination fees are paid and refunded in.
    pub bond_denom: String,
    /// Network floor for the gas price, used as the estimation fallback.
    pub min_gas_price: f64,
    /// Target maximum size of a block in bytes.
    pub max_block_bytes: u64,
    /// Hard upper bound on block bytes, used as the sampling budget.
    pub upper_bound_max_bytes: u64,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            app_version: REFUND_SUPPORT_VERSION,
            bond_denom: DEFAULT_BOND_DENOM.to_string(),
            min_gas_price: DEFAULT_MIN_GAS_PRICE,
            max_block_bytes: 2_000_000,
            upper_bound_max_bytes: 8_000_000,
        }
    }
}

/// Lowercase hex rendering of an address, for logs and events.
pub fn hex_address(address: &PublicAddress) -> String {
    let mut s = String::with_capacity(64);
    for byte in address {
        s.push_str(&format!("{byte:02x}"));
    }
    s
}
