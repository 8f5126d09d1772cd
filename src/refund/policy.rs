/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Refund policies.
//!
//! Two policies exist in the protocol's history: the active capped
//! policy, which refunds unused gas but never more than half of what the
//! transaction actually consumed paid for, and the older unconditional
//! policy that returned every unspent unit of the fee.
//!
//! All arithmetic here runs inside deterministic state transition and
//! uses fixed-point decimals. Truncation and ceiling points are part of
//! consensus and must not move.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::FeeError;
use crate::types::REFUND_SUPPORT_VERSION;

/// Computes the refund amount, in the bond denomination, for a committed
/// transaction.
pub trait RefundPolicy: Send + Sync {
    fn refund_amount(
        &self,
        fee_amount: u64,
        gas_limit: u64,
        gas_consumed: u64,
        gas_remaining: u64,
    ) -> Result<u64, FeeError>;
}

/// gas_price = fee / gas_limit, as an exact decimal.
fn gas_price(fee_amount: u64, gas_limit: u64) -> Result<Decimal, FeeError> {
    if gas_limit == 0 {
        return Err(FeeError::Arithmetic(
            "cannot derive gas price from a gas limit of zero".to_string(),
        ));
    }
    Ok(Decimal::from(fee_amount) / Decimal::from(gas_limit))
}

/// The active policy: refund the fee paid for unused gas, capped at half
/// of the fee paid for consumed gas.
///
/// ```text
/// refund = min( trunc(gas_price * gas_remaining),
///               trunc(0.5 * gas_price * gas_consumed) )
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CappedRefund;

impl CappedRefund {
    /// Maximum portion of the consumed-gas fee that can come back as a
    /// refund.
    pub fn max_refund_portion() -> Decimal {
        Decimal::new(5, 1) // 50%
    }
}

impl RefundPolicy for CappedRefund {
    fn refund_amount(
        &self,
        fee_amount: u64,
        gas_limit: u64,
        gas_consumed: u64,
        gas_remaining: u64,
    ) -> Result<u64, FeeError> {
        let price = gas_price(fee_amount, gas_limit)?;
        let unused = (price * Decimal::from(gas_remaining)).trunc();
        let cap = (Self::max_refund_portion() * price * Decimal::from(gas_consumed)).trunc();
        unused
            .min(cap)
            .to_u64()
            .ok_or_else(|| FeeError::Arithmetic("refund amount out of range".to_string()))
    }
}

/// The legacy policy: refund everything the transaction did not spend,
/// rounding the consumed-gas fee up so the payer never profits from
/// rounding.
///
/// ```text
/// refund = fee - ceil(gas_price * gas_consumed)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FullUnspentRefund;

impl RefundPolicy for FullUnspentRefund {
    fn refund_amount(
        &self,
        fee_amount: u64,
        gas_limit: u64,
        gas_consumed: u64,
        _gas_remaining: u64,
    ) -> Result<u64, FeeError> {
        let price = gas_price(fee_amount, gas_limit)?;
        let consumed_fee = (price * Decimal::from(gas_consumed))
            .ceil()
            .to_u64()
            .ok_or_else(|| FeeError::Arithmetic("consumed fee out of range".to_string()))?;
        Ok(fee_amount.saturating_sub(consumed_fee))
    }
}

/// Selects the refund policy active at a protocol version, once at
/// startup. Versions predating refund support get no policy at all, so
/// the refund step is simply not installed.
pub fn policy_for_version(app_version: u64) -> Option<Box<dyn RefundPolicy>> {
    (app_version >= REFUND_SUPPORT_VERSION).then(|| Box::new(CappedRefund) as Box<dyn RefundPolicy>)
}
