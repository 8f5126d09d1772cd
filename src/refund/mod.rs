/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Refunding unused gas after a transaction commits.
//!
//! Once a fee transaction has executed (and is not a dry-run), part of
//! the prepaid fee that paid for unconsumed gas is returned from the
//! fee-collector module account to whoever paid it. The amount is
//! decided by the [RefundPolicy] active for the running protocol
//! version; the transfer is atomic with the rest of the transaction's
//! state changes, so a failed refund aborts the whole transaction.

pub mod policy;
pub use policy::{policy_for_version, CappedRefund, FullUnspentRefund, RefundPolicy};

use crate::error::FeeError;
use crate::gas_meter::{GasMeter, InfiniteGasMeter};
use crate::ledger::FEE_COLLECTOR;
use crate::pipeline::{PostContext, StepFn, TxView};
use crate::tx::FeeTx;
use crate::types::{hex_address, Coin, Event, Refund};

/// Gas consumed by processing a refund. If a transaction reaches the
/// refund step with less than this remaining, no refund is issued:
/// processing it would cost more than is left.
///
/// NOTE: this value was determined empirically.
pub const REFUND_GAS_COST: u64 = 15_000;

/// Builds the refund post-execution step around the given policy.
/// Callers that run a protocol version without refund support get no
/// policy from [policy_for_version] and simply never install this step.
pub fn refund_step(policy: Box<dyn RefundPolicy>) -> StepFn {
    Box::new(move |ctx: &mut PostContext, tx: &dyn TxView, simulate: bool| {
        if simulate {
            // Dry-runs must not move funds.
            return Ok(());
        }
        // Swap an unbounded meter in for the duration of this step so
        // the refund bookkeeping cannot exhaust the transaction's
        // budget, then restore the transaction's own meter.
        let mut tx_meter =
            std::mem::replace(&mut ctx.gas_meter, Box::new(InfiniteGasMeter::new()));
        let result = maybe_refund(ctx, tx_meter.as_mut(), tx, policy.as_ref());
        ctx.gas_meter = tx_meter;
        result
    })
}

/// Conditionally refunds a portion of the transaction fee to whoever
/// paid it.
fn maybe_refund(
    ctx: &mut PostContext,
    tx_meter: &mut dyn GasMeter,
    tx: &dyn TxView,
    policy: &dyn RefundPolicy,
) -> Result<(), FeeError> {
    if tx_meter.gas_remaining() < REFUND_GAS_COST {
        // Not an error: the refund is silently skipped.
        log::debug!(
            "skipping refund, gas remaining {} below refund cost {}",
            tx_meter.gas_remaining(),
            REFUND_GAS_COST
        );
        return Ok(());
    }
    tx_meter.consume_gas(REFUND_GAS_COST, "refund gas cost");

    let fee_tx = tx.fee_view().ok_or_else(|| {
        FeeError::Validation("transaction does not expose a fee view".to_string())
    })?;

    let Some(refund) = compute_refund(ctx, tx_meter, fee_tx, policy)? else {
        return Ok(());
    };
    process_refund(ctx, refund)
}

/// Runs the policy over the meter's final accounting. Returns `None`
/// when the computed refund rounds to zero.
fn compute_refund(
    ctx: &PostContext,
    tx_meter: &dyn GasMeter,
    fee_tx: &dyn FeeTx,
    policy: &dyn RefundPolicy,
) -> Result<Option<Refund>, FeeError> {
    // Only the bond denomination is refundable; a fee paid in anything
    // else contributes nothing.
    let fee = fee_tx.fee();
    let fee_amount = if fee.denom == ctx.params.bond_denom {
        fee.amount
    } else {
        0
    };

    let amount = policy.refund_amount(
        fee_amount,
        fee_tx.gas_limit(),
        tx_meter.gas_consumed(),
        tx_meter.gas_remaining(),
    )?;
    if amount == 0 {
        return Ok(None);
    }

    // The fee granter, if one pre-authorized this fee, paid it and gets
    // the refund; otherwise the payer does.
    let recipient = fee_tx.fee_granter().unwrap_or_else(|| fee_tx.fee_payer());
    Ok(Some(Refund {
        recipient,
        amount,
        denom: ctx.params.bond_denom.clone(),
    }))
}

/// Sends the refund from the fee-collector module account to the
/// recipient and records the event.
fn process_refund(ctx: &mut PostContext, refund: Refund) -> Result<(), FeeError> {
    let from = ctx.ledger.module_address(FEE_COLLECTOR).ok_or_else(|| {
        FeeError::State(format!(
            "fee collector module account ({FEE_COLLECTOR}) has not been set"
        ))
    })?;

    if !ctx.ledger.account_exists(&refund.recipient) {
        return Err(FeeError::State(format!(
            "recipient address {} does not exist",
            hex_address(&refund.recipient)
        )));
    }

    let coin = Coin::new(refund.denom.clone(), refund.amount);
    if !coin.is_valid() {
        return Err(FeeError::Arithmetic(format!(
            "invalid coin to refund: {coin}"
        )));
    }

    // The fee was already deducted upstream, so an insufficient
    // fee-collector balance here is an invariant violation; the error
    // propagates and aborts the transaction.
    ctx.ledger
        .send_coins(from, refund.recipient, &coin)
        .map_err(|e| {
            FeeError::State(format!(
                "refunding {coin} from fee collector to {}: {e}",
                hex_address(&refund.recipient)
            ))
        })?;

    log::info!(
        "refunded {coin} to {}",
        hex_address(&refund.recipient)
    );
    ctx.events.push(Event {
        topic: "fee_refund".to_string(),
        value: format!("{coin} -> {}", hex_address(&refund.recipient)),
    });
    Ok(())
}
