/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Post-execution step pipeline.
//!
//! Steps run synchronously, in order, inside the per-transaction state
//! transition after a transaction's commands have executed. The list is
//! composed once at startup; a step that fails aborts the enclosing
//! transaction, so its state changes roll back as one unit.

use crate::error::FeeError;
use crate::gas_meter::GasMeter;
use crate::ledger::Ledger;
use crate::tx::FeeTx;
use crate::types::{Event, ProtocolParams};

/// A transaction as handed to post-execution steps. Not every
/// transaction carries a fee view; steps that need one must check.
pub trait TxView {
    fn fee_view(&self) -> Option<&dyn FeeTx>;
}

impl<T: FeeTx> TxView for T {
    fn fee_view(&self) -> Option<&dyn FeeTx> {
        Some(self)
    }
}

/// Mutable slice of the execution context a post-execution step may
/// touch: the ledger, the transaction's gas meter, chain parameters, and
/// the event sink.
/// The context owns its meter so a step can swap another one in for its
/// own duration (the refund step runs under an unbounded meter).
pub struct PostContext<'a> {
    pub ledger: &'a mut dyn Ledger,
    pub gas_meter: Box<dyn GasMeter>,
    pub params: &'a ProtocolParams,
    pub events: Vec<Event>,
}

impl<'a> PostContext<'a> {
    pub fn new(
        ledger: &'a mut dyn Ledger,
        gas_meter: Box<dyn GasMeter>,
        params: &'a ProtocolParams,
    ) -> Self {
        Self {
            ledger,
            gas_meter,
            params,
            events: Vec::new(),
        }
    }
}

/// One post-execution step. `simulate` marks a dry-run that must not
/// move funds.
pub type StepFn =
    Box<dyn Fn(&mut PostContext, &dyn TxView, bool) -> Result<(), FeeError> + Send + Sync>;

/// The ordered list of post-execution steps.
pub struct PostPipeline {
    steps: Vec<StepFn>,
}

impl PostPipeline {
    pub fn new(steps: Vec<StepFn>) -> Self {
        Self { steps }
    }

    /// Runs every step in order. The first failure aborts the run and
    /// must abort the enclosing transaction.
    pub fn run(
        &self,
        ctx: &mut PostContext,
        tx: &dyn TxView,
        simulate: bool,
    ) -> Result<(), FeeError> {
        for step in &self.steps {
            step(ctx, tx, simulate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas_meter::TxGasMeter;
    use crate::types::Coin;

    struct NullLedger;

    impl Ledger for NullLedger {
        fn module_address(&self, _module: &str) -> Option<crate::types::PublicAddress> {
            None
        }

        fn account_exists(&self, _address: &crate::types::PublicAddress) -> bool {
            false
        }

        fn send_coins(
            &mut self,
            _from: crate::types::PublicAddress,
            _to: crate::types::PublicAddress,
            _coin: &Coin,
        ) -> Result<(), FeeError> {
            Ok(())
        }
    }

    struct NoFee;

    impl TxView for NoFee {
        fn fee_view(&self) -> Option<&dyn FeeTx> {
            None
        }
    }

    #[test]
    fn steps_run_in_order_and_stop_on_failure() {
        let mut ledger = NullLedger;
        let params = ProtocolParams::default();
        let mut ctx = PostContext::new(&mut ledger, Box::new(TxGasMeter::new(10)), &params);

        let pipeline = PostPipeline::new(vec![
            Box::new(|ctx: &mut PostContext, _: &dyn TxView, _| {
                ctx.events.push(Event {
                    topic: "first".to_string(),
                    value: String::new(),
                });
                Ok(())
            }),
            Box::new(|_: &mut PostContext, _: &dyn TxView, _| {
                Err(FeeError::State("boom".to_string()))
            }),
            Box::new(|ctx: &mut PostContext, _: &dyn TxView, _| {
                ctx.events.push(Event {
                    topic: "unreachable".to_string(),
                    value: String::new(),
                });
                Ok(())
            }),
        ]);

        let err = pipeline.run(&mut ctx, &NoFee, false).unwrap_err();
        assert!(matches!(err, FeeError::State(_)));
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].topic, "first");
    }
}
