/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The funds-transfer capability the refund path depends on. Account and
//! balance storage live outside this crate; this trait is the seam the
//! enclosing execution context fills in.

use crate::error::FeeError;
use crate::types::{Coin, PublicAddress};

/// Name of the system-owned module account that temporarily holds
/// collected transaction fees before distribution or refund.
pub const FEE_COLLECTOR: &str = "fee_collector";

/// Minimal ledger capability consumed by the refund step.
///
/// A transfer failure must abort the enclosing transaction, so
/// `send_coins` errors are surfaced as [FeeError::State] by callers and
/// never swallowed.
pub trait Ledger {
    /// Address of a named module account, if it has been set.
    fn module_address(&self, module: &str) -> Option<PublicAddress>;

    /// Whether an account exists under this address.
    fn account_exists(&self, address: &PublicAddress) -> bool;

    /// Transfer `coin` between two accounts. The transfer is atomic with
    /// the rest of the enclosing transaction's state changes.
    fn send_coins(
        &mut self,
        from: PublicAddress,
        to: PublicAddress,
        coin: &Coin,
    ) -> Result<(), FeeError>;
}
