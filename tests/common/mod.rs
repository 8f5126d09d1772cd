/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Shared in-memory fixtures for integration tests.

use std::collections::{HashMap, HashSet};

use pchain_fees::error::FeeError;
use pchain_fees::ledger::{Ledger, FEE_COLLECTOR};
use pchain_fees::tx::FeeTransaction;
use pchain_fees::types::{Coin, PublicAddress, DEFAULT_BOND_DENOM};

pub const PAYER: PublicAddress = [1u8; 32];
pub const GRANTER: PublicAddress = [2u8; 32];
pub const COLLECTOR: PublicAddress = [0xfe; 32];

/// An in-memory ledger with module accounts and per-denomination
/// balances.
#[derive(Default)]
pub struct TestLedger {
    module_addresses: HashMap<String, PublicAddress>,
    accounts: HashSet<PublicAddress>,
    balances: HashMap<(PublicAddress, String), u64>,
}

impl TestLedger {
    /// A ledger with the fee collector set up and funded, and the payer
    /// account existing.
    pub fn funded(collector_balance: u64) -> Self {
        let mut ledger = Self::default();
        ledger
            .module_addresses
            .insert(FEE_COLLECTOR.to_string(), COLLECTOR);
        ledger.accounts.insert(COLLECTOR);
        ledger.accounts.insert(PAYER);
        ledger.set_balance(COLLECTOR, DEFAULT_BOND_DENOM, collector_balance);
        ledger
    }

    pub fn without_fee_collector(mut self) -> Self {
        self.module_addresses.clear();
        self
    }

    pub fn add_account(&mut self, address: PublicAddress) {
        self.accounts.insert(address);
    }

    pub fn set_balance(&mut self, address: PublicAddress, denom: &str, amount: u64) {
        self.balances.insert((address, denom.to_string()), amount);
    }

    pub fn balance(&self, address: PublicAddress, denom: &str) -> u64 {
        self.balances
            .get(&(address, denom.to_string()))
            .copied()
            .unwrap_or(0)
    }
}

impl Ledger for TestLedger {
    fn module_address(&self, module: &str) -> Option<PublicAddress> {
        self.module_addresses.get(module).copied()
    }

    fn account_exists(&self, address: &PublicAddress) -> bool {
        self.accounts.contains(address)
    }

    fn send_coins(
        &mut self,
        from: PublicAddress,
        to: PublicAddress,
        coin: &Coin,
    ) -> Result<(), FeeError> {
        let from_balance = self.balance(from, &coin.denom);
        if from_balance < coin.amount {
            return Err(FeeError::State(format!(
                "insufficient balance: {} < {}",
                from_balance, coin.amount
            )));
        }
        self.set_balance(from, &coin.denom, from_balance - coin.amount);
        let to_balance = self.balance(to, &coin.denom);
        self.set_balance(to, &coin.denom, to_balance + coin.amount);
        Ok(())
    }
}

/// A fee transaction signed by [PAYER] paying in the bond denomination.
pub fn fee_tx(fee_amount: u64, gas_limit: u64) -> FeeTransaction {
    FeeTransaction {
        signer: PAYER,
        nonce: 0,
        gas_limit,
        fee: Coin::new(DEFAULT_BOND_DENOM, fee_amount),
        fee_granter: None,
        payload: b"transfer".to_vec(),
    }
}
