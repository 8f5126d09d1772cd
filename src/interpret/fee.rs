/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Recovering the node's effective minimum gas price from an
//! insufficient-fee rejection.

use regex::Regex;

use super::INTEGERS;
use crate::error::{FeeError, RejectionError, RejectionKind};

/// Parses insufficient-fee rejections for one bond denomination.
/// Construct once, at startup, from the chain's fee parameters.
pub struct FeeErrorInterpreter {
    pattern: Regex,
}

impl FeeErrorInterpreter {
    pub fn new(bond_denom: &str) -> Self {
        let denom = regex::escape(bond_denom);
        let pattern = format!(r"insufficient fees; got: \d+{denom} required: \d+{denom}");
        Self {
            // The pattern is assembled from a literal and an escaped
            // denomination, so compilation cannot fail.
            pattern: Regex::new(&pattern).expect("fee rejection pattern is valid"),
        }
    }

    /// Whether this rejection is an under-priced fee in the configured
    /// denomination. Requires both the structured kind and exactly one
    /// occurrence of the canonical wording; anything else cannot be
    /// safely parsed.
    pub fn is_insufficient_min_gas_price(&self, rejection: &RejectionError) -> bool {
        rejection.kind == RejectionKind::InsufficientFee
            && self.pattern.find_iter(&rejection.message).count() == 1
    }

    /// Derives the node's true minimum gas price from the rejection,
    /// given the gas price and gas limit the client last used.
    ///
    /// Returns `Ok(None)` when the rejection is not actionable (not an
    /// insufficient-fee rejection, or its wording cannot be safely
    /// parsed). Advisory arithmetic: this never feeds consensus state.
    pub fn min_gas_price(
        &self,
        rejection: &RejectionError,
        gas_price: f64,
        gas_limit: u64,
    ) -> Result<Option<f64>, FeeError> {
        if !self.is_insufficient_min_gas_price(rejection) {
            return Ok(None);
        }
        let Some(matched) = self.pattern.find(&rejection.message) else {
            return Ok(None);
        };

        let amounts: Vec<u64> = INTEGERS
            .find_iter(matched.as_str())
            .map(|m| m.as_str().parse())
            .collect::<Result<_, _>>()
            .map_err(|e| FeeError::Parse(format!("fee amount out of range: {e}")))?;
        if amounts.len() != 2 {
            return Err(FeeError::Parse(format!(
                "expected two fee amounts in rejection, found {}",
                amounts.len()
            )));
        }
        let (got, required) = (amounts[0], amounts[1]);

        if required == 0 {
            // A required fee of zero can never cause a rejection; the
            // rejection itself is broken.
            return Err(FeeError::Parse(
                "rejection requires a fee of zero".to_string(),
            ));
        }

        if gas_price == 0.0 || got == 0 {
            // No usable ratio; fall back to required / gas_limit.
            if gas_limit == 0 {
                return Err(FeeError::Parse(
                    "cannot derive min gas price without a gas limit".to_string(),
                ));
            }
            return Ok(Some(required as f64 / gas_limit as f64));
        }

        Ok(Some(required as f64 / got as f64 * gas_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> FeeErrorInterpreter {
        FeeErrorInterpreter::new("gray")
    }

    fn insufficient(message: &str) -> RejectionError {
        RejectionError::new(RejectionKind::InsufficientFee, message)
    }

    #[test]
    fn not_an_insufficient_fee_rejection() {
        let cases = [
            RejectionError::new(
                RejectionKind::InsufficientFee,
                "not enough gas to pay for blobs (minimum: 1000000, got: 100000)",
            ),
            RejectionError::new(
                RejectionKind::Other,
                "insufficient fees; got: 10gray required: 100gray",
            ),
            // Wrong denomination.
            insufficient("insufficient fees; got: 0uatom required: 100uatom"),
        ];
        for rejection in cases {
            assert!(!interpreter().is_insufficient_min_gas_price(&rejection));
            assert_eq!(
                interpreter().min_gas_price(&rejection, 0.01, 0).unwrap(),
                None
            );
        }
    }

    #[test]
    fn derives_price_from_got_required_ratio() {
        let rejection = insufficient("insufficient fees; got: 10gray required: 100gray");
        let price = interpreter()
            .min_gas_price(&rejection, 0.01, 0)
            .unwrap()
            .unwrap();
        assert_eq!(price, 0.1);
    }

    #[test]
    fn zero_got_falls_back_to_gas_limit() {
        let rejection = insufficient("insufficient fees; got: 0gray required: 100gray");
        let price = interpreter()
            .min_gas_price(&rejection, 0.0, 100)
            .unwrap()
            .unwrap();
        assert_eq!(price, 1.0);
    }

    #[test]
    fn zero_got_and_zero_gas_limit_is_a_hard_error() {
        let rejection = insufficient("insufficient fees; got: 0gray required: 100gray");
        let err = interpreter()
            .min_gas_price(&rejection, 0.0, 0)
            .unwrap_err();
        assert!(matches!(err, FeeError::Parse(_)));
    }

    #[test]
    fn zero_required_is_a_hard_error() {
        let rejection = insufficient("insufficient fees; got: 10gray required: 0gray");
        assert!(interpreter().is_insufficient_min_gas_price(&rejection));
        let err = interpreter()
            .min_gas_price(&rejection, 0.01, 0)
            .unwrap_err();
        assert!(matches!(err, FeeError::Parse(_)));
    }

    #[test]
    fn wrapped_rejection_text_still_parses() {
        let rejection = insufficient(
            "broadcast failed: insufficient fees; got: 10gray required: 100gray: retry later",
        );
        let price = interpreter()
            .min_gas_price(&rejection, 0.01, 0)
            .unwrap()
            .unwrap();
        assert_eq!(price, 0.1);
    }

    #[test]
    fn repeated_wording_is_not_actionable() {
        let rejection = insufficient(
            "insufficient fees; got: 10gray required: 100gray; \
             insufficient fees; got: 20gray required: 100gray",
        );
        assert!(!interpreter().is_insufficient_min_gas_price(&rejection));
        assert_eq!(
            interpreter().min_gas_price(&rejection, 0.01, 0).unwrap(),
            None
        );
    }

    #[test]
    fn constructed_rejection_round_trips() {
        // Building the rejection from a (got, required) pair and feeding
        // it back reproduces the derivation formula's output.
        let (got, required, gas_price) = (25u64, 400u64, 0.004f64);
        let rejection = RejectionError::insufficient_fee(got, required, "gray");
        let derived = interpreter()
            .min_gas_price(&rejection, gas_price, 1_000)
            .unwrap()
            .unwrap();
        assert_eq!(derived, required as f64 / got as f64 * gas_price);
    }
}
