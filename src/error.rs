/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! error defines sets of error definitions for the fee accounting layer.
//!
//! The taxonomy separates fatal consensus-path failures (`Validation`,
//! `State`, `Arithmetic`) from the advisory `Parse` failure, which only
//! signals that no inference could be drawn from a rejection's text.

use thiserror::Error;

/// Descriptive error definitions of the fee accounting layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    /// Input is not a fee-bearing transaction. Fatal to the calling step.
    #[error("invalid fee transaction: {0}")]
    Validation(String),

    /// Missing module account, missing recipient account, or a failed
    /// transfer. Fatal; aborts the enclosing transaction.
    #[error("fee state error: {0}")]
    State(String),

    /// Invalid or out-of-range coin arithmetic. Fatal.
    #[error("fee arithmetic error: {0}")]
    Arithmetic(String),

    /// Rejection text did not match the expected upstream wording.
    /// Non-fatal; the caller falls back to a default or surfaces the
    /// original rejection unparsed.
    #[error("cannot parse rejection: {0}")]
    Parse(String),
}

/// The kind of a transaction rejection as classified by the submitting
/// node. Carried alongside the raw text so interpreters do not have to
/// guess the class from wording alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// The fee offered did not meet the node's effective minimum.
    InsufficientFee,
    /// The transaction's sequence number did not match the account's.
    WrongSequence,
    /// Any other rejection. Never actionable for fee inference.
    Other,
}

/// A rejected-transaction error as returned from broadcast: a structured
/// kind plus the node's free-form (possibly wrapped) message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionError {
    pub kind: RejectionKind,
    pub message: String,
}

impl RejectionError {
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Constructs the canonical insufficient-fee rejection for a given
    /// got/required pair, with the exact wording nodes emit.
    pub fn insufficient_fee(got: u64, required: u64, denom: &str) -> Self {
        Self::new(
            RejectionKind::InsufficientFee,
            format!("insufficient fees; got: {got}{denom} required: {required}{denom}"),
        )
    }

    /// Constructs the canonical wrong-sequence rejection.
    pub fn wrong_sequence(expected: u64, got: u64) -> Self {
        Self::new(
            RejectionKind::WrongSequence,
            format!("account sequence mismatch, expected {expected}, got {got}"),
        )
    }
}

impl std::fmt::Display for RejectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
