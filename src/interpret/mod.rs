/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Interpreters over rejection text.
//!
//! A node that rejects a transaction reports the reason as prose. These
//! interpreters recover the numbers a client needs to resubmit: the
//! node's effective minimum gas price, or the sequence number the chain
//! expected.
//!
//! KNOWN FRAGILITY: both interpreters depend on the exact upstream
//! wording. A structured "got X, required Y" payload on
//! [RejectionError](crate::error::RejectionError) would remove the
//! regexes entirely; until then, any wording change upstream surfaces
//! here as a `Parse` error or a declined inference, never as a wrong
//! number.

pub mod fee;
pub mod nonce;

pub use fee::FeeErrorInterpreter;
pub use nonce::NonceMismatchInterpreter;

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches every run of decimal digits in a rejection message.
pub(crate) static INTEGERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("integer pattern is valid"));
