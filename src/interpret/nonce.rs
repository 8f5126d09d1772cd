/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Recovering the chain's expected sequence number from a wrong-sequence
//! rejection.

use super::INTEGERS;
use crate::error::{FeeError, RejectionError, RejectionKind};

/// Parses wrong-sequence rejections. The canonical upstream wording is
/// `account sequence mismatch, expected <e>, got <g>`; this interpreter
/// assumes exactly those two numbers and refuses anything else rather
/// than guess at partial matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonceMismatchInterpreter;

impl NonceMismatchInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// The sequence number the chain expected.
    pub fn expected_sequence(&self, rejection: &RejectionError) -> Result<u64, FeeError> {
        if rejection.kind != RejectionKind::WrongSequence {
            return Err(FeeError::Parse(
                "not a sequence mismatch rejection".to_string(),
            ));
        }

        let numbers: Vec<u64> = INTEGERS
            .find_iter(&rejection.message)
            .map(|m| m.as_str().parse())
            .collect::<Result<_, _>>()
            .map_err(|e| FeeError::Parse(format!("sequence number out of range: {e}")))?;
        if numbers.len() != 2 {
            // The message format assumption no longer holds.
            return Err(FeeError::Parse(format!(
                "expected two sequence numbers in rejection, found {}",
                numbers.len()
            )));
        }
        Ok(numbers[0])
    }
}
