/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Transaction views and wire decoding.
//!
//! The fee layer never inspects a transaction's commands; it only needs
//! the fee view ([FeeTx]) and the ability to decode raw mempool bytes
//! into one. Raw bytes may additionally be wrapped in a [TxEnvelope]
//! that carries data blobs alongside the transaction proper; decoders
//! unwrap that framing transparently.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::FeeError;
use crate::types::{Coin, PublicAddress};

/// Read-only fee view over a transaction.
pub trait FeeTx {
    /// The prepaid fee.
    fn fee(&self) -> &Coin;

    /// The declared gas limit.
    fn gas_limit(&self) -> u64;

    /// The account the fee was deducted from.
    fn fee_payer(&self) -> PublicAddress;

    /// The account that pre-authorized paying this transaction's fee,
    /// if any.
    fn fee_granter(&self) -> Option<PublicAddress>;
}

/// A transaction as seen by the fee layer after decoding: signer,
/// replay-protection nonce, the fee view, and the opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct FeeTransaction {
    pub signer: PublicAddress,
    pub nonce: u64,
    pub gas_limit: u64,
    pub fee: Coin,
    pub fee_granter: Option<PublicAddress>,
    pub payload: Vec<u8>,
}

impl FeeTx for FeeTransaction {
    fn fee(&self) -> &Coin {
        &self.fee
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn fee_payer(&self) -> PublicAddress {
        self.signer
    }

    fn fee_granter(&self) -> Option<PublicAddress> {
        self.fee_granter
    }
}

/// Transport framing for a transaction that ships data blobs next to the
/// transaction bytes. Only the inner `tx` bytes are fee-relevant.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TxEnvelope {
    /// Serialized [FeeTransaction].
    pub tx: Vec<u8>,
    /// Opaque blob payloads. Their size counts toward block bytes but
    /// they carry no fee information.
    pub blobs: Vec<Vec<u8>>,
}

/// Decodes raw transaction bytes into a fee view, unwrapping any nested
/// transport framing.
pub trait TxDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<FeeTransaction, FeeError>;
}

/// The crate's wire decoder: accepts either a bare serialized
/// [FeeTransaction] or one wrapped in a [TxEnvelope].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeTxDecoder;

impl EnvelopeTxDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Strips [TxEnvelope] framing if present, returning the inner
    /// transaction bytes unchanged otherwise.
    pub fn unwrap_envelope(bytes: &[u8]) -> Vec<u8> {
        match TxEnvelope::try_from_slice(bytes) {
            Ok(envelope) => envelope.tx,
            Err(_) => bytes.to_vec(),
        }
    }
}

impl TxDecoder for EnvelopeTxDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<FeeTransaction, FeeError> {
        let inner = Self::unwrap_envelope(bytes);
        FeeTransaction::try_from_slice(&inner)
            .map_err(|e| FeeError::Parse(format!("undecodable transaction: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borsh::BorshSerialize;

    fn sample_tx() -> FeeTransaction {
        FeeTransaction {
            signer: [1u8; 32],
            nonce: 7,
            gas_limit: 100_000,
            fee: Coin::new("gray", 2_000),
            fee_granter: None,
            payload: b"transfer".to_vec(),
        }
    }

    #[test]
    fn decodes_bare_transaction() {
        let tx = sample_tx();
        let bytes = tx.try_to_vec().unwrap();
        let decoded = EnvelopeTxDecoder::new().decode(&bytes).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn decodes_enveloped_transaction() {
        let tx = sample_tx();
        let envelope = TxEnvelope {
            tx: tx.try_to_vec().unwrap(),
            blobs: vec![vec![0u8; 128], vec![1u8; 64]],
        };
        let bytes = envelope.try_to_vec().unwrap();
        let decoded = EnvelopeTxDecoder::new().decode(&bytes).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = EnvelopeTxDecoder::new().decode(&[0xde, 0xad]).unwrap_err();
        assert!(matches!(err, FeeError::Parse(_)));
    }
}
