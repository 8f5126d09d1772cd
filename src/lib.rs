/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Fee accounting for a validator node: how much of a prepaid
//! transaction fee comes back to the payer after execution, what gas
//! price a client should offer under current congestion, and what a
//! fee or sequence rejection actually asks the client to do.
//!
//! ```text
//! tx commits                -> refund::refund_step   -> partial fee refund
//! client queries price      -> estimation::GasEstimator -> one price per tier
//! node rejects a submission -> interpret::*          -> corrected resubmission parameters
//! ```
//!
//! The refund path runs inside deterministic state [transition
//! steps](pipeline) and computes with exact decimals; the estimation and
//! interpretation paths are advisory, client-facing, and free to use
//! floating point. Account storage, transaction decoding proper, and the
//! mempool's ranking all live outside this crate, behind the seams in
//! [ledger], [tx] and [estimation].

pub mod error;
pub use error::{FeeError, RejectionError, RejectionKind};

pub mod types;
pub use types::{Coin, PriorityTier, ProtocolParams, PublicAddress};

pub mod gas_meter;
pub use gas_meter::{GasMeter, InfiniteGasMeter, TxGasMeter};

pub mod ledger;
pub use ledger::Ledger;

pub mod tx;
pub use tx::{EnvelopeTxDecoder, FeeTransaction, FeeTx, TxDecoder, TxEnvelope};

pub mod pipeline;
pub use pipeline::{PostContext, PostPipeline, TxView};

pub mod refund;
pub use refund::{policy_for_version, refund_step, RefundPolicy, REFUND_GAS_COST};

pub mod interpret;
pub use interpret::{FeeErrorInterpreter, NonceMismatchInterpreter};

pub mod estimation;
pub use estimation::{GasEstimator, MempoolSnapshot, SimulateTx};
