// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{machine::ConsensusError, signer::SignerError};
use papyrus_types::{H256, U256, U512};
use thiserror::Error;

/// Faults that make a transaction, and therefore its block, invalid. A
/// contract-level revert is not one of them: it produces a failed receipt.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("gas limit reached: {available} available, {required} required")]
    GasLimitReached { available: u64, required: u64 },

    #[error("gas pool overflow: {available} available, {added} added")]
    GasPoolOverflow { available: u64, added: u64 },

    #[error("nonce too high: expected {expected}, got {got}")]
    NonceTooHigh { expected: U256, got: U256 },

    #[error("nonce too low: expected {expected}, got {got}")]
    NonceTooLow { expected: U256, got: U256 },

    #[error(
        "insufficient funds for gas * price: balance {balance}, required {required}"
    )]
    InsufficientFundsForGas { balance: U256, required: U512 },

    #[error("intrinsic gas too low: required {required}, got {got}")]
    IntrinsicGas { required: u64, got: u64 },

    #[error("intrinsic gas overflows u64")]
    GasUintOverflow,

    #[error("{0}")]
    Internal(String),
}

/// Reasons for `process` to abort a block. Each variant keeps the failing
/// collaborator's error untouched.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid transaction {hash:?}: {source}")]
    Validation {
        hash: H256,
        #[source]
        source: SignerError,
    },

    #[error("could not apply transaction {hash:?}: {source}")]
    Execution {
        hash: H256,
        #[source]
        source: ExecutionError,
    },

    #[error("block finalization failed: {0}")]
    Consensus(#[from] ConsensusError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
