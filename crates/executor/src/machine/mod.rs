// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

mod transfer;

pub use transfer::{intrinsic_gas, TransferEngine};

use crate::{
    context::{Env, Message, VmConfig},
    error::ExecutionError,
    gas_pool::GasPool,
    spec::ChainSpec,
    state::StateOps,
};
use papyrus_types::H256;
use primitives::{
    BlockHeader, BlockNumber, Bytes, Receipt, TransactionWithSignature,
};
use std::sync::Arc;
use thiserror::Error;

/// Outcome of a message the engine managed to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageResult {
    pub return_data: Bytes,
    pub gas_used: u64,
    /// Execution reverted. The transaction still goes into the block with a
    /// failed receipt.
    pub failed: bool,
}

/// Runs a single message against the state. The engine buys gas from
/// `gas_pool` and returns what it does not use. A returned error means the
/// transaction cannot be part of the block at all.
pub trait ExecutionEngine: Send + Sync {
    fn apply_message(
        &self, env: &Env, spec: &ChainSpec, vm_config: &VmConfig,
        state: &mut dyn StateOps, message: &Message, gas_pool: &mut GasPool,
    ) -> Result<MessageResult, ExecutionError>;
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConsensusError(pub String);

/// Block-level hook run after all transactions, e.g. for block rewards.
pub trait ConsensusEngine: Send + Sync {
    fn finalize(
        &self, chain: &dyn ChainContext, header: &BlockHeader,
        state: &mut dyn StateOps,
        transactions: &[Arc<TransactionWithSignature>],
        uncles: &[BlockHeader], receipts: &[Receipt],
    ) -> Result<(), ConsensusError>;
}

/// Header lookup into the canonical chain.
pub trait ChainContext: Send + Sync {
    fn header(&self, hash: &H256, number: BlockNumber) -> Option<BlockHeader>;
}
