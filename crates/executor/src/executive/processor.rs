// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{
    apply::{apply_transaction, ApplyContext},
    gate::TransactionGate,
    hard_fork::apply_dao_hard_fork,
};
use crate::{
    context::VmConfig,
    error::Result,
    gas_pool::GasPool,
    internal_contract::SystemContracts,
    machine::{ChainContext, ConsensusEngine, ExecutionEngine},
    spec::ChainSpec,
    state::{StateOps, StorageRead},
};
use papyrus_types::Address;
use primitives::{Block, LocalizedLogEntry, Receipt};
use std::sync::Arc;

/// Result of processing one block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOutcome {
    /// One receipt per transaction, in block order.
    pub receipts: Vec<Receipt>,
    pub logs: Vec<LocalizedLogEntry>,
    pub gas_used: u64,
}

/// Applies blocks to a world state. It holds configuration and
/// collaborators only, so one processor serves any number of blocks and
/// threads.
pub struct StateProcessor {
    spec: Arc<ChainSpec>,
    chain: Arc<dyn ChainContext>,
    engine: Arc<dyn ConsensusEngine>,
    vm: Arc<dyn ExecutionEngine>,
    system_contracts: SystemContracts,
}

impl StateProcessor {
    pub fn new(
        spec: Arc<ChainSpec>, chain: Arc<dyn ChainContext>,
        engine: Arc<dyn ConsensusEngine>, vm: Arc<dyn ExecutionEngine>,
    ) -> Self {
        StateProcessor {
            spec,
            chain,
            engine,
            vm,
            system_contracts: SystemContracts::default(),
        }
    }

    pub fn with_system_contracts(
        mut self, system_contracts: SystemContracts,
    ) -> Self {
        self.system_contracts = system_contracts;
        self
    }

    pub fn spec(&self) -> &ChainSpec { &self.spec }

    pub fn system_contracts(&self) -> &SystemContracts {
        &self.system_contracts
    }

    /// Current signer set of the bios contract, empty before deployment.
    pub fn signers<S: StorageRead + ?Sized>(&self, state: &S) -> Vec<Address> {
        self.system_contracts.signers(state)
    }

    /// Apply every transaction of `block` in order, then run the consensus
    /// engine's finalization.
    ///
    /// On error nothing is returned and `state` is left as far as processing
    /// got; callers that need the previous state keep their own copy.
    pub fn process<S: StateOps>(
        &self, block: &Block, state: &mut S, vm_config: &VmConfig,
    ) -> Result<ProcessOutcome> {
        let header = &block.block_header;
        let block_hash = block.hash();
        let block_number = header.number();
        debug!(
            "process block: number={} hash={:?} transactions={} gas_limit={}",
            block_number,
            block_hash,
            block.transactions.len(),
            header.gas_limit()
        );

        let mut gas_pool = GasPool::new(header.gas_limit());
        let mut gas_used = 0u64;
        let mut receipts = Vec::with_capacity(block.transactions.len());
        let mut logs = Vec::new();

        if self.spec.is_dao_fork_block(block_number) {
            apply_dao_hard_fork(&self.spec, state);
        }

        let gate = TransactionGate::new(&self.spec, &self.system_contracts);
        let context = ApplyContext {
            spec: &self.spec,
            chain: &*self.chain,
            engine: &*self.vm,
            header,
            author: None,
            vm_config,
        };
        for (index, tx) in block.transactions.iter().enumerate() {
            let tx_hash = tx.hash();
            state.prepare(tx_hash, block_hash, index);
            let unmetered = gate.is_exempt(&**tx, &*state, header);
            let receipt = apply_transaction(
                &context,
                &mut gas_pool,
                state,
                tx,
                unmetered,
                &mut gas_used,
            )
            .map_err(|e| {
                warn!(
                    "block {:?} rejected at transaction {}: {}",
                    block_hash, index, e
                );
                e
            })?;

            let first_log_index = logs.len();
            logs.extend(receipt.logs.iter().enumerate().map(
                |(transaction_log_index, entry)| LocalizedLogEntry {
                    entry: entry.clone(),
                    block_hash,
                    block_number,
                    transaction_hash: tx_hash,
                    transaction_index: index,
                    log_index: first_log_index + transaction_log_index,
                    transaction_log_index,
                },
            ));
            receipts.push(receipt);
        }

        self.engine.finalize(
            &*self.chain,
            header,
            state,
            &block.transactions,
            &block.uncles,
            &receipts,
        )?;

        debug!(
            "block processed: number={} gas_used={} logs={}",
            block_number,
            gas_used,
            logs.len()
        );
        Ok(ProcessOutcome {
            receipts,
            logs,
            gas_used,
        })
    }
}
