// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{overlay_account::OverlayAccount, StateOps, StorageRead};
use keccak_hash::{keccak, KECCAK_NULL_RLP};
use papyrus_types::{Address, H256, U256};
use primitives::{Account, Bytes, LogEntry};
use rlp::RlpStream;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

/// Pre-checkpoint copy of an account, recorded on its first write under the
/// checkpoint.
#[derive(Debug, Clone)]
struct CheckpointEntry {
    /// `None` if the account did not exist.
    account: Option<OverlayAccount>,
    touched: bool,
}

#[derive(Debug, Clone, Default)]
struct CheckpointLayer {
    entries: HashMap<Address, CheckpointEntry>,
    log_count: usize,
}

/// In-memory world state.
///
/// Cloning gives an independent copy, which is how a caller keeps a
/// pre-block snapshot: `process` does not roll back on error.
#[derive(Debug, Clone, Default)]
pub struct State {
    accounts: BTreeMap<Address, OverlayAccount>,
    /// Accounts written since the last `finalize`.
    touched: BTreeSet<Address>,
    /// Logs of the block named by `block_hash`, per transaction.
    logs: HashMap<H256, Vec<LogEntry>>,
    tx_hash: H256,
    block_hash: H256,
    checkpoints: Vec<CheckpointLayer>,
}

impl State {
    pub fn new() -> Self { Self::default() }

    /// Committed form of `address`, if the account exists.
    pub fn account(&self, address: &Address) -> Option<Account> {
        self.accounts.get(address).map(OverlayAccount::as_account)
    }

    pub fn accounts_len(&self) -> usize { self.accounts.len() }

    /// Commitment over every account in address order: keccak of the RLP
    /// list of `[address, account]` pairs.
    pub fn root(&self) -> H256 {
        if self.accounts.is_empty() {
            return KECCAK_NULL_RLP;
        }
        let mut stream = RlpStream::new_list(self.accounts.len());
        for (address, account) in &self.accounts {
            stream
                .begin_list(2)
                .append(address)
                .append(&account.as_account());
        }
        keccak(stream.out())
    }

    #[cfg(test)]
    pub(super) fn logged_transactions(&self) -> usize { self.logs.len() }

    #[cfg(test)]
    pub(super) fn checkpoint_entries(&self) -> usize {
        self.checkpoints.last().map_or(0, |layer| layer.entries.len())
    }

    fn require(&mut self, address: &Address) -> &mut OverlayAccount {
        if let Some(layer) = self.checkpoints.last_mut() {
            if !layer.entries.contains_key(address) {
                layer.entries.insert(
                    *address,
                    CheckpointEntry {
                        account: self.accounts.get(address).cloned(),
                        touched: self.touched.contains(address),
                    },
                );
            }
        }
        self.touched.insert(*address);
        self.accounts.entry(*address).or_default()
    }
}

impl StorageRead for State {
    fn storage_at(&self, address: &Address, key: &H256) -> H256 {
        self.accounts
            .get(address)
            .and_then(|account| account.storage.get(key))
            .copied()
            .unwrap_or_default()
    }
}

impl StateOps for State {
    fn exists(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    fn balance(&self, address: &Address) -> U256 {
        self.accounts
            .get(address)
            .map_or_else(U256::zero, |account| account.balance)
    }

    fn add_balance(&mut self, address: &Address, by: &U256) {
        let account = self.require(address);
        account.balance = account.balance.saturating_add(*by);
    }

    fn sub_balance(&mut self, address: &Address, by: &U256) {
        let account = self.require(address);
        account.balance = account.balance.saturating_sub(*by);
    }

    fn nonce(&self, address: &Address) -> U256 {
        self.accounts
            .get(address)
            .map_or_else(U256::zero, |account| account.nonce)
    }

    fn inc_nonce(&mut self, address: &Address) {
        let account = self.require(address);
        account.nonce = account.nonce.saturating_add(U256::one());
    }

    fn code(&self, address: &Address) -> Option<Arc<Bytes>> {
        self.accounts
            .get(address)
            .and_then(|account| account.code.clone())
    }

    fn init_code(&mut self, address: &Address, code: Bytes) {
        self.require(address).code = Some(Arc::new(code));
    }

    fn set_storage(&mut self, address: &Address, key: H256, value: H256) {
        self.require(address).set_storage(key, value);
    }

    fn gas_allowance(&self, address: &Address) -> u64 {
        self.accounts
            .get(address)
            .map_or(0, |account| account.gas_allowance)
    }

    fn set_gas_allowance(&mut self, address: &Address, allowance: u64) {
        self.require(address).gas_allowance = allowance;
    }

    fn prepare(&mut self, tx_hash: H256, block_hash: H256, _tx_index: usize) {
        if block_hash != self.block_hash {
            self.logs.clear();
            self.block_hash = block_hash;
        }
        self.tx_hash = tx_hash;
    }

    fn add_log(&mut self, log: LogEntry) {
        self.logs.entry(self.tx_hash).or_default().push(log);
    }

    fn logs(&self, tx_hash: &H256) -> Vec<LogEntry> {
        self.logs.get(tx_hash).cloned().unwrap_or_default()
    }

    fn checkpoint(&mut self) -> usize {
        let log_count = self.logs.get(&self.tx_hash).map_or(0, Vec::len);
        self.checkpoints.push(CheckpointLayer {
            entries: HashMap::new(),
            log_count,
        });
        self.checkpoints.len() - 1
    }

    fn discard_checkpoint(&mut self) {
        let layer = match self.checkpoints.pop() {
            Some(layer) => layer,
            None => return,
        };
        // The outer layer keeps its own, older copy of an account.
        if let Some(parent) = self.checkpoints.last_mut() {
            for (address, entry) in layer.entries {
                parent.entries.entry(address).or_insert(entry);
            }
        }
    }

    fn revert_to_checkpoint(&mut self) {
        let layer = match self.checkpoints.pop() {
            Some(layer) => layer,
            None => {
                warn!("revert_to_checkpoint called without a checkpoint");
                return;
            }
        };
        for (address, entry) in layer.entries {
            match entry.account {
                Some(account) => {
                    self.accounts.insert(address, account);
                }
                None => {
                    self.accounts.remove(&address);
                }
            }
            if entry.touched {
                self.touched.insert(address);
            } else {
                self.touched.remove(&address);
            }
        }
        if let Some(logs) = self.logs.get_mut(&self.tx_hash) {
            logs.truncate(layer.log_count);
        }
    }

    fn finalize(&mut self, delete_empty: bool) {
        let touched = std::mem::take(&mut self.touched);
        if delete_empty {
            for address in touched {
                if self
                    .accounts
                    .get(&address)
                    .map_or(false, OverlayAccount::is_empty)
                {
                    trace!("remove empty account {:?}", address);
                    self.accounts.remove(&address);
                }
            }
        }
        self.checkpoints.clear();
    }

    fn intermediate_root(&mut self, delete_empty: bool) -> H256 {
        self.finalize(delete_empty);
        self.root()
    }
}
