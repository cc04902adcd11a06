// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

mod overlay_account;
mod state_object;

#[cfg(test)]
mod tests;

pub use state_object::State;

use papyrus_types::{Address, H256, U256};
use primitives::{Bytes, LogEntry};
use std::sync::Arc;

/// Read-only access to contract storage. This is all the system contract
/// reader needs, so it works on any backend that can answer a word lookup.
pub trait StorageRead {
    /// The 32-byte word at `key` in the storage of `address`. Missing
    /// accounts and unset keys read as zero.
    fn storage_at(&self, address: &Address, key: &H256) -> H256;
}

/// The world state as seen by block processing. An implementation is owned
/// exclusively by one `process` call at a time.
pub trait StateOps: StorageRead {
    fn exists(&self, address: &Address) -> bool;

    fn balance(&self, address: &Address) -> U256;

    fn add_balance(&mut self, address: &Address, by: &U256);

    /// Callers check the balance first; the result saturates at zero.
    fn sub_balance(&mut self, address: &Address, by: &U256);

    fn nonce(&self, address: &Address) -> U256;

    fn inc_nonce(&mut self, address: &Address);

    fn code(&self, address: &Address) -> Option<Arc<Bytes>>;

    fn init_code(&mut self, address: &Address, code: Bytes);

    /// Writing zero clears the key.
    fn set_storage(&mut self, address: &Address, key: H256, value: H256);

    /// Cached stake-derived gas allowance; zero means not derived yet.
    fn gas_allowance(&self, address: &Address) -> u64;

    fn set_gas_allowance(&mut self, address: &Address, allowance: u64);

    /// Start a new transaction: logs added from now on belong to `tx_hash`.
    /// A new `block_hash` drops the logs kept for the previous block.
    fn prepare(&mut self, tx_hash: H256, block_hash: H256, tx_index: usize);

    fn add_log(&mut self, log: LogEntry);

    /// Logs emitted by the transaction `tx_hash`, in emission order.
    fn logs(&self, tx_hash: &H256) -> Vec<LogEntry>;

    /// Open a checkpoint and return its depth.
    fn checkpoint(&mut self) -> usize;

    /// Close the innermost checkpoint keeping its changes.
    fn discard_checkpoint(&mut self);

    /// Close the innermost checkpoint undoing its changes.
    fn revert_to_checkpoint(&mut self);

    /// Seal the changes of the current transaction. With `delete_empty`,
    /// empty accounts touched since the last call are removed.
    fn finalize(&mut self, delete_empty: bool);

    /// `finalize`, then return the state commitment.
    fn intermediate_root(&mut self, delete_empty: bool) -> H256;
}
