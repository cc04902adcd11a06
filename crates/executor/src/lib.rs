// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Papyrus Executor: the state transition core of a Papyrus node. It applies
//! the transactions of a block to a world state in order, decides which
//! senders are exempt from gas fees because they hold stake in the bios
//! contract, and assembles the receipts.

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

/// Execution Context: the message derived from a transaction and the block
/// environment handed to the execution engine.
pub mod context;

/// Error types of block processing.
pub mod error;

/// Block Processing Entry: the transaction gate, the transaction applier and
/// the block processor driving both.
pub mod executive;

/// Gas Pool: the remaining gas budget of the block being processed.
pub mod gas_pool;

/// System Contracts: reads the bios contract's staking data straight from
/// storage, without executing contract code.
pub mod internal_contract;

/// Collaborator Interfaces: the execution engine, the consensus engine and
/// the chain lookup, plus a value-transfer engine.
pub mod machine;

/// Sender recovery for each signature scheme of the chain's history.
pub mod signer;

/// Chain configuration: fork activation and the DAO hard fork.
pub mod spec;

/// Ledger State: the world state interface consumed by the executor and an
/// in-memory implementation of it.
pub mod state;

#[cfg(any(test, feature = "testonly_code"))]
pub mod test_helpers;

pub use context::{Env, Message, VmConfig};
pub use error::{Error, ExecutionError, Result};
pub use executive::{ProcessOutcome, StateProcessor};
pub use gas_pool::GasPool;
pub use internal_contract::SystemContracts;
pub use spec::ChainSpec;
pub use state::{State, StateOps, StorageRead};
