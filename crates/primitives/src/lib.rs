// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

extern crate keccak_hash as hash;

pub mod account;
pub mod block;
pub mod block_header;
pub mod log_entry;
pub mod receipt;
pub mod transaction;

pub type Bytes = Vec<u8>;

pub use crate::{
    account::Account,
    block::{Block, BlockNumber},
    block_header::{BlockHeader, BlockHeaderBuilder},
    log_entry::{LocalizedLogEntry, LogEntry},
    receipt::{Receipt, TransactionStatus},
    transaction::{Action, Transaction, TransactionWithSignature},
};
