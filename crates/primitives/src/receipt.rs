// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::log_entry::{build_bloom, LogEntry};
use papyrus_types::{Address, Bloom, H256};
use rlp::{Encodable, RlpStream};

pub const TRANSACTION_OUTCOME_FAILURE: u8 = 0;
pub const TRANSACTION_OUTCOME_SUCCESS: u8 = 1;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Failure = 0,
    Success = 1,
}

impl TransactionStatus {
    fn into_u8(&self) -> u8 {
        match self {
            TransactionStatus::Failure => TRANSACTION_OUTCOME_FAILURE,
            TransactionStatus::Success => TRANSACTION_OUTCOME_SUCCESS,
        }
    }
}

impl Default for TransactionStatus {
    fn default() -> Self { TransactionStatus::Success }
}

/// Information describing execution of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Receipt {
    /// Intermediate state root after the transaction. Only recorded before
    /// Byzantium; later receipts carry the outcome status instead.
    pub state_root: Option<H256>,
    /// Transaction outcome.
    pub outcome_status: TransactionStatus,
    /// The total gas used in the block following execution of the
    /// transaction.
    pub accumulated_gas_used: u64,
    /// The OR-wide combination of all logs' blooms for this transaction.
    pub log_bloom: Bloom,
    /// The logs stemming from this transaction.
    pub logs: Vec<LogEntry>,
    pub transaction_hash: H256,
    /// Gas used by this transaction alone.
    pub gas_used: u64,
    /// Address of the created contract, if the transaction was a creation.
    pub contract_address: Option<Address>,
}

impl Receipt {
    pub fn new(
        state_root: Option<H256>, failed: bool, accumulated_gas_used: u64,
    ) -> Self {
        Self {
            state_root,
            outcome_status: if failed {
                TransactionStatus::Failure
            } else {
                TransactionStatus::Success
            },
            accumulated_gas_used,
            ..Default::default()
        }
    }

    /// Attach the transaction logs and derive the bloom over exactly them.
    pub fn set_logs(&mut self, logs: Vec<LogEntry>) {
        self.log_bloom = build_bloom(&logs);
        self.logs = logs;
    }

    pub fn tx_success(&self) -> bool {
        self.outcome_status == TransactionStatus::Success
    }

    pub fn accumulated_gas_used(&self) -> u64 { self.accumulated_gas_used }

    pub fn logs(&self) -> &[LogEntry] { &self.logs }
}

/// Consensus encoding: `[root or status, cumulative gas, bloom, logs]`.
impl Encodable for Receipt {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        match self.state_root {
            Some(ref root) => s.append(root),
            None => s.append(&self.outcome_status.into_u8()),
        };
        s.append(&self.accumulated_gas_used);
        s.append(&self.log_bloom);
        s.append_list(&self.logs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rlp::Rlp;

    #[test]
    fn test_transaction_outcome_rlp() {
        let failed = Receipt::new(None, true, 21000);
        let rlp_bytes = rlp::encode(&failed);
        let rlp = Rlp::new(&rlp_bytes);
        // A failed status is the empty byte string.
        assert_eq!(rlp.at(0).unwrap().as_raw(), &[0x80]);

        let succeeded = Receipt::new(None, false, 21000);
        let rlp_bytes = rlp::encode(&succeeded);
        let rlp = Rlp::new(&rlp_bytes);
        assert_eq!(rlp.at(0).unwrap().as_raw(), &[0x01]);
        assert_eq!(rlp.val_at::<u64>(1).unwrap(), 21000);
    }

    #[test]
    fn test_pre_byzantium_receipt_encodes_root() {
        let root = H256(hex!(
            "56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421"
        ));
        let receipt = Receipt::new(Some(root), true, 42);
        let rlp_bytes = rlp::encode(&receipt);
        let rlp = Rlp::new(&rlp_bytes);
        assert_eq!(rlp.item_count().unwrap(), 4);
        assert_eq!(rlp.val_at::<H256>(0).unwrap(), root);
    }

    #[test]
    fn test_set_logs_builds_bloom() {
        let mut receipt = Receipt::new(None, false, 0);
        receipt.set_logs(vec![]);
        assert_eq!(receipt.log_bloom, Bloom::zero());

        let log = LogEntry {
            address: Address::from_low_u64_be(7),
            topics: vec![H256::from_low_u64_be(9)],
            data: vec![],
        };
        receipt.set_logs(vec![log.clone()]);
        assert_eq!(receipt.log_bloom, log.bloom());
        assert_eq!(receipt.logs(), &[log]);
    }
}
