// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Log entry type definition.

use crate::{block::BlockNumber, Bytes};
use papyrus_types::{Address, Bloom, BloomInput, H256};
use rlp_derive::{RlpDecodable, RlpEncodable};
use std::ops::Deref;

/// A record of execution for a `LOG` operation.
#[derive(Default, Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct LogEntry {
    /// The address of the contract executing at the point of the `LOG`
    /// operation.
    pub address: Address,
    /// The topics associated with the `LOG` operation.
    pub topics: Vec<H256>,
    /// The data associated with the `LOG` operation.
    pub data: Bytes,
}

impl LogEntry {
    /// Calculates the bloom of this log entry.
    pub fn bloom(&self) -> Bloom {
        self.topics.iter().fold(
            Bloom::from(BloomInput::Raw(self.address.as_bytes())),
            |mut b, t| {
                b.accrue(BloomInput::Raw(t.as_bytes()));
                b
            },
        )
    }
}

/// The OR-wide combination of the blooms of `logs`.
pub fn build_bloom(logs: &[LogEntry]) -> Bloom {
    logs.iter().fold(Bloom::default(), |mut b, l| {
        b.accrue_bloom(&l.bloom());
        b
    })
}

/// Log localized in a blockchain.
#[derive(Default, Debug, PartialEq, Clone)]
pub struct LocalizedLogEntry {
    /// Plain log entry.
    pub entry: LogEntry,
    /// Block in which this log was created.
    pub block_hash: H256,
    /// Block number.
    pub block_number: BlockNumber,
    /// Hash of transaction in which this log was created.
    pub transaction_hash: H256,
    /// Index of transaction within block.
    pub transaction_index: usize,
    /// Log position in the block.
    pub log_index: usize,
    /// Log position in the transaction.
    pub transaction_log_index: usize,
}

impl Deref for LocalizedLogEntry {
    type Target = LogEntry;

    fn deref(&self) -> &Self::Target { &self.entry }
}

#[cfg(test)]
mod tests {
    use super::{build_bloom, LogEntry};
    use papyrus_types::{Address, Bloom, H256};

    #[test]
    fn test_empty_log_bloom() {
        let bloom = "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000008800000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000800000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000".parse::<Bloom>().unwrap();
        let address = "0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6"
            .parse::<Address>()
            .unwrap();
        let log = LogEntry {
            address,
            topics: vec![],
            data: vec![],
        };
        assert_eq!(log.bloom(), bloom);
    }

    #[test]
    fn test_bloom_of_no_logs_is_zero() {
        assert_eq!(build_bloom(&[]), Bloom::zero());
    }

    #[test]
    fn test_bloom_contains_address_and_topics() {
        let log = LogEntry {
            address: Address::from_low_u64_be(0xb105),
            topics: vec![H256::from_low_u64_be(1), H256::from_low_u64_be(2)],
            data: vec![1, 2, 3],
        };
        let bloom = build_bloom(&[log.clone()]);
        assert!(bloom.contains_input(papyrus_types::BloomInput::Raw(
            log.address.as_bytes()
        )));
        for topic in &log.topics {
            assert!(bloom.contains_input(papyrus_types::BloomInput::Raw(
                topic.as_bytes()
            )));
        }
        // Data does not enter the bloom.
        let without_data = LogEntry {
            data: vec![],
            ..log
        };
        assert_eq!(bloom, build_bloom(&[without_data]));
    }
}
