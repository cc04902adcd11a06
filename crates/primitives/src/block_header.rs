// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    block::BlockNumber,
    hash::{keccak, KECCAK_EMPTY_LIST_RLP, KECCAK_NULL_RLP},
    Bytes,
};
use papyrus_types::{Address, Bloom, H256, U256};
use rlp_derive::{RlpDecodable, RlpEncodable};

/// A block header.
#[derive(Clone, Debug, PartialEq, Eq, RlpDecodable, RlpEncodable)]
pub struct BlockHeader {
    /// Parent hash.
    parent_hash: H256,
    /// Hash of the uncle header list.
    uncles_hash: H256,
    /// Block author (coinbase).
    author: Address,
    /// State root after applying the block.
    state_root: H256,
    /// Transactions root.
    transactions_root: H256,
    /// Block receipts root.
    receipts_root: H256,
    /// Union of the blooms of all receipts.
    log_bloom: Bloom,
    /// Block difficulty.
    difficulty: U256,
    /// Block number.
    number: BlockNumber,
    /// Gas limit.
    gas_limit: u64,
    /// Gas used by all transactions of the block.
    gas_used: u64,
    /// Block timestamp.
    timestamp: u64,
    /// Extra data.
    extra_data: Bytes,
}

impl BlockHeader {
    /// Get the parent_hash field of the header.
    pub fn parent_hash(&self) -> &H256 { &self.parent_hash }

    pub fn uncles_hash(&self) -> &H256 { &self.uncles_hash }

    /// Get the author field of the header.
    pub fn author(&self) -> &Address { &self.author }

    pub fn state_root(&self) -> &H256 { &self.state_root }

    /// Get the transactions root field of the header.
    pub fn transactions_root(&self) -> &H256 { &self.transactions_root }

    pub fn receipts_root(&self) -> &H256 { &self.receipts_root }

    pub fn log_bloom(&self) -> &Bloom { &self.log_bloom }

    /// Get the difficulty field of the header.
    pub fn difficulty(&self) -> &U256 { &self.difficulty }

    /// Get the block number.
    pub fn number(&self) -> BlockNumber { self.number }

    /// Get the gas limit field of the header.
    pub fn gas_limit(&self) -> u64 { self.gas_limit }

    pub fn gas_used(&self) -> u64 { self.gas_used }

    /// Get the timestamp field of the header.
    pub fn timestamp(&self) -> u64 { self.timestamp }

    pub fn extra_data(&self) -> &Bytes { &self.extra_data }

    /// Get the hash of the block.
    pub fn hash(&self) -> H256 { keccak(rlp::encode(self)) }
}

pub struct BlockHeaderBuilder {
    parent_hash: H256,
    uncles_hash: H256,
    author: Address,
    state_root: H256,
    transactions_root: H256,
    receipts_root: H256,
    log_bloom: Bloom,
    difficulty: U256,
    number: BlockNumber,
    gas_limit: u64,
    gas_used: u64,
    timestamp: u64,
    extra_data: Bytes,
}

impl BlockHeaderBuilder {
    pub fn new() -> Self {
        Self {
            parent_hash: H256::default(),
            uncles_hash: KECCAK_EMPTY_LIST_RLP,
            author: Address::default(),
            state_root: KECCAK_NULL_RLP,
            transactions_root: KECCAK_NULL_RLP,
            receipts_root: KECCAK_NULL_RLP,
            log_bloom: Bloom::default(),
            difficulty: U256::default(),
            number: 0,
            gas_limit: 0,
            gas_used: 0,
            timestamp: 0,
            extra_data: Bytes::new(),
        }
    }

    pub fn with_parent_hash(&mut self, parent_hash: H256) -> &mut Self {
        self.parent_hash = parent_hash;
        self
    }

    pub fn with_uncles_hash(&mut self, uncles_hash: H256) -> &mut Self {
        self.uncles_hash = uncles_hash;
        self
    }

    pub fn with_author(&mut self, author: Address) -> &mut Self {
        self.author = author;
        self
    }

    pub fn with_state_root(&mut self, state_root: H256) -> &mut Self {
        self.state_root = state_root;
        self
    }

    pub fn with_transactions_root(
        &mut self, transactions_root: H256,
    ) -> &mut Self {
        self.transactions_root = transactions_root;
        self
    }

    pub fn with_receipts_root(&mut self, receipts_root: H256) -> &mut Self {
        self.receipts_root = receipts_root;
        self
    }

    pub fn with_log_bloom(&mut self, log_bloom: Bloom) -> &mut Self {
        self.log_bloom = log_bloom;
        self
    }

    pub fn with_difficulty(&mut self, difficulty: U256) -> &mut Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_number(&mut self, number: BlockNumber) -> &mut Self {
        self.number = number;
        self
    }

    pub fn with_gas_limit(&mut self, gas_limit: u64) -> &mut Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_gas_used(&mut self, gas_used: u64) -> &mut Self {
        self.gas_used = gas_used;
        self
    }

    pub fn with_timestamp(&mut self, timestamp: u64) -> &mut Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_extra_data(&mut self, extra_data: Bytes) -> &mut Self {
        self.extra_data = extra_data;
        self
    }

    pub fn build(&self) -> BlockHeader {
        BlockHeader {
            parent_hash: self.parent_hash,
            uncles_hash: self.uncles_hash,
            author: self.author,
            state_root: self.state_root,
            transactions_root: self.transactions_root,
            receipts_root: self.receipts_root,
            log_bloom: self.log_bloom,
            difficulty: self.difficulty,
            number: self.number,
            gas_limit: self.gas_limit,
            gas_used: self.gas_used,
            timestamp: self.timestamp,
            extra_data: self.extra_data.clone(),
        }
    }
}

impl Default for BlockHeaderBuilder {
    fn default() -> Self { Self::new() }
}
