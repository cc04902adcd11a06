// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{BlockHeader, TransactionWithSignature};
use papyrus_types::H256;
use std::sync::Arc;

pub type BlockNumber = u64;

/// A block, encoded as it is on the block chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The header of this block.
    pub block_header: BlockHeader,
    /// The transactions in this block, in execution order.
    pub transactions: Vec<Arc<TransactionWithSignature>>,
    /// The uncle headers referenced by this block.
    pub uncles: Vec<BlockHeader>,
}

impl Block {
    pub fn new(
        block_header: BlockHeader,
        transactions: Vec<Arc<TransactionWithSignature>>,
        uncles: Vec<BlockHeader>,
    ) -> Self {
        Block {
            block_header,
            transactions,
            uncles,
        }
    }

    pub fn hash(&self) -> H256 { self.block_header.hash() }

    pub fn number(&self) -> BlockNumber { self.block_header.number() }

    pub fn gas_limit(&self) -> u64 { self.block_header.gas_limit() }
}
