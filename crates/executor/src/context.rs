// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    machine::ChainContext,
    signer::{SignerError, TxSigner},
};
use papyrus_types::{Address, H256, U256};
use primitives::{
    Action, BlockHeader, BlockNumber, Bytes, TransactionWithSignature,
};

/// Number of ancestors whose hashes are visible to executing code.
pub const BLOCK_HASH_WINDOW: u64 = 256;

/// Options handed through to the execution engine untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmConfig {
    /// Ask the engine for execution traces.
    pub debug: bool,
    pub enable_preimage_recording: bool,
}

/// A transaction as the execution engine sees it: sender recovered,
/// signature dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: Address,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub nonce: U256,
    pub value: U256,
    pub gas: u64,
    pub gas_price: U256,
    pub data: Bytes,
    pub check_nonce: bool,
    /// The sender is exempt from the fee market for this transaction.
    pub unmetered: bool,
}

impl Message {
    pub fn from_transaction(
        tx: &TransactionWithSignature, signer: &TxSigner, unmetered: bool,
    ) -> Result<Self, SignerError> {
        Ok(Message {
            from: signer.sender(tx)?,
            to: match tx.action {
                Action::Create => None,
                Action::Call(to) => Some(to),
            },
            nonce: tx.nonce,
            value: tx.value,
            gas: tx.gas,
            gas_price: tx.gas_price,
            data: tx.data.clone(),
            check_nonce: true,
            unmetered,
        })
    }

    pub fn is_create(&self) -> bool { self.to.is_none() }
}

/// Block environment of one message execution.
pub struct Env<'a> {
    pub origin: Address,
    pub gas_price: U256,
    /// Beneficiary of the block's fees.
    pub author: Address,
    pub number: BlockNumber,
    pub timestamp: u64,
    pub difficulty: U256,
    pub gas_limit: u64,
    pub parent_hash: H256,
    chain: &'a dyn ChainContext,
}

impl<'a> Env<'a> {
    /// Without an explicit `author` the header's author is credited.
    pub fn new(
        message: &Message, header: &BlockHeader, chain: &'a dyn ChainContext,
        author: Option<Address>,
    ) -> Self {
        Env {
            origin: message.from,
            gas_price: message.gas_price,
            author: author.unwrap_or(*header.author()),
            number: header.number(),
            timestamp: header.timestamp(),
            difficulty: *header.difficulty(),
            gas_limit: header.gas_limit(),
            parent_hash: *header.parent_hash(),
            chain,
        }
    }

    /// Hash of ancestor `number`, walking back from the parent. Zero outside
    /// the last `BLOCK_HASH_WINDOW` blocks or when the chain lacks a header.
    pub fn block_hash(&self, number: BlockNumber) -> H256 {
        if number >= self.number || self.number - number > BLOCK_HASH_WINDOW {
            return H256::zero();
        }
        let mut hash = self.parent_hash;
        let mut current = self.number - 1;
        while current > number {
            match self.chain.header(&hash, current) {
                Some(header) => hash = *header.parent_hash(),
                None => return H256::zero(),
            }
            current -= 1;
        }
        hash
    }
}
