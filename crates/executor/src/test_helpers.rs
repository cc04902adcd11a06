// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Fixtures shared by unit tests and by downstream crates' tests.

use crate::{
    internal_contract::{
        storage_layout::{address_mapping_slot, array_slot, value_slot},
        SystemContracts,
    },
    machine::{ChainContext, ConsensusEngine, ConsensusError},
    state::{State, StateOps},
};
use papyrus_parameters::bios_layout::{
    SIGNERS_ARRAY_BASE, SIGNERS_ARRAY_INDEX, STAKES_MAPPING_INDEX,
    VERSIONER_BIOS_SLOT,
};
use papyrus_types::{address_to_h256, Address, BigEndianHash, H256, U256};
use primitives::{
    BlockHeader, BlockHeaderBuilder, BlockNumber, Receipt,
    TransactionWithSignature,
};
use secp256k1::SecretKey;
use std::sync::Arc;

const STOP_CODE: [u8; 1] = [0x00];

/// A linear chain of headers numbered from zero.
pub struct MemoryChain {
    headers: Vec<BlockHeader>,
}

impl MemoryChain {
    pub fn with_length(length: u64) -> Self {
        let mut headers: Vec<BlockHeader> = Vec::new();
        for number in 0..length {
            let parent_hash =
                headers.last().map_or_else(H256::zero, BlockHeader::hash);
            headers.push(
                BlockHeaderBuilder::new()
                    .with_number(number)
                    .with_parent_hash(parent_hash)
                    .with_timestamp(number * 3)
                    .build(),
            );
        }
        MemoryChain { headers }
    }

    pub fn hash_of(&self, number: BlockNumber) -> H256 {
        self.headers[number as usize].hash()
    }

    /// Header of the block extending the chain.
    pub fn child_header(&self, author: Address, gas_limit: u64) -> BlockHeader {
        let number = self.headers.len() as u64;
        BlockHeaderBuilder::new()
            .with_number(number)
            .with_parent_hash(
                self.headers.last().map_or_else(H256::zero, BlockHeader::hash),
            )
            .with_author(author)
            .with_gas_limit(gas_limit)
            .with_timestamp(number * 3)
            .build()
    }
}

impl ChainContext for MemoryChain {
    fn header(&self, hash: &H256, number: BlockNumber) -> Option<BlockHeader> {
        self.headers
            .get(number as usize)
            .filter(|header| header.hash() == *hash)
            .cloned()
    }
}

/// Consensus engine without block rewards.
#[derive(Default)]
pub struct NoopConsensus;

impl ConsensusEngine for NoopConsensus {
    fn finalize(
        &self, _chain: &dyn ChainContext, _header: &BlockHeader,
        _state: &mut dyn StateOps,
        _transactions: &[Arc<TransactionWithSignature>],
        _uncles: &[BlockHeader], _receipts: &[Receipt],
    ) -> Result<(), ConsensusError> {
        Ok(())
    }
}

pub fn secret(byte: u8) -> SecretKey {
    // Any non-zero byte repeated is a valid scalar.
    SecretKey::from_slice(&[byte; 32]).expect("valid secret key")
}

/// Point the versioner at `bios` and give it `total_stake` as balance. Both
/// contracts get code so that touching them never deletes their storage.
pub fn deploy_bios(state: &mut State, bios: Address, total_stake: U256) {
    let versioner = *SystemContracts::default().versioner();
    state.init_code(&versioner, STOP_CODE.to_vec());
    state.set_storage(&versioner, VERSIONER_BIOS_SLOT, address_to_h256(&bios));
    state.init_code(&bios, STOP_CODE.to_vec());
    state.add_balance(&bios, &total_stake);
    state.finalize(false);
}

pub fn set_stake(
    state: &mut State, bios: &Address, account: &Address, stake: U256,
) {
    let key = address_mapping_slot(STAKES_MAPPING_INDEX.into(), account);
    state.set_storage(bios, key, H256::from_uint(&stake));
}

pub fn set_signers(state: &mut State, bios: &Address, signers: &[Address]) {
    state.set_storage(
        bios,
        value_slot(SIGNERS_ARRAY_INDEX.into()),
        H256::from_low_u64_be(signers.len() as u64),
    );
    for (index, signer) in signers.iter().enumerate() {
        let slot = array_slot(&SIGNERS_ARRAY_BASE, index.into(), U256::one());
        state.set_storage(bios, slot, address_to_h256(signer));
    }
}
