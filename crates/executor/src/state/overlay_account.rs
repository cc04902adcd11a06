// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use keccak_hash::{keccak, KECCAK_EMPTY, KECCAK_NULL_RLP};
use papyrus_types::{H256, U256};
use primitives::{Account, Bytes};
use rlp::RlpStream;
use std::{collections::BTreeMap, sync::Arc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct OverlayAccount {
    pub nonce: U256,
    pub balance: U256,
    pub code: Option<Arc<Bytes>>,
    /// Only non-zero words are kept.
    pub storage: BTreeMap<H256, H256>,
    pub gas_allowance: u64,
}

impl OverlayAccount {
    pub fn is_empty(&self) -> bool {
        self.nonce.is_zero()
            && self.balance.is_zero()
            && self.code.as_ref().map_or(true, |code| code.is_empty())
            && self.gas_allowance == 0
    }

    pub fn set_storage(&mut self, key: H256, value: H256) {
        if value.is_zero() {
            self.storage.remove(&key);
        } else {
            self.storage.insert(key, value);
        }
    }

    pub fn code_hash(&self) -> H256 {
        match &self.code {
            Some(code) if !code.is_empty() => keccak(code.as_slice()),
            _ => KECCAK_EMPTY,
        }
    }

    pub fn storage_root(&self) -> H256 {
        if self.storage.is_empty() {
            return KECCAK_NULL_RLP;
        }
        let mut stream = RlpStream::new_list(self.storage.len());
        for (key, value) in &self.storage {
            stream.begin_list(2).append(key).append(value);
        }
        keccak(stream.out())
    }

    pub fn as_account(&self) -> Account {
        Account {
            nonce: self.nonce,
            balance: self.balance,
            storage_root: self.storage_root(),
            code_hash: self.code_hash(),
            gas_allowance: self.gas_allowance,
        }
    }
}
