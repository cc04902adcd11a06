// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::hash::{KECCAK_EMPTY, KECCAK_NULL_RLP};
use papyrus_types::{H256, U256};
use rlp_derive::{RlpDecodable, RlpEncodable};

/// Committed form of an account, as it enters the state root.
#[derive(Clone, Debug, PartialEq, Eq, RlpDecodable, RlpEncodable)]
pub struct Account {
    pub nonce: U256,
    pub balance: U256,
    /// Commitment over the non-zero storage entries of the account.
    pub storage_root: H256,
    pub code_hash: H256,
    /// Stake-derived gas allowance cached in the account. Zero means the
    /// allowance has not been derived yet.
    pub gas_allowance: u64,
}

impl Default for Account {
    fn default() -> Self {
        Account {
            nonce: U256::zero(),
            balance: U256::zero(),
            storage_root: KECCAK_NULL_RLP,
            code_hash: KECCAK_EMPTY,
            gas_allowance: 0,
        }
    }
}
