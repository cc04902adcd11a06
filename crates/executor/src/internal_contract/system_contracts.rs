// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::storage_layout::{address_mapping_slot, array_slot, value_slot};
use crate::state::{StateOps, StorageRead};
use num::BigUint;
use papyrus_parameters::{
    bios_layout::{
        MAX_SIGNERS, SIGNERS_ARRAY_BASE, SIGNERS_ARRAY_INDEX,
        STAKES_MAPPING_INDEX, VERSIONER_BIOS_SLOT,
    },
    internal_contract_addresses::VERSIONER_CONTRACT_ADDRESS,
    staking::BLOCKS_IN_A_MELTING_PERIOD,
};
use papyrus_types::{h256_to_address, Address, BigEndianHash, U256};

/// Host-side view of the bios contract.
///
/// The bios address is found in slot 0 of the versioner account. Stakes and
/// signers are then read from the bios storage using the Solidity layout of
/// `mapping(address => uint) stakes` (slot 0) and `address[] signers`
/// (slot 1). The bios balance is the total stake. None of this runs contract
/// code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemContracts {
    versioner: Address,
    melting_period: u64,
}

impl Default for SystemContracts {
    fn default() -> Self {
        SystemContracts {
            versioner: *VERSIONER_CONTRACT_ADDRESS,
            melting_period: BLOCKS_IN_A_MELTING_PERIOD,
        }
    }
}

fn to_biguint(value: &U256) -> BigUint {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

impl SystemContracts {
    pub fn new(versioner: Address, melting_period: u64) -> Self {
        SystemContracts {
            versioner,
            melting_period,
        }
    }

    pub fn versioner(&self) -> &Address { &self.versioner }

    pub fn melting_period(&self) -> u64 { self.melting_period }

    /// Address of the bios contract. Zero while it is not deployed, which
    /// is the bootstrap phase of the chain.
    pub fn bios_address<S: StorageRead + ?Sized>(&self, state: &S) -> Address {
        h256_to_address(&state.storage_at(&self.versioner, &VERSIONER_BIOS_SLOT))
    }

    pub fn stake_of<S: StorageRead + ?Sized>(
        &self, account: &Address, bios: &Address, state: &S,
    ) -> U256 {
        let key = address_mapping_slot(STAKES_MAPPING_INDEX.into(), account);
        state.storage_at(bios, &key).into_uint()
    }

    /// The signer list in array order. Only the low 64 bits of the stored
    /// length are used.
    pub fn signers_of<S: StorageRead + ?Sized>(
        &self, bios: &Address, state: &S,
    ) -> Vec<Address> {
        if bios.is_zero() {
            return Vec::new();
        }
        let length = state
            .storage_at(bios, &value_slot(SIGNERS_ARRAY_INDEX.into()))
            .into_uint();
        if length > U256::from(MAX_SIGNERS) {
            warn!(
                "bios {:?} reports {} signers, reading the first {}",
                bios, length, MAX_SIGNERS
            );
        }
        (0..length.min(U256::from(MAX_SIGNERS)).as_u64())
            .map(|index| {
                let slot =
                    array_slot(&SIGNERS_ARRAY_BASE, index.into(), U256::one());
                h256_to_address(&state.storage_at(bios, &slot))
            })
            .collect()
    }

    pub fn signers<S: StorageRead + ?Sized>(&self, state: &S) -> Vec<Address> {
        self.signers_of(&self.bios_address(state), state)
    }

    /// Gas allowance of `account`, deriving it from the stake when nothing
    /// is cached yet. With `persist` a derived allowance is written back, so
    /// later calls return it unchanged even if the stake moves.
    pub fn fetch_limit<S: StateOps + ?Sized>(
        &self, account: &Address, state: &mut S, block_gas_limit: u64,
        persist: bool,
    ) -> u64 {
        let (limit, derived) =
            self.resolve_limit(account, &*state, block_gas_limit);
        if persist && derived {
            state.set_gas_allowance(account, limit);
        }
        limit
    }

    /// `fetch_limit` without persisting.
    pub fn peek_limit<S: StateOps + ?Sized>(
        &self, account: &Address, state: &S, block_gas_limit: u64,
    ) -> u64 {
        self.resolve_limit(account, state, block_gas_limit).0
    }

    fn resolve_limit<S: StateOps + ?Sized>(
        &self, account: &Address, state: &S, block_gas_limit: u64,
    ) -> (u64, bool) {
        let bios = self.bios_address(state);
        if bios.is_zero() {
            return (0, false);
        }
        let cached = state.gas_allowance(account);
        let total_stake = state.balance(&bios);
        if cached != 0 || total_stake.is_zero() {
            return (cached, false);
        }
        let stake = self.stake_of(account, &bios, state);
        let limit = self.derive_limit(&stake, &total_stake, block_gas_limit);
        debug!(
            "derive gas allowance: account={:?} stake={} total_stake={} \
             block_gas_limit={} limit={}",
            account, stake, total_stake, block_gas_limit, limit
        );
        (limit, true)
    }

    /// `stake * block_gas_limit * melting_period / total_stake`, truncated
    /// to its low 64 bits.
    fn derive_limit(
        &self, stake: &U256, total_stake: &U256, block_gas_limit: u64,
    ) -> u64 {
        let limit = to_biguint(stake)
            * BigUint::from(block_gas_limit)
            * BigUint::from(self.melting_period)
            / to_biguint(total_stake);
        limit.iter_u64_digits().next().unwrap_or(0)
    }
}
