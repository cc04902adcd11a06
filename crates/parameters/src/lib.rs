// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

#[macro_use]
extern crate lazy_static;

pub mod internal_contract_addresses;

pub mod consensus {
    /// Block interval, in seconds, assumed by the staking schedule.
    pub const BLOCK_INTERVAL_SECONDS: u64 = 3;
}

pub mod staking {
    use super::consensus::BLOCK_INTERVAL_SECONDS;

    /// Number of blocks over which a staked account's gas allowance is
    /// amortized: three days of blocks.
    pub const BLOCKS_IN_A_MELTING_PERIOD: u64 =
        3 * 24 * 60 * 60 / BLOCK_INTERVAL_SECONDS;
}

/// Storage layout of the bios contract. These are protocol constants: they
/// fix where the host reads stake and signers, whatever contract source is
/// deployed at the bios address.
pub mod bios_layout {
    use hex_literal::hex;
    use papyrus_types::H256;

    /// Slot holding the bios address inside the versioner account.
    pub const VERSIONER_BIOS_SLOT: H256 = H256([0u8; 32]);

    /// Declaration index of `mapping(address => uint) stakes`.
    pub const STAKES_MAPPING_INDEX: u64 = 0;

    /// Declaration index of `address[] signers`; the slot holds the length.
    pub const SIGNERS_ARRAY_INDEX: u64 = 1;

    /// First element slot of `signers`, `keccak256(uint256(1))`.
    pub const SIGNERS_ARRAY_BASE: H256 = H256(hex!(
        "b10e2d527612073b26eecdfd717e6a320cf44b4afac2b0732d9fcbe2b7fa0cf6"
    ));

    /// Most signers read from `signers`; a longer length word is treated
    /// as corrupt and the read is truncated.
    pub const MAX_SIGNERS: u64 = 1024;
}

pub mod gas {
    /// Intrinsic gas of a message call.
    pub const TX_GAS: u64 = 21000;
    /// Intrinsic gas of a contract creation since Homestead.
    pub const TX_CREATE_GAS: u64 = 53000;
    /// Intrinsic gas per zero byte of payload.
    pub const TX_DATA_ZERO_GAS: u64 = 4;
    /// Intrinsic gas per non-zero byte of payload.
    pub const TX_DATA_NON_ZERO_GAS: u64 = 68;
}

#[cfg(test)]
mod tests {
    use super::{bios_layout::*, staking::BLOCKS_IN_A_MELTING_PERIOD};
    use keccak_hash::keccak;

    #[test]
    fn test_melting_period() {
        assert_eq!(BLOCKS_IN_A_MELTING_PERIOD, 86400);
    }

    #[test]
    fn test_signers_base_is_hash_of_array_index() {
        let mut index = [0u8; 32];
        index[31] = SIGNERS_ARRAY_INDEX as u8;
        assert_eq!(keccak(index), SIGNERS_ARRAY_BASE);
    }
}
