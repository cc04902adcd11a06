// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Solidity storage layout rules, used to read contract state straight from
//! storage. Slot indices are declaration positions of state variables.

use keccak_hash::keccak;
use papyrus_types::{address_to_h256, Address, BigEndianHash, H256, U256};

/// Slot of a value-type state variable declared at `index`.
pub fn value_slot(index: U256) -> H256 { H256::from_uint(&index) }

/// Slot of `m[key]` for a mapping `m` declared at `index`:
/// `keccak256(key ‖ index)`, both as 32-byte words.
pub fn mapping_slot(index: U256, key: &H256) -> H256 {
    let mut input = [0u8; 64];
    input[..32].copy_from_slice(key.as_bytes());
    index.to_big_endian(&mut input[32..]);
    keccak(input)
}

/// `mapping_slot` for mappings keyed by `address`, which Solidity
/// left-pads to a word.
pub fn address_mapping_slot(index: U256, key: &Address) -> H256 {
    mapping_slot(index, &address_to_h256(key))
}

/// First element slot of a dynamic array declared at `index`; the slot
/// `index` itself holds the length.
pub fn dynamic_slot(index: U256) -> H256 {
    let mut input = [0u8; 32];
    index.to_big_endian(&mut input);
    keccak(input)
}

/// Slot of element `index` in an array whose elements start at `start`.
/// Wraps modulo 2^256 like Solidity does.
pub fn array_slot(start: &H256, index: U256, element_size: U256) -> H256 {
    let (offset, _) = index.overflowing_mul(element_size);
    let (slot, _) = start.into_uint().overflowing_add(offset);
    H256::from_uint(&slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use papyrus_parameters::bios_layout::SIGNERS_ARRAY_BASE;

    #[test]
    fn test_dynamic_slot() {
        assert_eq!(dynamic_slot(1.into()), SIGNERS_ARRAY_BASE);
        assert_eq!(dynamic_slot(U256::zero()), keccak([0u8; 32]));
        assert_eq!(
            dynamic_slot(U256::zero()),
            H256(hex!(
                "290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
            ))
        );
    }

    #[test]
    fn test_address_mapping_slot() {
        let address = Address::repeat_byte(0xab);
        let mut preimage = [0u8; 64];
        preimage[12..32].copy_from_slice(address.as_bytes());
        assert_eq!(
            address_mapping_slot(U256::zero(), &address),
            keccak(preimage)
        );
        preimage[63] = 3;
        assert_eq!(address_mapping_slot(3.into(), &address), keccak(preimage));
    }

    #[test]
    fn test_array_slot_wraps() {
        let start = H256::repeat_byte(0xff);
        assert_eq!(array_slot(&start, 1.into(), 1.into()), H256::zero());
        assert_eq!(
            array_slot(&start, 3.into(), 2.into()),
            H256::from_low_u64_be(5)
        );
        let base = SIGNERS_ARRAY_BASE;
        assert_eq!(array_slot(&base, U256::zero(), 1.into()), base);
    }

    #[test]
    fn test_value_slot() {
        assert_eq!(value_slot(U256::zero()), H256::zero());
        assert_eq!(value_slot(1.into()), H256::from_low_u64_be(1));
    }
}
