// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use ethereum_types::{Address, H256};

/// Interprets the low-order 20 bytes of a storage word as an address.
pub fn h256_to_address(value: &H256) -> Address { Address::from(*value) }

pub fn address_to_h256(address: &Address) -> H256 { H256::from(*address) }
