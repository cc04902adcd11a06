// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

pub use ethereum_types::{
    Address, BigEndianHash, Bloom, BloomInput, H160, H256, U256, U512,
};

mod utils;
pub use utils::*;

pub mod contract_address;
pub use contract_address::contract_address;
