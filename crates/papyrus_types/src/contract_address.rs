// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{Address, U256};
use keccak_hash::keccak;
use rlp::RlpStream;

/// Address of a contract created by `sender` with transaction nonce `nonce`:
/// the last 20 bytes of `keccak(rlp([sender, nonce]))`.
pub fn contract_address(sender: &Address, nonce: &U256) -> Address {
    let mut rlp = RlpStream::new_list(2);
    rlp.append(sender);
    rlp.append(nonce);
    Address::from(keccak(rlp.as_raw()))
}
