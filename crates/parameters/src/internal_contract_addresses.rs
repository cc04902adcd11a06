// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use papyrus_types::Address;
use std::str::FromStr;

lazy_static! {
    /// The versioner account. Slot 0 of its storage locates the bios
    /// contract.
    pub static ref VERSIONER_CONTRACT_ADDRESS: Address =
        Address::from_str("0000000000000000000000000000000000000022").unwrap();
}
