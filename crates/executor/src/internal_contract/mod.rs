// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

pub mod storage_layout;
mod system_contracts;

pub use system_contracts::SystemContracts;
