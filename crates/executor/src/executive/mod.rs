// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

mod apply;
mod gate;
mod hard_fork;
mod processor;


pub use apply::{apply_transaction, ApplyContext};
pub use gate::TransactionGate;
pub use hard_fork::apply_dao_hard_fork;
pub use processor::{ProcessOutcome, StateProcessor};
