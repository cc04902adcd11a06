// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    internal_contract::SystemContracts, signer::TxSigner, spec::ChainSpec,
    state::StateOps,
};
use primitives::{BlockHeader, TransactionWithSignature};

/// Decides which transactions bypass the fee market.
pub struct TransactionGate<'a> {
    spec: &'a ChainSpec,
    system_contracts: &'a SystemContracts,
}

impl<'a> TransactionGate<'a> {
    pub fn new(
        spec: &'a ChainSpec, system_contracts: &'a SystemContracts,
    ) -> Self {
        TransactionGate {
            spec,
            system_contracts,
        }
    }

    /// A transaction is exempt while the bios contract is not deployed, when
    /// it calls the bios contract, or when its sender has a non-zero gas
    /// allowance. The state is only read.
    pub fn is_exempt<S: StateOps + ?Sized>(
        &self, tx: &TransactionWithSignature, state: &S, header: &BlockHeader,
    ) -> bool {
        let bios = self.system_contracts.bios_address(state);
        if bios.is_zero() {
            return true;
        }
        if tx.action.to() == Some(&bios) {
            return true;
        }

        let signer = TxSigner::for_block(self.spec, header.number());
        let sender = match signer.sender(tx) {
            Ok(sender) => sender,
            Err(e) => {
                trace!("sender of tx {:?} not recoverable: {}", tx.hash(), e);
                return false;
            }
        };
        let limit =
            self.system_contracts
                .peek_limit(&sender, state, header.gas_limit());
        trace!(
            "gas allowance of {:?} for tx {:?}: {}",
            sender,
            tx.hash(),
            limit
        );
        limit != 0
    }
}
