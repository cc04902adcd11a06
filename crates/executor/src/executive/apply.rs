// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    context::{Env, Message, VmConfig},
    error::{Error, Result},
    gas_pool::GasPool,
    machine::{ChainContext, ExecutionEngine},
    signer::TxSigner,
    spec::ChainSpec,
    state::StateOps,
};
use papyrus_types::{contract_address, Address};
use primitives::{BlockHeader, Receipt, TransactionWithSignature};

/// Everything a transaction needs besides the state and the gas pool.
pub struct ApplyContext<'a> {
    pub spec: &'a ChainSpec,
    pub chain: &'a dyn ChainContext,
    pub engine: &'a dyn ExecutionEngine,
    pub header: &'a BlockHeader,
    /// Fee beneficiary; the header author when `None`.
    pub author: Option<Address>,
    pub vm_config: &'a VmConfig,
}

/// Apply `tx` to `state` and build its receipt. `used_gas` is the gas used
/// by the block so far and is advanced by this transaction.
pub fn apply_transaction(
    context: &ApplyContext, gas_pool: &mut GasPool, state: &mut dyn StateOps,
    tx: &TransactionWithSignature, unmetered: bool, used_gas: &mut u64,
) -> Result<Receipt> {
    let hash = tx.hash();
    let number = context.header.number();
    let signer = TxSigner::for_block(context.spec, number);
    let message = Message::from_transaction(tx, &signer, unmetered)
        .map_err(|source| Error::Validation { hash, source })?;

    let env = Env::new(&message, context.header, context.chain, context.author);
    let result = context
        .engine
        .apply_message(
            &env,
            context.spec,
            context.vm_config,
            state,
            &message,
            gas_pool,
        )
        .map_err(|source| Error::Execution { hash, source })?;

    let state_root = if context.spec.is_byzantium(number) {
        state.finalize(true);
        None
    } else {
        Some(state.intermediate_root(context.spec.is_eip158(number)))
    };
    *used_gas += result.gas_used;

    let mut receipt = Receipt::new(state_root, result.failed, *used_gas);
    receipt.transaction_hash = hash;
    receipt.gas_used = result.gas_used;
    if message.is_create() {
        receipt.contract_address =
            Some(contract_address(&message.from, &tx.nonce));
    }
    receipt.set_logs(state.logs(&hash));

    trace!(
        "applied tx {:?}: unmetered={} gas_used={} failed={}",
        hash,
        unmetered,
        result.gas_used,
        result.failed
    );
    Ok(receipt)
}
