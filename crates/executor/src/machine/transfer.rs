// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{ExecutionEngine, MessageResult};
use crate::{
    context::{Env, Message, VmConfig},
    error::ExecutionError,
    gas_pool::GasPool,
    internal_contract::SystemContracts,
    spec::ChainSpec,
    state::StateOps,
};
use papyrus_parameters::gas::{
    TX_CREATE_GAS, TX_DATA_NON_ZERO_GAS, TX_DATA_ZERO_GAS, TX_GAS,
};
use papyrus_types::{contract_address, U256, U512};
use std::cmp::Ordering;

/// Gas charged before any execution: a base cost plus a per-byte cost of
/// the payload.
pub fn intrinsic_gas(
    data: &[u8], contract_creation: bool,
) -> Result<u64, ExecutionError> {
    let base = if contract_creation { TX_CREATE_GAS } else { TX_GAS };
    let non_zero = data.iter().filter(|byte| **byte != 0).count() as u64;
    let zero = data.len() as u64 - non_zero;
    non_zero
        .checked_mul(TX_DATA_NON_ZERO_GAS)
        .and_then(|gas| gas.checked_add(base))
        .and_then(|gas| {
            zero.checked_mul(TX_DATA_ZERO_GAS)
                .and_then(|zero_gas| gas.checked_add(zero_gas))
        })
        .ok_or(ExecutionError::GasUintOverflow)
}

#[derive(Debug, PartialEq, Eq)]
enum ExecutionFailure {
    InsufficientBalance,
    AddressCollision,
}

/// Execution engine for chains without contract code execution: messages
/// move value or deploy their payload as code.
///
/// It applies the full fee market. A metered sender pays `gas * gas_price`
/// upfront, gets the unused part back and the author earns the rest. An
/// unmetered sender pays nothing and has its stake-derived allowance
/// written to its account instead. Both draw from the block gas pool.
#[derive(Debug, Clone, Default)]
pub struct TransferEngine {
    system_contracts: SystemContracts,
}

impl TransferEngine {
    pub fn new(system_contracts: SystemContracts) -> Self {
        TransferEngine { system_contracts }
    }

    fn check_nonce(
        &self, state: &dyn StateOps, message: &Message,
    ) -> Result<(), ExecutionError> {
        let expected = state.nonce(&message.from);
        match message.nonce.cmp(&expected) {
            Ordering::Less => Err(ExecutionError::NonceTooLow {
                expected,
                got: message.nonce,
            }),
            Ordering::Greater => Err(ExecutionError::NonceTooHigh {
                expected,
                got: message.nonce,
            }),
            Ordering::Equal => Ok(()),
        }
    }

    fn buy_gas(
        &self, state: &mut dyn StateOps, message: &Message,
        gas_pool: &mut GasPool,
    ) -> Result<(), ExecutionError> {
        let cost = message.gas_price.full_mul(U256::from(message.gas));
        let balance = state.balance(&message.from);
        if !message.unmetered && U512::from(balance) < cost {
            return Err(ExecutionError::InsufficientFundsForGas {
                balance,
                required: cost,
            });
        }
        gas_pool.sub_gas(message.gas)?;
        if !message.unmetered {
            // Fits: bounded by the balance checked above.
            let cost = message.gas_price * U256::from(message.gas);
            state.sub_balance(&message.from, &cost);
        }
        Ok(())
    }

    fn execute(
        &self, env: &Env, spec: &ChainSpec, state: &mut dyn StateOps,
        message: &Message,
    ) -> Result<(), ExecutionFailure> {
        state.inc_nonce(&message.from);
        state.checkpoint();
        if state.balance(&message.from) < message.value {
            state.revert_to_checkpoint();
            return Err(ExecutionFailure::InsufficientBalance);
        }
        state.sub_balance(&message.from, &message.value);
        match message.to {
            Some(to) => state.add_balance(&to, &message.value),
            None => {
                let address = contract_address(&message.from, &message.nonce);
                let occupied = !state.nonce(&address).is_zero()
                    || state.code(&address).map_or(false, |c| !c.is_empty());
                if occupied {
                    state.revert_to_checkpoint();
                    return Err(ExecutionFailure::AddressCollision);
                }
                if spec.is_eip158(env.number) {
                    state.inc_nonce(&address);
                }
                state.add_balance(&address, &message.value);
                state.init_code(&address, message.data.clone());
            }
        }
        state.discard_checkpoint();
        Ok(())
    }
}

impl ExecutionEngine for TransferEngine {
    fn apply_message(
        &self, env: &Env, spec: &ChainSpec, _vm_config: &VmConfig,
        state: &mut dyn StateOps, message: &Message, gas_pool: &mut GasPool,
    ) -> Result<MessageResult, ExecutionError> {
        if message.check_nonce {
            self.check_nonce(&*state, message)?;
        }
        self.buy_gas(state, message, gas_pool)?;

        let homestead = spec.is_homestead(env.number);
        let intrinsic =
            intrinsic_gas(&message.data, message.is_create() && homestead)?;
        if message.gas < intrinsic {
            return Err(ExecutionError::IntrinsicGas {
                required: intrinsic,
                got: message.gas,
            });
        }

        let mut gas_left = message.gas - intrinsic;
        let failed = match self.execute(env, spec, state, message) {
            Ok(()) => false,
            Err(failure) => {
                trace!(
                    "message from {:?} failed: {:?}",
                    message.from,
                    failure
                );
                if failure == ExecutionFailure::AddressCollision {
                    gas_left = 0;
                }
                true
            }
        };

        gas_pool.add_gas(gas_left)?;
        let gas_used = message.gas - gas_left;
        if message.unmetered {
            self.system_contracts.fetch_limit(
                &message.from,
                state,
                env.gas_limit,
                true,
            );
        } else {
            let refund = message.gas_price * U256::from(gas_left);
            state.add_balance(&message.from, &refund);
            let fee = message.gas_price * U256::from(gas_used);
            state.add_balance(&env.author, &fee);
        }

        Ok(MessageResult {
            return_data: Vec::new(),
            gas_used,
            failed,
        })
    }
}
