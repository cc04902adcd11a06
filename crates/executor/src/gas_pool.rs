// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::error::ExecutionError;
use std::fmt;

/// Gas still available to the transactions of the block being processed.
///
/// A pool belongs to exactly one `process` call. It starts at the block gas
/// limit and only receives back gas that a transaction bought but did not
/// use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPool(u64);

impl GasPool {
    pub fn new(gas_limit: u64) -> Self { GasPool(gas_limit) }

    /// Return unused gas to the pool.
    pub fn add_gas(&mut self, amount: u64) -> Result<(), ExecutionError> {
        self.0 = self.0.checked_add(amount).ok_or(
            ExecutionError::GasPoolOverflow {
                available: self.0,
                added: amount,
            },
        )?;
        Ok(())
    }

    /// Take `amount` out of the pool, or fail without touching it.
    pub fn sub_gas(&mut self, amount: u64) -> Result<(), ExecutionError> {
        if self.0 < amount {
            return Err(ExecutionError::GasLimitReached {
                available: self.0,
                required: amount,
            });
        }
        self.0 -= amount;
        Ok(())
    }

    pub fn gas(&self) -> u64 { self.0 }
}

impl fmt::Display for GasPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
