// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{spec::ChainSpec, state::StateOps};
use papyrus_types::U256;

/// Move the whole balance of every account in the DAO drain list to the
/// refund contract, creating the latter if needed.
pub fn apply_dao_hard_fork(spec: &ChainSpec, state: &mut dyn StateOps) {
    let refund = spec.dao_refund_contract;
    if !state.exists(&refund) {
        state.add_balance(&refund, &U256::zero());
    }
    let mut drained = U256::zero();
    for address in &spec.dao_drain_list {
        let balance = state.balance(address);
        state.add_balance(&refund, &balance);
        state.sub_balance(address, &balance);
        drained = drained.saturating_add(balance);
    }
    debug!(
        "applied DAO hard fork: refund_contract={:?} accounts={} drained={}",
        refund,
        spec.dao_drain_list.len(),
        drained
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::State;
    use papyrus_types::Address;

    #[test]
    fn test_drain_moves_balances() {
        let refund = Address::repeat_byte(0xfe);
        let drain = vec![
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
        ];
        let spec = ChainSpec {
            dao_refund_contract: refund,
            dao_drain_list: drain.clone(),
            ..Default::default()
        };
        let mut state = State::new();
        state.add_balance(&drain[0], &10.into());
        state.add_balance(&drain[1], &5.into());

        apply_dao_hard_fork(&spec, &mut state);

        assert_eq!(state.balance(&refund), 15.into());
        for address in &drain {
            assert_eq!(state.balance(address), U256::zero());
        }
    }

    #[test]
    fn test_refund_contract_is_created() {
        let refund = Address::repeat_byte(0xfe);
        let spec = ChainSpec {
            dao_refund_contract: refund,
            ..Default::default()
        };
        let mut state = State::new();
        apply_dao_hard_fork(&spec, &mut state);
        assert!(state.exists(&refund));
    }
}
