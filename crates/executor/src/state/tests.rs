// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{State, StateOps, StorageRead};
use keccak_hash::{keccak, KECCAK_EMPTY, KECCAK_NULL_RLP};
use papyrus_types::{Address, H256, U256};
use primitives::LogEntry;

fn log(byte: u8) -> LogEntry {
    LogEntry {
        address: Address::repeat_byte(byte),
        topics: vec![H256::repeat_byte(byte)],
        data: vec![byte],
    }
}

#[test]
fn test_missing_account_reads_zero() {
    let state = State::new();
    let address = Address::repeat_byte(1);
    assert!(!state.exists(&address));
    assert_eq!(state.balance(&address), U256::zero());
    assert_eq!(state.nonce(&address), U256::zero());
    assert_eq!(state.gas_allowance(&address), 0);
    assert_eq!(state.storage_at(&address, &H256::repeat_byte(9)), H256::zero());
    assert!(state.code(&address).is_none());
    assert_eq!(state.root(), KECCAK_NULL_RLP);
}

#[test]
fn test_balance_and_nonce() {
    let mut state = State::new();
    let address = Address::repeat_byte(1);
    state.add_balance(&address, &100.into());
    state.sub_balance(&address, &30.into());
    state.inc_nonce(&address);
    state.inc_nonce(&address);
    assert_eq!(state.balance(&address), 70.into());
    assert_eq!(state.nonce(&address), 2.into());

    state.sub_balance(&address, &1000.into());
    assert_eq!(state.balance(&address), U256::zero());
}

#[test]
fn test_storage_zero_clears_key() {
    let mut state = State::new();
    let address = Address::repeat_byte(1);
    let key = H256::repeat_byte(2);
    state.set_storage(&address, key, H256::repeat_byte(3));
    assert_eq!(state.storage_at(&address, &key), H256::repeat_byte(3));
    let with_storage = state.account(&address).unwrap().storage_root;
    assert_ne!(with_storage, KECCAK_NULL_RLP);

    state.set_storage(&address, key, H256::zero());
    assert_eq!(state.storage_at(&address, &key), H256::zero());
    assert_eq!(state.account(&address).unwrap().storage_root, KECCAK_NULL_RLP);
}

#[test]
fn test_code_hash() {
    let mut state = State::new();
    let address = Address::repeat_byte(1);
    state.init_code(&address, vec![0x60, 0x00]);
    assert_eq!(state.code(&address).unwrap().as_slice(), &[0x60, 0x00]);
    assert_eq!(
        state.account(&address).unwrap().code_hash,
        keccak([0x60u8, 0x00])
    );
    state.init_code(&address, vec![]);
    assert_eq!(state.account(&address).unwrap().code_hash, KECCAK_EMPTY);
}

#[test]
fn test_checkpoint_revert() {
    let mut state = State::new();
    let a = Address::repeat_byte(1);
    let b = Address::repeat_byte(2);
    state.prepare(H256::repeat_byte(0xaa), H256::zero(), 0);
    state.add_balance(&a, &10.into());
    state.add_log(log(1));

    assert_eq!(state.checkpoint(), 0);
    state.add_balance(&b, &5.into());
    state.set_storage(&a, H256::repeat_byte(1), H256::repeat_byte(1));
    state.add_log(log(2));
    state.revert_to_checkpoint();

    assert!(!state.exists(&b));
    assert_eq!(state.storage_at(&a, &H256::repeat_byte(1)), H256::zero());
    assert_eq!(state.logs(&H256::repeat_byte(0xaa)), vec![log(1)]);
    assert_eq!(state.balance(&a), 10.into());
}

#[test]
fn test_nested_checkpoints() {
    let mut state = State::new();
    let a = Address::repeat_byte(1);
    state.checkpoint();
    state.add_balance(&a, &1.into());
    assert_eq!(state.checkpoint(), 1);
    state.add_balance(&a, &2.into());
    state.discard_checkpoint();
    assert_eq!(state.balance(&a), 3.into());
    state.revert_to_checkpoint();
    assert_eq!(state.balance(&a), U256::zero());

    // Without an open checkpoint revert does nothing.
    state.add_balance(&a, &4.into());
    state.revert_to_checkpoint();
    assert_eq!(state.balance(&a), 4.into());
}

#[test]
fn test_logs_are_kept_per_transaction() {
    let mut state = State::new();
    let first = H256::repeat_byte(1);
    let second = H256::repeat_byte(2);
    state.prepare(first, H256::repeat_byte(0xbb), 0);
    state.add_log(log(1));
    state.add_log(log(2));
    state.prepare(second, H256::repeat_byte(0xbb), 1);
    state.add_log(log(3));

    assert_eq!(state.logs(&first), vec![log(1), log(2)]);
    assert_eq!(state.logs(&second), vec![log(3)]);
    assert!(state.logs(&H256::repeat_byte(3)).is_empty());
}

#[test]
fn test_logs_are_dropped_on_next_block() {
    let mut state = State::new();
    let mut previous = None;
    for block in 1..=50u8 {
        let tx_hash = H256::repeat_byte(block);
        state.prepare(tx_hash, H256::from_low_u64_be(block as u64), 0);
        state.add_log(log(block));
        if let Some(previous) = previous {
            assert!(state.logs(&previous).is_empty());
        }
        assert_eq!(state.logs(&tx_hash), vec![log(block)]);
        previous = Some(tx_hash);
    }
    assert_eq!(state.clone().logged_transactions(), 1);
}

#[test]
fn test_checkpoint_records_only_written_accounts() {
    let mut state = State::new();
    for byte in 1..=100u8 {
        state.add_balance(&Address::repeat_byte(byte), &1.into());
    }
    let empty = Address::repeat_byte(0xe0);
    state.add_balance(&empty, &U256::zero());
    state.finalize(false);

    let sender = Address::repeat_byte(1);
    let fresh = Address::repeat_byte(0xf0);
    state.checkpoint();
    assert_eq!(state.checkpoint_entries(), 0);
    state.sub_balance(&sender, &1.into());
    state.add_balance(&sender, &5.into());
    state.add_balance(&fresh, &1.into());
    assert_eq!(state.checkpoint_entries(), 2);

    state.revert_to_checkpoint();
    assert_eq!(state.balance(&sender), 1.into());
    assert!(!state.exists(&fresh));
    assert_eq!(state.accounts_len(), 101);

    // A reverted write no longer marks the account as touched.
    state.sub_balance(&sender, &1.into());
    state.checkpoint();
    state.add_balance(&empty, &U256::zero());
    state.revert_to_checkpoint();
    state.finalize(true);
    assert!(!state.exists(&sender));
    assert!(state.exists(&empty));
}

#[test]
fn test_discard_keeps_outer_copy() {
    let mut state = State::new();
    let a = Address::repeat_byte(1);
    state.add_balance(&a, &1.into());
    state.checkpoint();
    state.checkpoint();
    state.add_balance(&a, &1.into());
    state.discard_checkpoint();
    state.checkpoint();
    state.add_balance(&a, &1.into());
    state.discard_checkpoint();
    assert_eq!(state.balance(&a), 3.into());
    assert_eq!(state.checkpoint_entries(), 1);

    state.revert_to_checkpoint();
    assert_eq!(state.balance(&a), 1.into());
}

#[test]
fn test_finalize_deletes_touched_empty_accounts() {
    let mut state = State::new();
    let empty = Address::repeat_byte(1);
    let funded = Address::repeat_byte(2);
    state.add_balance(&empty, &U256::zero());
    state.add_balance(&funded, &1.into());

    state.finalize(false);
    assert!(state.exists(&empty));

    // Not touched since the last finalize, so it survives.
    state.finalize(true);
    assert!(state.exists(&empty));

    state.add_balance(&empty, &U256::zero());
    state.finalize(true);
    assert!(!state.exists(&empty));
    assert!(state.exists(&funded));
}

#[test]
fn test_allowance_makes_account_non_empty() {
    let mut state = State::new();
    let address = Address::repeat_byte(1);
    state.set_gas_allowance(&address, 7);
    state.finalize(true);
    assert_eq!(state.gas_allowance(&address), 7);
    assert_eq!(state.account(&address).unwrap().gas_allowance, 7);
}

#[test]
fn test_root_tracks_content() {
    let mut state = State::new();
    let address = Address::repeat_byte(1);
    state.add_balance(&address, &1.into());
    let root = state.intermediate_root(true);
    assert_ne!(root, KECCAK_NULL_RLP);

    let copy = state.clone();
    assert_eq!(copy.root(), root);

    state.set_gas_allowance(&address, 1);
    assert_ne!(state.intermediate_root(true), root);
    assert_eq!(copy.root(), root);
}

#[test]
fn test_root_is_insertion_order_independent() {
    let a = Address::repeat_byte(1);
    let b = Address::repeat_byte(2);

    let mut first = State::new();
    first.add_balance(&a, &1.into());
    first.add_balance(&b, &2.into());

    let mut second = State::new();
    second.add_balance(&b, &2.into());
    second.add_balance(&a, &1.into());

    assert_eq!(first.root(), second.root());
    assert_eq!(first.accounts_len(), 2);
}
