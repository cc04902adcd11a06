// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{hash::keccak, Bytes};
use papyrus_types::{Address, H256, U256};
use rlp::{self, Decodable, DecoderError, Encodable, Rlp, RlpStream};
use std::ops::Deref;

/// `v` offset of replay-protected signatures: `v = chain_id * 2 + 35 + {0,1}`.
pub const EIP155_V_OFFSET: u64 = 35;
/// `v` offset of legacy signatures: `v = 27 + {0,1}`.
pub const LEGACY_V_OFFSET: u64 = 27;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create creates new contract.
    Create,
    /// Calls contract at given address.
    /// In the case of a transfer, this is the receiver's address.'
    Call(Address),
}

impl Default for Action {
    fn default() -> Action { Action::Create }
}

impl Action {
    pub fn to(&self) -> Option<&Address> {
        match self {
            Action::Create => None,
            Action::Call(address) => Some(address),
        }
    }
}

impl Decodable for Action {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.is_empty() {
            Ok(Action::Create)
        } else {
            Ok(Action::Call(rlp.as_val()?))
        }
    }
}

impl Encodable for Action {
    fn rlp_append(&self, stream: &mut RlpStream) {
        match *self {
            Action::Create => stream.append_internal(&""),
            Action::Call(ref address) => stream.append_internal(address),
        };
    }
}

/// An unsigned transaction.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Nonce.
    pub nonce: U256,
    /// Gas price.
    pub gas_price: U256,
    /// Gas paid up front for transaction execution.
    pub gas: u64,
    /// Action, can be either call or contract create.
    pub action: Action,
    /// Transferred value.
    pub value: U256,
    /// Transaction data.
    pub data: Bytes,
}

impl Transaction {
    /// Place the six unsigned fields, and the EIP-155 replay protection
    /// triple when `chain_id` is given, into `s`.
    fn rlp_append_unsigned(&self, s: &mut RlpStream, chain_id: Option<u64>) {
        s.begin_list(if chain_id.is_some() { 9 } else { 6 });
        s.append(&self.nonce);
        s.append(&self.gas_price);
        s.append(&self.gas);
        s.append(&self.action);
        s.append(&self.value);
        s.append(&self.data);
        if let Some(chain_id) = chain_id {
            s.append(&chain_id);
            s.append(&0u8);
            s.append(&0u8);
        }
    }

    /// The hash that is signed by the sender.
    pub fn signature_hash(&self, chain_id: Option<u64>) -> H256 {
        let mut s = RlpStream::new();
        self.rlp_append_unsigned(&mut s, chain_id);
        keccak(s.as_raw())
    }

    /// Attach a signature, producing the transaction as it appears in a
    /// block.
    pub fn with_signature(
        self, v: u64, r: U256, s: U256,
    ) -> TransactionWithSignature {
        let mut tx = TransactionWithSignature {
            unsigned: self,
            v,
            r,
            s,
            hash: H256::zero(),
        };
        tx.hash = keccak(rlp::encode(&tx));
        tx
    }
}

/// Signed transaction information without the recovered sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionWithSignature {
    /// Plain Transaction.
    pub unsigned: Transaction,
    /// The V field of the signature; carries the recovery id and, for
    /// replay-protected transactions, the chain id.
    pub v: u64,
    /// The R field of the signature; helps describe the point on the curve.
    pub r: U256,
    /// The S field of the signature; helps describe the point on the curve.
    pub s: U256,
    /// Hash of the transaction
    hash: H256,
}

impl Deref for TransactionWithSignature {
    type Target = Transaction;

    fn deref(&self) -> &Self::Target { &self.unsigned }
}

impl TransactionWithSignature {
    /// Get the hash of this transaction (keccak of the RLP).
    pub fn hash(&self) -> H256 { self.hash }

    /// Whether the signature carries EIP-155 replay protection.
    pub fn is_protected(&self) -> bool {
        self.v != LEGACY_V_OFFSET && self.v != LEGACY_V_OFFSET + 1
    }

    /// The chain id encoded in `v`, if the signature is replay-protected.
    pub fn chain_id(&self) -> Option<u64> {
        if self.is_protected() && self.v >= EIP155_V_OFFSET {
            Some((self.v - EIP155_V_OFFSET) / 2)
        } else {
            None
        }
    }
}

impl Encodable for TransactionWithSignature {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(9);
        s.append(&self.nonce);
        s.append(&self.gas_price);
        s.append(&self.gas);
        s.append(&self.action);
        s.append(&self.value);
        s.append(&self.data);
        s.append(&self.v);
        s.append(&self.r);
        s.append(&self.s);
    }
}

impl Decodable for TransactionWithSignature {
    fn decode(d: &Rlp) -> Result<Self, DecoderError> {
        if d.item_count()? != 9 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        let hash = keccak(d.as_raw());
        Ok(TransactionWithSignature {
            unsigned: Transaction {
                nonce: d.val_at(0)?,
                gas_price: d.val_at(1)?,
                gas: d.val_at(2)?,
                action: d.val_at(3)?,
                value: d.val_at(4)?,
                data: d.val_at(5)?,
            },
            v: d.val_at(6)?,
            r: d.val_at(7)?,
            s: d.val_at(8)?,
            hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer() -> Transaction {
        Transaction {
            nonce: 9.into(),
            gas_price: 20_000_000_000u64.into(),
            gas: 21000,
            action: Action::Call(Address::from_low_u64_be(0x3535)),
            value: 1_000_000_000_000_000_000u64.into(),
            data: vec![],
        }
    }

    #[test]
    fn test_eip155_signing_hash() {
        // Example from the EIP-155 specification.
        let tx = Transaction {
            action: Action::Call(
                "3535353535353535353535353535353535353535".parse().unwrap(),
            ),
            ..transfer()
        };
        assert_eq!(
            tx.signature_hash(Some(1)),
            "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
                .parse()
                .unwrap()
        );
    }

    #[test]
    fn test_signed_transaction_decodes_to_same_hash() {
        let signed = transfer().with_signature(37, 1.into(), 2.into());
        let encoded = rlp::encode(&signed);
        let decoded: TransactionWithSignature = rlp::decode(&encoded).unwrap();
        assert_eq!(decoded, signed);
        assert_eq!(decoded.hash(), keccak(&encoded));
        assert_eq!(decoded.chain_id(), Some(1));
        assert!(decoded.is_protected());
    }

    #[test]
    fn test_create_action_encodes_empty_recipient() {
        let tx = Transaction {
            action: Action::Create,
            ..transfer()
        };
        assert_eq!(tx.action.to(), None);
        let legacy = tx.with_signature(28, 1.into(), 2.into());
        assert!(!legacy.is_protected());
        assert_eq!(legacy.chain_id(), None);
        let decoded: TransactionWithSignature =
            rlp::decode(&rlp::encode(&legacy)).unwrap();
        assert_eq!(decoded.action, Action::Create);
    }
}
