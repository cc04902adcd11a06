// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::spec::ChainSpec;
use hex_literal::hex;
use keccak_hash::keccak;
use papyrus_types::{Address, H256, U256};
use primitives::{
    transaction::{EIP155_V_OFFSET, LEGACY_V_OFFSET},
    BlockNumber, Transaction, TransactionWithSignature,
};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, PublicKey, SecretKey, SECP256K1,
};
use thiserror::Error;

lazy_static! {
    /// Order of the secp256k1 curve group.
    static ref SECP256K1_N: U256 = U256::from_big_endian(&hex!(
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
    ));
    static ref SECP256K1_HALF_N: U256 = *SECP256K1_N >> 1;
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("invalid transaction v, r, s values")]
    InvalidSignature,

    #[error("invalid chain id for signer: expected {expected}, got {got:?}")]
    InvalidChainId { expected: u64, got: Option<u64> },

    #[error("secp256k1 error: {0}")]
    Secp(#[from] secp256k1::Error),
}

/// Signature scheme in force at a given block height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxSigner {
    Frontier,
    /// Frontier plus the lower-half `s` rule.
    Homestead,
    /// Replay protection: the chain id is part of the signing hash and of
    /// `v`. Unprotected transactions are still accepted under Homestead
    /// rules.
    Eip155 { chain_id: u64 },
}

impl TxSigner {
    pub fn for_block(spec: &ChainSpec, number: BlockNumber) -> Self {
        if spec.is_eip155(number) {
            TxSigner::Eip155 {
                chain_id: spec.chain_id,
            }
        } else if spec.is_homestead(number) {
            TxSigner::Homestead
        } else {
            TxSigner::Frontier
        }
    }

    pub fn signature_hash(&self, tx: &Transaction) -> H256 {
        match self {
            TxSigner::Eip155 { chain_id } => tx.signature_hash(Some(*chain_id)),
            _ => tx.signature_hash(None),
        }
    }

    /// Recover the address that signed `tx`.
    pub fn sender(
        &self, tx: &TransactionWithSignature,
    ) -> Result<Address, SignerError> {
        match *self {
            TxSigner::Eip155 { chain_id } => {
                if !tx.is_protected() {
                    return TxSigner::Homestead.sender(tx);
                }
                if tx.chain_id() != Some(chain_id) {
                    return Err(SignerError::InvalidChainId {
                        expected: chain_id,
                        got: tx.chain_id(),
                    });
                }
                let recovery_id = tx.v - EIP155_V_OFFSET - chain_id * 2;
                recover(
                    &self.signature_hash(tx),
                    &tx.r,
                    &tx.s,
                    recovery_id,
                    true,
                )
            }
            TxSigner::Homestead | TxSigner::Frontier => {
                let recovery_id = tx
                    .v
                    .checked_sub(LEGACY_V_OFFSET)
                    .ok_or(SignerError::InvalidSignature)?;
                recover(
                    &self.signature_hash(tx),
                    &tx.r,
                    &tx.s,
                    recovery_id,
                    *self == TxSigner::Homestead,
                )
            }
        }
    }

    /// Sign `tx` under this scheme. The produced `s` is always in the lower
    /// half of the curve order.
    pub fn sign(
        &self, tx: Transaction, secret: &SecretKey,
    ) -> Result<TransactionWithSignature, SignerError> {
        let hash = self.signature_hash(&tx);
        let message = Message::from_slice(hash.as_bytes())?;
        let signature = SECP256K1.sign_ecdsa_recoverable(&message, secret);
        let (recovery_id, compact) = signature.serialize_compact();
        let recovery_id = recovery_id.to_i32() as u64;
        let v = match self {
            TxSigner::Eip155 { chain_id } => {
                EIP155_V_OFFSET + chain_id * 2 + recovery_id
            }
            _ => LEGACY_V_OFFSET + recovery_id,
        };
        Ok(tx.with_signature(
            v,
            U256::from_big_endian(&compact[..32]),
            U256::from_big_endian(&compact[32..]),
        ))
    }
}

fn is_valid_signature_values(
    r: &U256, s: &U256, recovery_id: u64, homestead: bool,
) -> bool {
    if recovery_id > 1 || r.is_zero() || s.is_zero() {
        return false;
    }
    if homestead && *s > *SECP256K1_HALF_N {
        return false;
    }
    *r < *SECP256K1_N && *s < *SECP256K1_N
}

fn recover(
    hash: &H256, r: &U256, s: &U256, recovery_id: u64, homestead: bool,
) -> Result<Address, SignerError> {
    if !is_valid_signature_values(r, s, recovery_id, homestead) {
        return Err(SignerError::InvalidSignature);
    }
    let mut compact = [0u8; 64];
    r.to_big_endian(&mut compact[..32]);
    s.to_big_endian(&mut compact[32..]);
    let signature = RecoverableSignature::from_compact(
        &compact,
        RecoveryId::from_i32(recovery_id as i32)?,
    )?;
    let message = Message::from_slice(hash.as_bytes())?;
    let public = SECP256K1.recover_ecdsa(&message, &signature)?;
    Ok(public_to_address(&public))
}

pub fn public_to_address(public: &PublicKey) -> Address {
    let serialized = public.serialize_uncompressed();
    Address::from_slice(&keccak(&serialized[1..])[12..])
}

pub fn secret_to_address(secret: &SecretKey) -> Address {
    public_to_address(&PublicKey::from_secret_key(SECP256K1, secret))
}
