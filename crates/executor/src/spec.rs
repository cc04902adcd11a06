// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use papyrus_types::Address;
use primitives::BlockNumber;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read chain spec: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid chain spec: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Chain configuration: the chain id and the block numbers at which each
/// protocol upgrade activates. A fork set to `None` never activates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSpec {
    pub chain_id: u64,
    pub homestead_block: Option<BlockNumber>,
    pub eip155_block: Option<BlockNumber>,
    pub eip158_block: Option<BlockNumber>,
    pub byzantium_block: Option<BlockNumber>,
    pub dao_fork_block: Option<BlockNumber>,
    /// Whether this node follows the DAO hard fork at `dao_fork_block`.
    pub dao_fork_support: bool,
    pub dao_refund_contract: Address,
    /// Accounts whose whole balance moves to `dao_refund_contract` at the
    /// DAO fork block.
    pub dao_drain_list: Vec<Address>,
}

impl Default for ChainSpec {
    fn default() -> Self {
        ChainSpec {
            chain_id: 1,
            homestead_block: None,
            eip155_block: None,
            eip158_block: None,
            byzantium_block: None,
            dao_fork_block: None,
            dao_fork_support: false,
            dao_refund_contract: Address::zero(),
            dao_drain_list: Vec::new(),
        }
    }
}

fn is_forked(fork: Option<BlockNumber>, number: BlockNumber) -> bool {
    fork.map_or(false, |fork| fork <= number)
}

impl ChainSpec {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn is_homestead(&self, number: BlockNumber) -> bool {
        is_forked(self.homestead_block, number)
    }

    pub fn is_eip155(&self, number: BlockNumber) -> bool {
        is_forked(self.eip155_block, number)
    }

    pub fn is_eip158(&self, number: BlockNumber) -> bool {
        is_forked(self.eip158_block, number)
    }

    pub fn is_byzantium(&self, number: BlockNumber) -> bool {
        is_forked(self.byzantium_block, number)
    }

    /// True only for the single block at which the DAO mutation applies.
    pub fn is_dao_fork_block(&self, number: BlockNumber) -> bool {
        self.dao_fork_support && self.dao_fork_block == Some(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_fork_predicates() {
        let spec = ChainSpec {
            homestead_block: Some(10),
            byzantium_block: Some(0),
            ..Default::default()
        };
        assert!(!spec.is_homestead(9));
        assert!(spec.is_homestead(10));
        assert!(spec.is_homestead(11));
        assert!(spec.is_byzantium(0));
        assert!(!spec.is_eip155(u64::MAX));
        assert!(!spec.is_eip158(0));
    }

    #[test]
    fn test_dao_fork_block_requires_support() {
        let mut spec = ChainSpec {
            dao_fork_block: Some(5),
            ..Default::default()
        };
        assert!(!spec.is_dao_fork_block(5));
        spec.dao_fork_support = true;
        assert!(spec.is_dao_fork_block(5));
        assert!(!spec.is_dao_fork_block(4));
        assert!(!spec.is_dao_fork_block(6));
    }

    #[test]
    fn test_parse_toml() {
        let spec = ChainSpec::from_toml_str(
            r#"
            chain_id = 1337
            homestead_block = 0
            eip155_block = 10
            eip158_block = 10
            byzantium_block = 20
            dao_fork_block = 3
            dao_fork_support = true
            dao_refund_contract = "0xbf4ed7b27f1d666546e30d74d50d173d20bca754"
            dao_drain_list = ["0xd4fe7bc31cedb7bfb8a345f31e668033056b2728"]
            "#,
        )
        .unwrap();
        assert_eq!(spec.chain_id, 1337);
        assert_eq!(spec.homestead_block, Some(0));
        assert_eq!(spec.eip155_block, Some(10));
        assert_eq!(spec.byzantium_block, Some(20));
        assert!(spec.is_dao_fork_block(3));
        assert_eq!(
            spec.dao_refund_contract,
            Address::from_str("bf4ed7b27f1d666546e30d74d50d173d20bca754")
                .unwrap()
        );
        assert_eq!(spec.dao_drain_list.len(), 1);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let spec = ChainSpec::from_toml_str("eip158_block = 4").unwrap();
        assert_eq!(spec.chain_id, 1);
        assert_eq!(spec.eip158_block, Some(4));
        assert_eq!(spec.homestead_block, None);
        assert!(spec.dao_drain_list.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let spec = ChainSpec {
            chain_id: 7,
            homestead_block: Some(1),
            eip155_block: Some(2),
            eip158_block: Some(2),
            byzantium_block: Some(3),
            dao_fork_block: Some(1),
            dao_fork_support: true,
            dao_refund_contract: Address::repeat_byte(0x11),
            dao_drain_list: vec![
                Address::repeat_byte(0x22),
                Address::repeat_byte(0x33),
            ],
        };
        let encoded = toml::to_string(&spec).unwrap();
        assert_eq!(ChainSpec::from_toml_str(&encoded).unwrap(), spec);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ChainSpec::from_toml_str("chain_id = \"one\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            ChainSpec::load("/nonexistent/papyrus/chain.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
