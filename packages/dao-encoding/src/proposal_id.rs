//! Nonce-based proposal identifiers.
//!
//! A proposal is addressed by the plugin that holds it and the plugin's
//! proposal counter. Both are packed into 32 bytes, the 20 byte address
//! followed by a 12 byte big-endian nonce, and rendered as `0x`-prefixed hex.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{aliases::U96, Address};
use dao_sdk_std::{address::parse_address, ensure};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EncodingError;

const ADDRESS_BYTES: usize = 20;
const NONCE_BYTES: usize = 12;
const ID_BYTES: usize = ADDRESS_BYTES + NONCE_BYTES;

/// Length of the rendered identifier, `0x` included.
pub const PROPOSAL_ID_LEN: usize = 2 + 2 * ID_BYTES;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProposalId {
    pub plugin_address: Address,
    pub nonce: U96,
}

impl ProposalId {
    pub const fn new(plugin_address: Address, nonce: U96) -> Self {
        Self {
            plugin_address,
            nonce,
        }
    }

    pub fn to_bytes(&self) -> [u8; ID_BYTES] {
        let mut bytes = [0u8; ID_BYTES];
        bytes[..ADDRESS_BYTES].copy_from_slice(self.plugin_address.as_slice());
        bytes[ADDRESS_BYTES..].copy_from_slice(&self.nonce.to_be_bytes::<NONCE_BYTES>());
        bytes
    }

    pub fn from_bytes(bytes: &[u8; ID_BYTES]) -> Self {
        let mut nonce = [0u8; NONCE_BYTES];
        nonce.copy_from_slice(&bytes[ADDRESS_BYTES..]);

        Self {
            plugin_address: Address::from_slice(&bytes[..ADDRESS_BYTES]),
            nonce: U96::from_be_bytes(nonce),
        }
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl FromStr for ProposalId {
    type Err = EncodingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || EncodingError::InvalidProposalId(value.to_string());

        ensure!(value.len() == PROPOSAL_ID_LEN, invalid());
        let digits = value.strip_prefix("0x").ok_or_else(invalid)?;

        let mut bytes = [0u8; ID_BYTES];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| invalid())?;

        Ok(Self::from_bytes(&bytes))
    }
}

impl Serialize for ProposalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProposalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Builds the identifier of proposal `nonce` on the plugin at `plugin_address`.
pub fn encode_proposal_id(plugin_address: &str, nonce: U96) -> Result<String, EncodingError> {
    let plugin_address = parse_address(plugin_address)
        .map_err(|_| EncodingError::InvalidAddress(plugin_address.to_string()))?;

    Ok(ProposalId::new(plugin_address, nonce).to_string())
}

pub fn decode_proposal_id(proposal_id: &str) -> Result<ProposalId, EncodingError> {
    proposal_id.parse()
}

pub fn is_proposal_id(value: &str) -> bool {
    decode_proposal_id(value).is_ok()
}
