use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ensure;
use crate::error::Error;

/// Returns true for a `0x`-prefixed, 40 digit hex string. Checksum casing is not enforced.
pub fn is_address(value: &str) -> bool {
    value.len() == 42
        && value.starts_with("0x")
        && value[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parses a `0x`-prefixed hex address.
pub fn parse_address(value: &str) -> Result<Address, Error> {
    ensure!(is_address(value), Error::InvalidAddress(value.to_string()));

    Address::from_str(value).map_err(|_| Error::InvalidAddress(value.to_string()))
}

/// Dot separated labels without whitespace or `/`, ending in an
/// alphanumeric top level label of at least two characters.
static ENS_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^\s/.]+\.)+[A-Za-z0-9]{2,}$").expect("the ENS name pattern is valid")
});

/// Structural ENS name check. Whether the name is registered is up to the [`EnsResolver`].
pub fn is_ens_name(value: &str) -> bool {
    ENS_NAME.is_match(value)
}

pub trait AddressExt {
    /// Maps the zero address to `None`.
    fn non_zero(self) -> Option<Address>;
}

impl AddressExt for Address {
    fn non_zero(self) -> Option<Address> {
        (!self.is_zero()).then_some(self)
    }
}

/// Resolves ENS names to addresses. Implemented by the wallet/network layer.
pub trait EnsResolver {
    fn resolve_name(&self, name: &str) -> Option<Address>;
}

impl EnsResolver for HashMap<String, Address> {
    fn resolve_name(&self, name: &str) -> Option<Address> {
        self.get(name).copied()
    }
}

/// Resolver for contexts without name resolution: every lookup misses.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEnsResolver;

impl EnsResolver for NoEnsResolver {
    fn resolve_name(&self, _name: &str) -> Option<Address> {
        None
    }
}

/// A value that passed the address-or-ENS-name check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddressOrEns {
    Address(Address),
    Ens(String),
}

impl AddressOrEns {
    /// Returns the address, looking ENS names up through `resolver`.
    pub fn resolve<R: EnsResolver + ?Sized>(&self, resolver: &R) -> Result<Address, Error> {
        match self {
            Self::Address(address) => Ok(*address),
            Self::Ens(name) => resolver
                .resolve_name(name)
                .ok_or_else(|| Error::UnresolvedEnsName(name.clone())),
        }
    }

    pub const fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            Self::Ens(_) => None,
        }
    }
}

impl FromStr for AddressOrEns {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if is_address(value) {
            return parse_address(value).map(Self::Address);
        }
        ensure!(
            is_ens_name(value),
            Error::InvalidAddressOrEns(value.to_string())
        );

        Ok(Self::Ens(value.to_string()))
    }
}

impl From<Address> for AddressOrEns {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl fmt::Display for AddressOrEns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::Ens(name) => f.write_str(name),
        }
    }
}

impl Serialize for AddressOrEns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AddressOrEns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
