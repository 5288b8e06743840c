//! Helpers shared by the DAO SDK codec crates.
//!
//! Nothing in here knows about a specific contract. The crate carries the
//! control-flow macros used across the workspace, `0x` hex handling, address
//! and ENS-name validation and multi-URI parsing for metadata links.

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub mod address;

pub mod error;

pub mod hex;

pub mod multi_uri;

pub use address::{AddressExt, AddressOrEns, EnsResolver, NoEnsResolver};
pub use error::Error;
pub use multi_uri::MultiUri;
