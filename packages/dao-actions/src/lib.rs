//! Encoding and decoding of DAO proposal actions.
//!
//! Every capability module pairs encoders, which turn typed parameters into
//! a [`DaoAction`] ready to be submitted on chain, with decoders, which check
//! that a payload calls the expected function and recover the parameters.
//! [`decode_action`] handles payloads of unknown kind through the registry.
//!
//! Addresses are typed. Callers holding ENS names resolve them first with
//! [`resolve_address`] and an [`EnsResolver`] supplied by the wallet layer.

use alloy_primitives::Address;
use dao_sdk_std::{AddressOrEns, EnsResolver};

cfg_if::cfg_if! {
    if #[cfg(feature = "tracing")] {
        macro_rules! debug {
            ($($arg:tt)*) => { tracing::debug!($($arg)*) };
        }

        macro_rules! warn {
            ($($arg:tt)*) => { tracing::warn!($($arg)*) };
        }
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {};
        }

        macro_rules! warn {
            ($($arg:tt)*) => {};
        }
    }
}

pub mod abi;
mod codec;
pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub mod dao;
pub mod kind;
pub mod legacy;
pub mod majority_voting;
pub mod members;
pub mod multisig;
pub mod permissions;
pub mod plugin_setup;
pub mod token_voting;
pub mod transfer;

pub use config::{Context, SdkNetwork};
pub use error::ActionError;
pub use kind::{decode_action, ActionKind, DecodedAction};
pub use registry::{FunctionDescriptor, FunctionRegistry, InterfaceParams};
pub use types::DaoAction;

/// Parses an address or ENS name and resolves it to an address.
pub fn resolve_address<R: EnsResolver + ?Sized>(
    value: &str,
    resolver: &R,
) -> Result<Address, ActionError> {
    let target: AddressOrEns = value.parse()?;
    Ok(target.resolve(resolver)?)
}
