//! Deployment context for encoders that target framework contracts.

use alloy_primitives::Address;
use dao_sdk_std::ensure;
use serde::{Deserialize, Serialize};

use crate::error::ActionError;

/// Networks the framework is deployed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SdkNetwork {
    Mainnet,
    Goerli,
    Sepolia,
    Polygon,
    Mumbai,
    Base,
    BaseGoerli,
    Local,
}

/// Addresses of the framework contracts on one network.
///
/// The encoding core never talks to the network, so the addresses are
/// supplied by the caller, typically parsed from a JSON document:
///
/// ```json
/// {
///   "network": "sepolia",
///   "pluginSetupProcessorAddress": "0x..."
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Context {
    network: SdkNetwork,
    plugin_setup_processor_address: Address,
}

impl Context {
    pub const fn new(network: SdkNetwork, plugin_setup_processor_address: Address) -> Self {
        Self {
            network,
            plugin_setup_processor_address,
        }
    }

    pub fn from_json(document: &str) -> Result<Self, ActionError> {
        let context: Self = serde_json::from_str(document)
            .map_err(|err| ActionError::InvalidParameter(format!("context: {err}")))?;
        context.validate()?;

        Ok(context)
    }

    pub fn validate(&self) -> Result<(), ActionError> {
        ensure!(
            !self.plugin_setup_processor_address.is_zero(),
            ActionError::InvalidParameter("the plugin setup processor address is zero".into())
        );
        Ok(())
    }

    pub const fn network(&self) -> SdkNetwork {
        self.network
    }

    pub const fn plugin_setup_processor(&self) -> Address {
        self.plugin_setup_processor_address
    }
}
