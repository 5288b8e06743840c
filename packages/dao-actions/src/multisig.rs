//! Multisig plugin settings. Membership changes live in [`crate::members`].

use alloy_primitives::Address;
use dao_sdk_std::ensure;
use serde::{Deserialize, Serialize};

use crate::abi::{self, IMultisig::updateMultisigSettingsCall};
use crate::codec::{decode_call, encode_call, ActionCall};
use crate::error::ActionError;
use crate::types::DaoAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigVotingSettings {
    pub min_approvals: u16,
    /// Only members may create proposals.
    pub only_listed: bool,
}

impl ActionCall for updateMultisigSettingsCall {
    type Params = MultisigVotingSettings;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        ensure!(
            params.min_approvals >= 1,
            ActionError::InvalidParameter("at least one approval is required".into())
        );

        Ok(Self {
            _multisigSettings: abi::MultisigSettings {
                onlyListed: params.only_listed,
                minApprovals: params.min_approvals,
            },
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(MultisigVotingSettings {
            min_approvals: self._multisigSettings.minApprovals,
            only_listed: self._multisigSettings.onlyListed,
        })
    }
}

pub fn update_multisig_settings_action(
    plugin_address: Address,
    settings: &MultisigVotingSettings,
) -> Result<DaoAction, ActionError> {
    encode_call::<updateMultisigSettingsCall>(plugin_address, settings)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_update_multisig_settings_action(
    data: &[u8],
) -> Result<MultisigVotingSettings, ActionError> {
    decode_call::<updateMultisigSettingsCall>(data)
}
