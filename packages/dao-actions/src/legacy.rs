//! The first generation ERC-20 voting and allowlist voting plugins.
//!
//! Their vote configuration stores percentages, so ratios travel with two
//! digits of precision instead of the six used by majority voting.

use alloy_primitives::{Address, U256};
use dao_encoding::ratio::{decode_ratio, encode_ratio, RATIO_DIGITS_LEGACY};
use serde::{Deserialize, Serialize};

use crate::abi::IAllowlistVoting::{addAllowedUsersCall, removeAllowedUsersCall};
use crate::abi::IERC20Voting::changeVoteConfigCall;
use crate::codec::{decode_call, encode_call, ActionCall};
use crate::error::ActionError;
use crate::members::ensure_members;
use crate::types::DaoAction;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteConfig {
    pub min_turnout: f64,
    pub min_support: f64,
    /// Seconds.
    pub min_duration: u64,
}

impl ActionCall for changeVoteConfigCall {
    type Params = VoteConfig;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _participationRequiredPct: encode_ratio(params.min_turnout, RATIO_DIGITS_LEGACY)?,
            _supportRequiredPct: encode_ratio(params.min_support, RATIO_DIGITS_LEGACY)?,
            _minDuration: params.min_duration,
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(VoteConfig {
            min_turnout: decode_ratio(
                U256::from(self._participationRequiredPct),
                RATIO_DIGITS_LEGACY,
            )?,
            min_support: decode_ratio(U256::from(self._supportRequiredPct), RATIO_DIGITS_LEGACY)?,
            min_duration: self._minDuration,
        })
    }
}

impl ActionCall for addAllowedUsersCall {
    type Params = Vec<Address>;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _users: params.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(self._users)
    }
}

impl ActionCall for removeAllowedUsersCall {
    type Params = Vec<Address>;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _users: params.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(self._users)
    }
}

/// `plugin.changeVoteConfig(participation, support, minDuration)`
pub fn change_vote_config_action(
    plugin_address: Address,
    config: &VoteConfig,
) -> Result<DaoAction, ActionError> {
    encode_call::<changeVoteConfigCall>(plugin_address, config)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_change_vote_config_action(data: &[u8]) -> Result<VoteConfig, ActionError> {
    decode_call::<changeVoteConfigCall>(data)
}

pub fn add_allowed_users_action(
    plugin_address: Address,
    users: &[Address],
) -> Result<DaoAction, ActionError> {
    ensure_members(users)?;
    encode_call::<addAllowedUsersCall>(plugin_address, &users.to_vec())
}

pub fn remove_allowed_users_action(
    plugin_address: Address,
    users: &[Address],
) -> Result<DaoAction, ActionError> {
    ensure_members(users)?;
    encode_call::<removeAllowedUsersCall>(plugin_address, &users.to_vec())
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_add_allowed_users_action(data: &[u8]) -> Result<Vec<Address>, ActionError> {
    decode_call::<addAllowedUsersCall>(data)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_remove_allowed_users_action(data: &[u8]) -> Result<Vec<Address>, ActionError> {
    decode_call::<removeAllowedUsersCall>(data)
}
