//! Settings shared by the token voting and address-list voting plugins.

use alloy_primitives::{Address, U256};
use dao_encoding::ratio::{decode_ratio, encode_ratio, RATIO_DIGITS_MAJORITY_VOTING};
use serde::{Deserialize, Serialize};

use crate::abi::{self, IMajorityVoting::updateVotingSettingsCall};
use crate::codec::{decode_call, encode_call, ActionCall};
use crate::error::ActionError;
use crate::types::DaoAction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VotingMode {
    #[default]
    Standard,
    EarlyExecution,
    VoteReplacement,
}

impl From<VotingMode> for u8 {
    fn from(mode: VotingMode) -> Self {
        match mode {
            VotingMode::Standard => 0,
            VotingMode::EarlyExecution => 1,
            VotingMode::VoteReplacement => 2,
        }
    }
}

impl TryFrom<u8> for VotingMode {
    type Error = ActionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Standard),
            1 => Ok(Self::EarlyExecution),
            2 => Ok(Self::VoteReplacement),
            other => Err(ActionError::InvalidParameter(format!("unknown voting mode {other}"))),
        }
    }
}

/// Majority voting settings with ratios expressed as fractions of one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingSettings {
    #[serde(default)]
    pub voting_mode: VotingMode,
    pub support_threshold: f64,
    pub min_participation: f64,
    /// Seconds.
    pub min_duration: u64,
    #[serde(default = "default_min_proposer_voting_power")]
    pub min_proposer_voting_power: U256,
}

const fn default_min_proposer_voting_power() -> U256 {
    U256::from_limbs([1, 0, 0, 0])
}

impl VotingSettings {
    pub fn new(support_threshold: f64, min_participation: f64, min_duration: u64) -> Self {
        Self {
            voting_mode: VotingMode::Standard,
            support_threshold,
            min_participation,
            min_duration,
            min_proposer_voting_power: default_min_proposer_voting_power(),
        }
    }
}

fn ratio_field(ratio: f64, field: &str) -> Result<u32, ActionError> {
    let scaled = encode_ratio(ratio, RATIO_DIGITS_MAJORITY_VOTING)?;
    u32::try_from(scaled)
        .map_err(|_| ActionError::InvalidParameter(format!("{field} does not fit in 32 bits")))
}

impl ActionCall for updateVotingSettingsCall {
    type Params = VotingSettings;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _votingSettings: abi::VotingSettings {
                votingMode: params.voting_mode.into(),
                supportThreshold: ratio_field(params.support_threshold, "the support threshold")?,
                minParticipation: ratio_field(
                    params.min_participation,
                    "the minimum participation",
                )?,
                minDuration: params.min_duration,
                minProposerVotingPower: params.min_proposer_voting_power,
            },
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        let settings = self._votingSettings;

        Ok(VotingSettings {
            voting_mode: settings.votingMode.try_into()?,
            support_threshold: decode_ratio(
                U256::from(settings.supportThreshold),
                RATIO_DIGITS_MAJORITY_VOTING,
            )?,
            min_participation: decode_ratio(
                U256::from(settings.minParticipation),
                RATIO_DIGITS_MAJORITY_VOTING,
            )?,
            min_duration: settings.minDuration,
            min_proposer_voting_power: settings.minProposerVotingPower,
        })
    }
}

/// `plugin.updateVotingSettings(settings)` for a token voting or address-list voting plugin.
pub fn update_voting_settings_action(
    plugin_address: Address,
    settings: &VotingSettings,
) -> Result<DaoAction, ActionError> {
    encode_call::<updateVotingSettingsCall>(plugin_address, settings)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_update_voting_settings_action(data: &[u8]) -> Result<VotingSettings, ActionError> {
    decode_call::<updateVotingSettingsCall>(data)
}
