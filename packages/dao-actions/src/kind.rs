//! Dispatch over every action the SDK understands.
//!
//! Each [`ActionKind`] owns a row in a static table holding its signature,
//! its selector and the decoder for its payload. [`decode_action`] looks the
//! payload up in the registry and hands it to the matching row.

use std::collections::HashMap;
use std::fmt;

use alloy_primitives::{Address, Selector};
use alloy_sol_types::SolCall;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::abi::{
    IAllowlistVoting, IERC1155, IERC20, IERC20Voting, IERC721, IGovernanceERC20, IMajorityVoting,
    IMembership, IMultisig, IPluginSetupProcessor, IDAO,
};
use crate::codec::decode_call;
use crate::dao::{
    self, InitializeFromParams, RegisterStandardCallbackParams, UpgradeToAndCallParams,
    WithdrawParams,
};
use crate::error::ActionError;
use crate::legacy::{self, VoteConfig};
use crate::majority_voting::{self, VotingSettings};
use crate::members;
use crate::multisig::{self, MultisigVotingSettings};
use crate::permissions::{self, PermissionDecodedParams, PermissionWithConditionDecodedParams};
use crate::plugin_setup::{
    ApplyUninstallationParams, DecodedApplyInstallationParams, DecodedApplyUpdateParams,
};
use crate::registry;
use crate::token_voting::{self, MintTokenParams};
use crate::transfer::{self, TransferParams};
use crate::types::DaoAction;

type DecodeFn = fn(&DaoAction) -> Result<DecodedAction, ActionError>;

struct ActionCodec {
    kind: ActionKind,
    signature: &'static str,
    selector: [u8; 4],
    decode: DecodeFn,
}

fn decode_transfer(action: &DaoAction) -> Result<DecodedAction, ActionError> {
    transfer::decode_transfer_action(action.to, action.value, &action.data)
        .map(DecodedAction::Transfer)
}

fn decode_apply_installation(action: &DaoAction) -> Result<DecodedAction, ActionError> {
    decode_call::<IPluginSetupProcessor::applyInstallationCall>(&action.data)
        .map(|(dao_address, params)| DecodedAction::ApplyInstallation { dao_address, params })
}

fn decode_apply_update(action: &DaoAction) -> Result<DecodedAction, ActionError> {
    decode_call::<IPluginSetupProcessor::applyUpdateCall>(&action.data)
        .map(|(dao_address, params)| DecodedAction::ApplyUpdate { dao_address, params })
}

fn decode_apply_uninstallation(action: &DaoAction) -> Result<DecodedAction, ActionError> {
    decode_call::<IPluginSetupProcessor::applyUninstallationCall>(&action.data)
        .map(|(dao_address, params)| DecodedAction::ApplyUninstallation { dao_address, params })
}

/// `payload` rows decode the call data alone into the `DecodedAction`
/// variant of the same name. `envelope` rows get the whole action.
macro_rules! action_kinds {
    (
        payload { $($kind:ident => $call:ty, $decode:path;)* }
        envelope { $($env_kind:ident => $env_call:ty, $env_decode:expr;)* }
    ) => {
        /// Every contract function an action can call, plus plain native transfers.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ActionKind {
            NativeTransfer,
            $($kind,)*
            $($env_kind,)*
        }

        static CODECS: &[ActionCodec] = &[
            $(ActionCodec {
                kind: ActionKind::$kind,
                signature: <$call as SolCall>::SIGNATURE,
                selector: <$call as SolCall>::SELECTOR,
                decode: |action| $decode(&action.data).map(DecodedAction::$kind),
            },)*
            $(ActionCodec {
                kind: ActionKind::$env_kind,
                signature: <$env_call as SolCall>::SIGNATURE,
                selector: <$env_call as SolCall>::SELECTOR,
                decode: $env_decode,
            },)*
        ];
    };
}

action_kinds! {
    payload {
        Grant => IDAO::grantCall, permissions::decode_grant_action;
        GrantWithCondition => IDAO::grantWithConditionCall,
            permissions::decode_grant_with_condition_action;
        Revoke => IDAO::revokeCall, permissions::decode_revoke_action;
        SetMetadata => IDAO::setMetadataCall, dao::decode_update_dao_metadata_raw_action;
        SetDaoUri => IDAO::setDaoURICall, dao::decode_set_dao_uri_action;
        RegisterStandardCallback => IDAO::registerStandardCallbackCall,
            dao::decode_register_standard_callback_action;
        SetSignatureValidator => IDAO::setSignatureValidatorCall,
            dao::decode_set_signature_validator_action;
        UpgradeTo => IDAO::upgradeToCall, dao::decode_upgrade_to_action;
        UpgradeToAndCall => IDAO::upgradeToAndCallCall, dao::decode_upgrade_to_and_call_action;
        InitializeFrom => IDAO::initializeFromCall, dao::decode_initialize_from_action;
        Withdraw => IDAO::withdrawCall, dao::decode_withdraw_action;
        UpdateVotingSettings => IMajorityVoting::updateVotingSettingsCall,
            majority_voting::decode_update_voting_settings_action;
        MintToken => IGovernanceERC20::mintCall, token_voting::decode_mint_token_action;
        AddAddresses => IMembership::addAddressesCall, members::decode_add_addresses_action;
        RemoveAddresses => IMembership::removeAddressesCall,
            members::decode_remove_addresses_action;
        UpdateMultisigSettings => IMultisig::updateMultisigSettingsCall,
            multisig::decode_update_multisig_settings_action;
        ChangeVoteConfig => IERC20Voting::changeVoteConfigCall,
            legacy::decode_change_vote_config_action;
        AddAllowedUsers => IAllowlistVoting::addAllowedUsersCall,
            legacy::decode_add_allowed_users_action;
        RemoveAllowedUsers => IAllowlistVoting::removeAllowedUsersCall,
            legacy::decode_remove_allowed_users_action;
    }
    envelope {
        Erc20Transfer => IERC20::transferCall, decode_transfer;
        Erc721Transfer => IERC721::safeTransferFromCall, decode_transfer;
        Erc1155Transfer => IERC1155::safeTransferFromCall, decode_transfer;
        Erc1155BatchTransfer => IERC1155::safeBatchTransferFromCall, decode_transfer;
        ApplyInstallation => IPluginSetupProcessor::applyInstallationCall,
            decode_apply_installation;
        ApplyUpdate => IPluginSetupProcessor::applyUpdateCall, decode_apply_update;
        ApplyUninstallation => IPluginSetupProcessor::applyUninstallationCall,
            decode_apply_uninstallation;
    }
}

static CODECS_BY_SELECTOR: Lazy<HashMap<Selector, &'static ActionCodec>> = Lazy::new(|| {
    CODECS
        .iter()
        .map(|codec| (Selector::from(codec.selector), codec))
        .collect()
});

static CODECS_BY_KIND: Lazy<HashMap<ActionKind, &'static ActionCodec>> =
    Lazy::new(|| CODECS.iter().map(|codec| (codec.kind, codec)).collect());

impl ActionKind {
    pub fn from_selector(selector: Selector) -> Option<Self> {
        CODECS_BY_SELECTOR.get(&selector).map(|codec| codec.kind)
    }

    /// Canonical signature of the called function, `None` for native transfers.
    pub fn signature(self) -> Option<&'static str> {
        CODECS_BY_KIND.get(&self).map(|codec| codec.signature)
    }

    pub fn selector(self) -> Option<Selector> {
        CODECS_BY_KIND
            .get(&self)
            .map(|codec| Selector::from(codec.selector))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        std::iter::once(Self::NativeTransfer).chain(CODECS.iter().map(|codec| codec.kind))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signature() {
            Some(signature) => f.write_str(signature),
            None => f.write_str("native transfer"),
        }
    }
}

/// The typed content of any known action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "camelCase")]
pub enum DecodedAction {
    Grant(PermissionDecodedParams),
    GrantWithCondition(PermissionWithConditionDecodedParams),
    Revoke(PermissionDecodedParams),
    /// The metadata URI.
    SetMetadata(String),
    SetDaoUri(String),
    RegisterStandardCallback(RegisterStandardCallbackParams),
    SetSignatureValidator(Address),
    UpgradeTo(Address),
    UpgradeToAndCall(UpgradeToAndCallParams),
    InitializeFrom(InitializeFromParams),
    Withdraw(WithdrawParams),
    Transfer(TransferParams),
    UpdateVotingSettings(VotingSettings),
    MintToken(MintTokenParams),
    AddAddresses(Vec<Address>),
    RemoveAddresses(Vec<Address>),
    UpdateMultisigSettings(MultisigVotingSettings),
    ChangeVoteConfig(VoteConfig),
    AddAllowedUsers(Vec<Address>),
    RemoveAllowedUsers(Vec<Address>),
    #[serde(rename_all = "camelCase")]
    ApplyInstallation {
        dao_address: Address,
        params: DecodedApplyInstallationParams,
    },
    #[serde(rename_all = "camelCase")]
    ApplyUpdate {
        dao_address: Address,
        params: DecodedApplyUpdateParams,
    },
    #[serde(rename_all = "camelCase")]
    ApplyUninstallation {
        dao_address: Address,
        params: ApplyUninstallationParams,
    },
}

impl DecodedAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Grant(_) => ActionKind::Grant,
            Self::GrantWithCondition(_) => ActionKind::GrantWithCondition,
            Self::Revoke(_) => ActionKind::Revoke,
            Self::SetMetadata(_) => ActionKind::SetMetadata,
            Self::SetDaoUri(_) => ActionKind::SetDaoUri,
            Self::RegisterStandardCallback(_) => ActionKind::RegisterStandardCallback,
            Self::SetSignatureValidator(_) => ActionKind::SetSignatureValidator,
            Self::UpgradeTo(_) => ActionKind::UpgradeTo,
            Self::UpgradeToAndCall(_) => ActionKind::UpgradeToAndCall,
            Self::InitializeFrom(_) => ActionKind::InitializeFrom,
            Self::Withdraw(_) => ActionKind::Withdraw,
            Self::Transfer(TransferParams::Native { .. }) => ActionKind::NativeTransfer,
            Self::Transfer(TransferParams::Erc20 { .. }) => ActionKind::Erc20Transfer,
            Self::Transfer(TransferParams::Erc721 { .. }) => ActionKind::Erc721Transfer,
            Self::Transfer(TransferParams::Erc1155 { batch: false, .. }) => {
                ActionKind::Erc1155Transfer
            }
            Self::Transfer(TransferParams::Erc1155 { batch: true, .. }) => {
                ActionKind::Erc1155BatchTransfer
            }
            Self::UpdateVotingSettings(_) => ActionKind::UpdateVotingSettings,
            Self::MintToken(_) => ActionKind::MintToken,
            Self::AddAddresses(_) => ActionKind::AddAddresses,
            Self::RemoveAddresses(_) => ActionKind::RemoveAddresses,
            Self::UpdateMultisigSettings(_) => ActionKind::UpdateMultisigSettings,
            Self::ChangeVoteConfig(_) => ActionKind::ChangeVoteConfig,
            Self::AddAllowedUsers(_) => ActionKind::AddAllowedUsers,
            Self::RemoveAllowedUsers(_) => ActionKind::RemoveAllowedUsers,
            Self::ApplyInstallation { .. } => ActionKind::ApplyInstallation,
            Self::ApplyUpdate { .. } => ActionKind::ApplyUpdate,
            Self::ApplyUninstallation { .. } => ActionKind::ApplyUninstallation,
        }
    }
}

/// Decodes any known action.
///
/// An empty payload is a native transfer of `value` to `to`. Otherwise the
/// selector is looked up in [`registry::ALL`]; an unknown selector fails
/// with [`ActionError::DataDecoding`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(to = %action.to)))]
pub fn decode_action(action: &DaoAction) -> Result<DecodedAction, ActionError> {
    if action.data.is_empty() {
        return decode_transfer(action);
    }

    let function = registry::ALL.get_function_fragment(&action.data)?;
    let codec = CODECS_BY_SELECTOR.get(&function.selector()).ok_or_else(|| {
        ActionError::DataDecoding(format!("{} has no decoder", function.signature()))
    })?;

    debug!(kind = ?codec.kind, "decoding action");

    (codec.decode)(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{grant_action, GrantPermissionParams};
    use alloy_primitives::{address, Bytes, U256};
    use dao_sdk_std::{assert_err, assert_ok, assert_some, testutils::address_from_seed};
    use hex_literal::hex;

    const DAO: Address = address!("00000000000000000000000000000000000000da");

    #[test]
    fn every_function_in_the_registry_has_a_kind() {
        assert_eq!(CODECS.len(), registry::ALL.len());
        assert_eq!(CODECS_BY_SELECTOR.len(), CODECS.len());

        for function in registry::ALL.functions() {
            let kind = assert_some!(ActionKind::from_selector(function.selector()));
            assert_eq!(kind.signature(), Some(function.signature()));
        }
    }

    #[test]
    fn kinds_know_their_selectors() {
        assert_eq!(ActionKind::MintToken.selector(), Some(hex!("40c10f19").into()));
        assert_eq!(ActionKind::NativeTransfer.selector(), None);
        assert_eq!(ActionKind::NativeTransfer.to_string(), "native transfer");
        assert_eq!(ActionKind::Withdraw.to_string(), "withdraw(address,address,uint256,string)");
        assert_eq!(ActionKind::all().count(), CODECS.len() + 1);
    }

    #[test]
    fn dispatches_on_the_selector() {
        let action = assert_ok!(grant_action(
            DAO,
            &GrantPermissionParams {
                where_address: DAO,
                who: address_from_seed(0x11),
                permission: "EXECUTE_PERMISSION".into(),
            }
        ));

        let decoded = assert_ok!(decode_action(&action));
        assert_eq!(decoded.kind(), ActionKind::Grant);

        let DecodedAction::Grant(params) = decoded else {
            panic!("expected a grant");
        };
        assert_eq!(params.permission.as_deref(), Some("EXECUTE_PERMISSION"));
    }

    #[test]
    fn empty_payloads_are_native_transfers() {
        let action = DaoAction::native_transfer(address_from_seed(0x12), U256::from(3));

        let decoded = assert_ok!(decode_action(&action));
        assert_eq!(decoded.kind(), ActionKind::NativeTransfer);
        assert_eq!(
            decoded,
            DecodedAction::Transfer(TransferParams::Native {
                recipient_address: address_from_seed(0x12),
                amount: U256::from(3),
            })
        );
    }

    #[test]
    fn erc1155_kind_follows_the_called_function() {
        let token = address_from_seed(0x20);
        let transfer = |batch| TransferParams::Erc1155 {
            token_address: token,
            from: DAO,
            recipient_address: address_from_seed(0x21),
            token_ids: vec![U256::from(9)],
            amounts: vec![U256::from(1)],
            data: Bytes::from(hex!("deadbeef").to_vec()),
            batch,
        };

        for (batch, kind) in [
            (false, ActionKind::Erc1155Transfer),
            (true, ActionKind::Erc1155BatchTransfer),
        ] {
            let action = assert_ok!(transfer::transfer_action(&transfer(batch)));
            assert_eq!(ActionKind::from_selector(assert_some!(action.selector())), Some(kind));

            let decoded = assert_ok!(decode_action(&action));
            assert_eq!(decoded.kind(), kind);
            assert_eq!(decoded, DecodedAction::Transfer(transfer(batch)));
        }
    }

    #[test]
    fn unknown_selectors_are_decoding_errors() {
        assert_err!(
            decode_action(&DaoAction::call(DAO, hex!("deadbeef00").to_vec())),
            ActionError::DataDecoding("no known function has the selector 0xdeadbeef".into())
        );
        assert_err!(
            decode_action(&DaoAction::call(DAO, hex!("dead").to_vec())),
            ActionError::DataDecoding("the payload is 2 bytes long, a selector needs 4".into())
        );
    }
}
