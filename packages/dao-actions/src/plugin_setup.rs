//! Installing, updating and uninstalling plugins through the plugin setup processor.
//!
//! The processor needs `ROOT_PERMISSION` on the DAO while it applies a
//! setup, so every encoder wraps the processor call between a grant and a
//! revoke of that permission.

use alloy_primitives::{keccak256, Address, Bytes, B256};
use alloy_sol_types::SolValue;
use dao_sdk_std::AddressExt;
use serde::{Deserialize, Serialize};

use crate::abi::{self, IPluginSetupProcessor};
use crate::codec::{decode_call, encode_call, ActionCall};
use crate::config::Context;
use crate::error::ActionError;
use crate::permissions::{grant_action, revoke_action, GrantPermissionParams, ROOT_PERMISSION};
use crate::types::DaoAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionOperation {
    Grant,
    Revoke,
    GrantWithCondition,
}

impl From<PermissionOperation> for abi::PermissionOperation {
    fn from(operation: PermissionOperation) -> Self {
        match operation {
            PermissionOperation::Grant => Self::Grant,
            PermissionOperation::Revoke => Self::Revoke,
            PermissionOperation::GrantWithCondition => Self::GrantWithCondition,
        }
    }
}

impl TryFrom<abi::PermissionOperation> for PermissionOperation {
    type Error = ActionError;

    fn try_from(operation: abi::PermissionOperation) -> Result<Self, Self::Error> {
        match operation {
            abi::PermissionOperation::Grant => Ok(Self::Grant),
            abi::PermissionOperation::Revoke => Ok(Self::Revoke),
            abi::PermissionOperation::GrantWithCondition => Ok(Self::GrantWithCondition),
            _ => Err(ActionError::DataDecoding("unknown permission operation".into())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionTag {
    pub release: u8,
    pub build: u16,
}

impl From<VersionTag> for abi::Tag {
    fn from(tag: VersionTag) -> Self {
        Self {
            release: tag.release,
            build: tag.build,
        }
    }
}

impl From<abi::Tag> for VersionTag {
    fn from(tag: abi::Tag) -> Self {
        Self {
            release: tag.release,
            build: tag.build,
        }
    }
}

/// A permission change the processor applies while setting up a plugin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTargetPermission {
    pub operation: PermissionOperation,
    pub where_address: Address,
    pub who: Address,
    /// `None` travels as the zero address.
    #[serde(default)]
    pub condition: Option<Address>,
    pub permission_id: B256,
}

impl From<&MultiTargetPermission> for abi::MultiTargetPermission {
    fn from(permission: &MultiTargetPermission) -> Self {
        Self {
            operation: permission.operation.into(),
            _where: permission.where_address,
            who: permission.who,
            condition: permission.condition.unwrap_or(Address::ZERO),
            permissionId: permission.permission_id,
        }
    }
}

impl TryFrom<abi::MultiTargetPermission> for MultiTargetPermission {
    type Error = ActionError;

    fn try_from(permission: abi::MultiTargetPermission) -> Result<Self, Self::Error> {
        Ok(Self {
            operation: permission.operation.try_into()?,
            where_address: permission._where,
            who: permission.who,
            condition: permission.condition.non_zero(),
            permission_id: permission.permissionId,
        })
    }
}

fn permissions_to_abi(permissions: &[MultiTargetPermission]) -> Vec<abi::MultiTargetPermission> {
    permissions.iter().map(Into::into).collect()
}

fn permissions_from_abi(
    permissions: Vec<abi::MultiTargetPermission>,
) -> Result<Vec<MultiTargetPermission>, ActionError> {
    permissions.into_iter().map(TryInto::try_into).collect()
}

/// `keccak256(abi.encode(helpers))`, the form in which the processor
/// remembers the helper contracts of a prepared setup.
pub fn helpers_hash(helpers: &[Address]) -> B256 {
    keccak256(helpers.to_vec().abi_encode())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyInstallationParams {
    pub plugin_address: Address,
    pub plugin_repo: Address,
    pub version_tag: VersionTag,
    pub permissions: Vec<MultiTargetPermission>,
    pub helpers: Vec<Address>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedApplyInstallationParams {
    pub plugin_address: Address,
    pub plugin_repo: Address,
    pub version_tag: VersionTag,
    pub permissions: Vec<MultiTargetPermission>,
    pub helpers_hash: B256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyUpdateParams {
    pub plugin_address: Address,
    pub plugin_repo: Address,
    pub version_tag: VersionTag,
    pub init_data: Bytes,
    pub permissions: Vec<MultiTargetPermission>,
    pub helpers: Vec<Address>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedApplyUpdateParams {
    pub plugin_address: Address,
    pub plugin_repo: Address,
    pub version_tag: VersionTag,
    pub init_data: Bytes,
    pub permissions: Vec<MultiTargetPermission>,
    pub helpers_hash: B256,
}

/// Uninstallation has no helpers, so the same shape serves both directions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyUninstallationParams {
    pub plugin_address: Address,
    pub plugin_repo: Address,
    pub version_tag: VersionTag,
    pub permissions: Vec<MultiTargetPermission>,
}

impl From<&ApplyInstallationParams> for DecodedApplyInstallationParams {
    fn from(params: &ApplyInstallationParams) -> Self {
        Self {
            plugin_address: params.plugin_address,
            plugin_repo: params.plugin_repo,
            version_tag: params.version_tag,
            permissions: params.permissions.clone(),
            helpers_hash: helpers_hash(&params.helpers),
        }
    }
}

impl From<&ApplyUpdateParams> for DecodedApplyUpdateParams {
    fn from(params: &ApplyUpdateParams) -> Self {
        Self {
            plugin_address: params.plugin_address,
            plugin_repo: params.plugin_repo,
            version_tag: params.version_tag,
            init_data: params.init_data.clone(),
            permissions: params.permissions.clone(),
            helpers_hash: helpers_hash(&params.helpers),
        }
    }
}

fn setup_ref(plugin_repo: Address, version_tag: VersionTag) -> abi::PluginSetupRef {
    abi::PluginSetupRef {
        versionTag: version_tag.into(),
        pluginSetupRepo: plugin_repo,
    }
}

impl ActionCall for IPluginSetupProcessor::applyInstallationCall {
    type Params = (Address, DecodedApplyInstallationParams);

    fn from_params((dao, params): &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _dao: *dao,
            _params: abi::ApplyInstallationParams {
                pluginSetupRef: setup_ref(params.plugin_repo, params.version_tag),
                plugin: params.plugin_address,
                permissions: permissions_to_abi(&params.permissions),
                helpersHash: params.helpers_hash,
            },
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        let params = self._params;

        Ok((
            self._dao,
            DecodedApplyInstallationParams {
                plugin_address: params.plugin,
                plugin_repo: params.pluginSetupRef.pluginSetupRepo,
                version_tag: params.pluginSetupRef.versionTag.into(),
                permissions: permissions_from_abi(params.permissions)?,
                helpers_hash: params.helpersHash,
            },
        ))
    }
}

impl ActionCall for IPluginSetupProcessor::applyUpdateCall {
    type Params = (Address, DecodedApplyUpdateParams);

    fn from_params((dao, params): &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _dao: *dao,
            _params: abi::ApplyUpdateParams {
                plugin: params.plugin_address,
                pluginSetupRef: setup_ref(params.plugin_repo, params.version_tag),
                initData: params.init_data.clone(),
                permissions: permissions_to_abi(&params.permissions),
                helpersHash: params.helpers_hash,
            },
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        let params = self._params;

        Ok((
            self._dao,
            DecodedApplyUpdateParams {
                plugin_address: params.plugin,
                plugin_repo: params.pluginSetupRef.pluginSetupRepo,
                version_tag: params.pluginSetupRef.versionTag.into(),
                init_data: params.initData,
                permissions: permissions_from_abi(params.permissions)?,
                helpers_hash: params.helpersHash,
            },
        ))
    }
}

impl ActionCall for IPluginSetupProcessor::applyUninstallationCall {
    type Params = (Address, ApplyUninstallationParams);

    fn from_params((dao, params): &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _dao: *dao,
            _params: abi::ApplyUninstallationParams {
                plugin: params.plugin_address,
                pluginSetupRef: setup_ref(params.plugin_repo, params.version_tag),
                permissions: permissions_to_abi(&params.permissions),
            },
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        let params = self._params;

        Ok((
            self._dao,
            ApplyUninstallationParams {
                plugin_address: params.plugin,
                plugin_repo: params.pluginSetupRef.pluginSetupRepo,
                version_tag: params.pluginSetupRef.versionTag.into(),
                permissions: permissions_from_abi(params.permissions)?,
            },
        ))
    }
}

/// Surrounds `call` with a grant and a revoke of `ROOT_PERMISSION` for the processor.
fn with_root_permission(
    context: &Context,
    dao_address: Address,
    call: DaoAction,
) -> Result<Vec<DaoAction>, ActionError> {
    let root = GrantPermissionParams {
        where_address: dao_address,
        who: context.plugin_setup_processor(),
        permission: ROOT_PERMISSION.into(),
    };

    Ok(vec![
        grant_action(dao_address, &root)?,
        call,
        revoke_action(dao_address, &root)?,
    ])
}

pub fn apply_installation_action(
    context: &Context,
    dao_address: Address,
    params: &ApplyInstallationParams,
) -> Result<Vec<DaoAction>, ActionError> {
    context.validate()?;
    let call = encode_call::<IPluginSetupProcessor::applyInstallationCall>(
        context.plugin_setup_processor(),
        &(dao_address, params.into()),
    )?;
    with_root_permission(context, dao_address, call)
}

pub fn apply_update_action(
    context: &Context,
    dao_address: Address,
    params: &ApplyUpdateParams,
) -> Result<Vec<DaoAction>, ActionError> {
    context.validate()?;
    let call = encode_call::<IPluginSetupProcessor::applyUpdateCall>(
        context.plugin_setup_processor(),
        &(dao_address, params.into()),
    )?;
    with_root_permission(context, dao_address, call)
}

pub fn apply_uninstallation_action(
    context: &Context,
    dao_address: Address,
    params: &ApplyUninstallationParams,
) -> Result<Vec<DaoAction>, ActionError> {
    context.validate()?;
    let call = encode_call::<IPluginSetupProcessor::applyUninstallationCall>(
        context.plugin_setup_processor(),
        &(dao_address, params.clone()),
    )?;
    with_root_permission(context, dao_address, call)
}

/// Decodes the processor call of an installation, not the surrounding permission actions.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_apply_installation_action(
    data: &[u8],
) -> Result<DecodedApplyInstallationParams, ActionError> {
    decode_call::<IPluginSetupProcessor::applyInstallationCall>(data).map(|(_, params)| params)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_apply_update_action(data: &[u8]) -> Result<DecodedApplyUpdateParams, ActionError> {
    decode_call::<IPluginSetupProcessor::applyUpdateCall>(data).map(|(_, params)| params)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_apply_uninstallation_action(
    data: &[u8],
) -> Result<ApplyUninstallationParams, ActionError> {
    decode_call::<IPluginSetupProcessor::applyUninstallationCall>(data).map(|(_, params)| params)
}
