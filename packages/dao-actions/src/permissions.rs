//! Permission grants and revocations on a DAO.

use std::collections::HashMap;

use alloy_primitives::{keccak256, Address, B256};
use dao_sdk_std::ensure;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::abi::IDAO::{grantCall, grantWithConditionCall, revokeCall};
use crate::codec::{decode_call, encode_call, ActionCall};
use crate::error::ActionError;
use crate::types::DaoAction;

pub const ROOT_PERMISSION: &str = "ROOT_PERMISSION";

/// Permissions defined by the framework contracts, recognized when decoding.
pub const PERMISSIONS: [&str; 15] = [
    "UPGRADE_PERMISSION",
    "SET_METADATA_PERMISSION",
    "EXECUTE_PERMISSION",
    "WITHDRAW_PERMISSION",
    "SET_SIGNATURE_VALIDATOR_PERMISSION",
    "SET_TRUSTED_FORWARDER_PERMISSION",
    ROOT_PERMISSION,
    "CREATE_VERSION_PERMISSION",
    "REGISTER_PERMISSION",
    "REGISTER_DAO_PERMISSION",
    "REGISTER_ENS_SUBDOMAIN_PERMISSION",
    "MINT_PERMISSION",
    "MERKLE_MINT_PERMISSION",
    "MODIFY_ALLOWLIST_PERMISSION",
    "SET_CONFIGURATION_PERMISSION",
];

static PERMISSION_NAMES: Lazy<HashMap<B256, &'static str>> = Lazy::new(|| {
    PERMISSIONS
        .iter()
        .map(|&name| (permission_id(name), name))
        .collect()
});

/// On-chain identifier of a permission: the keccak256 hash of its name.
pub fn permission_id(name: &str) -> B256 {
    keccak256(name.as_bytes())
}

pub fn permission_name(id: &B256) -> Option<&'static str> {
    PERMISSION_NAMES.get(id).copied()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantPermissionParams {
    pub where_address: Address,
    pub who: Address,
    pub permission: String,
}

pub type RevokePermissionParams = GrantPermissionParams;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantPermissionWithConditionParams {
    pub where_address: Address,
    pub who: Address,
    pub permission: String,
    pub condition: Address,
}

/// A decoded grant or revoke. `permission` is only known for the
/// framework's own permissions, the hash cannot be reversed otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDecodedParams {
    pub where_address: Address,
    pub who: Address,
    pub permission_id: B256,
    pub permission: Option<String>,
}

impl PermissionDecodedParams {
    fn new(where_address: Address, who: Address, permission_id: B256) -> Self {
        Self {
            where_address,
            who,
            permission_id,
            permission: permission_name(&permission_id).map(String::from),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionWithConditionDecodedParams {
    pub where_address: Address,
    pub who: Address,
    pub permission_id: B256,
    pub permission: Option<String>,
    pub condition: Address,
}

impl ActionCall for grantCall {
    type Params = PermissionDecodedParams;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _where: params.where_address,
            _who: params.who,
            _permissionId: params.permission_id,
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(PermissionDecodedParams::new(self._where, self._who, self._permissionId))
    }
}

impl ActionCall for revokeCall {
    type Params = PermissionDecodedParams;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _where: params.where_address,
            _who: params.who,
            _permissionId: params.permission_id,
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(PermissionDecodedParams::new(self._where, self._who, self._permissionId))
    }
}

impl ActionCall for grantWithConditionCall {
    type Params = PermissionWithConditionDecodedParams;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _where: params.where_address,
            _who: params.who,
            _permissionId: params.permission_id,
            _condition: params.condition,
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        let PermissionDecodedParams {
            where_address,
            who,
            permission_id,
            permission,
        } = PermissionDecodedParams::new(self._where, self._who, self._permissionId);

        Ok(PermissionWithConditionDecodedParams {
            where_address,
            who,
            permission_id,
            permission,
            condition: self._condition,
        })
    }
}

fn checked_permission_id(permission: &str) -> Result<B256, ActionError> {
    ensure!(
        !permission.trim().is_empty(),
        ActionError::InvalidParameter("the permission name is empty".into())
    );
    Ok(permission_id(permission))
}

fn decoded(params: &GrantPermissionParams) -> Result<PermissionDecodedParams, ActionError> {
    Ok(PermissionDecodedParams::new(
        params.where_address,
        params.who,
        checked_permission_id(&params.permission)?,
    ))
}

/// `dao.grant(where, who, keccak256(permission))`
pub fn grant_action(
    dao_address: Address,
    params: &GrantPermissionParams,
) -> Result<DaoAction, ActionError> {
    encode_call::<grantCall>(dao_address, &decoded(params)?)
}

/// `dao.revoke(where, who, keccak256(permission))`
pub fn revoke_action(
    dao_address: Address,
    params: &RevokePermissionParams,
) -> Result<DaoAction, ActionError> {
    encode_call::<revokeCall>(dao_address, &decoded(params)?)
}

/// `dao.grantWithCondition(where, who, keccak256(permission), condition)`
pub fn grant_with_condition_action(
    dao_address: Address,
    params: &GrantPermissionWithConditionParams,
) -> Result<DaoAction, ActionError> {
    let permission_id = checked_permission_id(&params.permission)?;
    let params = PermissionWithConditionDecodedParams {
        where_address: params.where_address,
        who: params.who,
        permission_id,
        permission: permission_name(&permission_id).map(String::from),
        condition: params.condition,
    };

    encode_call::<grantWithConditionCall>(dao_address, &params)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_grant_action(data: &[u8]) -> Result<PermissionDecodedParams, ActionError> {
    decode_call::<grantCall>(data)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_revoke_action(data: &[u8]) -> Result<PermissionDecodedParams, ActionError> {
    decode_call::<revokeCall>(data)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_grant_with_condition_action(
    data: &[u8],
) -> Result<PermissionWithConditionDecodedParams, ActionError> {
    decode_call::<grantWithConditionCall>(data)
}
