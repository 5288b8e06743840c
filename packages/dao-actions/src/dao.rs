//! Actions that target the DAO contract itself: metadata, URIs, callbacks,
//! upgrades and the DAO's own withdraw function.

use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use dao_sdk_std::{ensure, multi_uri::resolve_ipfs_cid, AddressExt};
use serde::{Deserialize, Serialize};

use crate::abi::IDAO::{
    initializeFromCall, registerStandardCallbackCall, setDaoURICall, setMetadataCall,
    setSignatureValidatorCall, upgradeToAndCallCall, upgradeToCall, withdrawCall,
};
use crate::codec::{decode_call, encode_call, ActionCall};
use crate::error::ActionError;
use crate::types::DaoAction;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStandardCallbackParams {
    pub interface_id: FixedBytes<4>,
    pub callback_selector: FixedBytes<4>,
    pub magic_number: FixedBytes<4>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeToAndCallParams {
    pub implementation_address: Address,
    pub data: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeFromParams {
    /// `[major, minor, patch]` of the protocol the DAO upgrades from.
    pub previous_version: [u8; 3],
    pub init_data: Bytes,
}

/// A withdrawal through the DAO's `withdraw` function. A missing token
/// address withdraws the native currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawParams {
    #[serde(default)]
    pub token_address: Option<Address>,
    pub recipient_address: Address,
    pub amount: U256,
    pub reference: String,
}

impl ActionCall for setMetadataCall {
    type Params = String;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _metadata: Bytes::copy_from_slice(params.as_bytes()),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        String::from_utf8(self._metadata.to_vec())
            .map_err(|_| ActionError::DataDecoding("the metadata is not valid UTF-8".into()))
    }
}

impl ActionCall for setDaoURICall {
    type Params = String;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            newDaoURI: params.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(self.newDaoURI)
    }
}

impl ActionCall for registerStandardCallbackCall {
    type Params = RegisterStandardCallbackParams;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _interfaceId: params.interface_id,
            _callbackSelector: params.callback_selector,
            _magicNumber: params.magic_number,
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(RegisterStandardCallbackParams {
            interface_id: self._interfaceId,
            callback_selector: self._callbackSelector,
            magic_number: self._magicNumber,
        })
    }
}

impl ActionCall for setSignatureValidatorCall {
    type Params = Address;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _signatureValidator: *params,
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(self._signatureValidator)
    }
}

impl ActionCall for upgradeToCall {
    type Params = Address;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            newImplementation: *params,
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(self.newImplementation)
    }
}

impl ActionCall for upgradeToAndCallCall {
    type Params = UpgradeToAndCallParams;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            newImplementation: params.implementation_address,
            data: params.data.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(UpgradeToAndCallParams {
            implementation_address: self.newImplementation,
            data: self.data,
        })
    }
}

impl ActionCall for initializeFromCall {
    type Params = InitializeFromParams;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _previousProtocolVersion: params.previous_version,
            _initData: params.init_data.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(InitializeFromParams {
            previous_version: self._previousProtocolVersion,
            init_data: self._initData,
        })
    }
}

impl ActionCall for withdrawCall {
    type Params = WithdrawParams;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _token: params.token_address.unwrap_or(Address::ZERO),
            _to: params.recipient_address,
            _amount: params.amount,
            _reference: params.reference.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(WithdrawParams {
            token_address: self._token.non_zero(),
            recipient_address: self._to,
            amount: self._amount,
            reference: self._reference,
        })
    }
}

fn ensure_non_zero(address: Address, what: &str) -> Result<(), ActionError> {
    ensure!(
        !address.is_zero(),
        ActionError::InvalidParameter(format!("the {what} address is zero"))
    );

    Ok(())
}

/// `dao.setMetadata(bytes(uri))`. The URI has to reference IPFS content.
pub fn update_dao_metadata_action(
    dao_address: Address,
    metadata_uri: &str,
) -> Result<DaoAction, ActionError> {
    resolve_ipfs_cid(metadata_uri)?;
    encode_call::<setMetadataCall>(dao_address, &metadata_uri.to_string())
}

/// Returns the metadata URI carried by a `setMetadata` payload.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_update_dao_metadata_raw_action(data: &[u8]) -> Result<String, ActionError> {
    decode_call::<setMetadataCall>(data)
}

/// Returns the IPFS CID of the metadata a `setMetadata` payload points to.
pub fn decode_update_dao_metadata_cid(data: &[u8]) -> Result<String, ActionError> {
    let uri = decode_update_dao_metadata_raw_action(data)?;
    Ok(resolve_ipfs_cid(&uri)?)
}

pub fn set_dao_uri_action(dao_address: Address, dao_uri: &str) -> Result<DaoAction, ActionError> {
    encode_call::<setDaoURICall>(dao_address, &dao_uri.to_string())
}

pub fn decode_set_dao_uri_action(data: &[u8]) -> Result<String, ActionError> {
    decode_call::<setDaoURICall>(data)
}

pub fn register_standard_callback_action(
    dao_address: Address,
    params: &RegisterStandardCallbackParams,
) -> Result<DaoAction, ActionError> {
    encode_call::<registerStandardCallbackCall>(dao_address, params)
}

pub fn decode_register_standard_callback_action(
    data: &[u8],
) -> Result<RegisterStandardCallbackParams, ActionError> {
    decode_call::<registerStandardCallbackCall>(data)
}

pub fn set_signature_validator_action(
    dao_address: Address,
    validator: Address,
) -> Result<DaoAction, ActionError> {
    encode_call::<setSignatureValidatorCall>(dao_address, &validator)
}

pub fn decode_set_signature_validator_action(data: &[u8]) -> Result<Address, ActionError> {
    decode_call::<setSignatureValidatorCall>(data)
}

pub fn upgrade_to_action(
    dao_address: Address,
    implementation_address: Address,
) -> Result<DaoAction, ActionError> {
    ensure_non_zero(implementation_address, "implementation")?;
    encode_call::<upgradeToCall>(dao_address, &implementation_address)
}

pub fn decode_upgrade_to_action(data: &[u8]) -> Result<Address, ActionError> {
    decode_call::<upgradeToCall>(data)
}

pub fn upgrade_to_and_call_action(
    dao_address: Address,
    params: &UpgradeToAndCallParams,
) -> Result<DaoAction, ActionError> {
    ensure_non_zero(params.implementation_address, "implementation")?;
    encode_call::<upgradeToAndCallCall>(dao_address, params)
}

pub fn decode_upgrade_to_and_call_action(
    data: &[u8],
) -> Result<UpgradeToAndCallParams, ActionError> {
    decode_call::<upgradeToAndCallCall>(data)
}

pub fn initialize_from_action(
    dao_address: Address,
    params: &InitializeFromParams,
) -> Result<DaoAction, ActionError> {
    encode_call::<initializeFromCall>(dao_address, params)
}

pub fn decode_initialize_from_action(data: &[u8]) -> Result<InitializeFromParams, ActionError> {
    decode_call::<initializeFromCall>(data)
}

/// `dao.withdraw(token, to, amount, reference)`
pub fn withdraw_action(
    dao_address: Address,
    params: &WithdrawParams,
) -> Result<DaoAction, ActionError> {
    ensure_non_zero(params.recipient_address, "recipient")?;
    encode_call::<withdrawCall>(dao_address, params)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_withdraw_action(data: &[u8]) -> Result<WithdrawParams, ActionError> {
    decode_call::<withdrawCall>(data)
}
