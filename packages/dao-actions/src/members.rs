//! Membership changes for the address-list voting and multisig plugins.

use alloy_primitives::Address;
use dao_sdk_std::ensure;

use crate::abi::IMembership::{addAddressesCall, removeAddressesCall};
use crate::codec::{decode_call, encode_call, ActionCall};
use crate::error::ActionError;
use crate::types::DaoAction;

impl ActionCall for addAddressesCall {
    type Params = Vec<Address>;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _members: params.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(self._members)
    }
}

impl ActionCall for removeAddressesCall {
    type Params = Vec<Address>;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            _members: params.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(self._members)
    }
}

pub(crate) fn ensure_members(members: &[Address]) -> Result<(), ActionError> {
    ensure!(
        !members.is_empty(),
        ActionError::InvalidParameter("the member list is empty".into())
    );
    ensure!(
        members.iter().all(|member| !member.is_zero()),
        ActionError::InvalidParameter("the member list contains the zero address".into())
    );
    Ok(())
}

pub fn add_addresses_action(
    plugin_address: Address,
    members: &[Address],
) -> Result<DaoAction, ActionError> {
    ensure_members(members)?;
    encode_call::<addAddressesCall>(plugin_address, &members.to_vec())
}

pub fn remove_addresses_action(
    plugin_address: Address,
    members: &[Address],
) -> Result<DaoAction, ActionError> {
    ensure_members(members)?;
    encode_call::<removeAddressesCall>(plugin_address, &members.to_vec())
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_add_addresses_action(data: &[u8]) -> Result<Vec<Address>, ActionError> {
    decode_call::<addAddressesCall>(data)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_remove_addresses_action(data: &[u8]) -> Result<Vec<Address>, ActionError> {
    decode_call::<removeAddressesCall>(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use dao_sdk_std::{assert_err, assert_ok, testutils::address_from_seed};
    use hex_literal::hex;

    const PLUGIN: Address = address!("3333333333333333333333333333333333333333");

    #[test]
    fn add_addresses_layout() {
        let members = vec![address_from_seed(0x11), address_from_seed(0x22)];
        let action = assert_ok!(add_addresses_action(PLUGIN, &members));

        assert_eq!(
            action.data.as_ref(),
            hex!(
                "3628731c"
                "0000000000000000000000000000000000000000000000000000000000000020"
                "0000000000000000000000000000000000000000000000000000000000000002"
                "0000000000000000000000001111111111111111111111111111111111111111"
                "0000000000000000000000002222222222222222222222222222222222222222"
            )
        );
        assert_eq!(assert_ok!(decode_add_addresses_action(&action.data)), members);
    }

    #[test]
    fn remove_round_trip() {
        let members = vec![address_from_seed(0x44)];
        let action = assert_ok!(remove_addresses_action(PLUGIN, &members));

        assert_eq!(assert_ok!(decode_remove_addresses_action(&action.data)), members);
    }

    #[test]
    fn add_and_remove_are_not_interchangeable() {
        let action = assert_ok!(add_addresses_action(PLUGIN, &[address_from_seed(0x11)]));

        assert_err!(
            decode_remove_addresses_action(&action.data),
            ActionError::UnexpectedAction {
                expected: "removeAddresses(address[])",
                received: "addAddresses(address[])".into(),
            }
        );
    }

    #[test]
    fn empty_member_lists_are_rejected() {
        assert_err!(
            add_addresses_action(PLUGIN, &[]),
            ActionError::InvalidParameter("the member list is empty".into())
        );
        assert_err!(
            remove_addresses_action(PLUGIN, &[Address::ZERO]),
            ActionError::InvalidParameter("the member list contains the zero address".into())
        );
    }
}
