//! Governance token minting through the token voting plugin's token.

use alloy_primitives::{Address, U256};
use dao_sdk_std::ensure;
use serde::{Deserialize, Serialize};

use crate::abi::IGovernanceERC20::mintCall;
use crate::codec::{decode_call, encode_call, ActionCall};
use crate::error::ActionError;
use crate::types::DaoAction;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintTokenParams {
    pub address: Address,
    pub amount: U256,
}

impl ActionCall for mintCall {
    type Params = MintTokenParams;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            to: params.address,
            amount: params.amount,
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(MintTokenParams {
            address: self.to,
            amount: self.amount,
        })
    }
}

/// `token.mint(address, amount)` on the plugin's governance token.
pub fn mint_token_action(
    token_address: Address,
    params: &MintTokenParams,
) -> Result<DaoAction, ActionError> {
    ensure!(
        !params.address.is_zero(),
        ActionError::InvalidParameter("cannot mint to the zero address".into())
    );
    encode_call::<mintCall>(token_address, params)
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_mint_token_action(data: &[u8]) -> Result<MintTokenParams, ActionError> {
    decode_call::<mintCall>(data)
}
