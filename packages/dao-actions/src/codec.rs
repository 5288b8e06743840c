use alloy_primitives::{Address, Selector};
use alloy_sol_types::SolCall;
use dao_sdk_std::ensure;

use crate::error::ActionError;
use crate::registry;
use crate::types::DaoAction;

/// A contract call with a typed counterpart on the SDK side.
///
/// `from_params` applies the encoding transforms (ratios, hashes, enums) and
/// `into_params` reverses them.
pub(crate) trait ActionCall: SolCall + Sized {
    type Params;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError>;

    fn into_params(self) -> Result<Self::Params, ActionError>;
}

pub(crate) fn selector_of(data: &[u8]) -> Result<Selector, ActionError> {
    ensure!(
        data.len() >= 4,
        ActionError::DataDecoding(format!(
            "the payload is {} bytes long, a selector needs 4",
            data.len()
        ))
    );

    Ok(Selector::from_slice(&data[..4]))
}

pub(crate) fn encode_call<C: ActionCall>(
    to: Address,
    params: &C::Params,
) -> Result<DaoAction, ActionError> {
    let call = C::from_params(params)?;
    Ok(DaoAction::call(to, call.abi_encode()))
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(expected = C::SIGNATURE)))]
pub(crate) fn decode_call<C: ActionCall>(data: &[u8]) -> Result<C::Params, ActionError> {
    let selector = selector_of(data)?;

    if selector.0 != C::SELECTOR {
        let received = registry::describe_selector(selector);

        debug!(%received, "payload does not match the decoder");

        return Err(ActionError::UnexpectedAction {
            expected: C::SIGNATURE,
            received,
        });
    }

    let call =
        C::abi_decode(data, true).map_err(|err| ActionError::DataDecoding(err.to_string()))?;
    call.into_params()
}
