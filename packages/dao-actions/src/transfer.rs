//! Withdrawals executed by the DAO as plain calls: native currency and the
//! ERC-20, ERC-721 and ERC-1155 token standards.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use dao_sdk_std::ensure;
use serde::{Deserialize, Serialize};

use crate::abi::{IERC1155, IERC20, IERC721};
use crate::codec::{decode_call, encode_call, selector_of, ActionCall};
use crate::error::ActionError;
use crate::registry;
use crate::types::DaoAction;

const ANY_TRANSFER: &str = "a token transfer";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TransferParams {
    Native {
        recipient_address: Address,
        amount: U256,
    },
    Erc20 {
        token_address: Address,
        recipient_address: Address,
        amount: U256,
    },
    Erc721 {
        token_address: Address,
        /// The current owner, usually the DAO.
        from: Address,
        recipient_address: Address,
        token_id: U256,
    },
    /// `safeBatchTransferFrom` when `batch` is set, otherwise `safeTransferFrom`
    /// with exactly one id.
    Erc1155 {
        token_address: Address,
        from: Address,
        recipient_address: Address,
        token_ids: Vec<U256>,
        amounts: Vec<U256>,
        /// Forwarded to the recipient's `onERC1155Received` hook.
        #[serde(default)]
        data: Bytes,
        #[serde(default)]
        batch: bool,
    },
}

impl TransferParams {
    pub const fn recipient_address(&self) -> Address {
        match self {
            Self::Native {
                recipient_address, ..
            }
            | Self::Erc20 {
                recipient_address, ..
            }
            | Self::Erc721 {
                recipient_address, ..
            }
            | Self::Erc1155 {
                recipient_address, ..
            } => *recipient_address,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Erc1155Transfer {
    from: Address,
    to: Address,
    ids: Vec<U256>,
    amounts: Vec<U256>,
    data: Bytes,
}

impl ActionCall for IERC20::transferCall {
    type Params = (Address, U256);

    fn from_params(&(to, amount): &Self::Params) -> Result<Self, ActionError> {
        Ok(Self { to, amount })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok((self.to, self.amount))
    }
}

impl ActionCall for IERC721::safeTransferFromCall {
    type Params = (Address, Address, U256);

    fn from_params(&(from, to, token_id): &Self::Params) -> Result<Self, ActionError> {
        Ok(Self { from, to, tokenId: token_id })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok((self.from, self.to, self.tokenId))
    }
}

impl ActionCall for IERC1155::safeTransferFromCall {
    type Params = Erc1155Transfer;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        let (&[id], &[amount]) = (params.ids.as_slice(), params.amounts.as_slice()) else {
            return Err(ActionError::InvalidParameter(
                "a single ERC-1155 transfer carries exactly one id".into(),
            ));
        };

        Ok(Self {
            from: params.from,
            to: params.to,
            id,
            amount,
            data: params.data.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        Ok(Erc1155Transfer {
            from: self.from,
            to: self.to,
            ids: vec![self.id],
            amounts: vec![self.amount],
            data: self.data,
        })
    }
}

impl ActionCall for IERC1155::safeBatchTransferFromCall {
    type Params = Erc1155Transfer;

    fn from_params(params: &Self::Params) -> Result<Self, ActionError> {
        Ok(Self {
            from: params.from,
            to: params.to,
            ids: params.ids.clone(),
            amounts: params.amounts.clone(),
            data: params.data.clone(),
        })
    }

    fn into_params(self) -> Result<Self::Params, ActionError> {
        ensure!(
            self.ids.len() == self.amounts.len(),
            ActionError::DataDecoding(format!(
                "{} token ids but {} amounts",
                self.ids.len(),
                self.amounts.len()
            ))
        );

        Ok(Erc1155Transfer {
            from: self.from,
            to: self.to,
            ids: self.ids,
            amounts: self.amounts,
            data: self.data,
        })
    }
}

/// Builds the call that moves funds out of the DAO.
///
/// Native transfers carry the amount as `value` and no payload, token
/// transfers target the token contract.
pub fn transfer_action(params: &TransferParams) -> Result<DaoAction, ActionError> {
    ensure!(
        !params.recipient_address().is_zero(),
        ActionError::InvalidParameter("the recipient address is zero".into())
    );

    match params {
        TransferParams::Native {
            recipient_address,
            amount,
        } => Ok(DaoAction::native_transfer(*recipient_address, *amount)),
        TransferParams::Erc20 {
            token_address,
            recipient_address,
            amount,
        } => encode_call::<IERC20::transferCall>(*token_address, &(*recipient_address, *amount)),
        TransferParams::Erc721 {
            token_address,
            from,
            recipient_address,
            token_id,
        } => encode_call::<IERC721::safeTransferFromCall>(
            *token_address,
            &(*from, *recipient_address, *token_id),
        ),
        TransferParams::Erc1155 {
            token_address,
            from,
            recipient_address,
            token_ids,
            amounts,
            data,
            batch,
        } => {
            ensure!(
                !token_ids.is_empty(),
                ActionError::InvalidParameter("no ERC-1155 token ids".into())
            );
            ensure!(
                token_ids.len() == amounts.len(),
                ActionError::InvalidParameter(format!(
                    "{} token ids but {} amounts",
                    token_ids.len(),
                    amounts.len()
                ))
            );

            let transfer = Erc1155Transfer {
                from: *from,
                to: *recipient_address,
                ids: token_ids.clone(),
                amounts: amounts.clone(),
                data: data.clone(),
            };

            if *batch {
                encode_call::<IERC1155::safeBatchTransferFromCall>(*token_address, &transfer)
            } else {
                encode_call::<IERC1155::safeTransferFromCall>(*token_address, &transfer)
            }
        }
    }
}

fn erc1155(token_address: Address, transfer: Erc1155Transfer, batch: bool) -> TransferParams {
    TransferParams::Erc1155 {
        token_address,
        from: transfer.from,
        recipient_address: transfer.to,
        token_ids: transfer.ids,
        amounts: transfer.amounts,
        data: transfer.data,
        batch,
    }
}

/// Recovers a transfer from an action's `to`, `value` and `data`.
///
/// An empty payload is a native transfer. Otherwise the payload must call
/// one of the supported token standards.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(%to)))]
pub fn decode_transfer_action(
    to: Address,
    value: U256,
    data: &[u8],
) -> Result<TransferParams, ActionError> {
    if data.is_empty() {
        return Ok(TransferParams::Native {
            recipient_address: to,
            amount: value,
        });
    }

    let selector = selector_of(data)?;

    if selector.0 == IERC20::transferCall::SELECTOR {
        let (recipient_address, amount) = decode_call::<IERC20::transferCall>(data)?;
        Ok(TransferParams::Erc20 {
            token_address: to,
            recipient_address,
            amount,
        })
    } else if selector.0 == IERC721::safeTransferFromCall::SELECTOR {
        let (from, recipient_address, token_id) =
            decode_call::<IERC721::safeTransferFromCall>(data)?;
        Ok(TransferParams::Erc721 {
            token_address: to,
            from,
            recipient_address,
            token_id,
        })
    } else if selector.0 == IERC1155::safeTransferFromCall::SELECTOR {
        decode_call::<IERC1155::safeTransferFromCall>(data)
            .map(|transfer| erc1155(to, transfer, false))
    } else if selector.0 == IERC1155::safeBatchTransferFromCall::SELECTOR {
        decode_call::<IERC1155::safeBatchTransferFromCall>(data)
            .map(|transfer| erc1155(to, transfer, true))
    } else {
        let received = registry::describe_selector(selector);

        debug!(%received, "payload is not a token transfer");

        Err(ActionError::UnexpectedAction {
            expected: ANY_TRANSFER,
            received,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use dao_sdk_std::{assert_err, assert_ok};
    use hex_literal::hex;

    const DAO: Address = address!("00000000000000000000000000000000000000da");
    const TOKEN: Address = address!("2222222222222222222222222222222222222222");
    const RECIPIENT: Address = address!("1234567890123456789012345678901234567890");

    fn round_trip(params: TransferParams) -> DaoAction {
        let action = assert_ok!(transfer_action(&params));
        assert_eq!(
            assert_ok!(decode_transfer_action(action.to, action.value, &action.data)),
            params
        );
        action
    }

    #[test]
    fn native_transfers_carry_value() {
        let action = round_trip(TransferParams::Native {
            recipient_address: RECIPIENT,
            amount: U256::from(1_000),
        });

        assert_eq!(action.to, RECIPIENT);
        assert_eq!(action.value, U256::from(1_000));
        assert!(action.data.is_empty());
    }

    #[test]
    fn erc20_transfer_layout() {
        let action = round_trip(TransferParams::Erc20 {
            token_address: TOKEN,
            recipient_address: RECIPIENT,
            amount: U256::from(10),
        });

        assert_eq!(action.to, TOKEN);
        assert_eq!(action.value, U256::ZERO);
        assert_eq!(
            action.data.as_ref(),
            hex!(
                "a9059cbb"
                "0000000000000000000000001234567890123456789012345678901234567890"
                "000000000000000000000000000000000000000000000000000000000000000a"
            )
        );
    }

    #[test]
    fn erc721_transfer() {
        let action = round_trip(TransferParams::Erc721 {
            token_address: TOKEN,
            from: DAO,
            recipient_address: RECIPIENT,
            token_id: U256::from(7),
        });

        assert_eq!(action.selector(), Some(hex!("42842e0e").into()));
    }

    fn erc1155(ids: &[u64], amounts: &[u64], data: &[u8], batch: bool) -> TransferParams {
        TransferParams::Erc1155 {
            token_address: TOKEN,
            from: DAO,
            recipient_address: RECIPIENT,
            token_ids: ids.iter().copied().map(U256::from).collect(),
            amounts: amounts.iter().copied().map(U256::from).collect(),
            data: Bytes::from(data.to_vec()),
            batch,
        }
    }

    #[test]
    fn erc1155_single_and_batch_selectors() {
        let single = round_trip(erc1155(&[1], &[5], &[], false));
        assert_eq!(single.selector(), Some(hex!("f242432a").into()));

        let batch = round_trip(erc1155(&[1, 2], &[5, 6], &[], true));
        assert_eq!(batch.selector(), Some(hex!("2eb2c2d6").into()));
    }

    #[test]
    fn erc1155_keeps_callback_data() {
        let action = round_trip(erc1155(&[1], &[5], &hex!("deadbeef"), false));

        assert_eq!(
            action.data.as_ref(),
            hex!(
                "f242432a"
                "00000000000000000000000000000000000000000000000000000000000000da"
                "0000000000000000000000001234567890123456789012345678901234567890"
                "0000000000000000000000000000000000000000000000000000000000000001"
                "0000000000000000000000000000000000000000000000000000000000000005"
                "00000000000000000000000000000000000000000000000000000000000000a0"
                "0000000000000000000000000000000000000000000000000000000000000004"
                "deadbeef00000000000000000000000000000000000000000000000000000000"
            )
        );

        round_trip(erc1155(&[1, 2], &[5, 6], &hex!("deadbeef"), true));
    }

    #[test]
    fn erc1155_batch_of_one_stays_a_batch() {
        let params = erc1155(&[1], &[5], &[], true);
        let action = round_trip(params.clone());

        assert_eq!(action.selector(), Some(hex!("2eb2c2d6").into()));
        assert_eq!(
            assert_ok!(transfer_action(&params)).data,
            action.data,
            "re-encoding keeps the batch selector"
        );
    }

    #[test]
    fn erc1155_rejects_bad_id_lists() {
        assert_err!(
            transfer_action(&erc1155(&[1, 2], &[5], &[], true)),
            ActionError::InvalidParameter("2 token ids but 1 amounts".into())
        );
        assert_err!(
            transfer_action(&erc1155(&[], &[], &[], true)),
            ActionError::InvalidParameter("no ERC-1155 token ids".into())
        );
        assert_err!(
            transfer_action(&erc1155(&[1, 2], &[5, 6], &[], false)),
            ActionError::InvalidParameter(
                "a single ERC-1155 transfer carries exactly one id".into()
            )
        );
    }

    #[test]
    fn zero_recipient_is_rejected() {
        assert_err!(
            transfer_action(&TransferParams::Native {
                recipient_address: Address::ZERO,
                amount: U256::from(1),
            }),
            ActionError::InvalidParameter("the recipient address is zero".into())
        );
    }

    #[test]
    fn other_calls_are_unexpected() {
        let mint = hex!(
            "40c10f19"
            "0000000000000000000000001234567890123456789012345678901234567890"
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000"
        );

        assert_err!(
            decode_transfer_action(TOKEN, U256::ZERO, &mint),
            ActionError::UnexpectedAction {
                expected: ANY_TRANSFER,
                received: "mint(address,uint256)".into(),
            }
        );
    }

    #[test]
    fn serializes_with_a_type_tag() {
        let params = TransferParams::Erc20 {
            token_address: TOKEN,
            recipient_address: RECIPIENT,
            amount: U256::from(1),
        };
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["type"], "erc20");
        assert_eq!(json["tokenAddress"], "0x2222222222222222222222222222222222222222");
        assert_eq!(serde_json::from_value::<TransferParams>(json).unwrap(), params);
    }

    #[test]
    fn erc1155_json_defaults_to_a_single_transfer_without_data() {
        let json = serde_json::json!({
            "type": "erc1155",
            "tokenAddress": TOKEN,
            "from": DAO,
            "recipientAddress": RECIPIENT,
            "tokenIds": ["0x1"],
            "amounts": ["0x5"],
        });

        assert_eq!(
            serde_json::from_value::<TransferParams>(json).unwrap(),
            erc1155(&[1], &[5], &[], false)
        );
    }
}
