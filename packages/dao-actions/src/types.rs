use alloy_primitives::{Address, Bytes, Selector, U256};
use serde::{Deserialize, Serialize};

/// The envelope every encoder produces: a call to `to` carrying `value` wei and `data`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoAction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl DaoAction {
    /// A contract call that moves no native currency.
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value: U256::ZERO,
            data: data.into(),
        }
    }

    /// A plain native currency transfer.
    pub fn native_transfer(to: Address, value: U256) -> Self {
        Self {
            to,
            value,
            data: Bytes::new(),
        }
    }

    /// The first four bytes of the payload, if there are that many.
    pub fn selector(&self) -> Option<Selector> {
        (self.data.len() >= 4).then(|| Selector::from_slice(&self.data[..4]))
    }
}
