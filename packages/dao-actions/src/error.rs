use dao_encoding::EncodingError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// A field is missing, empty or outside its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("invalid address or ENS name: {0}")]
    InvalidAddressOrEns(String),
    #[error("the value does not contain a valid CID: {0}")]
    InvalidCid(String),
    /// A function signature could not be parsed.
    #[error("invalid function signature: {0}")]
    InvalidSignature(String),
    /// Two different signatures hash to the same selector.
    #[error("{first} and {second} share the selector {selector}")]
    SelectorCollision {
        selector: String,
        first: String,
        second: String,
    },
    /// No known function matches the payload, or its arguments are malformed.
    #[error("cannot decode data: {0}")]
    DataDecoding(String),
    /// The payload calls a function other than the one the decoder handles.
    #[error("the received action is different from the expected one: expected {expected}, received {received}")]
    UnexpectedAction {
        expected: &'static str,
        received: String,
    },
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl From<dao_sdk_std::Error> for ActionError {
    fn from(err: dao_sdk_std::Error) -> Self {
        use dao_sdk_std::Error;

        match err {
            Error::InvalidCid(value) => Self::InvalidCid(value),
            Error::InvalidAddress(value)
            | Error::InvalidAddressOrEns(value)
            | Error::UnresolvedEnsName(value) => Self::InvalidAddressOrEns(value),
            other @ (Error::InvalidHexString | Error::OddHexLength) => {
                Self::InvalidParameter(other.to_string())
            }
        }
    }
}
