use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("the ratio value should range between 0 and 1")]
    RatioOutOfRange,
    #[error("the number of digits should range between 1 and 15")]
    DigitsOutOfRange,
    #[error("the value is out of range")]
    ValueOutOfRange,
    #[error("the array is too big")]
    BoolArrayTooLarge,
    #[error("the bitmap value is too big")]
    BitmapTooLarge,
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid proposal ID: {0}")]
    InvalidProposalId(String),
}
