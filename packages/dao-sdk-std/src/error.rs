use thiserror::Error;

/// Validation failures raised by the shared helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input contains characters outside `[0-9a-fA-F]`.
    #[error("invalid hex string")]
    InvalidHexString,
    /// The input has an odd number of hex digits.
    #[error("the hex string has an odd number of digits")]
    OddHexLength,
    /// The input is not a `0x`-prefixed 20 byte hex address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// The input is neither an address nor an ENS name.
    #[error("invalid address or ENS name: {0}")]
    InvalidAddressOrEns(String),
    /// The ENS name could not be resolved to an address.
    #[error("cannot resolve ENS name: {0}")]
    UnresolvedEnsName(String),
    /// The value does not carry an IPFS content identifier.
    #[error("the value does not contain a valid CID: {0}")]
    InvalidCid(String),
}

/// Return with an error if a condition is not met.
///
///
/// Simplifies the pattern of checking for a condition and returning with an error.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $e:expr $(,)?) => {
        if !$cond {
            return Err($e);
        }
    };
}

// The following macros are mostly intended to serve as pseudo-documentation within tests,
// in addition to convenience/clarity

/// Assert that a [`Result`] is [`Ok`]
///
/// If the provided expresion evaulates to [`Ok`], then the
/// macro returns the value contained within the [`Ok`]. If
/// the [`Result`] is an [`Err`] then the macro will [`panic`]
/// with a message that includes the expression and the error.
#[macro_export]
macro_rules! assert_ok {
    ( $x:expr ) => {
        match $x {
            std::result::Result::Ok(v) => v,
            std::result::Result::Err(e) => {
                panic!("Error calling {}: {:?}", stringify!($x), e);
            }
        }
    };
}

/// Assert that an [`Option`] is [`Some`]
///
/// If the provided expresion evaulates to [`Some`], then the
/// macro returns the value contained within the [`Some`]. If
/// the [`Option`] is [`None`] then the macro will [`panic`]
/// with a message that includes the expression
#[macro_export]
macro_rules! assert_some {
    ( $x:expr ) => {
        match $x {
            core::option::Option::Some(s) => s,
            core::option::Option::None => {
                panic!("Expected value when calling {}, got None", stringify!($x));
            }
        }
    };
}

/// Assert that a [`Result`] is [`Err`] and matches a desired error
#[macro_export]
macro_rules! assert_err {
    ( $x:expr, $e:expr ) => {
        match $x {
            std::result::Result::Err(e) => {
                if $e != e {
                    panic!("Expected error {}, got {:?} instead", stringify!($e), e)
                }
            }
            std::result::Result::Ok(v) => {
                panic!(
                    "Expected error when calling {}, got {:?} instead",
                    stringify!($x),
                    v
                );
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::Error;

    fn even(value: u32) -> Result<u32, Error> {
        ensure!(value % 2 == 0, Error::OddHexLength);
        Ok(value)
    }

    #[test]
    fn ensure_returns_early() {
        assert_eq!(assert_ok!(even(4)), 4);
        assert_err!(even(3), Error::OddHexLength);
    }

    #[test]
    #[should_panic(expected = "Expected error")]
    fn assert_err_panics_on_other_error() {
        assert_err!(even(3), Error::InvalidHexString);
    }

    #[test]
    fn assert_some_unwraps() {
        assert_eq!(assert_some!(Some(7)), 7);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::InvalidCid("ipfs://nope".into()).to_string(),
            "the value does not contain a valid CID: ipfs://nope"
        );
        assert_eq!(
            Error::InvalidAddressOrEns("0x12".into()).to_string(),
            "invalid address or ENS name: 0x12"
        );
    }
}
