//! `0x`-prefixed hex string helpers.

use std::borrow::Cow;

use crate::ensure;
use crate::error::Error;

/// Removes a leading `0x`, if any.
pub fn strip_0x(value: &str) -> &str {
    value.strip_prefix("0x").unwrap_or(value)
}

/// Prepends `0x` unless the value already carries it.
pub fn ensure_0x(value: &str) -> Cow<'_, str> {
    if value.starts_with("0x") {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("0x{value}"))
    }
}

/// Parses a hex string, with or without the `0x` prefix, into bytes.
///
/// An empty string and a bare `0x` both yield an empty buffer.
pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>, Error> {
    let digits = strip_0x(value);
    if digits.is_empty() {
        return Ok(Vec::new());
    }

    ensure!(
        digits.bytes().all(|b| b.is_ascii_hexdigit()),
        Error::InvalidHexString
    );
    ensure!(digits.len() % 2 == 0, Error::OddHexLength);

    ::hex::decode(digits).map_err(|_| Error::InvalidHexString)
}

/// Lowercase hex rendering of `bytes`, `0x`-prefixed unless `skip_0x` is set.
pub fn bytes_to_hex(bytes: &[u8], skip_0x: bool) -> String {
    let digits = ::hex::encode(bytes);
    if skip_0x {
        digits
    } else {
        format!("0x{digits}")
    }
}
