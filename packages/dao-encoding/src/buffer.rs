use alloy_primitives::U256;
use dao_sdk_std::ensure;

use crate::error::EncodingError;

/// Byte order of a fixed-width integer buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

pub const MAX_WIDTH: usize = 32;

/// Encodes a non-negative integer into exactly `width` bytes.
///
/// Fails with [`EncodingError::InvalidParameter`] for negative inputs, for a
/// `width` outside `1..=32`, or when the value needs more than `width` bytes.
pub fn big_int_to_buffer<N>(
    value: N,
    width: usize,
    endian: Endian,
) -> Result<Vec<u8>, EncodingError>
where
    N: TryInto<U256>,
{
    ensure!(
        (1..=MAX_WIDTH).contains(&width),
        EncodingError::InvalidParameter(format!("width {width} is outside 1..=32"))
    );

    let value: U256 = value
        .try_into()
        .map_err(|_| EncodingError::InvalidParameter("the value is negative or too large".into()))?;
    ensure!(
        value.byte_len() <= width,
        EncodingError::InvalidParameter(format!("{value} does not fit in {width} bytes"))
    );

    let be = value.to_be_bytes::<MAX_WIDTH>();
    let mut buffer = be[MAX_WIDTH - width..].to_vec();
    if endian == Endian::Little {
        buffer.reverse();
    }

    Ok(buffer)
}

/// Reads an unsigned magnitude of any length that fits in 256 bits.
pub fn buffer_to_big_int(buffer: &[u8], endian: Endian) -> Result<U256, EncodingError> {
    let value = match endian {
        Endian::Big => U256::try_from_be_slice(buffer),
        Endian::Little => U256::try_from_le_slice(buffer),
    };

    value.ok_or_else(|| {
        EncodingError::InvalidParameter(format!("{} bytes do not fit in 256 bits", buffer.len()))
    })
}
