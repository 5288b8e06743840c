use std::str::FromStr;

use alloy_primitives::{aliases::U512, U256};
use dao_sdk_std::ensure;

use crate::error::EncodingError;

/// Number of flags a bitmap holds.
pub const BITMAP_CAPACITY: usize = 256;

/// Packs flags into a bitmap where bit `i` is set iff `bools[i]` is true.
pub fn bool_array_to_bitmap(bools: &[bool]) -> Result<U256, EncodingError> {
    ensure!(
        bools.len() <= BITMAP_CAPACITY,
        EncodingError::BoolArrayTooLarge
    );

    let mut bitmap = U256::ZERO;
    for (index, &set) in bools.iter().enumerate() {
        bitmap.set_bit(index, set);
    }

    Ok(bitmap)
}

pub fn bitmap_to_bool_array(bitmap: U256) -> [bool; BITMAP_CAPACITY] {
    std::array::from_fn(|index| bitmap.bit(index))
}

/// Parses a decimal or `0x` hex bitmap, as reported by indexers, rejecting
/// anything at or above `2^256`.
pub fn parse_bitmap(value: &str) -> Result<U256, EncodingError> {
    let wide = U512::from_str(value.trim())
        .map_err(|_| EncodingError::InvalidParameter(format!("{value} is not a number")))?;
    ensure!(wide.bit_len() <= 256, EncodingError::BitmapTooLarge);

    let limbs = wide.as_limbs();
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}
