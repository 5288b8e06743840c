//! Fixed-precision ratios.
//!
//! A ratio in `[0, 1]` travels on chain as `round(ratio * 10^digits)`.

use alloy_primitives::U256;
use dao_sdk_std::ensure;

use crate::error::EncodingError;

/// Largest integer an `f64` represents exactly, `2^53 - 1`.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Precision of the majority voting plugins (`RATIO_BASE = 10^6`).
pub const RATIO_DIGITS_MAJORITY_VOTING: u32 = 6;

/// Precision of the legacy percentage based vote configuration.
pub const RATIO_DIGITS_LEGACY: u32 = 2;

const MIN_DIGITS: u32 = 1;
const MAX_DIGITS: u32 = 15;

fn check_digits(digits: u32) -> Result<(), EncodingError> {
    ensure!(
        (MIN_DIGITS..=MAX_DIGITS).contains(&digits),
        EncodingError::DigitsOutOfRange
    );
    Ok(())
}

fn scale(digits: u32) -> u64 {
    10u64.pow(digits)
}

pub fn encode_ratio(ratio: f64, digits: u32) -> Result<u64, EncodingError> {
    ensure!((0.0..=1.0).contains(&ratio), EncodingError::RatioOutOfRange);
    check_digits(digits)?;

    // the product stays below 10^15 so the cast is exact
    Ok((ratio * scale(digits) as f64).round() as u64)
}

/// Decodes a scaled integer back into a ratio.
///
/// The scaled value may equal `10^digits` (a ratio of exactly one) but not exceed it.
pub fn decode_ratio(scaled: U256, digits: u32) -> Result<f64, EncodingError> {
    check_digits(digits)?;

    let scaled = u64::try_from(scaled).map_err(|_| EncodingError::ValueOutOfRange)?;
    ensure!(scaled <= MAX_SAFE_INTEGER, EncodingError::ValueOutOfRange);
    ensure!(scaled <= scale(digits), EncodingError::ValueOutOfRange);

    Ok(scaled as f64 / scale(digits) as f64)
}
