use alloy_primitives::aliases::U96;
use alloy_primitives::{address, U256};
use dao_encoding::{
    big_int_to_buffer, bitmap_to_bool_array, bool_array_to_bitmap, buffer_to_big_int,
    decode_proposal_id, decode_ratio, encode_proposal_id, encode_ratio, Endian, EncodingError,
};
use dao_sdk_std::{assert_err, assert_ok};

fn sample_values() -> Vec<U256> {
    vec![
        U256::ZERO,
        U256::from(1),
        U256::from(0xff),
        U256::from(u64::MAX),
        U256::from(1) << 128,
        U256::MAX - U256::from(1),
        U256::MAX,
    ]
}

#[test]
fn buffers_round_trip_in_both_byte_orders() {
    for value in sample_values() {
        let big = assert_ok!(big_int_to_buffer(value, 32, Endian::Big));
        let little = assert_ok!(big_int_to_buffer(value, 32, Endian::Little));

        assert_eq!(assert_ok!(buffer_to_big_int(&big, Endian::Big)), value);
        assert_eq!(assert_ok!(buffer_to_big_int(&little, Endian::Little)), value);

        let mut reversed = little.clone();
        reversed.reverse();
        assert_eq!(reversed, big);
    }
}

#[test]
fn ratios_round_trip_within_precision() {
    for digits in 1..=15 {
        let tolerance = 10f64.powi(-(digits as i32));

        for step in 0..=20 {
            let ratio = f64::from(step) / 20.0;
            let scaled = assert_ok!(encode_ratio(ratio, digits));
            let decoded = assert_ok!(decode_ratio(U256::from(scaled), digits));

            assert!(
                (decoded - ratio).abs() <= tolerance,
                "{ratio} at {digits} digits came back as {decoded}"
            );
        }
    }
}

#[test]
fn ratio_ranges_are_enforced() {
    assert_err!(encode_ratio(-0.5, 4), EncodingError::RatioOutOfRange);
    assert_err!(encode_ratio(5.0, 4), EncodingError::RatioOutOfRange);
    assert_err!(encode_ratio(0.5, 18), EncodingError::DigitsOutOfRange);
    assert_err!(decode_ratio(U256::from(101), 2), EncodingError::ValueOutOfRange);
}

#[test]
fn bitmaps_keep_their_positions() {
    let mut bools = vec![false; 256];
    for index in [0, 1, 7, 64, 128, 200, 255] {
        bools[index] = true;
    }

    let bitmap = assert_ok!(bool_array_to_bitmap(&bools));
    assert_eq!(bitmap_to_bool_array(bitmap).to_vec(), bools);

    let short = assert_ok!(bool_array_to_bitmap(&[true, false, true]));
    assert_eq!(short, U256::from(0b101));

    assert_err!(bool_array_to_bitmap(&[false; 257]), EncodingError::BoolArrayTooLarge);
}

#[test]
fn proposal_ids_round_trip() {
    let plugin = address!("1234567890123456789012345678901234567890");

    for nonce in [U96::ZERO, U96::from(16), U96::MAX] {
        let id = assert_ok!(encode_proposal_id(&plugin.to_string(), nonce));
        let decoded = assert_ok!(decode_proposal_id(&id));

        assert_eq!(decoded.plugin_address, plugin);
        assert_eq!(decoded.nonce, nonce);
    }
}
