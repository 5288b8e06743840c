#![cfg(any(test, feature = "testutils"))]

use alloy_primitives::Address;

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

/// A deterministic address whose every byte is `seed`.
pub fn address_from_seed(seed: u8) -> Address {
    Address::repeat_byte(seed)
}
