//! Wei, gwei and ether conversions.

use alloy_primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Wei in one gwei.
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Wei in one ether.
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// Decimal places of the native currency.
pub const ETHER_DECIMALS: u32 = 18;

/// Convert whole gwei to wei.
#[must_use]
pub const fn gwei(amount: u64) -> u128 {
    amount as u128 * WEI_PER_GWEI
}

/// Convert an ether amount to wei, truncating below one wei.
///
/// Returns `None` for negative amounts or amounts that overflow `u128`.
#[must_use]
pub fn ether_to_wei(amount: Decimal) -> Option<u128> {
    if amount.is_sign_negative() {
        return None;
    }
    amount
        .checked_mul(Decimal::from(WEI_PER_ETHER))?
        .trunc()
        .to_u128()
}

/// Convert a gwei amount to wei, truncating below one wei.
#[must_use]
pub fn gwei_to_wei(amount: Decimal) -> Option<u128> {
    if amount.is_sign_negative() {
        return None;
    }
    amount
        .checked_mul(Decimal::from(WEI_PER_GWEI as u64))?
        .trunc()
        .to_u128()
}

/// Convert wei to ether for display. Saturates at `Decimal::MAX`.
#[must_use]
pub fn wei_to_ether(wei: U256) -> Decimal {
    let int_val: u128 = wei.try_into().unwrap_or(u128::MAX);
    i128::try_from(int_val)
        .ok()
        .and_then(|v| Decimal::try_from_i128_with_scale(v, ETHER_DECIMALS).ok())
        .map_or(Decimal::MAX, |d| d.normalize())
}

/// Convert wei to gwei for display.
#[must_use]
pub fn wei_to_gwei(wei: u128) -> Decimal {
    i128::try_from(wei)
        .ok()
        .and_then(|v| Decimal::try_from_i128_with_scale(v, 9).ok())
        .map_or(Decimal::MAX, |d| d.normalize())
}
