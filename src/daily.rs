//! Deterministic daily target colors.
//!
//! Every calendar day gets exactly one target, identical on every
//! machine and on every call: the `"YYYY-MM-DD"` round key is hashed
//! with the classic 31-multiplier string hash in wrapping 32-bit
//! *signed* arithmetic, and the absolute value picks a hue. Saturation
//! and lightness are fixed so each day's target is a vivid,
//! medium-lightness color; only the hue moves from day to day.
//!
//! Everything up to the final RGB rounding is integer arithmetic, so
//! there is no floating-point environment to disagree about. No
//! random number generator is involved anywhere.

use chrono::Utc;
use rgb::RGB8;

use crate::{hex_string, hsl_to_rgb};

/// Saturation of every daily target.
pub const SATURATION: f64 = 0.60;
/// Lightness of every daily target.
pub const LIGHTNESS: f64 = 0.50;

/// 32-bit string hash with multiplier 31, wrapping as signed 32-bit,
/// then taken absolute.
///
/// `wrapping_mul(31)` is the same ring operation as the reference's
/// `(h << 5) - h` with `|= 0` truncation, including on overflow.
fn date_hash(key: &str) -> u32 {
    let mut hash: i32 = 0;
    for b in key.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(b));
    }
    hash.unsigned_abs()
}

/// Hue of the day, in degrees 0..360.
pub fn hue_for(key: &str) -> u16 {
    (date_hash(key) % 360) as u16
}

/// Target color for the given `"YYYY-MM-DD"` round key.
///
/// Total over arbitrary strings (the hash has no failure mode), but
/// the contract callers rely on is a UTC-normalized date key.
pub fn target(key: &str) -> RGB8 {
    hsl_to_rgb(f64::from(hue_for(key)), SATURATION, LIGHTNESS)
}

/// Target color for `key` as a `"#rrggbb"` string.
pub fn target_hex(key: &str) -> String {
    hex_string(target(key))
}

/// Today's round key: the current UTC date truncated to day
/// granularity. Read the clock once per request and pass the result
/// around; do not call this once per color.
pub fn today_key() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Target color for today (UTC).
pub fn today_target() -> RGB8 {
    target(&today_key())
}
