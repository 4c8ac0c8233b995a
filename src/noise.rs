//! Deterministic 1D value noise
//!
//! Coordinates are 16.16 fixed point so the time axis never needs a modulo:
//! the turbulence pattern keeps moving smoothly however long the device runs.

use embassy_time::Instant;

use crate::math8::{blend8, ease_in_out_quad};

/// SplitMix64-style mixing, folded down to u32
#[inline]
pub const fn hash(x: u64) -> u32 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    #[allow(clippy::cast_possible_truncation)]
    {
        (z ^ (z >> 31)) as u32
    }
}

/// Smooth 1D value noise: input is 16.16 fixed-point position.
/// Returns 0-255.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn value_noise(pos_fp: u64) -> u8 {
    let cell = pos_fp >> 16;
    let frac = ((pos_fp >> 8) & 0xFF) as u8;

    let v0 = (hash(cell) & 0xFF) as u8;
    let v1 = (hash(cell.wrapping_add(1)) & 0xFF) as u8;

    let t = ease_in_out_quad(frac);
    blend8(v0, v1, t)
}

/// Signed noise in `[-1, 1]` sampled at `position * frequency + time * rate`
///
/// `rate` is in noise cells per second.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn turbulence(position: f32, frequency: f32, now: Instant, rate: f32) -> f32 {
    let space_fp = (position.max(0.0) * frequency.max(0.0) * 65_536.0) as u64;
    // (ms << 16) * rate / 1000, computed in two steps to keep precision
    let rate_milli = (rate.max(0.0) * 1000.0) as u64;
    let time_fp = ((now.as_millis() << 16) / 1000).wrapping_mul(rate_milli) / 1000;
    let raw = value_noise(space_fp.wrapping_add(time_fp));
    f32::from(raw) / 127.5 - 1.0
}
