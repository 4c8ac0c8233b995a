//! Scalar shaping functions shared by the rendering layers
//!
//! Everything here is pure `f32` math on top of `libm`, so it runs the same
//! on the device and in host tests.

/// Maps a control value onto a unit-range factor
pub type Easing = fn(f32) -> f32;

/// Maps a control value (0-100) onto another value range
pub type ValueMapper = fn(f32) -> f32;

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp to `[0, 1]`, mapping NaN to 0
#[inline]
pub fn saturate(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Normalize a control value (0-100) to `[0, 1]`
#[inline]
pub fn unit(n: f32) -> f32 {
    saturate(n / 100.0)
}

/// Cubic ease `3x² - 2x³` on a clamped input
#[inline]
pub fn ease_cubic(x: f32) -> f32 {
    let x = saturate(x);
    x * x * (3.0 - 2.0 * x)
}

/// Identity easing on a clamped input
#[inline]
pub fn linear(x: f32) -> f32 {
    saturate(x)
}

/// Hermite smoothstep between two edges
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    ease_cubic((x - edge0) / (edge1 - edge0))
}

/// Unnormalized Gaussian bell: 1.0 at `distance == 0`
#[inline]
pub fn gaussian(distance: f32, sigma: f32) -> f32 {
    if sigma <= 0.0 {
        return 0.0;
    }
    libm::expf(-(distance * distance) / (2.0 * sigma * sigma))
}

/// Wrap `x` into `[0, period)`
#[inline]
pub fn wrap(x: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let r = libm::fmodf(x, period);
    let r = if r < 0.0 { r + period } else { r };
    // fmodf(-tiny) + period can round up to period itself
    if r >= period { 0.0 } else { r }
}

/// Shortest distance between two points on a circle of length `period`
///
/// Symmetric in `a` and `b` and always within `[0, period / 2]`.
#[inline]
pub fn cyclic_distance(a: f32, b: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let d = libm::fabsf(wrap(a, period) - wrap(b, period));
    d.min(period - d)
}

/// How far `pos` trails behind `head` when moving in the positive direction
///
/// Result is in `[0, period)`: zero at the head, growing behind it.
#[inline]
pub fn trailing_distance(head: f32, pos: f32, period: f32) -> f32 {
    wrap(head - pos, period)
}

/// Narrow mapping used for accent LEDs: 0-100 onto 20-40
pub fn function_a(n: f32) -> f32 {
    20.0 + 0.2 * unit(n) * 100.0
}

/// Full-range mapping: 0-100 onto 0-100
pub fn function_b(n: f32) -> f32 {
    unit(n) * 100.0
}
