pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::{blend8, scale8},
};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Scale every channel by `scale` (0-255 = 0.0-1.0)
#[inline]
pub fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Channel-wise saturating addition
#[inline]
pub fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// Rotate the hue of a color on the 0-255 hue circle
pub fn shift_hue(color: Rgb, shift: i8) -> Rgb {
    if shift == 0 {
        return color;
    }
    let mut hsv = rgb2hsv(color);
    hsv.hue = hsv.hue.wrapping_add_signed(shift);
    hsv2rgb(hsv)
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Convert RGB to HSV (all channels are 0-255).
///
/// Hue is represented on a 0-255 circle, matching `smart_leds::hsv::Hsv`.
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r;
    let g = rgb.g;
    let b = rgb.b;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max.wrapping_sub(min);

    let val = max;

    let sat = if max == 0 {
        0
    } else {
        ((u16::from(delta) * 255) / u16::from(max)) as u8
    };

    // 0, 85, 171 offsets for the R/G/B sectors
    let hue = if delta == 0 {
        0
    } else if max == r {
        let h = (43i16 * (i16::from(g) - i16::from(b))) / i16::from(delta);
        if h < 0 { (h + 256) as u8 } else { h as u8 }
    } else if max == g {
        let h = 85i16 + (43i16 * (i16::from(b) - i16::from(r))) / i16::from(delta);
        if h < 0 { (h + 256) as u8 } else { h as u8 }
    } else {
        let h = 171i16 + (43i16 * (i16::from(r) - i16::from(g))) / i16::from(delta);
        if h < 0 { (h + 256) as u8 } else { h as u8 }
    };

    Hsv { hue, sat, val }
}
