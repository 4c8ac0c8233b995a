use crate::color::{Rgb, blend_colors};

/// Create a palette from a list of hex colors (0xRRGGBB format)
#[macro_export]
macro_rules! hex_palette {
    ($($color:expr),* $(,)?) => {
        [
            $($crate::color::rgb_from_u32($color)),*
        ]
    };
}

/// Ordered color stops spread evenly along a strip
pub type Palette = &'static [Rgb];

/// Sample a palette at position t (0-255)
#[allow(clippy::cast_possible_truncation)]
pub fn sample_palette(palette: &[Rgb], t: u8) -> Rgb {
    // Map t (0-255) across N colors (N-1 segments) with blending.
    let segments = palette.len().saturating_sub(1);
    if segments == 0 {
        return palette.first().copied().unwrap_or(Rgb { r: 0, g: 0, b: 0 });
    }

    let scaled = u16::from(t) * (segments as u16); // 0..255*(N-1)
    let segment = (scaled >> 8).min(segments.saturating_sub(1) as u16) as usize;
    let local_t = (scaled & 0xFF) as u8;

    blend_colors(palette[segment], palette[segment + 1], local_t)
}
