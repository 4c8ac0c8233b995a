mod palette;
mod utils;

pub use palette::{Palette, sample_palette};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{
    add_colors, blend_colors, hsv2rgb, rgb_from_u32, rgb2hsv, scale_color, shift_hue,
};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
