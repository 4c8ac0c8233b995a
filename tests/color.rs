mod tests {
    use tidal_composer::color::{
        BLACK, add_colors, rgb_from_u32, sample_palette, scale_color, shift_hue,
    };
    use tidal_composer::{Rgb, hex_palette};

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0x00FF_B878), Rgb::new(0xFF, 0xB8, 0x78));
        assert_eq!(rgb_from_u32(0), BLACK);
    }

    #[test]
    fn test_hex_palette_and_sampling() {
        let palette = hex_palette![0xFF0000, 0x0000FF];
        assert_eq!(palette[0], Rgb::new(255, 0, 0));
        assert_eq!(sample_palette(&palette, 0), Rgb::new(255, 0, 0));

        let end = sample_palette(&palette, 255);
        assert!(end.b > 250 && end.r < 5);

        let middle = sample_palette(&palette, 128);
        assert!(middle.r > 100 && middle.b > 100);
    }

    #[test]
    fn test_single_and_empty_palette() {
        let single = [Rgb::new(1, 2, 3)];
        assert_eq!(sample_palette(&single, 200), Rgb::new(1, 2, 3));
        assert_eq!(sample_palette(&[], 200), BLACK);
    }

    #[test]
    fn test_scale_and_add() {
        let color = Rgb::new(200, 100, 50);
        assert_eq!(scale_color(color, 0), BLACK);
        assert_eq!(scale_color(color, 255), color);
        assert_eq!(
            add_colors(Rgb::new(200, 10, 0), Rgb::new(100, 10, 0)),
            Rgb::new(255, 20, 0)
        );
    }

    #[test]
    fn test_shift_hue() {
        let color = Rgb::new(200, 40, 40);
        assert_eq!(shift_hue(color, 0), color);

        let shifted = shift_hue(color, 12);
        assert_ne!(shifted, color);
        // Moving towards green keeps red dominant for a small shift
        assert!(shifted.r > shifted.b);
    }
}
