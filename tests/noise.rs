mod tests {
    use tidal_composer::Instant;
    use tidal_composer::noise::{turbulence, value_noise};

    #[test]
    fn test_turbulence_is_deterministic_and_bounded() {
        let now = Instant::from_millis(12_345);
        let a = turbulence(3.5, 0.45, now, 0.8);
        let b = turbulence(3.5, 0.45, now, 0.8);
        assert_eq!(a, b);
        for i in 0..200u64 {
            let v = turbulence(i as f32 * 0.1, 0.45, Instant::from_millis(i * 37), 0.8);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_value_noise_hits_cell_values() {
        // At a cell boundary the noise equals the hashed cell value
        let right = value_noise(6 << 16);
        let almost_right = value_noise((6 << 16) - 1);
        assert!(almost_right.abs_diff(right) <= 2);
        assert_eq!(value_noise((6 << 16) + 0xFF), right);
    }
}
