mod tests {
    use tidal_composer::curve::{
        cyclic_distance, ease_cubic, function_a, function_b, linear, smoothstep,
        trailing_distance, wrap,
    };

    const EPS: f32 = 1e-4;

    #[test]
    fn test_cyclic_distance_symmetric_and_bounded() {
        let periods = [1.0f32, 7.5, 21.0, 100.0];
        for &period in &periods {
            for i in -40..=40 {
                for j in -40..=40 {
                    let a = i as f32 * 0.37;
                    let b = j as f32 * 0.53;
                    let ab = cyclic_distance(a, b, period);
                    let ba = cyclic_distance(b, a, period);
                    assert!((ab - ba).abs() < EPS, "{a} {b} {period}");
                    assert!(ab >= 0.0);
                    assert!(ab <= period / 2.0 + EPS);
                }
            }
        }
    }

    #[test]
    fn test_cyclic_distance_wraps_at_endpoints() {
        assert!((cyclic_distance(0.1, 20.9, 21.0) - 0.2).abs() < EPS);
        assert!(cyclic_distance(0.0, 21.0, 21.0) < EPS);
        assert!((cyclic_distance(0.0, 10.5, 21.0) - 10.5).abs() < EPS);
    }

    #[test]
    fn test_trailing_distance() {
        assert!((trailing_distance(5.0, 3.0, 21.0) - 2.0).abs() < EPS);
        // Ahead of the head means almost a full lap behind
        assert!((trailing_distance(5.0, 6.0, 21.0) - 20.0).abs() < EPS);
        assert!((trailing_distance(0.5, 20.0, 21.0) - 1.5).abs() < EPS);
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_cubic(0.0), 0.0);
        assert_eq!(ease_cubic(1.0), 1.0);
        assert!((ease_cubic(0.5) - 0.5).abs() < EPS);
        assert_eq!(linear(2.0), 1.0);
        assert_eq!(smoothstep(10.0, 20.0, 5.0), 0.0);
        assert_eq!(smoothstep(10.0, 20.0, 25.0), 1.0);
    }

    #[test]
    fn test_mapping_functions() {
        assert!((function_a(0.0) - 20.0).abs() < EPS);
        assert!((function_a(50.0) - 30.0).abs() < EPS);
        assert!((function_a(100.0) - 40.0).abs() < EPS);
        assert!((function_b(42.0) - 42.0).abs() < EPS);
        assert_eq!(function_b(-5.0), 0.0);
        assert_eq!(function_b(250.0), 100.0);
    }

    #[test]
    fn test_wrap_handles_negative_input() {
        assert!((wrap(-1.0, 21.0) - 20.0).abs() < EPS);
        assert!(wrap(21.0, 21.0).abs() < EPS);
    }

    #[test]
    fn test_smoothstep_degenerate_edges() {
        assert_eq!(smoothstep(2.0, 2.0, 1.0), 0.0);
        assert_eq!(smoothstep(2.0, 2.0, 3.0), 1.0);
    }

    #[test]
    fn test_mappings_clamp_input() {
        assert_eq!(function_a(-10.0), 20.0);
        assert_eq!(function_a(150.0), 40.0);
        assert_eq!(function_b(f32::NAN), 0.0);
    }
}
