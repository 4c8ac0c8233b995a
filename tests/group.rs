mod tests {
    use tidal_composer::color::BLACK;
    use tidal_composer::group::STRETCH_TRAVEL;
    use tidal_composer::{EndpointStretch, GroupConfig, Instant, PERIOD, StripBounds, WaveGroup};

    const EPS: f32 = 1e-4;

    fn group_of(count: u16) -> WaveGroup {
        let mut group = WaveGroup::new(&GroupConfig::default());
        let mut bounds = StripBounds::new(0, 12);
        for _ in 0..count {
            group.add_strip(bounds).unwrap();
            bounds = bounds.next(12);
        }
        group
    }

    #[test]
    fn test_strips_spread_evenly() {
        let group = group_of(3);
        let positions: Vec<f32> = group.strips().iter().map(|s| s.position()).collect();
        let step = PERIOD / 4.0;
        for (i, position) in positions.iter().enumerate() {
            assert!((position - step * (i as f32 + 1.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_edge_strips_stretch_with_control() {
        let group = group_of(3);
        let first = group.strips()[0].position();
        let last = group.strips()[2].position();

        assert_eq!(group.logical_position(0, 0.0), Some(first));
        assert_eq!(group.logical_position(2, 0.0), Some(last));

        let stretched_first = group.logical_position(0, 100.0).unwrap();
        let stretched_last = group.logical_position(2, 100.0).unwrap();
        assert!((stretched_first - (first - STRETCH_TRAVEL)).abs() < EPS);
        assert!((stretched_last - (last + STRETCH_TRAVEL)).abs() < EPS);
        assert_eq!(group.logical_position(1, 100.0), Some(group.strips()[1].position()));
        assert_eq!(group.logical_position(3, 100.0), None);
    }

    #[test]
    fn test_fixed_stretch_keeps_positions() {
        let config = GroupConfig {
            stretch: EndpointStretch::Fixed,
            ..GroupConfig::default()
        };
        let mut group: WaveGroup = WaveGroup::new(&config);
        group.add_strip(StripBounds::new(0, 12)).unwrap();
        group.add_strip(StripBounds::new(12, 12)).unwrap();
        assert_eq!(group.logical_position(0, 100.0), Some(group.strips()[0].position()));
        assert_eq!(group.logical_position(1, 100.0), Some(group.strips()[1].position()));
    }

    #[test]
    fn test_pinned_strip_keeps_position() {
        let mut group: WaveGroup = WaveGroup::new(&GroupConfig::default());
        group.add_strip_at(StripBounds::new(0, 12), 25.0).unwrap();
        assert!((group.strips()[0].position() - 4.0).abs() < EPS);

        group.add_strip(StripBounds::new(12, 12)).unwrap();
        group.add_strip(StripBounds::new(24, 12)).unwrap();
        assert!((group.strips()[0].position() - 4.0).abs() < EPS);
    }

    #[test]
    fn test_group_capacity() {
        let mut group = WaveGroup::<2, 10>::new(&GroupConfig::default());
        group.add_strip(StripBounds::new(0, 4)).unwrap();
        group.add_strip(StripBounds::new(4, 4)).unwrap();
        let extra = StripBounds::new(8, 4);
        assert_eq!(group.add_strip(extra), Err(extra));
        assert_eq!(group.strips().len(), 2);
    }

    #[test]
    fn test_waves_spawn_and_clear() {
        let mut group = group_of(2);
        group.tick(60.0, 0.016, Instant::from_millis(16));
        assert_eq!(group.engine().active_count(), 1);

        group.clear();
        assert_eq!(group.engine().active_count(), 0);
        assert!(!group.event().is_active());
    }

    #[test]
    fn test_full_control_lights_middle_zone() {
        let group = group_of(1);
        let now = Instant::from_millis(0);
        let brightness = group.brightness(0, 100.0, now).unwrap();
        assert!(brightness >= 94.0);

        let mut frame = [BLACK; 12];
        group.render(&mut frame, 100.0, now);
        assert!(frame[3..9].iter().all(|led| *led != BLACK));
        assert_eq!(frame[1], BLACK);
        assert_ne!(frame[0], BLACK);
    }

    #[test]
    fn test_strip_outside_frame_is_skipped() {
        let mut group: WaveGroup = WaveGroup::new(&GroupConfig::default());
        group.add_strip(StripBounds::new(8, 12)).unwrap();
        let mut frame = [BLACK; 10];
        group.render(&mut frame, 100.0, Instant::from_millis(0));
        assert!(frame.iter().all(|led| *led == BLACK));
    }
}
