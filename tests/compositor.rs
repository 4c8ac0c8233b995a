mod tests {
    use embassy_time::Instant;
    use rand::{SeedableRng, rngs::SmallRng};
    use tidal_composer::compositor::{
        Compositor, LayerSample, REBOUND_OFFSET, dark_wave, rebound,
    };
    use tidal_composer::curve::ease_cubic;
    use tidal_composer::event::{EVENT_COOLDOWN, EventState};
    use tidal_composer::wave::{PERIOD, WaveEngine};

    const EPS: f32 = 1e-4;

    #[test]
    fn test_layer_composition() {
        let sample = LayerSample {
            base: 80.0,
            dark: 0.5,
            rebound: 3.0,
            turbulence: 1.0,
            event: -4.0,
        };
        assert!((sample.brightness() - 40.0).abs() < EPS);

        let bright = LayerSample {
            base: 100.0,
            rebound: 50.0,
            ..LayerSample::default()
        };
        assert_eq!(bright.brightness(), 100.0);

        let dark = LayerSample {
            base: 5.0,
            event: -28.0,
            ..LayerSample::default()
        };
        assert_eq!(dark.brightness(), 0.0);
    }

    #[test]
    fn test_overlapping_waves_combine_by_maximum() {
        let mut engine = WaveEngine::<10>::new(ease_cubic);
        engine.spawn(60.0);
        let single = dark_wave(0.0, engine.waves());
        assert!((single - engine.waves()[0].shape().depth).abs() < EPS);

        engine.spawn(60.0);
        engine.spawn(30.0);
        assert!((dark_wave(0.0, engine.waves()) - single).abs() < EPS);
        assert!((rebound(PERIOD - REBOUND_OFFSET, engine.waves())
            - engine.waves()[0].shape().gain)
            .abs()
            < EPS);
    }

    #[test]
    fn test_rebound_only_behind_the_wave() {
        let mut engine = WaveEngine::<10>::new(ease_cubic);
        engine.spawn(80.0);
        engine.advance(0.0, 0.1); // wave at 9.0
        let phase = engine.waves()[0].phase();
        assert!(rebound(phase + 3.0, engine.waves()) == 0.0);
        assert!(rebound(phase - REBOUND_OFFSET, engine.waves()) > 0.0);
        assert_eq!(rebound(phase - 8.0, engine.waves()), 0.0);
    }

    #[test]
    fn test_dark_wave_respects_wrap() {
        let mut engine = WaveEngine::<10>::new(ease_cubic);
        engine.spawn(50.0);
        engine.advance(0.0, 0.345); // wave at 20.7
        let near_seam = dark_wave(0.2, engine.waves());
        let far = dark_wave(10.0, engine.waves());
        assert!(near_seam > far);
        assert!((near_seam - dark_wave(20.2, engine.waves())).abs() < EPS);
    }

    #[test]
    fn test_compositor_without_waves_is_base_plus_noise() {
        let compositor = Compositor::default();
        let event = EventState::new();
        let now = Instant::from_millis(1_000);
        let sample = compositor.sample(4.0, 50.0, &[], &event, now);
        assert_eq!(sample.base, 50.0);
        assert_eq!(sample.dark, 0.0);
        assert_eq!(sample.rebound, 0.0);
        assert!(sample.turbulence.abs() <= 3.0 + EPS);

        let calm = compositor.sample(4.0, 0.0, &[], &event, now);
        assert_eq!(calm.brightness(), 0.0);
    }

    #[test]
    fn test_event_gated_and_cooled_down() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut event = EventState::new();
        for i in 0..2_000u64 {
            assert!(!event.tick(69.0, 0.05, Instant::from_millis(i * 50), &mut rng));
        }

        let mut last: Option<u64> = None;
        let mut triggers = 0;
        for i in 0..4_000u64 {
            let ms = i * 50;
            if event.tick(100.0, 0.05, Instant::from_millis(ms), &mut rng) {
                if let Some(previous) = last {
                    assert!(ms - previous >= EVENT_COOLDOWN.as_millis());
                }
                last = Some(ms);
                triggers += 1;
            }
        }
        assert!(triggers > 5);
    }

    #[test]
    fn test_event_sweep_darkens_and_ends() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut event = EventState::new();
        event.trigger(Instant::from_millis(0));
        assert!(event.contribution(0.0) < 0.0);
        assert!(event.contribution(10.5) <= 0.0);

        let mut steps = 0;
        while event.is_active() {
            event.tick(100.0, 0.05, Instant::from_millis(steps * 50), &mut rng);
            steps += 1;
            assert!(steps < 100);
        }
        assert_eq!(event.contribution(3.0), 0.0);
    }
}
