mod tests {
    use tidal_composer::frame_scheduler::DEFAULT_FRAME_DURATION;
    use tidal_composer::{
        CommandChannel, ComposerConfig, Duration, FrameScheduler, Instant, OutputDriver, Renderer,
        Rgb, StripBounds,
    };

    #[derive(Default)]
    struct RecordingDriver {
        writes: usize,
        last_len: usize,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.writes += 1;
            self.last_len = colors.len();
        }
    }

    #[test]
    fn test_scheduler_paces_frames() {
        let channel = CommandChannel::<4>::new();
        let mut renderer = Renderer::<24, 4>::new(channel.receiver(), &ComposerConfig::default());
        renderer.add_group_strip(StripBounds::new(0, 24)).unwrap();
        let mut scheduler = FrameScheduler::new(renderer, RecordingDriver::default());

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.next_deadline, Instant::from_millis(0) + DEFAULT_FRAME_DURATION);
        assert_eq!(result.sleep_duration, DEFAULT_FRAME_DURATION);

        // Slightly late frames keep the planned cadence
        let late = result.next_deadline + Duration::from_millis(4);
        let result = scheduler.tick(late);
        assert_eq!(
            result.next_deadline,
            Instant::from_millis(0) + DEFAULT_FRAME_DURATION * 2
        );

        assert_eq!(scheduler.output().writes, 2);
        assert_eq!(scheduler.output().last_len, 24);
    }

    #[test]
    fn test_scheduler_resets_after_falling_behind() {
        let channel = CommandChannel::<4>::new();
        let renderer = Renderer::<24, 4>::new(channel.receiver(), &ComposerConfig::default());
        let mut scheduler = FrameScheduler::new(renderer, RecordingDriver::default());

        scheduler.tick(Instant::from_millis(0));
        let now = Instant::from_millis(5_000);
        let result = scheduler.tick(now);
        assert_eq!(result.next_deadline, now + DEFAULT_FRAME_DURATION);
        assert_eq!(result.sleep_duration, DEFAULT_FRAME_DURATION);

        // The stalled frame only moved the simulation by the nominal delta
        assert_eq!(scheduler.renderer().clock(), Instant::from_millis(16));
    }

    #[test]
    fn test_scheduler_accepts_custom_bridge_count() {
        let channel = CommandChannel::<4>::new();
        let mut renderer =
            Renderer::<60, 4, 1>::new(channel.receiver(), &ComposerConfig::default());
        renderer.add_bridge(StripBounds::new(0, 60)).unwrap();
        let extra = StripBounds::new(0, 10);
        assert_eq!(renderer.add_bridge(extra), Err(extra));

        let mut scheduler = FrameScheduler::new(renderer, RecordingDriver::default());
        scheduler.tick(Instant::from_millis(0));
        assert_eq!(scheduler.renderer().bridges().len(), 1);
        assert_eq!(scheduler.output().last_len, 60);
    }
}
