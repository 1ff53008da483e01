mod tests {
    use myrtio_light_chase::color::{BLANK, ORANGE, RED, WHITE};
    use myrtio_light_chase::{
        Brightness, ChaseScheduler, OutputDriver, REFERENCE_BRIGHTNESS, REFERENCE_LED_COUNT, Rgb,
        SmartLedsOutput, reference_config,
    };
    use smart_leds::SmartLedsWrite;

    #[derive(Default)]
    struct MockWriter {
        written: Vec<Rgb>,
        fail: bool,
    }

    impl SmartLedsWrite for MockWriter {
        type Error = &'static str;
        type Color = Rgb;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            if self.fail {
                return Err("bus busy");
            }
            self.written = iterator.into_iter().map(Into::into).collect();
            Ok(())
        }
    }

    #[test]
    fn test_brightness_is_clamped() {
        assert_eq!(Brightness::new(150).percent(), 100);
        assert_eq!(Brightness::new(100), Brightness::FULL);
        assert_eq!(Brightness::new(30).percent(), 30);
        assert_eq!(Brightness::default(), Brightness::FULL);
    }

    #[test]
    fn test_brightness_scales_channels() {
        let dim = Brightness::new(REFERENCE_BRIGHTNESS);
        // 0x20 * 30 / 100
        assert_eq!(dim.scale(RED), Rgb::new(9, 0, 0));
        // 0x6F, 0x20
        assert_eq!(dim.scale(ORANGE), Rgb::new(33, 9, 0));
        assert_eq!(Brightness::new(0).scale(WHITE), BLANK);
        assert_eq!(Brightness::FULL.scale(ORANGE), ORANGE);
        assert_eq!(
            Brightness::new(50).scale(Rgb::new(255, 101, 1)),
            Rgb::new(127, 50, 0)
        );
    }

    #[test]
    fn test_output_scales_on_send() {
        let mut output = SmartLedsOutput::new(MockWriter::default(), Brightness::new(50));
        let leds = [Rgb::new(200, 100, 10), Rgb::new(1, 2, 3)];

        output.write(&leds);
        assert_eq!(
            output.writer().written,
            [Rgb::new(100, 50, 5), Rgb::new(0, 1, 1)]
        );
        assert_eq!(output.failed_writes(), 0);

        output.set_brightness(Brightness::FULL);
        assert_eq!(output.brightness(), Brightness::FULL);
        output.write(&leds);
        assert_eq!(output.writer().written, leds);
    }

    #[test]
    fn test_failed_writes_are_counted() {
        let writer = MockWriter {
            fail: true,
            ..MockWriter::default()
        };
        let mut output = SmartLedsOutput::new(writer, Brightness::FULL);

        output.write(&[RED; 4]);
        output.write(&[RED; 4]);
        assert_eq!(output.failed_writes(), 2);

        let writer = output.into_inner();
        assert!(writer.written.is_empty());
    }

    #[test]
    fn test_scheduler_over_smart_leds() {
        let output = SmartLedsOutput::new(
            MockWriter::default(),
            Brightness::new(REFERENCE_BRIGHTNESS),
        );
        let mut scheduler =
            ChaseScheduler::<_, REFERENCE_LED_COUNT, 3>::new(&reference_config(), output).unwrap();
        assert_eq!(scheduler.output().writer().written, [BLANK; REFERENCE_LED_COUNT]);

        scheduler.transmit_now();
        let written = &scheduler.output().writer().written;
        assert_eq!(written.len(), REFERENCE_LED_COUNT);
        assert_eq!(written[0], Rgb::new(9, 0, 0));
        // Buffer keeps the unscaled colors
        assert_eq!(scheduler.leds()[0], RED);
    }
}
