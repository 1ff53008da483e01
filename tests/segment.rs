mod tests {
    use myrtio_light_chase::{Direction, Rgb, Segment, SegmentBounds, Step};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const MARKER: Rgb = Rgb { r: 1, g: 2, b: 3 };

    fn red_chase(start: u16, end: u16, direction: Direction) -> Segment {
        Segment::new(SegmentBounds::new(start, end), direction, RED, BLACK)
    }

    #[test]
    fn test_init_paints_origin_and_sets_entry() {
        let mut leds = [MARKER; 10];
        let mut left = red_chase(2, 5, Direction::Left);
        left.init(&mut leds);
        assert_eq!(left.current(), 2);
        assert_eq!(
            leds,
            [MARKER, MARKER, BLACK, BLACK, BLACK, BLACK, MARKER, MARKER, MARKER, MARKER]
        );

        let mut right = red_chase(2, 5, Direction::Right);
        right.init(&mut leds);
        assert_eq!(right.current(), 5);
    }

    #[test]
    fn test_advance_one_twenty_leds() {
        let mut leds = [RED; 20];
        let mut segment = red_chase(0, 19, Direction::Left);
        segment.init(&mut leds);
        assert_eq!(leds, [BLACK; 20]);
        assert_eq!(segment.current(), 0);

        assert_eq!(segment.advance_one(&mut leds, true), Step::InProgress);
        assert_eq!(leds[0], RED);
        assert!(leds[1..].iter().all(|led| *led == BLACK));
        assert_eq!(segment.current(), 1);

        for _ in 1..20 {
            assert_eq!(segment.advance_one(&mut leds, true), Step::InProgress);
        }
        assert_eq!(leds[19], RED);
        assert!(leds[..19].iter().all(|led| *led == BLACK));

        assert_eq!(segment.advance_one(&mut leds, true), Step::Completed);
        assert_eq!(leds, [BLACK; 20]);
        assert_eq!(segment.current(), 0);
    }

    #[test]
    fn test_advance_one_right_mirrors_left() {
        let mut leds = [BLACK; 20];
        let mut segment = red_chase(0, 19, Direction::Right);
        segment.init(&mut leds);

        assert_eq!(segment.advance_one(&mut leds, true), Step::InProgress);
        assert_eq!(leds[19], RED);
        assert_eq!(segment.current(), 18);

        assert_eq!(segment.advance_one(&mut leds, true), Step::InProgress);
        assert_eq!(leds[18], RED);
        assert_eq!(leds[19], BLACK);
    }

    #[test]
    fn test_advance_one_cycle_closure() {
        for len in 1..=20u16 {
            for direction in [Direction::Left, Direction::Right] {
                let mut leds = [MARKER; 24];
                let mut segment = red_chase(2, 2 + len - 1, direction);
                segment.init(&mut leds);
                let initial = leds;

                for _ in 0..3 {
                    for call in 0..=len {
                        let step = segment.advance_one(&mut leds, true);
                        if call < len {
                            assert_eq!(step, Step::InProgress, "len {len} call {call}");
                        } else {
                            assert_eq!(step, Step::Completed, "len {len} call {call}");
                            assert_eq!(leds, initial, "len {len} {direction:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_advance_one_without_wrap_parks_on_far_boundary() {
        let mut leds = [BLACK; 5];
        let mut segment = red_chase(0, 4, Direction::Left);
        segment.init(&mut leds);

        for _ in 0..5 {
            assert_eq!(segment.advance_one(&mut leds, false), Step::InProgress);
        }
        assert_eq!(segment.advance_one(&mut leds, false), Step::Completed);
        assert_eq!(segment.current(), 4);
        assert_eq!(leds, [BLACK; 5]);

        // A parked segment keeps flashing its last cell
        assert_eq!(segment.advance_one(&mut leds, false), Step::InProgress);
        assert_eq!(leds, [BLACK, BLACK, BLACK, BLACK, RED]);
        assert_eq!(segment.advance_one(&mut leds, false), Step::Completed);
        assert_eq!(leds, [BLACK; 5]);
    }

    #[test]
    fn test_single_cell_segment() {
        let mut leds = [MARKER; 7];
        let mut segment = red_chase(3, 3, Direction::Left);
        segment.init(&mut leds);

        for _ in 0..4 {
            assert_eq!(segment.advance_one(&mut leds, true), Step::InProgress);
            assert_eq!(leds[3], RED);
            assert_eq!(segment.advance_one(&mut leds, true), Step::Completed);
            assert_eq!(leds[3], BLACK);
            assert_eq!(leds[2], MARKER);
            assert_eq!(leds[4], MARKER);
        }
    }

    #[test]
    fn test_advance_by_four_on_twenty_leds() {
        let mut leds = [BLACK; 20];
        let mut segment = red_chase(0, 19, Direction::Left);
        segment.init(&mut leds);

        for stride in 0..5usize {
            let before = leds;
            let step = segment.advance_by(&mut leds, Direction::Left, true, 4);
            assert_eq!(step, Step::InProgress);

            let painted = stride * 4..stride * 4 + 4;
            for index in painted.clone() {
                assert_eq!(before[index], BLACK);
                assert_eq!(leds[index], RED);
            }
            for (index, led) in leds.iter().enumerate() {
                if !painted.contains(&index) {
                    assert_eq!(*led, BLACK, "stride {stride} index {index}");
                }
            }
        }

        let step = segment.advance_by(&mut leds, Direction::Left, true, 4);
        assert_eq!(step, Step::Completed);
        assert_eq!(leds, [BLACK; 20]);
        assert_eq!(segment.current(), 0);
    }

    #[test]
    fn test_advance_by_zero_moves_one_cell() {
        let mut by_zero = [BLACK; 8];
        let mut by_one = [BLACK; 8];
        let mut zero = red_chase(0, 7, Direction::Right);
        let mut one = red_chase(0, 7, Direction::Right);
        zero.init(&mut by_zero);
        one.init(&mut by_one);

        for _ in 0..20 {
            let a = zero.advance_by(&mut by_zero, Direction::Right, true, 0);
            let b = one.advance_by(&mut by_one, Direction::Right, true, 1);
            assert_eq!(a, b);
            assert_eq!(by_zero, by_one);
            assert_eq!(zero.current(), one.current());
        }
    }

    #[test]
    fn test_advance_by_covers_every_cell() {
        for num in 1..=8u8 {
            for len in 1..=80u16 {
                for direction in [Direction::Left, Direction::Right] {
                    let mut leds = [BLACK; 82];
                    let mut segment = red_chase(1, len, direction);
                    segment.init(&mut leds);

                    let mut visited = [false; 82];
                    let mut calls = 0;
                    loop {
                        calls += 1;
                        let step = segment.advance_by(&mut leds, direction, true, num);
                        for (index, led) in leds.iter().enumerate() {
                            if *led == RED {
                                visited[index] = true;
                            }
                        }
                        if step.is_completed() {
                            break;
                        }
                        assert!(calls <= 81, "num {num} len {len} never completed");
                    }

                    let strides = usize::from(len).div_ceil(usize::from(num));
                    assert_eq!(calls, strides + 1, "num {num} len {len}");
                    assert!(visited[1..=usize::from(len)].iter().all(|v| *v));
                    assert!(!visited[0]);
                    assert!(!visited[usize::from(len) + 1]);
                    assert_eq!(leds, [BLACK; 82], "num {num} len {len} {direction:?}");
                }
            }
        }
    }

    #[test]
    fn test_advance_by_clamps_partial_stride() {
        let mut leds = [MARKER; 12];
        let mut segment = red_chase(1, 10, Direction::Left);
        segment.init(&mut leds);

        segment.advance_by(&mut leds, Direction::Left, true, 4);
        segment.advance_by(&mut leds, Direction::Left, true, 4);
        let step = segment.advance_by(&mut leds, Direction::Left, true, 4);
        assert_eq!(step, Step::InProgress);
        assert_eq!(leds[9], RED);
        assert_eq!(leds[10], RED);
        assert_eq!(leds[11], MARKER);

        let step = segment.advance_by(&mut leds, Direction::Left, true, 4);
        assert_eq!(step, Step::Completed);
        assert_eq!(leds[0], MARKER);
        assert_eq!(leds[11], MARKER);
        assert!(leds[1..=10].iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_direction_change_restarts_from_entry() {
        let mut leds = [BLACK; 10];
        let mut segment = red_chase(0, 9, Direction::Left);
        segment.init(&mut leds);

        segment.advance_by(&mut leds, Direction::Left, true, 2);
        segment.advance_by(&mut leds, Direction::Left, true, 2);
        assert_eq!(segment.current(), 4);

        let step = segment.advance_by(&mut leds, Direction::Right, true, 2);
        assert_eq!(step, Step::InProgress);
        assert_eq!(segment.direction(), Direction::Right);
        assert_eq!(segment.current(), 7);
        assert_eq!(leds[9], RED);
        assert_eq!(leds[8], RED);
        // The abandoned stride is not cleaned up
        assert_eq!(leds[2], RED);
        assert_eq!(leds[3], RED);
        assert!(leds[4..8].iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_advance_by_without_wrap() {
        let mut leds = [BLACK; 8];
        let mut segment = red_chase(0, 7, Direction::Left);
        segment.init(&mut leds);

        assert_eq!(segment.advance_by(&mut leds, Direction::Left, false, 4), Step::InProgress);
        assert_eq!(segment.advance_by(&mut leds, Direction::Left, false, 4), Step::InProgress);
        assert_eq!(segment.advance_by(&mut leds, Direction::Left, false, 4), Step::Completed);
        assert_eq!(segment.current(), 7);
        assert_eq!(leds, [BLACK; 8]);

        assert_eq!(segment.advance_by(&mut leds, Direction::Left, false, 4), Step::InProgress);
        assert_eq!(leds, [BLACK, BLACK, BLACK, BLACK, BLACK, BLACK, BLACK, RED]);
        assert_eq!(segment.advance_by(&mut leds, Direction::Left, false, 4), Step::Completed);
        assert_eq!(leds, [BLACK; 8]);
    }

    #[test]
    fn test_right_without_wrap_parks_on_start() {
        let mut leds = [BLACK; 6];
        let mut segment = red_chase(0, 5, Direction::Right);
        segment.init(&mut leds);

        for _ in 0..2 {
            assert_eq!(segment.advance_by(&mut leds, Direction::Right, false, 3), Step::InProgress);
        }
        assert_eq!(segment.advance_by(&mut leds, Direction::Right, false, 3), Step::Completed);
        assert_eq!(segment.current(), 0);
        assert_eq!(leds, [BLACK; 6]);
    }
}
