use strider_hardware::ReplayReader;
use strider_traits::{NotReady, RateReader, RawSample};

#[test]
fn replays_in_order_then_reports_not_ready() {
    let mut r = ReplayReader::new([
        Some(RawSample::new(-1000, 100)),
        Some(RawSample::new(12, 98)),
    ]);
    assert_eq!(r.remaining(), 2);
    assert_eq!(r.poll(), Ok(RawSample::new(-1000, 100)));
    assert_eq!(r.poll(), Ok(RawSample::new(12, 98)));
    assert!(r.is_exhausted());
    for _ in 0..3 {
        assert_eq!(r.poll(), Err(NotReady));
    }
}

#[test]
fn empty_rows_are_not_ready_polls_mid_stream() {
    let mut r = ReplayReader::new([
        Some(RawSample::new(-31, 100)),
        None,
        None,
        Some(RawSample::new(-1024, 101)),
    ]);
    assert_eq!(r.poll(), Ok(RawSample::new(-31, 100)));
    assert_eq!(r.poll(), Err(NotReady));
    assert_eq!(r.remaining(), 2);
    assert!(!r.is_exhausted());
    assert_eq!(r.poll(), Err(NotReady));
    assert_eq!(r.poll(), Ok(RawSample::new(-1024, 101)));
    assert!(r.is_exhausted());
}
