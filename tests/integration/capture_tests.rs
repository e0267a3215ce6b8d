//! Edge capture through the driver: bounce, debounce and phase handling.

use windvane::app::driver::CycleDriver;
use windvane::app::ports::TimePort;
use windvane::conditioning::CycleVerdict;
use windvane::config::SensorConfig;
use windvane::sensors::pulse::{EdgeVerdict, PulseCapture, Wake};

use crate::mock_hw::{MockClock, MockPin, RecordingOutput, Rotor};

#[test]
fn contact_bounce_does_not_shorten_the_period() {
    let capture = PulseCapture::new(10_000);
    let clock = MockClock::default();
    let config = SensorConfig::DEFAULT;
    let mut driver = CycleDriver::new(&capture, &config, &clock, RecordingOutput::default());

    assert_eq!(capture.on_speed_edge(&mut MockPin::closed(), 100_000), EdgeVerdict::Accepted);
    // Chatter 2 ms and 9.999 ms later, then a pin already back high.
    assert_eq!(capture.on_speed_edge(&mut MockPin::closed(), 102_000), EdgeVerdict::Debounced);
    assert_eq!(capture.on_speed_edge(&mut MockPin::closed(), 109_999), EdgeVerdict::Debounced);
    assert_eq!(capture.on_speed_edge(&mut MockPin::open(), 150_000), EdgeVerdict::PinNotLow);
    assert_eq!(capture.on_speed_edge(&mut MockPin::closed(), 200_000), EdgeVerdict::Accepted);

    clock.set_us(200_000);
    let report = driver.step().report;
    assert_eq!(report.speed_interval_us, 100_000);
    assert_eq!(report.raw_speed, 2_050);
}

#[test]
fn phase_from_a_longer_rotation_is_skipped() {
    let capture = PulseCapture::new(10_000);
    let clock = MockClock::default();
    let config = SensorConfig::DEFAULT;
    let mut driver = CycleDriver::new(&capture, &config, &clock, RecordingOutput::default());
    // 342°: close enough to north that the first reading is believable.
    let mut rotor = Rotor::new(100_000, 95_000);

    for _ in 0..4 {
        let (t, _) = rotor.turn(&capture);
        clock.set_us(t);
        driver.step();
    }
    let heading = driver.engine().state().smoothed_direction;
    assert_eq!(heading, 349);

    // Rotor speeds up and the vane contact goes silent: the last phase
    // (95 ms) no longer fits inside the 90 ms rotation.
    let mut t = clock.now_us();
    for _ in 0..3 {
        t += 90_000;
        capture.on_speed_edge(&mut MockPin::closed(), t);
        clock.set_us(t);
        let report = driver.step().report;
        assert_eq!(report.verdict, CycleVerdict::DirectionStale);
        assert_eq!(report.raw_direction, None);
        assert_eq!(report.state.current_speed, report.raw_speed);
        assert_eq!(report.state.smoothed_direction, heading);
    }
}

#[test]
fn wait_wakes_on_pulse_or_timeout() {
    let capture = PulseCapture::new(10_000);
    assert_eq!(capture.wait_for_pulse(core::time::Duration::from_millis(5)), Wake::Timeout);

    capture.on_speed_edge(&mut MockPin::closed(), 50_000);
    assert!(capture.has_new_data());
    assert_eq!(capture.wait_for_pulse(core::time::Duration::from_secs(5)), Wake::Pulse);
    assert!(!capture.has_new_data());
}

#[test]
fn offset_rotates_reported_heading() {
    let capture = PulseCapture::new(10_000);
    let clock = MockClock::default();
    let config = SensorConfig {
        direction_offset_deg: -135,
        filter_gain_permille: 1000,
        ..SensorConfig::DEFAULT
    };
    let mut driver = CycleDriver::new(&capture, &config, &clock, RecordingOutput::default());
    let mut rotor = Rotor::new(100_000, 25_000);

    let mut last = None;
    for _ in 0..3 {
        let (t, _) = rotor.turn(&capture);
        clock.set_us(t);
        last = Some(driver.step().report);
    }
    let report = last.unwrap();
    // 90° phase − 135° offset wraps to 315°.
    assert_eq!(report.raw_direction, Some(315));
    assert_eq!(report.verdict, CycleVerdict::Accepted);
    assert_eq!(report.state.smoothed_direction, 315);
}
