//! End-to-end: synthetic edges → PulseCapture → CycleDriver → lines.

use windvane::app::driver::CycleDriver;
use windvane::conditioning::CycleVerdict;
use windvane::config::{OutputMode, SensorConfig};
use windvane::diagnostics;
use windvane::nmea;
use windvane::sensors::pulse::{EdgeVerdict, PulseCapture};

use crate::mock_hw::{MockClock, RecordingOutput, Rotor};

/// 10 rev/s → r = 1000 → 20.5 kt.
const PERIOD_US: u64 = 100_000;
/// Half a rotation → 180°.
const HALF_PHASE_US: u64 = 50_000;

fn sentence_config() -> SensorConfig {
    SensorConfig::DEFAULT
}

#[test]
fn steady_wind_converges_to_stable_sentence() {
    let capture = PulseCapture::new(10_000);
    let clock = MockClock::default();
    let config = sentence_config();
    let mut driver = CycleDriver::new(&capture, &config, &clock, RecordingOutput::default());
    let mut rotor = Rotor::new(PERIOD_US, HALF_PHASE_US);

    let mut verdicts = Vec::new();
    for _ in 0..60 {
        let (t, edge) = rotor.turn(&capture);
        assert_eq!(edge, EdgeVerdict::Accepted);
        clock.set_us(t);
        verdicts.push(driver.step().report.verdict);
    }

    // 0 → 20.5 kt is a jump; 0° → 180° is a jump; both confirmed next cycle.
    assert_eq!(
        verdicts[..3],
        [CycleVerdict::SpeedRejected, CycleVerdict::DirectionRejected, CycleVerdict::Accepted]
    );
    assert!(verdicts[3..].iter().all(|v| *v == CycleVerdict::Accepted));

    // One sentence per emit interval: t = 0.1 s, 1.1 s, ... 5.1 s.
    let out = driver.output();
    assert_eq!(out.lines.len(), 6);
    assert!(out.lines.iter().all(|l| nmea::verify(l)));

    // Gain 0.25 with rounding stalls one degree short of 180.
    assert_eq!(out.last(), Some("$WIMWV,179.0,R,20.5,N,A*1B"));
    assert_eq!(out.lines[4], out.lines[5]);

    let state = driver.engine().state();
    assert_eq!(state.current_speed, 2_050);
    assert_eq!(state.previous_direction, 180);
    assert_eq!(state.smoothed_direction, 179);
}

#[test]
fn calm_after_wind_reports_zero_speed_and_keeps_heading() {
    let capture = PulseCapture::new(10_000);
    let clock = MockClock::default();
    let config = sentence_config();
    let mut driver = CycleDriver::new(&capture, &config, &clock, RecordingOutput::default());
    let mut rotor = Rotor::new(PERIOD_US, HALF_PHASE_US);

    let mut last_edge = 0;
    for _ in 0..30 {
        let (t, _) = rotor.turn(&capture);
        clock.set_us(t);
        driver.step();
        last_edge = t;
    }

    // Exactly at the timeout the period is still trusted.
    clock.set_us(last_edge + config.pulse_timeout_us);
    assert_eq!(driver.step().report.verdict, CycleVerdict::Accepted);

    clock.set_us(last_edge + config.pulse_timeout_us + 1);
    let outcome = driver.step();
    assert_eq!(outcome.report.verdict, CycleVerdict::Stalled);
    assert_eq!(outcome.report.state.current_speed, 0);

    // Force an emission slot and check the sentence.
    clock.advance_us(1_000_000);
    assert!(driver.step().emitted);
    assert_eq!(driver.output().last(), Some("$WIMWV,179.0,R,0.0,N,A*2C"));
}

#[test]
fn first_rotation_after_calm_spans_the_calm() {
    let capture = PulseCapture::new(10_000);
    let clock = MockClock::default();
    let config = sentence_config();
    let mut driver = CycleDriver::new(&capture, &config, &clock, RecordingOutput::default());

    let mut rotor = Rotor::new(PERIOD_US, HALF_PHASE_US);
    let mut t = 0;
    for _ in 0..5 {
        t = rotor.turn(&capture).0;
        clock.set_us(t);
        driver.step();
    }

    let calm_end = t + 5_000_000;
    clock.set_us(calm_end);
    assert_eq!(driver.step().report.verdict, CycleVerdict::Stalled);

    // The first edge closes a 5.1 s "rotation": r = 19, 0.36 kt, which is
    // believable coming from zero.
    let mut rotor = Rotor::starting_at(PERIOD_US, HALF_PHASE_US, calm_end);
    let (t1, _) = rotor.turn(&capture);
    clock.set_us(t1);
    let first = driver.step().report;
    assert_eq!(first.speed_interval_us, t1 - t);
    assert_eq!(first.raw_speed, 36);
    assert_eq!(first.state.current_speed, 36);

    // Jumping from there to 20.5 kt needs one confirming rotation.
    let (t2, _) = rotor.turn(&capture);
    clock.set_us(t2);
    assert_eq!(driver.step().report.verdict, CycleVerdict::SpeedRejected);

    for _ in 0..3 {
        let (tn, _) = rotor.turn(&capture);
        clock.set_us(tn);
        driver.step();
    }
    assert_eq!(driver.engine().state().current_speed, 2_050);
}

#[test]
fn diagnostic_mode_logs_every_cycle() {
    let capture = PulseCapture::new(10_000);
    let clock = MockClock::default();
    let config = SensorConfig {
        output_mode: OutputMode::Diagnostic,
        ..SensorConfig::DEFAULT
    };
    let mut driver = CycleDriver::new(&capture, &config, &clock, RecordingOutput::default());
    let mut rotor = Rotor::new(PERIOD_US, HALF_PHASE_US);

    for _ in 0..3 {
        let (t, _) = rotor.turn(&capture);
        clock.set_us(t);
        assert!(driver.step().emitted);
    }

    let lines = &driver.output().lines;
    assert_eq!(
        lines.as_slice(),
        [
            diagnostics::HEADER,
            "100000,50000,1000,2050,,0,0,speed_rejected",
            "100000,50000,1000,2050,180,0,2050,dir_rejected",
            "100000,50000,1000,2050,180,45,2050,ok",
        ]
    );
    assert!(lines.iter().all(|l| !l.starts_with('$')));
}

#[test]
fn identical_drivers_agree() {
    let capture = PulseCapture::new(10_000);
    let clock = MockClock::default();
    let config = sentence_config();
    let mut a = CycleDriver::new(&capture, &config, &clock, RecordingOutput::default());
    let mut b = CycleDriver::new(&capture, &config, &clock, RecordingOutput::default());
    let mut rotor = Rotor::new(PERIOD_US, 30_000);

    for _ in 0..25 {
        let (t, _) = rotor.turn(&capture);
        clock.set_us(t);
        assert_eq!(a.step(), b.step());
    }
    assert_eq!(a.output().lines, b.output().lines);
}
