#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Manual mode: inverted pot-to-angle mapping and the dead-band filter.

use embassy_futures::block_on;
use embassy_time::Duration;
use laser_toy::ToyConfig;
use laser_toy::config::{Bounds, MAX_PAN, MAX_TILT, MIN_PAN, MIN_TILT};
use laser_toy::gimbal::{AxisWrites, DeadBandFilter, GimbalPosition, map_range};
use laser_toy::manual::run_manual;
use laser_toy::sim::SimBoard;

const PAN: Bounds<u16> = Bounds::new(MIN_PAN, MAX_PAN);
const TILT: Bounds<u16> = Bounds::new(MIN_TILT, MAX_TILT);

#[test]
fn map_range_truncates_toward_zero() {
    assert_eq!(map_range(0, (0, 1023), (150, 23)), 150);
    assert_eq!(map_range(1023, (0, 1023), (150, 23)), 23);
    assert_eq!(map_range(512, (0, 1023), (150, 23)), 87);
    assert_eq!(map_range(512, (0, 1023), (0, 255)), 127);
    assert_eq!(map_range(5, (5, 5), (10, 20)), 10);
}

#[test]
fn pots_map_inverted_onto_servo_ranges() {
    assert_eq!(
        GimbalPosition::from_sensors(0, 0, PAN, TILT),
        GimbalPosition::new(150, 37)
    );
    assert_eq!(
        GimbalPosition::from_sensors(1023, 1023, PAN, TILT),
        GimbalPosition::new(23, 2)
    );
    assert_eq!(
        GimbalPosition::from_sensors(512, 512, PAN, TILT),
        GimbalPosition::new(87, 20)
    );
}

#[test]
fn every_reading_stays_within_limits() {
    for reading in (0..=1100).step_by(7) {
        let position = GimbalPosition::from_sensors(reading, reading, PAN, TILT);
        assert!(PAN.contains(&position.pan), "pan {} for {reading}", position.pan);
        assert!(TILT.contains(&position.tilt), "tilt {} for {reading}", position.tilt);
    }
}

#[test]
fn dead_band_skips_one_degree_changes() {
    let mut board = SimBoard::new(1);
    let mut filter = DeadBandFilter::new(1);

    let written = filter.update(&mut board, GimbalPosition::new(90, 20));
    assert_eq!(written, AxisWrites { pan: true, tilt: true });

    let written = filter.update(&mut board, GimbalPosition::new(90, 20));
    assert_eq!(written, AxisWrites::default());

    let written = filter.update(&mut board, GimbalPosition::new(91, 19));
    assert_eq!(written, AxisWrites::default());

    let written = filter.update(&mut board, GimbalPosition::new(93, 20));
    assert_eq!(written, AxisWrites { pan: true, tilt: false });

    assert_eq!(board.pan_writes(), &[90, 93]);
    assert_eq!(board.tilt_writes(), &[20]);
    assert_eq!(filter.last_written(), (Some(93), Some(20)));
}

#[test]
fn slow_drift_accumulates_into_a_write() {
    let mut board = SimBoard::new(1);
    let mut filter = DeadBandFilter::new(1);
    for pan in [87, 88, 89] {
        filter.update(&mut board, GimbalPosition::new(pan, 20));
    }
    // 88 is within one degree of 87, but 89 is two away from the last write.
    assert_eq!(board.pan_writes(), &[87, 89]);
}

#[test]
fn reset_forces_the_next_write() {
    let mut board = SimBoard::new(1);
    let mut filter = DeadBandFilter::new(1);
    filter.update(&mut board, GimbalPosition::new(60, 10));
    filter.reset();
    assert_eq!(filter.last_written(), (None, None));

    let written = filter.update(&mut board, GimbalPosition::new(60, 10));
    assert_eq!(written, AxisWrites { pan: true, tilt: true });
    assert_eq!(board.pan_writes(), &[60, 60]);
}

#[test]
fn manual_cycle_writes_once_then_holds_still() {
    let config = ToyConfig::new();
    let mut board = SimBoard::new(1);
    let mut filter = DeadBandFilter::new(config.dead_band);
    board.set_pots(512, 512);

    let target = block_on(run_manual(&mut board, &mut filter, &config));
    assert_eq!(target, GimbalPosition::new(87, 20));

    // Pot noise of a few counts maps to the same angles.
    board.set_pots(515, 509);
    block_on(run_manual(&mut board, &mut filter, &config));

    assert_eq!(board.pan_writes(), &[87]);
    assert_eq!(board.tilt_writes(), &[20]);
    assert_eq!(board.pauses(), &[Duration::from_millis(50); 2]);
}

#[test]
fn manual_cycle_tracks_a_large_turn() {
    let config = ToyConfig::new();
    let mut board = SimBoard::new(1);
    let mut filter = DeadBandFilter::new(config.dead_band);

    board.set_pots(0, 0);
    block_on(run_manual(&mut board, &mut filter, &config));
    board.set_pots(1023, 1023);
    block_on(run_manual(&mut board, &mut filter, &config));

    assert_eq!(board.pan_writes(), &[150, 23]);
    assert_eq!(board.tilt_writes(), &[37, 2]);
}

#[test]
fn sensor_trace_leaves_the_cycle_unchanged() {
    let config = ToyConfig {
        trace_sensors: true,
        ..ToyConfig::new()
    };
    let mut board = SimBoard::new(1);
    let mut filter = DeadBandFilter::new(config.dead_band);
    board.set_pots(512, 512);

    let target = block_on(run_manual(&mut board, &mut filter, &config));

    assert_eq!(target, GimbalPosition::new(87, 20));
    assert_eq!(board.pan_writes(), &[87]);
    assert_eq!(board.tilt_writes(), &[20]);
    assert_eq!(board.pauses(), &[Duration::from_millis(50)]);
}
