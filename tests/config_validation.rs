#![cfg(feature = "host")]
#![allow(missing_docs)]
//! `ToyConfig` defaults and validation errors.

use embassy_time::Duration;
use laser_toy::config::{Bounds, BurstConfig, MAX_PAN, MAX_TILT, MIN_PAN, MIN_TILT, TiltGuard};
use laser_toy::{Error, ToyConfig};

#[test]
fn shipped_defaults() {
    let config = ToyConfig::default();
    assert_eq!(config, ToyConfig::new());
    assert_eq!(config.pan, Bounds::new(MIN_PAN, MAX_PAN));
    assert_eq!(config.tilt, Bounds::new(MIN_TILT, MAX_TILT));
    assert_eq!((MIN_PAN, MAX_PAN, MIN_TILT, MAX_TILT), (23, 150, 2, 37));
    assert_eq!(config.dead_band, 1);
    assert_eq!(config.button_poll_interval, Duration::from_millis(100));
    assert_eq!(config.manual_pause, Duration::from_millis(50));
    assert_eq!(config.ambient_pause, Duration::from_millis(10));
    assert_eq!(config.rapid.moves, Bounds::new(10, 15));
    assert_eq!(config.normal.moves, Bounds::new(3, 8));
    assert_eq!(config.ambient_value, Bounds::new(60, 255));
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn reversed_pan_is_an_empty_range() {
    let config = ToyConfig {
        pan: Bounds::new(150, 23),
        ..ToyConfig::new()
    };
    let err = config.validate().unwrap_err();
    assert_eq!(
        err,
        Error::EmptyRange {
            name: "pan",
            min: 150,
            max: 23
        }
    );
    assert_eq!(err.to_string(), "pan range is empty: 150..=23");
}

#[test]
fn tilt_past_servo_travel_is_rejected() {
    let config = ToyConfig {
        tilt: Bounds::new(2, 200),
        ..ToyConfig::new()
    };
    assert_eq!(
        config.validate(),
        Err(Error::OutOfRange {
            name: "tilt.max",
            value: 200,
            min: 0,
            max: 180
        })
    );
}

#[test]
fn tilt_guard_outside_tilt_range_is_rejected() {
    let config = ToyConfig {
        high_pan_guard: TiltGuard {
            pan: 144,
            tilt_min: 40,
        },
        ..ToyConfig::new()
    };
    assert_eq!(
        config.validate(),
        Err(Error::OutOfRange {
            name: "high_pan_guard.tilt_min",
            value: 40,
            min: 2,
            max: 37
        })
    );
}

#[test]
fn burst_with_no_moves_is_rejected() {
    let config = ToyConfig {
        rapid: BurstConfig {
            moves: Bounds::new(0, 15),
            ..ToyConfig::new().rapid
        },
        ..ToyConfig::new()
    };
    assert!(matches!(
        config.validate(),
        Err(Error::OutOfRange {
            name: "rapid.moves",
            value: 0,
            ..
        })
    ));
}

#[test]
fn reversed_interval_is_rejected() {
    let config = ToyConfig {
        normal: BurstConfig {
            interval: Bounds::new(Duration::from_millis(4000), Duration::from_millis(1000)),
            ..ToyConfig::new().normal
        },
        ..ToyConfig::new()
    };
    assert_eq!(
        config.validate(),
        Err(Error::EmptyRange {
            name: "normal.interval",
            min: 4000,
            max: 1000
        })
    );
}

#[test]
fn reversed_ambient_value_is_rejected() {
    let config = ToyConfig {
        ambient_value: Bounds::new(200, 100),
        ..ToyConfig::new()
    };
    assert!(matches!(
        config.validate(),
        Err(Error::EmptyRange {
            name: "ambient_value",
            ..
        })
    ));
}
