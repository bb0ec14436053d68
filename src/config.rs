//! Compile-time configuration for the toy: angle limits, timings, and burst cadence.
//!
//! [`ToyConfig::new`] returns the defaults the toy ships with. Every field is public so a
//! build can override one value and keep the rest:
//!
//! ```rust
//! use laser_toy::config::{Bounds, ToyConfig};
//! use embassy_time::Duration;
//!
//! let config = ToyConfig {
//!     manual_pause: Duration::from_millis(20),
//!     pan: Bounds::new(30, 140),
//!     ..ToyConfig::new()
//! };
//! assert!(config.validate().is_ok());
//! ```

use embassy_time::Duration;

use crate::led_ring::{GAMMA_DEFAULT, Gamma};
use crate::{Error, Result};

/// Lowest pan angle the housing allows (degrees).
pub const MIN_PAN: u16 = 23;

/// Highest pan angle the housing allows (degrees).
pub const MAX_PAN: u16 = 150;

/// Lowest tilt angle the housing allows (degrees).
pub const MIN_TILT: u16 = 2;

/// Highest tilt angle the housing allows (degrees).
pub const MAX_TILT: u16 = 37;

/// Largest angle a hobby servo accepts (degrees).
pub const SERVO_MAX_DEGREES: u16 = 180;

/// Inclusive `min..=max` pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds<T> {
    /// Lowest value, included.
    pub min: T,
    /// Highest value, included.
    pub max: T,
}

impl<T> Bounds<T> {
    /// Create bounds from an inclusive minimum and maximum.
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd> Bounds<T> {
    /// Whether `value` lies within the bounds.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.min <= *value && *value <= self.max
    }
}

/// Raises the tilt floor when pan reaches an extreme, so the spot stays off the housing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TiltGuard {
    /// Pan angle at which the guard engages (inclusive).
    pub pan: u16,
    /// Lowest tilt allowed while the guard is engaged.
    pub tilt_min: u16,
}

/// Move count and spacing for one kind of sweep burst.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstConfig {
    /// How many moves a burst makes, drawn once per burst.
    pub moves: Bounds<u8>,
    /// Wait between two moves, drawn once per move.
    pub interval: Bounds<Duration>,
}

/// Everything tunable about the toy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToyConfig {
    /// Pan servo limits (degrees).
    pub pan: Bounds<u16>,
    /// Tilt servo limits (degrees).
    pub tilt: Bounds<u16>,
    /// Manual mode skips a servo write unless the angle moved by more than this (degrees).
    pub dead_band: u16,
    /// The button is sampled at most once per this interval.
    pub button_poll_interval: Duration,
    /// Spacing of pot samples while the button is held to adjust the laser.
    pub hold_sample_interval: Duration,
    /// Pause after each manual positioning cycle.
    pub manual_pause: Duration,
    /// Pause after each ambient light cycle.
    pub ambient_pause: Duration,
    /// Fast, short-interval bursts.
    pub rapid: BurstConfig,
    /// Slower bursts with long idle gaps.
    pub normal: BurstConfig,
    /// Tilt floor for pan at or above [`TiltGuard::pan`].
    pub high_pan_guard: TiltGuard,
    /// Tilt floor for pan at or below [`TiltGuard::pan`].
    pub low_pan_guard: TiltGuard,
    /// Brightness (HSV value) range the pan pot maps onto in ambient mode.
    pub ambient_value: Bounds<u8>,
    /// Color curve applied to the ring.
    pub gamma: Gamma,
    /// Pause between pixels of a mode-entry wipe. Zero wipes as fast as the ring flushes.
    pub wipe_step: Duration,
    /// Laser brightness applied at startup, before any hold adjustment.
    pub laser_startup_brightness: u8,
    /// Log raw potentiometer readings every manual cycle.
    pub trace_sensors: bool,
}

impl ToyConfig {
    /// The toy's shipped configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pan: Bounds::new(MIN_PAN, MAX_PAN),
            tilt: Bounds::new(MIN_TILT, MAX_TILT),
            dead_band: 1,
            button_poll_interval: Duration::from_millis(100),
            hold_sample_interval: Duration::from_millis(1),
            manual_pause: Duration::from_millis(50),
            ambient_pause: Duration::from_millis(10),
            rapid: BurstConfig {
                moves: Bounds::new(10, 15),
                interval: Bounds::new(Duration::from_millis(100), Duration::from_millis(800)),
            },
            normal: BurstConfig {
                moves: Bounds::new(3, 8),
                interval: Bounds::new(Duration::from_millis(1000), Duration::from_millis(4000)),
            },
            high_pan_guard: TiltGuard {
                pan: 144,
                tilt_min: 24,
            },
            low_pan_guard: TiltGuard {
                pan: 54,
                tilt_min: 12,
            },
            ambient_value: Bounds::new(60, 255),
            gamma: GAMMA_DEFAULT,
            wipe_step: Duration::from_millis(0),
            laser_startup_brightness: u8::MAX,
            trace_sensors: false,
        }
    }

    /// Check that every range is ordered and every angle is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRange`] for a range whose minimum exceeds its maximum, and
    /// [`Error::OutOfRange`] for angles past the servo's travel, tilt guards outside the
    /// tilt range, or bursts that would make no moves.
    pub fn validate(&self) -> Result<()> {
        ordered("pan", self.pan.min.into(), self.pan.max.into())?;
        ordered("tilt", self.tilt.min.into(), self.tilt.max.into())?;
        within(
            "pan.max",
            self.pan.max.into(),
            0,
            SERVO_MAX_DEGREES.into(),
        )?;
        within(
            "tilt.max",
            self.tilt.max.into(),
            0,
            SERVO_MAX_DEGREES.into(),
        )?;

        for (name, guard) in [
            ("high_pan_guard.tilt_min", self.high_pan_guard),
            ("low_pan_guard.tilt_min", self.low_pan_guard),
        ] {
            within(
                name,
                guard.tilt_min.into(),
                self.tilt.min.into(),
                self.tilt.max.into(),
            )?;
        }

        for (moves_name, interval_name, burst) in [
            ("rapid.moves", "rapid.interval", self.rapid),
            ("normal.moves", "normal.interval", self.normal),
        ] {
            ordered(moves_name, burst.moves.min.into(), burst.moves.max.into())?;
            within(
                moves_name,
                burst.moves.min.into(),
                1,
                u8::MAX.into(),
            )?;
            ordered(
                interval_name,
                burst.interval.min.as_millis(),
                burst.interval.max.as_millis(),
            )?;
        }

        ordered(
            "ambient_value",
            self.ambient_value.min.into(),
            self.ambient_value.max.into(),
        )
    }
}

impl Default for ToyConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn ordered(name: &'static str, min: u64, max: u64) -> Result<()> {
    if min > max {
        return Err(Error::EmptyRange { name, min, max });
    }
    Ok(())
}

fn within(name: &'static str, value: u64, min: u64, max: u64) -> Result<()> {
    if value < min || value > max {
        return Err(Error::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
