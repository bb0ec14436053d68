//! Pan/tilt positions, the potentiometer-to-angle mapping, and the dead-band filter
//! that keeps sensor noise from chattering the servos.

use crate::board::{Actuators, SENSOR_MAX};
use crate::config::Bounds;

/// A pan/tilt pair in whole degrees.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GimbalPosition {
    /// Horizontal angle.
    pub pan: u16,
    /// Vertical angle.
    pub tilt: u16,
}

impl GimbalPosition {
    /// Create a position from pan and tilt angles.
    #[must_use]
    pub const fn new(pan: u16, tilt: u16) -> Self {
        Self { pan, tilt }
    }

    /// Map raw potentiometer readings onto the servo ranges, inverted: a reading of 0
    /// gives each range's maximum and [`SENSOR_MAX`] gives its minimum.
    #[must_use]
    pub fn from_sensors(
        pan_reading: u16,
        tilt_reading: u16,
        pan: Bounds<u16>,
        tilt: Bounds<u16>,
    ) -> Self {
        Self {
            pan: invert_onto(pan_reading, pan),
            tilt: invert_onto(tilt_reading, tilt),
        }
    }
}

fn invert_onto(reading: u16, bounds: Bounds<u16>) -> u16 {
    let mapped = map_range(
        i64::from(reading.min(SENSOR_MAX)),
        (0, i64::from(SENSOR_MAX)),
        (i64::from(bounds.max), i64::from(bounds.min)),
    );
    u16::try_from(mapped)
        .unwrap_or(bounds.min)
        .clamp(bounds.min, bounds.max)
}

/// Linearly re-map `value` from one interval onto another, truncating toward zero.
///
/// Either interval may run backwards. A zero-width input interval maps everything to
/// the output's start.
#[must_use]
pub const fn map_range(value: i64, from: (i64, i64), to: (i64, i64)) -> i64 {
    let (from_start, from_end) = from;
    let (to_start, to_end) = to;
    let span = from_end - from_start;
    if span == 0 {
        return to_start;
    }
    (value - from_start) * (to_end - to_start) / span + to_start
}

/// Which axes a filtered update actually wrote.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisWrites {
    /// The pan servo was commanded.
    pub pan: bool,
    /// The tilt servo was commanded.
    pub tilt: bool,
}

/// Suppresses servo writes that move less than a threshold from the last written angle.
///
/// An axis that has never been written always writes. The remembered angle only
/// changes when a write happens, so slow drift still accumulates into a move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeadBandFilter {
    threshold: u16,
    last_pan: Option<u16>,
    last_tilt: Option<u16>,
}

impl DeadBandFilter {
    /// Create a filter that writes only when an angle changes by more than `threshold`.
    #[must_use]
    pub const fn new(threshold: u16) -> Self {
        Self {
            threshold,
            last_pan: None,
            last_tilt: None,
        }
    }

    /// The last angles written, per axis.
    #[must_use]
    pub const fn last_written(&self) -> (Option<u16>, Option<u16>) {
        (self.last_pan, self.last_tilt)
    }

    /// Forget both axes so the next update writes unconditionally.
    pub const fn reset(&mut self) {
        self.last_pan = None;
        self.last_tilt = None;
    }

    /// Write each axis of `target` whose change exceeds the threshold.
    pub fn update<A: Actuators>(&mut self, actuators: &mut A, target: GimbalPosition) -> AxisWrites {
        let pan = Self::exceeds(self.last_pan, target.pan, self.threshold);
        if pan {
            actuators.set_pan(target.pan);
            self.last_pan = Some(target.pan);
        }
        let tilt = Self::exceeds(self.last_tilt, target.tilt, self.threshold);
        if tilt {
            actuators.set_tilt(target.tilt);
            self.last_tilt = Some(target.tilt);
        }
        AxisWrites { pan, tilt }
    }

    fn exceeds(last: Option<u16>, target: u16, threshold: u16) -> bool {
        last.is_none_or(|last| last.abs_diff(target) > threshold)
    }
}
