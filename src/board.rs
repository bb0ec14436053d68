//! The seams between the control core and the toy's hardware.
//!
//! The core never touches a peripheral directly. It reads the potentiometers and the
//! button through [`Sensors`], drives the servos, laser, status LED, and light ring
//! through [`Actuators`], reads time through [`Clock`], and pauses through
//! [`DelayNs`]. A type implementing all four is a [`Board`].
//!
//! [`hardware::PicoBoard`](crate::hardware) binds these to RP2040 peripherals;
//! [`sim::SimBoard`](crate::sim) binds them to memory for host tests.

use embassy_time::{Duration, Instant};
use embedded_hal_async::delay::DelayNs;
use smart_leds::RGB8;

/// Full-scale reading of a position potentiometer.
pub const SENSOR_MAX: u16 = 1023;

/// Instantaneous raw inputs.
pub trait Sensors {
    /// Pan potentiometer, `0..=SENSOR_MAX`.
    fn read_pan_sensor(&mut self) -> u16;

    /// Tilt potentiometer, `0..=SENSOR_MAX`.
    fn read_tilt_sensor(&mut self) -> u16;

    /// Whether the mode button is physically pressed right now (not debounced).
    fn is_button_pressed(&mut self) -> bool;
}

/// Output devices. Writes are last-write-wins and never fail.
pub trait Actuators {
    /// Command the pan servo (degrees).
    fn set_pan(&mut self, degrees: u16);

    /// Command the tilt servo (degrees).
    fn set_tilt(&mut self, degrees: u16);

    /// Number of pixels on the light ring.
    fn ring_len(&self) -> usize;

    /// Stage one ring pixel. Nothing changes on the ring until [`flush_ring`](Self::flush_ring).
    fn set_ring_pixel(&mut self, index: usize, color: RGB8);

    /// Send the staged pixels to the ring.
    async fn flush_ring(&mut self);

    /// Laser intensity, 0 (off) to 255 (full).
    fn set_laser(&mut self, intensity: u8);

    /// Status LED, lit while the toy sweeps on its own.
    fn set_status_indicator(&mut self, on: bool);
}

/// Monotonic time source.
pub trait Clock {
    /// Current time.
    fn now(&self) -> Instant;
}

/// Everything the control loop needs from the hardware.
pub trait Board: Sensors + Actuators + Clock + DelayNs {}

impl<T> Board for T where T: Sensors + Actuators + Clock + DelayNs {}

/// Pause for `duration`, rounded down to whole milliseconds.
pub(crate) async fn pause<D: DelayNs>(delay: &mut D, duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    if millis > 0 {
        delay.delay_ms(millis).await;
    }
}
