//! Color handling for the WS2812 light ring.
//!
//! Ambient mode turns two potentiometer readings into a [`LightCommand`]: a 16-bit hue,
//! full saturation, and a brightness value. [`LightCommand::to_rgb`] converts that to an
//! [`RGB8`] and applies the configured [`Gamma`] curve. [`fill_ring`] and [`wipe_ring`]
//! put one color on every pixel.

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// RGB color type used by the ring.
pub use smart_leds::RGB8;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::board::{Actuators, SENSOR_MAX, pause};
use crate::config::Bounds;
use crate::gimbal::map_range;

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode for the ring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    #[default]
    Gamma2_2,
}

/// Default gamma correction curve for the ring (`Gamma::Gamma2_2`).
pub const GAMMA_DEFAULT: Gamma = Gamma::Gamma2_2;

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

impl Gamma {
    /// Correct one 8-bit channel.
    #[must_use]
    pub fn correct(self, channel: u8) -> u8 {
        match self {
            Self::Linear => channel,
            Self::Gamma2_2 => GAMMA_2_2_TABLE
                .get(usize::from(channel))
                .copied()
                .unwrap_or(channel),
        }
    }

    /// Correct every channel of `color`.
    #[must_use]
    pub fn correct_rgb(self, color: RGB8) -> RGB8 {
        RGB8::new(
            self.correct(color.r),
            self.correct(color.g),
            self.correct(color.b),
        )
    }
}

// ============================================================================
// HSV
// ============================================================================

/// Steps around the integer hue wheel: six 255-step ramps.
const HUE_WHEEL_STEPS: u32 = 1530;

/// One uniform ring color, before gamma correction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightCommand {
    /// Position on the color wheel, `0..=65535` (red at both ends).
    pub hue: u16,
    /// Color purity, 0 (white) to 255 (fully saturated).
    pub saturation: u8,
    /// Brightness, 0 (off) to 255.
    pub value: u8,
}

impl LightCommand {
    /// Map the pan reading to brightness within `value` and the tilt reading to hue,
    /// at full saturation.
    #[must_use]
    pub fn from_sensors(pan_reading: u16, tilt_reading: u16, value: Bounds<u8>) -> Self {
        let sensor_max = i64::from(SENSOR_MAX);
        let brightness = map_range(
            i64::from(pan_reading.min(SENSOR_MAX)),
            (0, sensor_max),
            (i64::from(value.min), i64::from(value.max)),
        );
        let hue = map_range(
            i64::from(tilt_reading.min(SENSOR_MAX)),
            (0, sensor_max),
            (0, i64::from(u16::MAX)),
        );
        Self {
            hue: u16::try_from(hue).unwrap_or(u16::MAX),
            saturation: u8::MAX,
            value: u8::try_from(brightness).unwrap_or(value.max),
        }
    }

    /// Convert to RGB and apply `gamma`.
    #[must_use]
    pub fn to_rgb(self, gamma: Gamma) -> RGB8 {
        gamma.correct_rgb(hsv_to_rgb(self.hue, self.saturation, self.value))
    }
}

/// Convert a 16-bit-hue HSV color to RGB without floating point.
///
/// The hue is reduced to 1530 steps: red → yellow → green → cyan → blue → magenta → red,
/// each ramp 255 steps long. Saturation blends toward white, value scales the result.
#[must_use]
pub fn hsv_to_rgb(hue: u16, saturation: u8, value: u8) -> RGB8 {
    // Round to the nearest wheel step; 65535 wraps to red.
    let step = (u32::from(hue) * HUE_WHEEL_STEPS + 0x8000) >> 16;

    let (r, g, b): (u32, u32, u32) = match step {
        0..=254 => (255, step, 0),
        255..=509 => (510 - step, 255, 0),
        510..=764 => (0, 255, step - 510),
        765..=1019 => (0, 1020 - step, 255),
        1020..=1274 => (step - 1020, 0, 255),
        1275..=1529 => (255, 0, 1530 - step),
        _ => (255, 0, 0),
    };

    let value_scale = 1 + u32::from(value);
    let saturation_scale = 1 + u32::from(saturation);
    let white = 255 - u32::from(saturation);
    let shade = |channel: u32| -> u8 {
        let saturated = ((channel * saturation_scale) >> 8) + white;
        u8::try_from((saturated * value_scale) >> 8).unwrap_or(u8::MAX)
    };

    RGB8::new(shade(r), shade(g), shade(b))
}

// ============================================================================
// Ring painting
// ============================================================================

/// Stage `color` on every pixel, then flush once.
pub async fn fill_ring<A: Actuators>(ring: &mut A, color: RGB8) {
    for index in 0..ring.ring_len() {
        ring.set_ring_pixel(index, color);
    }
    ring.flush_ring().await;
}

/// Paint `color` one pixel at a time, flushing after each, with `step` between pixels.
pub async fn wipe_ring<A: Actuators + DelayNs>(ring: &mut A, color: RGB8, step: Duration) {
    for index in 0..ring.ring_len() {
        ring.set_ring_pixel(index, color);
        ring.flush_ring().await;
        pause(ring, step).await;
    }
}
