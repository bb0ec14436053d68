//! Ambient mode: the potentiometers choose one color for the whole light ring.

use smart_leds::RGB8;

use crate::board::{Board, pause};
use crate::config::ToyConfig;
use crate::led_ring::{LightCommand, fill_ring};

/// The gamma-corrected ring color for a pair of pot readings.
///
/// Pan selects brightness within [`ToyConfig::ambient_value`]; tilt selects hue.
/// A pure function of its inputs.
#[must_use]
pub fn ambient_color(pan_reading: u16, tilt_reading: u16, config: &ToyConfig) -> RGB8 {
    LightCommand::from_sensors(pan_reading, tilt_reading, config.ambient_value).to_rgb(config.gamma)
}

/// Run one ambient light cycle: paint the live color on every pixel, flush, and pause
/// for [`ToyConfig::ambient_pause`]. Returns the color painted.
pub async fn run_ambient<B: Board>(board: &mut B, config: &ToyConfig) -> RGB8 {
    let color = ambient_color(board.read_pan_sensor(), board.read_tilt_sensor(), config);
    fill_ring(board, color).await;
    pause(board, config.ambient_pause).await;
    color
}
