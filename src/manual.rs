//! Manual mode: the two potentiometers steer the gimbal.

use crate::board::{Board, pause};
use crate::config::ToyConfig;
use crate::gimbal::{DeadBandFilter, GimbalPosition};

/// Run one manual positioning cycle.
///
/// Reads both pots, maps them (inverted) onto the servo ranges, writes through the
/// dead-band `filter`, then pauses for [`ToyConfig::manual_pause`]. Returns the
/// position the pots asked for, whether or not it was written.
pub async fn run_manual<B: Board>(
    board: &mut B,
    filter: &mut DeadBandFilter,
    config: &ToyConfig,
) -> GimbalPosition {
    let pan_reading = board.read_pan_sensor();
    let tilt_reading = board.read_tilt_sensor();
    #[cfg(feature = "defmt")]
    if config.trace_sensors {
        defmt::debug!("manual: pan pot={} tilt pot={}", pan_reading, tilt_reading);
    }

    let target = GimbalPosition::from_sensors(pan_reading, tilt_reading, config.pan, config.tilt);
    filter.update(board, target);

    pause(board, config.manual_pause).await;
    target
}
