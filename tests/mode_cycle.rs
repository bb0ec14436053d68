#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Mode state machine: release-driven cycling and per-mode entry actions.

use embassy_futures::block_on;
use embassy_time::Duration;
use laser_toy::config::Bounds;
use laser_toy::led_ring::colors;
use laser_toy::sim::SimBoard;
use laser_toy::{Error, LaserToy, Mode, ToyConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const RING_LEN: usize = 12;

fn new_toy() -> LaserToy<SimBoard, SmallRng> {
    let board = SimBoard::new(RING_LEN);
    let mut toy = LaserToy::new(board, SmallRng::seed_from_u64(42), ToyConfig::new())
        .expect("default config is valid");
    block_on(toy.start());
    toy
}

/// Press long enough that the 100 ms monitor is sure to sample it, then run the loop
/// (with 10 ms of idle time between cycles) until the release changes the mode.
fn tap(toy: &mut LaserToy<SimBoard, SmallRng>) -> Mode {
    let before = toy.mode();
    toy.board_mut().press_button_for(Duration::from_millis(200));
    block_on(async {
        for _ in 0..200 {
            toy.run_cycle().await;
            if toy.mode() != before {
                break;
            }
            toy.board_mut().advance(Duration::from_millis(10));
        }
    });
    toy.mode()
}

fn run_cycles(toy: &mut LaserToy<SimBoard, SmallRng>, cycles: usize) {
    block_on(async {
        for _ in 0..cycles {
            toy.run_cycle().await;
            toy.board_mut().advance(Duration::from_millis(10));
        }
    });
}

#[test]
fn next_cycles_through_all_modes() {
    assert_eq!(Mode::Manual.next(), Mode::Autonomous);
    assert_eq!(Mode::Autonomous.next(), Mode::Ambient);
    assert_eq!(Mode::Ambient.next(), Mode::Manual);
    for mode in Mode::ALL {
        assert_eq!(mode.next().next().next(), mode);
    }
}

#[test]
fn mode_names_and_indices() {
    assert_eq!(Mode::default(), Mode::Manual);
    assert_eq!(Mode::Manual.name(), "manual");
    assert_eq!(Mode::Autonomous.name(), "autonomous");
    assert_eq!(Mode::Ambient.to_string(), "ambient");
    assert_eq!(Mode::Autonomous.index(), 1);
    assert_eq!(Mode::ALL.map(Mode::index), [0, 1, 2]);
}

#[test]
fn start_sets_startup_outputs() {
    let toy = new_toy();
    assert_eq!(toy.mode(), Mode::Manual);
    assert_eq!(toy.board().laser_writes(), &[u8::MAX]);
    assert_eq!(toy.board().status_writes(), &[false]);
    assert_eq!(toy.board().ring(), vec![colors::BLACK; RING_LEN]);
}

#[test]
fn releases_cycle_manual_autonomous_ambient_manual() {
    let mut toy = new_toy();
    assert_eq!(tap(&mut toy), Mode::Autonomous);
    assert_eq!(tap(&mut toy), Mode::Ambient);
    assert_eq!(tap(&mut toy), Mode::Manual);
}

#[test]
fn no_release_means_no_mode_change() {
    let mut toy = new_toy();
    run_cycles(&mut toy, 50);
    assert_eq!(toy.mode(), Mode::Manual);
}

#[test]
fn entering_autonomous_lights_status_and_moves_at_once() {
    let mut toy = new_toy();
    toy.board_mut().set_pots(512, 512);
    run_cycles(&mut toy, 1);
    toy.board_mut().clear_history();

    assert_eq!(tap(&mut toy), Mode::Autonomous);

    assert!(toy.board().status_indicator());
    assert_eq!(toy.board().pan_writes().len(), 1);
    assert_eq!(toy.board().tilt_writes().len(), 1);
    let pan = toy.board().pan_writes()[0];
    assert!((23..=150).contains(&pan));
    // No ring change on entry.
    assert!(toy.board().frames().is_empty());
}

#[test]
fn entering_ambient_wipes_snapshot_color_pixel_by_pixel() {
    let mut toy = new_toy();
    assert_eq!(tap(&mut toy), Mode::Autonomous);
    toy.board_mut().set_pots(1023, 0);
    toy.board_mut().clear_history();

    assert_eq!(tap(&mut toy), Mode::Ambient);

    assert!(!toy.board().status_indicator());
    let frames = toy.board().frames();
    // One frame per wiped pixel, then the first ambient cycle's fill.
    assert_eq!(frames.len(), RING_LEN + 1);
    for (step, frame) in frames.iter().take(RING_LEN).enumerate() {
        for (index, pixel) in frame.iter().enumerate() {
            let expected = if index <= step { colors::RED } else { colors::BLACK };
            assert_eq!(*pixel, expected, "frame {step} pixel {index}");
        }
    }
    assert_eq!(toy.board().ring(), vec![colors::RED; RING_LEN]);
}

#[test]
fn entering_manual_wipes_ring_dark_and_snaps_to_pots() {
    let mut toy = new_toy();
    toy.board_mut().set_pots(512, 512);
    run_cycles(&mut toy, 2);
    assert_eq!(toy.board().pan_writes(), &[87]);
    assert_eq!(tap(&mut toy), Mode::Autonomous);
    assert_eq!(tap(&mut toy), Mode::Ambient);
    toy.board_mut().clear_history();

    assert_eq!(tap(&mut toy), Mode::Manual);

    // The sweep moved the servos, so the same pot position must be written again.
    assert_eq!(toy.board().pan_writes(), &[87]);
    assert_eq!(toy.board().tilt_writes(), &[20]);

    let frames = toy.board().frames();
    let wipe = &frames[frames.len() - RING_LEN..];
    for (step, frame) in wipe.iter().enumerate() {
        for (index, pixel) in frame.iter().enumerate() {
            if index <= step {
                assert_eq!(*pixel, colors::BLACK, "frame {step} pixel {index}");
            } else {
                assert_ne!(*pixel, colors::BLACK, "frame {step} pixel {index}");
            }
        }
    }
    assert_eq!(toy.board().ring(), vec![colors::BLACK; RING_LEN]);
}

#[test]
fn hold_sets_laser_and_release_still_advances_mode() {
    let mut toy = new_toy();
    toy.board_mut().set_pots(800, 0);
    toy.board_mut().press_button_for(Duration::from_millis(400));
    block_on(async {
        for _ in 0..50 {
            toy.run_cycle().await;
            if toy.mode() != Mode::Manual {
                break;
            }
            toy.board_mut().advance(Duration::from_millis(10));
        }
    });

    assert_eq!(toy.mode(), Mode::Autonomous);
    assert_eq!(toy.laser_brightness(), 200);
    assert_eq!(toy.board().laser_writes().last(), Some(&200));
}

#[test]
fn laser_brightness_persists_across_modes() {
    let mut toy = new_toy();
    toy.board_mut().set_pots(800, 0);
    toy.board_mut().press_button_for(Duration::from_millis(400));
    run_cycles(&mut toy, 12);
    assert_eq!(toy.laser_brightness(), 200);
    toy.board_mut().clear_history();

    for _ in 0..Mode::COUNT {
        block_on(toy.on_release_event());
        run_cycles(&mut toy, 5);
        assert_eq!(toy.laser_brightness(), 200);
    }
    assert!(toy.board().laser_writes().is_empty());
}

#[test]
fn new_rejects_invalid_config() {
    let config = ToyConfig {
        pan: Bounds::new(150, 23),
        ..ToyConfig::new()
    };
    let result = LaserToy::new(SimBoard::new(RING_LEN), SmallRng::seed_from_u64(1), config);
    assert!(matches!(result, Err(Error::EmptyRange { name: "pan", .. })));
}
