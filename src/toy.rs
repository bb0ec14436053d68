//! The main-loop context: current mode, button monitor, and per-behavior state.
//!
//! # Example
//!
//! ```rust
//! use embassy_futures::block_on;
//! use embassy_time::Duration;
//! use laser_toy::{LaserToy, Mode, ToyConfig, sim::SimBoard};
//! use rand::{SeedableRng, rngs::SmallRng};
//!
//! let board = SimBoard::new(12);
//! let mut toy = LaserToy::new(board, SmallRng::seed_from_u64(7), ToyConfig::new())?;
//! block_on(toy.start());
//!
//! // A short press, then enough cycles for the monitor to see press and release.
//! toy.board_mut().press_button_for(Duration::from_millis(80));
//! block_on(async {
//!     for _ in 0..4 {
//!         toy.run_cycle().await;
//!     }
//! });
//! assert_eq!(toy.mode(), Mode::Autonomous);
//! # Ok::<(), laser_toy::Error>(())
//! ```

use rand::RngCore;

use crate::Result;
use crate::ambient::{ambient_color, run_ambient};
use crate::board::Board;
use crate::button::{ButtonEvent, ButtonMonitor};
use crate::config::ToyConfig;
use crate::gimbal::DeadBandFilter;
use crate::led_ring::{colors, wipe_ring};
use crate::manual::run_manual;
use crate::mode::Mode;
use crate::sweep::{SweepCadence, run_sweep};

/// The toy's control core.
///
/// Owns the board, the random source, and all state that persists between loop
/// iterations. Each [`run_cycle`](Self::run_cycle) polls the button, then runs the one
/// behavior that matches the current [`Mode`].
pub struct LaserToy<B, R> {
    board: B,
    rng: R,
    config: ToyConfig,
    mode: Mode,
    button: ButtonMonitor,
    filter: DeadBandFilter,
    sweep: SweepCadence,
    laser_brightness: u8,
}

impl<B: Board, R: RngCore> LaserToy<B, R> {
    /// Create a toy in [`Mode::Manual`]. Does not touch the hardware; call
    /// [`start`](Self::start) (or [`run`](Self::run)) for that.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`ToyConfig::validate`] finds.
    pub fn new(board: B, mut rng: R, config: ToyConfig) -> Result<Self> {
        config.validate()?;
        let sweep = SweepCadence::new(&mut rng, &config, board.now());
        Ok(Self {
            board,
            rng,
            config,
            mode: Mode::Manual,
            button: ButtonMonitor::new(config.button_poll_interval, config.hold_sample_interval),
            filter: DeadBandFilter::new(config.dead_band),
            sweep,
            laser_brightness: config.laser_startup_brightness,
        })
    }

    /// Current operating mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Laser brightness last set by a button hold (or the startup brightness).
    #[must_use]
    pub const fn laser_brightness(&self) -> u8 {
        self.laser_brightness
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ToyConfig {
        &self.config
    }

    /// Autonomous-mode burst state.
    #[must_use]
    pub const fn sweep(&self) -> &SweepCadence {
        &self.sweep
    }

    /// Manual-mode dead-band state.
    #[must_use]
    pub const fn filter(&self) -> &DeadBandFilter {
        &self.filter
    }

    /// The board.
    #[must_use]
    pub const fn board(&self) -> &B {
        &self.board
    }

    /// The board, mutably.
    pub const fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Put the outputs in their startup state: laser at startup brightness, status LED
    /// off, ring dark.
    pub async fn start(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("laser toy starting in {} mode", self.mode.name());
        self.board.set_laser(self.laser_brightness);
        self.board.set_status_indicator(false);
        crate::led_ring::fill_ring(&mut self.board, colors::BLACK).await;
    }

    /// One main-loop iteration: poll the button, then run the current mode's behavior.
    pub async fn run_cycle(&mut self) {
        match self.button.poll(&mut self.board).await {
            Some(ButtonEvent::Held { laser_brightness }) => {
                #[cfg(feature = "defmt")]
                defmt::info!("laser brightness set to {}", laser_brightness);
                self.laser_brightness = laser_brightness;
            }
            Some(ButtonEvent::Released) => {
                #[cfg(feature = "defmt")]
                defmt::info!("button released in {} mode", self.mode.name());
                self.on_release_event().await;
            }
            None => {}
        }

        match self.mode {
            Mode::Manual => {
                run_manual(&mut self.board, &mut self.filter, &self.config).await;
            }
            Mode::Autonomous => {
                let now = self.board.now();
                run_sweep(
                    &mut self.board,
                    &mut self.sweep,
                    &mut self.rng,
                    &self.config,
                    now,
                );
            }
            Mode::Ambient => {
                run_ambient(&mut self.board, &self.config).await;
            }
        }
    }

    /// Advance to the next mode and perform its entry action.
    ///
    /// - Autonomous: status LED on; the first sweep move happens on the next cycle.
    /// - Ambient: status LED off; the ring is wiped, pixel by pixel, to the color the
    ///   pots select right now.
    /// - Manual: the ring is wiped to off; the dead-band memory is cleared so the gimbal
    ///   snaps to the pots.
    pub async fn on_release_event(&mut self) {
        let next = self.mode.next();
        #[cfg(feature = "defmt")]
        defmt::info!("mode {} -> {}", self.mode.name(), next.name());
        self.mode = next;

        match next {
            Mode::Autonomous => {
                self.board.set_status_indicator(true);
                self.sweep.rearm(self.board.now());
            }
            Mode::Ambient => {
                self.board.set_status_indicator(false);
                let snapshot = ambient_color(
                    self.board.read_pan_sensor(),
                    self.board.read_tilt_sensor(),
                    &self.config,
                );
                wipe_ring(&mut self.board, snapshot, self.config.wipe_step).await;
            }
            Mode::Manual => {
                wipe_ring(&mut self.board, colors::BLACK, self.config.wipe_step).await;
                self.filter.reset();
            }
        }
    }

    /// Start the outputs and run the control loop forever.
    pub async fn run(&mut self) -> ! {
        self.start().await;
        loop {
            self.run_cycle().await;
        }
    }
}
