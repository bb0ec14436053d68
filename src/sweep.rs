//! Autonomous mode: random gimbal moves in alternating rapid and normal bursts.
//!
//! A rapid burst makes 10–15 moves, 100–800 ms apart. A normal burst makes 3–8 moves,
//! 1–4 s apart. Finishing either burst switches to the other kind, so the spot darts
//! around for a few seconds and then lingers, the way prey does.
//!
//! The move count of a burst is drawn when the burst starts; the wait before each move
//! is drawn when the previous move is made. Each move draws a pan angle uniformly from
//! the pan range and a tilt angle from a sub-range that depends on pan (see
//! [`tilt_bounds`]).

use embassy_time::{Duration, Instant};
use rand::{Rng, RngCore};

use crate::board::Actuators;
use crate::config::{Bounds, BurstConfig, ToyConfig};
use crate::gimbal::GimbalPosition;

/// Which kind of burst the sweep is in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cadence {
    /// Many quick moves.
    Rapid,
    /// A few slow moves.
    Normal,
}

impl Cadence {
    /// The burst kind that follows this one.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Rapid => Self::Normal,
            Self::Normal => Self::Rapid,
        }
    }

    /// This burst kind's settings.
    #[must_use]
    pub const fn burst(self, config: &ToyConfig) -> &BurstConfig {
        match self {
            Self::Rapid => &config.rapid,
            Self::Normal => &config.normal,
        }
    }
}

/// Burst bookkeeping for autonomous mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepCadence {
    cadence: Cadence,
    moves_in_burst: u8,
    rapid_quota: u8,
    normal_quota: u8,
    last_move_at: Instant,
    next_delay: Duration,
}

impl SweepCadence {
    /// Start in a normal burst with both move quotas drawn and the first move due now.
    pub fn new<R: RngCore>(rng: &mut R, config: &ToyConfig, now: Instant) -> Self {
        Self {
            cadence: Cadence::Normal,
            moves_in_burst: 0,
            rapid_quota: draw_quota(rng, &config.rapid),
            normal_quota: draw_quota(rng, &config.normal),
            last_move_at: now,
            next_delay: Duration::from_millis(0),
        }
    }

    /// Make the next move due immediately, keeping the burst position.
    pub const fn rearm(&mut self, now: Instant) {
        self.last_move_at = now;
        self.next_delay = Duration::from_millis(0);
    }

    /// Current burst kind.
    #[must_use]
    pub const fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Moves made so far in the current burst.
    #[must_use]
    pub const fn moves_in_burst(&self) -> u8 {
        self.moves_in_burst
    }

    /// How many moves the current burst will make.
    #[must_use]
    pub const fn quota(&self) -> u8 {
        match self.cadence {
            Cadence::Rapid => self.rapid_quota,
            Cadence::Normal => self.normal_quota,
        }
    }

    /// Wait between the last move and the next one.
    #[must_use]
    pub const fn next_delay(&self) -> Duration {
        self.next_delay
    }

    /// Whether the next move is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now.checked_duration_since(self.last_move_at)
            .is_some_and(|elapsed| elapsed >= self.next_delay)
    }

    /// Count a move made at `now`: close the burst when its quota is reached, then draw
    /// the wait before the next move from the (possibly new) burst kind.
    pub fn record_move<R: RngCore>(&mut self, rng: &mut R, config: &ToyConfig, now: Instant) {
        self.moves_in_burst = self.moves_in_burst.saturating_add(1);
        if self.moves_in_burst >= self.quota() {
            let finished = self.cadence;
            let quota = draw_quota(rng, finished.burst(config));
            match finished {
                Cadence::Rapid => self.rapid_quota = quota,
                Cadence::Normal => self.normal_quota = quota,
            }
            self.moves_in_burst = 0;
            self.cadence = finished.flipped();
            #[cfg(feature = "defmt")]
            defmt::debug!("sweep: {} burst done, next burst {}", finished, self.cadence);
        }
        self.next_delay = draw_interval(rng, self.cadence.burst(config).interval);
        self.last_move_at = now;
    }
}

/// Tilt range allowed at `pan`: the housing blocks low tilt at both pan extremes.
#[must_use]
pub fn tilt_bounds(pan: u16, config: &ToyConfig) -> Bounds<u16> {
    let floor = if pan >= config.high_pan_guard.pan {
        config.high_pan_guard.tilt_min
    } else if pan <= config.low_pan_guard.pan {
        config.low_pan_guard.tilt_min
    } else {
        config.tilt.min
    };
    Bounds::new(floor.max(config.tilt.min), config.tilt.max)
}

/// Draw a random target: pan from the full range, tilt from [`tilt_bounds`] for that pan.
pub fn draw_target<R: RngCore>(rng: &mut R, config: &ToyConfig) -> GimbalPosition {
    let pan = rng.gen_range(config.pan.min..=config.pan.max);
    let tilt_bounds = tilt_bounds(pan, config);
    let tilt = rng.gen_range(tilt_bounds.min..=tilt_bounds.max);
    GimbalPosition::new(pan, tilt)
}

/// Run one autonomous cycle. If the next move is due, draw a target, write it straight
/// to the servos (no dead-band), and advance the cadence. Returns the move made, if any.
pub fn run_sweep<A: Actuators, R: RngCore>(
    actuators: &mut A,
    sweep: &mut SweepCadence,
    rng: &mut R,
    config: &ToyConfig,
    now: Instant,
) -> Option<GimbalPosition> {
    if !sweep.is_due(now) {
        return None;
    }

    let target = draw_target(rng, config);
    actuators.set_pan(target.pan);
    actuators.set_tilt(target.tilt);
    #[cfg(feature = "defmt")]
    defmt::info!(
        "sweep: {} move {} -> pan={} tilt={}",
        sweep.cadence(),
        sweep.moves_in_burst(),
        target.pan,
        target.tilt
    );

    sweep.record_move(rng, config, now);
    Some(target)
}

fn draw_quota<R: RngCore>(rng: &mut R, burst: &BurstConfig) -> u8 {
    rng.gen_range(burst.moves.min..=burst.moves.max)
}

fn draw_interval<R: RngCore>(rng: &mut R, interval: Bounds<Duration>) -> Duration {
    Duration::from_millis(rng.gen_range(interval.min.as_millis()..=interval.max.as_millis()))
}
