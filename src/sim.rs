//! An in-memory [`Board`](crate::board::Board) for host tests and doc examples.
//!
//! [`SimBoard`] keeps a virtual clock that only moves when the core pauses (or a test
//! calls [`SimBoard::advance`]), so runs are deterministic. Every actuator write is
//! recorded for later inspection.
//!
//! ```rust
//! use embassy_futures::block_on;
//! use embassy_time::Duration;
//! use laser_toy::board::{Clock, Sensors};
//! use laser_toy::sim::SimBoard;
//! use embedded_hal_async::delay::DelayNs;
//!
//! let mut board = SimBoard::new(4);
//! board.press_button_for(Duration::from_millis(5));
//! assert!(board.is_button_pressed());
//! block_on(board.delay_ms(5));
//! assert!(!board.is_button_pressed());
//! assert_eq!(board.now().as_millis(), 5);
//! ```

use embassy_time::{Duration, Instant};
use embedded_hal_async::delay::DelayNs;
use smart_leds::RGB8;

use crate::board::{Actuators, Clock, SENSOR_MAX, Sensors};

/// Simulated toy hardware.
#[derive(Clone, Debug, Default)]
pub struct SimBoard {
    clock_ns: u64,
    pan_pot: u16,
    tilt_pot: u16,
    presses: Vec<(u64, Option<u64>)>,
    pan_writes: Vec<u16>,
    tilt_writes: Vec<u16>,
    laser_writes: Vec<u8>,
    status_writes: Vec<bool>,
    ring: Vec<RGB8>,
    frames: Vec<Vec<RGB8>>,
    pauses: Vec<Duration>,
}

impl SimBoard {
    /// A board with a dark ring of `ring_len` pixels, pots at zero, and the clock at zero.
    #[must_use]
    pub fn new(ring_len: usize) -> Self {
        Self {
            ring: vec![RGB8::default(); ring_len],
            ..Self::default()
        }
    }

    /// Set both potentiometer readings (clamped to [`SENSOR_MAX`]).
    pub fn set_pots(&mut self, pan: u16, tilt: u16) {
        self.pan_pot = pan.min(SENSOR_MAX);
        self.tilt_pot = tilt.min(SENSOR_MAX);
    }

    /// Press the button now and release it after `duration` of virtual time.
    pub fn press_button_for(&mut self, duration: Duration) {
        let end = self.clock_ns + duration.as_micros() * 1_000;
        self.presses.push((self.clock_ns, Some(end)));
    }

    /// Press the button now until [`release_button`](Self::release_button).
    pub fn hold_button(&mut self) {
        self.presses.push((self.clock_ns, None));
    }

    /// Release every press that is still open.
    pub fn release_button(&mut self) {
        let now = self.clock_ns;
        for (_, end) in &mut self.presses {
            if end.is_none_or(|end| end > now) {
                *end = Some(now);
            }
        }
    }

    /// Move the virtual clock forward without recording a pause.
    pub fn advance(&mut self, duration: Duration) {
        self.clock_ns += duration.as_micros() * 1_000;
    }

    /// Every pan angle written, oldest first.
    #[must_use]
    pub fn pan_writes(&self) -> &[u16] {
        &self.pan_writes
    }

    /// Every tilt angle written, oldest first.
    #[must_use]
    pub fn tilt_writes(&self) -> &[u16] {
        &self.tilt_writes
    }

    /// Every laser intensity written, oldest first.
    #[must_use]
    pub fn laser_writes(&self) -> &[u8] {
        &self.laser_writes
    }

    /// Every status LED write, oldest first.
    #[must_use]
    pub fn status_writes(&self) -> &[bool] {
        &self.status_writes
    }

    /// The status LED's current state (off if never written).
    #[must_use]
    pub fn status_indicator(&self) -> bool {
        self.status_writes.last().copied().unwrap_or(false)
    }

    /// The ring as last flushed, or dark if never flushed.
    #[must_use]
    pub fn ring(&self) -> Vec<RGB8> {
        self.frames
            .last()
            .cloned()
            .unwrap_or_else(|| vec![RGB8::default(); self.ring.len()])
    }

    /// One snapshot of the ring per flush, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Vec<RGB8>] {
        &self.frames
    }

    /// Every millisecond pause requested, oldest first.
    #[must_use]
    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }

    /// Forget all recorded writes, frames, and pauses. Pots, presses, ring contents, and
    /// the clock are kept.
    pub fn clear_history(&mut self) {
        self.pan_writes.clear();
        self.tilt_writes.clear();
        self.laser_writes.clear();
        self.status_writes.clear();
        self.frames.clear();
        self.pauses.clear();
    }
}

impl Sensors for SimBoard {
    fn read_pan_sensor(&mut self) -> u16 {
        self.pan_pot
    }

    fn read_tilt_sensor(&mut self) -> u16 {
        self.tilt_pot
    }

    fn is_button_pressed(&mut self) -> bool {
        let now = self.clock_ns;
        self.presses
            .iter()
            .any(|&(start, end)| start <= now && end.is_none_or(|end| now < end))
    }
}

impl Actuators for SimBoard {
    fn set_pan(&mut self, degrees: u16) {
        self.pan_writes.push(degrees);
    }

    fn set_tilt(&mut self, degrees: u16) {
        self.tilt_writes.push(degrees);
    }

    fn ring_len(&self) -> usize {
        self.ring.len()
    }

    fn set_ring_pixel(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.ring.get_mut(index) {
            *pixel = color;
        }
    }

    async fn flush_ring(&mut self) {
        self.frames.push(self.ring.clone());
    }

    fn set_laser(&mut self, intensity: u8) {
        self.laser_writes.push(intensity);
    }

    fn set_status_indicator(&mut self, on: bool) {
        self.status_writes.push(on);
    }
}

impl Clock for SimBoard {
    fn now(&self) -> Instant {
        Instant::from_micros(self.clock_ns / 1_000)
    }
}

impl DelayNs for SimBoard {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock_ns += u64::from(ns);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.pauses.push(Duration::from_millis(u64::from(ms)));
        self.clock_ns += u64::from(ms) * 1_000_000;
    }
}
