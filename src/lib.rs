//! Control core for a laser and LED-ring pet toy on a Raspberry Pi Pico.
//!
//! One button cycles the toy through three modes:
//!
//! - **Manual:** two potentiometers steer a pan/tilt gimbal carrying the laser.
//! - **Autonomous:** the gimbal darts between random targets in rapid and normal bursts.
//! - **Ambient:** the potentiometers pick one color for a WS2812 light ring.
//!
//! Holding the button instead of tapping it turns the pan potentiometer into a laser
//! brightness knob until release.
//!
//! The core ([`LaserToy`]) is generic over a [`Board`](board::Board), so the same
//! logic runs on the Pico ([`hardware::PicoBoard`](crate::hardware), `embedded`
//! feature) and against an in-memory simulator ([`sim::SimBoard`](crate::sim), `host`
//! feature) in tests.
//!
//! # Glossary
//!
//! - **Gimbal:** the two-servo pan/tilt mount carrying the laser.
//! - **Dead-band:** a minimum angle change below which a servo write is skipped.
//! - **Burst:** a run of moves at one randomized rhythm before switching rhythms.
//! - **PWM ([Pulse Width Modulation](https://en.wikipedia.org/wiki/Pulse-width_modulation)) Slices:**
//!   the Pico 1 has 8 slices (& 16 channels). These "slices" are unrelated to Rust slices.
#![cfg_attr(not(feature = "host"), no_std)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one target must be selected
#[cfg(all(not(feature = "pico1"), not(feature = "host")))]
compile_error!("Must enable either the 'pico1' board feature or the 'host' feature");

#[cfg(all(feature = "pico1", feature = "host"))]
compile_error!("Cannot enable both 'pico1' and 'host' features simultaneously");

pub mod ambient;
pub mod board;
pub mod button;
pub mod config;
mod error;
pub mod gimbal;
pub mod led_ring;
pub mod manual;
pub mod mode;
pub mod sweep;
pub mod toy;

// These modules require embassy_rp and are excluded when testing on host
#[cfg(not(feature = "host"))]
pub mod hardware;
#[cfg(not(feature = "host"))]
pub mod servo;

#[cfg(feature = "host")]
pub mod sim;

pub use crate::config::ToyConfig;
pub use crate::error::{Error, Result};
pub use crate::mode::Mode;
pub use crate::toy::LaserToy;
