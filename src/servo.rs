//! A device abstraction for the SG90 hobby servos on the toy's gimbal.
//!
//! See [`Servo`] for usage.

#[cfg(feature = "defmt")]
use defmt::info;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};

use crate::config::SERVO_MAX_DEGREES;
use crate::{Error, Result};

const SERVO_PERIOD_US: u16 = 20_000; // 20 ms

/// Default minimum pulse width for hobby servos (microseconds).
pub const SERVO_MIN_US_DEFAULT: u16 = 500;

/// Default maximum pulse width for hobby servos (microseconds).
pub const SERVO_MAX_US_DEFAULT: u16 = 2_500;

/// One positional servo driven from a PWM slice at 50 Hz with ~1 µs resolution.
///
/// # Example
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use embassy_rp::pwm::{Config, Pwm};
/// use laser_toy::servo::{SERVO_MAX_US_DEFAULT, SERVO_MIN_US_DEFAULT, Servo};
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_info: &PanicInfo) -> ! { loop {} }
/// fn example(p: embassy_rp::Peripherals) -> laser_toy::Result<()> {
///     // GPIO 16 is output A of PWM slice 0.
///     let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, Config::default());
///     let mut pan = Servo::new_output_a(pwm, SERVO_MIN_US_DEFAULT, SERVO_MAX_US_DEFAULT)?;
///     pan.set_degrees(90);
///     Ok(())
/// }
/// ```
pub struct Servo<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // kept so the divider survives compare updates
    min_us: u16,
    max_us: u16,
}

impl<'d> Servo<'d> {
    /// Take over a PWM slice whose output A drives the servo signal line.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyRange`] if `min_us >= max_us`; [`Error::OutOfRange`] if `max_us`
    /// does not fit in the 20 ms frame.
    pub fn new_output_a(mut pwm: Pwm<'d>, min_us: u16, max_us: u16) -> Result<Self> {
        if min_us >= max_us {
            return Err(Error::EmptyRange {
                name: "servo pulse",
                min: u64::from(min_us),
                max: u64::from(max_us),
            });
        }
        let top = SERVO_PERIOD_US - 1; // 19999 -> 20_000 ticks/frame
        if max_us > top {
            return Err(Error::OutOfRange {
                name: "servo max pulse",
                value: u64::from(max_us),
                min: 0,
                max: u64::from(top),
            });
        }

        let clk = u64::from(clk_sys_freq()); // Hz
        // Aim for tick ≈ 1 µs: divider = clk_sys / 1_000_000
        let div_int = u8::try_from((clk / 1_000_000).clamp(1, 255)).unwrap_or(u8::MAX);

        let mut cfg = Config::default();
        cfg.top = top;
        cfg.phase_correct = false; // edge-aligned => exact 1 µs steps
        cfg.divider = div_int.into();
        cfg.compare_a = min_us + (max_us - min_us) / 2;
        cfg.enable = true;
        pwm.set_config(&cfg);

        #[cfg(feature = "defmt")]
        info!("servo clk={}Hz div={} top={}", clk, div_int, top);

        Ok(Self {
            pwm,
            cfg,
            min_us,
            max_us,
        })
    }

    /// Set position in degrees, mapped linearly into `[min_us, max_us]`.
    /// Angles past [`SERVO_MAX_DEGREES`] are clamped.
    pub fn set_degrees(&mut self, degrees: u16) {
        let degrees = degrees.min(SERVO_MAX_DEGREES);
        let span = u32::from(self.max_us - self.min_us);
        let us = u32::from(self.min_us) + u32::from(degrees) * span / u32::from(SERVO_MAX_DEGREES);
        self.set_pulse_us(u16::try_from(us).unwrap_or(self.max_us));
    }

    /// Set raw pulse width in microseconds. Only the compare register changes.
    fn set_pulse_us(&mut self, us: u16) {
        self.cfg.compare_a = us;
        self.pwm.set_config(&self.cfg);
    }
}
