//! The toy's RP2040 (Pico 1) wiring, bound to the [`Board`](crate::board::Board) traits.
//!
//! | Part | GPIO | Peripheral |
//! |---|---|---|
//! | Pan servo | 16 | PWM slice 0, output A |
//! | Tilt servo | 18 | PWM slice 1, output A |
//! | Laser | 20 | PWM slice 2, output A |
//! | Light ring (WS2812) | 2 | PIO0 state machine 0, DMA channel 0 |
//! | Pan potentiometer | 26 | ADC0 |
//! | Tilt potentiometer | 27 | ADC1 |
//! | Mode button | 13 | input, pulled away from the [`PressedTo`] side |
//! | Status LED | 25 | output (on-board LED) |

#[cfg(feature = "defmt")]
use defmt::{info, warn};
use embassy_rp::adc::{self, Adc, Blocking};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{self, Pwm};
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_async::delay::DelayNs;
use smart_leds::RGB8;

use crate::Result;
use crate::board::{Actuators, Clock, SENSOR_MAX, Sensors};
use crate::button::PressedTo;
use crate::servo::{SERVO_MAX_US_DEFAULT, SERVO_MIN_US_DEFAULT, Servo};

/// Pixels on the toy's light ring.
pub const RING_LEN: usize = 12;

/// Full-scale reading of the RP2040's 12-bit ADC.
const ADC_MAX: u16 = 4095;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// The laser diode, dimmed by PWM duty cycle.
struct Laser {
    pwm: Pwm<'static>,
    cfg: pwm::Config,
}

impl Laser {
    fn new(pwm: Pwm<'static>) -> Self {
        let mut cfg = pwm::Config::default();
        cfg.top = u16::from(u8::MAX);
        cfg.divider = 16u8.into(); // 125 MHz / 16 / 256 ≈ 30 kHz
        cfg.compare_a = 0;
        cfg.enable = true;
        let mut laser = Self { pwm, cfg };
        laser.pwm.set_config(&laser.cfg);
        laser
    }

    fn set(&mut self, intensity: u8) {
        self.cfg.compare_a = u16::from(intensity);
        self.pwm.set_config(&self.cfg);
    }
}

/// The toy's peripherals.
///
/// # Example
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use laser_toy::{LaserToy, ToyConfig, button::PressedTo, hardware::PicoBoard};
/// use rand::{SeedableRng, rngs::SmallRng};
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_info: &PanicInfo) -> ! { loop {} }
/// async fn example(p: embassy_rp::Peripherals) -> laser_toy::Result<()> {
///     let board = PicoBoard::new(p, PressedTo::Ground)?;
///     let mut toy = LaserToy::new(board, SmallRng::seed_from_u64(1), ToyConfig::new())?;
///     toy.run().await
/// }
/// ```
pub struct PicoBoard {
    pan: Servo<'static>,
    tilt: Servo<'static>,
    laser: Laser,
    ring: PioWs2812<'static, PIO0, 0, RING_LEN>,
    frame: [RGB8; RING_LEN],
    adc: Adc<'static, Blocking>,
    pan_pot: adc::Channel<'static>,
    tilt_pot: adc::Channel<'static>,
    button: Input<'static>,
    pressed_to: PressedTo,
    status: Output<'static>,
}

impl PicoBoard {
    /// Claim the toy's peripherals and put every output in a safe state: servos
    /// centered, laser off, ring dark (after the first flush), status LED off.
    ///
    /// `pressed_to` names the rail the button connects GPIO 13 to; the pin is pulled
    /// toward the other rail.
    ///
    /// # Errors
    ///
    /// Fails if the servo pulse limits do not fit the PWM frame.
    pub fn new(p: embassy_rp::Peripherals, pressed_to: PressedTo) -> Result<Self> {
        let pan = Servo::new_output_a(
            Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm::Config::default()),
            SERVO_MIN_US_DEFAULT,
            SERVO_MAX_US_DEFAULT,
        )?;
        let tilt = Servo::new_output_a(
            Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, pwm::Config::default()),
            SERVO_MIN_US_DEFAULT,
            SERVO_MAX_US_DEFAULT,
        )?;
        let laser = Laser::new(Pwm::new_output_a(
            p.PWM_SLICE2,
            p.PIN_20,
            pwm::Config::default(),
        ));

        let Pio {
            mut common, sm0, ..
        } = Pio::new(p.PIO0, Irqs);
        let program = PioWs2812Program::new(&mut common);
        let ring = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_2, &program);

        let adc = Adc::new_blocking(p.ADC, adc::Config::default());
        let pan_pot = adc::Channel::new_pin(p.PIN_26, Pull::None);
        let tilt_pot = adc::Channel::new_pin(p.PIN_27, Pull::None);

        let pull = match pressed_to {
            PressedTo::Ground => Pull::Up,
            PressedTo::Voltage => Pull::Down,
        };
        let button = Input::new(p.PIN_13, pull);
        let status = Output::new(p.PIN_25, Level::Low);

        #[cfg(feature = "defmt")]
        info!("pico board ready: ring={} pixels", RING_LEN);

        Ok(Self {
            pan,
            tilt,
            laser,
            ring,
            frame: [RGB8::default(); RING_LEN],
            adc,
            pan_pot,
            tilt_pot,
            button,
            pressed_to,
            status,
        })
    }

    fn read_pot(adc: &mut Adc<'static, Blocking>, channel: &mut adc::Channel<'static>) -> u16 {
        match adc.blocking_read(channel) {
            Ok(raw) => raw.min(ADC_MAX) >> 2,
            Err(_) => {
                #[cfg(feature = "defmt")]
                warn!("adc read failed; reporting 0");
                0
            }
        }
    }
}

impl Sensors for PicoBoard {
    fn read_pan_sensor(&mut self) -> u16 {
        Self::read_pot(&mut self.adc, &mut self.pan_pot).min(SENSOR_MAX)
    }

    fn read_tilt_sensor(&mut self) -> u16 {
        Self::read_pot(&mut self.adc, &mut self.tilt_pot).min(SENSOR_MAX)
    }

    fn is_button_pressed(&mut self) -> bool {
        self.pressed_to.is_pressed(self.button.is_high())
    }
}

impl Actuators for PicoBoard {
    fn set_pan(&mut self, degrees: u16) {
        self.pan.set_degrees(degrees);
    }

    fn set_tilt(&mut self, degrees: u16) {
        self.tilt.set_degrees(degrees);
    }

    fn ring_len(&self) -> usize {
        RING_LEN
    }

    fn set_ring_pixel(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.frame.get_mut(index) {
            *pixel = color;
        }
    }

    async fn flush_ring(&mut self) {
        self.ring.write(&self.frame).await;
    }

    fn set_laser(&mut self, intensity: u8) {
        self.laser.set(intensity);
    }

    fn set_status_indicator(&mut self, on: bool) {
        self.status.set_level(Level::from(on));
    }
}

impl Clock for PicoBoard {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl DelayNs for PicoBoard {
    async fn delay_ns(&mut self, ns: u32) {
        Timer::after(Duration::from_nanos(u64::from(ns))).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        Timer::after_millis(u64::from(ms)).await;
    }
}
