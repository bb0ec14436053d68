//! The mode button: rate-limited sampling, release detection, and hold-to-adjust laser.
//!
//! See [`ButtonMonitor`] for the polling contract.

use embassy_time::{Duration, Instant};

use crate::board::{Board, SENSOR_MAX, pause};

// ============================================================================
// PressedTo - How the button is wired
// ============================================================================

/// Describes how the button is physically wired.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressedTo {
    /// Button connects pin to voltage (3.3V) when pressed.
    /// Uses internal pull-down resistor. Pin reads HIGH when pressed.
    Voltage,

    /// Button connects pin to ground (GND) when pressed.
    /// Uses internal pull-up resistor. Pin reads LOW when pressed.
    /// The toy's button is wired this way.
    Ground,
}

impl PressedTo {
    /// Whether a raw pin level means "pressed" for this wiring.
    #[must_use]
    pub const fn is_pressed(self, pin_is_high: bool) -> bool {
        match self {
            Self::Voltage => pin_is_high,
            Self::Ground => !pin_is_high,
        }
    }
}

// ============================================================================
// ButtonEvent
// ============================================================================

/// What a poll of the button observed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// The button stayed down across two samples; the laser followed the pan pot until
    /// release and was left at `laser_brightness`.
    Held {
        /// Last brightness written to the laser.
        laser_brightness: u8,
    },
    /// The button went from pressed to released.
    Released,
}

// ============================================================================
// ButtonMonitor
// ============================================================================

/// Debounces the mode button by sampling it at a fixed interval.
///
/// Call [`poll`](Self::poll) once per main-loop iteration. Calls that arrive before
/// `poll_interval` has passed since the last sample do nothing, which is what filters
/// contact bounce. A sample that finds the button still down from the previous sample
/// enters [`hold_to_adjust_laser`] and blocks until release. A sample that finds the
/// button up after a pressed sample reports [`ButtonEvent::Released`], exactly once.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMonitor {
    poll_interval: Duration,
    hold_sample_interval: Duration,
    last_checked: Option<Instant>,
    was_pressed: bool,
}

impl ButtonMonitor {
    /// Create a monitor sampling every `poll_interval`; the hold loop re-reads the pot
    /// every `hold_sample_interval`.
    #[must_use]
    pub const fn new(poll_interval: Duration, hold_sample_interval: Duration) -> Self {
        Self {
            poll_interval,
            hold_sample_interval,
            last_checked: None,
            was_pressed: false,
        }
    }

    /// Whether the most recent sample saw the button pressed.
    #[must_use]
    pub const fn was_pressed(&self) -> bool {
        self.was_pressed
    }

    /// When the button was last sampled, if ever.
    #[must_use]
    pub const fn last_checked(&self) -> Option<Instant> {
        self.last_checked
    }

    /// Sample the button if the poll interval has elapsed.
    ///
    /// The "previously pressed" memory is updated after every sample, whether or not an
    /// event fired.
    pub async fn poll<B: Board>(&mut self, board: &mut B) -> Option<ButtonEvent> {
        if !self.is_due(board.now()) {
            return None;
        }

        let pressed = board.is_button_pressed();
        let event = match (self.was_pressed, pressed) {
            (true, true) => hold_to_adjust_laser(board, self.hold_sample_interval)
                .await
                .map(|laser_brightness| ButtonEvent::Held { laser_brightness }),
            (true, false) => Some(ButtonEvent::Released),
            (false, _) => None,
        };

        self.was_pressed = pressed;
        self.last_checked = Some(board.now());
        event
    }

    fn is_due(&self, now: Instant) -> bool {
        self.last_checked.is_none_or(|last_checked| {
            now.checked_duration_since(last_checked)
                .is_some_and(|elapsed| elapsed >= self.poll_interval)
        })
    }
}

/// While the button stays pressed, drive the laser from the pan potentiometer.
///
/// Blocks the whole control loop until release. Returns the last brightness written, or
/// `None` if the button was already up.
pub async fn hold_to_adjust_laser<B: Board>(
    board: &mut B,
    sample_interval: Duration,
) -> Option<u8> {
    let mut brightness = None;
    while board.is_button_pressed() {
        let level = laser_level(board.read_pan_sensor());
        board.set_laser(level);
        brightness = Some(level);
        pause(board, sample_interval).await;
    }
    brightness
}

/// Scale a potentiometer reading to laser brightness.
#[must_use]
pub fn laser_level(reading: u16) -> u8 {
    u8::try_from(reading.min(SENSOR_MAX) / 4).unwrap_or(u8::MAX)
}
