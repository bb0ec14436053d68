//! The toy's operating modes and the order the button cycles through them.

use core::fmt;

/// Human-readable names, indexed by [`Mode::index`].
const MODE_NAMES: [&str; Mode::COUNT] = ["manual", "autonomous", "ambient"];

/// Operating mode of the toy.
///
/// Exactly one mode is active at a time. A button release advances
/// Manual → Autonomous → Ambient → Manual.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// The potentiometers steer the gimbal directly.
    #[default]
    Manual,
    /// The gimbal sweeps to random targets in rapid and normal bursts.
    Autonomous,
    /// The potentiometers pick the light ring's color and brightness.
    Ambient,
}

impl Mode {
    /// Number of modes in the cycle.
    pub const COUNT: usize = 3;

    /// Every mode, in cycle order.
    pub const ALL: [Self; Self::COUNT] = [Self::Manual, Self::Autonomous, Self::Ambient];

    /// The mode a button release moves to.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Manual => Self::Autonomous,
            Self::Autonomous => Self::Ambient,
            Self::Ambient => Self::Manual,
        }
    }

    /// Position of this mode in the cycle.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Lowercase name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        MODE_NAMES
            .get(usize::from(self.index()))
            .copied()
            .unwrap_or("unknown")
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
