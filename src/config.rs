//! Runtime configuration of the panel driver

use core::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::PixelClass;

/// Lower red threshold used by the Waveshare/Good Display reference drivers
pub const DEFAULT_RED_LOW: u8 = 64;
/// Upper red threshold used by the Waveshare/Good Display reference drivers
pub const DEFAULT_RED_HIGH: u8 = 192;

/// Two-threshold classifier from 8-bit luma to [PixelClass]
///
/// - `luma < low` is black
/// - `low <= luma < high` is red
/// - `luma >= high` is white
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RedBounds {
    low: u8,
    high: u8,
}

impl RedBounds {
    /// Creates new bounds, `low` must not be larger than `high`
    ///
    /// `low == high` is accepted and disables red entirely.
    pub const fn new(low: u8, high: u8) -> Result<Self, ConfigError> {
        if low > high {
            return Err(ConfigError::InvertedRedBounds { low, high });
        }
        Ok(RedBounds { low, high })
    }

    /// Creates bounds without checking their order
    ///
    /// With `low > high` the red band is empty: everything below `low` is black
    /// and everything else is white.
    pub const fn new_unchecked(low: u8, high: u8) -> Self {
        RedBounds { low, high }
    }

    /// Lower bound, first luma value that is no longer black
    pub const fn low(&self) -> u8 {
        self.low
    }

    /// Upper bound, first luma value that is white
    pub const fn high(&self) -> u8 {
        self.high
    }

    /// Classifies a single luma value
    pub const fn classify(&self, luma: u8) -> PixelClass {
        if luma < self.low {
            PixelClass::Black
        } else if luma < self.high {
            PixelClass::Red
        } else {
            PixelClass::White
        }
    }
}

impl Default for RedBounds {
    fn default() -> Self {
        RedBounds::new_unchecked(DEFAULT_RED_LOW, DEFAULT_RED_HIGH)
    }
}

/// How the driver waits for the busy line to be released
///
/// Every poll resends the `GET_STATUS` command before sampling the busy pin, the
/// controller only updates the line in response to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusyWait {
    /// Sleep between two polls in µs, 0 means spinning
    pub poll_interval_us: u32,
    /// Give up after this many ms with `PanelNotResponding`, `None` waits forever
    pub timeout_ms: Option<u32>,
}

impl BusyWait {
    /// Waits as long as it takes, a disconnected panel blocks forever
    pub const fn unbounded(poll_interval_us: u32) -> Self {
        BusyWait {
            poll_interval_us,
            timeout_ms: None,
        }
    }

    /// Waits at most `timeout_ms`, polling every `poll_interval_us`
    pub const fn bounded(poll_interval_us: u32, timeout_ms: u32) -> Self {
        BusyWait {
            poll_interval_us,
            timeout_ms: Some(timeout_ms),
        }
    }

    /// A timeout is measured in poll intervals, so it needs a non-zero interval
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms.is_some() && self.poll_interval_us == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}

impl Default for BusyWait {
    /// 10ms between polls, giving up after a minute
    ///
    /// A full black/white/red refresh of this panel takes around 20s.
    fn default() -> Self {
        BusyWait::bounded(10_000, 60_000)
    }
}

/// Everything the driver can be tuned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Thresholds used by [display_image](crate::gdey075z08::Gdey075z08::display_image)
    pub red_bounds: RedBounds,
    /// Busy line polling
    pub busy_wait: BusyWait,
}

impl Config {
    /// Replaces the red thresholds
    pub fn with_red_bounds(mut self, red_bounds: RedBounds) -> Self {
        self.red_bounds = red_bounds;
        self
    }

    /// Replaces the busy-wait settings
    pub fn with_busy_wait(mut self, busy_wait: BusyWait) -> Self {
        self.busy_wait = busy_wait;
        self
    }

    /// Checks the combination of settings
    ///
    /// Catches inverted bounds made with [RedBounds::new_unchecked] or deserialized
    /// from somewhere else.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.red_bounds.low > self.red_bounds.high {
            return Err(ConfigError::InvertedRedBounds {
                low: self.red_bounds.low,
                high: self.red_bounds.high,
            });
        }
        self.busy_wait.validate()
    }
}

/// Rejected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// The lower red threshold is above the upper one
    InvertedRedBounds {
        /// Lower threshold
        low: u8,
        /// Upper threshold
        high: u8,
    },
    /// A timeout was requested together with a zero poll interval
    ZeroPollInterval,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvertedRedBounds { low, high } => write!(
                f,
                "invalid configuration: red bounds inverted (low {low} > high {high})"
            ),
            Self::ZeroPollInterval => write!(
                f,
                "invalid configuration: a busy timeout needs a non-zero poll interval"
            ),
        }
    }
}
