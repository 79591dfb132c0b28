//! Pacing configuration: [`Speed`], [`DelayTable`], [`AnimationConfig`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// User-selectable animation speed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Self::Slow, Self::Medium, Self::Fast];

    /// The next faster speed, saturating at [`Speed::Fast`].
    pub fn faster(self) -> Self {
        match self {
            Self::Slow => Self::Medium,
            Self::Medium | Self::Fast => Self::Fast,
        }
    }

    /// The next slower speed, saturating at [`Speed::Slow`].
    pub fn slower(self) -> Self {
        match self {
            Self::Fast => Self::Medium,
            Self::Medium | Self::Slow => Self::Slow,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        })
    }
}

/// Returned when a string names no known speed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSpeedError(pub String);

impl fmt::Display for ParseSpeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown speed \u{201c}{}\u{201d} (expected slow, medium or fast)",
            self.0
        )
    }
}

impl std::error::Error for ParseSpeedError {}

impl FromStr for Speed {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "medium" => Ok(Self::Medium),
            "fast" => Ok(Self::Fast),
            _ => Err(ParseSpeedError(s.to_string())),
        }
    }
}

/// Delay between steps for each [`Speed`], in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DelayTable {
    pub slow: u64,
    pub medium: u64,
    pub fast: u64,
}

impl Default for DelayTable {
    fn default() -> Self {
        Self {
            slow: 75,
            medium: 40,
            fast: 0,
        }
    }
}

impl DelayTable {
    /// The wait after each step at `speed`.
    pub fn delay(&self, speed: Speed) -> Duration {
        Duration::from_millis(match speed {
            Speed::Slow => self.slow,
            Speed::Medium => self.medium,
            Speed::Fast => self.fast,
        })
    }
}

/// Configuration for creating an [`AnimationController`](crate::AnimationController).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    pub delays: DelayTable,
    /// Initial speed; can be changed while running.
    pub speed: Speed,
    /// Keep walls when the grid is reset at the start of a run.
    pub keep_walls: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delays: DelayTable::default(),
            speed: Speed::default(),
            keep_walls: true,
        }
    }
}
