//! Module dedicated to message priority.

use serde::{Deserialize, Serialize};

/// The message priority, as carried by the `X-Priority` header.
///
/// Numeric levels go from 1 (highest) to 5 (lowest) and clamp into
/// this range when built from an integer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Highest,
    High,
    #[default]
    Normal,
    Low,
    Lowest,
}

impl Priority {
    /// Builds a priority from a numeric level, clamped into `[1, 5]`.
    pub fn from_level(level: i64) -> Self {
        match level {
            ..=1 => Self::Highest,
            2 => Self::High,
            3 => Self::Normal,
            4 => Self::Low,
            _ => Self::Lowest,
        }
    }

    /// Returns the numeric level of the priority, from 1 (highest)
    /// to 5 (lowest).
    pub fn level(&self) -> u8 {
        match self {
            Self::Highest => 1,
            Self::High => 2,
            Self::Normal => 3,
            Self::Low => 4,
            Self::Lowest => 5,
        }
    }
}

impl From<u8> for Priority {
    fn from(level: u8) -> Self {
        Self::from_level(level.into())
    }
}

impl From<i32> for Priority {
    fn from(level: i32) -> Self {
        Self::from_level(level.into())
    }
}
