//! Configuration types for algorithm selection and playback pacing.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Slowest per-event delay in milliseconds (speed 1).
const BASE_DELAY_MS: u32 = 1000;

/// Delay reduction per speed unit.
const SPEED_SCALE_MS: u32 = 9;

/// Default playback speed (mid-range).
fn default_speed() -> u32 {
    50
}

/// Playback pacing configuration.
///
/// Speed maps linearly onto the per-event emission interval:
/// speed 1 yields 991 ms per event, speed 100 yields 100 ms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Playback speed, 1 (slowest) to 100 (fastest).
    #[serde(default = "default_speed")]
    pub speed: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
        }
    }
}

impl PlaybackConfig {
    /// Create a configuration with the given speed.
    pub fn with_speed(speed: u32) -> Self {
        Self { speed }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed < 1 || self.speed > 100 {
            return Err(ConfigError::SpeedOutOfRange { speed: self.speed });
        }
        Ok(())
    }

    /// Per-event emission interval derived from the speed setting.
    pub fn interval(&self) -> Duration {
        let clamped = self.speed.clamp(1, 100);
        Duration::from_millis(u64::from(BASE_DELAY_MS - SPEED_SCALE_MS * clamped))
    }
}

/// Sorting algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl SortAlgorithm {
    /// All supported sorting algorithms.
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
    ];

    /// Lowercase selector name, as used in configuration and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bubble" => Ok(SortAlgorithm::Bubble),
            "selection" => Ok(SortAlgorithm::Selection),
            "insertion" => Ok(SortAlgorithm::Insertion),
            "merge" => Ok(SortAlgorithm::Merge),
            "quick" => Ok(SortAlgorithm::Quick),
            other => Err(ConfigError::UnsupportedAlgorithm(other.to_owned())),
        }
    }
}

/// Searching algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAlgorithm {
    Linear,
    Binary,
    Dfs,
    Bfs,
}

impl SearchAlgorithm {
    /// All supported searching algorithms.
    pub const ALL: [SearchAlgorithm; 4] = [
        SearchAlgorithm::Linear,
        SearchAlgorithm::Binary,
        SearchAlgorithm::Dfs,
        SearchAlgorithm::Bfs,
    ];

    /// Lowercase selector name, as used in configuration and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            SearchAlgorithm::Linear => "linear",
            SearchAlgorithm::Binary => "binary",
            SearchAlgorithm::Dfs => "dfs",
            SearchAlgorithm::Bfs => "bfs",
        }
    }

    /// Whether playback must render the value-ascending sorted copy of the
    /// input instead of the caller's original order.
    pub fn requires_sorted_view(self) -> bool {
        matches!(self, SearchAlgorithm::Binary)
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(SearchAlgorithm::Linear),
            "binary" => Ok(SearchAlgorithm::Binary),
            "dfs" => Ok(SearchAlgorithm::Dfs),
            "bfs" => Ok(SearchAlgorithm::Bfs),
            other => Err(ConfigError::UnsupportedAlgorithm(other.to_owned())),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Playback speed {speed} outside supported range 1-100")]
    SpeedOutOfRange { speed: u32 },
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
