use serde::{Deserialize, Serialize};

use super::settings::Settings;
use crate::input::InputRepeatConfig;

/// Tuning constants of a game session.
///
/// Every field falls back to its default when missing from a deserialized
/// document, so a configuration file only needs to name what it changes.
///
/// # Example
///
/// ```
/// use blockfall_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "allow_kicks": false }"#).unwrap();
/// assert!(!config.allow_kicks);
/// assert_eq!(config.gravity.initial_interval, 48);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gravity: GravityConfig,
    pub lock: LockConfig,
    /// Whether a blocked rotation may shift the piece to make it fit.
    pub allow_kicks: bool,
    pub scoring: ScoringConfig,
    /// Queue rerolls available per game.
    pub queue_rerolls: u32,
    pub timing: TimingConfig,
    pub input: InputRepeatConfig,
    /// Option values at power-on.
    pub settings: Settings,
    pub high_scores: HighScoreConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: GravityConfig::default(),
            lock: LockConfig::default(),
            allow_kicks: true,
            scoring: ScoringConfig::default(),
            queue_rerolls: 3,
            timing: TimingConfig::default(),
            input: InputRepeatConfig::default(),
            settings: Settings::default(),
            high_scores: HighScoreConfig::default(),
        }
    }
}

/// Level-to-speed curve, in frames per automatic one-row fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    /// Interval at level 1.
    pub initial_interval: u32,
    /// Interval never drops below this.
    pub min_interval: u32,
    /// Decrement applied when reaching a level below `slow_from_level`.
    pub fast_step: u32,
    /// Decrement applied when reaching `slow_from_level` or above.
    pub slow_step: u32,
    pub slow_from_level: u32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            initial_interval: 48,
            min_interval: 3,
            fast_step: 2,
            slow_step: 1,
            slow_from_level: 15,
        }
    }
}

impl GravityConfig {
    /// Returns the interval after reaching `new_level`.
    ///
    /// ```
    /// use blockfall_engine::GravityConfig;
    ///
    /// let gravity = GravityConfig::default();
    /// assert_eq!(gravity.next_interval(48, 2), 46);
    /// assert_eq!(gravity.next_interval(20, 15), 19);
    /// assert_eq!(gravity.next_interval(4, 30), 3);
    /// assert_eq!(gravity.next_interval(3, 31), 3);
    /// ```
    #[must_use]
    pub fn next_interval(&self, current: u32, new_level: u32) -> u32 {
        if current <= self.min_interval {
            return current;
        }
        let step = if new_level < self.slow_from_level {
            self.fast_step
        } else {
            self.slow_step
        };
        current.saturating_sub(step).max(self.min_interval)
    }
}

/// Grace periods that delay locking a grounded piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Minimum frames a grounded piece waits before locking.
    pub floor_frames: u32,
    /// Frames a successful rotation takes back from the fall timer when it is
    /// about to fire.
    pub rotation_grace_frames: u32,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            floor_frames: 10,
            rotation_grace_frames: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Multiplied by the square of the number of rows cleared at once.
    pub line_clear_base: u32,
    /// Multiplied by the level reached.
    pub level_up_bonus: u32,
    pub hard_drop_bonus: u32,
    /// Lines needed to leave level 1.
    pub first_target_lines: u32,
    /// Added to the line target on every level up.
    pub target_increment: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            line_clear_base: 25,
            level_up_bonus: 125,
            hard_drop_bonus: 25,
            first_target_lines: 10,
            target_increment: 2,
        }
    }
}

/// Durations of the timed session modes, in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub countdown_frames: u32,
    pub line_clear_frames: u32,
    pub game_over_frames: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            countdown_frames: 210,
            line_clear_frames: 15,
            game_over_frames: 540,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScoreConfig {
    pub score: u32,
    pub level: u32,
}

impl Default for HighScoreConfig {
    fn default() -> Self {
        Self {
            score: 50_000,
            level: 15,
        }
    }
}
