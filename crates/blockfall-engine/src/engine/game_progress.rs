use super::config::{GravityConfig, HighScoreConfig, ScoringConfig};

/// Reward for reaching a new level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub bonus: u32,
    pub gravity_interval: u32,
}

/// Score, line counts, level and speed of the current game.
///
/// All counters only grow during a game; [`GameProgress::reset`] starts a new
/// one at level 1.
///
/// # Scoring
///
/// - Clearing `n` rows at once scores `n * n * 25`.
/// - A hard drop scores 25.
/// - Reaching level `l` scores `l * 125`.
///
/// Level `l` ends after the current-level line count reaches its target,
/// which starts at 10 and grows by 2 per level.
///
/// # Example
///
/// ```
/// use blockfall_engine::{EngineConfig, GameProgress};
///
/// let config = EngineConfig::default();
/// let mut progress = GameProgress::new(&config.scoring, &config.gravity);
///
/// assert_eq!(progress.record_line_clear(4), 400);
/// assert_eq!(progress.score(), 400);
/// assert_eq!(progress.total_lines(), 4);
/// assert!(progress.check_level_up(&config.gravity).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameProgress {
    scoring: ScoringConfig,
    score: u32,
    total_lines: u32,
    current_lines: u32,
    level: u32,
    target_lines: u32,
    gravity_interval: u32,
}

impl GameProgress {
    #[must_use]
    pub fn new(scoring: &ScoringConfig, gravity: &GravityConfig) -> Self {
        Self {
            scoring: *scoring,
            score: 0,
            total_lines: 0,
            current_lines: 0,
            level: 1,
            target_lines: scoring.first_target_lines,
            gravity_interval: gravity.initial_interval,
        }
    }

    pub fn reset(&mut self, gravity: &GravityConfig) {
        *self = Self::new(&self.scoring, gravity);
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn total_lines(&self) -> u32 {
        self.total_lines
    }

    /// Lines cleared since the last level up.
    #[must_use]
    pub const fn current_lines(&self) -> u32 {
        self.current_lines
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn target_lines(&self) -> u32 {
        self.target_lines
    }

    /// Lines still needed to reach the next level.
    #[must_use]
    pub const fn remaining_lines(&self) -> u32 {
        self.target_lines.saturating_sub(self.current_lines)
    }

    /// Frames per automatic one-row fall at the current level.
    #[must_use]
    pub const fn gravity_interval(&self) -> u32 {
        self.gravity_interval
    }

    /// Scores `count` rows cleared by a single lock and returns the points.
    pub fn record_line_clear(&mut self, count: usize) -> u32 {
        let Ok(lines) = u32::try_from(count) else {
            return 0;
        };
        let points = lines * lines * self.scoring.line_clear_base;
        self.score = self.score.saturating_add(points);
        self.total_lines += lines;
        self.current_lines += lines;
        points
    }

    pub fn add_hard_drop_bonus(&mut self) {
        self.score = self.score.saturating_add(self.scoring.hard_drop_bonus);
    }

    /// Advances to the next level once the line target is met.
    pub fn check_level_up(&mut self, gravity: &GravityConfig) -> Option<LevelUp> {
        if self.current_lines < self.target_lines {
            return None;
        }
        self.target_lines += self.scoring.target_increment;
        self.current_lines = 0;
        self.level += 1;
        let bonus = self.level * self.scoring.level_up_bonus;
        self.score = self.score.saturating_add(bonus);
        self.gravity_interval = gravity.next_interval(self.gravity_interval, self.level);
        Some(LevelUp {
            level: self.level,
            bonus,
            gravity_interval: self.gravity_interval,
        })
    }
}

/// Best score and level reached since the program started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScores {
    pub score: u32,
    pub level: u32,
}

impl From<HighScoreConfig> for HighScores {
    fn from(config: HighScoreConfig) -> Self {
        Self {
            score: config.score,
            level: config.level,
        }
    }
}

impl HighScores {
    /// Raises each record the finished game beat. Returns whether any changed.
    pub fn update(&mut self, progress: &GameProgress) -> bool {
        let mut changed = false;
        if progress.score() > self.score {
            self.score = progress.score();
            changed = true;
        }
        if progress.level() > self.level {
            self.level = progress.level();
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress() -> (GameProgress, GravityConfig) {
        let gravity = GravityConfig::default();
        (GameProgress::new(&ScoringConfig::default(), &gravity), gravity)
    }

    mod scoring {
        use super::*;

        #[test]
        fn test_line_clear_points_are_quadratic() {
            let (mut p, _) = progress();
            assert_eq!(p.record_line_clear(1), 25);
            assert_eq!(p.record_line_clear(2), 100);
            assert_eq!(p.record_line_clear(3), 225);
            assert_eq!(p.record_line_clear(4), 400);
            assert_eq!(p.score(), 750);
            assert_eq!(p.total_lines(), 10);
            assert_eq!(p.current_lines(), 10);
        }

        #[test]
        fn test_hard_drop_bonus() {
            let (mut p, _) = progress();
            p.add_hard_drop_bonus();
            p.add_hard_drop_bonus();
            assert_eq!(p.score(), 50);
            assert_eq!(p.total_lines(), 0);
        }
    }

    mod levels {
        use super::*;

        #[test]
        fn test_initial_state() {
            let (p, gravity) = progress();
            assert_eq!(p.level(), 1);
            assert_eq!(p.target_lines(), 10);
            assert_eq!(p.remaining_lines(), 10);
            assert_eq!(p.gravity_interval(), gravity.initial_interval);
        }

        #[test]
        fn test_level_up_at_target() {
            let (mut p, gravity) = progress();
            p.record_line_clear(4);
            p.record_line_clear(4);
            assert!(p.check_level_up(&gravity).is_none());
            p.record_line_clear(2);

            let level_up = p.check_level_up(&gravity).unwrap();
            assert_eq!(
                level_up,
                LevelUp {
                    level: 2,
                    bonus: 250,
                    gravity_interval: 46,
                }
            );
            assert_eq!(p.score(), 400 + 400 + 100 + 250);
            assert_eq!(p.current_lines(), 0);
            assert_eq!(p.total_lines(), 10);
            assert_eq!(p.target_lines(), 12);
        }

        #[test]
        fn test_interval_decreases_to_floor() {
            let (mut p, gravity) = progress();
            let mut previous = p.gravity_interval();
            for _ in 0..60 {
                while p.check_level_up(&gravity).is_none() {
                    p.record_line_clear(4);
                }
                let interval = p.gravity_interval();
                assert!(interval >= gravity.min_interval);
                if previous > gravity.min_interval {
                    assert!(interval < previous);
                }
                previous = interval;
            }
            assert_eq!(p.gravity_interval(), gravity.min_interval);
        }

        #[test]
        fn test_reset_restores_level_one() {
            let (mut p, gravity) = progress();
            p.record_line_clear(4);
            p.record_line_clear(4);
            p.record_line_clear(4);
            p.check_level_up(&gravity).unwrap();
            p.reset(&gravity);
            assert_eq!(p, progress().0);
        }
    }

    mod high_scores {
        use super::*;

        #[test]
        fn test_update_only_raises() {
            let (mut p, _) = progress();
            let mut high = HighScores::from(HighScoreConfig::default());
            assert!(!high.update(&p));

            for _ in 0..200 {
                p.record_line_clear(4);
            }
            assert!(high.update(&p));
            assert_eq!(high.score, 80_000);
            assert_eq!(high.level, 15);
        }
    }
}
