use serde::{Deserialize, Serialize};

/// Auto-repeat timing of a held button, in frames since the press.
///
/// A held button fires again `delay` frames after the press and every
/// `interval` frames after that.
///
/// ```
/// use blockfall_engine::RepeatRate;
///
/// let rate = RepeatRate::new(8, 4);
/// let fired: Vec<u32> = (1..=20).filter(|n| rate.fires_at(*n)).collect();
/// assert_eq!(fired, [8, 12, 16, 20]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatRate {
    pub delay: u32,
    pub interval: u32,
}

impl RepeatRate {
    #[must_use]
    pub const fn new(delay: u32, interval: u32) -> Self {
        Self { delay, interval }
    }

    /// Fixed repeat with no separate initial delay.
    #[must_use]
    pub const fn every(interval: u32) -> Self {
        Self::new(interval, interval)
    }

    #[must_use]
    pub const fn fires_at(self, frames_held: u32) -> bool {
        if frames_held == 0 || frames_held < self.delay {
            return false;
        }
        if self.interval == 0 {
            return frames_held == self.delay;
        }
        (frames_held - self.delay) % self.interval == 0
    }
}

/// Repeat timing per gameplay button group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRepeatConfig {
    /// Left and right.
    pub shift: RepeatRate,
    pub rotate: RepeatRate,
    pub hard_drop: RepeatRate,
    pub soft_drop: RepeatRate,
}

impl Default for InputRepeatConfig {
    fn default() -> Self {
        Self {
            shift: RepeatRate::new(8, 4),
            rotate: RepeatRate::every(15),
            hard_drop: RepeatRate::every(15),
            soft_drop: RepeatRate::every(3),
        }
    }
}

/// What a button did this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Trigger {
    Idle,
    /// Released last frame, held this frame.
    Press,
    /// Held long enough to fire again.
    Repeat,
}

impl Trigger {
    #[must_use]
    pub const fn fired(self) -> bool {
        !self.is_idle()
    }
}

/// Edge and hold-duration tracking of one button.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    held: bool,
    frames_held: u32,
}

impl ButtonState {
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.held
    }

    #[must_use]
    pub const fn frames_held(&self) -> u32 {
        self.frames_held
    }

    /// Records this frame's level and reports whether the button fires.
    ///
    /// Without a `repeat` rate only the press fires.
    pub fn update(&mut self, down: bool, repeat: Option<RepeatRate>) -> Trigger {
        if !down {
            *self = Self::default();
            return Trigger::Idle;
        }
        if !self.held {
            self.held = true;
            self.frames_held = 0;
            return Trigger::Press;
        }
        self.frames_held = self.frames_held.saturating_add(1);
        match repeat {
            Some(rate) if rate.fires_at(self.frames_held) => Trigger::Repeat,
            _ => Trigger::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired_frames(repeat: Option<RepeatRate>, frames: u32) -> Vec<u32> {
        let mut state = ButtonState::default();
        (0..frames)
            .filter_map(|frame| state.update(true, repeat).fired().then_some(frame))
            .collect()
    }

    #[test]
    fn test_edge_only_fires_once() {
        assert_eq!(fired_frames(None, 30), [0]);
    }

    #[test]
    fn test_staggered_shift_repeat() {
        let rate = InputRepeatConfig::default().shift;
        assert_eq!(fired_frames(Some(rate), 21), [0, 8, 12, 16, 20]);
    }

    #[test]
    fn test_fixed_rotation_repeat() {
        let rate = InputRepeatConfig::default().rotate;
        assert_eq!(fired_frames(Some(rate), 46), [0, 15, 30, 45]);
    }

    #[test]
    fn test_release_rearms_press() {
        let mut state = ButtonState::default();
        assert_eq!(state.update(true, None), Trigger::Press);
        assert_eq!(state.update(true, None), Trigger::Idle);
        assert_eq!(state.update(false, None), Trigger::Idle);
        assert!(!state.is_held());
        assert_eq!(state.update(true, None), Trigger::Press);
    }
}
