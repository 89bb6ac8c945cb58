use super::config::LockConfig;

/// Outcome of one gravity frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GravityTick {
    /// The timer has not expired yet.
    Wait,
    /// The piece should fall one row.
    Fall,
    /// The piece is resting on something and should lock.
    Lock,
}

/// Frame counter driving automatic falls and locks.
///
/// While the piece can fall, the timer fires every `interval` frames. Once
/// the piece rests on the floor or the stack the effective interval is at
/// least [`LockConfig::floor_frames`], which leaves time to slide the piece
/// before it locks even at the highest speeds.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GravityTick, GravityTimer, LockConfig};
///
/// let lock = LockConfig::default();
/// let mut timer = GravityTimer::new();
///
/// // Falling at 3 frames per row.
/// assert_eq!(timer.advance(3, false, &lock), GravityTick::Wait);
/// assert_eq!(timer.advance(3, false, &lock), GravityTick::Wait);
/// assert_eq!(timer.advance(3, false, &lock), GravityTick::Fall);
///
/// // Grounded: waits for the lock floor instead.
/// for _ in 1..lock.floor_frames {
///     assert_eq!(timer.advance(3, true, &lock), GravityTick::Wait);
/// }
/// assert_eq!(timer.advance(3, true, &lock), GravityTick::Lock);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GravityTimer {
    counter: u32,
    expedited: bool,
}

impl GravityTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: 0,
            expedited: false,
        }
    }

    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    #[must_use]
    pub const fn is_expedited(&self) -> bool {
        self.expedited
    }

    /// Advances the timer by one frame.
    ///
    /// `grounded` tells whether the piece is unable to move down this frame.
    pub fn advance(&mut self, interval: u32, grounded: bool, lock: &LockConfig) -> GravityTick {
        let threshold = if grounded {
            interval.max(lock.floor_frames)
        } else {
            interval
        };
        self.counter += 1;
        if self.counter < threshold && !self.expedited {
            return GravityTick::Wait;
        }
        self.reset();
        if grounded {
            GravityTick::Lock
        } else {
            GravityTick::Fall
        }
    }

    /// Restarts the count, as after a fall or a manual soft drop.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.expedited = false;
    }

    /// Makes the next [`GravityTimer::advance`] fire regardless of the count.
    pub fn expedite(&mut self) {
        self.expedited = true;
    }

    /// Takes back `lock.rotation_grace_frames` when the timer is that close to
    /// firing, so a rotation at the last moment does not lock immediately.
    pub fn grant_rotation_grace(&mut self, interval: u32, lock: &LockConfig) {
        if self.counter + lock.rotation_grace_frames >= interval {
            self.counter = self.counter.saturating_sub(lock.rotation_grace_frames);
        }
    }
}
