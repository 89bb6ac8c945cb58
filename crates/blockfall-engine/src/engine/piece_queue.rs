use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{HoldUnavailableError, PieceKind, PieceSeedParseError};

/// Single-slot lookahead queue, hold slot and per-game queue rerolls.
///
/// # Randomizer
///
/// Each draw picks one of the seven kinds uniformly. When the draw repeats
/// the kind currently queued, one more draw is taken and kept whatever it is,
/// so repeats are rarer than uniform but still possible.
///
/// # Hold
///
/// The hold slot can be used once per lock cycle. Using it disarms it until
/// [`PieceQueue::rearm_hold`] is called, which the session does whenever a
/// piece locks and the next one enters from the queue.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceKind, PieceQueue};
///
/// let mut queue = PieceQueue::new(3);
/// let first = queue.load_from_queue();
///
/// // The first hold stores the active kind and pulls the next one from the queue.
/// let upcoming = queue.queued();
/// assert_eq!(queue.hold(first), Ok(upcoming));
/// assert_eq!(queue.held(), Some(first));
///
/// // Only once per lock cycle.
/// assert!(queue.hold(upcoming).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    queued: PieceKind,
    held: Option<PieceKind>,
    can_hold: bool,
    rerolls_per_game: u32,
    rerolls_left: u32,
}

impl PieceQueue {
    /// Creates a queue with a random seed.
    #[must_use]
    pub fn new(rerolls_per_game: u32) -> Self {
        Self::with_seed(rand::rng().random(), rerolls_per_game)
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed, rerolls_per_game: u32) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let queued = rng.random();
        Self {
            rng,
            queued,
            held: None,
            can_hold: true,
            rerolls_per_game,
            rerolls_left: rerolls_per_game,
        }
    }

    /// Replaces the queued kind with a fresh draw and returns it.
    ///
    /// A draw equal to the previously queued kind is redrawn once.
    pub fn draw_next(&mut self) -> PieceKind {
        let previous = self.queued;
        let mut kind: PieceKind = self.rng.random();
        if kind == previous {
            kind = self.rng.random();
        }
        self.queued = kind;
        kind
    }

    /// Returns the queued kind and refills the queue.
    pub fn load_from_queue(&mut self) -> PieceKind {
        let kind = self.queued;
        self.draw_next();
        kind
    }

    /// Swaps `current` with the held kind, or with the queued kind when the
    /// slot is empty. Returns the kind that becomes active.
    pub fn hold(&mut self, current: PieceKind) -> Result<PieceKind, HoldUnavailableError> {
        if !self.can_hold {
            return Err(HoldUnavailableError);
        }
        self.can_hold = false;
        Ok(self
            .held
            .replace(current)
            .unwrap_or_else(|| self.load_from_queue()))
    }

    /// Makes the hold slot usable again.
    pub fn rearm_hold(&mut self) {
        self.can_hold = true;
    }

    /// Replaces the queued kind if a reroll is left this game.
    pub fn reroll(&mut self) -> Option<PieceKind> {
        self.rerolls_left = self.rerolls_left.checked_sub(1)?;
        Some(self.draw_next())
    }

    /// Empties the hold slot, restores rerolls and draws a fresh queued kind.
    pub fn reset(&mut self) {
        self.held = None;
        self.can_hold = true;
        self.rerolls_left = self.rerolls_per_game;
        self.draw_next();
    }

    #[must_use]
    pub fn queued(&self) -> PieceKind {
        self.queued
    }

    #[must_use]
    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    #[must_use]
    pub fn rerolls_left(&self) -> u32 {
        self.rerolls_left
    }
}

/// Seed of the piece randomizer.
///
/// A 128-bit value written as 32 hexadecimal digits, most significant first.
/// The same seed always yields the same piece sequence.
///
/// ```
/// use blockfall_engine::PieceSeed;
///
/// let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
/// assert!("xyz".parse::<PieceSeed>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = PieceSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(PieceSeedParseError::InvalidDigit(c));
        }
        if s.len() != 32 {
            return Err(PieceSeedParseError::InvalidLength(s.len()));
        }
        u128::from_str_radix(s, 16)
            .map(|num| Self(num.to_be_bytes()))
            .map_err(|_| PieceSeedParseError::InvalidLength(s.len()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
