use std::fmt;

/// Logical controller button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    A = 4,
    B = 5,
    C = 6,
    LeftShift = 7,
    RightShift = 8,
    Start = 9,
    Stop = 10,
}

impl Button {
    pub const LEN: usize = 11;

    pub const ALL: [Self; Self::LEN] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
        Button::C,
        Button::LeftShift,
        Button::RightShift,
        Button::Start,
        Button::Stop,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of buttons held down during one frame.
///
/// ```
/// use blockfall_engine::{Button, ButtonSet};
///
/// let buttons: ButtonSet = [Button::Left, Button::A].into_iter().collect();
/// assert!(buttons.contains(Button::A));
/// assert!(!buttons.contains(Button::Right));
/// assert_eq!(buttons.iter().count(), 2);
/// ```
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonSet(u16);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub const fn with(self, button: Button) -> Self {
        Self(self.0 | button.bit())
    }

    #[must_use]
    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl From<Button> for ButtonSet {
    fn from(button: Button) -> Self {
        Self::EMPTY.with(button)
    }
}

impl fmt::Debug for ButtonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
