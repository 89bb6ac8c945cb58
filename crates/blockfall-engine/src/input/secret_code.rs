use super::Button;

const MATCH_LOW: u32 = 0x3434_6565;
const MATCH_HIGH: u32 = 0x1122;

/// Shift register of recent start-menu presses, one hex digit per press.
///
/// Pressing Start compares the register against a fixed pattern and clears
/// it. The pattern is checked by masking, so a digit whose bits cover the
/// expected digit also matches.
///
/// ```
/// use blockfall_engine::{Button, SecretCode};
///
/// let mut code = SecretCode::default();
/// for button in [Button::Up, Button::Up, Button::Down, Button::Down] {
///     code.push(button);
/// }
/// for button in [Button::Left, Button::Right, Button::Left, Button::Right] {
///     code.push(button);
/// }
/// for button in [Button::B, Button::A, Button::B, Button::A] {
///     code.push(button);
/// }
/// assert!(code.submit());
/// assert!(!code.submit());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SecretCode {
    low: u32,
    high: u32,
}

impl SecretCode {
    /// Digit recorded for a button press; Start is 0.
    #[must_use]
    pub const fn digit(button: Button) -> u32 {
        match button {
            Button::Start => 0,
            Button::Up => 1,
            Button::Down => 2,
            Button::Left => 3,
            Button::Right => 4,
            Button::A => 5,
            Button::B => 6,
            Button::C => 7,
            Button::LeftShift => 8,
            Button::RightShift => 9,
            Button::Stop => 10,
        }
    }

    pub fn push(&mut self, button: Button) {
        self.high = (self.high << 4) | (self.low >> 28);
        self.low = (self.low << 4) | Self::digit(button);
    }

    /// Checks the register and clears it. Returns whether the code matched.
    pub fn submit(&mut self) -> bool {
        let matched = (self.low & MATCH_LOW) == MATCH_LOW && (self.high & MATCH_HIGH) == MATCH_HIGH;
        *self = Self::default();
        matched
    }
}
