use arrayvec::ArrayVec;

use crate::RotationDirection;

use super::{Button, ButtonSet, ButtonState, InputRepeatConfig, RepeatRate, SecretCode, Trigger};

/// Which action table applies this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum InputContext {
    StartMenu,
    OptionsMenu,
    Playing,
    Paused,
    /// Countdown, line-clear animation, game-over display.
    Inactive,
}

/// Discrete request produced from button triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MenuUp,
    MenuDown,
    MenuLeft,
    MenuRight,
    MenuConfirm,
    MenuCancel,
    UnlockSecretPalette,
    TogglePause,
    Pause,
    OpenOptions,
    /// End the game at once and return to the start menu.
    Forfeit,
    Hold,
    RerollQueue,
    Rotate(RotationDirection),
    HardDrop,
    /// `initial_press` is set on the press itself, unset on auto-repeat.
    SoftDrop {
        initial_press: bool,
    },
    MoveLeft,
    MoveRight,
}

pub type Actions = ArrayVec<Action, { Button::LEN }>;

/// Converts per-frame button levels into actions.
///
/// Every button's edge state is tracked on every frame whatever the context,
/// so a button still held from a previous mode does not fire again.
///
/// # Example
///
/// ```
/// use blockfall_engine::{
///     Action, Button, ButtonSet, InputContext, InputRepeatConfig, InputStateMachine,
/// };
///
/// let mut input = InputStateMachine::new(InputRepeatConfig::default());
/// let left = ButtonSet::from(Button::Left);
///
/// assert_eq!(input.step(left, InputContext::Playing).as_slice(), &[Action::MoveLeft]);
/// // Held: nothing until the repeat delay has passed.
/// for _ in 1..8 {
///     assert!(input.step(left, InputContext::Playing).is_empty());
/// }
/// assert_eq!(input.step(left, InputContext::Playing).as_slice(), &[Action::MoveLeft]);
/// ```
#[derive(Debug, Clone)]
pub struct InputStateMachine {
    repeat: InputRepeatConfig,
    buttons: [ButtonState; Button::LEN],
    secret: SecretCode,
}

impl InputStateMachine {
    #[must_use]
    pub fn new(repeat: InputRepeatConfig) -> Self {
        Self {
            repeat,
            buttons: [ButtonState::default(); Button::LEN],
            secret: SecretCode::default(),
        }
    }

    #[must_use]
    pub fn button(&self, button: Button) -> &ButtonState {
        &self.buttons[button.index()]
    }

    fn repeat_rate(&self, button: Button, context: InputContext) -> Option<RepeatRate> {
        if !context.is_playing() {
            return None;
        }
        match button {
            Button::Left | Button::Right => Some(self.repeat.shift),
            Button::A | Button::C => Some(self.repeat.rotate),
            Button::Up => Some(self.repeat.hard_drop),
            Button::Down => Some(self.repeat.soft_drop),
            _ => None,
        }
    }

    /// Records this frame's buttons and returns the resulting actions in
    /// the order they should be applied.
    pub fn step(&mut self, pressed: ButtonSet, context: InputContext) -> Actions {
        let mut triggers = [Trigger::Idle; Button::LEN];
        for button in Button::ALL {
            let rate = self.repeat_rate(button, context);
            triggers[button.index()] =
                self.buttons[button.index()].update(pressed.contains(button), rate);
        }
        let triggers = Triggers(triggers);

        let mut actions = Actions::new();
        match context {
            InputContext::StartMenu => self.start_menu_actions(&triggers, &mut actions),
            InputContext::OptionsMenu => Self::options_menu_actions(&triggers, &mut actions),
            InputContext::Playing => Self::playing_actions(&triggers, &mut actions),
            InputContext::Paused => Self::paused_actions(pressed, &triggers, &mut actions),
            InputContext::Inactive => {}
        }
        actions
    }

    fn start_menu_actions(&mut self, triggers: &Triggers, actions: &mut Actions) {
        for button in [
            Button::Up,
            Button::Down,
            Button::Left,
            Button::Right,
            Button::A,
            Button::B,
        ] {
            if triggers.pressed(button) {
                self.secret.push(button);
            }
        }
        if triggers.pressed(Button::Up) {
            actions.push(Action::MenuUp);
        }
        if triggers.pressed(Button::Down) {
            actions.push(Action::MenuDown);
        }
        if triggers.pressed(Button::Start) {
            if self.secret.submit() {
                actions.push(Action::UnlockSecretPalette);
            } else {
                actions.push(Action::MenuConfirm);
            }
        }
    }

    fn options_menu_actions(triggers: &Triggers, actions: &mut Actions) {
        let table = [
            (Button::Up, Action::MenuUp),
            (Button::Down, Action::MenuDown),
            (Button::Left, Action::MenuLeft),
            (Button::Right, Action::MenuRight),
            (Button::Start, Action::MenuConfirm),
            (Button::Stop, Action::MenuCancel),
        ];
        actions.extend(
            table
                .into_iter()
                .filter(|(button, _)| triggers.pressed(*button))
                .map(|(_, action)| action),
        );
    }

    fn playing_actions(triggers: &Triggers, actions: &mut Actions) {
        if triggers.pressed(Button::Stop) {
            actions.push(Action::Pause);
        }
        if triggers.pressed(Button::Start) {
            actions.push(Action::TogglePause);
        }
        if triggers.pressed(Button::LeftShift) {
            actions.push(Action::Hold);
        }
        if triggers.pressed(Button::RightShift) {
            actions.push(Action::RerollQueue);
        }
        if triggers.fired(Button::A) {
            actions.push(Action::Rotate(RotationDirection::CounterClockwise));
        }
        if triggers.fired(Button::C) {
            actions.push(Action::Rotate(RotationDirection::Clockwise));
        }
        if triggers.fired(Button::Up) {
            actions.push(Action::HardDrop);
        }
        if triggers.fired(Button::Down) {
            actions.push(Action::SoftDrop {
                initial_press: triggers.pressed(Button::Down),
            });
        }
        if triggers.fired(Button::Left) {
            actions.push(Action::MoveLeft);
        }
        if triggers.fired(Button::Right) {
            actions.push(Action::MoveRight);
        }
    }

    fn paused_actions(pressed: ButtonSet, triggers: &Triggers, actions: &mut Actions) {
        if pressed.contains(Button::LeftShift) && pressed.contains(Button::RightShift) {
            actions.push(Action::Forfeit);
            return;
        }
        if triggers.pressed(Button::Stop) {
            actions.push(Action::OpenOptions);
        }
        if triggers.pressed(Button::Start) {
            actions.push(Action::TogglePause);
        }
    }
}

struct Triggers([Trigger; Button::LEN]);

impl Triggers {
    fn pressed(&self, button: Button) -> bool {
        self.0[button.index()].is_press()
    }

    fn fired(&self, button: Button) -> bool {
        self.0[button.index()].fired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(buttons: &[Button]) -> ButtonSet {
        buttons.iter().copied().collect()
    }

    fn machine() -> InputStateMachine {
        InputStateMachine::new(InputRepeatConfig::default())
    }

    /// Holds `buttons` for `frames` frames and collects every action.
    fn hold(
        input: &mut InputStateMachine,
        buttons: &[Button],
        frames: usize,
        context: InputContext,
    ) -> Vec<(usize, Action)> {
        (0..frames)
            .flat_map(|frame| {
                input
                    .step(set(buttons), context)
                    .into_iter()
                    .map(move |action| (frame, action))
            })
            .collect()
    }

    mod gameplay {
        use super::*;

        #[test]
        fn test_rotation_repeats_every_fifteen_frames() {
            let mut input = machine();
            let actions = hold(&mut input, &[Button::C], 31, InputContext::Playing);
            let cw = Action::Rotate(RotationDirection::Clockwise);
            assert_eq!(actions, [(0, cw), (15, cw), (30, cw)]);
        }

        #[test]
        fn test_a_rotates_counter_clockwise() {
            let mut input = machine();
            let actions = input.step(set(&[Button::A]), InputContext::Playing);
            assert_eq!(
                actions.as_slice(),
                &[Action::Rotate(RotationDirection::CounterClockwise)]
            );
        }

        #[test]
        fn test_soft_drop_marks_initial_press() {
            let mut input = machine();
            let actions = hold(&mut input, &[Button::Down], 7, InputContext::Playing);
            assert_eq!(
                actions,
                [
                    (0, Action::SoftDrop { initial_press: true }),
                    (3, Action::SoftDrop { initial_press: false }),
                    (6, Action::SoftDrop { initial_press: false }),
                ]
            );
        }

        #[test]
        fn test_hold_and_reroll_are_edge_only() {
            let mut input = machine();
            let actions = hold(
                &mut input,
                &[Button::LeftShift, Button::RightShift],
                40,
                InputContext::Playing,
            );
            assert_eq!(actions, [(0, Action::Hold), (0, Action::RerollQueue)]);
        }

        #[test]
        fn test_pause_buttons() {
            let mut input = machine();
            assert_eq!(
                input.step(set(&[Button::Stop]), InputContext::Playing).as_slice(),
                &[Action::Pause]
            );
            input.step(ButtonSet::EMPTY, InputContext::Paused);
            assert_eq!(
                input.step(set(&[Button::Stop]), InputContext::Paused).as_slice(),
                &[Action::OpenOptions]
            );
            input.step(ButtonSet::EMPTY, InputContext::Paused);
            assert_eq!(
                input.step(set(&[Button::Start]), InputContext::Paused).as_slice(),
                &[Action::TogglePause]
            );
        }

        #[test]
        fn test_movement_ignored_while_paused() {
            let mut input = machine();
            let actions = hold(
                &mut input,
                &[Button::Left, Button::A, Button::Up],
                30,
                InputContext::Paused,
            );
            assert!(actions.is_empty());
        }

        #[test]
        fn test_both_shifts_while_paused_forfeit() {
            let mut input = machine();
            let actions = input.step(
                set(&[Button::LeftShift, Button::RightShift, Button::Start]),
                InputContext::Paused,
            );
            assert_eq!(actions.as_slice(), &[Action::Forfeit]);
        }

        #[test]
        fn test_button_held_across_contexts_does_not_refire() {
            let mut input = machine();
            let start = set(&[Button::Start]);
            assert_eq!(
                input.step(start, InputContext::StartMenu).as_slice(),
                &[Action::MenuConfirm]
            );
            assert!(input.step(start, InputContext::Inactive).is_empty());
            assert!(input.step(start, InputContext::Playing).is_empty());
            assert!(input.button(Button::Start).is_held());
        }
    }

    mod menus {
        use super::*;

        #[test]
        fn test_options_menu_has_no_auto_repeat() {
            let mut input = machine();
            let actions = hold(&mut input, &[Button::Down], 60, InputContext::OptionsMenu);
            assert_eq!(actions, [(0, Action::MenuDown)]);
        }

        #[test]
        fn test_options_menu_confirm_and_cancel() {
            let mut input = machine();
            let actions = input.step(
                set(&[Button::Left, Button::Start, Button::Stop]),
                InputContext::OptionsMenu,
            );
            assert_eq!(
                actions.as_slice(),
                &[Action::MenuLeft, Action::MenuConfirm, Action::MenuCancel]
            );
        }

        #[test]
        fn test_secret_sequence_unlocks_palette() {
            let mut input = machine();
            let sequence = [
                Button::Up,
                Button::Up,
                Button::Down,
                Button::Down,
                Button::Left,
                Button::Right,
                Button::Left,
                Button::Right,
                Button::B,
                Button::A,
                Button::B,
                Button::A,
            ];
            for button in sequence {
                input.step(set(&[button]), InputContext::StartMenu);
                input.step(ButtonSet::EMPTY, InputContext::StartMenu);
            }
            assert_eq!(
                input.step(set(&[Button::Start]), InputContext::StartMenu).as_slice(),
                &[Action::UnlockSecretPalette]
            );
            input.step(ButtonSet::EMPTY, InputContext::StartMenu);
            assert_eq!(
                input.step(set(&[Button::Start]), InputContext::StartMenu).as_slice(),
                &[Action::MenuConfirm]
            );
        }

        #[test]
        fn test_presses_outside_start_menu_are_not_recorded() {
            let mut input = machine();
            for button in [Button::Up, Button::Up, Button::Down, Button::Down] {
                input.step(set(&[button]), InputContext::StartMenu);
                input.step(ButtonSet::EMPTY, InputContext::StartMenu);
            }
            // The rest of the sequence entered during gameplay does not count.
            for button in [
                Button::Left,
                Button::Right,
                Button::Left,
                Button::Right,
                Button::B,
                Button::A,
                Button::B,
                Button::A,
            ] {
                input.step(set(&[button]), InputContext::Playing);
                input.step(ButtonSet::EMPTY, InputContext::Playing);
            }
            assert_eq!(
                input.step(set(&[Button::Start]), InputContext::StartMenu).as_slice(),
                &[Action::MenuConfirm]
            );
        }
    }
}
