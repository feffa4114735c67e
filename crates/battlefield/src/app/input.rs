use super::camera::{Axis, AxisMotion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub fn with_down(mut self, action: InputAction) -> Self {
        self.set(action, true);
        self
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    /// Scroll direction requested on `axis`; opposing keys cancel out.
    pub fn motion(&self, axis: Axis) -> AxisMotion {
        let (negative, positive) = match axis {
            Axis::Horizontal => (InputAction::MoveLeft, InputAction::MoveRight),
            Axis::Vertical => (InputAction::MoveUp, InputAction::MoveDown),
        };
        match (self.is_down(negative), self.is_down(positive)) {
            (true, false) => AxisMotion::Negative,
            (false, true) => AxisMotion::Positive,
            _ => AxisMotion::Stopped,
        }
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
        }
    }
}
