use crate::config::Bindings;
use crate::engine::input::KeyState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Logical controls held during a tick
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl Controls {
    pub fn from_keys(keystate: &KeyState, bindings: &Bindings) -> Self {
        Controls {
            up: keystate.is_pressed(&bindings.up),
            down: keystate.is_pressed(&bindings.down),
            left: keystate.is_pressed(&bindings.left),
            right: keystate.is_pressed(&bindings.right),
            fire: keystate.is_pressed(&bindings.fire),
        }
    }
}

impl Bindings {
    pub fn control_for(&self, code: &str) -> Option<Control> {
        // fire first : if someone binds one key twice, firing wins
        [
            (&self.fire, Control::Fire),
            (&self.up, Control::Up),
            (&self.down, Control::Down),
            (&self.left, Control::Left),
            (&self.right, Control::Right),
        ]
        .into_iter()
        .find(|(bound, _)| bound.as_str() == code)
        .map(|(_, control)| control)
    }
}
